//! Enigma CLI - Message stream processing for the `enigma` binary
//!
//! Input is read line by line:
//! - `*` lines are setup lines and reconfigure the machine
//! - empty lines are copied to the output
//! - every other line is a message, printed converted in groups of five

pub mod error;
pub mod logging;
pub mod process;

pub use error::*;
pub use process::*;

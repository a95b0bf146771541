//! Enigma Config - Text formats for the rotor machine
//!
//! Two formats are read here:
//! - the machine configuration: alphabet, slot and pawl counts, then one
//!   record per rotor (`name type+notches (cycles)...`)
//! - setup lines starting with `*`, which pick rotors, settings, rings and
//!   the plugboard for the messages that follow

pub mod config;
pub mod setup;
pub mod error;

pub use config::*;
pub use setup::*;
pub use error::*;

//! Enigma Core - Rotor cipher engine
//!
//! Simulates an electromechanical rotor cipher machine:
//! - Alphabets (ordered character sets, char <-> index)
//! - Permutations in cycle notation with O(1) permute/invert
//! - Rotors: reflectors, fixed rotors and moving rotors with notches
//! - The machine: rotor stepping (including the double step), ring
//!   settings, plugboard and the full signal path
//!
//! ```
//! use std::sync::Arc;
//! use enigma_core::{Alphabet, Machine, Permutation, Rotor};
//!
//! let alpha = Arc::new(Alphabet::default());
//! let wiring = |cycles: &str| Permutation::new(cycles, alpha.clone()).unwrap();
//! let rotors = vec![
//!     Rotor::reflector("B", wiring("(AY) (BR) (CU) (DH) (EQ) (FS) (GL) (IP) (JX) (KN) (MO) (TZ) (VW)")).unwrap(),
//!     Rotor::moving("I", wiring("(AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)"), "Q").unwrap(),
//!     Rotor::moving("II", wiring("(FIXVYOMW) (CDKLHUP) (ESZ) (BJ) (GR) (NT) (A) (Q)"), "E").unwrap(),
//!     Rotor::moving("III", wiring("(ABDHPEJT) (CFLVMZOYQIRWUKXSG) (N)"), "V").unwrap(),
//! ];
//!
//! let mut machine = Machine::new(alpha.clone(), 4, 3, rotors).unwrap();
//! machine.insert_rotors(&["B", "I", "II", "III"]).unwrap();
//! machine.set_rotors("AAA").unwrap();
//! assert_eq!(machine.convert("AAAAA").unwrap(), "BDZGO");
//! ```

pub mod alphabet;
pub mod permutation;
pub mod rotor;
pub mod machine;
pub mod error;

pub use alphabet::*;
pub use permutation::*;
pub use rotor::*;
pub use machine::*;
pub use error::*;

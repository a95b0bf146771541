//! Error types for the rotor engine

use thiserror::Error;

/// Broad failure classes
///
/// Configuration errors abort a run before any text is converted.
/// Alphabet errors are raised when text to be converted contains a
/// character the machine does not know.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Alphabet,
}

/// Core engine errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    // Alphabet errors
    #[error("Alphabet must contain at least one character")]
    EmptyAlphabet,

    #[error("Duplicate character '{0}' in alphabet")]
    DuplicateCharacter(char),

    #[error("Character '{0}' is not in the alphabet")]
    NotInAlphabet(char),

    // Permutation errors
    #[error("Malformed cycle description: {0}")]
    MalformedCycles(String),

    #[error("Character '{0}' appears more than once in cycle description")]
    RepeatedCycleCharacter(char),

    #[error("Permutation alphabet does not match machine alphabet")]
    AlphabetMismatch,

    #[error("Plugboard may only swap pairs of characters, found cycle {0}")]
    PlugboardNotSwaps(String),

    // Rotor errors
    #[error("Reflector {0} wiring must not map any character to itself")]
    ReflectorNotDerangement(String),

    // Machine errors
    #[error("Invalid machine geometry: {slots} slots, {pawls} pawls")]
    InvalidGeometry { slots: usize, pawls: usize },

    #[error("Bad rotor name: {0}")]
    UnknownRotor(String),

    #[error("Duplicate rotor name: {0}")]
    DuplicateRotor(String),

    #[error("Expected {expected} rotor names, got {actual}")]
    RotorCount { expected: usize, actual: usize },

    #[error("First rotor must be a reflector, found {0}")]
    NotReflector(String),

    #[error("Reflector {name} may not occupy slot {slot}")]
    MisplacedReflector { name: String, slot: usize },

    #[error("{notched} notched rotors exceed {pawls} pawls")]
    TooManyNotchedRotors { notched: usize, pawls: usize },

    #[error("Setting '{setting}' must have {expected} characters")]
    SettingLength { setting: String, expected: usize },

    #[error("Setting '{setting}' contains '{ch}', which is not in the alphabet")]
    SettingCharacter { setting: String, ch: char },

    #[error("No rotors inserted")]
    RotorsNotInserted,
}

impl EnigmaError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            EnigmaError::NotInAlphabet(_) => ErrorKind::Alphabet,
            _ => ErrorKind::Configuration,
        }
    }

    /// True for failures that must abort the run before conversion
    pub fn is_configuration(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }
}

/// Result type for engine operations
pub type EnigmaResult<T> = Result<T, EnigmaError>;

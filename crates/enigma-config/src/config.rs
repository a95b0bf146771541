//! Machine configuration files
//!
//! ```text
//! ABCDEFGHIJKLMNOPQRSTUVWXYZ
//! 5 3
//! I MQ      (AELTPHQXRU) (BKNW) (CMOY) (DFG) (IV) (JZ) (S)
//! Beta N    (ALBEVFCYODJWUGNMQTZSKPR) (HIX)
//! B R       (AE) (BN) (CK) (DQ) (FU) (GY) (HW) (IJ) (LO) (MP)
//!           (RX) (SZ) (TV)
//! ```
//!
//! The file is a stream of whitespace-separated tokens: the alphabet, the
//! number of rotor slots, the number of pawls, then rotor records. A record
//! is a name, a type token (`M` moving, `N` fixed, `R` reflector) followed
//! directly by the notch letters, and one or more cycle tokens. A record
//! ends at the first token that contains no parenthesis.

use std::iter::Peekable;
use std::path::Path;
use std::str::SplitWhitespace;
use std::sync::Arc;

use enigma_core::{Alphabet, EnigmaError, Machine, Permutation, Rotor};
use tracing::{debug, warn};

use crate::{ConfigError, ConfigResult};

type Tokens<'a> = Peekable<SplitWhitespace<'a>>;

/// A parsed machine configuration
#[derive(Clone, Debug)]
pub struct MachineConfig {
    alphabet: Arc<Alphabet>,
    num_rotors: usize,
    num_pawls: usize,
    rotors: Vec<Rotor>,
}

impl MachineConfig {
    /// Read and parse the configuration file at `path`
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Parse configuration text
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut tokens = text.split_whitespace().peekable();

        let alphabet = tokens.next().ok_or(ConfigError::Truncated)?;
        let alphabet = Arc::new(
            Alphabet::new(alphabet).map_err(|e| ConfigError::BadHeader(e.to_string()))?,
        );
        let num_rotors = parse_count(&mut tokens, "rotor slots")?;
        let num_pawls = parse_count(&mut tokens, "pawls")?;
        if num_rotors < 2 || num_pawls >= num_rotors {
            return Err(ConfigError::BadHeader(format!(
                "need 1 < slots and 0 <= pawls < slots, got {} slots and {} pawls",
                num_rotors, num_pawls
            )));
        }

        let mut rotors: Vec<Rotor> = Vec::new();
        while tokens.peek().is_some() {
            let rotor = parse_rotor(&mut tokens, &alphabet)?;
            if rotors.iter().any(|r| r.name() == rotor.name()) {
                return Err(EnigmaError::DuplicateRotor(rotor.name().to_string()).into());
            }
            rotors.push(rotor);
        }

        debug!(
            alphabet = %alphabet,
            slots = num_rotors,
            pawls = num_pawls,
            rotors = rotors.len(),
            "configuration loaded"
        );

        Ok(MachineConfig {
            alphabet,
            num_rotors,
            num_pawls,
            rotors,
        })
    }

    pub fn alphabet(&self) -> &Arc<Alphabet> {
        &self.alphabet
    }

    pub fn num_rotors(&self) -> usize {
        self.num_rotors
    }

    pub fn num_pawls(&self) -> usize {
        self.num_pawls
    }

    /// Rotor catalog, in file order
    pub fn rotors(&self) -> &[Rotor] {
        &self.rotors
    }

    /// Build a machine with no rotors inserted yet
    pub fn build(&self) -> ConfigResult<Machine> {
        Ok(Machine::new(
            self.alphabet.clone(),
            self.num_rotors,
            self.num_pawls,
            self.rotors.iter().cloned(),
        )?)
    }
}

fn parse_count(tokens: &mut Tokens<'_>, what: &str) -> ConfigResult<usize> {
    let token = tokens.next().ok_or(ConfigError::Truncated)?;
    token.parse().map_err(|_| {
        ConfigError::BadHeader(format!(
            "number of {} must be an integer, got {:?}",
            what, token
        ))
    })
}

fn has_paren(token: &str) -> bool {
    token.contains('(') || token.contains(')')
}

fn parse_rotor(tokens: &mut Tokens<'_>, alphabet: &Arc<Alphabet>) -> ConfigResult<Rotor> {
    let name = tokens.next().ok_or(ConfigError::Truncated)?;
    let bad = |reason: String| ConfigError::BadRotorDescription {
        name: name.to_string(),
        reason,
    };
    if has_paren(name) {
        return Err(bad("expected a rotor name before the cycles".into()));
    }

    let info = tokens
        .next()
        .ok_or_else(|| bad("missing type and notches".into()))?;
    let mut info_chars = info.chars();
    let kind = info_chars.next().unwrap_or(' ');
    let notches = info_chars.as_str();

    let mut cycles = String::new();
    while let Some(token) = tokens.next_if(|t| has_paren(t)) {
        if !(token.starts_with('(') && token.ends_with(')')) {
            return Err(bad(format!("malformed cycle token {:?}", token)));
        }
        cycles.push_str(token);
        cycles.push(' ');
    }
    if cycles.is_empty() {
        return Err(bad("missing wiring cycles".into()));
    }

    let permutation =
        Permutation::new(&cycles, alphabet.clone()).map_err(|e| bad(e.to_string()))?;

    let rotor = match kind {
        'M' => Rotor::moving(name, permutation, notches).map_err(|e| bad(e.to_string()))?,
        'N' => {
            if !notches.is_empty() {
                warn!(rotor = name, notches, "ignoring notches on fixed rotor");
            }
            Rotor::fixed(name, permutation)
        }
        'R' => {
            if !notches.is_empty() {
                warn!(rotor = name, notches, "ignoring notches on reflector");
            }
            Rotor::reflector(name, permutation).map_err(|e| bad(e.to_string()))?
        }
        other => return Err(bad(format!("unknown rotor type {:?}", other))),
    };

    debug!(rotor = name, kind = %kind, notches = %rotor.notches(), "rotor parsed");
    Ok(rotor)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_CONF: &str = include_str!("../../../testdata/default.conf");

    fn bad_rotor(result: ConfigResult<MachineConfig>) -> (String, String) {
        match result {
            Err(ConfigError::BadRotorDescription { name, reason }) => (name, reason),
            other => panic!("expected bad rotor description, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_default() {
        let config = MachineConfig::parse(DEFAULT_CONF).unwrap();
        assert_eq!(config.alphabet().size(), 26);
        assert_eq!(config.num_rotors(), 5);
        assert_eq!(config.num_pawls(), 3);

        let names: Vec<&str> = config.rotors().iter().map(|r| r.name()).collect();
        assert_eq!(
            names,
            ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "Beta", "Gamma", "B", "C"]
        );

        let vi = &config.rotors()[5];
        assert!(vi.rotates());
        assert_eq!(vi.notches(), "ZM");

        let beta = &config.rotors()[8];
        assert!(!beta.rotates() && !beta.reflecting());

        // Reflector cycles continue on the next line
        let b = &config.rotors()[10];
        assert!(b.reflecting());
        assert!(b.permutation().derangement());
    }

    #[test]
    fn test_build_machine() {
        let config = MachineConfig::parse(DEFAULT_CONF).unwrap();
        let mut machine = config.build().unwrap();
        assert_eq!(machine.num_rotors(), 5);
        assert_eq!(machine.catalog().len(), 12);
        machine
            .insert_rotors(&["B", "Beta", "III", "IV", "I"])
            .unwrap();
    }

    #[test]
    fn test_adjacent_cycles_in_one_token() {
        let config = MachineConfig::parse("ABCD 2 1 R1 R (AB)(CD) M1 MA (ABCD)").unwrap();
        assert_eq!(config.rotors()[0].permutation().to_string(), "(AB) (CD)");
        assert_eq!(config.rotors()[1].notches(), "A");
    }

    #[test]
    fn test_truncated() {
        for text in ["", "ABCD", "ABCD 2"] {
            assert!(
                matches!(MachineConfig::parse(text), Err(ConfigError::Truncated)),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_bad_header() {
        for text in ["ABCD two 1", "ABCD 2 x", "ABCD 1 0", "ABCD 3 3", "ABCA 2 1"] {
            assert!(
                matches!(MachineConfig::parse(text), Err(ConfigError::BadHeader(_))),
                "{:?}",
                text
            );
        }
    }

    #[test]
    fn test_bad_rotor_descriptions() {
        let (name, reason) = bad_rotor(MachineConfig::parse("ABCD 2 1 R1"));
        assert_eq!(name, "R1");
        assert!(reason.contains("type"));

        let (_, reason) = bad_rotor(MachineConfig::parse("ABCD 2 1 R1 R"));
        assert!(reason.contains("cycles"));

        let (name, reason) = bad_rotor(MachineConfig::parse("ABCD 2 1 R1 R X (AB)"));
        assert_eq!(name, "R1");
        assert!(reason.contains("cycles"));

        let (_, reason) = bad_rotor(MachineConfig::parse("ABCD 2 1 R1 R (AB)x"));
        assert!(reason.contains("malformed"));

        let (_, reason) = bad_rotor(MachineConfig::parse("ABCD 2 1 R1 Q (AB)"));
        assert!(reason.contains("unknown rotor type"));

        // Reflector that fixes C and D
        let (name, _) = bad_rotor(MachineConfig::parse("ABCD 2 1 R1 R (AB)"));
        assert_eq!(name, "R1");

        // Notch outside the alphabet
        let (name, _) = bad_rotor(MachineConfig::parse("ABCD 2 1 M1 MZ (ABCD)"));
        assert_eq!(name, "M1");

        // Wiring outside the alphabet
        let (_, reason) = bad_rotor(MachineConfig::parse("ABCD 2 1 M1 MA (ABCE)"));
        assert!(reason.contains("'E'"));
    }

    #[test]
    fn test_duplicate_rotor_names() {
        let result = MachineConfig::parse("ABCD 2 1 X R (AB)(CD) X MA (ABCD)");
        assert!(matches!(
            result,
            Err(ConfigError::Engine(EnigmaError::DuplicateRotor(ref n))) if n == "X"
        ));
    }

    #[test]
    fn test_from_path() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../testdata/default.conf");
        let config = MachineConfig::from_path(path).unwrap();
        assert_eq!(config.rotors().len(), 12);

        let missing = MachineConfig::from_path("/nonexistent/enigma.conf");
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}

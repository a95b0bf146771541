//! Setup lines
//!
//! A setup line configures the machine for the messages that follow it:
//!
//! ```text
//! * B Beta III IV I AXLE BCDE (HQ) (EX) (IP) (TR) (BY)
//!   |  \__________/  |    |    \___________________/
//!   |   rotors     window rings      plugboard
//!   reflector
//! ```
//!
//! The ring token is optional, as is the plugboard.

use std::fmt;

use enigma_core::{Machine, Permutation};
use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// A parsed `*` line
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Setup {
    /// Rotor names, reflector first
    pub rotors: Vec<String>,
    /// Window letters, one per non-reflector slot
    pub setting: String,
    /// Ring letters, one per non-reflector slot
    pub rings: Option<String>,
    /// Plugboard cycles (may be empty)
    pub plugboard: String,
}

impl Setup {
    /// Parse a setup line for a machine with `num_rotors` slots
    pub fn parse(line: &str, num_rotors: usize) -> ConfigResult<Self> {
        let body = line
            .trim_start()
            .strip_prefix('*')
            .ok_or_else(|| ConfigError::BadSetup(format!("expected '*' at start of {:?}", line)))?;
        let mut tokens = body.split_whitespace().peekable();

        let rotors: Vec<String> = tokens
            .by_ref()
            .take(num_rotors)
            .map(str::to_string)
            .collect();
        if rotors.len() < num_rotors {
            return Err(ConfigError::BadSetup(format!(
                "expected {} rotor names, got {}",
                num_rotors,
                rotors.len()
            )));
        }

        let setting = tokens
            .next()
            .ok_or_else(|| ConfigError::BadSetup("missing rotor setting".into()))?
            .to_string();
        let rings = tokens
            .next_if(|t| !t.contains('(') && !t.contains(')'))
            .map(str::to_string);

        let mut plugboard = Vec::new();
        for token in tokens {
            if !token.starts_with('(') || !token.ends_with(')') {
                return Err(ConfigError::BadSetup(format!(
                    "unexpected token {:?} in plugboard",
                    token
                )));
            }
            plugboard.push(token);
        }

        Ok(Setup {
            rotors,
            setting,
            rings,
            plugboard: plugboard.join(" "),
        })
    }

    /// Configure `machine`: rotors, rings, window letters, then plugboard
    ///
    /// The machine is changed only if every step succeeds.
    pub fn apply(&self, machine: &mut Machine) -> ConfigResult<()> {
        let plugboard = Permutation::new(&self.plugboard, machine.alphabet().clone())?;

        let mut next = machine.clone();
        next.insert_rotors(&self.rotors)?;
        next.set_rings(self.rings.as_deref().unwrap_or(""))?;
        next.set_rotors(&self.setting)?;
        next.set_plugboard(plugboard)?;
        *machine = next;

        debug!(setup = %self, "setup applied");
        Ok(())
    }
}

impl fmt::Display for Setup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "* {} {}", self.rotors.join(" "), self.setting)?;
        if let Some(rings) = &self.rings {
            write!(f, " {}", rings)?;
        }
        if !self.plugboard.is_empty() {
            write!(f, " {}", self.plugboard)?;
        }
        Ok(())
    }
}

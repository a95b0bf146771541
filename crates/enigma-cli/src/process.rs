//! Message stream processing

use std::io::{BufRead, Write};

use enigma_config::{MachineConfig, Setup};
use enigma_core::Machine;
use tracing::debug;

use crate::{CliError, CliResult};

/// Letters per output group
pub const GROUP_SIZE: usize = 5;

/// Split `msg` into groups of `size` characters separated by single spaces
///
/// The last group may be shorter.
pub fn group(msg: &str, size: usize) -> String {
    let chars: Vec<char> = msg.chars().collect();
    chars
        .chunks(size.max(1))
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drives one machine over an input stream
#[derive(Debug)]
pub struct Processor {
    machine: Machine,
    configured: bool,
}

impl Processor {
    /// Create a processor with a fresh machine built from `config`
    pub fn new(config: &MachineConfig) -> CliResult<Self> {
        Ok(Processor {
            machine: config.build()?,
            configured: false,
        })
    }

    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    /// Handle one input line, returning the output line if any
    ///
    /// `line_no` is 1-based and only used in error messages.
    pub fn line(&mut self, line: &str, line_no: usize) -> CliResult<Option<String>> {
        let trimmed = line.trim();
        if trimmed.starts_with('*') {
            let setup = Setup::parse(trimmed, self.machine.num_rotors())?;
            setup.apply(&mut self.machine)?;
            self.configured = true;
            debug!(line = line_no, window = %self.machine.window(), "machine configured");
            return Ok(None);
        }
        if line.is_empty() {
            return Ok(Some(String::new()));
        }
        // A line of spaces is a message with no letters
        if !self.configured {
            return Err(CliError::MissingSetting(line_no));
        }

        let converted = self.machine.convert(line)?;
        Ok(Some(group(&converted, GROUP_SIZE)))
    }

    /// Process every line of `input`, writing results to `output`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> CliResult<()> {
        for (i, line) in input.lines().enumerate() {
            let line = line?;
            if let Some(out) = self.line(&line, i + 1)? {
                writeln!(output, "{}", out)?;
            }
        }
        output.flush()?;
        Ok(())
    }
}

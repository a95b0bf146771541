//! enigma - rotor cipher machine simulator
//!
//! ```text
//! enigma [--verbose] CONFIG [INPUT [OUTPUT]]
//! ```
//!
//! Reads the machine description from CONFIG, then processes messages from
//! INPUT (default: standard input) into OUTPUT (default: standard output).
//! Exits with status 1 on any error.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueHint};
use enigma_cli::{logging, CliError, CliResult, Processor};
use enigma_config::MachineConfig;

#[derive(Parser, Debug)]
#[command(name = "enigma", version, about = "Rotor cipher machine simulator")]
struct Cli {
    /// Trace every rotor position and signal path on stderr
    #[arg(long)]
    verbose: bool,

    /// Machine configuration file
    #[arg(value_hint = ValueHint::FilePath)]
    config: PathBuf,

    /// Message file (default: standard input)
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Output file (default: standard output)
    #[arg(value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CliResult<()> {
    let config = MachineConfig::from_path(&cli.config)?;
    let mut processor = Processor::new(&config)?;

    let input: Box<dyn BufRead> = match &cli.input {
        Some(path) => Box::new(BufReader::new(File::open(path).map_err(open_error(path))?)),
        None => Box::new(io::stdin().lock()),
    };
    let mut output: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(BufWriter::new(File::create(path).map_err(open_error(path))?)),
        None => Box::new(io::stdout().lock()),
    };

    processor.run(input, &mut output)
}

fn open_error(path: &Path) -> impl FnOnce(io::Error) -> CliError + '_ {
    move |source| CliError::Open {
        path: path.to_path_buf(),
        source,
    }
}

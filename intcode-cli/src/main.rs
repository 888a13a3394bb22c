//! Intcode CLI — run, trace, and disassemble programs.
//!
//! Exit codes:
//! - 0: Success
//! - 1: Usage error, unreadable file, or empty program
//! - 3: Runtime fault

mod commands;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use intcode_vm::{MachineConfig, DEFAULT_MEMORY_SIZE};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "intcode",
    version,
    about = "Run and inspect Intcode programs (comma-separated integer cells)."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a program to completion and print its outputs
    Run(RunArgs),
    /// Run a program one instruction at a time, printing each as it executes
    Trace(RunArgs),
    /// Print a disassembly listing of a program
    Disassemble {
        /// Program file
        file: PathBuf,
    },
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Program file
    pub file: PathBuf,

    /// Input values fed to the program in order, e.g. "1,2,-3"
    #[arg(long, value_name = "CELLS")]
    pub input: Option<String>,

    /// Memory image size in cells
    #[arg(long, value_name = "CELLS", default_value_t = DEFAULT_MEMORY_SIZE)]
    pub memory: usize,

    /// Give up after this many instructions. With `run`, an `in` that
    /// blocks waiting for input counts as one more
    #[arg(long, value_name = "N")]
    pub max_steps: Option<u64>,
}

impl RunArgs {
    pub fn config(&self) -> MachineConfig {
        MachineConfig {
            memory_size: self.memory,
            step_limit: self.max_steps,
        }
    }
}

fn main() {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // --help and --version are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            process::exit(code);
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = match &cli.command {
        Command::Run(args) => commands::run(args),
        Command::Trace(args) => commands::trace(args),
        Command::Disassemble { file } => commands::disassemble(file),
    };

    if let Err(code) = result {
        process::exit(code);
    }
}

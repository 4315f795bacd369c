mod cli;
mod config;

use clap::{Parser, Subcommand};
use filesend_core::logging::{LogMode, default_log_mode, init_logging};

use crate::cli::inspect::{InspectArgs, run_inspect};

#[derive(Parser, Debug)]
#[command(
    name = "filesend",
    version,
    about = "filesend: run static file requests through the send pipeline"
)]
struct Cli {
    /// Emit logs as JSON lines
    #[arg(long, global = true, conflicts_with = "pretty")]
    raw: bool,

    /// Emit human-readable logs
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve one request against a directory and print the response
    Inspect(InspectArgs),
}

fn main() {
    let cli = Cli::parse();

    let mode = if cli.raw {
        LogMode::Raw
    } else if cli.pretty {
        LogMode::Pretty
    } else {
        default_log_mode()
    };
    init_logging(mode);

    let result = match cli.command {
        Command::Inspect(args) => run_inspect(args),
    };

    if let Err(e) = result {
        eprintln!("filesend error: {e:#}");
        std::process::exit(1);
    }
}

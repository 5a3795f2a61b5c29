//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// Convert svn:ignore properties of a Subversion working copy into a flat ignore file
#[derive(Parser, Debug)]
#[command(name = "svn2gitignore")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Collect svn:ignore properties and write the equivalent ignore file
    Convert(commands::convert::ConvertArgs),
    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(&self.log_level);
        let output = svn2gitignore::output::OutputConfig::from_env_and_flag(&self.color);

        match self.command {
            Commands::Convert(args) => commands::convert::execute(args, &output),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}

fn init_logging(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // a second init in the same process (tests) is harmless
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}

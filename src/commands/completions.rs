//! Completions command implementation
//!
//! Generates shell completion scripts using `clap_complete`. The script is
//! written to stdout so users can redirect it wherever their shell expects
//! completions, e.g.:
//!
//! ```bash
//! svn2gitignore completions bash > ~/.local/share/bash-completion/completions/svn2gitignore
//! ```

use anyhow::Result;
use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};
use std::io;

use crate::cli::Cli;

/// Arguments for the completions command
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// The shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> Result<()> {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "svn2gitignore", &mut io::stdout());
    Ok(())
}

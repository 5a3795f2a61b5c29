//! Convert command implementation
//!
//! The convert command executes the two-phase pipeline:
//! 1. Collection of svn:ignore properties across the working copy (bulk
//!    query, pruning, bounded fallback retrievals)
//! 2. Atomic write of the converted ignore file

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use svn2gitignore::config::{ScanConfig, DEFAULT_OUTPUT_FILE};
use svn2gitignore::output::{emoji, OutputConfig};
use svn2gitignore::phases::orchestrator;
use svn2gitignore::svn::SvnPropertySource;

/// Arguments for the convert command
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Root of the Subversion working copy to scan
    #[arg(value_name = "PATH")]
    pub path: PathBuf,

    /// Recurse into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Output file path
    #[arg(short, long, value_name = "PATH", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: PathBuf,

    /// Maximum recursion depth (0 = unlimited)
    #[arg(long, value_name = "DEPTH", default_value_t = 0)]
    pub max_depth: u32,

    /// Parallel fallback retrievals (clamped to 1-10)
    #[arg(
        short,
        long,
        value_name = "COUNT",
        default_value_t = 4,
        env = "SVN2GITIGNORE_THREADS"
    )]
    pub threads: usize,

    /// Collect and print the result without writing the output file
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

/// Execute the convert command
pub fn execute(args: ConvertArgs, out: &OutputConfig) -> Result<()> {
    let config = ScanConfig::new(
        args.path,
        args.recursive,
        args.max_depth,
        args.threads,
        args.output_file,
    )?;

    if !args.quiet {
        println!(
            "{} Converting svn:ignore properties under {}",
            emoji(out, "🔍", "[SCAN]"),
            config.root.display()
        );
        if config.recursive && config.max_depth > 0 {
            println!("   recursion depth limited to {}", config.max_depth);
        }
        if args.dry_run {
            println!("   dry run - nothing will be written");
        }
        println!();
    }

    let source = SvnPropertySource::new();
    let report = orchestrator::execute_convert(
        &config,
        &source,
        if args.dry_run {
            None
        } else {
            Some(&config.output)
        },
    )?;

    if args.dry_run && !report.rendered.is_empty() {
        print!("{}", report.rendered);
        if !args.quiet {
            println!();
        }
    }

    if !args.quiet {
        if report.records == 0 {
            println!(
                "{} No svn:ignore configuration found",
                emoji(out, "ℹ️", "[INFO]")
            );
        } else if report.written {
            println!(
                "{} Wrote {} ignore entries from {} directories to {}",
                emoji(out, "✅", "[OK]"),
                report.entries,
                report.records,
                config.output.display()
            );
        } else {
            println!(
                "{} Collected {} ignore entries from {} directories",
                emoji(out, "✅", "[OK]"),
                report.entries,
                report.records
            );
        }
        println!(
            "   {} directories visited, {} pruned, {} skipped",
            report.stats.visited, report.stats.pruned, report.stats.skipped
        );
        println!(
            "   collection {:.2}s, write {:.2}s",
            report.collection_duration.as_secs_f64(),
            report.write_duration.as_secs_f64()
        );
        for warning in &report.warnings {
            println!(
                "{} skipped {}: {}",
                emoji(out, "⚠️", "[WARN]"),
                warning.directory,
                warning.reason
            );
        }
    }

    Ok(())
}

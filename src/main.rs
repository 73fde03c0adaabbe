//! tfshow command-line interface.
//!
//! Reads a plan JSON file produced by `terraform show -json` and prints the
//! human-readable diff preview, optionally without color or into a file.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;
use tfshow_rs::{parse_file, render_plan};

/// Render a Terraform JSON plan as the diff preview `terraform show` prints
#[derive(Parser)]
#[command(name = "tfshow")]
#[command(version)]
#[command(about = "Render a Terraform JSON plan as `terraform show` output", long_about = None)]
struct Cli {
    /// Plan file produced by `terraform show -json plan.out`
    #[arg(value_name = "PLAN")]
    plan: PathBuf,

    /// Disable ANSI colors in the rendering
    #[arg(long)]
    no_color: bool,

    /// Write the rendering to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Verbose output (show progress on stderr)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(exit_code) => process::exit(exit_code),
        Err(err) => {
            eprintln!("{} {:#}", "Error:".red().bold(), err);
            process::exit(2);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    if cli.verbose {
        eprintln!("Parsing {}...", cli.plan.display());
    }

    let plan = parse_file(&cli.plan)
        .with_context(|| format!("Failed to parse plan: {}", cli.plan.display()))?;

    let use_color = !cli.no_color
        && cli.output.is_none()
        && std::io::stdout().is_terminal();
    let rendered = render_plan(&plan, use_color);

    match &cli.output {
        Some(path) => {
            if cli.verbose {
                eprintln!("Writing {}...", path.display());
            }
            fs::write(path, &rendered)
                .with_context(|| format!("Failed to write output to {}", path.display()))?;
        }
        None => print!("{rendered}"),
    }

    Ok(0)
}

//! Syntree CLI
//!
//! A thin glue layer for laying out and checking plots stored as JSON.

mod commands;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{check, layout, CheckArgs, LayoutArgs};

/// Syntree CLI - constituent tree plots from the command line
#[derive(Parser, Debug)]
#[command(name = "syntree")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lay out every tree of a plot and print the positioned trees
    Layout(LayoutArgs),

    /// Check that every tree of a plot is well formed
    Check(CheckArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|cwd| match cli.command {
            Command::Layout(args) => layout(args, &cwd),
            Command::Check(args) => check(args, &cwd),
        });

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

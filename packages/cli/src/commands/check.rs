use super::read_plot;
use anyhow::{anyhow, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Plot file (JSON)
    pub input: PathBuf,

    /// Also fail on trees that are valid but unfinished (several roots or
    /// stranded nodes)
    #[arg(long)]
    pub strict: bool,
}

pub fn check(args: CheckArgs, _cwd: &Path) -> Result<()> {
    println!("🔍 {} {}", "Checking".green().bold(), args.input.display());

    let plot = read_plot(&args.input)?;
    let mut failures = 0;

    for tree in plot.trees.values() {
        match tree.validate() {
            Err(err) => {
                failures += 1;
                println!("   {} {}", "✗".red(), err);
            }
            Ok(()) if !tree.is_complete() => {
                if args.strict {
                    failures += 1;
                }
                println!("   {} {} \"{}\" is unfinished", "!".yellow(), tree.id, tree.sentence);
            }
            Ok(()) => println!("   {} {} \"{}\"", "✓".green(), tree.id, tree.sentence),
        }
    }

    if failures > 0 {
        return Err(anyhow!("{} of {} trees failed", failures, plot.trees.len()));
    }
    println!("✨ {} {} trees", "Done".green().bold(), plot.trees.len());
    Ok(())
}

use super::read_plot;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use syntree_common::IdMap;
use syntree_editor::{EditorConfig, Layout, PositionedTree, UnpositionedPlot};
use tracing::info;

#[derive(Debug, Args)]
pub struct LayoutArgs {
    /// Plot file (JSON)
    pub input: PathBuf,

    /// Write the positioned plot here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory holding syntree.config.json (defaults to current directory)
    #[arg(short, long)]
    pub config_dir: Option<PathBuf>,

    /// Width of one character (overrides config)
    #[arg(long)]
    pub char_width: Option<f64>,
}

pub fn layout(args: LayoutArgs, cwd: &Path) -> Result<()> {
    let config = EditorConfig::load(args.config_dir.as_deref().unwrap_or(cwd))?;
    let char_width = args.char_width.unwrap_or(config.char_width);

    let plot = read_plot(&args.input)?;
    plot.validate()?;

    let positioned = position_monospace(&plot, Layout::new(config.layout), char_width)?;
    info!(trees = positioned.len(), "Laid out plot");

    let json = serde_json::to_string_pretty(&positioned)?;
    match &args.output {
        Some(path) => {
            fs::write(path, json)?;
            println!("{} {}", "✓".green(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

/// Lay out with every character `char_width` wide
fn position_monospace(
    plot: &UnpositionedPlot,
    layout: Layout,
    char_width: f64,
) -> Result<IdMap<PositionedTree>> {
    let positioned = layout.position_plot(|text: &str| text.chars().count() as f64 * char_width, plot)?;
    Ok(positioned)
}

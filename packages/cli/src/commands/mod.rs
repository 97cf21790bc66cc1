pub mod check;
pub mod layout;

pub use check::{check, CheckArgs};
pub use layout::{layout, LayoutArgs};

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use syntree_editor::UnpositionedPlot;
use tracing::debug;

/// Read and decode a plot file. Structural checks are left to the caller.
pub(crate) fn read_plot(path: &Path) -> Result<UnpositionedPlot> {
    debug!(path = %path.display(), "Reading plot");
    let content = fs::read_to_string(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let plot = serde_json::from_str(&content).with_context(|| format!("Cannot decode plot {}", path.display()))?;
    Ok(plot)
}

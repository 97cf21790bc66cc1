//! Coordinate spaces.
//!
//! Offsets are manual displacements authored by the user; coordinates are
//! absolute positions produced by layout. Tree coordinates are local to one
//! tree, plot coordinates place a tree on the plot.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeCoordsOffset {
    pub dtree_x: f64,
    pub dtree_y: f64,
}

impl TreeCoordsOffset {
    pub const ZERO: TreeCoordsOffset = TreeCoordsOffset {
        dtree_x: 0.0,
        dtree_y: 0.0,
    };

    pub fn new(dtree_x: f64, dtree_y: f64) -> Self {
        Self { dtree_x, dtree_y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotCoordsOffset {
    pub dplot_x: f64,
    pub dplot_y: f64,
}

impl PlotCoordsOffset {
    pub const ZERO: PlotCoordsOffset = PlotCoordsOffset {
        dplot_x: 0.0,
        dplot_y: 0.0,
    };

    pub fn new(dplot_x: f64, dplot_y: f64) -> Self {
        Self { dplot_x, dplot_y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordsInTree {
    pub tree_x: f64,
    pub tree_y: f64,
}

impl CoordsInTree {
    pub fn new(tree_x: f64, tree_y: f64) -> Self {
        Self { tree_x, tree_y }
    }

    pub fn plus(self, offset: TreeCoordsOffset) -> Self {
        Self {
            tree_x: self.tree_x + offset.dtree_x,
            tree_y: self.tree_y + offset.dtree_y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoordsInPlot {
    pub plot_x: f64,
    pub plot_y: f64,
}

impl From<PlotCoordsOffset> for CoordsInPlot {
    fn from(offset: PlotCoordsOffset) -> Self {
        Self {
            plot_x: offset.dplot_x,
            plot_y: offset.dplot_y,
        }
    }
}

/// Horizontal extent within a tree, e.g. the base of a terminal's triangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeXRange {
    pub start_tree_x: f64,
    pub end_tree_x: f64,
}

//! Laid-out nodes and trees.
//!
//! These are projections of the unpositioned model for rendering. They are
//! recomputed whenever needed and never edited or fed back into the model.

use crate::coords::{CoordsInPlot, CoordsInTree, TreeXRange};
use serde::{Deserialize, Serialize};
use syntree_common::{Id, IdMap, IdSet, StringSlice, WithId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedNode {
    pub id: Id,
    pub label: String,
    pub position: CoordsInTree,
    pub kind: PositionedNodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PositionedNodeKind {
    Branching {
        children: IdSet,
    },
    Terminal {
        slice: StringSlice,
        /// Base of the triangle drawn under the label, if any
        triangle: Option<TreeXRange>,
    },
    Stranded,
}

impl WithId for PositionedNode {
    fn id(&self) -> &Id {
        &self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionedTree {
    pub id: Id,
    pub sentence: String,
    pub nodes: IdMap<PositionedNode>,
    pub position: CoordsInPlot,
    pub width: f64,
}

impl PositionedTree {
    pub fn node(&self, id: &Id) -> Option<&PositionedNode> {
        self.nodes.get(id)
    }
}

impl WithId for PositionedTree {
    fn id(&self) -> &Id {
        &self.id
    }
}

//! # Unpositioned nodes
//!
//! The durable, user-edited form of a node. Its position on screen is not
//! stored: only a manual `offset` on top of whatever layout computes.
//!
//! A node is one of:
//! - **Branching**: has at least one child, referenced by id
//! - **Terminal**: anchored to a slice of the sentence
//! - **Stranded**: lost its children or its slice, but remembers enough of
//!   its former content to be laid out where it used to be

use crate::coords::TreeCoordsOffset;
use serde::{Deserialize, Serialize};
use syntree_common::{Id, IdMap, IdSet, StringSlice, WithId};

/// Vertical alignment of a branching node relative to its children
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum YAlignMode {
    /// One level above the highest child
    #[default]
    Top,
    /// One level above the lowest child
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpositionedNode {
    pub id: Id,
    pub label: String,
    #[serde(default)]
    pub offset: TreeCoordsOffset,
    #[serde(default)]
    pub y_align_mode: YAlignMode,
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Branching {
        children: IdSet,
    },
    #[serde(rename_all = "camelCase")]
    Terminal {
        slice: StringSlice,
        triangle: bool,
    },
    Stranded(StrandedKind),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StrandedKind {
    /// Never had children or a slice
    Plain,
    #[serde(rename_all = "camelCase")]
    FormerlyTerminal {
        former_slice: StringSlice,
        formerly_triangle: bool,
    },
    /// Snapshot of the whole subtree the node used to dominate
    #[serde(rename_all = "camelCase")]
    FormerlyBranching {
        former_descendants: IdMap<UnpositionedNode>,
    },
}

impl UnpositionedNode {
    pub fn branching(id: Id, label: impl Into<String>, children: IdSet) -> Self {
        Self::with_kind_at_origin(id, label, NodeKind::Branching { children })
    }

    pub fn terminal(id: Id, label: impl Into<String>, slice: StringSlice, triangle: bool) -> Self {
        Self::with_kind_at_origin(id, label, NodeKind::Terminal { slice, triangle })
    }

    pub fn stranded(id: Id, label: impl Into<String>) -> Self {
        Self::with_kind_at_origin(id, label, NodeKind::Stranded(StrandedKind::Plain))
    }

    fn with_kind_at_origin(id: Id, label: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id,
            label: label.into(),
            offset: TreeCoordsOffset::ZERO,
            y_align_mode: YAlignMode::default(),
            kind,
        }
    }

    pub fn with_offset(mut self, offset: TreeCoordsOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_y_align_mode(mut self, y_align_mode: YAlignMode) -> Self {
        self.y_align_mode = y_align_mode;
        self
    }

    pub fn children(&self) -> Option<&IdSet> {
        match &self.kind {
            NodeKind::Branching { children } => Some(children),
            _ => None,
        }
    }

    pub fn slice(&self) -> Option<StringSlice> {
        match &self.kind {
            NodeKind::Terminal { slice, .. } => Some(*slice),
            _ => None,
        }
    }

    pub fn is_branching(&self) -> bool {
        matches!(self.kind, NodeKind::Branching { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { .. })
    }

    pub fn is_stranded(&self) -> bool {
        matches!(self.kind, NodeKind::Stranded(_))
    }

    /// Same label, offset and alignment, different content
    pub(crate) fn rekinded(&self, kind: NodeKind) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            offset: self.offset,
            y_align_mode: self.y_align_mode,
            kind,
        }
    }

    /// Terminal node cut off from its slice
    pub(crate) fn stranded_from_terminal(&self) -> Self {
        match &self.kind {
            NodeKind::Terminal { slice, triangle } => {
                self.rekinded(NodeKind::Stranded(StrandedKind::FormerlyTerminal {
                    former_slice: *slice,
                    formerly_triangle: *triangle,
                }))
            }
            _ => self.clone(),
        }
    }
}

impl WithId for UnpositionedNode {
    fn id(&self) -> &Id {
        &self.id
    }
}

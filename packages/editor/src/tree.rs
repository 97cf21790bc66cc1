//! # Trees and plots
//!
//! A tree is a sentence plus an arena of nodes keyed by id. Parent/child
//! links are ids in a branching node's `children`, never direct references.
//! A plot is a canvas of independent trees.
//!
//! Trees built through the mutation engine uphold these invariants; trees
//! that arrive from elsewhere (decoders, importers) can be checked with
//! [`UnpositionedTree::validate`]:
//! - every child id names a node of the same tree
//! - branching nodes have at least one child
//! - a node has at most one parent
//! - parent links are acyclic
//! - terminal slices run forwards and lie within the sentence

use crate::coords::PlotCoordsOffset;
use crate::errors::EditorError;
use crate::node::{NodeKind, StrandedKind, UnpositionedNode};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use syntree_common::{Id, IdMap, WithId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnpositionedTree {
    pub id: Id,
    pub sentence: String,
    pub nodes: IdMap<UnpositionedNode>,
    #[serde(default)]
    pub offset: PlotCoordsOffset,
}

impl UnpositionedTree {
    pub fn new(id: Id, sentence: impl Into<String>) -> Self {
        Self {
            id,
            sentence: sentence.into(),
            nodes: IdMap::new(),
            offset: PlotCoordsOffset::ZERO,
        }
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = UnpositionedNode>) -> Self {
        for node in nodes {
            self.nodes.insert(node);
        }
        self
    }

    pub fn with_offset(mut self, offset: PlotCoordsOffset) -> Self {
        self.offset = offset;
        self
    }

    pub fn node(&self, id: &Id) -> Option<&UnpositionedNode> {
        self.nodes.get(id)
    }

    /// Sentence length in chars, the unit of [`StringSlice`](syntree_common::StringSlice)
    pub fn sentence_len(&self) -> usize {
        self.sentence.chars().count()
    }

    /// Id of the branching node listing `id` among its children
    pub fn parent_of(&self, id: &Id) -> Option<&Id> {
        self.nodes
            .iter()
            .find(|(_, node)| node.children().is_some_and(|children| children.contains(id)))
            .map(|(parent_id, _)| parent_id)
    }

    /// Nodes nobody lists as a child
    pub fn top_level_ids(&self) -> Vec<Id> {
        let children: HashSet<&Id> = self
            .nodes
            .values()
            .filter_map(|node| node.children())
            .flatten()
            .collect();
        self.nodes
            .ids()
            .filter(|id| !children.contains(id))
            .cloned()
            .collect()
    }

    /// Every node reachable below `id`, excluding `id` itself, depth first.
    /// Child ids missing from the tree are skipped.
    pub fn descendant_ids(&self, id: &Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut seen: HashSet<Id> = HashSet::from([id.clone()]);
        let mut queue: Vec<Id> = self
            .node(id)
            .and_then(|node| node.children())
            .map(|children| children.iter().cloned().collect())
            .unwrap_or_default();

        while let Some(current) = queue.pop() {
            if !seen.insert(current.clone()) {
                continue;
            }
            let Some(node) = self.node(&current) else {
                continue;
            };
            if let Some(children) = node.children() {
                queue.extend(children.iter().cloned());
            }
            result.push(current);
        }

        result
    }

    /// Snapshot of the subtree below `id`, sharing the node values
    pub fn descendants(&self, id: &Id) -> IdMap<UnpositionedNode> {
        self.descendant_ids(id)
            .iter()
            .filter_map(|descendant| self.nodes.get_arc(descendant).cloned())
            .collect()
    }

    /// One root and no stranded nodes: the tree spans a finished analysis
    pub fn is_complete(&self) -> bool {
        self.top_level_ids().len() == 1 && !self.nodes.values().any(|node| node.is_stranded())
    }

    /// Check the invariants listed in the module docs
    pub fn validate(&self) -> Result<(), EditorError> {
        let invalid = |reason: String| EditorError::InvalidTree {
            tree_id: self.id.clone(),
            reason,
        };

        if let Some(id) = self.nodes.mismatched_keys().first() {
            return Err(invalid(format!("node stored under foreign key {}", id)));
        }

        let mut parents: HashMap<&Id, &Id> = HashMap::new();
        for (id, node) in self.nodes.iter() {
            match &node.kind {
                NodeKind::Branching { children } => {
                    if children.is_empty() {
                        return Err(invalid(format!("branching node {} has no children", id)));
                    }
                    for child in children {
                        if !self.nodes.contains(child) {
                            return Err(invalid(format!("node {} has unknown child {}", id, child)));
                        }
                        if let Some(previous) = parents.insert(child, id) {
                            return Err(invalid(format!(
                                "node {} has two parents, {} and {}",
                                child, previous, id
                            )));
                        }
                    }
                }
                NodeKind::Terminal { slice, .. } => {
                    if slice.start > slice.end_exclusive {
                        return Err(invalid(format!("terminal {} slice {} is reversed", id, slice)));
                    }
                    if !slice.fits_in(&self.sentence) {
                        return Err(invalid(format!(
                            "terminal {} slice {} exceeds the sentence",
                            id, slice
                        )));
                    }
                }
                NodeKind::Stranded(StrandedKind::FormerlyTerminal { former_slice, .. }) => {
                    if former_slice.start > former_slice.end_exclusive {
                        return Err(invalid(format!(
                            "stranded {} former slice {} is reversed",
                            id, former_slice
                        )));
                    }
                }
                NodeKind::Stranded(_) => {}
            }
        }

        // With at most one parent each, a cycle shows up as a walk up the
        // parent chain that comes back to where it started.
        for start in self.nodes.ids() {
            let mut current = start;
            let mut steps = 0;
            while let Some(parent) = parents.get(current) {
                if *parent == start || steps > self.nodes.len() {
                    return Err(invalid(format!("node {} is its own ancestor", start)));
                }
                current = *parent;
                steps += 1;
            }
        }

        Ok(())
    }
}

impl WithId for UnpositionedTree {
    fn id(&self) -> &Id {
        &self.id
    }
}

/// Points at one node of one tree in a plot
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeIndicatorInPlot {
    pub tree_id: Id,
    pub node_id: Id,
}

impl NodeIndicatorInPlot {
    pub fn new(tree_id: Id, node_id: Id) -> Self {
        Self { tree_id, node_id }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UnpositionedPlot {
    pub trees: IdMap<UnpositionedTree>,
}

impl UnpositionedPlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tree(&self, id: &Id) -> Result<&UnpositionedTree, EditorError> {
        self.trees
            .get(id)
            .ok_or_else(|| EditorError::TreeNotFound(id.clone()))
    }

    pub fn tree_arc(&self, id: &Id) -> Result<&Arc<UnpositionedTree>, EditorError> {
        self.trees
            .get_arc(id)
            .ok_or_else(|| EditorError::TreeNotFound(id.clone()))
    }

    pub fn node(&self, indicator: &NodeIndicatorInPlot) -> Result<&UnpositionedNode, EditorError> {
        self.tree(&indicator.tree_id)?
            .node(&indicator.node_id)
            .ok_or_else(|| EditorError::NodeNotFound {
                tree_id: indicator.tree_id.clone(),
                node_id: indicator.node_id.clone(),
            })
    }

    pub fn insert_tree(&self, tree: UnpositionedTree) -> Self {
        Self {
            trees: self.trees.with(tree),
        }
    }

    pub fn remove_tree(&self, id: &Id) -> Self {
        Self {
            trees: self.trees.without([id]),
        }
    }

    /// Replace the tree `id` with `f` applied to it; absent ids are ignored
    pub fn transform_tree(
        &self,
        id: &Id,
        f: impl FnOnce(&UnpositionedTree) -> UnpositionedTree,
    ) -> Self {
        match self.trees.get(id) {
            Some(tree) => self.insert_tree(f(tree)),
            None => self.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), EditorError> {
        if let Some(id) = self.trees.mismatched_keys().first() {
            return Err(EditorError::InvalidTree {
                tree_id: id.clone(),
                reason: "tree stored under foreign key".to_string(),
            });
        }
        self.trees.values().try_for_each(UnpositionedTree::validate)
    }
}

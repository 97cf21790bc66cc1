//! # Structural Mutations
//!
//! Pure edits on [`UnpositionedTree`]. Every operation borrows the tree and
//! returns a new one; the input is never touched.
//!
//! ## Structural sharing
//!
//! Nodes live behind `Arc` in the tree's [`IdMap`]. An edit only allocates
//! the nodes it changes, every other node of the result is the same
//! allocation as in the input. Callers (and tests) can rely on this to
//! detect what an edit touched.
//!
//! ## Mutation Semantics
//!
//! ### Lookups
//! - Ids that are not in the tree are skipped, never an error: a selection in
//!   the UI may still name nodes that an earlier edit removed
//!
//! ### Emptied branching nodes
//! - A branching node whose last child goes away (deleted, adopted by another
//!   node or disowned) turns into a stranded node that keeps a snapshot of
//!   its former subtree, so layout can still place it where it used to be
//!
//! ### Single parent
//! - Giving a node a new parent removes it from its old one
//! - An edit that would make a node its own ancestor is a no-op

use crate::coords::TreeCoordsOffset;
use crate::node::{NodeKind, StrandedKind, UnpositionedNode};
use crate::tree::UnpositionedTree;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use syntree_common::{Id, IdMap, IdSet, StringSlice};
use tracing::debug;

/// A node to be created by [`UnpositionedTree::insert_node`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInsertion {
    pub label: String,
    /// Parent to append the new node to
    #[serde(default)]
    pub target_parent_id: Option<Id>,
    pub content: InsertedContent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsertedContent {
    #[serde(rename_all = "camelCase")]
    Terminal {
        target_slice: StringSlice,
        triangle: bool,
    },
    #[serde(rename_all = "camelCase")]
    Branching { target_child_ids: IdSet },
}

impl NodeInsertion {
    pub fn terminal(label: impl Into<String>, target_slice: StringSlice, triangle: bool) -> Self {
        Self {
            label: label.into(),
            target_parent_id: None,
            content: InsertedContent::Terminal {
                target_slice,
                triangle,
            },
        }
    }

    pub fn branching(label: impl Into<String>, target_child_ids: IdSet) -> Self {
        Self {
            label: label.into(),
            target_parent_id: None,
            content: InsertedContent::Branching { target_child_ids },
        }
    }

    pub fn under(mut self, parent_id: Id) -> Self {
        self.target_parent_id = Some(parent_id);
        self
    }
}

impl UnpositionedTree {
    /// Add a new node with zero offset. A branching node takes its target
    /// children away from whatever parent they had; with a target parent the
    /// new node is appended to that parent's children.
    pub fn insert_node(&self, insertion: &NodeInsertion, new_id: Id) -> Self {
        debug!(tree_id = %self.id, node_id = %new_id, label = %insertion.label, "Inserting node");

        let (nodes, node) = match &insertion.content {
            InsertedContent::Terminal {
                target_slice,
                triangle,
            } => (
                self.nodes.clone(),
                UnpositionedNode::terminal(new_id.clone(), &insertion.label, *target_slice, *triangle),
            ),
            InsertedContent::Branching { target_child_ids } => {
                let children = self.existing(target_child_ids);
                let node = if children.is_empty() {
                    UnpositionedNode::stranded(new_id.clone(), &insertion.label)
                } else {
                    UnpositionedNode::branching(new_id.clone(), &insertion.label, children.clone())
                };
                let nodes = self.nodes.map_shared(|existing| self.without_children(existing, &children));
                (nodes, node)
            }
        };

        let mut inserted = self.with_node_map(nodes);
        inserted.nodes.insert(node);

        match &insertion.target_parent_id {
            Some(parent_id) => inserted.adopt_nodes(parent_id, [&new_id]),
            None => inserted,
        }
    }

    /// Apply `f` to the node `id` if present. `f` must keep the node's id.
    pub fn transform_node(&self, id: &Id, f: impl FnOnce(&UnpositionedNode) -> UnpositionedNode) -> Self {
        let Some(node) = self.nodes.get(id) else {
            debug!(tree_id = %self.id, node_id = %id, "Skipping transform of missing node");
            return self.clone();
        };
        let mut nodes = self.nodes.clone();
        nodes.insert(f(node));
        self.with_node_map(nodes)
    }

    /// Apply `f` to every present node among `ids`; absent ids are ignored
    pub fn transform_nodes<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a Id>,
        mut f: impl FnMut(&UnpositionedNode) -> UnpositionedNode,
    ) -> Self {
        let targets: HashSet<&Id> = ids.into_iter().collect();
        let nodes = self.nodes.map_shared(|node| {
            if targets.contains(&node.id) {
                Arc::new(f(node))
            } else {
                Arc::clone(node)
            }
        });
        self.with_node_map(nodes)
    }

    /// Remove the given nodes. Their children stay in the tree, unchanged,
    /// as top-level nodes; parents left without children become stranded.
    pub fn delete_nodes<'a>(&self, ids: impl IntoIterator<Item = &'a Id>) -> Self {
        let deleted = self.existing(ids);
        if deleted.is_empty() {
            return self.clone();
        }
        debug!(tree_id = %self.id, count = deleted.len(), "Deleting nodes");

        let nodes: IdMap<UnpositionedNode> = self
            .nodes
            .arcs()
            .filter(|(id, _)| !deleted.contains(*id))
            .map(|(_, node)| self.without_children(node, &deleted))
            .collect();
        self.with_node_map(nodes)
    }

    /// Make `adopted_ids` children of `adopting_id`, taking them from their
    /// previous parents. A terminal or stranded adopter becomes a branching
    /// node, losing its former content and offset.
    pub fn adopt_nodes<'a>(&self, adopting_id: &Id, adopted_ids: impl IntoIterator<Item = &'a Id>) -> Self {
        let requested: Vec<&Id> = adopted_ids.into_iter().collect();
        if requested.contains(&adopting_id) {
            debug!(tree_id = %self.id, node_id = %adopting_id, "Ignoring self-adoption");
            return self.clone();
        }

        let Some(adopting) = self.nodes.get(adopting_id) else {
            return self.clone();
        };
        let adopted = self.existing(requested);
        if adopted.is_empty() {
            return self.clone();
        }
        if self.ancestor_ids(adopting_id).iter().any(|ancestor| adopted.contains(ancestor)) {
            debug!(tree_id = %self.id, node_id = %adopting_id, "Ignoring adoption of an ancestor");
            return self.clone();
        }
        debug!(tree_id = %self.id, node_id = %adopting_id, count = adopted.len(), "Adopting nodes");

        let adopting = Arc::new(match &adopting.kind {
            NodeKind::Branching { children } => {
                let mut children = children.clone();
                children.extend(adopted.iter().cloned());
                adopting.rekinded(NodeKind::Branching { children })
            }
            NodeKind::Terminal { .. } | NodeKind::Stranded(_) => UnpositionedNode {
                offset: TreeCoordsOffset::ZERO,
                ..adopting.rekinded(NodeKind::Branching {
                    children: adopted.clone(),
                })
            },
        });

        let nodes = self.nodes.map_shared(|node| {
            if &node.id == adopting_id {
                Arc::clone(&adopting)
            } else {
                self.without_children(node, &adopted)
            }
        });
        self.with_node_map(nodes)
    }

    /// Remove `disowned_ids` from the children of `disowning_id`. If no
    /// child is left the node becomes stranded, remembering its whole former
    /// subtree.
    pub fn disown_nodes<'a>(&self, disowning_id: &Id, disowned_ids: impl IntoIterator<Item = &'a Id>) -> Self {
        let Some(disowning) = self.nodes.get_arc(disowning_id) else {
            return self.clone();
        };
        let Some(children) = disowning.children() else {
            return self.clone();
        };
        let disowned: IdSet = disowned_ids
            .into_iter()
            .filter(|id| children.contains(*id))
            .cloned()
            .collect();
        if disowned.is_empty() {
            return self.clone();
        }
        debug!(tree_id = %self.id, node_id = %disowning_id, count = disowned.len(), "Disowning nodes");

        let replacement = self.without_children(disowning, &disowned);
        let nodes = self.nodes.map_shared(|node| {
            if &node.id == disowning_id {
                Arc::clone(&replacement)
            } else {
                Arc::clone(node)
            }
        });
        self.with_node_map(nodes)
    }

    /// `node` minus the children in `removed`; the same allocation if it
    /// loses none
    fn without_children(&self, node: &Arc<UnpositionedNode>, removed: &IdSet) -> Arc<UnpositionedNode> {
        let Some(children) = node.children() else {
            return Arc::clone(node);
        };
        if !children.iter().any(|child| removed.contains(child)) {
            return Arc::clone(node);
        }

        let remaining: IdSet = children
            .iter()
            .filter(|child| !removed.contains(*child))
            .cloned()
            .collect();
        let kind = if remaining.is_empty() {
            NodeKind::Stranded(StrandedKind::FormerlyBranching {
                former_descendants: self.descendants(&node.id),
            })
        } else {
            NodeKind::Branching { children: remaining }
        };
        Arc::new(node.rekinded(kind))
    }

    /// Ancestors of `id`, nearest first
    pub fn ancestor_ids(&self, id: &Id) -> Vec<Id> {
        let mut result = Vec::new();
        let mut current = id;
        while let Some(parent) = self.parent_of(current) {
            if parent == id || result.contains(parent) {
                break;
            }
            result.push(parent.clone());
            current = parent;
        }
        result
    }

    fn existing<'a>(&self, ids: impl IntoIterator<Item = &'a Id>) -> IdSet {
        ids.into_iter()
            .filter(|id| self.nodes.contains(id))
            .cloned()
            .collect()
    }

    pub(crate) fn with_node_map(&self, nodes: IdMap<UnpositionedNode>) -> Self {
        Self {
            id: self.id.clone(),
            sentence: self.sentence.clone(),
            nodes,
            offset: self.offset,
        }
    }
}

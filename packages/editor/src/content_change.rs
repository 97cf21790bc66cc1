//! # Plot changes
//!
//! The concrete action type recorded in a plot's undo history. A change
//! stores the tree before and after an edit, so reversing it is a swap and
//! applying it never needs to re-run the edit.

use crate::config::EditorConfig;
use crate::errors::EditorError;
use crate::tree::{NodeIndicatorInPlot, UnpositionedPlot, UnpositionedTree};
use crate::undo_stack::History;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use syntree_common::Id;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ContentChange {
    /// Tree `tree_id` goes from `old` to `new`; `None` means absent, so this
    /// also covers adding and removing trees
    #[serde(rename_all = "camelCase")]
    TreeChanged {
        tree_id: Id,
        old: Option<Arc<UnpositionedTree>>,
        new: Option<Arc<UnpositionedTree>>,
    },

    /// Several changes undone and redone as one step, in order
    Batch(Vec<ContentChange>),
}

impl ContentChange {
    /// Change produced by running `f` on tree `tree_id` of `plot`
    pub fn edit_tree(
        plot: &UnpositionedPlot,
        tree_id: &Id,
        f: impl FnOnce(&UnpositionedTree) -> UnpositionedTree,
    ) -> Result<Self, EditorError> {
        let old = plot.tree_arc(tree_id)?;
        Ok(ContentChange::TreeChanged {
            tree_id: tree_id.clone(),
            old: Some(Arc::clone(old)),
            new: Some(Arc::new(f(old))),
        })
    }

    pub fn add_tree(tree: UnpositionedTree) -> Self {
        ContentChange::TreeChanged {
            tree_id: tree.id.clone(),
            old: None,
            new: Some(Arc::new(tree)),
        }
    }

    pub fn remove_tree(plot: &UnpositionedPlot, tree_id: &Id) -> Result<Self, EditorError> {
        let old = plot.tree_arc(tree_id)?;
        Ok(ContentChange::TreeChanged {
            tree_id: tree_id.clone(),
            old: Some(Arc::clone(old)),
            new: None,
        })
    }

    /// Delete nodes picked anywhere in the plot, one tree change per tree.
    /// Indicators naming missing trees are skipped.
    pub fn delete_nodes(plot: &UnpositionedPlot, nodes: &[NodeIndicatorInPlot]) -> Self {
        let mut by_tree: HashMap<&Id, Vec<&Id>> = HashMap::new();
        for indicator in nodes {
            by_tree.entry(&indicator.tree_id).or_default().push(&indicator.node_id);
        }

        let changes = plot
            .trees
            .ids()
            .filter_map(|tree_id| {
                let node_ids = by_tree.get(tree_id)?;
                ContentChange::edit_tree(plot, tree_id, |tree| {
                    tree.delete_nodes(node_ids.iter().copied())
                })
                .ok()
            })
            .collect();
        ContentChange::Batch(changes)
    }

    /// The change that undoes this one
    pub fn reverse(&self) -> Self {
        match self {
            ContentChange::TreeChanged { tree_id, old, new } => ContentChange::TreeChanged {
                tree_id: tree_id.clone(),
                old: new.clone(),
                new: old.clone(),
            },
            ContentChange::Batch(changes) => {
                ContentChange::Batch(changes.iter().rev().map(ContentChange::reverse).collect())
            }
        }
    }

    pub fn apply(&self, plot: &UnpositionedPlot) -> UnpositionedPlot {
        match self {
            ContentChange::TreeChanged { tree_id, new, .. } => {
                let trees = match new {
                    Some(tree) => {
                        let mut trees = plot.trees.clone();
                        trees.insert_arc(Arc::clone(tree));
                        trees
                    }
                    None => plot.trees.without([tree_id]),
                };
                UnpositionedPlot { trees }
            }
            ContentChange::Batch(changes) => changes
                .iter()
                .fold(plot.clone(), |plot, change| change.apply(&plot)),
        }
    }

    /// True if this change records no difference
    pub fn is_noop(&self) -> bool {
        match self {
            ContentChange::TreeChanged { old, new, .. } => old == new,
            ContentChange::Batch(changes) => changes.iter().all(ContentChange::is_noop),
        }
    }
}

impl UnpositionedPlot {
    pub fn apply_change(&self, change: &ContentChange) -> Self {
        change.apply(self)
    }
}

/// Undo history of a plot
pub type PlotHistory = History<UnpositionedPlot, ContentChange>;

impl History<UnpositionedPlot, ContentChange> {
    pub fn for_plot(plot: UnpositionedPlot, max_levels: usize) -> Self {
        Self::with_max_levels(
            plot,
            |plot, change| change.apply(plot),
            ContentChange::reverse,
            max_levels,
        )
    }

    /// History keeping at most `config.max_undo_levels` changes
    pub fn from_config(plot: UnpositionedPlot, config: &EditorConfig) -> Self {
        Self::for_plot(plot, config.max_undo_levels)
    }

    /// Record `change` unless it changes nothing; returns whether it was
    /// recorded
    pub fn record(&mut self, change: ContentChange) -> bool {
        if change.is_noop() {
            debug!("Skipping no-op change");
            return false;
        }
        self.apply_action(change);
        true
    }

    /// Run `f` on tree `tree_id` as one undoable step
    pub fn edit_tree(
        &mut self,
        tree_id: &Id,
        f: impl FnOnce(&UnpositionedTree) -> UnpositionedTree,
    ) -> Result<bool, EditorError> {
        let change = ContentChange::edit_tree(self.current(), tree_id, f)?;
        Ok(self.record(change))
    }

    pub fn add_tree(&mut self, tree: UnpositionedTree) -> bool {
        self.record(ContentChange::add_tree(tree))
    }

    pub fn remove_tree(&mut self, tree_id: &Id) -> Result<bool, EditorError> {
        let change = ContentChange::remove_tree(self.current(), tree_id)?;
        Ok(self.record(change))
    }

    pub fn delete_nodes(&mut self, nodes: &[NodeIndicatorInPlot]) -> bool {
        let change = ContentChange::delete_nodes(self.current(), nodes);
        self.record(change)
    }
}

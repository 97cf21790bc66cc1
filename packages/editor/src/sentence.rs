//! # Sentence edits
//!
//! Keeps terminal slices anchored to the same words while the sentence is
//! typed into. The edit is described by the selection before the change and
//! the length difference `shift_by = len(new) - len(old)`.
//!
//! ## Cursor edits (empty selection at `p`)
//!
//! | where `p` is            | `shift_by > 0` (typing) | `shift_by < 0` (deleting) |
//! |-------------------------|-------------------------|---------------------------|
//! | after the slice         | untouched               | untouched                 |
//! | before the slice        | both bounds shift       | both bounds shift         |
//! | at the slice start      | both bounds shift       | end shifts                |
//! | inside or at the end    | end shifts              | end shifts                |
//!
//! ## Replacements (non-empty selection)
//!
//! Slices before the selection are untouched and slices after it shift.
//! A slice that intersects the replaced text cannot be mapped onto the new
//! text, so its node becomes a stranded former terminal. The same happens to
//! a slice that a deletion shrinks to nothing.

use crate::node::NodeKind;
use crate::tree::UnpositionedTree;
use std::sync::Arc;
use syntree_common::StringSlice;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
enum SliceAdjustment {
    Unchanged,
    Moved(StringSlice),
    Detached,
}

impl UnpositionedTree {
    /// Replace the sentence with `new_sentence`, reconciling terminal slices
    /// with an edit made at `old_selection`
    pub fn handle_local_sentence_change(&self, new_sentence: &str, old_selection: StringSlice) -> Self {
        let new_len = new_sentence.chars().count();
        let shift_by = new_len as isize - self.sentence_len() as isize;
        debug!(tree_id = %self.id, shift_by, selection = %old_selection, "Reconciling sentence change");

        let nodes = self.nodes.map_shared(|node| match &node.kind {
            NodeKind::Terminal { slice, triangle } => {
                match adjust_slice(*slice, old_selection, shift_by, new_len) {
                    SliceAdjustment::Unchanged => Arc::clone(node),
                    SliceAdjustment::Moved(slice) => Arc::new(node.rekinded(NodeKind::Terminal {
                        slice,
                        triangle: *triangle,
                    })),
                    SliceAdjustment::Detached => {
                        debug!(node_id = %node.id, "Terminal lost its slice");
                        Arc::new(node.stranded_from_terminal())
                    }
                }
            }
            _ => Arc::clone(node),
        });

        Self {
            id: self.id.clone(),
            sentence: new_sentence.to_string(),
            nodes,
            offset: self.offset,
        }
    }
}

fn adjust_slice(slice: StringSlice, selection: StringSlice, shift_by: isize, new_len: usize) -> SliceAdjustment {
    let (start, end) = if selection.is_zero_length() {
        let cursor = selection.start;
        if shift_by == 0 || slice.end_exclusive < cursor {
            return SliceAdjustment::Unchanged;
        }
        if cursor < slice.start || (cursor == slice.start && shift_by > 0) {
            (shift(slice.start, shift_by), shift(slice.end_exclusive, shift_by))
        } else {
            (slice.start as isize, shift(slice.end_exclusive, shift_by))
        }
    } else {
        if slice.end_exclusive <= selection.start {
            return SliceAdjustment::Unchanged;
        }
        if slice.start < selection.end_exclusive {
            return SliceAdjustment::Detached;
        }
        if shift_by == 0 {
            return SliceAdjustment::Unchanged;
        }
        (shift(slice.start, shift_by), shift(slice.end_exclusive, shift_by))
    };

    // Only a slice that had text and lost all of it is detached
    let emptied = end == start && !slice.is_zero_length();
    if start < 0 || end < start || emptied || end as usize > new_len {
        return SliceAdjustment::Detached;
    }
    SliceAdjustment::Moved(StringSlice::new(start as usize, end as usize))
}

fn shift(position: usize, shift_by: isize) -> isize {
    position as isize + shift_by
}

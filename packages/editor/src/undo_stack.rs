//! # Undo/Redo History
//!
//! A reversible action log over any state type.
//!
//! ## Design
//!
//! - The history knows nothing about its state `S` or actions `A`: the
//!   caller supplies `apply(state, action) -> state` and
//!   `reverse(action) -> action`
//! - Applying an action pushes it on the undo stack and clears the redo stack
//! - Undo applies the reverse of the most recent action and moves it to the
//!   redo stack
//! - Redo reapplies the most recently undone action
//! - The oldest actions are dropped beyond `max_levels` (0 = unlimited)
//!
//! ## Example
//!
//! ```rust
//! use syntree_editor::History;
//!
//! let mut history = History::new(0i64, |state: &i64, delta: &i64| state + delta, |delta: &i64| -delta);
//! history.apply_action(5);
//! history.apply_action(3);
//! assert_eq!(*history.current(), 8);
//!
//! history.undo();
//! assert_eq!(*history.current(), 5);
//!
//! history.redo();
//! assert_eq!(*history.current(), 8);
//! ```

use std::fmt;
use tracing::trace;

/// Undo/redo history of a state `S` changed by reversible actions `A`
pub struct History<S, A> {
    current: S,

    /// Applied actions (most recent last)
    undo_stack: Vec<A>,

    /// Undone actions (most recent last)
    redo_stack: Vec<A>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    apply: fn(&S, &A) -> S,
    reverse: fn(&A) -> A,
}

impl<S, A> History<S, A> {
    /// Create a history with unlimited undo levels
    pub fn new(initial: S, apply: fn(&S, &A) -> S, reverse: fn(&A) -> A) -> Self {
        Self::with_max_levels(initial, apply, reverse, 0)
    }

    pub fn with_max_levels(initial: S, apply: fn(&S, &A) -> S, reverse: fn(&A) -> A, max_levels: usize) -> Self {
        Self {
            current: initial,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            apply,
            reverse,
        }
    }

    pub fn current(&self) -> &S {
        &self.current
    }

    /// Apply `action` to the current state and record it for undo
    pub fn apply_action(&mut self, action: A) {
        self.current = (self.apply)(&self.current, &action);
        self.undo_stack.push(action);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New action invalidates the future
        self.redo_stack.clear();
        trace!(undo_levels = self.undo_stack.len(), "Applied action");
    }

    /// Undo the most recent action; false if there was none
    pub fn undo(&mut self) -> bool {
        let Some(action) = self.undo_stack.pop() else {
            return false;
        };
        self.current = (self.apply)(&self.current, &(self.reverse)(&action));
        self.redo_stack.push(action);
        trace!(undo_levels = self.undo_stack.len(), redo_levels = self.redo_stack.len(), "Undid action");
        true
    }

    /// Redo the most recently undone action; false if there was none
    pub fn redo(&mut self) -> bool {
        let Some(action) = self.redo_stack.pop() else {
            return false;
        };
        self.current = (self.apply)(&self.current, &action);
        self.undo_stack.push(action);
        trace!(undo_levels = self.undo_stack.len(), redo_levels = self.redo_stack.len(), "Redid action");
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Forget all undo/redo history, keeping the current state
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn into_current(self) -> S {
        self.current
    }
}

impl<S: Clone, A: Clone> Clone for History<S, A> {
    fn clone(&self) -> Self {
        Self {
            current: self.current.clone(),
            undo_stack: self.undo_stack.clone(),
            redo_stack: self.redo_stack.clone(),
            max_levels: self.max_levels,
            apply: self.apply,
            reverse: self.reverse,
        }
    }
}

/// Histories are equal when their states and stacks are; the functions are
/// not compared
impl<S: PartialEq, A: PartialEq> PartialEq for History<S, A> {
    fn eq(&self, other: &Self) -> bool {
        self.current == other.current
            && self.undo_stack == other.undo_stack
            && self.redo_stack == other.redo_stack
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for History<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("History")
            .field("current", &self.current)
            .field("undo_stack", &self.undo_stack)
            .field("redo_stack", &self.redo_stack)
            .field("max_levels", &self.max_levels)
            .finish()
    }
}

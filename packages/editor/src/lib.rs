//! # Syntree Editor
//!
//! Content model of a constituent tree editor: sentences, the nodes drawn
//! over them, structural edits and layout.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: UnpositionedPlot → Tree → Node       │
//! │  - ids, slices and manual offsets only      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ edits: pure tree → tree functions           │
//! │  - insert / delete / adopt / disown         │
//! │  - sentence edits re-anchor terminals       │
//! │  - ContentChange + History for undo/redo    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ layout: UnpositionedTree → PositionedTree   │
//! │  - needs a text width function              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Unpositioned model is source of truth**: positioned trees are derived
//!    views, recomputed on demand
//! 2. **Edits never mutate**: every edit returns a new value sharing all
//!    untouched nodes with the old one
//! 3. **Nodes are never silently lost**: a node that loses its content is
//!    stranded and remembers what it had
//!
//! ## Usage
//!
//! ```rust
//! use syntree_common::{Id, StringSlice};
//! use syntree_editor::{position_tree, NodeInsertion, UnpositionedTree};
//!
//! let tree = UnpositionedTree::new(Id::from("t"), "Noun verbs.")
//!     .insert_node(&NodeInsertion::terminal("N", StringSlice::new(0, 4), false), Id::from("n"))
//!     .insert_node(&NodeInsertion::terminal("V", StringSlice::new(5, 10), false), Id::from("v"));
//!
//! let positioned = position_tree(|text: &str| text.chars().count() as f64 * 8.0, &tree).unwrap();
//! assert_eq!(positioned.node(&Id::from("n")).unwrap().position.tree_y, -2.0);
//! ```

mod config;
mod content_change;
mod coords;
mod errors;
mod mutations;
mod node;
mod positioned;
mod positioning;
mod sentence;
mod tree;
mod undo_stack;

pub use config::{EditorConfig, LayoutConfig, DEFAULT_CONFIG_NAME};
pub use content_change::{ContentChange, PlotHistory};
pub use coords::{CoordsInPlot, CoordsInTree, PlotCoordsOffset, TreeCoordsOffset, TreeXRange};
pub use errors::{EditorError, EditorResult, LayoutError};
pub use mutations::{InsertedContent, NodeInsertion};
pub use node::{NodeKind, StrandedKind, UnpositionedNode, YAlignMode};
pub use positioned::{PositionedNode, PositionedNodeKind, PositionedTree};
pub use positioning::{position_tree, Layout};
pub use tree::{NodeIndicatorInPlot, UnpositionedPlot, UnpositionedTree};
pub use undo_stack::History;

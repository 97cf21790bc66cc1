//! # Position Assignment
//!
//! Turns an [`UnpositionedTree`] into a [`PositionedTree`] given a function
//! that measures rendered text.
//!
//! ## Algorithm
//!
//! Nodes are placed children first, by repeated passes over a worklist:
//!
//! 1. A terminal sits under the middle of its slice's text, at a fixed
//!    height (higher for triangles). A triangle also spans its slice's text.
//! 2. A stranded node is placed from what it remembers: a former terminal
//!    as if it still had its slice, a former branching node over its
//!    remembered subtree, a plain one at its offset alone. Remembered
//!    subtrees are laid out up front, innermost first, from a worklist.
//! 3. A branching node is placed once all its children are: centred over
//!    them, one level above its highest child.
//!
//! Every node's manual offset is added to the position it would naturally
//! get. A pass that places nothing means some node waits on a missing child
//! or on itself; that is reported instead of looping.

use crate::config::LayoutConfig;
use crate::coords::{CoordsInPlot, CoordsInTree, TreeXRange};
use crate::errors::LayoutError;
use crate::node::{NodeKind, StrandedKind, UnpositionedNode, YAlignMode};
use crate::positioned::{PositionedNode, PositionedNodeKind, PositionedTree};
use crate::tree::{UnpositionedPlot, UnpositionedTree};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use syntree_common::{IdMap, StringSlice};
use tracing::{debug, instrument, trace, warn};

/// Natural positions of former branching nodes, keyed by node allocation
type SnapshotAnchors = HashMap<*const UnpositionedNode, CoordsInTree>;

/// Lay out `tree` with the default constants
pub fn position_tree(
    str_width: impl Fn(&str) -> f64,
    tree: &UnpositionedTree,
) -> Result<PositionedTree, LayoutError> {
    Layout::default().position_tree(str_width, tree)
}

/// Layout engine configured with the fixed distances it uses
#[derive(Debug, Clone, Copy, Default)]
pub struct Layout {
    config: LayoutConfig,
}

impl Layout {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    #[instrument(skip_all, fields(tree_id = %tree.id, nodes = tree.nodes.len()))]
    pub fn position_tree(
        &self,
        str_width: impl Fn(&str) -> f64,
        tree: &UnpositionedTree,
    ) -> Result<PositionedTree, LayoutError> {
        let nodes = self.position_nodes(&str_width, &tree.sentence, &tree.nodes)?;
        debug!(positioned = nodes.len(), "Tree layout complete");

        Ok(PositionedTree {
            id: tree.id.clone(),
            sentence: tree.sentence.clone(),
            nodes,
            position: CoordsInPlot::from(tree.offset),
            width: str_width(&tree.sentence),
        })
    }

    /// Lay out every tree of the plot
    pub fn position_plot(
        &self,
        str_width: impl Fn(&str) -> f64,
        plot: &UnpositionedPlot,
    ) -> Result<IdMap<PositionedTree>, LayoutError> {
        plot.trees
            .values()
            .map(|tree| self.position_tree(&str_width, tree))
            .collect()
    }

    fn position_nodes(
        &self,
        str_width: &dyn Fn(&str) -> f64,
        sentence: &str,
        nodes: &IdMap<UnpositionedNode>,
    ) -> Result<IdMap<PositionedNode>, LayoutError> {
        let anchors = self.snapshot_anchors(str_width, sentence, nodes)?;
        self.place_all(str_width, sentence, nodes, &anchors)
    }

    /// Natural position of every former branching node reachable from
    /// `nodes`, through snapshots nested in snapshots. Innermost snapshots
    /// are placed first so each outer one finds its anchors ready.
    fn snapshot_anchors(
        &self,
        str_width: &dyn Fn(&str) -> f64,
        sentence: &str,
        nodes: &IdMap<UnpositionedNode>,
    ) -> Result<SnapshotAnchors, LayoutError> {
        let mut snapshots: Vec<(&Arc<UnpositionedNode>, &IdMap<UnpositionedNode>)> = Vec::new();
        let mut queue: Vec<&Arc<UnpositionedNode>> = nodes.arcs().map(|(_, node)| node).collect();
        let mut seen: HashSet<*const UnpositionedNode> = HashSet::new();

        while let Some(node) = queue.pop() {
            if let NodeKind::Stranded(StrandedKind::FormerlyBranching { former_descendants }) = &node.kind {
                if seen.insert(Arc::as_ptr(node)) {
                    snapshots.push((node, former_descendants));
                    queue.extend(former_descendants.arcs().map(|(_, descendant)| descendant));
                }
            }
        }

        let mut anchors = SnapshotAnchors::new();
        for (node, former_descendants) in snapshots.into_iter().rev() {
            let former = self.place_all(str_width, sentence, former_descendants, &anchors)?;
            let former_subtree = UnpositionedTree {
                nodes: former_descendants.clone(),
                ..UnpositionedTree::new(node.id.clone(), sentence)
            };
            let former_children = former_subtree
                .top_level_ids()
                .into_iter()
                .filter_map(|id| former.get(&id).map(|child| child.position))
                .collect::<Vec<_>>();
            let natural = self
                .above(former_children.into_iter(), node.y_align_mode)
                .unwrap_or(CoordsInTree::new(0.0, 0.0));
            anchors.insert(Arc::as_ptr(node), natural);
        }

        Ok(anchors)
    }

    fn place_all(
        &self,
        str_width: &dyn Fn(&str) -> f64,
        sentence: &str,
        nodes: &IdMap<UnpositionedNode>,
        anchors: &SnapshotAnchors,
    ) -> Result<IdMap<PositionedNode>, LayoutError> {
        let mut positioned: IdMap<PositionedNode> = IdMap::new();
        let mut pending: Vec<&Arc<UnpositionedNode>> = nodes.arcs().map(|(_, node)| node).collect();

        while !pending.is_empty() {
            let before = pending.len();

            pending.retain(|node| match self.try_position(str_width, sentence, node, &positioned, anchors) {
                Some(done) => {
                    positioned.insert(done);
                    false
                }
                None => true,
            });
            trace!(placed = before - pending.len(), remaining = pending.len(), "Layout pass");

            if pending.len() == before {
                let stuck: Vec<_> = pending.iter().map(|node| node.id.clone()).collect();
                warn!(nodes = ?stuck, "Layout stalled");
                return Err(LayoutError::UnresolvedNodes(stuck));
            }
        }

        Ok(positioned)
    }

    /// `None` while some child of a branching node is still unplaced
    fn try_position(
        &self,
        str_width: &dyn Fn(&str) -> f64,
        sentence: &str,
        node: &Arc<UnpositionedNode>,
        positioned: &IdMap<PositionedNode>,
        anchors: &SnapshotAnchors,
    ) -> Option<PositionedNode> {
        let (natural, kind) = match &node.kind {
            NodeKind::Terminal { slice, triangle } => {
                let (natural, x_range) = self.terminal_position(str_width, sentence, *slice, *triangle);
                let triangle = triangle.then_some(x_range);
                (natural, PositionedNodeKind::Terminal { slice: *slice, triangle })
            }
            NodeKind::Branching { children } => {
                let placed: Vec<&PositionedNode> =
                    children.iter().map(|child| positioned.get(child)).collect::<Option<_>>()?;
                let natural = self.above(placed.iter().map(|child| child.position), node.y_align_mode);
                (
                    natural.unwrap_or(CoordsInTree::new(0.0, 0.0)),
                    PositionedNodeKind::Branching {
                        children: children.clone(),
                    },
                )
            }
            NodeKind::Stranded(StrandedKind::Plain) => {
                (CoordsInTree::new(0.0, 0.0), PositionedNodeKind::Stranded)
            }
            NodeKind::Stranded(StrandedKind::FormerlyTerminal {
                former_slice,
                formerly_triangle,
            }) => {
                let (natural, _) =
                    self.terminal_position(str_width, sentence, *former_slice, *formerly_triangle);
                (natural, PositionedNodeKind::Stranded)
            }
            NodeKind::Stranded(StrandedKind::FormerlyBranching { .. }) => {
                let natural = anchors
                    .get(&Arc::as_ptr(node))
                    .copied()
                    .unwrap_or(CoordsInTree::new(0.0, 0.0));
                (natural, PositionedNodeKind::Stranded)
            }
        };

        Some(PositionedNode {
            id: node.id.clone(),
            label: node.label.clone(),
            position: natural.plus(node.offset),
            kind,
        })
    }

    /// Natural position of a terminal over `slice`, and the x extent of the
    /// slice's text
    fn terminal_position(
        &self,
        str_width: &dyn Fn(&str) -> f64,
        sentence: &str,
        slice: StringSlice,
        triangle: bool,
    ) -> (CoordsInTree, TreeXRange) {
        let start_x = str_width(StringSlice::new(0, slice.start).content_in(sentence));
        let end_x = start_x + str_width(slice.content_in(sentence));
        let y = if triangle {
            self.config.triangle_terminal_y()
        } else {
            self.config.terminal_y
        };

        (
            CoordsInTree::new((start_x + end_x) / 2.0, y),
            TreeXRange {
                start_tree_x: start_x,
                end_tree_x: end_x,
            },
        )
    }

    /// Centred over `children`, one level above the highest (or, when
    /// bottom-aligned, the lowest) of them
    fn above(
        &self,
        children: impl Iterator<Item = CoordsInTree>,
        y_align_mode: YAlignMode,
    ) -> Option<CoordsInTree> {
        let mut count = 0usize;
        let mut sum_x = 0.0;
        let mut anchor_y: Option<f64> = None;

        for child in children {
            count += 1;
            sum_x += child.tree_x;
            anchor_y = Some(match (anchor_y, y_align_mode) {
                (None, _) => child.tree_y,
                (Some(y), YAlignMode::Top) => y.min(child.tree_y),
                (Some(y), YAlignMode::Bottom) => y.max(child.tree_y),
            });
        }

        anchor_y.map(|y| CoordsInTree::new(sum_x / count as f64, y - self.config.level_height))
    }
}

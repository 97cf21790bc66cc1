//! Layout of whole trees and plots

use syntree_common::{Id, IdSet, StringSlice};
use syntree_editor::{
    position_tree, CoordsInPlot, CoordsInTree, Layout, LayoutConfig, NodeKind, PlotCoordsOffset,
    PositionedNodeKind, StrandedKind, TreeCoordsOffset, UnpositionedNode, UnpositionedPlot,
    UnpositionedTree,
};

/// Proportional font stand-in: capitals are wide, spaces narrow
fn mock_width(text: &str) -> f64 {
    text.chars()
        .map(|c| match c {
            ' ' => 1.0,
            c if c.is_uppercase() => 12.0,
            _ => 8.0,
        })
        .sum()
}

fn id(name: &str) -> Id {
    Id::from(name)
}

fn ids(names: &[&str]) -> IdSet {
    names.iter().map(|name| Id::from(*name)).collect()
}

fn terminals() -> UnpositionedTree {
    UnpositionedTree::new(id("t"), "Noun verbs.").with_nodes([
        UnpositionedNode::terminal(id("a"), "N", StringSlice::new(0, 4), false),
        UnpositionedNode::terminal(id("b"), "V", StringSlice::new(5, 10), false)
            .with_offset(TreeCoordsOffset::new(5.0, 0.0)),
    ])
}

fn with_parent() -> UnpositionedTree {
    terminals().with_nodes([UnpositionedNode::branching(id("c"), "S", ids(&["a", "b"]))])
}

#[test]
fn test_terminals_sit_under_their_text() {
    let positioned = position_tree(mock_width, &terminals()).unwrap();

    assert_eq!(positioned.node(&id("a")).unwrap().position, CoordsInTree::new(18.0, -2.0));
    assert_eq!(positioned.node(&id("b")).unwrap().position, CoordsInTree::new(62.0, -2.0));
    assert_eq!(positioned.width, 85.0);
    assert_eq!(positioned.sentence, "Noun verbs.");
}

#[test]
fn test_branching_node_is_centred_one_level_up() {
    let positioned = position_tree(mock_width, &with_parent()).unwrap();

    let c = positioned.node(&id("c")).unwrap();
    assert_eq!(c.position, CoordsInTree::new(40.0, -42.0));
    assert_eq!(
        c.kind,
        PositionedNodeKind::Branching {
            children: ids(&["a", "b"]),
        }
    );
}

#[test]
fn test_non_triangle_terminal_has_no_range() {
    let positioned = position_tree(mock_width, &terminals()).unwrap();
    assert_eq!(
        positioned.node(&id("a")).unwrap().kind,
        PositionedNodeKind::Terminal {
            slice: StringSlice::new(0, 4),
            triangle: None,
        }
    );
}

#[test]
fn test_former_terminal_keeps_its_place() {
    let tree = terminals().transform_node(&id("a"), |node| UnpositionedNode {
        kind: NodeKind::Stranded(StrandedKind::FormerlyTerminal {
            former_slice: StringSlice::new(0, 4),
            formerly_triangle: false,
        }),
        ..node.clone()
    });

    let positioned = position_tree(mock_width, &tree).unwrap();
    let a = positioned.node(&id("a")).unwrap();
    assert_eq!(a.position, CoordsInTree::new(18.0, -2.0));
    assert_eq!(a.kind, PositionedNodeKind::Stranded);
}

#[test]
fn test_disowning_every_child_keeps_parent_in_place() {
    let tree = with_parent().disown_nodes(&id("c"), [&id("a"), &id("b")]);
    assert!(tree.node(&id("c")).unwrap().is_stranded());

    let positioned = position_tree(mock_width, &tree).unwrap();
    let c = positioned.node(&id("c")).unwrap();
    assert_eq!(c.position, CoordsInTree::new(40.0, -42.0));
    assert_eq!(c.kind, PositionedNodeKind::Stranded);
}

#[test]
fn test_sentence_edit_moves_terminals_with_their_words() {
    let tree = with_parent().handle_local_sentence_change("Nouns verbs.", StringSlice::cursor(4));
    let positioned = position_tree(mock_width, &tree).unwrap();

    // "Nouns" is 44 wide, "Nouns " 45
    assert_eq!(positioned.node(&id("a")).unwrap().position, CoordsInTree::new(22.0, -2.0));
    assert_eq!(positioned.node(&id("b")).unwrap().position, CoordsInTree::new(70.0, -2.0));
    assert_eq!(positioned.node(&id("c")).unwrap().position, CoordsInTree::new(46.0, -42.0));
}

#[test]
fn test_position_plot_places_trees_at_offsets() {
    let plot = UnpositionedPlot::new()
        .insert_tree(with_parent())
        .insert_tree(
            UnpositionedTree::new(id("u"), "Ok")
                .with_offset(PlotCoordsOffset::new(100.0, 50.0))
                .with_nodes([UnpositionedNode::terminal(id("x"), "X", StringSlice::new(0, 2), true)]),
        );

    let layout = Layout::new(LayoutConfig::default());
    let positioned = layout.position_plot(mock_width, &plot).unwrap();

    assert_eq!(positioned.len(), 2);
    let u = positioned.get(&id("u")).unwrap();
    assert_eq!(u.position, CoordsInPlot::from(PlotCoordsOffset::new(100.0, 50.0)));
    assert_eq!(u.node(&id("x")).unwrap().position, CoordsInTree::new(10.0, -22.0));
    assert_eq!(positioned.get(&id("t")).unwrap().position, CoordsInPlot::from(PlotCoordsOffset::ZERO));
}

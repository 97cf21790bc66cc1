//! Edit sequences through the plot history
//!
//! This tests:
//! - Undo/redo of tree edits, sentence edits and multi-tree deletes
//! - Undo of any edit sequence restoring the starting plot
//! - Tree invariants holding after every edit

use proptest::prelude::*;
use syntree_common::{Id, IdGenerator, IdSet, StringSlice};
use syntree_editor::{
    ContentChange, NodeIndicatorInPlot, NodeInsertion, PlotHistory, UnpositionedNode,
    UnpositionedPlot, UnpositionedTree,
};

fn id(name: &str) -> Id {
    Id::from(name)
}

fn ids(names: &[&str]) -> IdSet {
    names.iter().map(|name| Id::from(*name)).collect()
}

fn dog_tree() -> UnpositionedTree {
    UnpositionedTree::new(id("t"), "The dog jumped.").with_nodes([
        UnpositionedNode::branching(id("np"), "NP", ids(&["det", "n"])),
        UnpositionedNode::terminal(id("det"), "D", StringSlice::new(0, 3), false),
        UnpositionedNode::terminal(id("n"), "N", StringSlice::new(4, 7), false),
        UnpositionedNode::terminal(id("v"), "V", StringSlice::new(8, 14), false),
    ])
}

fn plot() -> UnpositionedPlot {
    UnpositionedPlot::new()
        .insert_tree(dog_tree())
        .insert_tree(UnpositionedTree::new(id("u"), "Hi").with_nodes([UnpositionedNode::terminal(
            id("h"),
            "I",
            StringSlice::new(0, 2),
            false,
        )]))
}

#[test]
fn test_sentence_edit_undo_redo() {
    let mut history = PlotHistory::for_plot(plot(), 0);

    let recorded = history
        .edit_tree(&id("t"), |tree| {
            tree.handle_local_sentence_change("The dogs jumped.", StringSlice::cursor(7))
        })
        .unwrap();
    assert!(recorded);

    let edited = history.current().tree(&id("t")).unwrap();
    assert_eq!(edited.sentence, "The dogs jumped.");
    assert_eq!(edited.node(&id("n")).unwrap().slice(), Some(StringSlice::new(4, 8)));
    assert_eq!(edited.node(&id("v")).unwrap().slice(), Some(StringSlice::new(9, 15)));

    assert!(history.undo());
    assert_eq!(history.current(), &plot());

    assert!(history.redo());
    assert_eq!(history.current().tree(&id("t")).unwrap().sentence, "The dogs jumped.");
}

#[test]
fn test_delete_across_trees_is_one_step() {
    let mut history = PlotHistory::for_plot(plot(), 0);

    assert!(history.delete_nodes(&[
        NodeIndicatorInPlot::new(id("t"), id("np")),
        NodeIndicatorInPlot::new(id("u"), id("h")),
        NodeIndicatorInPlot::new(id("gone"), id("x")),
    ]));
    assert_eq!(history.undo_levels(), 1);
    assert!(history.current().tree(&id("u")).unwrap().nodes.is_empty());
    assert!(!history.current().tree(&id("t")).unwrap().nodes.contains(&id("np")));

    history.undo();
    assert_eq!(history.current(), &plot());
}

#[test]
fn test_add_and_remove_tree() {
    let mut history = PlotHistory::for_plot(UnpositionedPlot::new(), 0);
    history.add_tree(dog_tree());
    assert!(history.remove_tree(&id("t")).unwrap());
    assert!(history.current().trees.is_empty());
    assert!(history.remove_tree(&id("t")).is_err());

    history.undo();
    assert_eq!(history.current().tree(&id("t")).unwrap(), &dog_tree());
    history.undo();
    assert!(history.current().trees.is_empty());
    assert!(!history.can_undo());
}

#[test]
fn test_new_edit_after_undo_drops_redo() {
    let mut history = PlotHistory::for_plot(plot(), 0);
    history
        .edit_tree(&id("t"), |tree| tree.delete_nodes([&id("v")]))
        .unwrap();
    history.undo();
    assert!(history.can_redo());

    history
        .edit_tree(&id("t"), |tree| tree.disown_nodes(&id("np"), [&id("det")]))
        .unwrap();
    assert!(!history.can_redo());
    assert!(history.current().tree(&id("t")).unwrap().nodes.contains(&id("v")));
}

#[test]
fn test_max_levels_drops_oldest_change() {
    let mut history = PlotHistory::for_plot(plot(), 1);
    history
        .edit_tree(&id("t"), |tree| tree.delete_nodes([&id("v")]))
        .unwrap();
    history
        .edit_tree(&id("t"), |tree| tree.delete_nodes([&id("det")]))
        .unwrap();

    assert_eq!(history.undo_levels(), 1);
    history.undo();
    assert!(!history.undo());
    let tree = history.current().tree(&id("t")).unwrap();
    assert!(tree.nodes.contains(&id("det")));
    assert!(!tree.nodes.contains(&id("v")));
}

#[test]
fn test_change_serializes() {
    let change = ContentChange::add_tree(dog_tree());
    let json = serde_json::to_string(&change).unwrap();
    let back: ContentChange = serde_json::from_str(&json).unwrap();
    assert_eq!(back, change);
}

#[derive(Debug, Clone)]
enum Edit {
    Delete(usize),
    Adopt(usize, usize),
    Disown(usize, usize),
    Wrap(usize, usize),
}

const NODE_NAMES: [&str; 4] = ["np", "det", "n", "v"];

fn edit_strategy() -> impl Strategy<Value = Edit> {
    let index = || 0usize..8;
    prop_oneof![
        index().prop_map(Edit::Delete),
        (index(), index()).prop_map(|(a, b)| Edit::Adopt(a, b)),
        (index(), index()).prop_map(|(a, b)| Edit::Disown(a, b)),
        (index(), index()).prop_map(|(a, b)| Edit::Wrap(a, b)),
    ]
}

/// Node ids to pick from: the fixed ones plus every id generated so far
fn pick(known: &[Id], index: usize) -> Id {
    known[index % known.len()].clone()
}

proptest! {
    #[test]
    fn edits_keep_trees_valid_and_undo_restores_plot(edits in prop::collection::vec(edit_strategy(), 0..20)) {
        let start = plot();
        let mut history = PlotHistory::for_plot(start.clone(), 0);
        let mut generator = IdGenerator::from_seed("gen");
        let mut known: Vec<Id> = NODE_NAMES.iter().map(|name| id(name)).collect();

        for edit in edits {
            let tree_id = id("t");
            match edit {
                Edit::Delete(a) => {
                    let target = pick(&known, a);
                    history.edit_tree(&tree_id, |tree| tree.delete_nodes([&target])).unwrap();
                }
                Edit::Adopt(a, b) => {
                    let (parent, child) = (pick(&known, a), pick(&known, b));
                    history.edit_tree(&tree_id, |tree| tree.adopt_nodes(&parent, [&child])).unwrap();
                }
                Edit::Disown(a, b) => {
                    let (parent, child) = (pick(&known, a), pick(&known, b));
                    history.edit_tree(&tree_id, |tree| tree.disown_nodes(&parent, [&child])).unwrap();
                }
                Edit::Wrap(a, b) => {
                    let children: IdSet = [pick(&known, a), pick(&known, b)].into_iter().collect();
                    let new_id = generator.new_id();
                    known.push(new_id.clone());
                    history
                        .edit_tree(&tree_id, |tree| {
                            tree.insert_node(&NodeInsertion::branching("X", children), new_id)
                        })
                        .unwrap();
                }
            }
            prop_assert!(history.current().validate().is_ok(), "{:?}", history.current().validate());
        }

        while history.undo() {}
        prop_assert_eq!(history.current(), &start);
    }
}

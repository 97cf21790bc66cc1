//! End-to-end: plot files on disk through validation and layout

use std::fs;
use syntree_common::{Id, IdGenerator, StringSlice};
use syntree_editor::{
    EditorConfig, EditorError, Layout, NodeInsertion, UnpositionedPlot, UnpositionedTree,
};

fn build_plot() -> UnpositionedPlot {
    let mut generator = IdGenerator::from_seed("doc");
    let tree_id = generator.new_id();
    let (n, v, s) = (generator.new_id(), generator.new_id(), generator.new_id());

    let tree = UnpositionedTree::new(tree_id, "Noun verbs.")
        .insert_node(&NodeInsertion::terminal("N", StringSlice::new(0, 4), false), n.clone())
        .insert_node(&NodeInsertion::terminal("V", StringSlice::new(5, 10), false), v.clone())
        .insert_node(
            &NodeInsertion::branching("S", [n, v].into_iter().collect()),
            s,
        );
    UnpositionedPlot::new().insert_tree(tree)
}

#[test]
fn test_plot_file_roundtrip_and_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.json");
    let plot = build_plot();
    fs::write(&path, serde_json::to_string_pretty(&plot).unwrap()).unwrap();

    let loaded: UnpositionedPlot = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(loaded, plot);
    assert!(loaded.validate().is_ok());

    let config = EditorConfig::load(dir.path()).unwrap();
    let char_width = config.char_width;
    let positioned = Layout::new(config.layout)
        .position_plot(|text: &str| text.chars().count() as f64 * char_width, &loaded)
        .unwrap();

    let tree = positioned.get(&Id::from("doc-1")).unwrap();
    assert_eq!(tree.width, 88.0);
    assert_eq!(tree.nodes.len(), 3);
    // "Noun" spans 0..32 and "verbs" 40..80
    assert_eq!(tree.node(&Id::from("doc-4")).unwrap().position.tree_x, 38.0);
    assert_eq!(tree.node(&Id::from("doc-4")).unwrap().position.tree_y, -42.0);
}

#[test]
fn test_dangling_child_fails_validation() {
    let json = r#"{
        "trees": {
            "t": {
                "id": "t",
                "sentence": "Hi",
                "nodes": {
                    "s": { "id": "s", "label": "S", "kind": { "branching": { "children": ["ghost"] } } }
                }
            }
        }
    }"#;

    let plot: UnpositionedPlot = serde_json::from_str(json).unwrap();
    match plot.validate() {
        Err(EditorError::InvalidTree { tree_id, reason }) => {
            assert_eq!(tree_id, Id::from("t"));
            assert!(reason.contains("ghost"), "{}", reason);
        }
        other => panic!("Expected invalid tree, got {:?}", other),
    }
}

#[test]
fn test_config_file_changes_layout() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(syntree_editor::DEFAULT_CONFIG_NAME),
        r#"{ "layout": { "levelHeight": 60 } }"#,
    )
    .unwrap();

    let config = EditorConfig::load(dir.path()).unwrap();
    let positioned = Layout::new(config.layout)
        .position_plot(|text: &str| text.chars().count() as f64, &build_plot())
        .unwrap();
    let tree = positioned.get(&Id::from("doc-1")).unwrap();
    assert_eq!(tree.node(&Id::from("doc-4")).unwrap().position.tree_y, -62.0);
}

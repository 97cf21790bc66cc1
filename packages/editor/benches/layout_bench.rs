use criterion::{black_box, criterion_group, criterion_main, Criterion};
use syntree_common::{Id, IdGenerator, StringSlice};
use syntree_editor::{position_tree, NodeInsertion, UnpositionedTree};

fn width(text: &str) -> f64 {
    text.chars().count() as f64 * 8.0
}

/// One terminal per word, then binary branching nodes pairing them up
/// until a single root is left
fn balanced_tree(words: usize) -> UnpositionedTree {
    let sentence = vec!["word"; words].join(" ");
    let mut generator = IdGenerator::from_seed("bench");
    let mut tree = UnpositionedTree::new(generator.new_id(), sentence);

    let mut level: Vec<Id> = Vec::new();
    for index in 0..words {
        let start = index * 5;
        let id = generator.new_id();
        tree = tree.insert_node(
            &NodeInsertion::terminal("W", StringSlice::new(start, start + 4), false),
            id.clone(),
        );
        level.push(id);
    }

    while level.len() > 1 {
        let mut next = Vec::new();
        for pair in level.chunks(2) {
            let id = generator.new_id();
            tree = tree.insert_node(&NodeInsertion::branching("X", pair.iter().cloned().collect()), id.clone());
            next.push(id);
        }
        level = next;
    }

    tree
}

fn layout_small_tree(c: &mut Criterion) {
    let tree = balanced_tree(8);

    c.bench_function("layout_small_tree", |b| {
        b.iter(|| position_tree(width, black_box(&tree)))
    });
}

fn layout_large_tree(c: &mut Criterion) {
    let tree = balanced_tree(256);

    c.bench_function("layout_large_tree", |b| {
        b.iter(|| position_tree(width, black_box(&tree)))
    });
}

fn delete_from_large_tree(c: &mut Criterion) {
    let tree = balanced_tree(256);
    let root = tree.top_level_ids();

    c.bench_function("delete_from_large_tree", |b| {
        b.iter(|| black_box(&tree).delete_nodes(root.iter()))
    });
}

criterion_group!(benches, layout_small_tree, layout_large_tree, delete_from_large_tree);
criterion_main!(benches);

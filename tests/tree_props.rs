use best_tree::{NodeId, Tree, TreeConfig, TreeError};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;

type Shape = Vec<(i32, Option<i32>, Option<i32>, Option<i32>)>;

fn value(tree: &Tree, id: Option<NodeId>) -> Option<i32> {
    id.map(|id| tree.get(id).expect("id from this tree").value())
}

/// (value, parent, left, right) of every node in level order.
fn shape(tree: &Tree) -> Shape {
    tree.level_order()
        .map(|id| {
            let node = tree.get(id).expect("id from this tree");
            (node.value(), value(tree, node.parent()), value(tree, node.left()), value(tree, node.right()))
        })
        .collect()
}

fn check_invariants(tree: &mut Tree) -> Result<(), TestCaseError> {
    let annotated = tree.update_nodes();
    let tree = annotated.tree();

    prop_assert_eq!(tree.level_order().count(), tree.len(), "every node is reachable once");
    prop_assert_eq!(tree.get(tree.root()).unwrap().parent(), None);

    let in_order: Vec<i32> = tree.in_order().map(|id| tree.get(id).unwrap().value()).collect();
    let expected: Vec<i32> = tree.all_values().iter().copied().collect();
    prop_assert_eq!(in_order, expected, "in-order walk is sorted and matches the value set");

    prop_assert_eq!(annotated.get(tree.root()).unwrap().position_id, 0);

    for id in tree.level_order() {
        let node = tree.get(id).unwrap();
        let annotation = annotated.get(id).unwrap();

        let mut child_heights = [0, 0];
        for (slot, (child, offset)) in [(node.left(), 1), (node.right(), 2)].into_iter().enumerate() {
            let Some(child) = child else { continue };
            let child_node = tree.get(child).unwrap();
            let child_annotation = annotated.get(child).unwrap();

            prop_assert_eq!(child_node.parent(), Some(id));
            prop_assert_eq!(child_annotation.position_id, annotation.position_id * 2 + offset);
            child_heights[slot] = child_annotation.height;
        }

        if let Some(left) = node.left() {
            prop_assert!(tree.get(left).unwrap().value() < node.value());
        }
        if let Some(right) = node.right() {
            prop_assert!(tree.get(right).unwrap().value() > node.value());
        }

        let [left_height, right_height] = child_heights;
        prop_assert_eq!(annotation.height, 1 + left_height.max(right_height));
        prop_assert_eq!(annotation.balance_factor, right_height as i32 - left_height as i32);
        prop_assert!((-1.0..=1.0).contains(&annotation.skew));
    }

    Ok(())
}

fn nth_node(tree: &Tree, index: usize) -> NodeId {
    let order: Vec<NodeId> = tree.level_order().collect();
    order[index % order.len()]
}

proptest! {
    #[test]
    fn construction_yields_unique_values(size in 1usize..=40, seed in any::<u64>()) {
        let mut tree = Tree::with_config(size, TreeConfig::default().with_seed(seed)).unwrap();

        prop_assert_eq!(tree.len(), size);
        prop_assert_eq!(tree.all_values().len(), size);
        prop_assert!(tree.all_values().iter().all(|v| (0..100).contains(v)));
        prop_assert!(!tree.is_dirty());
        check_invariants(&mut tree)?;
    }

    #[test]
    fn inserted_values_keep_bst_order(values in proptest::collection::hash_set(-1000i32..1000, 1..60)) {
        let mut values = values.into_iter();
        let root = values.next().unwrap();
        let mut tree = Tree::from_values(root, values).unwrap();

        check_invariants(&mut tree)?;
    }

    #[test]
    fn rotations_preserve_invariants(
        seed in any::<u64>(),
        steps in proptest::collection::vec((any::<usize>(), any::<bool>()), 0..40),
    ) {
        let mut tree = Tree::with_config(15, TreeConfig::default().with_seed(seed)).unwrap();
        let values = tree.all_values().clone();

        for (index, left) in steps {
            let pivot = nth_node(&tree, index);
            let result = if left { tree.rotate_left(pivot) } else { tree.rotate_right(pivot) };

            match result {
                Ok(lifted) => {
                    let lifted_node = tree.get(lifted).unwrap();
                    prop_assert_eq!(tree.get(pivot).unwrap().parent(), Some(lifted));
                    if lifted_node.parent().is_none() {
                        prop_assert_eq!(tree.root(), lifted);
                    }
                }
                Err(err) => {
                    prop_assert!(matches!(err, TreeError::RotationPrecondition { .. }), "unexpected {:?}", err);
                }
            }

            prop_assert_eq!(tree.all_values(), &values);
            check_invariants(&mut tree)?;
        }
    }

    #[test]
    fn rotation_round_trip(seed in any::<u64>(), index in any::<usize>(), left_first in any::<bool>()) {
        let mut tree = Tree::with_config(20, TreeConfig::default().with_seed(seed)).unwrap();
        let pivot = nth_node(&tree, index);
        let before = shape(&tree);

        let lifted = if left_first { tree.rotate_left(pivot) } else { tree.rotate_right(pivot) };
        let Ok(lifted) = lifted else {
            // the rotation was illegal and must not have touched anything
            prop_assert_eq!(shape(&tree), before);
            return Ok(());
        };

        let restored = if left_first { tree.rotate_right(lifted) } else { tree.rotate_left(lifted) };
        prop_assert_eq!(restored.unwrap(), pivot);
        prop_assert_eq!(shape(&tree), before);
    }

    #[test]
    fn root_rotation_replaces_root(seed in any::<u64>(), left in any::<bool>()) {
        let mut tree = Tree::with_config(10, TreeConfig::default().with_seed(seed)).unwrap();
        let old_root = tree.root();

        let result = if left { tree.rotate_left(old_root) } else { tree.rotate_right(old_root) };
        if let Ok(new_root) = result {
            prop_assert_eq!(tree.get(new_root).unwrap().parent(), None);
            prop_assert_eq!(tree.root(), new_root);
            prop_assert_eq!(tree.get(old_root).unwrap().parent(), Some(new_root));
        }
    }

    #[test]
    fn add_random_node_grows_by_one(seed in any::<u64>(), size in 1usize..50) {
        let mut tree = Tree::with_config(size, TreeConfig::default().with_seed(seed)).unwrap();

        let id = tree.add_random_node().unwrap();

        prop_assert_eq!(tree.all_values().len(), size + 1);
        prop_assert!(tree.contains(tree.get(id).unwrap().value()));
        check_invariants(&mut tree)?;
    }

    #[test]
    fn update_nodes_never_reshapes(seed in any::<u64>()) {
        let mut tree = Tree::with_config(25, TreeConfig::default().with_seed(seed)).unwrap();
        let before = shape(&tree);

        tree.update_nodes();
        tree.update_nodes();

        prop_assert_eq!(shape(&tree), before);
    }
}

//! Property tests: random operation sequences checked against `BTreeSet`.

use std::collections::BTreeSet;

use avltree::AvlTree;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Insert(u16),
    Replace(u16),
    Delete(u16),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    // Small key space so deletes and duplicates actually hit.
    prop_oneof![
        4 => (0u16..256).prop_map(Op::Insert),
        1 => (0u16..256).prop_map(Op::Replace),
        3 => (0u16..256).prop_map(Op::Delete),
    ]
}

/// Smallest possible AVL height bound: h < 1.4405 * log2(n + 2).
fn height_bound(len: usize) -> usize {
    (1.4405 * ((len + 2) as f64).log2()).floor() as usize
}

proptest! {
    #[test]
    fn prop_matches_btreeset(ops in prop::collection::vec(op_strategy(), 0..400)) {
        let mut tree = AvlTree::new();
        let mut model = BTreeSet::new();

        for op in ops {
            match op {
                Op::Insert(k) => {
                    let existed = tree.insert(k).unwrap().is_some();
                    prop_assert_eq!(existed, !model.insert(k));
                }
                Op::Replace(k) => {
                    let replaced = tree.replace(k).unwrap();
                    prop_assert_eq!(replaced.is_some(), !model.insert(k));
                }
                Op::Delete(k) => {
                    let removed = tree.delete(&k).unwrap();
                    prop_assert_eq!(removed, model.take(&k));
                }
            }
            prop_assert!(tree.validate().is_ok());
        }

        prop_assert_eq!(tree.len(), model.len());
        prop_assert!(tree.height() <= height_bound(tree.len()));

        let items = tree.to_vec().unwrap();
        let expected: Vec<u16> = model.into_iter().collect();
        prop_assert_eq!(items, expected);
    }

    #[test]
    fn prop_lookup_agrees_with_contents(keys in prop::collection::vec(any::<i32>(), 0..200), probe in any::<i32>()) {
        let tree = AvlTree::from_elements(keys.iter().copied()).unwrap();

        prop_assert_eq!(tree.contains(&probe).unwrap(), keys.contains(&probe));
        prop_assert_eq!(tree.first(), keys.iter().min());
        prop_assert_eq!(tree.last(), keys.iter().max());
    }
}

#[cfg(test)]
mod tests {
    use crate::node::NIL;
    use crate::{Color, Error, RBTree, TreeConfig};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;
    use rand_distr::{Distribution, Geometric};
    use std::collections::BTreeMap;

    fn tree_from(keys: &[i64]) -> RBTree<i64> {
        let mut tree = RBTree::new();
        for &key in keys {
            tree.insert(key).unwrap();
        }
        tree
    }

    fn height_bound(len: usize) -> usize {
        (2.0 * ((len + 1) as f64).log2()).floor() as usize
    }

    fn reference_keys(reference: &BTreeMap<i64, usize>) -> Vec<i64> {
        reference
            .iter()
            .flat_map(|(&key, &count)| std::iter::repeat(key).take(count))
            .collect()
    }

    #[test]
    fn test_tree_insertion_and_search() {
        let mut rng = rand::thread_rng();
        let sample_vec: Vec<i64> = (0..20).map(|_| rng.gen_range(-1000..1000)).collect();

        let mut rb_tree = RBTree::new();
        for &key in &sample_vec {
            rb_tree.insert(key).unwrap();
        }

        for &key in &sample_vec {
            let node = rb_tree.find(key);
            assert!(node.is_some(), "Did not find key: {}", key);
            assert_eq!(rb_tree.key(node.unwrap()), key);
        }
        assert!(rb_tree.find(5000).is_none());
        assert!(rb_tree.validate().is_ok());
    }

    #[test]
    fn test_tree_len() {
        let rb_tree = tree_from(&[3, 1, 4, 1, 5, 9, 2, 6]);
        assert_eq!(rb_tree.len(), 8);
        assert!(!rb_tree.is_empty());
    }

    #[test]
    fn test_ascending_inserts_rotate_left() {
        let tree = tree_from(&[10, 20, 30]);

        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), 20);
        assert_eq!(tree.color(root), Color::Black);

        let left = tree.left(root).unwrap();
        let right = tree.right(root).unwrap();
        assert_eq!(tree.key(left), 10);
        assert_eq!(tree.key(right), 30);
        assert_eq!(tree.color(left), Color::Red);
        assert_eq!(tree.color(right), Color::Red);
        assert_eq!(tree.parent(left), Some(root));
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_descending_inserts_rotate_right() {
        let tree = tree_from(&[30, 20, 10]);

        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), 20);
        assert_eq!(tree.key(tree.left(root).unwrap()), 10);
        assert_eq!(tree.key(tree.right(root).unwrap()), 30);
        assert!(tree.parent(root).is_none());
    }

    #[test]
    fn test_triangle_insert_double_rotation() {
        let tree = tree_from(&[30, 10, 20]);

        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), 20);
        assert_eq!(tree.key(tree.left(root).unwrap()), 10);
        assert_eq!(tree.key(tree.right(root).unwrap()), 30);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_tree_color_arrangement() {
        let mut tree = RBTree::new();
        for key in ['b', 'a', 'c', 'd'] {
            tree.insert(key).unwrap();
        }

        // Recoloring on 'd' pushes red up to the root, which is forced back to black.
        let root = tree.root().unwrap();
        assert_eq!(tree.key(root), 'b');
        assert_eq!(tree.color(root), Color::Black);
        assert_eq!(tree.color(tree.left(root).unwrap()), Color::Black);
        let c_node = tree.right(root).unwrap();
        assert_eq!(tree.color(c_node), Color::Black);
        let d_node = tree.right(c_node).unwrap();
        assert_eq!(tree.key(d_node), 'd');
        assert_eq!(tree.color(d_node), Color::Red);
    }

    #[test]
    fn test_erase_two_children_promotes_successor() {
        let mut tree = tree_from(&[1, 2, 3, 4, 5, 6, 7]);
        let four = tree.find(4).unwrap();
        let five = tree.find(5).unwrap();
        let parent = tree.parent(four);
        let four_color = tree.color(four);

        assert_eq!(tree.erase(four), 4);

        assert_eq!(tree.parent(five), parent);
        assert_eq!(tree.color(five), four_color);
        assert_eq!(tree.key(tree.left(five).unwrap()), 3);
        assert_eq!(tree.key(tree.right(five).unwrap()), 6);
        assert!(tree.find(4).is_none());
        assert_eq!(tree.to_vec(), vec![1, 2, 3, 5, 6, 7]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_sole_node() {
        let mut tree = tree_from(&[42]);
        let node = tree.find(42).unwrap();

        assert_eq!(tree.erase(node), 42);

        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert!(tree.root().is_none());
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert!(tree.find(42).is_none());
        assert_eq!(tree.nodes[NIL].parent, NIL);
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_empty_tree_queries() {
        let tree: RBTree<i64> = RBTree::new();
        assert!(tree.is_empty());
        assert!(tree.find(0).is_none());
        assert!(tree.min().is_none());
        assert!(tree.max().is_none());
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.black_height(), 0);
    }

    #[test]
    fn test_round_trip_sorted_keys() {
        let n: i64 = 500;
        let tree = tree_from(&(1..=n).collect::<Vec<i64>>());
        assert_eq!(tree.to_vec(), (1..=n).collect::<Vec<i64>>());
        assert!(tree.height() <= height_bound(n as usize));
    }

    #[test]
    fn test_height_bound_on_sequential_and_random_inserts() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut ascending = RBTree::new();
        let mut random = RBTree::new();

        for n in 1..=2000usize {
            ascending.insert(n as i64).unwrap();
            random.insert(rng.gen_range(0..1_000_000i64)).unwrap();
            if n % 250 == 0 {
                assert!(ascending.height() <= height_bound(n));
                assert!(random.height() <= height_bound(n));
            }
        }
        assert_eq!(ascending.black_height(), ascending.validate().unwrap());
        assert_eq!(random.black_height(), random.validate().unwrap());
    }

    #[test]
    fn test_duplicate_find_returns_first_node_on_descent() {
        let mut tree = RBTree::new();
        let first = tree.insert(5).unwrap();
        let second = tree.insert(5).unwrap();
        let third = tree.insert(5).unwrap();

        // The third insert rotates the second copy up to the root.
        assert_eq!(tree.root(), Some(second));
        assert_eq!(tree.find(5), Some(second));
        assert_eq!(tree.left(second), Some(first));
        assert_eq!(tree.right(second), Some(third));

        tree.erase(second);
        assert_eq!(tree.find(5), Some(third));
        assert_eq!(tree.to_vec(), vec![5, 5]);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_erase_min_drains_in_order() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let keys: Vec<i64> = (0..300).map(|_| rng.gen_range(-50..50)).collect();
        let mut tree = tree_from(&keys);

        let mut drained = vec![];
        while let Some(node) = tree.min() {
            drained.push(tree.erase(node));
            assert!(tree.validate().is_ok());
        }

        let mut sorted = keys;
        sorted.sort();
        assert_eq!(drained, sorted);
        assert!(tree.is_empty());
    }

    #[test]
    fn test_erase_max_drains_in_reverse() {
        let mut tree = tree_from(&(0..100).collect::<Vec<i64>>());
        for expected in (0..100).rev() {
            let node = tree.max().unwrap();
            assert_eq!(tree.erase(node), expected);
        }
        assert!(tree.max().is_none());
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_random_interleaving_matches_reference() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let mut tree = RBTree::new();
        let mut reference: BTreeMap<i64, usize> = BTreeMap::new();

        for _ in 0..4000 {
            let key = rng.gen_range(0..200i64);
            if rng.gen_bool(0.6) {
                let node = tree.insert(key).unwrap();
                assert_eq!(tree.key(node), key);
                *reference.entry(key).or_insert(0) += 1;
            } else if let Some(node) = tree.find(key) {
                assert_eq!(tree.erase(node), key);
                let count = reference.get_mut(&key).unwrap();
                *count -= 1;
                if *count == 0 {
                    reference.remove(&key);
                }
            } else {
                assert!(!reference.contains_key(&key));
            }

            tree.validate().unwrap();
            assert_eq!(tree.len(), reference.values().sum::<usize>());
            assert_eq!(
                tree.min().map(|node| tree.key(node)),
                reference.keys().next().copied()
            );
            assert_eq!(
                tree.max().map(|node| tree.key(node)),
                reference.keys().next_back().copied()
            );
        }

        assert_eq!(tree.to_vec(), reference_keys(&reference));
    }

    #[test]
    fn test_duplicate_heavy_keys() {
        let mut rng = ChaCha8Rng::seed_from_u64(99);
        let geometric = Geometric::new(0.3).unwrap();
        let mut tree = RBTree::new();
        let mut reference: BTreeMap<i64, usize> = BTreeMap::new();

        for _ in 0..1500 {
            let key = geometric.sample(&mut rng) as i64;
            tree.insert(key).unwrap();
            *reference.entry(key).or_insert(0) += 1;
        }
        tree.validate().unwrap();
        assert_eq!(tree.to_vec(), reference_keys(&reference));

        for _ in 0..1000 {
            let key = geometric.sample(&mut rng) as i64;
            if let Some(node) = tree.find(key) {
                tree.erase(node);
                let count = reference.get_mut(&key).unwrap();
                *count -= 1;
                if *count == 0 {
                    reference.remove(&key);
                }
            }
        }
        tree.validate().unwrap();
        assert_eq!(tree.to_vec(), reference_keys(&reference));
    }

    #[test]
    fn test_tree_order_with_random_chars() {
        let char_arr: [char; 20] = rand::random();
        let mut tree = RBTree::new();
        for ch in char_arr {
            tree.insert(ch).unwrap();
        }

        let mut char_arr = char_arr;
        char_arr.sort();
        assert_eq!(tree.to_vec(), char_arr.to_vec());
    }

    #[test]
    fn test_node_limit_refuses_then_reuses_slot() {
        let config = TreeConfig {
            initial_capacity: 3,
            max_nodes: Some(3),
        };
        let mut tree = RBTree::with_config(config).unwrap();
        assert!(tree.capacity() >= 3);
        for key in [1, 2, 3] {
            tree.insert(key).unwrap();
        }

        let err = tree.insert(4).unwrap_err();
        assert_eq!(
            err,
            Error::ResourceExhausted {
                requested: 4,
                limit: Some(3)
            }
        );
        assert!(err.is_recoverable());
        assert_eq!(tree.to_vec(), vec![1, 2, 3]);
        assert!(tree.validate().is_ok());

        let slots = tree.nodes.len();
        let two = tree.find(2).unwrap();
        tree.erase(two);
        tree.insert(4).unwrap();
        assert_eq!(tree.nodes.len(), slots);
        assert_eq!(tree.to_vec(), vec![1, 3, 4]);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = TreeConfig {
            initial_capacity: 8,
            max_nodes: Some(2),
        };
        let result: Result<RBTree<i64>, Error> = RBTree::with_config(config);
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_unreservable_initial_capacity_reports_exhaustion() {
        let config = TreeConfig {
            initial_capacity: usize::MAX,
            max_nodes: None,
        };
        let result: Result<RBTree<i64>, Error> = RBTree::with_config(config);
        assert_eq!(
            result.unwrap_err(),
            Error::ResourceExhausted {
                requested: usize::MAX,
                limit: None
            }
        );
    }

    #[test]
    fn test_held_handles_survive_random_erases() {
        let mut rng = ChaCha8Rng::seed_from_u64(0xfeed);
        let mut tree = RBTree::new();
        let mut held = vec![];
        let mut reference: BTreeMap<i64, usize> = BTreeMap::new();

        for _ in 0..3000 {
            if held.is_empty() || rng.gen_bool(0.55) {
                let key = rng.gen_range(0..150i64);
                held.push((tree.insert(key).unwrap(), key));
                *reference.entry(key).or_insert(0) += 1;
            } else {
                let (node, key) = held.swap_remove(rng.gen_range(0..held.len()));
                assert_eq!(tree.erase(node), key);
                let count = reference.get_mut(&key).unwrap();
                *count -= 1;
                if *count == 0 {
                    reference.remove(&key);
                }
            }

            tree.validate().unwrap();
            for &(node, key) in &held {
                assert_eq!(tree.key(node), key);
            }
        }

        assert_eq!(tree.len(), held.len());
        assert_eq!(tree.to_vec(), reference_keys(&reference));
    }

    #[test]
    fn test_validate_stops_on_link_cycle() {
        let mut tree = tree_from(&[2, 1, 3]);
        let root = tree.root().unwrap();
        let three = tree.find(3).unwrap();
        tree.nodes[three.0].right = root.0;

        assert!(matches!(
            tree.validate(),
            Err(Error::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_clear_empties_and_tree_stays_usable() {
        let mut tree = tree_from(&[8, 3, 10, 1, 6]);
        assert_eq!(tree.clear(), 5);
        assert!(tree.is_empty());
        assert_eq!(tree.validate(), Ok(0));

        tree.insert(2).unwrap();
        tree.insert(1).unwrap();
        assert_eq!(tree.to_vec(), vec![1, 2]);
        tree.destroy();
    }

    #[test]
    fn test_validate_detects_red_red_edge() {
        let mut tree = tree_from(&[2, 1, 3, 4]);
        let four = tree.find(4).unwrap();
        let three = tree.parent(four).unwrap();
        tree.update_color(three.0, Color::Red);

        let err = tree.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVARIANT_VIOLATION");
    }

    #[test]
    fn test_validate_detects_black_height_mismatch() {
        let mut tree = tree_from(&[2, 1, 3]);
        let one = tree.find(1).unwrap();
        tree.update_color(one.0, Color::Black);

        assert!(matches!(
            tree.validate(),
            Err(Error::InvariantViolation { .. })
        ));
    }
}

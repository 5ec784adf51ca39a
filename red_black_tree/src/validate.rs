use std::fmt::Debug;

use crate::error::{Error, Result};
use crate::node::NIL;
use crate::tree::RBTree;

impl<K> RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    /// Number of nodes on the longest root-to-leaf path. An empty tree has height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self.root, 1)];

        while let Some((node, depth)) = stack.pop() {
            if node == NIL {
                continue;
            }
            height = height.max(depth);
            stack.push((self.left_of(node), depth + 1));
            stack.push((self.right_of(node), depth + 1));
        }
        height
    }

    /// Black nodes on the leftmost root-to-sentinel path, sentinel excluded.
    pub fn black_height(&self) -> usize {
        let mut count = 0;
        let mut node = self.root;
        while node != NIL {
            if self.is_black(node) {
                count += 1;
            }
            node = self.left_of(node);
        }
        count
    }

    /// Checks every structural and coloring invariant and returns the black height.
    pub fn validate(&self) -> Result<usize> {
        let nil = &self.nodes[NIL];
        if self.is_red(NIL) {
            return Err(Error::invariant("sentinel is red"));
        }
        if (nil.left, nil.right, nil.parent) != (NIL, NIL, NIL) {
            return Err(Error::invariant("sentinel links do not point at itself"));
        }

        if self.root == NIL {
            return match self.len() {
                0 => Ok(0),
                len => Err(Error::invariant(format!("empty root but len is {}", len))),
            };
        }
        if self.is_red(self.root) {
            return Err(Error::invariant("root is red"));
        }
        if self.parent_of(self.root) != NIL {
            return Err(Error::invariant("root has a parent"));
        }

        self.validate_nodes()
    }

    // Post-order walk on an explicit stack so a malformed tree cannot overflow
    // the call stack. Rotations can move an equal key to the left of its twin,
    // so order bounds are inclusive.
    fn validate_nodes(&self) -> Result<usize> {
        let mut count = 0;
        let mut stack = vec![Visit::Enter(self.root, None, None)];
        let mut heights: Vec<usize> = vec![];

        while let Some(visit) = stack.pop() {
            match visit {
                Visit::Enter(node, _, _) if node == NIL => heights.push(0),
                Visit::Enter(node, lower, upper) => {
                    if !self.is_live(node) {
                        return Err(Error::invariant(format!("slot {} is linked but free", node)));
                    }
                    count += 1;
                    if count > self.len() {
                        return Err(Error::invariant(format!(
                            "more than {} nodes reachable, links form a cycle",
                            self.len()
                        )));
                    }

                    let key = self.nodes[node].key;
                    if lower.map_or(false, |lower| key < lower)
                        || upper.map_or(false, |upper| key > upper)
                    {
                        return Err(Error::invariant(format!("key {:?} is out of order", key)));
                    }

                    let left = self.left_of(node);
                    let right = self.right_of(node);
                    for child in [left, right] {
                        if child != NIL && self.parent_of(child) != node {
                            return Err(Error::invariant(format!(
                                "child of {:?} does not point back to it",
                                key
                            )));
                        }
                    }
                    if self.is_red(node) && (self.is_red(left) || self.is_red(right)) {
                        return Err(Error::invariant(format!("red node {:?} has a red child", key)));
                    }

                    stack.push(Visit::Exit(node));
                    stack.push(Visit::Enter(right, Some(key), upper));
                    stack.push(Visit::Enter(left, lower, Some(key)));
                }
                Visit::Exit(node) => {
                    let (right_height, left_height) = match (heights.pop(), heights.pop()) {
                        (Some(right), Some(left)) => (right, left),
                        _ => return Err(Error::invariant("unbalanced validation walk")),
                    };
                    if left_height != right_height {
                        return Err(Error::invariant(format!(
                            "black heights {} and {} differ below {:?}",
                            left_height, right_height, self.nodes[node].key
                        )));
                    }
                    heights.push(left_height + usize::from(self.is_black(node)));
                }
            }
        }

        if count != self.len() {
            return Err(Error::invariant(format!(
                "reachable nodes {} differ from len {}",
                count,
                self.len()
            )));
        }
        heights
            .pop()
            .ok_or_else(|| Error::invariant("unbalanced validation walk"))
    }
}

enum Visit<K> {
    Enter(usize, Option<K>, Option<K>),
    Exit(usize),
}

use std::fmt::Debug;

use tracing::trace;

use crate::error::Result;
use crate::node::{Color, NodeRef, NIL};
use crate::tree::RBTree;

impl<K> RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    /// Inserts `key` as a new node, even if an equal key is already present.
    ///
    /// Equal keys are kept to the right of each other, so [`to_vec`](Self::to_vec)
    /// reports every copy. Fails only when the arena refuses another node.
    pub fn insert(&mut self, key: K) -> Result<NodeRef> {
        let mut leaf_node = NIL;
        let mut iter = self.root;

        while iter != NIL {
            leaf_node = iter;
            if key < self.nodes[iter].key {
                iter = self.left_of(iter);
            }
            // We keep keys with equal value to the right
            else {
                iter = self.right_of(iter);
            }
        }

        let new_node = self.alloc_node(key, leaf_node)?;

        if leaf_node == NIL {
            self.root = new_node;
        } else if key < self.nodes[leaf_node].key {
            self.nodes[leaf_node].left = new_node;
        } else {
            self.nodes[leaf_node].right = new_node;
        }

        trace!(?key, slot = new_node, "inserted node");

        self.insert_fixup(new_node);
        Ok(NodeRef(new_node))
    }

    /// Repairs the red-red edge a fresh RED leaf may have created.
    fn insert_fixup(&mut self, new_node: usize) {
        let mut curr_node = new_node;

        // The root's parent is the sentinel, which is black, so this stops at the root.
        while self.is_red(self.parent_of(curr_node)) {
            let curr_node_p = self.parent_of(curr_node);
            // A red parent is never the root, so the grandparent is a real node.
            let curr_node_gp = self.parent_of(curr_node_p);

            if curr_node_p == self.left_of(curr_node_gp) {
                let uncle = self.right_of(curr_node_gp);
                if self.is_red(uncle) {
                    self.update_color(curr_node_p, Color::Black);
                    self.update_color(uncle, Color::Black);
                    self.update_color(curr_node_gp, Color::Red);
                    curr_node = curr_node_gp;
                } else {
                    if curr_node == self.right_of(curr_node_p) {
                        curr_node = curr_node_p;
                        self.left_rotate(curr_node);
                    }
                    let curr_node_p = self.parent_of(curr_node);
                    let curr_node_gp = self.parent_of(curr_node_p);
                    self.update_color(curr_node_p, Color::Black);
                    self.update_color(curr_node_gp, Color::Red);
                    self.right_rotate(curr_node_gp);
                }
            } else {
                let uncle = self.left_of(curr_node_gp);
                if self.is_red(uncle) {
                    self.update_color(curr_node_p, Color::Black);
                    self.update_color(uncle, Color::Black);
                    self.update_color(curr_node_gp, Color::Red);
                    curr_node = curr_node_gp;
                } else {
                    if curr_node == self.left_of(curr_node_p) {
                        curr_node = curr_node_p;
                        self.right_rotate(curr_node);
                    }
                    let curr_node_p = self.parent_of(curr_node);
                    let curr_node_gp = self.parent_of(curr_node_p);
                    self.update_color(curr_node_p, Color::Black);
                    self.update_color(curr_node_gp, Color::Red);
                    self.left_rotate(curr_node_gp);
                }
            }
        }

        self.update_color(self.root, Color::Black);
    }
}

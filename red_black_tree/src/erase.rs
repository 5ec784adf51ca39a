use std::fmt::Debug;

use tracing::trace;

use crate::node::{Color, NodeRef, NIL};
use crate::tree::RBTree;

impl<K> RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    /// Removes `node` from the tree and returns its key.
    ///
    /// `node` must be a live handle obtained from this tree. A node with two
    /// children is replaced by its in-order successor, which takes over its
    /// position and color; handles to the successor stay valid.
    pub fn erase(&mut self, node: NodeRef) -> K {
        let target = node.0;
        debug_assert!(self.is_live(target), "erase called with a stale handle");

        let key = self.nodes[target].key;
        let mut removed_color = self.get_color(target);
        let replacement;

        if self.left_of(target) == NIL {
            replacement = self.right_of(target);
            self.transplant(target, replacement);
        } else if self.right_of(target) == NIL {
            replacement = self.left_of(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.subtree_min(self.right_of(target));
            removed_color = self.get_color(successor);
            replacement = self.right_of(successor);

            if self.parent_of(successor) == target {
                // May point the sentinel's parent at the successor; the fixup needs it.
                self.nodes[replacement].parent = successor;
            } else {
                self.transplant(successor, replacement);
                let target_right = self.right_of(target);
                self.nodes[successor].right = target_right;
                self.nodes[target_right].parent = successor;
            }

            self.transplant(target, successor);
            let target_left = self.left_of(target);
            self.nodes[successor].left = target_left;
            self.nodes[target_left].parent = successor;
            self.update_color(successor, self.get_color(target));
        }

        self.free_node(target);

        if removed_color == Color::Black {
            self.erase_fixup(replacement);
        }
        self.nodes[NIL].parent = NIL;

        trace!(?key, slot = target, "erased node");
        key
    }

    /// Puts the subtree rooted at `replacement` where `removed` hangs.
    /// The sentinel is re-parented too when it is the replacement.
    fn transplant(&mut self, removed: usize, replacement: usize) {
        let parent = self.parent_of(removed);
        if parent == NIL {
            self.root = replacement;
        } else if removed == self.left_of(parent) {
            self.nodes[parent].left = replacement;
        } else {
            self.nodes[parent].right = replacement;
        }
        self.nodes[replacement].parent = parent;
    }

    /// Pushes the extra black carried by `curr_node` up the tree until it can be absorbed.
    fn erase_fixup(&mut self, mut curr_node: usize) {
        while curr_node != self.root && self.is_black(curr_node) {
            let curr_node_p = self.parent_of(curr_node);

            if self.is_left_child(curr_node) {
                let mut sibling = self.right_of(curr_node_p);
                if self.is_red(sibling) {
                    self.update_color(sibling, Color::Black);
                    self.update_color(curr_node_p, Color::Red);
                    self.left_rotate(curr_node_p);
                    sibling = self.right_of(curr_node_p);
                }

                if self.is_black(self.left_of(sibling)) && self.is_black(self.right_of(sibling)) {
                    self.update_color(sibling, Color::Red);
                    curr_node = curr_node_p;
                } else {
                    if self.is_black(self.right_of(sibling)) {
                        self.update_color(self.left_of(sibling), Color::Black);
                        self.update_color(sibling, Color::Red);
                        self.right_rotate(sibling);
                        sibling = self.right_of(curr_node_p);
                    }
                    self.update_color(sibling, self.get_color(curr_node_p));
                    self.update_color(curr_node_p, Color::Black);
                    self.update_color(self.right_of(sibling), Color::Black);
                    self.left_rotate(curr_node_p);
                    curr_node = self.root;
                }
            } else {
                let mut sibling = self.left_of(curr_node_p);
                if self.is_red(sibling) {
                    self.update_color(sibling, Color::Black);
                    self.update_color(curr_node_p, Color::Red);
                    self.right_rotate(curr_node_p);
                    sibling = self.left_of(curr_node_p);
                }

                if self.is_black(self.right_of(sibling)) && self.is_black(self.left_of(sibling)) {
                    self.update_color(sibling, Color::Red);
                    curr_node = curr_node_p;
                } else {
                    if self.is_black(self.left_of(sibling)) {
                        self.update_color(self.right_of(sibling), Color::Black);
                        self.update_color(sibling, Color::Red);
                        self.left_rotate(sibling);
                        sibling = self.left_of(curr_node_p);
                    }
                    self.update_color(sibling, self.get_color(curr_node_p));
                    self.update_color(curr_node_p, Color::Black);
                    self.update_color(self.left_of(sibling), Color::Black);
                    self.right_rotate(curr_node_p);
                    curr_node = self.root;
                }
            }
        }

        self.update_color(curr_node, Color::Black);
    }
}

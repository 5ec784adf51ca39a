
use std::fmt::Debug;

use crate::node::NIL;
use crate::tree::RBTree;

impl<K> RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    /// Lifts the right child of `parent_node` into its place. Colors are untouched.
    pub(crate) fn left_rotate(&mut self, parent_node: usize) {
        let right_child = self.right_of(parent_node);
        debug_assert_ne!(right_child, NIL, "left rotation needs a right child");

        let inner = self.left_of(right_child);
        self.nodes[parent_node].right = inner;
        if inner != NIL {
            self.nodes[inner].parent = parent_node;
        }

        let grand_parent = self.parent_of(parent_node);
        self.nodes[right_child].parent = grand_parent;
        if grand_parent == NIL {
            self.root = right_child;
        } else if parent_node == self.left_of(grand_parent) {
            self.nodes[grand_parent].left = right_child;
        } else {
            self.nodes[grand_parent].right = right_child;
        }

        self.nodes[right_child].left = parent_node;
        self.nodes[parent_node].parent = right_child;
    }

    /// Mirror of [`left_rotate`](Self::left_rotate).
    pub(crate) fn right_rotate(&mut self, parent_node: usize) {
        let left_child = self.left_of(parent_node);
        debug_assert_ne!(left_child, NIL, "right rotation needs a left child");

        let inner = self.right_of(left_child);
        self.nodes[parent_node].left = inner;
        if inner != NIL {
            self.nodes[inner].parent = parent_node;
        }

        let grand_parent = self.parent_of(parent_node);
        self.nodes[left_child].parent = grand_parent;
        if grand_parent == NIL {
            self.root = left_child;
        } else if parent_node == self.right_of(grand_parent) {
            self.nodes[grand_parent].right = left_child;
        } else {
            self.nodes[grand_parent].left = left_child;
        }

        self.nodes[left_child].right = parent_node;
        self.nodes[parent_node].parent = left_child;
    }
}

use std::fmt::Debug;

use crate::node::NIL;
use crate::tree::RBTree;

impl<K> RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    /// Writes keys in ascending order into `buffer` and returns how many were written.
    ///
    /// Stops silently once `buffer` is full; size it with [`len`](Self::len) to get every key.
    pub fn to_sorted_array(&self, buffer: &mut [K]) -> usize {
        let mut written = 0;
        // Explicit stack so a malformed tree cannot overflow the call stack.
        let mut stack = Vec::new();
        let mut iter = self.root;

        while written < buffer.len() && (iter != NIL || !stack.is_empty()) {
            while iter != NIL {
                stack.push(iter);
                iter = self.left_of(iter);
            }
            if let Some(node) = stack.pop() {
                buffer[written] = self.nodes[node].key;
                written += 1;
                iter = self.right_of(node);
            }
        }
        written
    }

    pub fn to_vec(&self) -> Vec<K> {
        let mut keys = vec![K::default(); self.len()];
        let written = self.to_sorted_array(&mut keys);
        keys.truncate(written);
        keys
    }
}

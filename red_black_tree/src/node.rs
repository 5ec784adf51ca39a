
/// Arena slot reserved for the sentinel. Every missing child or parent link points here.
pub(crate) const NIL: usize = 0;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Handle to a node living in an [`RBTree`](crate::RBTree).
///
/// A handle stays valid until the node it names is erased or the tree is cleared.
/// Handles are only meaningful for the tree that returned them.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct NodeRef(pub(crate) usize);

#[derive(Debug, Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    color: Color,
    pub(crate) left: usize,
    pub(crate) right: usize,
    pub(crate) parent: usize,
}

impl<K> Node<K> {
    pub(crate) fn new(key: K, color: Color, parent: usize) -> Node<K> {
        Node {
            key,
            color,
            left: NIL,
            right: NIL,
            parent,
        }
    }

    pub(crate) fn sentinel() -> Node<K>
    where
        K: Default,
    {
        Node::new(K::default(), Color::Black, NIL)
    }

    pub(crate) fn get_color(&self) -> Color {
        self.color
    }

    pub(crate) fn update_color(&mut self, new_color: Color) {
        self.color = new_color;
    }
}

use std::fmt::Debug;

use tracing::{debug, warn};

use crate::config::TreeConfig;
use crate::error::{Error, Result};
use crate::node::{Color, Node, NodeRef, NIL};

/// Red-black tree over scalar keys with multiset semantics.
///
/// Nodes live in an arena; slot 0 is the sentinel that stands in for every
/// absent child and for the root's parent. Slots of erased nodes are recycled.
#[derive(Debug)]
pub struct RBTree<K> {
    pub(crate) nodes: Vec<Node<K>>,
    free_slots: Vec<usize>,
    pub(crate) root: usize,
    len: usize,
    max_nodes: Option<usize>,
}

impl<K> Default for RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    fn default() -> Self {
        RBTree::new()
    }
}

impl<K> RBTree<K>
where
    K: Ord + Copy + Default + Debug,
{
    pub fn new() -> RBTree<K> {
        debug!("created red-black tree");
        RBTree {
            nodes: vec![Node::sentinel()],
            free_slots: vec![],
            root: NIL,
            len: 0,
            max_nodes: None,
        }
    }

    pub fn with_config(config: TreeConfig) -> Result<RBTree<K>> {
        config.validate()?;

        let exhausted = || Error::ResourceExhausted {
            requested: config.initial_capacity,
            limit: config.max_nodes,
        };
        // One extra slot for the sentinel.
        let slots = config.initial_capacity.checked_add(1).ok_or_else(exhausted)?;
        let mut nodes = Vec::new();
        nodes.try_reserve(slots).map_err(|_| exhausted())?;
        nodes.push(Node::sentinel());

        debug!(?config, "created red-black tree");

        Ok(RBTree {
            nodes,
            free_slots: vec![],
            root: NIL,
            len: 0,
            max_nodes: config.max_nodes,
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root == NIL
    }

    /// Node slots the arena can hold without reallocating, sentinel excluded.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity() - 1
    }

    pub fn root(&self) -> Option<NodeRef> {
        self.to_ref(self.root)
    }

    pub fn key(&self, node: NodeRef) -> K {
        self.nodes[node.0].key
    }

    pub fn color(&self, node: NodeRef) -> Color {
        self.get_color(node.0)
    }

    pub fn left(&self, node: NodeRef) -> Option<NodeRef> {
        self.to_ref(self.nodes[node.0].left)
    }

    pub fn right(&self, node: NodeRef) -> Option<NodeRef> {
        self.to_ref(self.nodes[node.0].right)
    }

    pub fn parent(&self, node: NodeRef) -> Option<NodeRef> {
        self.to_ref(self.nodes[node.0].parent)
    }

    /// Returns the first node with `key` met on the descent from the root.
    /// With duplicates this is not necessarily the earliest inserted one.
    pub fn find(&self, key: K) -> Option<NodeRef> {
        let mut iter = self.root;

        while iter != NIL {
            let iter_node = &self.nodes[iter];
            if key == iter_node.key {
                return Some(NodeRef(iter));
            } else if key < iter_node.key {
                iter = iter_node.left;
            } else {
                iter = iter_node.right;
            }
        }
        None
    }

    pub fn min(&self) -> Option<NodeRef> {
        self.to_ref(self.subtree_min(self.root))
    }

    pub fn max(&self) -> Option<NodeRef> {
        self.to_ref(self.subtree_max(self.root))
    }

    /// Releases every node and leaves an empty tree that can be reused.
    /// Returns the number of nodes released. Outstanding handles become invalid.
    pub fn clear(&mut self) -> usize {
        let released = self.len;
        self.nodes.truncate(1);
        self.nodes[NIL] = Node::sentinel();
        self.free_slots.clear();
        self.root = NIL;
        self.len = 0;

        debug!(released, "red-black tree cleared");
        released
    }

    /// Tears the tree down. Equivalent to dropping it, with the teardown logged.
    pub fn destroy(mut self) {
        self.clear();
    }

    pub(crate) fn subtree_min(&self, mut node: usize) -> usize {
        if node == NIL {
            return NIL;
        }
        while self.nodes[node].left != NIL {
            node = self.nodes[node].left;
        }
        node
    }

    pub(crate) fn subtree_max(&self, mut node: usize) -> usize {
        if node == NIL {
            return NIL;
        }
        while self.nodes[node].right != NIL {
            node = self.nodes[node].right;
        }
        node
    }

    pub(crate) fn get_color(&self, node: usize) -> Color {
        self.nodes[node].get_color()
    }

    /// The sentinel keeps its black color whatever the fixups ask for.
    pub(crate) fn update_color(&mut self, node: usize, color: Color) {
        if node != NIL {
            self.nodes[node].update_color(color);
        }
    }

    pub(crate) fn is_red(&self, node: usize) -> bool {
        self.get_color(node) == Color::Red
    }

    pub(crate) fn is_black(&self, node: usize) -> bool {
        self.get_color(node) == Color::Black
    }

    pub(crate) fn parent_of(&self, node: usize) -> usize {
        self.nodes[node].parent
    }

    pub(crate) fn left_of(&self, node: usize) -> usize {
        self.nodes[node].left
    }

    pub(crate) fn right_of(&self, node: usize) -> usize {
        self.nodes[node].right
    }

    pub(crate) fn is_left_child(&self, node: usize) -> bool {
        node == self.left_of(self.parent_of(node))
    }

    /// Whether `node` names a slot currently holding a tree node.
    pub(crate) fn is_live(&self, node: usize) -> bool {
        node != NIL && node < self.nodes.len() && self.nodes[node].parent != node
    }

    /// Hands out a slot for a new RED leaf whose children are the sentinel.
    pub(crate) fn alloc_node(&mut self, key: K, parent: usize) -> Result<usize> {
        if let Some(limit) = self.max_nodes {
            if self.len >= limit {
                warn!(limit, "node limit reached, refusing insertion");
                return Err(Error::ResourceExhausted {
                    requested: self.len + 1,
                    limit: Some(limit),
                });
            }
        }

        let node = Node::new(key, Color::Red, parent);
        let slot = match self.free_slots.pop() {
            Some(slot) => {
                self.nodes[slot] = node;
                slot
            }
            None => {
                if self.nodes.try_reserve(1).is_err() {
                    warn!(len = self.len, "arena allocation failed");
                    return Err(Error::ResourceExhausted {
                        requested: self.len + 1,
                        limit: self.max_nodes,
                    });
                }
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };

        self.len += 1;
        Ok(slot)
    }

    /// Returns a spliced-out slot to the arena. The slot's parent is pointed at
    /// itself so stale handles can be told apart from live nodes.
    pub(crate) fn free_node(&mut self, slot: usize) {
        let node = &mut self.nodes[slot];
        node.left = NIL;
        node.right = NIL;
        node.parent = slot;
        self.free_slots.push(slot);
        self.len -= 1;
    }

    fn to_ref(&self, node: usize) -> Option<NodeRef> {
        if node == NIL {
            None
        } else {
            Some(NodeRef(node))
        }
    }
}

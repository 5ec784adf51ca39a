//! Red-black tree over scalar keys.
//!
//! Keys are kept in ascending order and duplicates are allowed. Every operation
//! that walks the tree is `O(log n)`. Nodes are addressed through [`NodeRef`]
//! handles returned by [`RBTree::insert`], [`RBTree::find`], [`RBTree::min`]
//! and [`RBTree::max`].
//!
//! ```
//! use red_black_tree::RBTree;
//!
//! let mut tree = RBTree::new();
//! for key in [10, 20, 30] {
//!     tree.insert(key).unwrap();
//! }
//! let root = tree.root().unwrap();
//! assert_eq!(tree.key(root), 20);
//!
//! let node = tree.find(10).unwrap();
//! tree.erase(node);
//! assert_eq!(tree.to_vec(), vec![20, 30]);
//! ```

//Algorithm reference
// Cormen, Thomas H., Charles E. Leiserson, Ronald L. Rivest, and Clifford Stein.
// Introduction to algorithms. MIT press, 2009. Chapter 13.
mod config;
mod erase;
mod error;
mod export;
mod insert;
mod node;
mod rotate;
mod tests;
mod tree;
mod validate;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use node::{Color, NodeRef};
pub use tree::RBTree;

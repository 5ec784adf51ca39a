use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Sizing of the node arena backing a tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Slots reserved up front, not counting the sentinel.
    pub initial_capacity: usize,
    /// Upper bound on live nodes. `None` means the arena grows until memory runs out.
    pub max_nodes: Option<usize>,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 16,
            max_nodes: None,
        }
    }
}

impl TreeConfig {
    pub fn validate(&self) -> Result<()> {
        match self.max_nodes {
            Some(0) => Err(Error::Configuration {
                message: "max_nodes must be at least 1".to_string(),
            }),
            Some(max) if self.initial_capacity > max => Err(Error::Configuration {
                message: format!(
                    "initial_capacity {} exceeds max_nodes {}",
                    self.initial_capacity, max
                ),
            }),
            _ => Ok(()),
        }
    }
}

use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// Common fields for all blocks.
///
/// Children are never embedded; a block only advertises that it has them
/// and the walker lists them on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockCommon {
    pub id: BlockId,
    pub has_children: bool,
}

impl BlockCommon {
    pub fn new(id: BlockId) -> Self {
        Self {
            id,
            has_children: false,
        }
    }

    pub fn with_children(mut self) -> Self {
        self.has_children = true;
        self
    }
}

impl Default for BlockCommon {
    fn default() -> Self {
        Self::new(BlockId::new_v4())
    }
}

//! Error types for the editor

use crate::address::NodeAddress;
use crate::node::NodeUuid;
use thiserror::Error;

pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Invalid address: [{0}]")]
    InvalidAddress(NodeAddress),

    #[error("Stale address: [{address}] no longer points at node {expected}")]
    StaleAddress {
        address: NodeAddress,
        expected: NodeUuid,
    },

    #[error("Unknown node: {0}")]
    UnknownNode(NodeUuid),

    #[error("Duplicate node uuid: {0}")]
    DuplicateUuid(NodeUuid),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// True for failures a caller recovers from by re-deriving the address
    pub fn is_addressing(&self) -> bool {
        matches!(
            self,
            EditorError::InvalidAddress(_)
                | EditorError::StaleAddress { .. }
                | EditorError::UnknownNode(_)
        )
    }
}

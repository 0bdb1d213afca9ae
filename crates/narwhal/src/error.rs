use crate::graph::{EngineId, NodeId};
use crate::status::CallbackError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: `{field}` {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: &'static str,
    },
    #[error("node {node} is already owned by layout engine {owner}")]
    NodeOwnedByOtherEngine { node: NodeId, owner: EngineId },
    #[error("status callback failed after {iterations} iteration(s)")]
    Callback {
        iterations: usize,
        #[source]
        source: CallbackError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

use crate::graph::{EdgeRef, GraphId};
use thiserror::Error;

pub type GraphResult<T> = Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("edge {edge:?} does not belong to graph {graph:?}")]
    ForeignEdge { edge: EdgeRef, graph: GraphId },

    #[error("node index {index} out of range for {len} nodes")]
    NodeOutOfRange { index: usize, len: usize },

    #[error("no self-loop edge at node {0}")]
    SelfLoop(usize),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

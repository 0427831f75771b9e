//! Errors from the graph store adapter.

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("graph store connection failed: {0}")]
    Connection(String),

    #[error("graph store query failed: {0}")]
    Query(String),

    #[error("graph store returned malformed data: {0}")]
    Malformed(String),
}

//! Graph Store Adapter: the durable, idempotent property graph that the
//! materialiser writes into and the search core reads from.

mod error;
mod memory;
mod model;
mod neo4j;
mod store;

pub use error::GraphError;
pub use memory::InMemoryGraphStore;
pub use model::{Neighbor, StationRecord, TransportEdgeRecord, WalkEdgeRecord};
pub use neo4j::Neo4jGraphStore;
pub use store::GraphStore;

pub mod gateway;
pub mod graph;
pub mod node;

pub use gateway::*;
pub use graph::*;
pub use node::*;

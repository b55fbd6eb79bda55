//! Prelude module for convenient imports
//!
//! Re-exports the most commonly used types from the keiro crate. Import this
//! module to get access to the core functionality without having to import
//! each type individually.

// Canvas construction
pub use crate::canvas::{
    ConditionalBranch, DEFAULT_VERSION, END_NODE_ID, FlowCanvas, FlowConfig, FlowNode, Gateway,
    GatewayKind, NodeId, NodeKind, START_NODE_ID,
};

// Compiler output model
pub use crate::compiler::{
    GatewayElement, ProcessItem, ProcessModel, SequenceFlow, TaskElement,
};

// Deployment
pub use crate::deploy::{
    Deployer, DocumentStore, ProcessDefinition, ProcessEngine, ProcessHandle,
};

// Error types
pub use crate::error::{CollaboratorError, CompileError, ConfigError, DeployError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

use super::gateway::{Gateway, GatewayKind};
use super::node::{ConditionalBranch, FlowNode, NodeId, NodeKind, RESERVED_NODE_IDS};
use crate::compiler::ProcessModel;
use crate::document;
use crate::error::{CompileError, ConfigError};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Version assigned to a canvas that never set one explicitly.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Graph-scoped values that travel with the canvas into the runtime. The
/// compiler never reads them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowConfig {
    pub globals: AHashMap<String, serde_json::Value>,
    pub initial_input: Option<String>,
}

/// An in-memory directed graph of typed nodes, compiled into a BPMN process
/// document.
///
/// The canvas owns its nodes in an arena; [`NodeId`] handles keep the graph
/// fully general (nodes may be re-entered through back-edges, forming
/// cycles). Routing is configured through the `attach_*` methods, which
/// enforce the at-most-one-routing-mode invariant at the earliest point it
/// can be detected.
#[derive(Debug, Clone, Default)]
pub struct FlowCanvas {
    nodes: Vec<FlowNode>,
    root: Option<NodeId>,
    definition_id: Option<String>,
    version: Option<String>,
    pub config: FlowConfig,
}

impl FlowCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_definition_id(mut self, definition_id: &str) -> Self {
        self.definition_id = Some(definition_id.to_string());
        self
    }

    pub fn with_version(mut self, version: &str) -> Self {
        self.version = Some(version.to_string());
        self
    }

    pub fn definition_id(&self) -> Option<&str> {
        self.definition_id.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// Resolves the deployment key, assigning a fresh UUID definition id
    /// and the default version where unset. Resolved values are cached on
    /// the canvas, so repeated calls return the same key.
    pub fn definition_key(&mut self) -> (String, String) {
        let id = self
            .definition_id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();
        let version = self
            .version
            .get_or_insert_with(|| DEFAULT_VERSION.to_string())
            .clone();
        (id, version)
    }

    /// Adds an arbitrary node to the arena and returns its handle.
    pub fn add_node(&mut self, node: FlowNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn add_task(&mut self, name: &str, delegation: &str) -> NodeId {
        self.add_node(FlowNode::new(name, delegation, NodeKind::Task))
    }

    pub fn add_noop(&mut self) -> NodeId {
        self.add_node(FlowNode::new("nop", "nop", NodeKind::NoOp))
    }

    pub fn add_parallel(&mut self, name: &str, siblings: Vec<NodeId>, policy: &str) -> NodeId {
        self.add_node(FlowNode::new(
            name,
            "parallel",
            NodeKind::Parallel {
                siblings,
                policy: policy.to_string(),
            },
        ))
    }

    pub fn add_subflow(&mut self, name: &str, canvas: FlowCanvas) -> NodeId {
        self.add_node(FlowNode::new(
            name,
            "subflow",
            NodeKind::Subflow {
                canvas: Box::new(canvas),
            },
        ))
    }

    pub fn set_root(&mut self, node: NodeId) {
        self.root = Some(node);
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &FlowNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut FlowNode {
        &mut self.nodes[id.0]
    }

    /// Returns the node's id, assigning `<name>_<uuid>` on first access.
    pub fn identity(&mut self, node: NodeId) -> String {
        self.nodes[node.0].ensure_id().to_string()
    }

    /// Overrides the node's id. Reserved sentinel ids are rejected.
    pub fn set_identity(&mut self, node: NodeId, id: &str) -> Result<(), ConfigError> {
        if RESERVED_NODE_IDS.contains(&id) {
            return Err(ConfigError::ReservedId(id.to_string()));
        }
        self.nodes[node.0].id = id.to_string();
        Ok(())
    }

    /// Sets the single successor of `from`. Fails if the node already routes
    /// through conditional branches or a subflow.
    pub fn attach_next(&mut self, from: NodeId, to: NodeId) -> Result<(), ConfigError> {
        let node = &self.nodes[from.0];
        if !node.branches.is_empty() || matches!(node.kind, NodeKind::Subflow { .. }) {
            return Err(ConfigError::AmbiguousRouting {
                node_id: self.routing_error_id(from),
            });
        }
        self.nodes[from.0].next = Some(to);
        Ok(())
    }

    /// Appends a conditional branch to `from`, lazily creating its exclusive
    /// gateway on the first call. If no fallback target is set, a no-op
    /// pass-through node is synthesized so the conditional node always has a
    /// deterministic default path.
    pub fn attach_conditional(
        &mut self,
        from: NodeId,
        condition: &str,
        to: NodeId,
    ) -> Result<(), ConfigError> {
        let node = &self.nodes[from.0];
        if node.next.is_some() || matches!(node.kind, NodeKind::Subflow { .. }) {
            return Err(ConfigError::AmbiguousRouting {
                node_id: self.routing_error_id(from),
            });
        }
        let fallback = if self.nodes[from.0].else_next.is_none() {
            Some(self.add_noop())
        } else {
            None
        };
        let node = &mut self.nodes[from.0];
        if node.gateway.is_none() {
            node.gateway = Some(Gateway::new(GatewayKind::Exclusive));
        }
        node.branches.push(ConditionalBranch {
            condition: condition.to_string(),
            target: to,
        });
        if let Some(fallback) = fallback {
            node.else_next = Some(fallback);
        }
        Ok(())
    }

    /// Overrides the fallback target taken when no branch condition matches.
    /// Only meaningful once conditional branches exist.
    pub fn attach_else(&mut self, from: NodeId, to: NodeId) {
        self.nodes[from.0].else_next = Some(to);
    }

    /// Compiles the canvas into an ordered process model, materializing any
    /// unassigned node ids first so the walk itself is a pure computation.
    pub fn compile(&mut self) -> Result<ProcessModel, CompileError> {
        self.ensure_ids();
        crate::compiler::compile(self)
    }

    /// Compiles and serializes the canvas to BPMN XML, resolving the
    /// deployment key defaults. Rendering the same canvas twice yields
    /// byte-identical output.
    pub fn render(&mut self) -> Result<String, CompileError> {
        let (definition_id, version) = self.definition_key();
        let model = self.compile()?;
        document::render(&model, &definition_id, &version)
    }

    pub(crate) fn ensure_ids(&mut self) {
        for node in &mut self.nodes {
            node.ensure_id();
            if let NodeKind::Subflow { canvas } = &mut node.kind {
                canvas.ensure_ids();
            }
        }
    }

    /// Best identity for an error message about a node that may not have an
    /// assigned id yet.
    fn routing_error_id(&self, node: NodeId) -> String {
        let node = &self.nodes[node.0];
        if node.id.is_empty() {
            node.name.clone()
        } else {
            node.id.clone()
        }
    }
}

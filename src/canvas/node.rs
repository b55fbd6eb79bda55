use super::gateway::Gateway;
use super::graph::FlowCanvas;
use uuid::Uuid;

/// Sentinel id of the synthesized start event.
pub const START_NODE_ID: &str = "start";
/// Sentinel id of the synthesized end event.
pub const END_NODE_ID: &str = "end";
/// Ids owned by the compiler; user nodes may never take them.
pub const RESERVED_NODE_IDS: [&str; 2] = [START_NODE_ID, END_NODE_ID];

/// Handle to a node inside a [`FlowCanvas`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

/// A condition reference paired with the branch it guards. The condition is
/// opaque to the compiler; the execution engine evaluates it at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalBranch {
    pub condition: String,
    pub target: NodeId,
}

/// The closed set of node variants the compiler knows how to emit.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// A plain task bound to a delegation at runtime.
    Task,
    /// A pass-through node with no business behavior. Synthesized as the
    /// fallback target of conditional nodes.
    NoOp,
    /// A fan-out over sibling nodes. The sibling list and concurrency policy
    /// are runtime payload; the compiler only records them on the element.
    Parallel {
        siblings: Vec<NodeId>,
        policy: String,
    },
    /// A nested canvas whose root acts as this node's successor. The compiler
    /// recurses into it transparently.
    Subflow { canvas: Box<FlowCanvas> },
}

/// A single vertex of a flow canvas.
///
/// A node routes onward through exactly one mode: a single successor
/// (`next`), an ordered list of conditional branches behind a gateway, or the
/// implicit successor of a subflow. Configuring more than one mode fails
/// compilation.
#[derive(Debug, Clone)]
pub struct FlowNode {
    /// Unique id within the graph. Empty until first identity access, then
    /// assigned as `<name>_<uuid>` and stable for the node's lifetime.
    pub(crate) id: String,
    pub(crate) name: String,
    /// Opaque reference to the runtime behavior the engine binds to this
    /// node. Never interpreted by the compiler.
    pub(crate) delegation: String,
    pub(crate) kind: NodeKind,
    pub(crate) next: Option<NodeId>,
    pub(crate) branches: Vec<ConditionalBranch>,
    pub(crate) else_next: Option<NodeId>,
    /// Created once, on the first conditional branch attachment.
    pub(crate) gateway: Option<Gateway>,
}

impl FlowNode {
    pub fn new(name: &str, delegation: &str, kind: NodeKind) -> Self {
        Self {
            id: String::new(),
            name: name.to_string(),
            delegation: delegation.to_string(),
            kind,
            next: None,
            branches: Vec::new(),
            else_next: None,
            gateway: None,
        }
    }

    /// The node id, or an empty string if no identity was assigned yet.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn delegation(&self) -> &str {
        &self.delegation
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn next(&self) -> Option<NodeId> {
        self.next
    }

    pub fn branches(&self) -> &[ConditionalBranch] {
        &self.branches
    }

    pub fn else_next(&self) -> Option<NodeId> {
        self.else_next
    }

    pub fn gateway(&self) -> Option<&Gateway> {
        self.gateway.as_ref()
    }

    /// Assigns `<name>_<uuid>` on first access and returns the id.
    pub(crate) fn ensure_id(&mut self) -> &str {
        if self.id.is_empty() {
            self.id = format!("{}_{}", self.name, Uuid::new_v4());
        }
        &self.id
    }

    /// Number of routing modes configured on this node. Subflow nodes carry
    /// an implicit successor (the nested root), so the nested canvas counts
    /// as a mode of its own.
    pub(crate) fn routing_modes(&self) -> usize {
        usize::from(self.next.is_some())
            + usize::from(!self.branches.is_empty())
            + usize::from(matches!(self.kind, NodeKind::Subflow { .. }))
    }
}

use uuid::Uuid;

/// The branching discipline of a synthesized gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayKind {
    /// Exactly one outgoing flow is taken at runtime.
    Exclusive,
    /// All outgoing flows are taken concurrently.
    Parallel,
}

impl GatewayKind {
    pub fn element_name(&self) -> &'static str {
        match self {
            GatewayKind::Exclusive => "exclusiveGateway",
            GatewayKind::Parallel => "parallelGateway",
        }
    }
}

/// A compiler-synthesized choice point. At most one gateway exists per node,
/// created the first time a conditional branch is attached and never
/// re-created afterward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gateway {
    pub id: String,
    pub name: String,
    pub kind: GatewayKind,
}

impl Gateway {
    pub(crate) fn new(kind: GatewayKind) -> Self {
        let name = kind.element_name().to_string();
        Self {
            id: format!("{}_{}", name, Uuid::new_v4()),
            name,
            kind,
        }
    }
}

use crate::canvas::GatewayKind;

/// A task-like element emitted for a node's own body.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskElement {
    pub id: String,
    pub name: String,
    /// Runtime behavior reference, attached as an extension attribute.
    pub delegation: String,
    /// Kind-specific extension attributes, already prefixed.
    pub extensions: Vec<(String, String)>,
}

/// A gateway element raised for a conditional node.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayElement {
    pub id: String,
    pub name: String,
    pub kind: GatewayKind,
    /// Id of the flow taken when no branch condition matches.
    pub default_flow: Option<String>,
}

/// A directed edge between two element ids.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceFlow {
    pub id: String,
    pub source: String,
    pub target: String,
    /// Opaque branch condition reference, present on gateway branch flows.
    pub condition: Option<String>,
    /// Marks the gateway's default flow.
    pub is_default: bool,
}

/// One record of the compiler's ordered output stream.
#[derive(Debug, Clone, PartialEq)]
pub enum ProcessItem {
    StartEvent,
    EndEvent,
    Task(TaskElement),
    Gateway(GatewayElement),
    Flow(SequenceFlow),
}

/// The compiler's output: element and edge records in emission order. The
/// document assembler preserves this order exactly.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessModel {
    pub items: Vec<ProcessItem>,
}

impl ProcessModel {
    pub fn tasks(&self) -> impl Iterator<Item = &TaskElement> {
        self.items.iter().filter_map(|item| match item {
            ProcessItem::Task(task) => Some(task),
            _ => None,
        })
    }

    pub fn gateways(&self) -> impl Iterator<Item = &GatewayElement> {
        self.items.iter().filter_map(|item| match item {
            ProcessItem::Gateway(gateway) => Some(gateway),
            _ => None,
        })
    }

    pub fn flows(&self) -> impl Iterator<Item = &SequenceFlow> {
        self.items.iter().filter_map(|item| match item {
            ProcessItem::Flow(flow) => Some(flow),
            _ => None,
        })
    }

    pub fn has_flow(&self, source: &str, target: &str) -> bool {
        self.flows()
            .any(|flow| flow.source == source && flow.target == target)
    }
}

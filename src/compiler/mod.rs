//! Graph-walk compiler: linearizes a [`FlowCanvas`] into an ordered stream of
//! process elements and sequence flows.
//!
//! The walk is breadth-first from the canvas root. Each node is dequeued and
//! has its body emitted exactly once; back-edges are still emitted as flows,
//! so cyclic graphs compile losslessly and terminate. Emission order is
//! stable: branch flows follow insertion order and elements follow dequeue
//! order, so recompiling the same canvas is byte-identical downstream.

mod model;

pub use model::*;

use crate::canvas::{
    END_NODE_ID, FlowCanvas, FlowNode, NodeId, NodeKind, RESERVED_NODE_IDS, START_NODE_ID,
};
use crate::error::{CompileError, ConfigError};
use ahash::AHashSet;
use itertools::Itertools;
use std::collections::VecDeque;
use tracing::error;

/// Compiles a canvas whose node ids have already been materialized.
/// [`FlowCanvas::compile`] is the public entry point.
pub(crate) fn compile(canvas: &FlowCanvas) -> Result<ProcessModel, CompileError> {
    let root = canvas.root().ok_or(ConfigError::MissingRoot)?;

    let mut walk = Walk::default();
    walk.items.push(ProcessItem::StartEvent);
    let root_id = canvas.node(root).id().to_string();
    walk.push_flow(START_NODE_ID, &root_id, None, false);
    walk.visited.insert(root_id);
    walk.queue.push_back((canvas, root));

    while let Some((ctx, node_id)) = walk.queue.pop_front() {
        walk.emit_node(ctx, node_id)?;
    }

    walk.items.push(ProcessItem::EndEvent);
    Ok(ProcessModel { items: walk.items })
}

/// Traversal state. Queue entries carry the canvas they belong to, so the
/// walk crosses transparently into nested subflow canvases.
#[derive(Default)]
struct Walk<'a> {
    items: Vec<ProcessItem>,
    visited: AHashSet<String>,
    queue: VecDeque<(&'a FlowCanvas, NodeId)>,
    flow_seq: usize,
}

impl<'a> Walk<'a> {
    fn push_flow(
        &mut self,
        source: &str,
        target: &str,
        condition: Option<String>,
        is_default: bool,
    ) -> String {
        let id = format!("flow_{}", self.flow_seq);
        self.flow_seq += 1;
        self.items.push(ProcessItem::Flow(SequenceFlow {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            condition,
            is_default,
        }));
        id
    }

    /// Enqueues a node unless its id was already visited. Called after the
    /// flow pointing at the node is emitted, so back-edges survive in the
    /// output without ever re-entering the queue.
    fn enqueue(&mut self, ctx: &'a FlowCanvas, node: NodeId) {
        let id = ctx.node(node).id();
        if !self.visited.contains(id) {
            self.visited.insert(id.to_string());
            self.queue.push_back((ctx, node));
        }
    }

    fn emit_node(&mut self, ctx: &'a FlowCanvas, node_id: NodeId) -> Result<(), CompileError> {
        let node = ctx.node(node_id);
        let id = node.id().to_string();

        if RESERVED_NODE_IDS.contains(&id.as_str()) {
            return Err(ConfigError::ReservedId(id).into());
        }
        if node.routing_modes() > 1 {
            return Err(ConfigError::AmbiguousRouting { node_id: id }.into());
        }

        if !node.branches().is_empty() {
            self.emit_gateway(ctx, node, &id)?;
        }

        self.items.push(ProcessItem::Task(emit_body(ctx, node)));

        if let Some(next) = node.next() {
            let target = ctx.node(next).id().to_string();
            self.push_flow(&id, &target, None, false);
            self.enqueue(ctx, next);
        } else if let NodeKind::Subflow { canvas: nested } = node.kind() {
            let nested_root = nested
                .root()
                .ok_or(ConfigError::EmptySubflow { node_id: id.clone() })?;
            let target = nested.node(nested_root).id().to_string();
            self.push_flow(&id, &target, None, false);
            self.enqueue(nested, nested_root);
        } else if node.branches().is_empty() {
            // No routing configured: terminal leaf.
            self.push_flow(&id, END_NODE_ID, None, false);
        }

        Ok(())
    }

    fn emit_gateway(
        &mut self,
        ctx: &'a FlowCanvas,
        node: &'a FlowNode,
        node_id: &str,
    ) -> Result<(), CompileError> {
        let Some(gateway) = node.gateway() else {
            error!(node_id, "conditional node has no gateway");
            return Err(CompileError::MissingGateway {
                node_id: node_id.to_string(),
            });
        };

        let gateway_index = self.items.len();
        self.items.push(ProcessItem::Gateway(GatewayElement {
            id: gateway.id.clone(),
            name: gateway.name.clone(),
            kind: gateway.kind,
            default_flow: None,
        }));
        self.push_flow(node_id, &gateway.id, None, false);

        for branch in node.branches() {
            let target = ctx.node(branch.target).id().to_string();
            self.push_flow(&gateway.id, &target, Some(branch.condition.clone()), false);
            self.enqueue(ctx, branch.target);
        }

        if let Some(else_next) = node.else_next() {
            let target = ctx.node(else_next).id().to_string();
            let flow_id = self.push_flow(&gateway.id, &target, None, true);
            if let Some(ProcessItem::Gateway(element)) = self.items.get_mut(gateway_index) {
                element.default_flow = Some(flow_id);
            }
            self.enqueue(ctx, else_next);
        }

        Ok(())
    }
}

fn emit_body(ctx: &FlowCanvas, node: &FlowNode) -> TaskElement {
    let mut extensions = Vec::new();
    if let NodeKind::Parallel { siblings, policy } = node.kind() {
        extensions.push(("ext:policy".to_string(), policy.clone()));
        let ids = siblings.iter().map(|s| ctx.node(*s).id()).join(",");
        extensions.push(("ext:siblings".to_string(), ids));
    }
    TaskElement {
        id: node.id().to_string(),
        name: node.name().to_string(),
        delegation: node.delegation().to_string(),
        extensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The attach API guards these invariants, so the defensive compile-time
    // checks can only be exercised by corrupting node state directly.

    #[test]
    fn missing_gateway_is_an_internal_defect() {
        let mut canvas = FlowCanvas::new();
        let a = canvas.add_task("a", "A");
        let b = canvas.add_task("b", "B");
        canvas.set_root(a);
        canvas
            .attach_conditional(a, "cond", b)
            .expect("attach should succeed");
        canvas.node_mut(a).gateway = None;

        let err = canvas.compile().expect_err("compile should fail");
        assert!(
            matches!(err, CompileError::MissingGateway { node_id } if node_id.starts_with("a_"))
        );
    }

    #[test]
    fn routing_exclusivity_is_checked_at_compile_time() {
        let mut canvas = FlowCanvas::new();
        let a = canvas.add_task("a", "A");
        let b = canvas.add_task("b", "B");
        let c = canvas.add_task("c", "C");
        canvas.set_root(a);
        canvas
            .attach_conditional(a, "cond", b)
            .expect("attach should succeed");
        canvas.node_mut(a).next = Some(c);

        let err = canvas.compile().expect_err("compile should fail");
        assert!(matches!(
            err,
            CompileError::Config(ConfigError::AmbiguousRouting { .. })
        ));
    }

    #[test]
    fn reserved_id_collision_is_checked_at_compile_time() {
        let mut canvas = FlowCanvas::new();
        let a = canvas.add_task("a", "A");
        canvas.set_root(a);
        canvas.node_mut(a).id = END_NODE_ID.to_string();

        let err = canvas.compile().expect_err("compile should fail");
        assert!(matches!(
            err,
            CompileError::Config(ConfigError::ReservedId(id)) if id == END_NODE_ID
        ));
    }
}

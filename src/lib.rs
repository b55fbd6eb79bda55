//! # Keiro - Flow Canvas to BPMN Process Compiler
//!
//! **Keiro** compiles an in-memory directed graph of typed workflow nodes
//! (sequential, conditional, parallel, nested subflow) into a standardized
//! BPMN XML document and registers it with an execution engine that
//! interprets the document at runtime. The compiler owns the structural
//! invariants of that translation: the at-most-one-routing-mode rule, cycle
//! termination, deterministic id generation, default-flow selection for
//! conditional gateways, and idempotent deployment per definition key.
//!
//! ## Core Workflow
//!
//! 1. **Build a canvas**: create a [`canvas::FlowCanvas`], add typed nodes,
//!    and wire them with `attach_next` / `attach_conditional` / `attach_else`.
//! 2. **Compile**: `FlowCanvas::compile` walks the graph breadth-first and
//!    produces an ordered [`compiler::ProcessModel`] of elements and flows.
//! 3. **Serialize**: [`document::render`] wraps the model in the namespaced
//!    `definitions` → `process` envelope and emits indented UTF-8 XML.
//! 4. **Deploy**: a [`deploy::Deployer`], constructed with a document store
//!    and an engine client, persists the text and registers it at most once
//!    per `(definition_id, version)`.
//!
//! ## Quick Start
//!
//! ```rust
//! use keiro::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let mut canvas = FlowCanvas::new().with_version("1.0.0");
//!
//!     let plan = canvas.add_task("plan", "PlannerDelegation");
//!     let act = canvas.add_task("act", "ExecutorDelegation");
//!     let review = canvas.add_task("review", "ReviewerDelegation");
//!     canvas.set_root(plan);
//!
//!     canvas.attach_next(plan, act)?;
//!     canvas.attach_conditional(act, "needs_review", review)?;
//!
//!     let xml = canvas.render()?;
//!     assert!(xml.contains("exclusiveGateway"));
//!     Ok(())
//! }
//! ```

pub mod canvas;
pub mod compiler;
pub mod deploy;
pub mod document;
pub mod error;
pub mod prelude;

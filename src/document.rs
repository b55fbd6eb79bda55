//! Document assembler: wraps a compiled [`ProcessModel`] in the namespaced
//! BPMN envelope and serializes it to indented UTF-8 text. Structural order
//! is exactly the compiler's emission order.

use crate::canvas::{END_NODE_ID, START_NODE_ID};
use crate::compiler::{ProcessItem, ProcessModel};
use crate::error::CompileError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

/// The standard BPMN model namespace, declared as the document default.
pub const BPMN_NAMESPACE: &str = "http://www.omg.org/spec/BPMN/20100524/MODEL";
/// Extension namespace carrying delegation bindings and runtime payload.
pub const EXT_NAMESPACE: &str = "https://keiro-rs.github.io/schema/process/ext";

/// Serializes the model into a `definitions` → `process` document.
pub fn render(
    model: &ProcessModel,
    definition_id: &str,
    version: &str,
) -> Result<String, CompileError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(render_err)?;

    let mut definitions = BytesStart::new("definitions");
    definitions.push_attribute(("xmlns", BPMN_NAMESPACE));
    definitions.push_attribute(("xmlns:ext", EXT_NAMESPACE));
    writer
        .write_event(Event::Start(definitions))
        .map_err(render_err)?;

    let mut process = BytesStart::new("process");
    process.push_attribute(("id", definition_id));
    process.push_attribute(("version", version));
    process.push_attribute(("isExecutable", "true"));
    writer
        .write_event(Event::Start(process))
        .map_err(render_err)?;

    for item in &model.items {
        write_item(&mut writer, item)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("process")))
        .map_err(render_err)?;
    writer
        .write_event(Event::End(BytesEnd::new("definitions")))
        .map_err(render_err)?;

    let xml = String::from_utf8(writer.into_inner()).map_err(|e| CompileError::Render(e.to_string()))?;
    // The engine rejects empty default-namespace declarations, which some
    // serializers introduce on unprefixed children.
    Ok(xml.replace(" xmlns=\"\"", ""))
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &ProcessItem) -> Result<(), CompileError> {
    let element = match item {
        ProcessItem::StartEvent => {
            let mut event = BytesStart::new("startEvent");
            event.push_attribute(("id", START_NODE_ID));
            event
        }
        ProcessItem::EndEvent => {
            let mut event = BytesStart::new("endEvent");
            event.push_attribute(("id", END_NODE_ID));
            event
        }
        ProcessItem::Task(task) => {
            let mut element = BytesStart::new("serviceTask");
            element.push_attribute(("id", task.id.as_str()));
            element.push_attribute(("name", task.name.as_str()));
            element.push_attribute(("ext:delegation", task.delegation.as_str()));
            for (key, value) in &task.extensions {
                element.push_attribute((key.as_str(), value.as_str()));
            }
            element
        }
        ProcessItem::Gateway(gateway) => {
            let mut element = BytesStart::new(gateway.kind.element_name());
            element.push_attribute(("id", gateway.id.as_str()));
            element.push_attribute(("name", gateway.name.as_str()));
            if let Some(default_flow) = &gateway.default_flow {
                element.push_attribute(("default", default_flow.as_str()));
            }
            element
        }
        ProcessItem::Flow(flow) => {
            let mut element = BytesStart::new("sequenceFlow");
            element.push_attribute(("id", flow.id.as_str()));
            element.push_attribute(("sourceRef", flow.source.as_str()));
            element.push_attribute(("targetRef", flow.target.as_str()));
            if let Some(condition) = &flow.condition {
                element.push_attribute(("ext:condition", condition.as_str()));
            }
            if flow.is_default {
                element.push_attribute(("ext:flowType", "default"));
            }
            element
        }
    };
    writer
        .write_event(Event::Empty(element))
        .map_err(render_err)
}

fn render_err<E: std::fmt::Display>(error: E) -> CompileError {
    CompileError::Render(error.to_string())
}

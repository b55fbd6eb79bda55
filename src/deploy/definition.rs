use serde::{Deserialize, Serialize};

/// The artifact of a successful deployment: the resolved definition key and
/// the serialized document text. Immutable once produced; it holds its own
/// copy of the text and does not reference the canvas it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDefinition {
    pub definition_id: String,
    pub version: String,
    pub bpmn_xml: String,
}

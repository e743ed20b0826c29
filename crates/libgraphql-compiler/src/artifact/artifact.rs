use crate::document::DocumentKind;
use indexmap::IndexMap;
use serde::Serialize;

/// The compiled, runtime-facing description of one document.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub name: String,
    pub kind: DocumentKind,
    /// Lowercase hex SHA-256 of `raw`.
    pub hash: String,
    /// The document's text with internal directives removed.
    pub raw: String,
    pub root_type: String,
    pub selection: Vec<SelectionNode>,
}
impl Artifact {
    /// The artifact as the body of a JavaScript module.
    pub fn to_module(&self) -> serde_json::Result<String> {
        Ok(format!("export default {};\n", serde_json::to_string_pretty(self)?))
    }
}

/// One selected field, annotated with what the schema and the connection
/// directives say about it.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionNode {
    pub field_type: String,
    pub field_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<IndexMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selection: Option<Vec<SelectionNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operations: Option<Vec<FilterOperation>>,
}
impl SelectionNode {
    /// The key this field's value is returned under (its alias, if any).
    pub fn response_key(&self) -> &str {
        self.alias.as_deref().unwrap_or(self.field_name.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationAction {
    Delete,
    Insert,
    Remove,
}

/// A change a mutation or subscription result applies to cached connections.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterOperation {
    pub action: OperationAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub connection: Option<String>,
    #[serde(rename = "type")]
    pub type_name: String,
    pub filters: IndexMap<String, String>,
}

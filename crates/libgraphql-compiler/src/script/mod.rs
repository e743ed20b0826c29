//! A lossless, GraphQL-aware view over the JavaScript/TypeScript code inside
//! one `<script>` block.

#[allow(clippy::module_inception)]
mod script;
mod script_parse_error;
mod script_scanner;

pub use script::ImportDeclaration;
pub use script::Script;
pub use script::ScriptNode;
pub use script::TaggedTemplate;
pub use script_parse_error::ScriptParseError;

use crate::artifact::strip_internal_directives;
use crate::ast;
use crate::config::Config;
use crate::document::DocumentKind;
use std::path::PathBuf;

/// A GraphQL document found in a source file, validated and named.
#[derive(Clone, Debug, PartialEq)]
pub struct CollectedDocument {
    pub filename: PathBuf,
    /// Unique across a compilation run.
    pub name: String,
    pub kind: DocumentKind,
    /// The document as the runtime sees it, internal directives removed.
    pub document: ast::query::Document,
    /// The document as written. Connections and their operations are read
    /// from here.
    pub original_document: ast::query::Document,
    /// `document`, pretty-printed.
    pub printed: String,
}
impl CollectedDocument {
    pub fn new(
        config: &Config,
        filename: PathBuf,
        name: String,
        kind: DocumentKind,
        original_document: ast::query::Document,
    ) -> Self {
        let mut document = original_document.clone();
        strip_internal_directives(config, &mut document);
        let printed = document.to_string();
        Self {
            filename,
            name,
            kind,
            document,
            original_document,
            printed,
        }
    }
}

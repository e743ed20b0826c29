use crate::document::DocumentKind;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum NamingError {
    #[error(
        "document name `{name}` is used more than once (in {})",
        format_files(.files),
    )]
    DuplicateName {
        name: String,
        files: Vec<PathBuf>,
    },

    #[error("{kind} documents must be named")]
    MissingName {
        kind: DocumentKind,
    },

    #[error(
        "a `{expected}(...)` document must contain exactly one {expected} \
        definition (found {operations} operation(s) and {fragments} \
        fragment(s){})",
        found_kind_suffix(.found),
    )]
    UnexpectedDefinitions {
        expected: DocumentKind,
        found: Option<DocumentKind>,
        operations: usize,
        fragments: usize,
    },
}

fn format_files(files: &[PathBuf]) -> String {
    files.iter()
        .map(|file| format!("{file:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn found_kind_suffix(found: &Option<DocumentKind>) -> String {
    match found {
        Some(kind) => format!(", the operation is a {kind}"),
        None => String::new(),
    }
}

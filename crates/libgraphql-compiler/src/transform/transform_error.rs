use crate::document::NamingError;
use crate::source::RegionParseError;
use crate::source::SpliceError;
use crate::transform::ValidationIssue;
use std::path::PathBuf;
use thiserror::Error;

/// Why one file could not be transformed. Every variant carries the file it
/// happened in.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("{filename:?}: {err}")]
    Naming {
        filename: PathBuf,
        err: NamingError,
    },

    #[error("{filename:?}: {err}")]
    Parse {
        filename: PathBuf,
        err: RegionParseError,
    },

    #[error("{filename:?}: {err}")]
    Splice {
        filename: PathBuf,
        err: SpliceError,
    },

    #[error(
        "{filename:?}: invalid GraphQL document{}:\n{}",
        format_document_name(.document_name),
        format_issues(.issues),
    )]
    Validation {
        filename: PathBuf,
        document_name: Option<String>,
        issues: Vec<ValidationIssue>,
    },
}
impl TransformError {
    pub fn filename(&self) -> &PathBuf {
        match self {
            Self::Naming { filename, .. }
            | Self::Parse { filename, .. }
            | Self::Splice { filename, .. }
            | Self::Validation { filename, .. } => filename,
        }
    }
}

fn format_document_name(document_name: &Option<String>) -> String {
    match document_name {
        Some(name) => format!(" `{name}`"),
        None => String::new(),
    }
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues.iter()
        .map(|issue| format!("  * {issue}"))
        .collect::<Vec<_>>()
        .join("\n")
}

use crate::ast;
use crate::document::DocumentKind;
use std::path::PathBuf;
use thiserror::Error;

/// Why one document's artifact could not be built or written. Other
/// documents are unaffected.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ArtifactError {
    #[error(
        "document `{document}` must hold either exactly one operation or only \
        fragments (found {operations} operation(s) and {fragments} fragment(s))"
    )]
    Classification {
        document: String,
        operations: usize,
        fragments: usize,
    },

    #[error(
        "document `{document}`: connection `{connection}` holds `{expected}` \
        values but the field it is applied to is a `{found}`"
    )]
    ConnectionTypeMismatch {
        document: String,
        connection: String,
        expected: String,
        found: String,
    },

    #[error("document `{document}`: fragment `{fragment}` spreads itself")]
    FragmentCycle {
        document: String,
        fragment: String,
    },

    #[error("document `{document}`: the schema has no root type for {kind} operations")]
    MissingRootType {
        document: String,
        kind: DocumentKind,
    },

    #[error("document `{document}`: failed to serialize the artifact: {err}")]
    Serialize {
        document: String,
        err: String,
    },

    #[error("document `{document}`: type `{parent_type}` has no field `{field_name}`")]
    UndefinedField {
        document: String,
        parent_type: String,
        field_name: String,
    },

    #[error("document `{document}`: fragment `{fragment}` is not defined")]
    UndefinedFragment {
        document: String,
        fragment: String,
    },

    #[error("document `{document}`: type `{type_name}` is not defined")]
    UndefinedType {
        document: String,
        type_name: String,
    },

    #[error("document `{document}`: no connection is named `{connection}`")]
    UnknownConnection {
        document: String,
        connection: String,
    },

    #[error("document `{document}`: failed to write {path:?}: {err}")]
    Write {
        document: String,
        path: PathBuf,
        err: String,
    },
}
impl ArtifactError {
    pub fn document(&self) -> &str {
        match self {
            Self::Classification { document, .. }
            | Self::ConnectionTypeMismatch { document, .. }
            | Self::FragmentCycle { document, .. }
            | Self::MissingRootType { document, .. }
            | Self::Serialize { document, .. }
            | Self::UndefinedField { document, .. }
            | Self::UndefinedFragment { document, .. }
            | Self::UndefinedType { document, .. }
            | Self::UnknownConnection { document, .. }
            | Self::Write { document, .. } => document.as_str(),
        }
    }
}

/// A problem with connection directives. Connection filters are shared by
/// every document of a run, so this fails the whole artifact generation.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FilterScanError {
    #[error(
        "document `{document}`: connection `{connection}` is used on fields of \
        type `{first_type}` and `{second_type}`"
    )]
    ConflictingConnectionType {
        document: String,
        connection: String,
        first_type: String,
        second_type: String,
    },

    #[error("{filename:?} ({position}): the connection name of `{document}` must be a string")]
    InvalidConnectionName {
        document: String,
        filename: PathBuf,
        position: ast::Pos,
    },

    #[error(
        "{filename:?} ({position}): connection directives can only be applied \
        to fields (document `{document}`)"
    )]
    MisplacedConnection {
        document: String,
        filename: PathBuf,
        position: ast::Pos,
    },

    #[error("{filename:?} ({position}): a connection in `{document}` has no name")]
    MissingConnectionName {
        document: String,
        filename: PathBuf,
        position: ast::Pos,
    },
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerateError {
    #[error(transparent)]
    FilterScan(#[from] FilterScanError),

    #[error("failed to write the artifact index {path:?}: {err}")]
    IndexWrite {
        path: PathBuf,
        err: String,
    },
}

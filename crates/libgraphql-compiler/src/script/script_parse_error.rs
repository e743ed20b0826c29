use thiserror::Error;

/// Script text that could not be scanned. Offsets are byte offsets into the
/// scanned script text.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ScriptParseError {
    #[error(
        "GraphQL documents must be static: the `{tag}` template starting at \
        byte {offset} contains a `${{...}}` substitution"
    )]
    GraphQLTemplateSubstitution {
        offset: usize,
        tag: String,
    },

    #[error("unterminated block comment starting at byte {offset}")]
    UnterminatedComment {
        offset: usize,
    },

    #[error("unterminated regular expression literal starting at byte {offset}")]
    UnterminatedRegex {
        offset: usize,
    },

    #[error("unterminated string literal starting at byte {offset}")]
    UnterminatedString {
        offset: usize,
    },

    #[error("unterminated template literal starting at byte {offset}")]
    UnterminatedTemplate {
        offset: usize,
    },
}

use crate::script::ScriptParseError;
use crate::source::RegionRole;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum RegionParseError {
    #[error(
        "found a second {role} <script> block at byte {second_offset} (the \
        first starts at byte {first_offset})"
    )]
    DuplicateRegion {
        role: RegionRole,
        first_offset: usize,
        second_offset: usize,
    },

    #[error("the {role} <script> block has invalid code: {err}")]
    InvalidScript {
        role: RegionRole,
        err: ScriptParseError,
    },

    #[error("the <script> tag starting at byte {offset} is never closed with `>`")]
    UnterminatedOpeningTag {
        offset: usize,
    },

    #[error("the <script> block starting at byte {offset} has no matching </script>")]
    UnclosedRegion {
        offset: usize,
    },
}

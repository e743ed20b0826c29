use crate::source::PrintedRegion;
use crate::source::RegionOffsets;
use crate::source::RegionRole;
use crate::source::region_splitter::find_tag_end;
use thiserror::Error;

type Result<T> = std::result::Result<T, SpliceError>;

/// Replaces the content of the region at `offsets` (strictly between the
/// opening tag's `>` and the closing tag's `<`) with `new_text`.
///
/// `offsets` must describe `original` exactly as it was split: tags and every
/// byte outside the region's content are preserved.
pub fn splice(
    original: &str,
    offsets: RegionOffsets,
    new_text: &str,
) -> Result<String> {
    let bytes = original.as_bytes();
    let (start, end) = (offsets.start(), offsets.end());
    if start >= end || end >= bytes.len() {
        return Err(SpliceError::OffsetsOutOfBounds {
            start,
            end,
            len: bytes.len(),
        });
    }

    let content_start = match find_tag_end(bytes, start) {
        Some(gt) if gt < end => gt + 1,
        _ => return Err(SpliceError::OpeningTagNotClosed { start, end }),
    };
    let content_end = match bytes[content_start..=end].iter().rposition(|b| *b == b'<') {
        Some(idx) => content_start + idx,
        None => return Err(SpliceError::ClosingTagNotFound { start, end }),
    };

    let mut spliced = String::with_capacity(
        original.len() - (content_end - content_start) + new_text.len(),
    );
    spliced.push_str(&original[..content_start]);
    spliced.push_str(new_text);
    spliced.push_str(&original[content_end..]);
    Ok(spliced)
}

/// Prepends a brand new `<script>` block of the given role to `original`.
pub fn insert_region(original: &str, role: RegionRole, new_text: &str) -> String {
    format!("{}{new_text}</script>\n{original}", role.opening_tag())
}

/// Produces the final file text from the original text and each region's
/// printed code.
///
/// Present regions are spliced from the last one in the file to the first so
/// that every splice uses offsets that are still valid. Regions the file did
/// not have are inserted at the top afterwards, the module block first.
pub fn reconcile(
    original: &str,
    module: Option<PrintedRegion>,
    instance: Option<PrintedRegion>,
) -> Result<String> {
    let (mut present, absent): (Vec<_>, Vec<_>) =
        [module, instance].into_iter()
            .flatten()
            .partition(|region| !region.offsets.is_absent());

    if present.is_empty() && absent.is_empty() {
        return Ok(original.to_string());
    }

    present.sort_by_key(|region| std::cmp::Reverse(region.offsets.end()));
    let mut code = original.to_string();
    for region in &present {
        code = splice(&code, region.offsets, &region.text)?;
    }

    // `absent` is in (module, instance) order; prepend in reverse so the
    // module block ends up first.
    for region in absent.iter().rev() {
        code = insert_region(&code, region.role, &region.text);
    }

    Ok(code)
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum SpliceError {
    #[error(
        "no closing-tag `<` found between bytes {start} and {end}"
    )]
    ClosingTagNotFound {
        start: usize,
        end: usize,
    },

    #[error(
        "region offsets {start}..{end} fall outside of a {len}-byte text"
    )]
    OffsetsOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },

    #[error(
        "no opening-tag `>` found between bytes {start} and {end}"
    )]
    OpeningTagNotClosed {
        start: usize,
        end: usize,
    },
}

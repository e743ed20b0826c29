use crate::script::Script;
use crate::source::ParsedRegions;
use crate::source::Region;
use crate::source::RegionOffsets;
use crate::source::RegionParseError;
use crate::source::RegionRole;

type Result<T> = std::result::Result<T, RegionParseError>;

const CLOSING_TAG: &[u8] = b"</script";
const OPENING_TAG: &[u8] = b"<script";

/// Finds the (at most one) module and (at most one) instance `<script>`
/// block of a component and parses each with [`Script::parse`].
pub fn split_regions(source: &str, graphql_tag: &str) -> Result<ParsedRegions> {
    let bytes = source.as_bytes();
    let mut regions = ParsedRegions::default();
    let mut pos = 0;

    while pos < bytes.len() {
        if bytes[pos..].starts_with(b"<!--") {
            pos = match source[pos + 4..].find("-->") {
                Some(idx) => pos + 4 + idx + 3,
                None => bytes.len(),
            };
            continue;
        }

        if !starts_with_tag(bytes, pos, OPENING_TAG) {
            pos += 1;
            continue;
        }

        let start = pos;
        let open_end = find_tag_end(bytes, start)
            .ok_or(RegionParseError::UnterminatedOpeningTag { offset: start })?;
        let attributes = &source[start + OPENING_TAG.len()..open_end];

        let close_start = find_closing_tag(bytes, open_end + 1)
            .ok_or(RegionParseError::UnclosedRegion { offset: start })?;
        let end = bytes[close_start..].iter()
            .position(|b| *b == b'>')
            .map(|idx| close_start + idx)
            .ok_or(RegionParseError::UnclosedRegion { offset: start })?;

        let role =
            if is_module_context(attributes) {
                RegionRole::Module
            } else {
                RegionRole::Instance
            };
        let script = Script::parse(&source[open_end + 1..close_start], graphql_tag)
            .map_err(|err| RegionParseError::InvalidScript { role, err })?;

        let slot = match role {
            RegionRole::Module => &mut regions.module,
            RegionRole::Instance => &mut regions.instance,
        };
        if let Some(existing) = slot.as_ref() {
            return Err(RegionParseError::DuplicateRegion {
                role,
                first_offset: existing.offsets().start(),
                second_offset: start,
            });
        }
        *slot = Some(Region::new(script, RegionOffsets::new(start, end)));

        pos = end + 1;
    }

    Ok(regions)
}

/// Finds the `>` ending the tag whose `<` is at `tag_start`, skipping quoted
/// attribute values.
pub(super) fn find_tag_end(bytes: &[u8], tag_start: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    for (idx, byte) in bytes.iter().enumerate().skip(tag_start + 1) {
        match (quote, *byte) {
            (Some(q), b) if q == b => quote = None,
            (Some(_), _) => (),
            (None, b'"' | b'\'') => quote = Some(*byte),
            (None, b'>') => return Some(idx),
            (None, _) => (),
        }
    }
    None
}

fn find_closing_tag(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|idx| starts_with_tag(bytes, *idx, CLOSING_TAG))
}

fn is_module_context(attributes: &str) -> bool {
    parse_attributes(attributes).iter().any(|(name, value)| {
        match (name.as_str(), value.as_deref()) {
            ("context", Some("module")) => true,
            ("module", None) => true,
            _ => false,
        }
    })
}

fn parse_attributes(text: &str) -> Vec<(String, Option<String>)> {
    let mut attributes = vec![];
    let mut chars = text.trim_end_matches('/').chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let mut name = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            name.push(c);
        }
        if name.is_empty() {
            break;
        }

        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        let value =
            if chars.next_if_eq(&'=').is_some() {
                while chars.next_if(|c| c.is_whitespace()).is_some() {}
                let mut value = String::new();
                match chars.next_if(|c| *c == '"' || *c == '\'') {
                    Some(quote) => {
                        for c in chars.by_ref() {
                            if c == quote {
                                break;
                            }
                            value.push(c);
                        }
                    },
                    None => {
                        while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                            value.push(c);
                        }
                    },
                }
                Some(value)
            } else {
                None
            };
        attributes.push((name, value));
    }

    attributes
}

/// Whether `tag` (lowercase) starts at `pos`, case-insensitively, followed by
/// whitespace, `>`, or `/`.
fn starts_with_tag(bytes: &[u8], pos: usize, tag: &[u8]) -> bool {
    let Some(candidate) = bytes.get(pos..pos + tag.len()) else {
        return false;
    };
    candidate.eq_ignore_ascii_case(tag)
        && matches!(
            bytes.get(pos + tag.len()),
            Some(b' ' | b'\t' | b'\n' | b'\r' | b'>' | b'/'),
        )
}

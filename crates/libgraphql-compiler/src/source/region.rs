use crate::script::Script;

/// Which of the (at most two) script blocks of a component a region is.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum RegionRole {
    /// `<script context="module">`: runs once per module.
    Module,
    /// The plain `<script>` block: runs once per component instance.
    Instance,
}
impl RegionRole {
    /// The opening tag used when a region of this role has to be created.
    pub fn opening_tag(&self) -> &'static str {
        match self {
            Self::Module => "<script context=\"module\">",
            Self::Instance => "<script>",
        }
    }
}
impl std::fmt::Display for RegionRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Instance => write!(f, "instance"),
        }
    }
}

/// Where a region sat in the original text, captured once when the file is
/// split and never recomputed.
///
/// `start` is the byte offset of the opening tag's `<` and `end` the byte
/// offset of the closing tag's `>`. [`RegionOffsets::ABSENT`] (`0..0`) marks
/// a region the file did not have.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegionOffsets {
    start: usize,
    end: usize,
}
impl RegionOffsets {
    pub const ABSENT: Self = Self { start: 0, end: 0 };

    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn is_absent(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    pub fn start(&self) -> usize {
        self.start
    }
}

/// A region's live, mutable syntax tree together with the immutable offsets
/// it was parsed from.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub script: Script,
    offsets: RegionOffsets,
}
impl Region {
    pub fn new(script: Script, offsets: RegionOffsets) -> Self {
        Self { script, offsets }
    }

    /// An empty region that does not exist in the original file yet.
    pub fn fresh() -> Self {
        Self::new(Script::empty(), RegionOffsets::ABSENT)
    }

    pub fn offsets(&self) -> RegionOffsets {
        self.offsets
    }
}

/// The regions found in one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParsedRegions {
    pub module: Option<Region>,
    pub instance: Option<Region>,
}

/// A region's printed code, ready to be spliced into the original text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PrintedRegion {
    pub role: RegionRole,
    pub offsets: RegionOffsets,
    pub text: String,
}

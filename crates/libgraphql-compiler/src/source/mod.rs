//! Locating `<script>` regions inside a component file and splicing rewritten
//! code back into the original text.

mod region;
mod region_parse_error;
mod region_splitter;
mod splicer;

pub use region::ParsedRegions;
pub use region::PrintedRegion;
pub use region::Region;
pub use region::RegionOffsets;
pub use region::RegionRole;
pub use region_parse_error::RegionParseError;
pub use region_splitter::split_regions;
pub use splicer::SpliceError;
pub use splicer::insert_region;
pub use splicer::reconcile;
pub use splicer::splice;

#[cfg(test)]
mod tests;

//! Compiling collected documents into artifact modules.

#[allow(clippy::module_inception)]
mod artifact;
mod artifact_error;
mod filter_map;
mod generator;
mod selection_builder;
mod strip;

pub use artifact::Artifact;
pub use artifact::FilterOperation;
pub use artifact::OperationAction;
pub use artifact::SelectionNode;
pub use artifact_error::ArtifactError;
pub use artifact_error::FilterScanError;
pub use artifact_error::GenerateError;
pub use filter_map::FilterMap;
pub use filter_map::Filters;
pub use generator::GenerateReport;
pub use generator::WrittenArtifact;
pub use generator::build_artifact;
pub use generator::classify;
pub use generator::content_hash;
pub use generator::generate;
pub use generator::index_module;
pub use selection_builder::SelectionBuilder;
pub use strip::strip_internal_directives;

#[cfg(test)]
mod tests;

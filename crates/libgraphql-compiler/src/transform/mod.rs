//! The per-file transform pipeline and the stages that find, validate, and
//! rewrite GraphQL documents.

mod document_validator;
mod fragment_stage;
mod mutation_stage;
mod pipeline;
mod query_stage;
mod subscription_stage;
mod tagged_documents;
mod transform_context;
mod transform_error;
mod transform_stage;

pub use document_validator::DocumentValidator;
pub use document_validator::ValidationIssue;
pub(crate) use document_validator::operation_name;
pub use fragment_stage::FragmentStage;
pub use mutation_stage::MutationStage;
pub use pipeline::TransformOutput;
pub use pipeline::run;
pub use query_stage::QueryStage;
pub use subscription_stage::SubscriptionStage;
pub use transform_context::TransformContext;
pub use transform_error::TransformError;
pub use transform_stage::TransformStage;
pub use transform_stage::default_stages;

#[cfg(test)]
mod tests;

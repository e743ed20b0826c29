use crate::document::CollectedDocument;
use crate::transform::FragmentStage;
use crate::transform::MutationStage;
use crate::transform::QueryStage;
use crate::transform::SubscriptionStage;
use crate::transform::TransformContext;
use crate::transform::TransformError;

/// One step of the transform pipeline.
///
/// Stages run in order over the same [`TransformContext`]. A stage must only
/// touch the tagged templates of its own document kind: later stages see
/// earlier stages' rewrites. Stages may add code to a region or rewrite
/// template expressions, but never move region boundaries.
pub trait TransformStage: std::fmt::Debug + Send + Sync {
    fn name(&self) -> &'static str;

    /// Transform `ctx` in place, appending every document found to
    /// `documents`.
    fn transform(
        &self,
        ctx: &mut TransformContext<'_>,
        documents: &mut Vec<CollectedDocument>,
    ) -> Result<(), TransformError>;
}

/// The stages every component file goes through, in order.
pub fn default_stages() -> Vec<Box<dyn TransformStage>> {
    vec![
        Box::new(FragmentStage),
        Box::new(QueryStage),
        Box::new(MutationStage),
        Box::new(SubscriptionStage),
    ]
}

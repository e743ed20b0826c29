use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::transform::TransformContext;
use crate::transform::TransformError;
use crate::transform::TransformStage;
use crate::transform::tagged_documents::rewrite_tagged_documents;
use inherent::inherent;

/// Rewrites `subscription(graphql`...`)` to `subscription(_<Name>Artifact)`.
#[derive(Debug)]
pub struct SubscriptionStage;

#[inherent]
impl TransformStage for SubscriptionStage {
    pub fn name(&self) -> &'static str {
        "subscription"
    }

    pub fn transform(
        &self,
        ctx: &mut TransformContext<'_>,
        documents: &mut Vec<CollectedDocument>,
    ) -> Result<(), TransformError> {
        let config = ctx.config;
        rewrite_tagged_documents(ctx, DocumentKind::Subscription, documents, |_, name| {
            config.artifact_identifier(name)
        })?;
        Ok(())
    }
}

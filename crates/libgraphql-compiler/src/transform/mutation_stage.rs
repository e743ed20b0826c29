use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::transform::TransformContext;
use crate::transform::TransformError;
use crate::transform::TransformStage;
use crate::transform::tagged_documents::rewrite_tagged_documents;
use inherent::inherent;

/// Rewrites `mutation(graphql`...`)` to `mutation(_<Name>Artifact)`.
#[derive(Debug)]
pub struct MutationStage;

#[inherent]
impl TransformStage for MutationStage {
    pub fn name(&self) -> &'static str {
        "mutation"
    }

    pub fn transform(
        &self,
        ctx: &mut TransformContext<'_>,
        documents: &mut Vec<CollectedDocument>,
    ) -> Result<(), TransformError> {
        let config = ctx.config;
        rewrite_tagged_documents(ctx, DocumentKind::Mutation, documents, |_, name| {
            config.artifact_identifier(name)
        })?;
        Ok(())
    }
}

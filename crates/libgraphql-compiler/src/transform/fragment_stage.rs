use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::transform::TransformContext;
use crate::transform::TransformError;
use crate::transform::TransformStage;
use crate::transform::tagged_documents::rewrite_tagged_documents;
use inherent::inherent;

/// Rewrites `fragment(graphql`...`, ref)` to `fragment(_<Name>Artifact, ref)`.
#[derive(Debug)]
pub struct FragmentStage;

#[inherent]
impl TransformStage for FragmentStage {
    pub fn name(&self) -> &'static str {
        "fragment"
    }

    pub fn transform(
        &self,
        ctx: &mut TransformContext<'_>,
        documents: &mut Vec<CollectedDocument>,
    ) -> Result<(), TransformError> {
        let config = ctx.config;
        rewrite_tagged_documents(ctx, DocumentKind::Fragment, documents, |_, name| {
            config.artifact_identifier(name)
        })?;
        Ok(())
    }
}

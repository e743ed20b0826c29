use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::source::RegionRole;
use crate::transform::TransformContext;
use crate::transform::TransformError;
use crate::transform::TransformStage;
use crate::transform::tagged_documents::rewrite_tagged_documents;
use inherent::inherent;

/// Rewrites `query(graphql`...`)` calls.
///
/// A query in the module region becomes `query(_<Name>Artifact)`. A query in
/// the instance region is loaded before the component is created: the call
/// becomes `query(_<Name>Artifact, _<Name>)`, the component gains an
/// `export let _<Name>;` prop, and the module region (created if needed)
/// exports a `preload` function fetching every such query.
#[derive(Debug)]
pub struct QueryStage;

#[inherent]
impl TransformStage for QueryStage {
    pub fn name(&self) -> &'static str {
        "query"
    }

    pub fn transform(
        &self,
        ctx: &mut TransformContext<'_>,
        documents: &mut Vec<CollectedDocument>,
    ) -> Result<(), TransformError> {
        let config = ctx.config;
        let rewritten = rewrite_tagged_documents(
            ctx,
            DocumentKind::Query,
            documents,
            |role, name| match role {
                RegionRole::Module => config.artifact_identifier(name),
                RegionRole::Instance =>
                    format!("{}, _{name}", config.artifact_identifier(name)),
            },
        )?;

        let preloaded = rewritten.iter()
            .filter(|doc| doc.role == RegionRole::Instance)
            .map(|doc| doc.name.as_str())
            .collect::<Vec<_>>();
        if preloaded.is_empty() {
            return Ok(());
        }

        if let Some(instance) = ctx.instance.as_mut() {
            for name in &preloaded {
                instance.script.add_prelude_statement(format!("export let _{name};"));
            }
        }

        let module = ctx.module_or_insert();
        for name in &preloaded {
            module.script.add_import(
                config.artifact_identifier(name),
                config.artifact_import(name),
            );
        }
        module.script.add_import("{ fetchQuery }", config.runtime_alias.as_str());
        module.script.add_epilogue_statement(preload_function(
            preloaded.iter().map(|name| (*name, config.artifact_identifier(name))),
        ));

        Ok(())
    }
}

fn preload_function<'a>(queries: impl Iterator<Item = (&'a str, String)>) -> String {
    let mut function = String::from(
        "export async function preload(page, session) {\n    return {\n",
    );
    for (name, artifact) in queries {
        function.push_str(&format!(
            "        _{name}: await fetchQuery.call(this, {{ text: {artifact}.raw, \
            variables: {{}} }}),\n",
        ));
    }
    function.push_str("    };\n}");
    function
}

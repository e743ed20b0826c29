use crate::config::Config;
use crate::document::CollectedDocument;
use crate::document::RawDocument;
use crate::source;
use crate::source::PrintedRegion;
use crate::source::Region;
use crate::source::RegionRole;
use crate::transform::TransformContext;
use crate::transform::TransformError;
use crate::transform::TransformStage;

type Result<T> = std::result::Result<T, TransformError>;

/// What transforming one file produced.
#[derive(Clone, Debug, PartialEq)]
pub struct TransformOutput {
    /// The full rewritten file text.
    pub code: String,
    pub dependencies: Vec<String>,
    /// Every document the stages found, in the order they were found.
    pub documents: Vec<CollectedDocument>,
}
impl TransformOutput {
    /// Whether the rewritten file differs from `raw`.
    pub fn is_changed(&self, raw: &RawDocument) -> bool {
        self.code != raw.content
    }
}

/// Splits `raw` into its regions, runs every stage over them in order, and
/// splices the regions the stages changed back into the original text.
///
/// The first failing stage aborts the file; nothing about it is returned.
pub fn run(
    config: &Config,
    raw: &RawDocument,
    stages: &[Box<dyn TransformStage>],
) -> Result<TransformOutput> {
    let regions = source::split_regions(&raw.content, &config.graphql_tag)
        .map_err(|err| TransformError::Parse {
            filename: raw.filename.to_owned(),
            err,
        })?;

    let mut ctx = TransformContext::new(config, &raw.filename, regions);
    let mut documents = vec![];
    for stage in stages {
        log::debug!("{:?}: running the {} stage", raw.filename, stage.name());
        stage.transform(&mut ctx, &mut documents)?;
    }

    let code = source::reconcile(
        &raw.content,
        printed_region(RegionRole::Module, ctx.module.as_ref()),
        printed_region(RegionRole::Instance, ctx.instance.as_ref()),
    ).map_err(|err| TransformError::Splice {
        filename: raw.filename.to_owned(),
        err,
    })?;

    Ok(TransformOutput {
        code,
        dependencies: ctx.dependencies,
        documents,
    })
}

fn printed_region(role: RegionRole, region: Option<&Region>) -> Option<PrintedRegion> {
    region
        .filter(|region| region.script.is_modified())
        .map(|region| PrintedRegion {
            role,
            offsets: region.offsets(),
            text: region.script.print(),
        })
}

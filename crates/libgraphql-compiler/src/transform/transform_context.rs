use crate::config::Config;
use crate::source::ParsedRegions;
use crate::source::Region;
use std::path::Path;
use std::path::PathBuf;

/// The state one file's pipeline threads through every
/// [`TransformStage`](crate::transform::TransformStage).
#[derive(Debug)]
pub struct TransformContext<'config> {
    pub config: &'config Config,
    pub filename: PathBuf,
    pub module: Option<Region>,
    pub instance: Option<Region>,
    /// Files the rewritten code now requires, in the order they were first
    /// required.
    pub dependencies: Vec<String>,
}
impl<'config> TransformContext<'config> {
    pub fn new(
        config: &'config Config,
        filename: impl AsRef<Path>,
        regions: ParsedRegions,
    ) -> Self {
        Self {
            config,
            filename: filename.as_ref().to_path_buf(),
            module: regions.module,
            instance: regions.instance,
            dependencies: vec![],
        }
    }

    pub fn add_dependency(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.dependencies.contains(&path) {
            self.dependencies.push(path);
        }
    }

    /// The module region, created empty (to be inserted into the file) if the
    /// file does not have one yet.
    pub fn module_or_insert(&mut self) -> &mut Region {
        self.module.get_or_insert_with(Region::fresh)
    }
}

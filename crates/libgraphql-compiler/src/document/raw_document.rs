use crate::file_reader;
use std::path::Path;
use std::path::PathBuf;

/// One source file's text and the path it was read from.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RawDocument {
    pub filename: PathBuf,
    pub content: String,
}
impl RawDocument {
    pub fn new(filename: impl AsRef<Path>, content: impl Into<String>) -> Self {
        Self {
            filename: filename.as_ref().to_path_buf(),
            content: content.into(),
        }
    }

    pub fn from_file(
        file_path: impl AsRef<Path>,
    ) -> Result<Self, file_reader::ReadContentError> {
        let file_path = file_path.as_ref();
        Ok(Self::new(file_path, file_reader::read_content(file_path)?))
    }
}

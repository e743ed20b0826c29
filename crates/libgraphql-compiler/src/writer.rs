use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;

/// The file-system primitive every output of a compilation goes through.
pub trait FileWriter: Sync {
    fn write_file(&self, path: &Path, content: &str) -> std::io::Result<()>;
}

/// Writes to the real file system, creating parent directories as needed.
#[derive(Clone, Debug, Default)]
pub struct FsWriter;
impl FileWriter for FsWriter {
    fn write_file(&self, path: &Path, content: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)
    }
}

/// Collects written files in memory.
#[derive(Debug, Default)]
pub struct MemoryWriter {
    files: Mutex<BTreeMap<PathBuf, String>>,
}
impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every file written so far, ordered by path.
    pub fn files(&self) -> BTreeMap<PathBuf, String> {
        match self.files.lock() {
            Ok(files) => files.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn get(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files().get(path.as_ref()).cloned()
    }
}
impl FileWriter for MemoryWriter {
    fn write_file(&self, path: &Path, content: &str) -> std::io::Result<()> {
        let mut files = self.files.lock()
            .map_err(|_| std::io::Error::other("memory writer lock poisoned"))?;
        files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_writer_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("out.js");

        FsWriter.write_file(&path, "export default {};\n").unwrap();

        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "export default {};\n",
        );
    }

    #[test]
    fn memory_writer_overwrites() {
        let writer = MemoryWriter::new();
        writer.write_file(Path::new("a.js"), "1").unwrap();
        writer.write_file(Path::new("a.js"), "2").unwrap();

        assert_eq!(writer.get("a.js"), Some("2".to_string()));
        assert_eq!(writer.files().len(), 1);
    }
}

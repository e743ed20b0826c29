use crate::document::CollectedDocument;
use crate::document::NamingError;
use indexmap::IndexMap;
use std::collections::HashSet;
use std::path::PathBuf;

/// Gathers the documents each file's transform produced and merges them
/// into one set whose names are unique.
#[derive(Debug, Default)]
pub struct DocumentCollector {
    files: Vec<(PathBuf, Vec<CollectedDocument>)>,
}

/// The result of [`DocumentCollector::finish()`].
#[derive(Debug, Default)]
pub struct CollectedDocuments {
    pub documents: Vec<CollectedDocument>,
    /// One error per file that used a name some other file also used.
    pub naming_errors: Vec<(PathBuf, NamingError)>,
}

impl DocumentCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, filename: PathBuf, documents: Vec<CollectedDocument>) {
        self.files.push((filename, documents));
    }

    /// Merge every added file's documents.
    ///
    /// A name used by more than one file fails *every* file using it, so no
    /// artifact is produced for that name regardless of the order files were
    /// added in.
    pub fn finish(self) -> CollectedDocuments {
        let mut files_by_name = IndexMap::<&str, Vec<PathBuf>>::new();
        for (filename, documents) in &self.files {
            for doc in documents {
                files_by_name.entry(doc.name.as_str())
                    .or_default()
                    .push(filename.to_owned());
            }
        }

        let mut naming_errors = vec![];
        let mut failed_files = HashSet::new();
        for (filename, documents) in &self.files {
            let duplicate = documents.iter().find_map(|doc| {
                let files = &files_by_name[doc.name.as_str()];
                (files.len() > 1).then(|| (doc.name.to_string(), files.to_owned()))
            });
            if let Some((name, files)) = duplicate {
                naming_errors.push((
                    filename.to_owned(),
                    NamingError::DuplicateName { name, files },
                ));
                failed_files.insert(filename.to_owned());
            }
        }

        let documents = self.files.into_iter()
            .filter(|(filename, _)| !failed_files.contains(filename))
            .flat_map(|(_, documents)| documents)
            .collect();

        CollectedDocuments {
            documents,
            naming_errors,
        }
    }
}

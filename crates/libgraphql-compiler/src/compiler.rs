use crate::artifact;
use crate::artifact::GenerateError;
use crate::artifact::GenerateReport;
use crate::config::Config;
use crate::document::DocumentCollector;
use crate::document::NamingError;
use crate::document::RawDocument;
use crate::framework::write_adapter;
use crate::transform;
use crate::transform::TransformError;
use crate::transform::TransformOutput;
use crate::writer::FileWriter;
use rayon::prelude::*;
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// What happened to every file and document of a [`compile()`] run.
#[derive(Debug)]
pub struct CompileReport {
    /// One entry per source, in input order.
    pub files: Vec<FileReport>,
    pub artifacts: GenerateReport,
}
impl CompileReport {
    pub fn failed_files(&self) -> impl Iterator<Item = &FileError> {
        self.files.iter().filter_map(|file| file.outcome.as_ref().err())
    }

    pub fn is_success(&self) -> bool {
        self.failed_files().next().is_none() && self.artifacts.is_success()
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub filename: PathBuf,
    pub outcome: Result<TransformedFile, FileError>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformedFile {
    pub dependencies: Vec<String>,
    /// Names of the documents found in the file.
    pub documents: Vec<String>,
    /// Whether the rewritten text was written back to the file.
    pub rewritten: bool,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FileError {
    #[error("{filename:?}: {err}")]
    Naming {
        filename: PathBuf,
        err: NamingError,
    },

    #[error(transparent)]
    Transform(#[from] TransformError),

    #[error("failed to write {filename:?}: {err}")]
    Write {
        filename: PathBuf,
        err: String,
    },
}

/// Failures that stop a whole run. Everything else is reported per file or
/// per document in the [`CompileReport`].
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CompileError {
    #[error("failed to write the framework adapter {path:?}: {err}")]
    AdapterWrite {
        path: PathBuf,
        err: String,
    },

    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Transforms every source, then compiles every document found into
/// artifacts.
///
/// Files are transformed in parallel. Their documents are merged once all of
/// them are done, so a document name used in two files fails both files no
/// matter which finished first. A failed file contributes no documents and is
/// never rewritten.
pub fn compile(
    config: &Config,
    sources: &[RawDocument],
    writer: &dyn FileWriter,
) -> Result<CompileReport, CompileError> {
    let stages = transform::default_stages();
    let outputs = sources.par_iter()
        .map(|raw| transform::run(config, raw, &stages))
        .collect::<Vec<_>>();

    let mut collector = DocumentCollector::new();
    for (raw, output) in sources.iter().zip(&outputs) {
        if let Ok(output) = output {
            collector.add_file(raw.filename.to_owned(), output.documents.to_owned());
        }
    }
    let collected = collector.finish();
    let mut naming_errors = collected.naming_errors.into_iter()
        .collect::<HashMap<PathBuf, NamingError>>();

    let mut files = vec![];
    for (raw, output) in sources.iter().zip(outputs) {
        let outcome = match output {
            Err(err) => Err(FileError::Transform(err)),
            Ok(output) => match naming_errors.remove(&raw.filename) {
                Some(err) => Err(FileError::Naming {
                    filename: raw.filename.to_owned(),
                    err,
                }),
                None => finish_file(config, raw, output, writer),
            },
        };
        if let Err(err) = &outcome {
            log::warn!("{err}");
        }
        files.push(FileReport {
            filename: raw.filename.to_owned(),
            outcome,
        });
    }

    let artifacts = artifact::generate(config, &collected.documents, writer)?;

    let adapter_path = config.adapter_path();
    write_adapter(config, writer).map_err(|err| CompileError::AdapterWrite {
        path: adapter_path,
        err: err.to_string(),
    })?;

    if !config.quiet {
        log::info!(
            "compiled {} document(s) from {} file(s)",
            artifacts.written.len(),
            files.iter().filter(|file| file.outcome.is_ok()).count(),
        );
    }

    Ok(CompileReport { files, artifacts })
}

fn finish_file(
    config: &Config,
    raw: &RawDocument,
    output: TransformOutput,
    writer: &dyn FileWriter,
) -> Result<TransformedFile, FileError> {
    let rewritten = config.write_sources && output.is_changed(raw);
    if rewritten {
        writer.write_file(&raw.filename, &output.code)
            .map_err(|err| FileError::Write {
                filename: raw.filename.to_owned(),
                err: err.to_string(),
            })?;
    }
    Ok(TransformedFile {
        dependencies: output.dependencies,
        documents: output.documents.into_iter().map(|doc| doc.name).collect(),
        rewritten,
    })
}

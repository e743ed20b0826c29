use crate::artifact::Artifact;
use crate::artifact::ArtifactError;
use crate::artifact::FilterMap;
use crate::artifact::GenerateError;
use crate::artifact::SelectionBuilder;
use crate::artifact::strip_internal_directives;
use crate::ast;
use crate::config::Config;
use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::writer::FileWriter;
use rayon::prelude::*;
use sha2::Digest;
use sha2::Sha256;
use std::collections::BTreeMap;
use std::collections::HashMap;
use std::path::PathBuf;

type Result<T> = std::result::Result<T, ArtifactError>;

/// What [`generate()`] did for each document, in input order.
#[derive(Debug, Default)]
pub struct GenerateReport {
    pub written: Vec<WrittenArtifact>,
    pub failed: Vec<ArtifactError>,
}
impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WrittenArtifact {
    pub name: String,
    pub kind: DocumentKind,
    pub hash: String,
    pub path: PathBuf,
}

/// Compiles every document into an artifact file, then writes the artifact
/// index.
///
/// Documents are compiled in parallel once connection filters have been
/// gathered from all of them. A document that fails to compile is reported
/// and skipped; only a connection scan failure or a failure to write the
/// index fails the whole generation.
pub fn generate(
    config: &Config,
    documents: &[CollectedDocument],
    writer: &dyn FileWriter,
) -> std::result::Result<GenerateReport, GenerateError> {
    let filter_map = FilterMap::scan(config, documents)?;

    let mut fragments = HashMap::new();
    for doc in documents {
        for def in &doc.original_document.definitions {
            if let ast::query::Definition::Fragment(frag_def) = def {
                fragments.entry(frag_def.name.to_string()).or_insert(frag_def);
            }
        }
    }

    let outcomes = documents.par_iter()
        .map(|doc| {
            let artifact = build_artifact(config, &filter_map, &fragments, doc)?;
            write_artifact(config, &artifact, writer)
        })
        .collect::<Vec<_>>();

    let mut report = GenerateReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(written) => {
                log::debug!("wrote the `{}` artifact to {:?}", written.name, written.path);
                report.written.push(written);
            },
            Err(err) => {
                log::warn!("{err}");
                report.failed.push(err);
            },
        }
    }

    let index_path = config.index_path();
    writer.write_file(&index_path, &index_module(&report.written))
        .map_err(|err| GenerateError::IndexWrite {
            path: index_path.to_owned(),
            err: err.to_string(),
        })?;

    Ok(report)
}

/// Compiles one document.
pub fn build_artifact(
    config: &Config,
    filter_map: &FilterMap,
    fragments: &HashMap<String, &ast::query::FragmentDefinition>,
    doc: &CollectedDocument,
) -> Result<Artifact> {
    let kind = classify(doc)?;

    let mut document = doc.original_document.clone();
    let appended = match kind {
        DocumentKind::Fragment => 0,
        _ => append_spread_fragments(doc, &mut document, fragments)?,
    };

    let raw = if appended == 0 {
        doc.printed.to_string()
    } else {
        let mut stripped = document.clone();
        strip_internal_directives(config, &mut stripped);
        stripped.to_string()
    };

    let mut own_fragments = fragments.clone();
    for def in &document.definitions {
        if let ast::query::Definition::Fragment(frag_def) = def {
            own_fragments.insert(frag_def.name.to_string(), frag_def);
        }
    }
    let builder = SelectionBuilder {
        config,
        document: doc.name.as_str(),
        filter_map,
        fragments: &own_fragments,
        include_fragments: kind != DocumentKind::Fragment,
    };

    let (root_type, selection) = match kind {
        DocumentKind::Fragment => {
            let frag_def = document.definitions.iter()
                .filter_map(|def| match def {
                    ast::query::Definition::Fragment(frag_def) => Some(frag_def),
                    ast::query::Definition::Operation(_) => None,
                })
                .find(|frag_def| frag_def.name == doc.name)
                .or_else(|| own_fragments.get(doc.name.as_str()).copied());
            let Some(frag_def) = frag_def else {
                return Err(ArtifactError::UndefinedFragment {
                    document: doc.name.to_string(),
                    fragment: doc.name.to_string(),
                });
            };
            let ast::query::TypeCondition::On(type_name) = &frag_def.type_condition;
            (type_name.to_string(), builder.build(type_name, &frag_def.selection_set)?)
        },

        _ => {
            let root_type = root_type_name(config, kind).ok_or_else(|| {
                ArtifactError::MissingRootType {
                    document: doc.name.to_string(),
                    kind,
                }
            })?;
            let selection_set = document.definitions.iter()
                .find_map(|def| match def {
                    ast::query::Definition::Operation(op_def) => Some(selection_set(op_def)),
                    ast::query::Definition::Fragment(_) => None,
                });
            let selection = match selection_set {
                Some(selection_set) => builder.build(root_type, selection_set)?,
                None => vec![],
            };
            (root_type.to_string(), selection)
        },
    };

    Ok(Artifact {
        name: doc.name.to_string(),
        kind,
        hash: content_hash(&raw),
        raw,
        root_type,
        selection,
    })
}

/// Lowercase hex SHA-256 of `text`.
pub fn content_hash(text: &str) -> String {
    format!("{:x}", Sha256::digest(text.as_bytes()))
}

/// One operation (with any number of fragments) is that operation's kind;
/// only fragments is a fragment document; anything else is an error.
pub fn classify(doc: &CollectedDocument) -> Result<DocumentKind> {
    let mut operations = vec![];
    let mut fragments = 0;
    for def in &doc.document.definitions {
        match def {
            ast::query::Definition::Fragment(_) => fragments += 1,
            ast::query::Definition::Operation(op_def) => operations.push(op_def),
        }
    }

    match operations.as_slice() {
        [op_def] => Ok(DocumentKind::of_operation(op_def)),
        [] if fragments > 0 => Ok(DocumentKind::Fragment),
        _ => Err(ArtifactError::Classification {
            document: doc.name.to_string(),
            operations: operations.len(),
            fragments,
        }),
    }
}

/// Appends the definitions of every fragment `document` spreads (directly or
/// through other fragments) but does not define, in first-use order. Returns
/// how many definitions were appended.
fn append_spread_fragments(
    doc: &CollectedDocument,
    document: &mut ast::query::Document,
    fragments: &HashMap<String, &ast::query::FragmentDefinition>,
) -> Result<usize> {
    let mut defined = document.definitions.iter()
        .filter_map(|def| match def {
            ast::query::Definition::Fragment(frag_def) => Some(frag_def.name.to_string()),
            ast::query::Definition::Operation(_) => None,
        })
        .collect::<Vec<_>>();

    let mut pending = vec![];
    for def in &document.definitions {
        collect_spreads(definition_selection_set(def), &mut pending);
    }

    let mut appended = vec![];
    let mut cursor = 0;
    while cursor < pending.len() {
        let name = pending[cursor].to_string();
        cursor += 1;
        if defined.contains(&name) {
            continue;
        }
        let Some(frag_def) = fragments.get(name.as_str()) else {
            return Err(ArtifactError::UndefinedFragment {
                document: doc.name.to_string(),
                fragment: name,
            });
        };
        collect_spreads(&frag_def.selection_set, &mut pending);
        appended.push(ast::query::Definition::Fragment((*frag_def).clone()));
        defined.push(name);
    }

    let count = appended.len();
    document.definitions.extend(appended);
    Ok(count)
}

fn collect_spreads(selection_set: &ast::query::SelectionSet, out: &mut Vec<String>) {
    for selection in &selection_set.items {
        match selection {
            ast::query::Selection::Field(field) => collect_spreads(&field.selection_set, out),
            ast::query::Selection::FragmentSpread(spread) => {
                if !out.contains(&spread.fragment_name) {
                    out.push(spread.fragment_name.to_string());
                }
            },
            ast::query::Selection::InlineFragment(inline) =>
                collect_spreads(&inline.selection_set, out),
        }
    }
}

fn definition_selection_set(def: &ast::query::Definition) -> &ast::query::SelectionSet {
    match def {
        ast::query::Definition::Fragment(frag_def) => &frag_def.selection_set,
        ast::query::Definition::Operation(op_def) => selection_set(op_def),
    }
}

fn selection_set(op_def: &ast::query::OperationDefinition) -> &ast::query::SelectionSet {
    match op_def {
        ast::query::OperationDefinition::SelectionSet(selection_set) => selection_set,
        ast::query::OperationDefinition::Query(query) => &query.selection_set,
        ast::query::OperationDefinition::Mutation(mutation) => &mutation.selection_set,
        ast::query::OperationDefinition::Subscription(subscription) =>
            &subscription.selection_set,
    }
}

fn root_type_name(config: &Config, kind: DocumentKind) -> Option<&str> {
    match kind {
        DocumentKind::Query => Some(config.schema.query_type_name()),
        DocumentKind::Mutation => config.schema.mutation_type_name(),
        DocumentKind::Subscription => config.schema.subscription_type_name(),
        DocumentKind::Fragment => None,
    }
}

fn write_artifact(
    config: &Config,
    artifact: &Artifact,
    writer: &dyn FileWriter,
) -> Result<WrittenArtifact> {
    let module = artifact.to_module().map_err(|err| ArtifactError::Serialize {
        document: artifact.name.to_string(),
        err: err.to_string(),
    })?;
    let path = config.artifact_path(&artifact.name);
    writer.write_file(&path, &module).map_err(|err| ArtifactError::Write {
        document: artifact.name.to_string(),
        path: path.to_owned(),
        err: err.to_string(),
    })?;

    Ok(WrittenArtifact {
        name: artifact.name.to_string(),
        kind: artifact.kind,
        hash: artifact.hash.to_string(),
        path,
    })
}

/// `index.js`: a `documents` map of artifact name to kind and one re-export
/// per artifact, both sorted by name.
pub fn index_module(written: &[WrittenArtifact]) -> String {
    let documents = written.iter()
        .map(|artifact| (artifact.name.as_str(), artifact.kind))
        .collect::<BTreeMap<_, _>>();

    // Serializing a map of strings to unit variants cannot fail.
    let documents_json = serde_json::to_string_pretty(&documents)
        .unwrap_or_else(|_| "{}".to_string());

    let mut index = format!("export const documents = {documents_json};\n");
    if !documents.is_empty() {
        index.push('\n');
    }
    for name in documents.keys() {
        index.push_str(&format!("export {{ default as {name} }} from \"./{name}.js\";\n"));
    }
    index
}

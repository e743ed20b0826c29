use crate::ast;
use crate::config::Config;
use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::document::NamingError;
use crate::source::RegionRole;
use crate::transform::DocumentValidator;
use crate::transform::TransformContext;
use crate::transform::TransformError;
use crate::transform::ValidationIssue;
use crate::transform::operation_name;
use std::path::Path;

type Result<T> = std::result::Result<T, TransformError>;

/// A document a stage found and rewrote.
#[derive(Debug)]
pub(super) struct RewrittenDocument {
    pub role: RegionRole,
    pub name: String,
}

/// Finds every template of `kind` (by callee) in both regions, validates and
/// names it, records it in `documents`, and rewrites it to whatever
/// `replacement` returns for its region and document name.
///
/// Each rewritten document's artifact is imported into the region it was
/// found in and its artifact path is added to the context's dependencies.
pub(super) fn rewrite_tagged_documents(
    ctx: &mut TransformContext<'_>,
    kind: DocumentKind,
    documents: &mut Vec<CollectedDocument>,
    replacement: impl Fn(RegionRole, &str) -> String,
) -> Result<Vec<RewrittenDocument>> {
    let config = ctx.config;
    let filename = ctx.filename.to_owned();
    let mut rewritten = vec![];

    for (role, region) in [
        (RegionRole::Module, ctx.module.as_mut()),
        (RegionRole::Instance, ctx.instance.as_mut()),
    ] {
        let Some(region) = region else { continue };

        let mut found = vec![];
        for template in region.script.tagged_templates_mut() {
            if template.is_rewritten() || template.callee() != Some(kind.callee()) {
                continue;
            }

            let document = parse_and_validate(&filename, config, kind, template.body())?;
            let name = document_name(kind, &document).map_err(|err| TransformError::Naming {
                filename: filename.to_owned(),
                err,
            })?;
            if documents.iter().any(|doc| doc.name == name) {
                return Err(TransformError::Naming {
                    filename: filename.to_owned(),
                    err: NamingError::DuplicateName {
                        name,
                        files: vec![filename.to_owned()],
                    },
                });
            }

            log::debug!("{filename:?}: found {kind} `{name}` in the {role} region");
            template.rewrite(replacement(role, name.as_str()));
            documents.push(CollectedDocument::new(
                config,
                filename.to_owned(),
                name.to_owned(),
                kind,
                document,
            ));
            found.push(name);
        }

        for name in found {
            region.script.add_import(
                config.artifact_identifier(&name),
                config.artifact_import(&name),
            );
            rewritten.push(RewrittenDocument { role, name });
        }
    }

    for doc in &rewritten {
        ctx.add_dependency(config.artifact_path(&doc.name).display().to_string());
    }

    Ok(rewritten)
}

fn parse_and_validate(
    filename: &Path,
    config: &Config,
    kind: DocumentKind,
    body: &str,
) -> Result<ast::query::Document> {
    let document = ast::query::parse(body).map_err(|err| TransformError::Validation {
        filename: filename.to_path_buf(),
        document_name: None,
        issues: vec![ValidationIssue {
            message: err.to_string(),
            position: ast::Pos { line: 1, column: 1 },
        }],
    })?;

    let issues = DocumentValidator::validate(config, &document);
    if !issues.is_empty() {
        return Err(TransformError::Validation {
            filename: filename.to_path_buf(),
            document_name: document_name(kind, &document).ok(),
            issues,
        });
    }

    Ok(document)
}

/// The name of the single definition of `kind` a tagged document must hold.
fn document_name(
    kind: DocumentKind,
    document: &ast::query::Document,
) -> std::result::Result<String, NamingError> {
    let mut operations = vec![];
    let mut fragments = vec![];
    for def in &document.definitions {
        match def {
            ast::query::Definition::Fragment(frag_def) => fragments.push(frag_def),
            ast::query::Definition::Operation(op_def) => operations.push(op_def),
        }
    }

    let unexpected = |found: Option<DocumentKind>| NamingError::UnexpectedDefinitions {
        expected: kind,
        found,
        operations: operations.len(),
        fragments: fragments.len(),
    };

    match (kind, operations.as_slice(), fragments.as_slice()) {
        (DocumentKind::Fragment, [], [frag_def]) => Ok(frag_def.name.to_string()),
        (DocumentKind::Fragment, ops, _) =>
            Err(unexpected(ops.first().map(|op_def| DocumentKind::of_operation(op_def)))),

        (_, [op_def], _) => {
            let found = DocumentKind::of_operation(op_def);
            if found != kind {
                return Err(unexpected(Some(found)));
            }
            match operation_name(op_def) {
                Some(name) if !name.is_empty() => Ok(name.to_string()),
                _ => Err(NamingError::MissingName { kind }),
            }
        },

        (_, ops, _) =>
            Err(unexpected(ops.first().map(|op_def| DocumentKind::of_operation(op_def)))),
    }
}

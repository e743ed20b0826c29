use crate::ast;
use crate::document::CollectedDocument;
use crate::document::DocumentCollector;
use crate::document::DocumentKind;
use crate::document::NamingError;
use crate::config::Config;
use crate::schema::SchemaBuilder;
use std::path::PathBuf;

fn test_config() -> Config {
    let schema = SchemaBuilder::build_from_str(
        "type Query { version: String users(first: Int): [String] }",
    ).unwrap();
    Config::new(schema, "src/runtime")
}

fn query_doc(file: &str, name: &str) -> CollectedDocument {
    let document = ast::query::parse(&format!("query {name} {{ version }}")).unwrap();
    CollectedDocument::new(
        &test_config(),
        PathBuf::from(file),
        name.to_string(),
        DocumentKind::Query,
        document,
    )
}

#[test]
fn unique_names_are_all_kept_in_file_order() {
    let mut collector = DocumentCollector::new();
    collector.add_file("a.svelte".into(), vec![query_doc("a.svelte", "A")]);
    collector.add_file("b.svelte".into(), vec![
        query_doc("b.svelte", "B1"),
        query_doc("b.svelte", "B2"),
    ]);

    let collected = collector.finish();

    assert!(collected.naming_errors.is_empty());
    assert_eq!(
        collected.documents.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        vec!["A", "B1", "B2"],
    );
}

#[test]
fn duplicate_names_fail_every_file_using_them() {
    let mut collector = DocumentCollector::new();
    collector.add_file("a.svelte".into(), vec![
        query_doc("a.svelte", "Shared"),
        query_doc("a.svelte", "OnlyA"),
    ]);
    collector.add_file("b.svelte".into(), vec![query_doc("b.svelte", "Shared")]);
    collector.add_file("c.svelte".into(), vec![query_doc("c.svelte", "OnlyC")]);

    let collected = collector.finish();

    let files = vec![PathBuf::from("a.svelte"), PathBuf::from("b.svelte")];
    assert_eq!(collected.naming_errors, vec![
        (PathBuf::from("a.svelte"), NamingError::DuplicateName {
            name: "Shared".to_string(),
            files: files.clone(),
        }),
        (PathBuf::from("b.svelte"), NamingError::DuplicateName {
            name: "Shared".to_string(),
            files,
        }),
    ]);
    assert_eq!(
        collected.documents.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
        vec!["OnlyC"],
    );
}

#[test]
fn internal_directives_are_stripped_from_the_runtime_document() {
    let written = ast::query::parse(
        "query Friends { users(first: 5) @connection(name: \"All\") { id } }",
    ).unwrap();
    let doc = CollectedDocument::new(
        &test_config(),
        PathBuf::from("a.svelte"),
        "Friends".to_string(),
        DocumentKind::Query,
        written.clone(),
    );

    assert_eq!(doc.original_document, written);
    assert_eq!(
        doc.printed,
        ast::query::parse("query Friends { users(first: 5) { id } }").unwrap().to_string(),
    );
    assert_eq!(doc.printed, doc.document.to_string());
}

use crate::artifact::ArtifactError;
use crate::artifact::FilterMap;
use crate::artifact::GenerateError;
use crate::artifact::FilterScanError;
use crate::artifact::build_artifact;
use crate::artifact::classify;
use crate::artifact::content_hash;
use crate::artifact::generate;
use crate::artifact::tests::doc;
use crate::artifact::tests::test_config;
use crate::ast;
use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::schema::SchemaBuilder;
use crate::writer::MemoryWriter;
use std::collections::HashMap;
use std::path::PathBuf;

fn printed(text: &str) -> String {
    ast::query::parse(text).unwrap().to_string()
}

#[test]
fn query_artifact() {
    let config = test_config();
    let query = doc("AllUsers", DocumentKind::Query,
        "query AllUsers { users(first: 10) @connection(name: \"All\") { id name } version }",
    );

    let artifact = build_artifact(
        &config,
        &FilterMap::new(),
        &HashMap::new(),
        &query,
    ).unwrap();

    assert_eq!(artifact.name, "AllUsers");
    assert_eq!(artifact.kind, DocumentKind::Query);
    assert_eq!(artifact.root_type, "Query");
    assert_eq!(artifact.raw, printed("query AllUsers { users(first: 10) { id name } version }"));
    assert_eq!(artifact.hash, content_hash(&artifact.raw));
    assert_eq!(artifact.hash.len(), 64);
    assert_eq!(
        artifact.selection.iter().map(|node| node.field_name.as_str()).collect::<Vec<_>>(),
        vec!["users", "version"],
    );
}

#[test]
fn hash_is_sha256_of_the_raw_text() {
    assert_eq!(
        content_hash(""),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
    );
    assert_eq!(content_hash("query A { id }"), content_hash("query A { id }"));
    assert_ne!(content_hash("query A { id }"), content_hash("query B { id }"));
}

#[test]
fn hash_ignores_insignificant_whitespace() {
    let config = test_config();
    let compact = doc("V", DocumentKind::Query, "query V{version}");
    let spaced = doc("V", DocumentKind::Query, "query V {\n\n    version\n}\n");

    let compact = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &compact).unwrap();
    let spaced = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &spaced).unwrap();

    assert_eq!(compact.hash, spaced.hash);
}

#[test]
fn fragment_artifact_uses_its_type_condition() {
    let config = test_config();
    let fragment = doc("UserInfo", DocumentKind::Fragment,
        "fragment UserInfo on User { id ...Avatar }",
    );

    let artifact = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &fragment)
        .unwrap();

    assert_eq!(artifact.kind, DocumentKind::Fragment);
    assert_eq!(artifact.root_type, "User");
    assert_eq!(artifact.raw, printed("fragment UserInfo on User { id ...Avatar }"));
    assert_eq!(artifact.selection.len(), 1);
}

#[test]
fn operations_are_completed_with_spread_fragments() {
    let config = test_config();
    let info = doc("Info", DocumentKind::Fragment, "fragment Info on User { name ...Deep }");
    let deep = doc("Deep", DocumentKind::Fragment, "fragment Deep on User { id }");
    let query = doc("Viewer", DocumentKind::Query, "query Viewer { viewer { ...Info } }");
    let mut fragments = HashMap::new();
    for d in [&info, &deep] {
        if let ast::query::Definition::Fragment(frag_def) = &d.original_document.definitions[0] {
            fragments.insert(frag_def.name.to_string(), frag_def);
        }
    }

    let artifact = build_artifact(&config, &FilterMap::new(), &fragments, &query).unwrap();

    assert_eq!(artifact.raw, printed("
        query Viewer { viewer { ...Info } }
        fragment Info on User { name ...Deep }
        fragment Deep on User { id }
    "));
    let viewer = &artifact.selection[0];
    assert_eq!(
        viewer.selection.as_ref().unwrap().iter()
            .map(|node| node.field_name.as_str())
            .collect::<Vec<_>>(),
        vec!["name", "id"],
    );
}

#[test]
fn spreading_an_unknown_fragment_fails() {
    let config = test_config();
    let query = doc("Viewer", DocumentKind::Query, "query Viewer { viewer { ...Info } }");

    let err = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &query).unwrap_err();

    assert_eq!(err, ArtifactError::UndefinedFragment {
        document: "Viewer".to_string(),
        fragment: "Info".to_string(),
    });
}

#[test]
fn classification() {
    let query = doc("Q", DocumentKind::Query, "query Q { version } fragment F on User { id }");
    let fragments = doc("F", DocumentKind::Fragment, "fragment F on User { id } fragment G on User { id }");
    let mixed = doc("M", DocumentKind::Query, "query A { version } query B { version }");

    assert_eq!(classify(&query), Ok(DocumentKind::Query));
    assert_eq!(classify(&fragments), Ok(DocumentKind::Fragment));
    assert_eq!(classify(&mixed), Err(ArtifactError::Classification {
        document: "M".to_string(),
        operations: 2,
        fragments: 0,
    }));
}

#[test]
fn missing_root_type_fails_the_document() {
    let config = test_config();
    let subscription = doc("S", DocumentKind::Subscription, "subscription S { version }");

    let err = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &subscription)
        .unwrap_err();

    assert_eq!(err, ArtifactError::MissingRootType {
        document: "S".to_string(),
        kind: DocumentKind::Subscription,
    });
}

#[test]
fn artifact_module_format() {
    let mut config = test_config();
    config.schema = SchemaBuilder::build_from_str("type Query { version: String }").unwrap();
    let query = doc("Version", DocumentKind::Query, "query Version { v: version }");

    let artifact = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &query).unwrap();
    let module = artifact.to_module().unwrap();

    let body = module.strip_prefix("export default ").unwrap()
        .strip_suffix(";\n").unwrap();
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap();
    assert_eq!(parsed, serde_json::json!({
        "name": "Version",
        "kind": "query",
        "hash": artifact.hash,
        "raw": artifact.raw,
        "rootType": "Query",
        "selection": [{
            "fieldType": "String",
            "fieldName": "version",
            "alias": "v",
        }],
    }));
}

#[test]
fn generate_writes_artifacts_and_index() {
    let config = test_config();
    let docs = vec![
        doc("Viewer", DocumentKind::Query, "query Viewer { viewer { id } }"),
        doc("AddFriend", DocumentKind::Mutation,
            "mutation AddFriend { addFriend(id: \"1\") { id } }"),
    ];
    let writer = MemoryWriter::new();

    let report = generate(&config, &docs, &writer).unwrap();

    assert!(report.is_success());
    assert_eq!(
        report.written.iter().map(|w| w.name.as_str()).collect::<Vec<_>>(),
        vec!["Viewer", "AddFriend"],
    );
    let files = writer.files();
    assert_eq!(
        files.keys().cloned().collect::<Vec<_>>(),
        vec![
            PathBuf::from("runtime/artifacts/AddFriend.js"),
            PathBuf::from("runtime/artifacts/Viewer.js"),
            PathBuf::from("runtime/artifacts/index.js"),
        ],
    );
    assert!(files[&PathBuf::from("runtime/artifacts/Viewer.js")]
        .starts_with("export default {\n"));
    assert_eq!(files[&PathBuf::from("runtime/artifacts/index.js")], [
        "export const documents = {",
        "  \"AddFriend\": \"mutation\",",
        "  \"Viewer\": \"query\"",
        "};",
        "",
        "export { default as AddFriend } from \"./AddFriend.js\";",
        "export { default as Viewer } from \"./Viewer.js\";",
        "",
    ].join("\n"));
}

#[test]
fn failed_documents_do_not_block_the_others() {
    let config = test_config();
    let docs = vec![
        doc("Broken", DocumentKind::Query, "query Broken { viewer { age } }"),
        doc("Fine", DocumentKind::Query, "query Fine { version }"),
    ];
    let writer = MemoryWriter::new();

    let report = generate(&config, &docs, &writer).unwrap();

    assert!(!report.is_success());
    assert_eq!(report.failed, vec![ArtifactError::UndefinedField {
        document: "Broken".to_string(),
        parent_type: "User".to_string(),
        field_name: "age".to_string(),
    }]);
    assert_eq!(report.written.len(), 1);
    assert!(writer.get("runtime/artifacts/Broken.js").is_none());
    assert!(writer.get("runtime/artifacts/Fine.js").is_some());
}

#[test]
fn filter_scan_failure_aborts_generation() {
    let config = test_config();
    let docs = vec![
        doc("Fine", DocumentKind::Query, "query Fine { version }"),
        doc("NoName", DocumentKind::Query, "query NoName { users @connection { id } }"),
    ];
    let writer = MemoryWriter::new();

    let err = generate(&config, &docs, &writer).unwrap_err();

    assert!(matches!(
        err,
        GenerateError::FilterScan(FilterScanError::MissingConnectionName { .. }),
    ));
    assert!(writer.files().is_empty());
}

#[test]
fn schema_directives_with_operation_suffixes_reach_the_runtime() {
    let schema = SchemaBuilder::build_from_str(concat!(
        "directive @soft_delete on FIELD\n",
        "type Query { version: String }\n",
    )).unwrap();
    let config = crate::config::Config::new(schema, "runtime");
    let query = CollectedDocument::new(
        &config,
        PathBuf::from("src/Versioned.svelte"),
        "Versioned".to_string(),
        DocumentKind::Query,
        ast::query::parse("query Versioned { version @soft_delete }").unwrap(),
    );

    let artifact = build_artifact(&config, &FilterMap::new(), &HashMap::new(), &query).unwrap();

    assert_eq!(artifact.raw, printed("query Versioned { version @soft_delete }"));
    assert_eq!(artifact.selection.len(), 1);
    assert_eq!(artifact.selection[0].operations, None);
}

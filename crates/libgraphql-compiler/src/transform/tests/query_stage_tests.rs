use crate::document::DocumentKind;
use crate::document::RawDocument;
use crate::transform::QueryStage;
use crate::transform::TransformStage;
use crate::transform::default_stages;
use crate::transform::run;
use crate::transform::tests::test_config;

#[test]
fn instance_query_is_preloaded_from_a_new_module_region() {
    let config = test_config();
    let source = RawDocument::new(
        "src/routes/users.svelte",
        "<script>\n    const data = query(graphql`query AllUsers { users { id } }`);\n</script>\n<h1>hi</h1>",
    );

    let output = run(&config, &source, &default_stages()).unwrap();

    assert_eq!(output.code, [
        "<script context=\"module\">",
        "import _AllUsersArtifact from \"$houdini/artifacts/AllUsers\";",
        "import { fetchQuery } from \"$houdini\";",
        "export async function preload(page, session) {",
        "    return {",
        "        _AllUsers: await fetchQuery.call(this, { text: _AllUsersArtifact.raw, variables: {} }),",
        "    };",
        "}",
        "</script>",
        "<script>",
        "import _AllUsersArtifact from \"$houdini/artifacts/AllUsers\";",
        "export let _AllUsers;",
        "    const data = query(_AllUsersArtifact, _AllUsers);",
        "</script>",
        "<h1>hi</h1>",
    ].join("\n"));
    assert_eq!(output.dependencies, vec![
        "src/runtime/artifacts/AllUsers.js".to_string(),
    ]);
    assert_eq!(output.documents[0].kind, DocumentKind::Query);
}

#[test]
fn every_instance_query_is_preloaded_by_one_function() {
    let config = test_config();
    let source = RawDocument::new(
        "src/routes/index.svelte",
        "<script context=\"module\">\nexport const prerender = true;\n</script>\n\
        <script>\n\
        const a = query(graphql`query First { version }`);\n\
        const b = query(graphql`query Second { viewer { id } }`);\n\
        </script>",
    );

    let output = run(&config, &source, &default_stages()).unwrap();

    assert_eq!(output.code, [
        "<script context=\"module\">",
        "import _FirstArtifact from \"$houdini/artifacts/First\";",
        "import _SecondArtifact from \"$houdini/artifacts/Second\";",
        "import { fetchQuery } from \"$houdini\";",
        "export const prerender = true;",
        "",
        "export async function preload(page, session) {",
        "    return {",
        "        _First: await fetchQuery.call(this, { text: _FirstArtifact.raw, variables: {} }),",
        "        _Second: await fetchQuery.call(this, { text: _SecondArtifact.raw, variables: {} }),",
        "    };",
        "}",
        "</script>",
        "<script>",
        "import _FirstArtifact from \"$houdini/artifacts/First\";",
        "import _SecondArtifact from \"$houdini/artifacts/Second\";",
        "export let _First;",
        "export let _Second;",
        "const a = query(_FirstArtifact, _First);",
        "const b = query(_SecondArtifact, _Second);",
        "</script>",
    ].join("\n"));
}

#[test]
fn module_query_is_a_plain_reference() {
    let config = test_config();
    let source = RawDocument::new(
        "src/lib/version.svelte",
        "<script context=\"module\">const v = query(graphql`query Version { version }`);</script>",
    );

    let stages: Vec<Box<dyn TransformStage>> = vec![Box::new(QueryStage)];
    let output = run(&config, &source, &stages).unwrap();

    assert_eq!(
        output.code,
        "<script context=\"module\">\
        \nimport _VersionArtifact from \"$houdini/artifacts/Version\";\
        const v = query(_VersionArtifact);</script>",
    );
}

#[test]
fn query_stage_ignores_other_callees() {
    let config = test_config();
    let source = RawDocument::new(
        "src/routes/add.svelte",
        "<script>mutation(graphql`mutation Add { addFriend(id: \"1\") { id } }`)</script>",
    );

    let stages: Vec<Box<dyn TransformStage>> = vec![Box::new(QueryStage)];
    let output = run(&config, &source, &stages).unwrap();

    assert_eq!(output.code, source.content);
    assert!(output.documents.is_empty());
    assert_eq!(QueryStage.name(), "query");
}

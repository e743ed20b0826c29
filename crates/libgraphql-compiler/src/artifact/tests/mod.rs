mod generator_tests;

use crate::ast;
use crate::config::Config;
use crate::document::CollectedDocument;
use crate::document::DocumentKind;
use crate::schema::SchemaBuilder;
use std::path::PathBuf;

const SCHEMA: &str = r#"
type Query {
    version: String
    viewer: User
    users(first: Int, filter: String): [User!]!
}

type Mutation {
    addFriend(id: ID!): User
    deleteUser(id: ID!): DeletedUser
}

type DeletedUser {
    id: ID!
}

type User {
    id: ID!
    name: String
    friends(first: Int, last: Int): [User!]!
}
"#;

fn test_config() -> Config {
    let schema = SchemaBuilder::build_from_str(SCHEMA).unwrap();
    Config::new(schema, "runtime")
}

fn doc(name: &str, kind: DocumentKind, text: &str) -> CollectedDocument {
    CollectedDocument::new(
        &test_config(),
        PathBuf::from(format!("src/{name}.svelte")),
        name.to_string(),
        kind,
        ast::query::parse(text).unwrap(),
    )
}

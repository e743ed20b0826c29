mod query_stage_tests;

use crate::config::Config;
use crate::schema::SchemaBuilder;

const SCHEMA: &str = r#"
type Query {
    version: String
    viewer: User
    user(id: ID!): User
    users(first: Int, filter: String): [User!]!
}

type Mutation {
    addFriend(id: ID!): User
}

type User {
    id: ID!
    name: String
    friends(first: Int, last: Int): [User!]!
}
"#;

fn test_config() -> Config {
    let schema = SchemaBuilder::build_from_str(SCHEMA).unwrap();
    Config::new(schema, "src/runtime")
}

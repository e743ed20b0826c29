use crate::schema::GraphQLOperationType;
use crate::schema::GraphQLType;
use crate::schema::SchemaBuilder;
use crate::schema::SchemaBuildError;
use crate::schema::TypeAnnotation;

type Result<T> = std::result::Result<T, SchemaBuildError>;

mod basics {
    use super::*;

    #[test]
    fn build_without_load() {
        let schema = SchemaBuilder::new().build();

        assert_eq!(
            schema.unwrap_err(),
            SchemaBuildError::NoQueryOperationTypeDefined,
        );
    }

    #[test]
    fn load_empty_query_type_str() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "type Query")?
            .build()?;

        assert_eq!(schema.query_type_name(), "Query");
        assert!(schema.mutation_type_name().is_none());
        assert!(schema.subscription_type_name().is_none());
        // Query + 5 built-in scalars
        assert_eq!(schema.all_types().len(), 6);

        let query_fields = schema.lookup_type("Query")
            .and_then(|t| t.fields())
            .expect("Query is an object type");
        assert_eq!(
            query_fields.keys().collect::<Vec<_>>(),
            vec![&"__typename".to_string()],
        );

        Ok(())
    }

    #[test]
    fn load_all_default_operation_types() -> Result<()> {
        let schema = SchemaBuilder::build_from_str(concat!(
            "type Mutation { noop: Boolean }\n",
            "type Query { hello: String }\n",
            "type Subscription { ticks: Int }",
        ))?;

        assert_eq!(schema.query_type_name(), "Query");
        assert_eq!(schema.mutation_type_name(), Some("Mutation"));
        assert_eq!(schema.subscription_type_name(), Some("Subscription"));

        Ok(())
    }

    #[test]
    fn explicit_schema_definition_overrides_defaults() -> Result<()> {
        let schema = SchemaBuilder::build_from_str(concat!(
            "schema { query: RootQuery mutation: RootMutation }\n",
            "type RootQuery { hello: String }\n",
            "type RootMutation { noop: Boolean }\n",
            "type Query { ignored: String }",
        ))?;

        assert_eq!(schema.query_type_name(), "RootQuery");
        assert_eq!(schema.mutation_type_name(), Some("RootMutation"));

        Ok(())
    }

    #[test]
    fn undefined_explicit_root_type() {
        let result = SchemaBuilder::build_from_str(
            "schema { query: Nope }\ntype Query { hello: String }",
        );

        assert_eq!(result.unwrap_err(), SchemaBuildError::UndefinedRootOperationType {
            operation_type: GraphQLOperationType::Query,
            type_name: "Nope".to_string(),
        });
    }

    #[test]
    fn load_invalid_schema_syntax() {
        let result = SchemaBuilder::new()
            .load_str(None, "this is not valid syntax");

        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::ParseError { file: None, .. },
        ));
    }
}

mod fields {
    use super::*;

    #[test]
    fn field_types_and_arguments() -> Result<()> {
        let schema = SchemaBuilder::build_from_str(concat!(
            "type Query { users(first: Int!, after: String, sort: String = \"asc\"): [User!]! }\n",
            "type User { id: ID! name: String }",
        ))?;

        let users = schema.field("Query", "users").expect("field is defined");
        assert_eq!(users.type_annotation.to_string(), "[User!]!");
        assert_eq!(users.type_annotation.inner_named_type(), "User");
        assert_eq!(
            users.arguments.keys().map(|k| k.as_str()).collect::<Vec<_>>(),
            vec!["first", "after", "sort"],
        );
        assert!(users.arguments["first"].is_required());
        assert!(!users.arguments["after"].is_required());
        assert!(!users.arguments["sort"].is_required());

        assert_eq!(
            schema.field("User", "id").map(|f| &f.type_annotation),
            Some(&TypeAnnotation::Named {
                name: "ID".to_string(),
                nullable: false,
            }),
        );
        assert!(schema.field("User", "missing").is_none());

        Ok(())
    }

    #[test]
    fn unions_answer_typename() -> Result<()> {
        let schema = SchemaBuilder::build_from_str(concat!(
            "type Query { search: SearchResult }\n",
            "type A { a: Int }\n",
            "type B { b: Int }\n",
            "union SearchResult = A | B",
        ))?;

        assert!(schema.field("SearchResult", "__typename").is_some());
        assert!(schema.field("SearchResult", "a").is_none());
        match schema.lookup_type("SearchResult") {
            Some(GraphQLType::Union { members, .. }) => {
                assert_eq!(members, &vec!["A".to_string(), "B".to_string()]);
            },
            other => panic!("expected a union type, found {other:?}"),
        }

        Ok(())
    }

    #[test]
    fn duplicate_field_definition() {
        let result = SchemaBuilder::build_from_str(
            "type Query { hello: String hello: Int }",
        );

        assert_eq!(result.unwrap_err(), SchemaBuildError::DuplicateFieldDefinition {
            type_name: "Query".to_string(),
            field_name: "hello".to_string(),
        });
    }
}

mod extensions {
    use super::*;

    #[test]
    fn object_extension_before_definition() -> Result<()> {
        let schema = SchemaBuilder::new()
            .load_str(None, "extend type User { email: String }")?
            .load_str(None, "type Query { me: User }\ntype User { id: ID! }")?
            .build()?;

        assert!(schema.field("User", "id").is_some());
        assert!(schema.field("User", "email").is_some());

        Ok(())
    }

    #[test]
    fn extension_of_undefined_type() {
        let result = SchemaBuilder::build_from_str(
            "type Query { hello: String }\nextend type Nope { x: Int }",
        );

        assert_eq!(result.unwrap_err(), SchemaBuildError::ExtensionOfUndefinedType {
            file: None,
            type_name: "Nope".to_string(),
        });
    }

    #[test]
    fn duplicate_type_definition() {
        let result = SchemaBuilder::new()
            .load_str(None, "type Query { hello: String }")
            .and_then(|builder| builder.load_str(None, "type Query { bye: String }"));

        assert!(matches!(
            result.unwrap_err(),
            SchemaBuildError::DuplicateTypeDefinition { type_name, .. }
                if type_name == "Query",
        ));
    }
}

mod directives {
    use super::*;

    #[test]
    fn builtin_and_declared_directives() -> Result<()> {
        let schema = SchemaBuilder::build_from_str(concat!(
            "directive @cached(ttl: Int) on FIELD\n",
            "type Query { hello: String }",
        ))?;

        assert!(schema.has_directive("cached"));
        assert!(schema.has_directive("include"));
        assert!(schema.has_directive("skip"));
        assert!(!schema.has_directive("connection"));

        Ok(())
    }
}

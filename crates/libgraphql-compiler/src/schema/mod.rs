#[allow(clippy::module_inception)]
mod schema;
mod schema_builder;
mod types;

pub use schema::Schema;
pub use schema_builder::GraphQLOperationType;
pub use schema_builder::SchemaBuilder;
pub use schema_builder::SchemaBuildError;
pub use types::FieldDef;
pub use types::GraphQLType;
pub use types::InputValueDef;
pub use types::TypeAnnotation;

#[cfg(test)]
mod tests;

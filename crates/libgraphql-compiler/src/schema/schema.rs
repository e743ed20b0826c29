use crate::schema::FieldDef;
use crate::schema::GraphQLType;
use crate::schema::SchemaBuilder;
use std::collections::HashMap;
use std::collections::HashSet;

/// Represents a fully loaded and immutable GraphQL schema.
#[derive(Clone, Debug, PartialEq)]
pub struct Schema {
    pub(super) directive_names: HashSet<String>,
    pub(super) query_type: String,
    pub(super) mutation_type: Option<String>,
    pub(super) subscription_type: Option<String>,
    pub(super) types: HashMap<String, GraphQLType>,
}
impl Schema {
    /// Returns a [`HashMap<String, GraphQLType>`] containing all types defined
    /// within this [`Schema`].
    ///
    /// This map includes both types defined while building this [`Schema`] as
    /// well as the built-in scalars (`Int`, `Float`, `String`, `Boolean`,
    /// `ID`).
    pub fn all_types(&self) -> &HashMap<String, GraphQLType> {
        &self.types
    }

    /// Helper function that just delegates to [`SchemaBuilder::new()`].
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::new()
    }

    /// Whether a directive with the given name is defined (or built in).
    pub fn has_directive(&self, name: &str) -> bool {
        self.directive_names.contains(name)
    }

    /// Looks up the declaration of `field_name` on the composite type named
    /// `parent_type`.
    pub fn field(&self, parent_type: &str, field_name: &str) -> Option<&FieldDef> {
        self.types.get(parent_type)
            .and_then(|t| t.fields())
            .and_then(|fields| fields.get(field_name))
    }

    pub fn lookup_type(&self, name: &str) -> Option<&GraphQLType> {
        self.types.get(name)
    }

    /// Name of this [`Schema`]'s Mutation root operation type (if one was
    /// defined).
    ///
    /// Prefer this over looking for a type named `"Mutation"`: a `schema { }`
    /// definition may select a differently-named object type as the root.
    pub fn mutation_type_name(&self) -> Option<&str> {
        self.mutation_type.as_deref()
    }

    /// Name of this [`Schema`]'s Query root operation type.
    pub fn query_type_name(&self) -> &str {
        self.query_type.as_str()
    }

    /// Name of this [`Schema`]'s Subscription root operation type (if one was
    /// defined).
    pub fn subscription_type_name(&self) -> Option<&str> {
        self.subscription_type.as_deref()
    }
}

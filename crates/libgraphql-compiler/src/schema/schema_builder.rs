use crate::ast;
use crate::file_reader;
use crate::schema::FieldDef;
use crate::schema::GraphQLType;
use crate::schema::InputValueDef;
use crate::schema::Schema;
use indexmap::IndexMap;
use std::collections::HashMap;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;
use thiserror::Error;

type Result<T> = std::result::Result<T, SchemaBuildError>;

const BUILTIN_DIRECTIVE_NAMES: [&str; 4] = [
    "deprecated",
    "include",
    "skip",
    "specifiedBy",
];

const BUILTIN_SCALAR_NAMES: [&str; 5] = [
    "Boolean",
    "Float",
    "ID",
    "Int",
    "String",
];

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphQLOperationType {
    Query,
    Mutation,
    Subscription,
}

/// Utility for building a [`Schema`] from one or more SDL sources.
///
/// ```
/// use libgraphql_compiler::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::new()
///     .load_str(None, "type Query { hello: String }")
///     .unwrap()
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.query_type_name(), "Query");
/// ```
#[derive(Debug, Default)]
pub struct SchemaBuilder {
    directive_names: HashSet<String>,
    root_types: HashMap<GraphQLOperationType, String>,
    type_def_files: HashMap<String, Option<PathBuf>>,
    types: HashMap<String, GraphQLType>,
    type_extensions: Vec<(Option<PathBuf>, ast::schema::TypeExtension)>,
}
impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume this builder, resolve extensions and root operation types, and
    /// produce an immutable [`Schema`].
    pub fn build(mut self) -> Result<Schema> {
        for (file_path, ext) in std::mem::take(&mut self.type_extensions) {
            self.merge_type_extension(file_path, ext)?;
        }

        for name in BUILTIN_SCALAR_NAMES {
            self.types.entry(name.to_string())
                .or_insert_with(|| GraphQLType::Scalar { name: name.to_string() });
        }
        for name in BUILTIN_DIRECTIVE_NAMES {
            self.directive_names.insert(name.to_string());
        }
        for graphql_type in self.types.values_mut() {
            if let Some(fields) = graphql_type.fields_mut() {
                fields.entry("__typename".to_string())
                    .or_insert_with(FieldDef::typename);
            }
        }

        let query_type = self.resolve_root_type(GraphQLOperationType::Query)?
            .ok_or(SchemaBuildError::NoQueryOperationTypeDefined)?;
        let mutation_type =
            self.resolve_root_type(GraphQLOperationType::Mutation)?;
        let subscription_type =
            self.resolve_root_type(GraphQLOperationType::Subscription)?;

        Ok(Schema {
            directive_names: self.directive_names,
            query_type,
            mutation_type,
            subscription_type,
            types: self.types,
        })
    }

    /// Helper that builds a [`Schema`] from a single SDL string.
    pub fn build_from_str(content: impl AsRef<str>) -> Result<Schema> {
        Self::new()
            .load_str(None, content)?
            .build()
    }

    pub fn load_file(self, file_path: impl AsRef<Path>) -> Result<Self> {
        self.load_files(vec![file_path])
    }

    pub fn load_files(
        mut self,
        file_paths: Vec<impl AsRef<Path>>,
    ) -> Result<Self> {
        for file_path in file_paths {
            let file_path = file_path.as_ref();
            let file_content = file_reader::read_content(file_path)
                .map_err(|err| SchemaBuildError::SchemaFileReadError(
                    Box::new(err),
                ))?;
            self = self.load_str(Some(file_path), file_content)?;
        }
        Ok(self)
    }

    pub fn load_str(
        mut self,
        file_path: Option<&Path>,
        content: impl AsRef<str>,
    ) -> Result<Self> {
        let file_path = file_path.map(|p| p.to_path_buf());
        let doc = ast::schema::parse(content.as_ref())
            .map_err(|err| SchemaBuildError::ParseError {
                file: file_path.to_owned(),
                err: err.to_string(),
            })?;

        for def in doc.definitions {
            self.visit_definition(&file_path, def)?;
        }

        Ok(self)
    }

    fn check_for_conflicting_type(
        &self,
        file_path: &Option<PathBuf>,
        name: &str,
    ) -> Result<()> {
        if let Some(first_file) = self.type_def_files.get(name) {
            return Err(SchemaBuildError::DuplicateTypeDefinition {
                type_name: name.to_string(),
                first_file: first_file.to_owned(),
                second_file: file_path.to_owned(),
            });
        }
        Ok(())
    }

    fn merge_type_extension(
        &mut self,
        file_path: Option<PathBuf>,
        ext: ast::schema::TypeExtension,
    ) -> Result<()> {
        let (type_name, new_fields, new_members) = match ext {
            ast::schema::TypeExtension::Object(obj_ext) => {
                (obj_ext.name, obj_ext.fields, vec![])
            },
            ast::schema::TypeExtension::Interface(iface_ext) => {
                (iface_ext.name, iface_ext.fields, vec![])
            },
            ast::schema::TypeExtension::Union(union_ext) => {
                (union_ext.name, vec![], union_ext.types)
            },
            ast::schema::TypeExtension::Enum(enum_ext) => {
                return match self.types.get_mut(enum_ext.name.as_str()) {
                    Some(GraphQLType::Enum { values, .. }) => {
                        values.extend(enum_ext.values.into_iter().map(|v| v.name));
                        Ok(())
                    },
                    _ => Err(SchemaBuildError::ExtensionOfUndefinedType {
                        file: file_path,
                        type_name: enum_ext.name,
                    }),
                };
            },
            ast::schema::TypeExtension::InputObject(input_ext) => {
                return match self.types.get_mut(input_ext.name.as_str()) {
                    Some(GraphQLType::InputObject { fields, .. }) => {
                        for field in &input_ext.fields {
                            fields.insert(
                                field.name.to_string(),
                                InputValueDef::from_ast(field),
                            );
                        }
                        Ok(())
                    },
                    _ => Err(SchemaBuildError::ExtensionOfUndefinedType {
                        file: file_path,
                        type_name: input_ext.name,
                    }),
                };
            },
            ast::schema::TypeExtension::Scalar(scalar_ext) => {
                return if self.types.contains_key(scalar_ext.name.as_str()) {
                    Ok(())
                } else {
                    Err(SchemaBuildError::ExtensionOfUndefinedType {
                        file: file_path,
                        type_name: scalar_ext.name,
                    })
                };
            },
        };

        let Some(graphql_type) = self.types.get_mut(type_name.as_str()) else {
            return Err(SchemaBuildError::ExtensionOfUndefinedType {
                file: file_path,
                type_name,
            });
        };

        if let GraphQLType::Union { members, .. } = graphql_type {
            members.extend(new_members);
        }

        let kind_name = graphql_type.kind_name();
        let Some(fields) = graphql_type.fields_mut() else {
            return Err(SchemaBuildError::InvalidExtensionType {
                file: file_path,
                type_name,
                kind_name,
            });
        };
        for field in &new_fields {
            if fields.contains_key(field.name.as_str()) {
                return Err(SchemaBuildError::DuplicateFieldDefinition {
                    type_name,
                    field_name: field.name.to_string(),
                });
            }
            fields.insert(field.name.to_string(), FieldDef::from_ast(field));
        }

        Ok(())
    }

    fn resolve_root_type(
        &self,
        operation_type: GraphQLOperationType,
    ) -> Result<Option<String>> {
        if let Some(type_name) = self.root_types.get(&operation_type) {
            return match self.types.get(type_name) {
                Some(GraphQLType::Object { .. }) => Ok(Some(type_name.to_string())),
                _ => Err(SchemaBuildError::UndefinedRootOperationType {
                    operation_type,
                    type_name: type_name.to_string(),
                }),
            };
        }

        let default_name = match operation_type {
            GraphQLOperationType::Query => "Query",
            GraphQLOperationType::Mutation => "Mutation",
            GraphQLOperationType::Subscription => "Subscription",
        };
        Ok(match self.types.get(default_name) {
            Some(GraphQLType::Object { .. }) => Some(default_name.to_string()),
            _ => None,
        })
    }

    fn visit_definition(
        &mut self,
        file_path: &Option<PathBuf>,
        def: ast::schema::Definition,
    ) -> Result<()> {
        match def {
            ast::schema::Definition::DirectiveDefinition(directive_def) => {
                self.directive_names.insert(directive_def.name);
            },

            ast::schema::Definition::SchemaDefinition(schema_def) => {
                let roots = [
                    (GraphQLOperationType::Query, schema_def.query),
                    (GraphQLOperationType::Mutation, schema_def.mutation),
                    (GraphQLOperationType::Subscription, schema_def.subscription),
                ];
                for (operation_type, type_name) in roots {
                    if let Some(type_name) = type_name {
                        self.root_types.insert(operation_type, type_name);
                    }
                }
            },

            ast::schema::Definition::TypeDefinition(type_def) => {
                self.visit_type_definition(file_path, type_def)?;
            },

            ast::schema::Definition::TypeExtension(ext) => {
                // Extensions may precede the types they extend, so they are
                // merged once every definition has been loaded.
                self.type_extensions.push((file_path.to_owned(), ext));
            },
        }

        Ok(())
    }

    fn visit_type_definition(
        &mut self,
        file_path: &Option<PathBuf>,
        type_def: ast::schema::TypeDefinition,
    ) -> Result<()> {
        let graphql_type = match type_def {
            ast::schema::TypeDefinition::Enum(enum_def) => GraphQLType::Enum {
                name: enum_def.name,
                values: enum_def.values.into_iter().map(|v| v.name).collect(),
            },

            ast::schema::TypeDefinition::InputObject(input_def) => GraphQLType::InputObject {
                fields: input_def.fields.iter()
                    .map(|f| (f.name.to_string(), InputValueDef::from_ast(f)))
                    .collect(),
                name: input_def.name,
            },

            ast::schema::TypeDefinition::Interface(iface_def) => GraphQLType::Interface {
                fields: fields_from_ast(&iface_def.name, &iface_def.fields)?,
                name: iface_def.name,
            },

            ast::schema::TypeDefinition::Object(obj_def) => GraphQLType::Object {
                fields: fields_from_ast(&obj_def.name, &obj_def.fields)?,
                interfaces: obj_def.implements_interfaces,
                name: obj_def.name,
            },

            ast::schema::TypeDefinition::Scalar(scalar_def) => GraphQLType::Scalar {
                name: scalar_def.name,
            },

            ast::schema::TypeDefinition::Union(union_def) => GraphQLType::Union {
                fields: IndexMap::new(),
                members: union_def.types,
                name: union_def.name,
            },
        };

        let name = graphql_type.name().to_string();
        self.check_for_conflicting_type(file_path, name.as_str())?;
        self.type_def_files.insert(name.to_string(), file_path.to_owned());
        self.types.insert(name, graphql_type);
        Ok(())
    }
}

fn fields_from_ast(
    type_name: &str,
    ast_fields: &[ast::schema::Field],
) -> Result<IndexMap<String, FieldDef>> {
    let mut fields = IndexMap::new();
    for field in ast_fields {
        if fields.contains_key(field.name.as_str()) {
            return Err(SchemaBuildError::DuplicateFieldDefinition {
                type_name: type_name.to_string(),
                field_name: field.name.to_string(),
            });
        }
        fields.insert(field.name.to_string(), FieldDef::from_ast(field));
    }
    Ok(fields)
}

#[derive(Debug, Error, PartialEq)]
pub enum SchemaBuildError {
    #[error("field `{field_name}` is defined more than once on type `{type_name}`")]
    DuplicateFieldDefinition {
        type_name: String,
        field_name: String,
    },

    #[error(
        "type `{type_name}` is defined more than once (first in {first_file:?}, \
        again in {second_file:?})"
    )]
    DuplicateTypeDefinition {
        type_name: String,
        first_file: Option<PathBuf>,
        second_file: Option<PathBuf>,
    },

    #[error("extension of undefined type `{type_name}` in {file:?}")]
    ExtensionOfUndefinedType {
        file: Option<PathBuf>,
        type_name: String,
    },

    #[error("cannot extend {kind_name} type `{type_name}` with fields ({file:?})")]
    InvalidExtensionType {
        file: Option<PathBuf>,
        type_name: String,
        kind_name: &'static str,
    },

    #[error("no query operation type is defined in the schema")]
    NoQueryOperationTypeDefined,

    #[error("schema parse error in {file:?}: {err}")]
    ParseError {
        file: Option<PathBuf>,
        err: String,
    },

    #[error("failed to read schema file: {0}")]
    SchemaFileReadError(Box<file_reader::ReadContentError>),

    #[error(
        "the {operation_type:?} root operation type `{type_name}` is not a \
        defined object type"
    )]
    UndefinedRootOperationType {
        operation_type: GraphQLOperationType,
        type_name: String,
    },
}

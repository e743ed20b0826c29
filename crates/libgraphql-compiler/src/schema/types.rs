use crate::ast;
use indexmap::IndexMap;

/// A named type defined within a [`Schema`](crate::schema::Schema).
#[derive(Clone, Debug, PartialEq)]
pub enum GraphQLType {
    Enum {
        name: String,
        values: Vec<String>,
    },
    InputObject {
        name: String,
        fields: IndexMap<String, InputValueDef>,
    },
    Interface {
        name: String,
        fields: IndexMap<String, FieldDef>,
    },
    Object {
        name: String,
        fields: IndexMap<String, FieldDef>,
        interfaces: Vec<String>,
    },
    Scalar {
        name: String,
    },
    Union {
        name: String,
        fields: IndexMap<String, FieldDef>,
        members: Vec<String>,
    },
}
impl GraphQLType {
    /// Returns the fields that may be selected on this type, or `None` if this
    /// type is not a composite output type.
    pub fn fields(&self) -> Option<&IndexMap<String, FieldDef>> {
        match self {
            Self::Interface { fields, .. }
            | Self::Object { fields, .. }
            | Self::Union { fields, .. } => Some(fields),
            Self::Enum { .. }
            | Self::InputObject { .. }
            | Self::Scalar { .. } => None,
        }
    }

    pub(super) fn fields_mut(&mut self) -> Option<&mut IndexMap<String, FieldDef>> {
        match self {
            Self::Interface { fields, .. }
            | Self::Object { fields, .. }
            | Self::Union { fields, .. } => Some(fields),
            Self::Enum { .. }
            | Self::InputObject { .. }
            | Self::Scalar { .. } => None,
        }
    }

    /// Composite types are the ones that require a selection set when
    /// selected.
    pub fn is_composite(&self) -> bool {
        self.fields().is_some()
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Enum { name, .. }
            | Self::InputObject { name, .. }
            | Self::Interface { name, .. }
            | Self::Object { name, .. }
            | Self::Scalar { name }
            | Self::Union { name, .. } => name.as_str(),
        }
    }

    pub(super) fn kind_name(&self) -> &'static str {
        match self {
            Self::Enum { .. } => "enum",
            Self::InputObject { .. } => "input object",
            Self::Interface { .. } => "interface",
            Self::Object { .. } => "object",
            Self::Scalar { .. } => "scalar",
            Self::Union { .. } => "union",
        }
    }
}

/// A field declared on an object, interface, or union type.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldDef {
    pub name: String,
    pub arguments: IndexMap<String, InputValueDef>,
    pub type_annotation: TypeAnnotation,
}
impl FieldDef {
    pub(super) fn from_ast(field: &ast::schema::Field) -> Self {
        Self {
            name: field.name.to_string(),
            arguments: field.arguments.iter()
                .map(|arg| (arg.name.to_string(), InputValueDef::from_ast(arg)))
                .collect(),
            type_annotation: TypeAnnotation::from_ast_type(&field.field_type),
        }
    }

    /// The implicit `__typename: String!` field every composite type answers.
    pub(super) fn typename() -> Self {
        Self {
            name: "__typename".to_string(),
            arguments: IndexMap::new(),
            type_annotation: TypeAnnotation::Named {
                name: "String".to_string(),
                nullable: false,
            },
        }
    }
}

/// An argument of a field or a field of an input object.
#[derive(Clone, Debug, PartialEq)]
pub struct InputValueDef {
    pub name: String,
    pub has_default: bool,
    pub type_annotation: TypeAnnotation,
}
impl InputValueDef {
    pub(super) fn from_ast(input_value: &ast::schema::InputValue) -> Self {
        Self {
            name: input_value.name.to_string(),
            has_default: input_value.default_value.is_some(),
            type_annotation: TypeAnnotation::from_ast_type(&input_value.value_type),
        }
    }

    /// Whether a caller must supply a value for this input.
    pub fn is_required(&self) -> bool {
        !self.has_default && !self.type_annotation.nullable()
    }
}

/// A (possibly wrapped) reference to a named type.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum TypeAnnotation {
    List {
        inner: Box<TypeAnnotation>,
        nullable: bool,
    },
    Named {
        name: String,
        nullable: bool,
    },
}
impl TypeAnnotation {
    pub fn from_ast_type(ast_type: &ast::schema::Type) -> Self {
        Self::from_ast_type_impl(ast_type, true)
    }

    fn from_ast_type_impl(ast_type: &ast::schema::Type, nullable: bool) -> Self {
        match ast_type {
            ast::schema::Type::ListType(inner) => Self::List {
                inner: Box::new(Self::from_ast_type_impl(inner, true)),
                nullable,
            },
            ast::schema::Type::NamedType(name) => Self::Named {
                name: name.to_string(),
                nullable,
            },
            ast::schema::Type::NonNullType(inner) =>
                Self::from_ast_type_impl(inner, false),
        }
    }

    /// The name of the named type after unwrapping every list and non-null
    /// wrapper (`[User!]!` -> `User`).
    pub fn inner_named_type(&self) -> &str {
        match self {
            Self::List { inner, .. } => inner.inner_named_type(),
            Self::Named { name, .. } => name.as_str(),
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::List { nullable, .. }
            | Self::Named { nullable, .. } => *nullable,
        }
    }
}
impl std::fmt::Display for TypeAnnotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::List { inner, nullable } => {
                write!(f, "[{inner}]")?;
                if !nullable {
                    write!(f, "!")?;
                }
            },
            Self::Named { name, nullable } => {
                write!(f, "{name}")?;
                if !nullable {
                    write!(f, "!")?;
                }
            },
        }
        Ok(())
    }
}

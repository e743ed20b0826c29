use crate::ast;
use crate::config::Config;
use std::collections::HashSet;

/// One problem found while validating a document against the schema.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ValidationIssue {
    pub message: String,
    pub position: ast::Pos,
}
impl std::fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.position, self.message)
    }
}

/// Validates an executable document against [`Config::schema`].
///
/// Fragment spreads are not resolved here: a spread may name a fragment
/// declared in another file, which only the artifact generator can see.
pub struct DocumentValidator<'config> {
    config: &'config Config,
    issues: Vec<ValidationIssue>,
}

impl<'config> DocumentValidator<'config> {
    pub fn validate(
        config: &'config Config,
        document: &ast::query::Document,
    ) -> Vec<ValidationIssue> {
        let mut validator = Self {
            config,
            issues: vec![],
        };
        validator.visit_document(document);
        validator.issues
    }

    fn issue(&mut self, position: ast::Pos, message: String) {
        self.issues.push(ValidationIssue { message, position });
    }

    fn visit_document(&mut self, document: &ast::query::Document) {
        let mut operation_names = HashSet::new();
        let mut fragment_names = HashSet::new();

        for def in &document.definitions {
            match def {
                ast::query::Definition::Fragment(frag_def) => {
                    if !fragment_names.insert(frag_def.name.as_str()) {
                        self.issue(frag_def.position, format!(
                            "there can be only one fragment named `{}`",
                            frag_def.name,
                        ));
                    }
                    self.visit_fragment_definition(frag_def);
                },

                ast::query::Definition::Operation(op_def) => {
                    if let Some(name) = operation_name(op_def)
                        && !operation_names.insert(name) {
                        self.issue(operation_position(op_def), format!(
                            "there can be only one operation named `{name}`",
                        ));
                    }
                    self.visit_operation_definition(op_def);
                },
            }
        }
    }

    fn visit_fragment_definition(&mut self, frag_def: &ast::query::FragmentDefinition) {
        let ast::query::TypeCondition::On(type_name) = &frag_def.type_condition;
        self.check_directives(&frag_def.directives, None);
        if self.check_composite_type_condition(frag_def.position, type_name) {
            self.visit_selection_set(type_name, &frag_def.selection_set, None);
        }
    }

    fn visit_operation_definition(&mut self, op_def: &ast::query::OperationDefinition) {
        let config = self.config;
        let schema = &config.schema;
        let no_variables = vec![];
        let no_directives = vec![];
        let (root_type, variable_defs, directives, selection_set) = match op_def {
            ast::query::OperationDefinition::SelectionSet(selection_set) => {
                (Some(schema.query_type_name()), &no_variables, &no_directives, selection_set)
            },
            ast::query::OperationDefinition::Query(query) => (
                Some(schema.query_type_name()),
                &query.variable_definitions,
                &query.directives,
                &query.selection_set,
            ),
            ast::query::OperationDefinition::Mutation(mutation) => (
                schema.mutation_type_name(),
                &mutation.variable_definitions,
                &mutation.directives,
                &mutation.selection_set,
            ),
            ast::query::OperationDefinition::Subscription(subscription) => (
                schema.subscription_type_name(),
                &subscription.variable_definitions,
                &subscription.directives,
                &subscription.selection_set,
            ),
        };

        let Some(root_type) = root_type else {
            self.issue(operation_position(op_def), format!(
                "the schema does not define a root type for {} operations",
                operation_keyword(op_def),
            ));
            return;
        };

        let mut declared_variables = HashSet::new();
        for var_def in variable_defs {
            if !declared_variables.insert(var_def.name.as_str()) {
                self.issue(var_def.position, format!(
                    "there can be only one variable named `${}`",
                    var_def.name,
                ));
            }
            let type_name = inner_named_type(&var_def.var_type);
            if schema.lookup_type(type_name).is_none() {
                self.issue(var_def.position, format!(
                    "variable `${}` has undefined type `{type_name}`",
                    var_def.name,
                ));
            }
        }

        self.check_directives(directives, Some(&declared_variables));
        self.visit_selection_set(root_type, selection_set, Some(&declared_variables));
    }

    fn visit_selection_set(
        &mut self,
        parent_type: &str,
        selection_set: &ast::query::SelectionSet,
        variables: Option<&HashSet<&str>>,
    ) {
        for selection in &selection_set.items {
            match selection {
                ast::query::Selection::Field(field) => {
                    self.visit_field(parent_type, field, variables);
                },

                ast::query::Selection::FragmentSpread(spread) => {
                    self.check_directives(&spread.directives, variables);
                },

                ast::query::Selection::InlineFragment(inline) => {
                    self.check_directives(&inline.directives, variables);
                    match &inline.type_condition {
                        Some(ast::query::TypeCondition::On(type_name)) => {
                            if self.check_composite_type_condition(inline.position, type_name) {
                                self.visit_selection_set(
                                    type_name,
                                    &inline.selection_set,
                                    variables,
                                );
                            }
                        },
                        None => self.visit_selection_set(
                            parent_type,
                            &inline.selection_set,
                            variables,
                        ),
                    }
                },
            }
        }
    }

    fn visit_field(
        &mut self,
        parent_type: &str,
        field: &ast::query::Field,
        variables: Option<&HashSet<&str>>,
    ) {
        self.check_directives(&field.directives, variables);

        let config = self.config;
        let Some(field_def) = config.schema.field(parent_type, &field.name) else {
            self.issue(field.position, format!(
                "cannot query field `{}` on type `{parent_type}`",
                field.name,
            ));
            return;
        };

        for (arg_name, arg_value) in &field.arguments {
            if !field_def.arguments.contains_key(arg_name) {
                self.issue(field.position, format!(
                    "unknown argument `{arg_name}` on field `{parent_type}.{}`",
                    field.name,
                ));
            }
            self.check_variables(field.position, arg_value, variables);
        }
        for (arg_name, arg_def) in &field_def.arguments {
            let provided = field.arguments.iter().any(|(name, _)| name == arg_name);
            if arg_def.is_required() && !provided {
                self.issue(field.position, format!(
                    "field `{parent_type}.{}` requires argument `{arg_name}` of \
                    type `{}`",
                    field.name,
                    arg_def.type_annotation,
                ));
            }
        }

        let field_type = field_def.type_annotation.inner_named_type();
        let is_composite = config.schema.lookup_type(field_type)
            .is_some_and(|t| t.is_composite());
        let has_selection = !field.selection_set.items.is_empty();
        match (is_composite, has_selection) {
            (true, true) => {
                self.visit_selection_set(field_type, &field.selection_set, variables);
            },
            (true, false) => self.issue(field.position, format!(
                "field `{}` of type `{field_type}` must have a selection of \
                subfields",
                field.name,
            )),
            (false, true) => self.issue(field.position, format!(
                "field `{}` must not have a selection since type \
                `{field_type}` has no subfields",
                field.name,
            )),
            (false, false) => (),
        }
    }

    fn check_composite_type_condition(&mut self, position: ast::Pos, type_name: &str) -> bool {
        let config = self.config;
        match config.schema.lookup_type(type_name) {
            Some(t) if t.is_composite() => true,
            Some(_) => {
                self.issue(position, format!(
                    "fragments cannot condition on non-composite type `{type_name}`",
                ));
                false
            },
            None => {
                self.issue(position, format!("unknown type `{type_name}`"));
                false
            },
        }
    }

    fn check_directives(
        &mut self,
        directives: &[ast::query::Directive],
        variables: Option<&HashSet<&str>>,
    ) {
        let config = self.config;
        for directive in directives {
            let is_known = config.schema.has_directive(&directive.name)
                || config.is_internal_directive(&directive.name);
            if !is_known {
                self.issue(directive.position, format!(
                    "unknown directive `@{}`",
                    directive.name,
                ));
            }
            for (_, value) in &directive.arguments {
                self.check_variables(directive.position, value, variables);
            }
        }
    }

    fn check_variables(
        &mut self,
        position: ast::Pos,
        value: &ast::query::Value,
        variables: Option<&HashSet<&str>>,
    ) {
        // Fragments may use any variable their operation declares.
        let Some(variables) = variables else {
            return;
        };
        let mut used = vec![];
        collect_variables(value, &mut used);
        for name in used {
            if !variables.contains(name) {
                self.issue(position, format!("variable `${name}` is not defined"));
            }
        }
    }
}

fn collect_variables<'a>(value: &'a ast::query::Value, out: &mut Vec<&'a str>) {
    match value {
        ast::query::Value::Variable(name) => out.push(name.as_str()),
        ast::query::Value::List(items) => {
            for item in items {
                collect_variables(item, out);
            }
        },
        ast::query::Value::Object(fields) => {
            for item in fields.values() {
                collect_variables(item, out);
            }
        },
        _ => (),
    }
}

fn inner_named_type(ast_type: &ast::query::Type) -> &str {
    match ast_type {
        ast::query::Type::NamedType(name) => name.as_str(),
        ast::query::Type::ListType(inner)
        | ast::query::Type::NonNullType(inner) => inner_named_type(inner),
    }
}

pub(crate) fn operation_name(op_def: &ast::query::OperationDefinition) -> Option<&str> {
    match op_def {
        ast::query::OperationDefinition::SelectionSet(_) => None,
        ast::query::OperationDefinition::Query(query) => query.name.as_deref(),
        ast::query::OperationDefinition::Mutation(mutation) => mutation.name.as_deref(),
        ast::query::OperationDefinition::Subscription(subscription) =>
            subscription.name.as_deref(),
    }
}

fn operation_keyword(op_def: &ast::query::OperationDefinition) -> &'static str {
    match op_def {
        ast::query::OperationDefinition::SelectionSet(_)
        | ast::query::OperationDefinition::Query(_) => "query",
        ast::query::OperationDefinition::Mutation(_) => "mutation",
        ast::query::OperationDefinition::Subscription(_) => "subscription",
    }
}

fn operation_position(op_def: &ast::query::OperationDefinition) -> ast::Pos {
    match op_def {
        ast::query::OperationDefinition::SelectionSet(selection_set) => selection_set.span.0,
        ast::query::OperationDefinition::Query(query) => query.position,
        ast::query::OperationDefinition::Mutation(mutation) => mutation.position,
        ast::query::OperationDefinition::Subscription(subscription) => subscription.position,
    }
}

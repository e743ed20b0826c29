use crate::artifact::FilterScanError;
use crate::ast;
use crate::config::Config;
use crate::document::CollectedDocument;
use indexmap::IndexMap;

type Result<T> = std::result::Result<T, FilterScanError>;

/// Argument name to argument type name.
pub type Filters = IndexMap<String, String>;

/// Every connection declared anywhere in a compilation run, with the filter
/// arguments used with it.
///
/// Filters are keyed both by connection name and by `<Type>_delete` for the
/// connection's element type. Entries only ever grow: a later document adds
/// to what earlier documents recorded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterMap {
    connection_types: IndexMap<String, String>,
    filters: IndexMap<String, Filters>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn delete_key(type_name: &str) -> String {
        format!("{type_name}_delete")
    }

    /// The element type of the named connection.
    pub fn connection_type(&self, connection: &str) -> Option<&str> {
        self.connection_types.get(connection).map(|t| t.as_str())
    }

    pub fn filters(&self, key: &str) -> Option<&Filters> {
        self.filters.get(key)
    }

    fn record(
        &mut self,
        connection: &str,
        element_type: &str,
        filters: &Filters,
    ) -> std::result::Result<(), (String, String)> {
        if let Some(existing) = self.connection_types.get(connection)
            && existing != element_type {
            return Err((existing.to_string(), element_type.to_string()));
        }
        self.connection_types
            .entry(connection.to_string())
            .or_insert_with(|| element_type.to_string());

        for key in [connection.to_string(), Self::delete_key(element_type)] {
            let entry = self.filters.entry(key).or_default();
            for (arg_name, arg_type) in filters {
                entry.entry(arg_name.to_string())
                    .or_insert_with(|| arg_type.to_string());
            }
        }
        Ok(())
    }

    /// Scans every document for connection directives.
    ///
    /// This must see every document of the run before any artifact is built:
    /// a delete operation in one document needs the filters of connections
    /// declared in all the others.
    pub fn scan(config: &Config, documents: &[CollectedDocument]) -> Result<Self> {
        let mut filter_map = Self::new();
        for doc in documents {
            FilterScanner {
                config,
                document: doc,
                filter_map: &mut filter_map,
            }.scan()?;
        }
        Ok(filter_map)
    }
}

struct FilterScanner<'a> {
    config: &'a Config,
    document: &'a CollectedDocument,
    filter_map: &'a mut FilterMap,
}

impl FilterScanner<'_> {
    fn scan(&mut self) -> Result<()> {
        let config = self.config;
        let schema = &config.schema;
        let document = self.document;
        for def in &document.original_document.definitions {
            match def {
                ast::query::Definition::Fragment(frag_def) => {
                    self.reject_connection(&frag_def.directives)?;
                    let ast::query::TypeCondition::On(type_name) = &frag_def.type_condition;
                    self.scan_selection_set(type_name, &frag_def.selection_set)?;
                },

                ast::query::Definition::Operation(op_def) => {
                    let (root_type, directives, selection_set) = match op_def {
                        ast::query::OperationDefinition::SelectionSet(selection_set) =>
                            (Some(schema.query_type_name()), &[][..], selection_set),
                        ast::query::OperationDefinition::Query(query) => (
                            Some(schema.query_type_name()),
                            query.directives.as_slice(),
                            &query.selection_set,
                        ),
                        ast::query::OperationDefinition::Mutation(mutation) => (
                            schema.mutation_type_name(),
                            mutation.directives.as_slice(),
                            &mutation.selection_set,
                        ),
                        ast::query::OperationDefinition::Subscription(subscription) => (
                            schema.subscription_type_name(),
                            subscription.directives.as_slice(),
                            &subscription.selection_set,
                        ),
                    };
                    self.reject_connection(directives)?;
                    // A missing root is reported for the document itself.
                    if let Some(root_type) = root_type {
                        self.scan_selection_set(root_type, selection_set)?;
                    }
                },
            }
        }
        Ok(())
    }

    fn scan_selection_set(
        &mut self,
        parent_type: &str,
        selection_set: &ast::query::SelectionSet,
    ) -> Result<()> {
        let config = self.config;
        for selection in &selection_set.items {
            match selection {
                ast::query::Selection::Field(field) => {
                    // Undeclared fields fail the document's own artifact.
                    let Some(field_def) = config.schema.field(parent_type, &field.name) else {
                        continue;
                    };
                    let field_type = field_def.type_annotation.inner_named_type();

                    for directive in &field.directives {
                        if directive.name == config.connection_directive {
                            let connection = self.connection_name(directive)?;
                            let filters = field.arguments.iter()
                                .filter_map(|(arg_name, _)| {
                                    field_def.arguments.get(arg_name).map(|arg_def| (
                                        arg_name.to_string(),
                                        arg_def.type_annotation.inner_named_type().to_string(),
                                    ))
                                })
                                .collect::<Filters>();
                            self.filter_map.record(&connection, field_type, &filters)
                                .map_err(|(first_type, second_type)| {
                                    FilterScanError::ConflictingConnectionType {
                                        document: self.document.name.to_string(),
                                        connection: connection.to_string(),
                                        first_type,
                                        second_type,
                                    }
                                })?;
                        }
                    }

                    self.scan_selection_set(field_type, &field.selection_set)?;
                },

                ast::query::Selection::FragmentSpread(spread) => {
                    self.reject_connection(&spread.directives)?;
                },

                ast::query::Selection::InlineFragment(inline) => {
                    self.reject_connection(&inline.directives)?;
                    let type_name = match &inline.type_condition {
                        Some(ast::query::TypeCondition::On(type_name)) => type_name.as_str(),
                        None => parent_type,
                    };
                    self.scan_selection_set(type_name, &inline.selection_set)?;
                },
            }
        }
        Ok(())
    }

    fn connection_name(&self, directive: &ast::query::Directive) -> Result<String> {
        let name_arg = self.config.connection_name_arg.as_str();
        match directive.arguments.iter().find(|(name, _)| name == name_arg) {
            Some((_, ast::query::Value::String(name))) => Ok(name.to_string()),
            Some(_) => Err(FilterScanError::InvalidConnectionName {
                document: self.document.name.to_string(),
                filename: self.document.filename.to_owned(),
                position: directive.position,
            }),
            None => Err(FilterScanError::MissingConnectionName {
                document: self.document.name.to_string(),
                filename: self.document.filename.to_owned(),
                position: directive.position,
            }),
        }
    }

    fn reject_connection(&self, directives: &[ast::query::Directive]) -> Result<()> {
        let connection_directive = self.config.connection_directive.as_str();
        match directives.iter().find(|d| d.name == connection_directive) {
            Some(directive) => Err(FilterScanError::MisplacedConnection {
                document: self.document.name.to_string(),
                filename: self.document.filename.to_owned(),
                position: directive.position,
            }),
            None => Ok(()),
        }
    }
}

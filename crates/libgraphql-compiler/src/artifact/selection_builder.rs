use crate::artifact::ArtifactError;
use crate::artifact::FilterMap;
use crate::artifact::FilterOperation;
use crate::artifact::OperationAction;
use crate::artifact::SelectionNode;
use crate::ast;
use crate::config::Config;
use std::collections::HashMap;

type Result<T> = std::result::Result<T, ArtifactError>;

/// Builds the [`SelectionNode`] tree of one document.
pub struct SelectionBuilder<'a> {
    pub config: &'a Config,
    /// Name of the document being built, for error reporting.
    pub document: &'a str,
    pub filter_map: &'a FilterMap,
    pub fragments: &'a HashMap<String, &'a ast::query::FragmentDefinition>,
    /// Whether fragment spreads are inlined (operations) or left for the
    /// runtime to resolve (fragment documents).
    pub include_fragments: bool,
}

impl SelectionBuilder<'_> {
    /// The selection of `selection_set` evaluated against `root_type`, in
    /// source order.
    pub fn build(
        &self,
        root_type: &str,
        selection_set: &ast::query::SelectionSet,
    ) -> Result<Vec<SelectionNode>> {
        let mut spread_stack = vec![];
        self.build_selection_set(root_type, selection_set, &mut spread_stack)
    }

    fn build_selection_set(
        &self,
        parent_type: &str,
        selection_set: &ast::query::SelectionSet,
        spread_stack: &mut Vec<String>,
    ) -> Result<Vec<SelectionNode>> {
        let mut nodes = vec![];
        for selection in &selection_set.items {
            match selection {
                ast::query::Selection::Field(field) => {
                    let node = self.build_field(parent_type, field, spread_stack)?;
                    merge_nodes(&mut nodes, vec![node]);
                },

                ast::query::Selection::FragmentSpread(spread) => {
                    if !self.include_fragments {
                        continue;
                    }
                    let fragment = spread.fragment_name.as_str();
                    let Some(frag_def) = self.fragments.get(fragment) else {
                        return Err(ArtifactError::UndefinedFragment {
                            document: self.document.to_string(),
                            fragment: fragment.to_string(),
                        });
                    };
                    if spread_stack.iter().any(|active| active == fragment) {
                        return Err(ArtifactError::FragmentCycle {
                            document: self.document.to_string(),
                            fragment: fragment.to_string(),
                        });
                    }

                    let ast::query::TypeCondition::On(type_name) = &frag_def.type_condition;
                    spread_stack.push(fragment.to_string());
                    let inlined = self.build_selection_set(
                        type_name,
                        &frag_def.selection_set,
                        spread_stack,
                    )?;
                    spread_stack.pop();
                    merge_nodes(&mut nodes, inlined);
                },

                ast::query::Selection::InlineFragment(inline) => {
                    let type_name = match &inline.type_condition {
                        Some(ast::query::TypeCondition::On(type_name)) => type_name.as_str(),
                        None => parent_type,
                    };
                    let inlined = self.build_selection_set(
                        type_name,
                        &inline.selection_set,
                        spread_stack,
                    )?;
                    merge_nodes(&mut nodes, inlined);
                },
            }
        }
        Ok(nodes)
    }

    fn build_field(
        &self,
        parent_type: &str,
        field: &ast::query::Field,
        spread_stack: &mut Vec<String>,
    ) -> Result<SelectionNode> {
        let config = self.config;
        let Some(field_def) = config.schema.field(parent_type, &field.name) else {
            return Err(ArtifactError::UndefinedField {
                document: self.document.to_string(),
                parent_type: parent_type.to_string(),
                field_name: field.name.to_string(),
            });
        };
        let field_type = field_def.type_annotation.inner_named_type();

        let mut node = SelectionNode {
            field_type: field_type.to_string(),
            field_name: field.name.to_string(),
            alias: field.alias.to_owned(),
            connection: None,
            filters: None,
            selection: None,
            operations: None,
        };

        let mut operations = vec![];
        for directive in &field.directives {
            if directive.name == config.connection_directive {
                let connection = directive.arguments.iter()
                    .find(|(name, _)| *name == config.connection_name_arg)
                    .and_then(|(_, value)| match value {
                        ast::query::Value::String(name) => Some(name.to_string()),
                        _ => None,
                    });
                if let Some(connection) = connection {
                    node.filters = self.filter_map.filters(&connection).cloned();
                    node.connection = Some(connection);
                }
            } else if let Some(operation) = self.operation(&directive.name, field_type)? {
                operations.push(operation);
            }
        }
        if !operations.is_empty() {
            node.operations = Some(operations);
        }

        if !field.selection_set.items.is_empty() {
            node.selection = Some(self.build_selection_set(
                field_type,
                &field.selection_set,
                spread_stack,
            )?);
        }

        Ok(node)
    }

    /// The connection operation a field directive such as `@Friends_insert`
    /// or `@User_delete` describes, if it describes one.
    fn operation(
        &self,
        directive_name: &str,
        field_type: &str,
    ) -> Result<Option<FilterOperation>> {
        if !self.config.is_connection_operation(directive_name) {
            return Ok(None);
        }
        let (target, action) =
            if let Some(type_name) = directive_name.strip_suffix("_delete") {
                (type_name, OperationAction::Delete)
            } else if let Some(connection) = directive_name.strip_suffix("_insert") {
                (connection, OperationAction::Insert)
            } else if let Some(connection) = directive_name.strip_suffix("_remove") {
                (connection, OperationAction::Remove)
            } else {
                return Ok(None);
            };
        if target.is_empty() {
            return Ok(None);
        }

        if action == OperationAction::Delete {
            if self.config.schema.lookup_type(target).is_none() {
                return Err(ArtifactError::UndefinedType {
                    document: self.document.to_string(),
                    type_name: target.to_string(),
                });
            }
            return Ok(Some(FilterOperation {
                action,
                connection: None,
                type_name: target.to_string(),
                filters: self.filter_map.filters(&FilterMap::delete_key(target))
                    .cloned()
                    .unwrap_or_default(),
            }));
        }

        let Some(connection_type) = self.filter_map.connection_type(target) else {
            return Err(ArtifactError::UnknownConnection {
                document: self.document.to_string(),
                connection: target.to_string(),
            });
        };
        if connection_type != field_type {
            return Err(ArtifactError::ConnectionTypeMismatch {
                document: self.document.to_string(),
                connection: target.to_string(),
                expected: connection_type.to_string(),
                found: field_type.to_string(),
            });
        }

        Ok(Some(FilterOperation {
            action,
            connection: Some(target.to_string()),
            type_name: connection_type.to_string(),
            filters: self.filter_map.filters(target).cloned().unwrap_or_default(),
        }))
    }
}

/// Appends `incoming` to `nodes`, folding nodes with a response key already
/// present into the existing node.
fn merge_nodes(nodes: &mut Vec<SelectionNode>, incoming: Vec<SelectionNode>) {
    for node in incoming {
        let Some(existing) = nodes.iter_mut()
            .find(|existing| existing.response_key() == node.response_key()) else {
            nodes.push(node);
            continue;
        };

        if let Some(selection) = node.selection {
            match existing.selection.as_mut() {
                Some(existing_selection) => merge_nodes(existing_selection, selection),
                None => existing.selection = Some(selection),
            }
        }
        if let Some(operations) = node.operations {
            existing.operations.get_or_insert_with(Vec::new).extend(operations);
        }
        if existing.connection.is_none() {
            existing.connection = node.connection;
            existing.filters = node.filters;
        }
    }
}

use crate::ast;
use crate::config::Config;

/// Removes every directive [`Config::is_internal_directive`] claims from
/// `document`.
pub fn strip_internal_directives(config: &Config, document: &mut ast::query::Document) {
    for def in &mut document.definitions {
        match def {
            ast::query::Definition::Fragment(frag_def) => {
                retain_runtime_directives(config, &mut frag_def.directives);
                strip_selection_set(config, &mut frag_def.selection_set);
            },

            ast::query::Definition::Operation(op_def) => match op_def {
                ast::query::OperationDefinition::SelectionSet(selection_set) =>
                    strip_selection_set(config, selection_set),
                ast::query::OperationDefinition::Query(query) => {
                    retain_runtime_directives(config, &mut query.directives);
                    strip_selection_set(config, &mut query.selection_set);
                },
                ast::query::OperationDefinition::Mutation(mutation) => {
                    retain_runtime_directives(config, &mut mutation.directives);
                    strip_selection_set(config, &mut mutation.selection_set);
                },
                ast::query::OperationDefinition::Subscription(subscription) => {
                    retain_runtime_directives(config, &mut subscription.directives);
                    strip_selection_set(config, &mut subscription.selection_set);
                },
            },
        }
    }
}

fn strip_selection_set(config: &Config, selection_set: &mut ast::query::SelectionSet) {
    for selection in &mut selection_set.items {
        match selection {
            ast::query::Selection::Field(field) => {
                retain_runtime_directives(config, &mut field.directives);
                strip_selection_set(config, &mut field.selection_set);
            },
            ast::query::Selection::FragmentSpread(spread) =>
                retain_runtime_directives(config, &mut spread.directives),
            ast::query::Selection::InlineFragment(inline) => {
                retain_runtime_directives(config, &mut inline.directives);
                strip_selection_set(config, &mut inline.selection_set);
            },
        }
    }
}

fn retain_runtime_directives(config: &Config, directives: &mut Vec<ast::query::Directive>) {
    directives.retain(|directive| !config.is_internal_directive(&directive.name));
}

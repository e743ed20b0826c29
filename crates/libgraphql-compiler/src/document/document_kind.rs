use crate::ast;
use serde::Serialize;

/// What a compiled document is; also the `kind` of its artifact.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Fragment,
    Mutation,
    Query,
    Subscription,
}
impl DocumentKind {
    /// Name of the runtime function whose tagged-template argument declares a
    /// document of this kind (`query(graphql`...`)`).
    pub fn callee(&self) -> &'static str {
        match self {
            Self::Fragment => "fragment",
            Self::Mutation => "mutation",
            Self::Query => "query",
            Self::Subscription => "subscription",
        }
    }

    pub fn of_operation(op_def: &ast::query::OperationDefinition) -> Self {
        match op_def {
            ast::query::OperationDefinition::SelectionSet(_)
            | ast::query::OperationDefinition::Query(_) => Self::Query,
            ast::query::OperationDefinition::Mutation(_) => Self::Mutation,
            ast::query::OperationDefinition::Subscription(_) => Self::Subscription,
        }
    }
}
impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.callee())
    }
}

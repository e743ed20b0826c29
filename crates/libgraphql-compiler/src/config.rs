use crate::schema::Schema;
use std::collections::HashSet;
use std::path::Path;
use std::path::PathBuf;

/// Directive-name suffixes that mark a field as the target of a connection
/// operation (`@User_Friends_insert`, `@User_delete`, ...).
pub const CONNECTION_OPERATION_SUFFIXES: [&str; 3] = [
    "_delete",
    "_insert",
    "_remove",
];

/// Which application framework the generated runtime adapter targets.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Framework {
    #[default]
    Kit,
    Sapper,
}
impl std::str::FromStr for Framework {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kit" | "sveltekit" => Ok(Self::Kit),
            "sapper" => Ok(Self::Sapper),
            other => Err(format!("unknown framework `{other}`")),
        }
    }
}

/// Everything a compilation run needs to know about the project it compiles.
#[derive(Clone, Debug)]
pub struct Config {
    pub schema: Schema,
    pub connection_directive: String,
    pub connection_name_arg: String,
    pub graphql_tag: String,
    pub internal_directives: HashSet<String>,
    pub artifact_directory: PathBuf,
    pub runtime_directory: PathBuf,
    pub runtime_alias: String,
    pub framework: Framework,
    pub quiet: bool,
    pub write_sources: bool,
}
impl Config {
    /// Builds a [`Config`] with default directive names whose generated
    /// runtime lives at `runtime_directory` (artifacts go in its `artifacts`
    /// subdirectory).
    pub fn new(schema: Schema, runtime_directory: impl AsRef<Path>) -> Self {
        let runtime_directory = runtime_directory.as_ref().to_path_buf();
        Self {
            schema,
            connection_directive: "connection".to_string(),
            connection_name_arg: "name".to_string(),
            graphql_tag: "graphql".to_string(),
            internal_directives: HashSet::new(),
            artifact_directory: runtime_directory.join("artifacts"),
            runtime_directory,
            runtime_alias: "$houdini".to_string(),
            framework: Framework::default(),
            quiet: false,
            write_sources: false,
        }
    }

    pub fn adapter_path(&self) -> PathBuf {
        self.runtime_directory.join("adapter.js")
    }

    /// Module specifier rewritten source files use to import an artifact.
    pub fn artifact_import(&self, document_name: &str) -> String {
        format!("{}/artifacts/{document_name}", self.runtime_alias)
    }

    /// Identifier bound to an imported artifact in rewritten source files.
    pub fn artifact_identifier(&self, document_name: &str) -> String {
        format!("_{document_name}Artifact")
    }

    pub fn artifact_path(&self, document_name: &str) -> PathBuf {
        self.artifact_directory.join(format!("{document_name}.js"))
    }

    pub fn index_path(&self) -> PathBuf {
        self.artifact_directory.join("index.js")
    }

    /// Whether `directive_name` only means something to this compiler and
    /// must be stripped before a document is handed to the runtime.
    pub fn is_internal_directive(&self, directive_name: &str) -> bool {
        directive_name == self.connection_directive
            || self.internal_directives.contains(directive_name)
            || self.is_connection_operation(directive_name)
    }

    /// Whether `directive_name` names a connection operation such as
    /// `@Friends_insert`. Directives the schema declares never do.
    pub fn is_connection_operation(&self, directive_name: &str) -> bool {
        !self.schema.has_directive(directive_name)
            && CONNECTION_OPERATION_SUFFIXES.iter().any(|suffix| {
                directive_name.len() > suffix.len()
                    && directive_name.ends_with(suffix)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SchemaBuilder;

    fn config() -> Config {
        let schema = SchemaBuilder::build_from_str("type Query { a: Int }").unwrap();
        Config::new(schema, "src/runtime")
    }

    #[test]
    fn paths_and_imports() {
        let config = config();

        assert_eq!(config.artifact_path("AllUsers"), Path::new("src/runtime/artifacts/AllUsers.js"));
        assert_eq!(config.index_path(), Path::new("src/runtime/artifacts/index.js"));
        assert_eq!(config.adapter_path(), Path::new("src/runtime/adapter.js"));
        assert_eq!(config.artifact_import("AllUsers"), "$houdini/artifacts/AllUsers");
        assert_eq!(config.artifact_identifier("AllUsers"), "_AllUsersArtifact");
    }

    #[test]
    fn internal_directives() {
        let mut config = config();
        config.internal_directives.insert("cached".to_string());

        assert!(config.is_internal_directive("connection"));
        assert!(config.is_internal_directive("cached"));
        assert!(config.is_internal_directive("User_Friends_insert"));
        assert!(config.is_internal_directive("User_delete"));
        assert!(!config.is_internal_directive("_delete"));
        assert!(!config.is_internal_directive("include"));
    }

    #[test]
    fn schema_directives_are_not_connection_operations() {
        let schema = SchemaBuilder::build_from_str(concat!(
            "directive @soft_delete on FIELD\n",
            "type Query { a: Int }\n",
        )).unwrap();
        let config = Config::new(schema, "src/runtime");

        assert!(!config.is_connection_operation("soft_delete"));
        assert!(!config.is_internal_directive("soft_delete"));
        assert!(config.is_connection_operation("User_delete"));
    }

    #[test]
    fn framework_from_str() {
        assert_eq!("kit".parse::<Framework>(), Ok(Framework::Kit));
        assert_eq!("sapper".parse::<Framework>(), Ok(Framework::Sapper));
        assert!("next".parse::<Framework>().is_err());
    }
}

use crate::script::script_scanner::ScriptScanner;
use crate::script::ScriptParseError;

/// An `import` added to a [`Script`] by a transform.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ImportDeclaration {
    /// Everything between `import` and `from` (`_FooArtifact`,
    /// `{ fetchQuery }`).
    pub clause: String,
    pub source: String,
}
impl std::fmt::Display for ImportDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "import {} from \"{}\";", self.clause, self.source)
    }
}

/// One piece of a [`Script`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptNode {
    /// Code this crate does not look into, printed back verbatim.
    Source(String),
    TaggedTemplate(TaggedTemplate),
}

/// A GraphQL-tagged template literal such as ``graphql`query Foo { ... }` ``.
#[derive(Clone, Debug, PartialEq)]
pub struct TaggedTemplate {
    pub(super) callee: Option<String>,
    pub(super) tag: String,
    pub(super) body: String,
    pub(super) original_text: String,
    pub(super) replacement: Option<String>,
}
impl TaggedTemplate {
    /// The GraphQL text between the backticks.
    pub fn body(&self) -> &str {
        self.body.as_str()
    }

    /// Name of the function this template is passed to as its first argument
    /// (`query` in `query(graphql`...`)`), if any.
    pub fn callee(&self) -> Option<&str> {
        self.callee.as_deref()
    }

    pub fn is_rewritten(&self) -> bool {
        self.replacement.is_some()
    }

    /// Replaces the whole tagged template expression (tag included) with
    /// `expression` when the script is printed.
    pub fn rewrite(&mut self, expression: impl Into<String>) {
        self.replacement = Some(expression.into());
    }

    pub fn tag(&self) -> &str {
        self.tag.as_str()
    }

    fn print(&self) -> &str {
        self.replacement.as_deref().unwrap_or(self.original_text.as_str())
    }
}

/// The syntax tree of one script region.
///
/// Parsing is lossless: printing a [`Script`] nobody modified reproduces the
/// parsed text byte-for-byte. Transforms add imports and statements or
/// rewrite [`TaggedTemplate`]s; everything else is left untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Script {
    imports: Vec<ImportDeclaration>,
    prelude: Vec<String>,
    nodes: Vec<ScriptNode>,
    epilogue: Vec<String>,
}
impl Script {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds `import <clause> from "<source>";` to the top of the script
    /// unless an identical import was already added.
    pub fn add_import(
        &mut self,
        clause: impl Into<String>,
        source: impl Into<String>,
    ) {
        let import = ImportDeclaration {
            clause: clause.into(),
            source: source.into(),
        };
        if !self.imports.contains(&import) {
            self.imports.push(import);
        }
    }

    /// Adds a statement printed after the added imports and before the
    /// original code.
    pub fn add_prelude_statement(&mut self, statement: impl Into<String>) {
        let statement = statement.into();
        if !self.prelude.contains(&statement) {
            self.prelude.push(statement);
        }
    }

    /// Adds a statement printed after the original code.
    pub fn add_epilogue_statement(&mut self, statement: impl Into<String>) {
        self.epilogue.push(statement.into());
    }

    pub fn imports(&self) -> &[ImportDeclaration] {
        &self.imports
    }

    /// Whether printing this script would produce anything other than the
    /// text it was parsed from.
    pub fn is_modified(&self) -> bool {
        !self.imports.is_empty()
            || !self.prelude.is_empty()
            || !self.epilogue.is_empty()
            || self.tagged_templates().any(|t| t.is_rewritten())
    }

    pub fn nodes(&self) -> &[ScriptNode] {
        &self.nodes
    }

    /// Scans `source` for templates tagged with `graphql_tag`.
    pub fn parse(
        source: &str,
        graphql_tag: &str,
    ) -> Result<Self, ScriptParseError> {
        let matches = ScriptScanner::new(source, graphql_tag).scan()?;

        let mut nodes = vec![];
        let mut cursor = 0;
        for m in matches {
            if m.start > cursor {
                nodes.push(ScriptNode::Source(source[cursor..m.start].to_string()));
            }
            nodes.push(ScriptNode::TaggedTemplate(TaggedTemplate {
                callee: m.callee,
                tag: graphql_tag.to_string(),
                body: source[m.body_start..m.body_end].to_string(),
                original_text: source[m.start..m.end].to_string(),
                replacement: None,
            }));
            cursor = m.end;
        }
        if cursor < source.len() {
            nodes.push(ScriptNode::Source(source[cursor..].to_string()));
        }

        Ok(Self {
            nodes,
            ..Self::default()
        })
    }

    pub fn print(&self) -> String {
        let mut out = String::new();
        for import in &self.imports {
            out.push('\n');
            out.push_str(import.to_string().as_str());
        }
        for statement in &self.prelude {
            out.push('\n');
            out.push_str(statement);
        }
        for node in &self.nodes {
            match node {
                ScriptNode::Source(text) => out.push_str(text),
                ScriptNode::TaggedTemplate(template) => out.push_str(template.print()),
            }
        }
        if !self.epilogue.is_empty() {
            for statement in &self.epilogue {
                out.push('\n');
                out.push_str(statement);
            }
            out.push('\n');
        }
        out
    }

    pub fn tagged_templates(&self) -> impl Iterator<Item = &TaggedTemplate> {
        self.nodes.iter().filter_map(|node| match node {
            ScriptNode::TaggedTemplate(template) => Some(template),
            ScriptNode::Source(_) => None,
        })
    }

    pub fn tagged_templates_mut(&mut self) -> impl Iterator<Item = &mut TaggedTemplate> {
        self.nodes.iter_mut().filter_map(|node| match node {
            ScriptNode::TaggedTemplate(template) => Some(template),
            ScriptNode::Source(_) => None,
        })
    }
}

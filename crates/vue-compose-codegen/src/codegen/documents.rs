//! Document constant emission.

use crate::config::{DocumentMode, PluginConfig};
use crate::ir::{DocumentIR, FragmentIR, OperationIR};
use super::ast_json;
use super::naming::Namer;

/// Renders the document constants declared by a generated module.
pub struct DocumentEmitter<'a> {
    config: &'a PluginConfig,
    namer: &'a Namer<'a>,
    ir: &'a DocumentIR,
}

impl<'a> DocumentEmitter<'a> {
    pub fn new(config: &'a PluginConfig, namer: &'a Namer<'a>, ir: &'a DocumentIR) -> Self {
        Self { config, namer, ir }
    }

    /// Expression that refers to an operation's document from a composition function.
    pub fn document_reference(&self, operation: &OperationIR) -> String {
        let variable = self.namer.document_variable(&operation.name);
        match self.config.document_mode {
            DocumentMode::External => format!("Operations.{}", variable),
            _ => variable,
        }
    }

    /// All constants, fragments first in dependency order, then operations.
    /// Nothing is declared in external mode.
    pub fn emit(&self) -> Vec<String> {
        if !self.config.document_mode.is_inline() {
            return Vec::new();
        }

        let fragments = self.ir.fragments.iter().map(|f| self.fragment_constant(f));
        let operations = self.ir.operations.iter().map(|o| self.operation_constant(o));
        fragments.chain(operations).collect()
    }

    fn fragment_constant(&self, fragment: &FragmentIR) -> String {
        let variable = self.namer.fragment_variable(&fragment.name);
        let value = match self.config.document_mode {
            DocumentMode::DocumentNode => {
                let mut definitions: Vec<serde_json::Value> = self
                    .ir
                    .transitive_fragments(&fragment.dependencies)
                    .into_iter()
                    .map(|f| ast_json::fragment_definition(&f.definition))
                    .collect();
                definitions.insert(0, ast_json::fragment_definition(&fragment.definition));
                self.document_node(definitions)
            }
            DocumentMode::DocumentNodeImportFragments => self.document_node_with_imports(
                ast_json::fragment_definition(&fragment.definition),
                &fragment.dependencies,
            ),
            _ => self.template(&fragment.source, &fragment.dependencies),
        };
        self.declaration(&variable, &value)
    }

    fn operation_constant(&self, operation: &OperationIR) -> String {
        let variable = self.namer.document_variable(&operation.name);
        let value = match self.config.document_mode {
            DocumentMode::DocumentNode => {
                let mut definitions = vec![ast_json::operation_definition(&operation.definition)];
                definitions.extend(
                    self.ir
                        .transitive_fragments(&operation.fragment_spreads)
                        .into_iter()
                        .map(|f| ast_json::fragment_definition(&f.definition)),
                );
                self.document_node(definitions)
            }
            DocumentMode::DocumentNodeImportFragments => self.document_node_with_imports(
                ast_json::operation_definition(&operation.definition),
                &operation.fragment_spreads,
            ),
            _ => self.template(&operation.source, &operation.fragment_spreads),
        };
        self.declaration(&variable, &value)
    }

    fn declaration(&self, variable: &str, value: &str) -> String {
        let export = if self.config.no_export { "" } else { "export " };
        format!("{}const {} = {};", export, variable, value)
    }

    /// Tagged or plain template literal with the direct fragment dependencies
    /// interpolated after the printed definition.
    fn template(&self, printed: &str, dependencies: &[String]) -> String {
        let interpolations: Vec<String> = dependencies
            .iter()
            .map(|d| format!("${{{}}}", self.namer.fragment_variable(d)))
            .collect();
        let body = format!(
            "`\n    {}\n    {}`",
            escape_template(printed),
            interpolations.join("\n")
        );

        match self.config.document_mode {
            DocumentMode::String => body,
            _ if self.config.pure_magic_comment => format!("/*#__PURE__*/ gql{}", body),
            _ => format!("gql{}", body),
        }
    }

    fn document_node(&self, definitions: Vec<serde_json::Value>) -> String {
        format!("{} as unknown as DocumentNode", ast_json::document(definitions))
    }

    /// Own definition inline, fragment definitions spliced from their constants.
    fn document_node_with_imports(
        &self,
        own: serde_json::Value,
        dependencies: &[String],
    ) -> String {
        let mut parts = vec![own.to_string()];
        parts.extend(
            dependencies
                .iter()
                .map(|d| format!("...{}.definitions", self.namer.fragment_variable(d))),
        );
        format!(
            "{{\"kind\":\"Document\",\"definitions\":[{}]}} as unknown as DocumentNode",
            parts.join(",")
        )
    }
}

/// Escapes text for a template literal.
fn escape_template(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('`', "\\`")
        .replace("${", "\\${")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{to_ir::to_ir, SourceDocument};

    const SOURCE: &str = r#"
query Feed($limit: Int) {
  feed(limit: $limit) {
    ...Entry
  }
}

fragment Entry on Item {
  id
  author {
    ...Person
  }
}

fragment Person on User {
  login
}
"#;

    fn ir() -> DocumentIR {
        let doc = SourceDocument::parse(SOURCE, "feed.graphql").unwrap();
        to_ir(&[doc], Vec::new()).unwrap()
    }

    fn emit(config: &PluginConfig) -> Vec<String> {
        let ir = ir();
        let namer = Namer::new(config);
        DocumentEmitter::new(config, &namer, &ir).emit()
    }

    #[test]
    fn test_graphql_tag_layout() {
        let constants = emit(&PluginConfig::default());
        assert_eq!(constants.len(), 3);
        assert_eq!(
            constants[0],
            "export const PersonFragmentDoc = gql`\n    fragment Person on User {\n  login\n}\n    `;"
        );
        assert_eq!(
            constants[1],
            "export const EntryFragmentDoc = gql`\n    fragment Entry on Item {\n  id\n  author {\n    ...Person\n  }\n}\n    ${PersonFragmentDoc}`;"
        );
        assert!(constants[2].starts_with("export const FeedDocument = gql`\n    query Feed($limit: Int) {"));
        assert!(constants[2].ends_with("}\n    ${EntryFragmentDoc}`;"));
    }

    #[test]
    fn test_string_mode_and_no_export() {
        let config = PluginConfig {
            document_mode: DocumentMode::String,
            no_export: true,
            ..PluginConfig::default()
        };
        let constants = emit(&config);
        assert!(constants[0].starts_with("const PersonFragmentDoc = `\n    fragment Person"));
        assert!(!constants.iter().any(|c| c.contains("gql`")));
    }

    #[test]
    fn test_pure_magic_comment() {
        let config = PluginConfig {
            pure_magic_comment: true,
            ..PluginConfig::default()
        };
        assert!(emit(&config)[0].starts_with("export const PersonFragmentDoc = /*#__PURE__*/ gql`"));
    }

    #[test]
    fn test_document_node_inlines_transitive_fragments() {
        let config = PluginConfig {
            document_mode: DocumentMode::DocumentNode,
            ..PluginConfig::default()
        };
        let constants = emit(&config);
        let feed = &constants[2];
        assert!(feed.starts_with(r#"export const FeedDocument = {"kind":"Document","definitions":[{"kind":"OperationDefinition""#));
        assert!(feed.ends_with(" as unknown as DocumentNode;"));
        let person = feed.find(r#""value":"Person"},"typeCondition""#).unwrap();
        let entry = feed.find(r#""value":"Entry"},"typeCondition""#).unwrap();
        assert!(person < entry);
    }

    #[test]
    fn test_document_node_import_fragments_splices_constants() {
        let config = PluginConfig {
            document_mode: DocumentMode::DocumentNodeImportFragments,
            ..PluginConfig::default()
        };
        let constants = emit(&config);
        assert!(constants[2].ends_with(",...EntryFragmentDoc.definitions]} as unknown as DocumentNode;"));
        assert!(constants[1].contains("...PersonFragmentDoc.definitions"));
    }

    #[test]
    fn test_external_mode_declares_nothing() {
        let config = PluginConfig {
            document_mode: DocumentMode::External,
            ..PluginConfig::default()
        };
        let ir = ir();
        let namer = Namer::new(&config);
        let emitter = DocumentEmitter::new(&config, &namer, &ir);
        assert!(emitter.emit().is_empty());
        assert_eq!(emitter.document_reference(&ir.operations[0]), "Operations.FeedDocument");
    }

    #[test]
    fn test_escape_template() {
        assert_eq!(escape_template(r#"a\b`c${d}"#), r#"a\\b\`c\${d}"#);
    }
}

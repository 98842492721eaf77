//! TypeScript generation from the document IR.
//!
//! A generated module has two parts:
//! - the prepend block: imports and helper type aliases, deduplicated
//! - the content: document constants followed by one group of composition
//!   functions per operation
//!
//! Which client library the functions bind to is decided by a
//! [`CompositionTarget`].

mod apollo;
mod ast_json;
mod docblock;
mod documents;
mod imports;
pub mod naming;
mod urql;

use std::path::PathBuf;

use crate::config::{PluginConfig, Target};
use crate::diagnostic::CompilerError;
use crate::ir::{DocumentIR, OperationIR, OperationKind};

pub use apollo::VueApolloTarget;
pub use documents::DocumentEmitter;
pub use imports::ImportSet;
pub use naming::Namer;
pub use urql::VueUrqlTarget;

/// Text produced by one plugin invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginOutput {
    /// Import and type declaration lines, in order and without duplicates.
    pub prepend: Vec<String>,
    /// Generated declarations.
    pub content: String,
}

impl PluginOutput {
    /// Full module text: the prepend lines, a blank line, then the content.
    pub fn render(&self) -> String {
        if self.prepend.is_empty() {
            return self.content.clone();
        }
        format!("{}\n\n{}", self.prepend.join("\n"), self.content)
    }
}

/// Names and flags a target needs to render one operation's functions.
#[derive(Debug, Clone)]
pub struct OperationBinding {
    pub kind: OperationKind,
    /// Expression evaluating to the operation's document.
    pub document: String,
    pub function: String,
    pub lazy_function: String,
    pub result_type: String,
    pub variables_type: String,
    pub result_alias: String,
    pub has_variables: bool,
    pub has_required_variables: bool,
}

impl OperationBinding {
    pub fn new(operation: &OperationIR, namer: &Namer<'_>, document: String) -> Self {
        Self {
            kind: operation.kind,
            document,
            function: namer.function_name(operation),
            lazy_function: namer.lazy_function_name(operation),
            result_type: namer.result_type(operation),
            variables_type: namer.variables_type(operation),
            result_alias: namer.composition_result_type(operation),
            has_variables: operation.has_variables(),
            has_required_variables: operation.has_required_variables(),
        }
    }
}

/// Trait for client library bindings.
pub trait CompositionTarget {
    /// Returns the target id (e.g., "vue-apollo").
    fn name(&self) -> &'static str;

    /// Lines prepended whenever at least one function is generated.
    fn imports(&self, config: &PluginConfig) -> Vec<String>;

    /// Renders the functions (and doc blocks, if the target has them) for one operation.
    fn composition_functions(&self, binding: &OperationBinding, config: &PluginConfig) -> String;
}

/// Creates the binding target for the configured client library.
pub fn create_target(target: Target) -> Box<dyn CompositionTarget> {
    match target {
        Target::VueApollo => Box::new(VueApolloTarget),
        Target::VueUrql => Box::new(VueUrqlTarget),
    }
}

/// Generates a module from lowered, validated documents.
///
/// `sources` are the locations of the documents that produced `ir`.
pub fn generate(
    ir: &DocumentIR,
    config: &PluginConfig,
    sources: &[PathBuf],
) -> Result<PluginOutput, CompilerError> {
    let namer = Namer::new(config);
    let target = create_target(config.target);
    let emitter = DocumentEmitter::new(config, &namer, ir);

    let mut prepend = imports::document_imports(ir, config, sources)?;
    let mut blocks = emitter.emit();

    let emit_functions = config.with_composition_functions && ir.has_operations();
    if emit_functions {
        prepend.extend(target.imports(config));
        for operation in &ir.operations {
            let document = emitter.document_reference(operation);
            let binding = OperationBinding::new(operation, &namer, document);
            blocks.push(target.composition_functions(&binding, config));
        }
    }

    tracing::debug!(
        client = target.name(),
        constants = if config.document_mode.is_inline() {
            ir.operations.len() + ir.fragments.len()
        } else {
            0
        },
        functions = if emit_functions { ir.operations.len() } else { 0 },
        "generated module"
    );

    let content = if blocks.is_empty() {
        String::new()
    } else {
        format!("{}\n", blocks.join("\n\n"))
    };

    Ok(PluginOutput {
        prepend: prepend.into_lines(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{to_ir::to_ir, SourceDocument};

    #[test]
    fn test_render_joins_prepend_and_content() {
        let output = PluginOutput {
            prepend: vec!["import a from 'a';".into(), "import b from 'b';".into()],
            content: "export const x = 1;\n".into(),
        };
        assert_eq!(output.render(), "import a from 'a';\nimport b from 'b';\n\nexport const x = 1;\n");
        assert_eq!(PluginOutput::default().render(), "");
    }

    #[test]
    fn test_without_composition_functions_only_constants_remain() {
        let doc = SourceDocument::parse("query Feed { feed }", "feed.graphql").unwrap();
        let ir = to_ir(&[doc], Vec::new()).unwrap();
        let config = PluginConfig {
            with_composition_functions: false,
            ..PluginConfig::default()
        };
        let output = generate(&ir, &config, &[]).unwrap();
        assert_eq!(output.prepend, vec!["import gql from 'graphql-tag';"]);
        assert!(output.content.starts_with("export const FeedDocument = gql`"));
        assert!(!output.content.contains("export function"));
    }

    #[test]
    fn test_fragment_only_set_has_no_bindings() {
        let doc = SourceDocument::parse("fragment F on User { id }", "f.graphql").unwrap();
        let ir = to_ir(&[doc], Vec::new()).unwrap();
        let output = generate(&ir, &PluginConfig::default(), &[]).unwrap();
        assert!(!output.prepend.iter().any(|l| l.contains("VueApolloComposable")));
        assert!(output.content.starts_with("export const FFragmentDoc"));
    }

    #[test]
    fn test_create_target() {
        assert_eq!(create_target(Target::VueApollo).name(), "vue-apollo");
        assert_eq!(create_target(Target::VueUrql).name(), "vue-urql");
    }
}

//! Import lines that precede the generated declarations.

use std::path::PathBuf;

use crate::config::{DocumentMode, ExternalModule, ImportSpec, PluginConfig};
use crate::diagnostic::CompilerError;
use crate::frontend::file_stem;
use crate::ir::DocumentIR;
use super::naming::Namer;

/// Insertion-ordered, deduplicated set of prepend lines.
#[derive(Debug, Default, Clone)]
pub struct ImportSet {
    lines: Vec<String>,
}

impl ImportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a line unless it is already present.
    pub fn push(&mut self, line: impl Into<String>) {
        let line = line.into();
        if !self.lines.contains(&line) {
            self.lines.push(line);
        }
    }

    pub fn extend<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for line in lines {
            self.push(line);
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

/// Collects the document-mode and external fragment imports.
///
/// `sources` are the locations of the documents in this invocation; they are
/// only consulted to resolve `near-operation-file`.
pub fn document_imports(
    ir: &DocumentIR,
    config: &PluginConfig,
    sources: &[PathBuf],
) -> Result<ImportSet, CompilerError> {
    let mut imports = ImportSet::new();
    let declares_constants = !ir.operations.is_empty() || !ir.fragments.is_empty();

    match config.document_mode {
        DocumentMode::External => {
            // Nothing to bind when the set holds no executable operation.
            if ir.has_operations() {
                let module = external_module(config, sources)?;
                imports.push(format!("import * as Operations from '{}';", module));
            }
            return Ok(imports);
        }
        DocumentMode::GraphQLTag if declares_constants => {
            imports.push(gql_import(&config.gql_import));
        }
        DocumentMode::DocumentNode | DocumentMode::DocumentNodeImportFragments
            if declares_constants =>
        {
            imports.push(document_node_import(&config.document_node_import));
        }
        _ => {}
    }

    imports.extend(fragment_imports(ir, config));
    Ok(imports)
}

/// Resolves the module that holds externally declared document constants.
fn external_module(config: &PluginConfig, sources: &[PathBuf]) -> Result<String, CompilerError> {
    match &config.import_document_node_externally_from {
        None => Err(CompilerError::MissingExternalModule),
        Some(ExternalModule::Path(path)) => Ok(strip_ts_extension(path).to_string()),
        Some(ExternalModule::NearOperationFile) => {
            let [source] = sources else {
                return Err(CompilerError::NearOperationFileNeedsSingleDocument {
                    count: sources.len(),
                });
            };
            let stem = file_stem(source);
            if config.emit_legacy_common_js_imports {
                Ok(format!("./{}", stem))
            } else {
                Ok(format!("./{}.js", stem))
            }
        }
    }
}

fn gql_import(spec: &ImportSpec) -> String {
    match spec.export.as_deref() {
        None => format!("import gql from '{}';", spec.module),
        Some("gql") => format!("import {{ gql }} from '{}';", spec.module),
        Some(name) => format!("import {{ {} as gql }} from '{}';", name, spec.module),
    }
}

fn document_node_import(spec: &ImportSpec) -> String {
    match spec.export.as_deref() {
        None | Some("DocumentNode") => {
            format!("import type {{ DocumentNode }} from '{}';", spec.module)
        }
        Some(name) => format!(
            "import type {{ {} as DocumentNode }} from '{}';",
            name, spec.module
        ),
    }
}

/// One import per module for imported fragments referenced by name.
///
/// Fully inlined `documentNode` constants carry the imported definitions
/// themselves, so only the other inline modes import fragment constants.
fn fragment_imports(ir: &DocumentIR, config: &PluginConfig) -> Vec<String> {
    if matches!(
        config.document_mode,
        DocumentMode::DocumentNode | DocumentMode::External
    ) {
        return Vec::new();
    }

    let referenced: Vec<&String> = ir
        .fragments
        .iter()
        .flat_map(|f| f.dependencies.iter())
        .chain(ir.operations.iter().flat_map(|o| o.fragment_spreads.iter()))
        .filter(|name| ir.is_external(name))
        .collect();

    let namer = Namer::new(config);
    let mut modules: Vec<(&str, Vec<String>)> = Vec::new();
    for external in &ir.external_fragments {
        if !referenced.contains(&&external.fragment.name) {
            continue;
        }
        let variable = namer.fragment_variable(&external.fragment.name);
        match modules.iter_mut().find(|(m, _)| *m == external.import_from) {
            Some((_, names)) => {
                if !names.contains(&variable) {
                    names.push(variable);
                }
            }
            None => modules.push((external.import_from.as_str(), vec![variable])),
        }
    }

    modules
        .into_iter()
        .map(|(module, names)| format!("import {{ {} }} from '{}';", names.join(", "), module))
        .collect()
}

fn strip_ts_extension(path: &str) -> &str {
    path.strip_suffix(".tsx")
        .or_else(|| path.strip_suffix(".ts"))
        .unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::{to_ir::to_ir, SourceDocument};
    use crate::ir::ExternalFragment;

    fn ir(source: &str) -> DocumentIR {
        to_ir(&[SourceDocument::parse(source, "feed.graphql").unwrap()], Vec::new()).unwrap()
    }

    fn lines(ir: &DocumentIR, config: &PluginConfig, sources: &[PathBuf]) -> Vec<String> {
        document_imports(ir, config, sources).unwrap().into_lines()
    }

    #[test]
    fn test_import_set_deduplicates_in_order() {
        let mut set = ImportSet::new();
        set.push("b");
        set.push("a");
        set.push("b");
        assert_eq!(set.into_lines(), vec!["b", "a"]);
    }

    #[test]
    fn test_gql_import_forms() {
        assert_eq!(gql_import(&ImportSpec::parse("graphql-tag")), "import gql from 'graphql-tag';");
        assert_eq!(
            gql_import(&ImportSpec::parse("@apollo/client/core#gql")),
            "import { gql } from '@apollo/client/core';"
        );
        assert_eq!(
            gql_import(&ImportSpec::parse("@urql/core#graphql")),
            "import { graphql as gql } from '@urql/core';"
        );
    }

    #[test]
    fn test_document_node_mode_imports_type_only() {
        let config = PluginConfig {
            document_mode: DocumentMode::DocumentNode,
            ..PluginConfig::default()
        };
        let out = lines(&ir("query Feed { feed }"), &config, &[]);
        assert_eq!(out, vec!["import type { DocumentNode } from 'graphql';"]);
    }

    #[test]
    fn test_string_mode_imports_nothing() {
        let config = PluginConfig {
            document_mode: DocumentMode::String,
            ..PluginConfig::default()
        };
        assert!(lines(&ir("query Feed { feed }"), &config, &[]).is_empty());
    }

    #[test]
    fn test_external_mode_namespace_import() {
        let config = PluginConfig {
            document_mode: DocumentMode::External,
            import_document_node_externally_from: Some(ExternalModule::Path("./operations.ts".into())),
            ..PluginConfig::default()
        };
        let out = lines(&ir("query Feed { feed }"), &config, &[]);
        assert_eq!(out, vec!["import * as Operations from './operations';"]);
    }

    #[test]
    fn test_external_mode_without_operations_imports_nothing() {
        let config = PluginConfig {
            document_mode: DocumentMode::External,
            ..PluginConfig::default()
        };
        // No module configured either: the error only matters when something is bound.
        assert!(lines(&ir("fragment F on User { id }"), &config, &[]).is_empty());
    }

    #[test]
    fn test_external_mode_requires_module() {
        let config = PluginConfig {
            document_mode: DocumentMode::External,
            ..PluginConfig::default()
        };
        let err = document_imports(&ir("query Feed { feed }"), &config, &[]).unwrap_err();
        assert!(matches!(err, CompilerError::MissingExternalModule));
    }

    #[test]
    fn test_near_operation_file_resolution() {
        let mut config = PluginConfig {
            document_mode: DocumentMode::External,
            import_document_node_externally_from: Some(ExternalModule::NearOperationFile),
            ..PluginConfig::default()
        };
        let doc = ir("query Feed { feed }");
        let source = vec![PathBuf::from("src/queries/feed.graphql")];
        assert_eq!(lines(&doc, &config, &source), vec!["import * as Operations from './feed';"]);

        config.emit_legacy_common_js_imports = false;
        assert_eq!(lines(&doc, &config, &source), vec!["import * as Operations from './feed.js';"]);

        let err = document_imports(&doc, &config, &[source[0].clone(), source[0].clone()]).unwrap_err();
        assert!(matches!(err, CompilerError::NearOperationFileNeedsSingleDocument { count: 2 }));
    }

    #[test]
    fn test_external_fragments_grouped_per_module() {
        let shared = to_ir(
            &[SourceDocument::parse(
                "fragment A on User { id } fragment B on User { name } fragment C on User { login }",
                "shared.graphql",
            )
            .unwrap()],
            Vec::new(),
        )
        .unwrap();
        let externals = shared
            .fragments
            .into_iter()
            .map(|fragment| ExternalFragment {
                fragment,
                import_from: "./shared.generated".to_string(),
            })
            .collect();

        let doc = SourceDocument::parse("query Me { me { ...B ...A } }", "me.graphql").unwrap();
        let ir = to_ir(&[doc], externals).unwrap();
        let out = lines(&ir, &PluginConfig::default(), &[]);
        assert_eq!(
            out,
            vec![
                "import gql from 'graphql-tag';",
                "import { AFragmentDoc, BFragmentDoc } from './shared.generated';",
            ]
        );
    }
}

//! Plugin and project configuration.
//!
//! Plugin options arrive as a flat JSON object. Every recognized option is read
//! on its own and falls back to its default; there are no cross-option checks
//! and unknown keys are ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::diagnostic::CompilerError;

/// Options this plugin understands. Anything else in the map is ignored.
const KNOWN_OPTIONS: &[&str] = &[
    "target",
    "dedupeOperationSuffix",
    "omitOperationSuffix",
    "addDocBlocks",
    "documentMode",
    "importDocumentNodeExternallyFrom",
    "emitLegacyCommonJSImports",
    "gqlImport",
    "documentNodeImport",
    "vueApolloComposableImportFrom",
    "vueCompositionApiImportFrom",
    "urqlImportFrom",
    "withCompositionFunctions",
    "typesPrefix",
    "typesSuffix",
    "operationResultSuffix",
    "namingConvention",
    "transformUnderscore",
    "documentVariablePrefix",
    "documentVariableSuffix",
    "fragmentVariablePrefix",
    "fragmentVariableSuffix",
    "pureMagicComment",
    "noExport",
];

/// Client library the composition functions are bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// `@vue/apollo-composable`
    VueApollo,
    /// `@urql/vue`
    VueUrql,
}

impl Target {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "vue-apollo" | "apollo" => Some(Self::VueApollo),
            "vue-urql" | "urql" => Some(Self::VueUrql),
            _ => None,
        }
    }
}

/// How parsed documents are made available to the composition functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentMode {
    /// Inline `gql` tagged templates.
    GraphQLTag,
    /// Inline pre-parsed AST objects.
    DocumentNode,
    /// Pre-parsed AST objects that splice fragment definitions from their constants.
    DocumentNodeImportFragments,
    /// Inline plain template strings.
    String,
    /// Document constants live in another module, imported as `Operations`.
    External,
}

impl DocumentMode {
    fn parse(value: &str) -> Option<Self> {
        match value {
            "graphQLTag" => Some(Self::GraphQLTag),
            "documentNode" => Some(Self::DocumentNode),
            "documentNodeImportFragments" => Some(Self::DocumentNodeImportFragments),
            "string" => Some(Self::String),
            "external" => Some(Self::External),
            _ => None,
        }
    }

    /// Whether document constants are declared in the generated module.
    pub fn is_inline(self) -> bool {
        self != Self::External
    }
}

/// Case conversion applied to GraphQL names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingConvention {
    PascalCase,
    Keep,
}

/// Source of the externally imported document constants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalModule {
    /// `./<stem>` of the single source document.
    NearOperationFile,
    /// A fixed module path.
    Path(String),
}

/// A `module` or `module#export` import reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub module: String,
    pub export: Option<String>,
}

impl ImportSpec {
    pub fn parse(value: &str) -> Self {
        match value.split_once('#') {
            Some((module, export)) if !export.is_empty() => Self {
                module: module.to_string(),
                export: Some(export.to_string()),
            },
            Some((module, _)) => Self {
                module: module.to_string(),
                export: None,
            },
            None => Self {
                module: value.to_string(),
                export: None,
            },
        }
    }
}

/// Effective plugin options after defaulting.
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub target: Target,
    pub dedupe_operation_suffix: bool,
    pub omit_operation_suffix: bool,
    pub add_doc_blocks: bool,
    pub document_mode: DocumentMode,
    pub import_document_node_externally_from: Option<ExternalModule>,
    pub emit_legacy_common_js_imports: bool,
    pub gql_import: ImportSpec,
    pub document_node_import: ImportSpec,
    pub vue_apollo_composable_import_from: String,
    pub vue_composition_api_import_from: String,
    pub urql_import_from: String,
    pub with_composition_functions: bool,
    pub types_prefix: String,
    pub types_suffix: String,
    pub operation_result_suffix: String,
    pub naming_convention: NamingConvention,
    pub transform_underscore: bool,
    pub document_variable_prefix: String,
    pub document_variable_suffix: String,
    pub fragment_variable_prefix: String,
    pub fragment_variable_suffix: String,
    pub pure_magic_comment: bool,
    pub no_export: bool,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            target: Target::VueApollo,
            dedupe_operation_suffix: false,
            omit_operation_suffix: false,
            add_doc_blocks: true,
            document_mode: DocumentMode::GraphQLTag,
            import_document_node_externally_from: None,
            emit_legacy_common_js_imports: true,
            gql_import: ImportSpec::parse("graphql-tag"),
            document_node_import: ImportSpec::parse("graphql#DocumentNode"),
            vue_apollo_composable_import_from: "@vue/apollo-composable".to_string(),
            vue_composition_api_import_from: "vue".to_string(),
            urql_import_from: "@urql/vue".to_string(),
            with_composition_functions: true,
            types_prefix: String::new(),
            types_suffix: String::new(),
            operation_result_suffix: String::new(),
            naming_convention: NamingConvention::PascalCase,
            transform_underscore: false,
            document_variable_prefix: String::new(),
            document_variable_suffix: "Document".to_string(),
            fragment_variable_prefix: String::new(),
            fragment_variable_suffix: "FragmentDoc".to_string(),
            pure_magic_comment: false,
            no_export: false,
        }
    }
}

impl PluginConfig {
    /// Resolves a flat option map into effective options.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        for key in map.keys() {
            if !KNOWN_OPTIONS.contains(&key.as_str()) {
                tracing::debug!(option = %key, "ignoring unrecognized option");
            }
        }

        let defaults = Self::default();

        let target = text(map, "target")
            .and_then(|v| Target::parse(&v))
            .unwrap_or(defaults.target);

        let document_mode = text(map, "documentMode")
            .and_then(|v| DocumentMode::parse(&v))
            .unwrap_or(defaults.document_mode);

        let import_document_node_externally_from =
            text(map, "importDocumentNodeExternallyFrom").map(|v| {
                if v == "near-operation-file" {
                    ExternalModule::NearOperationFile
                } else {
                    ExternalModule::Path(v)
                }
            });

        let naming_convention = match text(map, "namingConvention").as_deref() {
            Some("keep") | Some("change-case-all#keep") => NamingConvention::Keep,
            Some(_) | None => NamingConvention::PascalCase,
        };

        Self {
            target,
            dedupe_operation_suffix: flag(
                map,
                "dedupeOperationSuffix",
                defaults.dedupe_operation_suffix,
            ),
            omit_operation_suffix: flag(
                map,
                "omitOperationSuffix",
                defaults.omit_operation_suffix,
            ),
            add_doc_blocks: flag(map, "addDocBlocks", defaults.add_doc_blocks),
            document_mode,
            import_document_node_externally_from,
            emit_legacy_common_js_imports: flag(
                map,
                "emitLegacyCommonJSImports",
                defaults.emit_legacy_common_js_imports,
            ),
            gql_import: text(map, "gqlImport")
                .map(|v| ImportSpec::parse(&v))
                .unwrap_or(defaults.gql_import),
            document_node_import: text(map, "documentNodeImport")
                .map(|v| ImportSpec::parse(&v))
                .unwrap_or(defaults.document_node_import),
            vue_apollo_composable_import_from: text(map, "vueApolloComposableImportFrom")
                .unwrap_or(defaults.vue_apollo_composable_import_from),
            vue_composition_api_import_from: text(map, "vueCompositionApiImportFrom")
                .unwrap_or(defaults.vue_composition_api_import_from),
            urql_import_from: text(map, "urqlImportFrom").unwrap_or(defaults.urql_import_from),
            with_composition_functions: flag(
                map,
                "withCompositionFunctions",
                defaults.with_composition_functions,
            ),
            types_prefix: text(map, "typesPrefix").unwrap_or(defaults.types_prefix),
            types_suffix: text(map, "typesSuffix").unwrap_or(defaults.types_suffix),
            operation_result_suffix: text(map, "operationResultSuffix")
                .unwrap_or(defaults.operation_result_suffix),
            naming_convention,
            transform_underscore: flag(
                map,
                "transformUnderscore",
                defaults.transform_underscore,
            ),
            document_variable_prefix: text(map, "documentVariablePrefix")
                .unwrap_or(defaults.document_variable_prefix),
            document_variable_suffix: text(map, "documentVariableSuffix")
                .unwrap_or(defaults.document_variable_suffix),
            fragment_variable_prefix: text(map, "fragmentVariablePrefix")
                .unwrap_or(defaults.fragment_variable_prefix),
            fragment_variable_suffix: text(map, "fragmentVariableSuffix")
                .unwrap_or(defaults.fragment_variable_suffix),
            pure_magic_comment: flag(map, "pureMagicComment", defaults.pure_magic_comment),
            no_export: flag(map, "noExport", defaults.no_export),
        }
    }
}

/// Reads a boolean option, accepting JSON booleans and "true"/"false" strings.
fn flag(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    match map.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => true,
            "false" => false,
            _ => default,
        },
        _ => default,
    }
}

/// Reads a string option.
fn text(map: &Map<String, Value>, key: &str) -> Option<String> {
    match map.get(key) {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// How generated modules are laid out on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Preset {
    /// One module for all documents.
    #[default]
    #[serde(rename = "single-file")]
    SingleFile,
    /// One module beside every document.
    #[serde(rename = "near-operation-file")]
    NearOperationFile,
}

/// Project configuration, read from `codegen.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Schema SDL file.
    pub schema: PathBuf,

    /// Document files or directories to scan for `.graphql`/`.gql` files.
    pub documents: Vec<PathBuf>,

    /// Output file for the single-file preset.
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Output layout.
    #[serde(default)]
    pub preset: Preset,

    /// Extension of modules generated by the near-operation-file preset.
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Flat plugin options.
    #[serde(default)]
    pub config: Map<String, Value>,
}

fn default_output() -> PathBuf {
    PathBuf::from("src/generated/operations.ts")
}

fn default_extension() -> String {
    ".generated.ts".to_string()
}

impl ProjectConfig {
    /// Loads a project file.
    ///
    /// Relative paths inside the file are resolved against the file's
    /// canonical directory, so every path of a loaded project is absolute.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let io_error = |e: std::io::Error| CompilerError::io(path, e.to_string());
        let source = std::fs::read_to_string(path).map_err(io_error)?;
        let mut config: ProjectConfig =
            serde_json::from_str(&source).map_err(|e| CompilerError::InvalidProjectConfig {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        let file = std::fs::canonicalize(path).map_err(io_error)?;
        if let Some(base) = file.parent() {
            config.rebase(base);
        }
        Ok(config)
    }

    /// Effective plugin options.
    pub fn plugin_config(&self) -> PluginConfig {
        PluginConfig::from_map(&self.config)
    }

    /// Paths that should trigger regeneration when they change.
    pub fn watched_paths(&self) -> Vec<PathBuf> {
        let mut paths = vec![self.schema.clone()];
        paths.extend(self.documents.iter().cloned());
        paths
    }

    fn rebase(&mut self, base: &Path) {
        let join = |p: &Path| if p.is_absolute() { p.to_path_buf() } else { base.join(p) };
        self.schema = join(&self.schema);
        self.documents = self.documents.iter().map(|d| join(d)).collect();
        self.output = join(&self.output);
    }
}

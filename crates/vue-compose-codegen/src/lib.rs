//! # vue-compose codegen
//!
//! Generates TypeScript that binds GraphQL operations to Vue's composition API
//! through a client library (`@vue/apollo-composable` or `@urql/vue`).
//!
//! ## Architecture
//!
//! ```text
//! Schema SDL + Documents
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Frontend   │  graphql-parser
//! │ (src → AST)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │      IR      │  Dedupe fragments, dependency order
//! │  (AST → IR)  │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Validate   │  Root types, type conditions
//! │   (IR)       │
//! └──────┬───────┘
//!        │
//!        ▼
//! ┌──────────────┐
//! │   Codegen    │  Imports, document constants,
//! │  (IR → TS)   │  composition functions
//! └──────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vue_compose_codegen::{plugin, Schema, SourceDocument};
//!
//! let schema = Schema::parse(sdl, "schema.graphql".as_ref())?;
//! let documents = vec![SourceDocument::parse(source, "feed.graphql")?];
//! let output = plugin(&schema, &documents, &options)?;
//! std::fs::write("feed.generated.ts", output.render())?;
//! ```

pub mod codegen;
pub mod config;
pub mod diagnostic;
pub mod frontend;
pub mod ir;
pub mod preset;
pub mod validate;

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

pub use codegen::PluginOutput;
pub use config::{PluginConfig, Preset, ProjectConfig};
pub use diagnostic::CompilerError;
pub use frontend::{Schema, SourceDocument};

use ir::{DocumentIR, ExternalFragment};

/// Runs the plugin over one document set with a flat option map.
pub fn plugin(
    schema: &Schema,
    documents: &[SourceDocument],
    options: &Map<String, Value>,
) -> Result<PluginOutput, CompilerError> {
    let config = PluginConfig::from_map(options);
    Generator::new(schema, &config).generate(documents)
}

/// One plugin invocation with resolved options.
pub struct Generator<'a> {
    schema: &'a Schema,
    config: &'a PluginConfig,
    external_fragments: Vec<ExternalFragment>,
}

impl<'a> Generator<'a> {
    pub fn new(schema: &'a Schema, config: &'a PluginConfig) -> Self {
        Self {
            schema,
            config,
            external_fragments: Vec::new(),
        }
    }

    /// Fragments that documents may spread without declaring them.
    pub fn with_external_fragments(mut self, fragments: Vec<ExternalFragment>) -> Self {
        self.external_fragments = fragments;
        self
    }

    /// Lowers, validates and generates.
    pub fn generate(&self, documents: &[SourceDocument]) -> Result<PluginOutput, CompilerError> {
        let ir = frontend::to_ir::to_ir(documents, self.external_fragments.clone())?;
        validate::validate_documents(&ir, self.schema)?;

        let sources: Vec<PathBuf> = documents.iter().map(|d| d.location.clone()).collect();
        codegen::generate(&ir, self.config, &sources)
    }
}

/// Drives generation for a project: loads files, runs the plugin, writes modules.
pub struct Compiler {
    project: ProjectConfig,
}

impl Compiler {
    pub fn new(project: ProjectConfig) -> Self {
        Self { project }
    }

    /// Loads and compiles the project.
    ///
    /// 1. Parse the schema and every document
    /// 2. Lower the whole document set and validate it
    /// 3. Generate one module (single-file) or one per document (near-operation-file)
    /// 4. Write the modules
    pub fn compile(&self) -> Result<CompileResult, CompilerError> {
        let (schema, documents, ir) = self.load()?;
        let config = self.project.plugin_config();

        let files = match self.project.preset {
            Preset::SingleFile => {
                let output = Generator::new(&schema, &config).generate(&documents)?;
                write_module(&self.project.output, &output)?;
                vec![self.project.output.clone()]
            }
            Preset::NearOperationFile => {
                self.compile_near_operation_files(&schema, &config, &documents, &ir)?
            }
        };

        Ok(CompileResult {
            operations: ir.operations.len(),
            fragments: ir.fragments.len(),
            files,
        })
    }

    /// Parses, lowers and validates without writing anything.
    pub fn check(&self) -> Result<CompileResult, CompilerError> {
        let (_, _, ir) = self.load()?;
        Ok(CompileResult {
            operations: ir.operations.len(),
            fragments: ir.fragments.len(),
            files: Vec::new(),
        })
    }

    fn load(&self) -> Result<(Schema, Vec<SourceDocument>, DocumentIR), CompilerError> {
        let schema = frontend::load_schema(&self.project.schema)?;
        let documents = frontend::load_documents(&self.project.documents)?;
        if documents.is_empty() {
            return Err(CompilerError::NoDocuments);
        }

        let ir = frontend::to_ir::to_ir(&documents, Vec::new())?;
        validate::validate_documents(&ir, &schema)?;
        Ok((schema, documents, ir))
    }

    fn compile_near_operation_files(
        &self,
        schema: &Schema,
        config: &PluginConfig,
        documents: &[SourceDocument],
        all: &DocumentIR,
    ) -> Result<Vec<PathBuf>, CompilerError> {
        let with_js_extension = !config.emit_legacy_common_js_imports;
        let mut files = Vec::new();

        for document in documents {
            if !document.has_operations() && !document.has_fragments() {
                continue;
            }
            let externals = preset::external_fragments(
                document,
                all,
                &self.project.extension,
                with_js_extension,
            );
            let output = Generator::new(schema, config)
                .with_external_fragments(externals)
                .generate(std::slice::from_ref(document))?;

            let path = preset::output_path(&document.location, &self.project.extension);
            write_module(&path, &output)?;
            files.push(path);
        }

        Ok(files)
    }
}

fn write_module(path: &Path, output: &PluginOutput) -> Result<(), CompilerError> {
    let write_error = |e: std::io::Error| CompilerError::WriteError {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(write_error)?;
    }
    std::fs::write(path, output.render()).map_err(write_error)?;
    tracing::info!(path = %path.display(), "wrote module");
    Ok(())
}

/// Result of a successful compilation.
#[derive(Debug)]
pub struct CompileResult {
    /// Number of named operations.
    pub operations: usize,
    /// Number of distinct fragments.
    pub fragments: usize,
    /// Modules written, empty for a check.
    pub files: Vec<PathBuf>,
}

//! GraphQL frontend: loading and parsing schema and documents.
//!
//! Parsing is delegated to `graphql-parser`; this module only finds files,
//! attaches source locations and lowers the parsed documents into the IR.

pub mod schema;
pub mod to_ir;

use std::path::{Path, PathBuf};

use graphql_parser::query::{Definition, OperationDefinition};
use walkdir::WalkDir;

use crate::diagnostic::CompilerError;
use crate::ir::ast;

pub use schema::Schema;

/// File extensions recognized as GraphQL documents.
pub const DOCUMENT_EXTENSIONS: &[&str] = &["graphql", "gql"];

/// A parsed document together with where it came from.
#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub location: PathBuf,
    pub document: ast::Document,
}

impl SourceDocument {
    /// Parses GraphQL source text.
    pub fn parse(source: &str, location: impl Into<PathBuf>) -> Result<Self, CompilerError> {
        let location = location.into();
        let document = graphql_parser::parse_query::<String>(source)
            .map_err(|e| CompilerError::DocumentParseFailed {
                path: location.clone(),
                message: e.to_string(),
            })?
            .into_static();
        Ok(Self { location, document })
    }

    /// Reads and parses a document file.
    pub fn load(path: &Path) -> Result<Self, CompilerError> {
        let source =
            std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;
        Self::parse(&source, path)
    }

    /// Whether the document declares at least one named operation.
    pub fn has_operations(&self) -> bool {
        self.document.definitions.iter().any(|def| match def {
            Definition::Operation(OperationDefinition::Query(q)) => q.name.is_some(),
            Definition::Operation(OperationDefinition::Mutation(m)) => m.name.is_some(),
            Definition::Operation(OperationDefinition::Subscription(s)) => s.name.is_some(),
            Definition::Operation(OperationDefinition::SelectionSet(_)) => false,
            Definition::Fragment(_) => false,
        })
    }

    /// Whether the document declares at least one fragment.
    pub fn has_fragments(&self) -> bool {
        self.document
            .definitions
            .iter()
            .any(|def| matches!(def, Definition::Fragment(_)))
    }

    /// File name without its extension (`feed` for `src/feed.graphql`).
    pub fn stem(&self) -> String {
        file_stem(&self.location)
    }
}

/// File name of `path` without its last extension.
pub fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// Reads and parses the schema SDL file.
pub fn load_schema(path: &Path) -> Result<Schema, CompilerError> {
    let source = std::fs::read_to_string(path).map_err(|e| CompilerError::io(path, e.to_string()))?;
    Schema::parse(&source, path)
}

/// Loads every document under the given files and directories.
///
/// Directories are walked recursively; files inside them are picked up by
/// extension and visited in file-name order so output is deterministic.
/// Paths given explicitly are loaded regardless of extension.
pub fn load_documents(paths: &[PathBuf]) -> Result<Vec<SourceDocument>, CompilerError> {
    let mut documents = Vec::new();

    for root in paths {
        if root.is_file() {
            documents.push(SourceDocument::load(root)?);
            continue;
        }
        if !root.exists() {
            return Err(CompilerError::io(root, "no such file or directory"));
        }

        for entry in WalkDir::new(root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let is_document = path
                .extension()
                .map(|ext| DOCUMENT_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
                .unwrap_or(false);
            if is_document {
                documents.push(SourceDocument::load(path)?);
            }
        }
    }

    tracing::debug!(count = documents.len(), "loaded documents");
    Ok(documents)
}

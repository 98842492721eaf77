//! Compiler error types.
#![allow(unused_assignments)]

use std::path::PathBuf;
use miette::Diagnostic;
use thiserror::Error;

use super::Location;

/// Errors that can occur during generation.
#[allow(unused_assignments)]
#[derive(Error, Diagnostic, Debug)]
pub enum CompilerError {
    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("Failed to read file '{path}': {message}")]
    #[diagnostic(code(vue_compose::io::read_error))]
    IoError {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to write file '{path}': {message}")]
    #[diagnostic(code(vue_compose::io::write_error))]
    WriteError {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("Failed to parse GraphQL document {}: {message}", path.display())]
    #[diagnostic(
        code(vue_compose::parse::document),
        help("Documents must contain only executable definitions (operations and fragments).")
    )]
    DocumentParseFailed {
        path: PathBuf,
        message: String,
    },

    #[error("Failed to parse GraphQL schema {}: {message}", path.display())]
    #[diagnostic(code(vue_compose::parse::schema))]
    SchemaParseFailed {
        path: PathBuf,
        message: String,
    },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Failed to read project configuration {}: {message}", path.display())]
    #[diagnostic(
        code(vue_compose::config::invalid_project),
        help("codegen.json needs at least \"schema\", \"documents\" and \"output\".")
    )]
    InvalidProjectConfig {
        path: PathBuf,
        message: String,
    },

    #[error("documentMode 'external' needs importDocumentNodeExternallyFrom")]
    #[diagnostic(
        code(vue_compose::config::missing_external_module),
        help("Set importDocumentNodeExternallyFrom to a module path or to 'near-operation-file'.")
    )]
    MissingExternalModule,

    #[error("importDocumentNodeExternallyFrom 'near-operation-file' needs exactly one document, got {count}")]
    #[diagnostic(
        code(vue_compose::config::near_operation_file),
        help("Use the near-operation-file preset so every document is generated on its own.")
    )]
    NearOperationFileNeedsSingleDocument {
        count: usize,
    },

    // =========================================================================
    // Analysis Errors
    // =========================================================================
    #[error("No GraphQL documents found")]
    #[diagnostic(
        code(vue_compose::analysis::no_documents),
        help("Point \"documents\" at .graphql/.gql files or directories containing them.")
    )]
    NoDocuments,

    #[error("Fragment '{name}' is defined twice with different selections")]
    #[diagnostic(
        code(vue_compose::analysis::duplicate_fragment),
        help("Fragment names must be unique across all documents.")
    )]
    DuplicateFragment {
        name: String,
        first: Location,
        second: Location,
    },

    #[error("Operation '{name}' is defined twice with different selections")]
    #[diagnostic(
        code(vue_compose::analysis::duplicate_operation),
        help("Operation names must be unique across all documents.")
    )]
    DuplicateOperation {
        name: String,
        first: Location,
        second: Location,
    },

    #[error("Unknown fragment '{name}' spread at {location}")]
    #[diagnostic(code(vue_compose::analysis::unknown_fragment))]
    UnknownFragment {
        name: String,
        location: Location,
    },

    #[error("Circular fragment reference: {}", cycle.join(" -> "))]
    #[diagnostic(
        code(vue_compose::analysis::circular_fragment),
        help("A fragment cannot spread itself, directly or through other fragments.")
    )]
    CircularFragment {
        cycle: Vec<String>,
    },

    // =========================================================================
    // Schema Errors
    // =========================================================================
    #[error("Schema has no {kind} root type, needed by operation '{operation}'")]
    #[diagnostic(code(vue_compose::schema::missing_root_type))]
    MissingRootType {
        kind: String,
        operation: String,
    },

    #[error("Unknown type '{name}' in type condition at {location}")]
    #[diagnostic(code(vue_compose::schema::unknown_type))]
    UnknownType {
        name: String,
        location: Location,
    },
}

impl CompilerError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::IoError {
            path: path.into(),
            message: message.into(),
        }
    }
}

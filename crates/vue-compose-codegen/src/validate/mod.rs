//! Validation of the document IR against the schema.

mod schema;

use crate::diagnostic::CompilerError;
use crate::frontend::Schema;
use crate::ir::DocumentIR;

/// Validates the lowered documents.
pub fn validate_documents(documents: &DocumentIR, schema: &Schema) -> Result<(), CompilerError> {
    schema::validate_root_types(documents, schema)?;
    schema::validate_type_conditions(documents, schema)?;
    Ok(())
}

//! Schema-level checks.
//!
//! Only what the generator relies on is checked: every operation kind has a
//! root type to select from, and every type condition names a declared type.

use graphql_parser::query::{Selection, TypeCondition};

use crate::diagnostic::{CompilerError, Location};
use crate::frontend::Schema;
use crate::ir::{ast, walk_selections, DocumentIR};

/// Every operation's kind must have a root type in the schema.
pub fn validate_root_types(documents: &DocumentIR, schema: &Schema) -> Result<(), CompilerError> {
    for operation in &documents.operations {
        if schema.root_type(operation.kind).is_none() {
            return Err(CompilerError::MissingRootType {
                kind: operation.kind.keyword().to_string(),
                operation: operation.name.clone(),
            });
        }
    }
    Ok(())
}

/// Fragment and inline-fragment type conditions must name declared types.
pub fn validate_type_conditions(
    documents: &DocumentIR,
    schema: &Schema,
) -> Result<(), CompilerError> {
    for fragment in &documents.fragments {
        if !schema.has_type(&fragment.type_condition) {
            return Err(CompilerError::UnknownType {
                name: fragment.type_condition.clone(),
                location: fragment.location.clone(),
            });
        }
        check_inline_fragments(&fragment.definition.selection_set, &fragment.location, schema)?;
    }

    for operation in &documents.operations {
        check_inline_fragments(operation.selection_set(), &operation.location, schema)?;
    }

    Ok(())
}

fn check_inline_fragments(
    set: &ast::SelectionSet,
    owner: &Location,
    schema: &Schema,
) -> Result<(), CompilerError> {
    let mut unknown: Option<CompilerError> = None;

    walk_selections(set, &mut |selection| {
        if unknown.is_some() {
            return;
        }
        if let Selection::InlineFragment(inline) = selection {
            if let Some(TypeCondition::On(name)) = &inline.type_condition {
                if !schema.has_type(name) {
                    unknown = Some(CompilerError::UnknownType {
                        name: name.clone(),
                        location: Location::from_pos(&owner.file, inline.position),
                    });
                }
            }
        }
    });

    match unknown {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use crate::frontend::{to_ir::to_ir, SourceDocument};

    fn schema() -> Schema {
        Schema::parse(
            "type Query { me: Node } interface Node { id: ID! } type User implements Node { id: ID! }",
            Path::new("schema.graphql"),
        )
        .unwrap()
    }

    fn ir(source: &str) -> DocumentIR {
        let doc = SourceDocument::parse(source, "doc.graphql").unwrap();
        to_ir(&[doc], Vec::new()).unwrap()
    }

    #[test]
    fn test_missing_mutation_root() {
        let err = validate_root_types(&ir("mutation Save { save }"), &schema()).unwrap_err();
        assert!(matches!(err, CompilerError::MissingRootType { ref kind, .. } if kind == "mutation"));
    }

    #[test]
    fn test_known_type_conditions_pass() {
        let documents = ir("query Me { me { ... on User { id } ...N } } fragment N on Node { id }");
        assert!(validate_type_conditions(&documents, &schema()).is_ok());
    }

    #[test]
    fn test_unknown_inline_type_condition() {
        let documents = ir("query Me { me { ... on Robot { id } } }");
        let err = validate_type_conditions(&documents, &schema()).unwrap_err();
        match err {
            CompilerError::UnknownType { name, location } => {
                assert_eq!(name, "Robot");
                assert_eq!(location.line, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_fragment_type_condition() {
        let err = validate_type_conditions(&ir("fragment F on Robot { id }"), &schema()).unwrap_err();
        assert!(matches!(err, CompilerError::UnknownType { ref name, .. } if name == "Robot"));
    }
}

//! Lowering of parsed documents into the IR.

use graphql_parser::query::{Definition, OperationDefinition, TypeCondition};

use crate::diagnostic::{CompilerError, Location};
use crate::ir::{
    ast, fragment_spreads, order_fragments, print_definition, DocumentIR, ExternalFragment,
    FragmentIR, OperationIR, OperationKind, VariableIR,
};
use super::SourceDocument;

/// Lowers a document set into the IR.
///
/// Operations and fragments that appear more than once with identical text
/// are kept once. Anonymous operations are skipped since nothing can be named
/// after them.
pub fn to_ir(
    documents: &[SourceDocument],
    external_fragments: Vec<ExternalFragment>,
) -> Result<DocumentIR, CompilerError> {
    let mut operations: Vec<OperationIR> = Vec::new();
    let mut fragments: Vec<FragmentIR> = Vec::new();

    for doc in documents {
        for definition in &doc.document.definitions {
            match definition {
                Definition::Operation(op) => {
                    let Some(operation) = lower_operation(op, doc)? else {
                        continue;
                    };
                    match operations.iter().find(|o| o.name == operation.name) {
                        Some(existing) if existing.source == operation.source => {
                            tracing::debug!(
                                operation = %operation.name,
                                "skipping duplicate operation"
                            );
                        }
                        Some(existing) => {
                            return Err(CompilerError::DuplicateOperation {
                                name: operation.name,
                                first: existing.location.clone(),
                                second: operation.location,
                            });
                        }
                        None => operations.push(operation),
                    }
                }
                Definition::Fragment(frag) => {
                    let fragment = lower_fragment(frag, doc);
                    match fragments.iter().find(|f| f.name == fragment.name) {
                        Some(existing) if existing.source == fragment.source => {
                            tracing::debug!(
                                fragment = %fragment.name,
                                "skipping duplicate fragment"
                            );
                        }
                        Some(existing) => {
                            return Err(CompilerError::DuplicateFragment {
                                name: fragment.name,
                                first: existing.location.clone(),
                                second: fragment.location,
                            });
                        }
                        None => fragments.push(fragment),
                    }
                }
            }
        }
    }

    // Local declarations shadow external ones with the same name.
    let external_fragments: Vec<ExternalFragment> = external_fragments
        .into_iter()
        .filter(|e| !fragments.iter().any(|f| f.name == e.fragment.name))
        .collect();
    let external_names: Vec<&str> = external_fragments
        .iter()
        .map(|e| e.fragment.name.as_str())
        .collect();

    for operation in &operations {
        for spread in &operation.fragment_spreads {
            let known = fragments.iter().any(|f| &f.name == spread)
                || external_names.contains(&spread.as_str());
            if !known {
                return Err(CompilerError::UnknownFragment {
                    name: spread.clone(),
                    location: operation.location.clone(),
                });
            }
        }
    }

    let fragments = order_fragments(fragments, &external_names)?;

    tracing::debug!(
        operations = operations.len(),
        fragments = fragments.len(),
        external = external_fragments.len(),
        "lowered documents"
    );

    Ok(DocumentIR {
        operations,
        fragments,
        external_fragments,
    })
}

fn lower_operation(
    op: &ast::OperationDefinition,
    doc: &SourceDocument,
) -> Result<Option<OperationIR>, CompilerError> {
    let (kind, name, variables, position) = match op {
        OperationDefinition::Query(q) => (
            OperationKind::Query,
            q.name.clone(),
            &q.variable_definitions,
            q.position,
        ),
        OperationDefinition::Mutation(m) => (
            OperationKind::Mutation,
            m.name.clone(),
            &m.variable_definitions,
            m.position,
        ),
        OperationDefinition::Subscription(s) => (
            OperationKind::Subscription,
            s.name.clone(),
            &s.variable_definitions,
            s.position,
        ),
        OperationDefinition::SelectionSet(set) => {
            tracing::warn!(
                location = %Location::from_pos(&doc.location, set.span.0),
                "skipping anonymous query shorthand"
            );
            return Ok(None);
        }
    };

    let location = Location::from_pos(&doc.location, position);
    let Some(name) = name else {
        tracing::warn!(%location, kind = %kind, "skipping anonymous operation");
        return Ok(None);
    };

    let mut operation = OperationIR {
        name,
        kind,
        variables: variables.iter().map(VariableIR::from_definition).collect(),
        fragment_spreads: Vec::new(),
        source: print_definition(Definition::Operation(op.clone())),
        definition: op.clone(),
        location,
    };
    operation.fragment_spreads = fragment_spreads(operation.selection_set());

    Ok(Some(operation))
}

fn lower_fragment(frag: &ast::FragmentDefinition, doc: &SourceDocument) -> FragmentIR {
    let TypeCondition::On(type_condition) = &frag.type_condition;
    FragmentIR {
        name: frag.name.clone(),
        type_condition: type_condition.clone(),
        dependencies: fragment_spreads(&frag.selection_set),
        source: print_definition(Definition::Fragment(frag.clone())),
        definition: frag.clone(),
        location: Location::from_pos(&doc.location, frag.position),
    }
}

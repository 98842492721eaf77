//! Operation IR types.

use std::fmt;

use graphql_parser::query::{OperationDefinition, Type};

use super::ast;
use crate::diagnostic::Location;

/// The three executable operation kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    /// Keyword used in GraphQL source (`query`).
    pub fn keyword(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// Capitalized kind word used in generated names (`Query`).
    pub fn type_word(self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A variable declared by an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct VariableIR {
    pub name: String,
    /// Declared type as written in GraphQL (`[ID!]!`).
    pub type_ref: String,
    /// Outermost type is non-null.
    pub non_null: bool,
    pub has_default: bool,
}

impl VariableIR {
    pub fn from_definition(def: &ast::VariableDefinition) -> Self {
        Self {
            name: def.name.clone(),
            type_ref: print_type(&def.var_type),
            non_null: matches!(def.var_type, Type::NonNullType(_)),
            has_default: def.default_value.is_some(),
        }
    }
}

/// Prints a type reference in GraphQL syntax.
pub fn print_type(typ: &ast::Type) -> String {
    match typ {
        Type::NamedType(name) => name.clone(),
        Type::ListType(inner) => format!("[{}]", print_type(inner)),
        Type::NonNullType(inner) => format!("{}!", print_type(inner)),
    }
}

/// A named operation ready for code generation.
#[derive(Debug, Clone)]
pub struct OperationIR {
    pub name: String,
    pub kind: OperationKind,
    pub variables: Vec<VariableIR>,
    /// Fragments spread by this operation, first-seen order.
    pub fragment_spreads: Vec<String>,
    pub definition: ast::OperationDefinition,
    /// Canonical printed form.
    pub source: String,
    pub location: Location,
}

impl OperationIR {
    pub fn has_variables(&self) -> bool {
        !self.variables.is_empty()
    }

    /// At least one variable is declared non-null, so callers must pass variables.
    pub fn has_required_variables(&self) -> bool {
        self.variables.iter().any(|v| v.non_null)
    }

    /// Selection set of the underlying definition.
    pub fn selection_set(&self) -> &ast::SelectionSet {
        match &self.definition {
            OperationDefinition::SelectionSet(set) => set,
            OperationDefinition::Query(q) => &q.selection_set,
            OperationDefinition::Mutation(m) => &m.selection_set,
            OperationDefinition::Subscription(s) => &s.selection_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::parse_query;
    use graphql_parser::query::Definition;

    fn variables_of(source: &str) -> Vec<VariableIR> {
        let doc = parse_query::<String>(source).unwrap().into_static();
        match doc.definitions.into_iter().next() {
            Some(Definition::Operation(OperationDefinition::Query(q))) => q
                .variable_definitions
                .iter()
                .map(VariableIR::from_definition)
                .collect(),
            _ => panic!("expected a query"),
        }
    }

    #[test]
    fn test_variable_nullability() {
        let vars = variables_of("query Q($a: Int, $b: [ID!]!, $c: String! = \"x\") { f }");
        assert_eq!(vars.len(), 3);
        assert!(!vars[0].non_null);
        assert!(vars[1].non_null);
        assert_eq!(vars[1].type_ref, "[ID!]!");
        assert!(vars[2].non_null);
        assert!(vars[2].has_default);
    }

    #[test]
    fn test_kind_words() {
        assert_eq!(OperationKind::Subscription.keyword(), "subscription");
        assert_eq!(OperationKind::Mutation.type_word(), "Mutation");
    }
}

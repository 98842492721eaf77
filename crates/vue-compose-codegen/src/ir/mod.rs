//! Intermediate representation of a document set.
//!
//! The IR is produced by the frontend from parsed documents and consumed by the
//! code generators. Fragments are deduplicated by name and held in dependency
//! order; operations keep the order in which they were declared.

mod fragment;
mod operation;

pub use fragment::{order_fragments, ExternalFragment, FragmentIR};
pub use operation::{OperationIR, OperationKind, VariableIR};

use graphql_parser::query::{Selection, SelectionSet};

/// Owned GraphQL AST node types used throughout the crate.
pub mod ast {
    pub type Document = graphql_parser::query::Document<'static, String>;
    pub type Definition = graphql_parser::query::Definition<'static, String>;
    pub type OperationDefinition = graphql_parser::query::OperationDefinition<'static, String>;
    pub type FragmentDefinition = graphql_parser::query::FragmentDefinition<'static, String>;
    pub type SelectionSet = graphql_parser::query::SelectionSet<'static, String>;
    pub type Selection = graphql_parser::query::Selection<'static, String>;
    pub type VariableDefinition = graphql_parser::query::VariableDefinition<'static, String>;
    pub type Type = graphql_parser::query::Type<'static, String>;
    pub type Value = graphql_parser::query::Value<'static, String>;
    pub type Directive = graphql_parser::query::Directive<'static, String>;
}

/// All operations and fragments of one plugin invocation.
#[derive(Debug, Clone, Default)]
pub struct DocumentIR {
    /// Named operations in declaration order.
    pub operations: Vec<OperationIR>,
    /// Fragments declared in this document set, dependencies first.
    pub fragments: Vec<FragmentIR>,
    /// Fragments declared elsewhere and imported by the generated module.
    pub external_fragments: Vec<ExternalFragment>,
}

impl DocumentIR {
    /// Whether any executable operation was collected.
    pub fn has_operations(&self) -> bool {
        !self.operations.is_empty()
    }

    /// Looks up a fragment by name, local fragments first.
    pub fn fragment(&self, name: &str) -> Option<&FragmentIR> {
        self.fragments
            .iter()
            .find(|f| f.name == name)
            .or_else(|| {
                self.external_fragments
                    .iter()
                    .map(|e| &e.fragment)
                    .find(|f| f.name == name)
            })
    }

    /// Whether the fragment is imported rather than declared here.
    pub fn is_external(&self, name: &str) -> bool {
        !self.fragments.iter().any(|f| f.name == name)
            && self.external_fragments.iter().any(|e| e.fragment.name == name)
    }

    /// Every fragment reachable from `direct`, dependencies first.
    pub fn transitive_fragments<'a>(&'a self, direct: &[String]) -> Vec<&'a FragmentIR> {
        let mut out: Vec<&FragmentIR> = Vec::new();
        for name in direct {
            self.collect_fragment(name, &mut out);
        }
        out
    }

    fn collect_fragment<'a>(&'a self, name: &str, out: &mut Vec<&'a FragmentIR>) {
        if out.iter().any(|f| f.name == name) {
            return;
        }
        if let Some(fragment) = self.fragment(name) {
            for dep in &fragment.dependencies {
                self.collect_fragment(dep, out);
            }
            if !out.iter().any(|f| f.name == name) {
                out.push(fragment);
            }
        }
    }
}

/// Visits every selection in a selection set, depth-first.
pub fn walk_selections<'s, F>(set: &'s SelectionSet<'static, String>, visit: &mut F)
where
    F: FnMut(&'s Selection<'static, String>),
{
    for item in &set.items {
        visit(item);
        match item {
            Selection::Field(field) => walk_selections(&field.selection_set, visit),
            Selection::InlineFragment(inline) => walk_selections(&inline.selection_set, visit),
            Selection::FragmentSpread(_) => {}
        }
    }
}

/// Names of fragments spread anywhere in the selection set, first-seen order.
pub fn fragment_spreads(set: &SelectionSet<'static, String>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    walk_selections(set, &mut |selection| {
        if let Selection::FragmentSpread(spread) = selection {
            if !names.contains(&spread.fragment_name) {
                names.push(spread.fragment_name.clone());
            }
        }
    });
    names
}

/// Prints a definition the way GraphQL tooling canonically formats it.
pub fn print_definition(definition: ast::Definition) -> String {
    let document = ast::Document {
        definitions: vec![definition],
    };
    document.to_string().trim_end().to_string()
}

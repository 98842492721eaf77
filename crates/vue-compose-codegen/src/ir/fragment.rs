//! Fragment IR types and dependency ordering.

use crate::diagnostic::{CompilerError, Location};
use super::ast;

/// A named fragment ready for code generation.
#[derive(Debug, Clone)]
pub struct FragmentIR {
    pub name: String,
    pub type_condition: String,
    /// Fragments spread by this fragment, first-seen order.
    pub dependencies: Vec<String>,
    pub definition: ast::FragmentDefinition,
    /// Canonical printed form.
    pub source: String,
    pub location: Location,
}

/// A fragment declared in another generated module.
#[derive(Debug, Clone)]
pub struct ExternalFragment {
    pub fragment: FragmentIR,
    /// Module the fragment's document constant is imported from.
    pub import_from: String,
}

/// Orders fragments so that every fragment follows the fragments it spreads.
///
/// The order is stable: independent fragments keep their input order, and a
/// fragment's dependencies are placed in the order it spreads them. Names in
/// `known_elsewhere` may be spread without being part of `fragments`.
pub fn order_fragments(
    fragments: Vec<FragmentIR>,
    known_elsewhere: &[&str],
) -> Result<Vec<FragmentIR>, CompilerError> {
    #[derive(Clone, Copy, PartialEq)]
    enum Mark {
        Unvisited,
        InProgress,
        Done,
    }

    fn visit(
        index: usize,
        fragments: &[FragmentIR],
        known_elsewhere: &[&str],
        marks: &mut [Mark],
        stack: &mut Vec<String>,
        order: &mut Vec<usize>,
    ) -> Result<(), CompilerError> {
        match marks[index] {
            Mark::Done => return Ok(()),
            Mark::InProgress => {
                let name = &fragments[index].name;
                let start = stack.iter().position(|n| n == name).unwrap_or(0);
                let mut cycle: Vec<String> = stack[start..].to_vec();
                cycle.push(name.clone());
                return Err(CompilerError::CircularFragment { cycle });
            }
            Mark::Unvisited => {}
        }

        marks[index] = Mark::InProgress;
        stack.push(fragments[index].name.clone());

        for dep in &fragments[index].dependencies {
            match fragments.iter().position(|f| &f.name == dep) {
                Some(dep_index) => {
                    visit(dep_index, fragments, known_elsewhere, marks, stack, order)?
                }
                None if known_elsewhere.contains(&dep.as_str()) => {}
                None => {
                    return Err(CompilerError::UnknownFragment {
                        name: dep.clone(),
                        location: fragments[index].location.clone(),
                    })
                }
            }
        }

        stack.pop();
        marks[index] = Mark::Done;
        order.push(index);
        Ok(())
    }

    let mut marks = vec![Mark::Unvisited; fragments.len()];
    let mut order = Vec::with_capacity(fragments.len());
    let mut stack = Vec::new();

    for index in 0..fragments.len() {
        visit(index, &fragments, known_elsewhere, &mut marks, &mut stack, &mut order)?;
    }

    let mut slots: Vec<Option<FragmentIR>> = fragments.into_iter().map(Some).collect();
    Ok(order
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect())
}

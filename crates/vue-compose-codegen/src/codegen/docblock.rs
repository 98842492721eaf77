//! Documentation comments emitted above vue-apollo composition functions.

use crate::ir::OperationKind;

/// Renders the doc block for a composition function.
///
/// The text is fixed per operation kind; only the function name and the kind
/// word vary.
pub fn doc_block(kind: OperationKind, function: &str) -> String {
    let keyword = kind.keyword();
    match kind {
        OperationKind::Query | OperationKind::Subscription => format!(
            r#"/**
 * __{function}__
 *
 * To run a {keyword} within a Vue component, call `{function}` and pass it any options that fit your needs.
 * When your component renders, `{function}` returns an object from Apollo Client that contains result, loading and error properties
 * you can use to render your UI.
 *
 * @param variables that will be passed into the {keyword}
 * @param options that will be passed into the {keyword}, supported options are listed on: https://v4.apollo.vuejs.org/guide-composable/{keyword}.html#options;
 *
 * @example
 * const {{ result, loading, error }} = {function}(
 *   {{
 *   }}
 * );
 */"#
        ),
        OperationKind::Mutation => format!(
            r#"/**
 * __{function}__
 *
 * To run a mutation, you first call `{function}` within a Vue component and pass it any options that fit your needs.
 * When your component renders, `{function}` returns an object that includes:
 * - A mutate function that you can call at any time to execute the mutation
 * - Several other properties: https://v4.apollo.vuejs.org/api/use-mutation.html#return
 *
 * @param options that will be passed into the mutation, supported options are listed on: https://v4.apollo.vuejs.org/guide-composable/mutation.html#options;
 *
 * @example
 * const {{ mutate, loading, error, onDone }} = {function}({{
 *   variables: {{
 *   }},
 * }});
 */"#
        ),
    }
}

//! `@urql/vue` bindings.

use crate::config::PluginConfig;
use crate::ir::OperationKind;
use super::{CompositionTarget, OperationBinding};

pub struct VueUrqlTarget;

impl CompositionTarget for VueUrqlTarget {
    fn name(&self) -> &'static str {
        "vue-urql"
    }

    fn imports(&self, config: &PluginConfig) -> Vec<String> {
        vec![
            format!("import * as Urql from '{}';", config.urql_import_from),
            "export type Omit<T, K extends keyof T> = Pick<T, Exclude<keyof T, K>>;".to_string(),
        ]
    }

    // urql has no doc blocks; `addDocBlocks` is not consulted.
    fn composition_functions(&self, binding: &OperationBinding, _config: &PluginConfig) -> String {
        let OperationBinding {
            function,
            document,
            result_type: result,
            variables_type: variables,
            ..
        } = binding;
        let default = if binding.has_required_variables { "" } else { " = {}" };

        match binding.kind {
            OperationKind::Query => format!(
                "export function {function}(options: Omit<Urql.UseQueryArgs<never, {variables}>, 'query'>{default}) {{\n  return Urql.useQuery<{result}, {variables}>({{ query: {document}, ...options }});\n}};"
            ),
            OperationKind::Mutation => format!(
                "export function {function}() {{\n  return Urql.useMutation<{result}, {variables}>({document});\n}};"
            ),
            OperationKind::Subscription => format!(
                "export function {function}<R = {result}>(options: Omit<Urql.UseSubscriptionArgs<never, {variables}>, 'query'>{default}, handler?: Urql.SubscriptionHandlerArg<{result}, R>) {{\n  return Urql.useSubscription<{result}, R, {variables}>({{ query: {document}, ...options }}, handler);\n}};"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(kind: OperationKind, required: bool) -> OperationBinding {
        let base = format!("Feed{}", kind.type_word());
        OperationBinding {
            kind,
            document: "FeedDocument".to_string(),
            function: format!("use{}", base),
            lazy_function: String::new(),
            result_type: base.clone(),
            variables_type: format!("{}Variables", base),
            result_alias: format!("{}CompositionFunctionResult", base),
            has_variables: true,
            has_required_variables: required,
        }
    }

    #[test]
    fn test_query() {
        let out = VueUrqlTarget.composition_functions(&binding(OperationKind::Query, false), &PluginConfig::default());
        assert_eq!(
            out,
            "export function useFeedQuery(options: Omit<Urql.UseQueryArgs<never, FeedQueryVariables>, 'query'> = {}) {\n  return Urql.useQuery<FeedQuery, FeedQueryVariables>({ query: FeedDocument, ...options });\n};"
        );
    }

    #[test]
    fn test_required_variables_drop_options_default() {
        let out = VueUrqlTarget.composition_functions(&binding(OperationKind::Query, true), &PluginConfig::default());
        assert!(out.contains("'query'>) {"));
    }

    #[test]
    fn test_mutation() {
        let out = VueUrqlTarget.composition_functions(&binding(OperationKind::Mutation, true), &PluginConfig::default());
        assert_eq!(
            out,
            "export function useFeedMutation() {\n  return Urql.useMutation<FeedMutation, FeedMutationVariables>(FeedDocument);\n};"
        );
    }

    #[test]
    fn test_subscription_handler() {
        let out = VueUrqlTarget.composition_functions(&binding(OperationKind::Subscription, false), &PluginConfig::default());
        assert!(out.starts_with("export function useFeedSubscription<R = FeedSubscription>(options: Omit<Urql.UseSubscriptionArgs<never, FeedSubscriptionVariables>, 'query'> = {}, handler?: Urql.SubscriptionHandlerArg<FeedSubscription, R>) {"));
        assert!(out.contains("return Urql.useSubscription<FeedSubscription, R, FeedSubscriptionVariables>({ query: FeedDocument, ...options }, handler);"));
    }

    #[test]
    fn test_no_doc_blocks() {
        let out = VueUrqlTarget.composition_functions(&binding(OperationKind::Query, false), &PluginConfig::default());
        assert!(!out.contains("/**"));
    }
}

//! `@vue/apollo-composable` bindings.

use crate::config::PluginConfig;
use crate::ir::OperationKind;
use super::docblock::doc_block;
use super::{CompositionTarget, OperationBinding};

pub struct VueApolloTarget;

impl CompositionTarget for VueApolloTarget {
    fn name(&self) -> &'static str {
        "vue-apollo"
    }

    fn imports(&self, config: &PluginConfig) -> Vec<String> {
        vec![
            format!(
                "import * as VueApolloComposable from '{}';",
                config.vue_apollo_composable_import_from
            ),
            format!(
                "import * as VueCompositionApi from '{}';",
                config.vue_composition_api_import_from
            ),
            "export type ReactiveFunction<TParam> = () => TParam;".to_string(),
        ]
    }

    fn composition_functions(&self, binding: &OperationBinding, config: &PluginConfig) -> String {
        let mut parts = Vec::new();
        if config.add_doc_blocks {
            parts.push(doc_block(binding.kind, &binding.function));
        }

        match binding.kind {
            OperationKind::Query => {
                parts.push(reactive_function(
                    binding,
                    &binding.function,
                    "useQuery",
                    "UseQueryOptions",
                ));
                parts.push(reactive_function(
                    binding,
                    &binding.lazy_function,
                    "useLazyQuery",
                    "UseQueryOptions",
                ));
            }
            OperationKind::Mutation => parts.push(mutation_function(binding)),
            OperationKind::Subscription => parts.push(reactive_function(
                binding,
                &binding.function,
                "useSubscription",
                "UseSubscriptionOptions",
            )),
        }

        parts.push(format!(
            "export type {} = VueApolloComposable.Use{}Return<{}, {}>;",
            binding.result_alias,
            binding.kind.type_word(),
            binding.result_type,
            binding.variables_type
        ));
        parts.join("\n")
    }
}

/// A value, a ref to it, or a getter returning it.
fn reactive(type_ref: &str) -> String {
    format!(
        "{t} | VueCompositionApi.Ref<{t}> | ReactiveFunction<{t}>",
        t = type_ref
    )
}

/// Query and subscription functions: `(variables, options)`.
fn reactive_function(
    binding: &OperationBinding,
    name: &str,
    composable: &str,
    options_type: &str,
) -> String {
    let generics = format!("{}, {}", binding.result_type, binding.variables_type);
    let options = reactive(&format!("VueApolloComposable.{}<{}>", options_type, generics));

    let (variables_param, variables_arg) = if !binding.has_variables {
        (String::new(), "{}")
    } else if binding.has_required_variables {
        (format!("variables: {}, ", reactive(&binding.variables_type)), "variables")
    } else {
        (format!("variables: {} = {{}}, ", reactive(&binding.variables_type)), "variables")
    };

    format!(
        "export function {name}({variables_param}options: {options} = {{}}) {{\n  return VueApolloComposable.{composable}<{generics}>({document}, {variables_arg}, options);\n}}",
        document = binding.document,
    )
}

fn mutation_function(binding: &OperationBinding) -> String {
    let generics = format!("{}, {}", binding.result_type, binding.variables_type);
    let options_type = format!("VueApolloComposable.UseMutationOptions<{}>", generics);
    let default = if binding.has_required_variables { "" } else { " = {}" };

    format!(
        "export function {function}(options: {options_type} | ReactiveFunction<{options_type}>{default}) {{\n  return VueApolloComposable.useMutation<{generics}>({document}, options);\n}}",
        function = binding.function,
        document = binding.document,
    )
}

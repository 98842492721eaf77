//! Generated identifier naming.

use crate::config::{NamingConvention, PluginConfig};
use crate::ir::{OperationIR, OperationKind};

/// Derives every generated identifier from GraphQL names and the plugin options.
pub struct Namer<'a> {
    config: &'a PluginConfig,
}

impl<'a> Namer<'a> {
    pub fn new(config: &'a PluginConfig) -> Self {
        Self { config }
    }

    /// Applies the configured naming convention.
    pub fn convert(&self, name: &str) -> String {
        match self.config.naming_convention {
            NamingConvention::Keep => name.to_string(),
            NamingConvention::PascalCase if self.config.transform_underscore => {
                to_pascal_case(name)
            }
            NamingConvention::PascalCase => name
                .split('_')
                .map(to_pascal_case)
                .collect::<Vec<_>>()
                .join("_"),
        }
    }

    /// Kind suffix appended to an operation's name, possibly empty.
    pub fn operation_suffix(&self, name: &str, kind: OperationKind) -> &'static str {
        let word = kind.type_word();
        if self.config.omit_operation_suffix {
            return "";
        }
        if self.config.dedupe_operation_suffix
            && name.to_ascii_lowercase().ends_with(&word.to_ascii_lowercase())
        {
            return "";
        }
        word
    }

    /// Converted operation name plus its kind suffix (`FeedQuery`).
    pub fn operation_base(&self, operation: &OperationIR) -> String {
        format!(
            "{}{}",
            self.convert(&operation.name),
            self.operation_suffix(&operation.name, operation.kind)
        )
    }

    /// Composition function name (`useFeedQuery`). Type prefixes never apply.
    pub fn function_name(&self, operation: &OperationIR) -> String {
        format!("use{}", self.operation_base(operation))
    }

    /// Lazy query function name (`useFeedLazyQuery`).
    ///
    /// Always ends in `LazyQuery`. A kind word dropped by suffix deduplication
    /// is removed from the raw name before conversion, so `feed_query` and
    /// `FeedQuery` both give `useFeedLazyQuery`.
    pub fn lazy_function_name(&self, operation: &OperationIR) -> String {
        let name = operation.name.as_str();
        let word = operation.kind.type_word();
        let deduped = !self.config.omit_operation_suffix
            && self.operation_suffix(name, operation.kind).is_empty();
        let stem = if deduped {
            name[..name.len() - word.len()].trim_end_matches(['_', '-'])
        } else {
            name
        };
        let stem = if stem.is_empty() { name } else { stem };
        format!("use{}LazyQuery", self.convert(stem))
    }

    /// Result type reference (`FeedQuery`).
    pub fn result_type(&self, operation: &OperationIR) -> String {
        format!(
            "{}{}{}{}",
            self.config.types_prefix,
            self.operation_base(operation),
            self.config.operation_result_suffix,
            self.config.types_suffix
        )
    }

    /// Variables type reference (`FeedQueryVariables`).
    pub fn variables_type(&self, operation: &OperationIR) -> String {
        format!(
            "{}{}Variables{}",
            self.config.types_prefix,
            self.operation_base(operation),
            self.config.types_suffix
        )
    }

    /// Exported result alias (`FeedQueryCompositionFunctionResult`).
    pub fn composition_result_type(&self, operation: &OperationIR) -> String {
        format!("{}CompositionFunctionResult", self.operation_base(operation))
    }

    /// Document constant of an operation (`FeedDocument`).
    pub fn document_variable(&self, operation_name: &str) -> String {
        format!(
            "{}{}{}",
            self.config.document_variable_prefix,
            self.convert(operation_name),
            self.config.document_variable_suffix
        )
    }

    /// Document constant of a fragment (`UserFieldsFragmentDoc`).
    pub fn fragment_variable(&self, fragment_name: &str) -> String {
        format!(
            "{}{}{}",
            self.config.fragment_variable_prefix,
            self.convert(fragment_name),
            self.config.fragment_variable_suffix
        )
    }
}

/// Splits a name into words on case changes, digit boundaries and
/// non-alphanumeric characters.
fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }
        if let Some(prev) = current.chars().last() {
            let next = chars.get(i + 1).copied();
            let lower_to_upper =
                (prev.is_ascii_lowercase() || prev.is_ascii_digit()) && c.is_ascii_uppercase();
            let acronym_end = prev.is_ascii_uppercase()
                && c.is_ascii_uppercase()
                && next.map(|n| n.is_ascii_lowercase()).unwrap_or(false);
            if lower_to_upper || acronym_end {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(c);
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Converts a name to PascalCase (`get_user_by-id` -> `GetUserById`).
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) if i > 0 && first.is_ascii_digit() => {
                    format!("_{}{}", first, chars.as_str().to_lowercase())
                }
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.as_str().to_lowercase().chars())
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Location;
    use graphql_parser::query::{OperationDefinition, SelectionSet};
    use graphql_parser::Pos;

    fn operation(name: &str, kind: OperationKind) -> OperationIR {
        OperationIR {
            name: name.to_string(),
            kind,
            variables: Vec::new(),
            fragment_spreads: Vec::new(),
            definition: OperationDefinition::SelectionSet(SelectionSet {
                span: (Pos { line: 1, column: 1 }, Pos { line: 1, column: 1 }),
                items: Vec::new(),
            }),
            source: String::new(),
            location: Location::new("test.graphql", 1, 1),
        }
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_pascal_case("feed"), "Feed");
        assert_eq!(to_pascal_case("getUserById"), "GetUserById");
        assert_eq!(to_pascal_case("myAPIQuery"), "MyApiQuery");
        assert_eq!(to_pascal_case("user-profile"), "UserProfile");
        assert_eq!(to_pascal_case("version2Feed"), "Version2Feed");
    }

    #[test]
    fn test_underscores_are_kept_by_default() {
        let config = PluginConfig::default();
        let namer = Namer::new(&config);
        assert_eq!(namer.convert("get_user"), "Get_User");

        let config = PluginConfig {
            transform_underscore: true,
            ..PluginConfig::default()
        };
        assert_eq!(Namer::new(&config).convert("get_user"), "GetUser");
    }

    #[test]
    fn test_suffix_is_appended_without_dedupe() {
        let config = PluginConfig::default();
        let namer = Namer::new(&config);
        let op = operation("FeedQuery", OperationKind::Query);
        assert_eq!(namer.function_name(&op), "useFeedQueryQuery");
        assert_eq!(namer.document_variable(&op.name), "FeedQueryDocument");
    }

    #[test]
    fn test_dedupe_leaves_one_suffix() {
        let config = PluginConfig {
            dedupe_operation_suffix: true,
            ..PluginConfig::default()
        };
        let namer = Namer::new(&config);
        let op = operation("FeedQuery", OperationKind::Query);
        assert_eq!(namer.function_name(&op), "useFeedQuery");
        assert_eq!(namer.result_type(&op), "FeedQuery");
        assert_eq!(namer.variables_type(&op), "FeedQueryVariables");

        let sub = operation("onCommentSubscription", OperationKind::Subscription);
        assert_eq!(namer.function_name(&sub), "useOnCommentSubscription");

        // Only the matching kind is deduplicated.
        let mutation = operation("RunQuery", OperationKind::Mutation);
        assert_eq!(namer.function_name(&mutation), "useRunQueryMutation");
    }

    #[test]
    fn test_lazy_name_after_dedupe() {
        let config = PluginConfig {
            dedupe_operation_suffix: true,
            ..PluginConfig::default()
        };
        let namer = Namer::new(&config);

        let snake = operation("feed_query", OperationKind::Query);
        assert_eq!(namer.function_name(&snake), "useFeed_Query");
        assert_eq!(namer.lazy_function_name(&snake), "useFeedLazyQuery");

        let pascal = operation("FeedQuery", OperationKind::Query);
        assert_eq!(namer.lazy_function_name(&pascal), "useFeedLazyQuery");

        let plain = operation("Feed", OperationKind::Query);
        assert_eq!(namer.lazy_function_name(&plain), "useFeedLazyQuery");
    }

    #[test]
    fn test_omit_suffix() {
        let config = PluginConfig {
            omit_operation_suffix: true,
            ..PluginConfig::default()
        };
        let namer = Namer::new(&config);
        let op = operation("Feed", OperationKind::Query);
        assert_eq!(namer.function_name(&op), "useFeed");
        assert_eq!(namer.lazy_function_name(&op), "useFeedLazyQuery");
    }

    #[test]
    fn test_types_prefix_never_reaches_function_names() {
        let config = PluginConfig {
            types_prefix: "I".to_string(),
            types_suffix: "Type".to_string(),
            ..PluginConfig::default()
        };
        let namer = Namer::new(&config);
        let op = operation("Feed", OperationKind::Query);
        assert_eq!(namer.function_name(&op), "useFeedQuery");
        assert_eq!(namer.lazy_function_name(&op), "useFeedLazyQuery");
        assert_eq!(namer.result_type(&op), "IFeedQueryType");
        assert_eq!(namer.variables_type(&op), "IFeedQueryVariablesType");
        assert_eq!(namer.document_variable(&op.name), "FeedDocument");
        assert_eq!(namer.composition_result_type(&op), "FeedQueryCompositionFunctionResult");
    }

    #[test]
    fn test_fragment_variable() {
        let config = PluginConfig::default();
        assert_eq!(Namer::new(&config).fragment_variable("userFields"), "UserFieldsFragmentDoc");
    }
}

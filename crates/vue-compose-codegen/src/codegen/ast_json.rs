//! graphql-js compatible AST objects for pre-parsed document constants.
//!
//! The shape follows what `graphql`'s `parse()` produces, minus `loc`, with
//! empty lists left out the way optimized documents drop them.

use graphql_parser::query::{OperationDefinition, Selection, Type, TypeCondition, Value};
use serde_json::{json, Map, Value as Json};

use crate::ir::ast;

fn name(value: &str) -> Json {
    json!({ "kind": "Name", "value": value })
}

fn named_type(value: &str) -> Json {
    json!({ "kind": "NamedType", "name": name(value) })
}

/// Builds a node with `kind` first, skipping empty lists.
fn node(kind: &str, fields: Vec<(&str, Json)>) -> Json {
    let mut map = Map::new();
    map.insert("kind".to_string(), Json::String(kind.to_string()));
    for (key, value) in fields {
        if let Json::Array(items) = &value {
            if items.is_empty() {
                continue;
            }
        }
        map.insert(key.to_string(), value);
    }
    Json::Object(map)
}

/// A `Document` node holding the given definitions.
pub fn document(definitions: Vec<Json>) -> Json {
    node("Document", vec![("definitions", Json::Array(definitions))])
}

pub fn operation_definition(op: &ast::OperationDefinition) -> Json {
    let (operation, op_name, variables, directives, selection_set) = match op {
        OperationDefinition::Query(q) => (
            "query",
            q.name.as_deref(),
            q.variable_definitions.as_slice(),
            q.directives.as_slice(),
            &q.selection_set,
        ),
        OperationDefinition::Mutation(m) => (
            "mutation",
            m.name.as_deref(),
            m.variable_definitions.as_slice(),
            m.directives.as_slice(),
            &m.selection_set,
        ),
        OperationDefinition::Subscription(s) => (
            "subscription",
            s.name.as_deref(),
            s.variable_definitions.as_slice(),
            s.directives.as_slice(),
            &s.selection_set,
        ),
        OperationDefinition::SelectionSet(set) => ("query", None, &[][..], &[][..], set),
    };

    let mut fields = vec![("operation", Json::String(operation.to_string()))];
    if let Some(op_name) = op_name {
        fields.push(("name", name(op_name)));
    }
    fields.push((
        "variableDefinitions",
        Json::Array(variables.iter().map(variable_definition).collect()),
    ));
    fields.push(("directives", directive_list(directives)));
    fields.push(("selectionSet", selection_set_node(selection_set)));
    node("OperationDefinition", fields)
}

pub fn fragment_definition(frag: &ast::FragmentDefinition) -> Json {
    let TypeCondition::On(on) = &frag.type_condition;
    node(
        "FragmentDefinition",
        vec![
            ("name", name(&frag.name)),
            ("typeCondition", named_type(on)),
            ("directives", directive_list(&frag.directives)),
            ("selectionSet", selection_set_node(&frag.selection_set)),
        ],
    )
}

fn variable_definition(def: &ast::VariableDefinition) -> Json {
    let mut fields = vec![
        (
            "variable",
            json!({ "kind": "Variable", "name": name(&def.name) }),
        ),
        ("type", type_node(&def.var_type)),
    ];
    if let Some(default) = &def.default_value {
        fields.push(("defaultValue", value_node(default)));
    }
    node("VariableDefinition", fields)
}

fn type_node(typ: &ast::Type) -> Json {
    match typ {
        Type::NamedType(n) => named_type(n),
        Type::ListType(inner) => json!({ "kind": "ListType", "type": type_node(inner) }),
        Type::NonNullType(inner) => json!({ "kind": "NonNullType", "type": type_node(inner) }),
    }
}

fn selection_set_node(set: &ast::SelectionSet) -> Json {
    node(
        "SelectionSet",
        vec![("selections", Json::Array(set.items.iter().map(selection).collect()))],
    )
}

fn selection(sel: &ast::Selection) -> Json {
    match sel {
        Selection::Field(field) => {
            let mut fields = Vec::new();
            if let Some(alias) = &field.alias {
                fields.push(("alias", name(alias)));
            }
            fields.push(("name", name(&field.name)));
            fields.push(("arguments", argument_list(&field.arguments)));
            fields.push(("directives", directive_list(&field.directives)));
            if !field.selection_set.items.is_empty() {
                fields.push(("selectionSet", selection_set_node(&field.selection_set)));
            }
            node("Field", fields)
        }
        Selection::FragmentSpread(spread) => node(
            "FragmentSpread",
            vec![
                ("name", name(&spread.fragment_name)),
                ("directives", directive_list(&spread.directives)),
            ],
        ),
        Selection::InlineFragment(inline) => {
            let mut fields = Vec::new();
            if let Some(TypeCondition::On(on)) = &inline.type_condition {
                fields.push(("typeCondition", named_type(on)));
            }
            fields.push(("directives", directive_list(&inline.directives)));
            fields.push(("selectionSet", selection_set_node(&inline.selection_set)));
            node("InlineFragment", fields)
        }
    }
}

fn argument_list(arguments: &[(String, ast::Value)]) -> Json {
    Json::Array(
        arguments
            .iter()
            .map(|(arg, value)| {
                node(
                    "Argument",
                    vec![("name", name(arg)), ("value", value_node(value))],
                )
            })
            .collect(),
    )
}

fn directive_list(directives: &[ast::Directive]) -> Json {
    Json::Array(
        directives
            .iter()
            .map(|d| {
                node(
                    "Directive",
                    vec![("name", name(&d.name)), ("arguments", argument_list(&d.arguments))],
                )
            })
            .collect(),
    )
}

/// Float text that still reads as a float (`1.0`, `1e100`).
fn float_literal(value: f64) -> String {
    format!("{:?}", value)
}

fn value_node(value: &ast::Value) -> Json {
    match value {
        Value::Variable(v) => json!({ "kind": "Variable", "name": name(v) }),
        Value::Int(n) => json!({
            "kind": "IntValue",
            "value": n.as_i64().map(|i| i.to_string()).unwrap_or_default(),
        }),
        Value::Float(f) => json!({ "kind": "FloatValue", "value": float_literal(*f) }),
        Value::String(s) => json!({ "kind": "StringValue", "value": s, "block": false }),
        Value::Boolean(b) => json!({ "kind": "BooleanValue", "value": b }),
        Value::Null => json!({ "kind": "NullValue" }),
        Value::Enum(e) => json!({ "kind": "EnumValue", "value": e }),
        Value::List(items) => json!({
            "kind": "ListValue",
            "values": items.iter().map(value_node).collect::<Vec<_>>(),
        }),
        Value::Object(fields) => json!({
            "kind": "ObjectValue",
            "fields": fields
                .iter()
                .map(|(key, v)| {
                    json!({ "kind": "ObjectField", "name": name(key), "value": value_node(v) })
                })
                .collect::<Vec<_>>(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::parse_query;
    use graphql_parser::query::Definition;

    fn first_definition(source: &str) -> ast::Definition {
        parse_query::<String>(source)
            .unwrap()
            .into_static()
            .definitions
            .into_iter()
            .next()
            .unwrap()
    }

    #[test]
    fn test_operation_shape() {
        let Definition::Operation(op) =
            first_definition("query Feed($limit: Int = 10) { feed(limit: $limit, sort: NEW) { id ...Entry } }")
        else {
            panic!("expected an operation");
        };
        let json = serde_json::to_string(&operation_definition(&op)).unwrap();
        assert!(json.starts_with(r#"{"kind":"OperationDefinition","operation":"query","name":{"kind":"Name","value":"Feed"}"#));
        assert!(json.contains(r#""defaultValue":{"kind":"IntValue","value":"10"}"#));
        assert!(json.contains(r#"{"kind":"Argument","name":{"kind":"Name","value":"sort"},"value":{"kind":"EnumValue","value":"NEW"}}"#));
        assert!(json.contains(r#"{"kind":"FragmentSpread","name":{"kind":"Name","value":"Entry"}}"#));
        assert!(!json.contains(r#""directives""#));
    }

    #[test]
    fn test_float_values_keep_fraction_or_exponent() {
        let Definition::Operation(op) =
            first_definition("query Feed { feed(ratio: 1.0, scale: 1e100, step: 2.5) }")
        else {
            panic!("expected an operation");
        };
        let json = serde_json::to_string(&operation_definition(&op)).unwrap();
        assert!(json.contains(r#"{"kind":"FloatValue","value":"1.0"}"#));
        assert!(json.contains(r#"{"kind":"FloatValue","value":"1e100"}"#));
        assert!(json.contains(r#"{"kind":"FloatValue","value":"2.5"}"#));
        assert!(!json.contains(r#""value":"1"}"#));
    }

    #[test]
    fn test_fragment_shape() {
        let Definition::Fragment(frag) = first_definition("fragment Entry on Item { id }") else {
            panic!("expected a fragment");
        };
        let json = serde_json::to_string(&document(vec![fragment_definition(&frag)])).unwrap();
        assert_eq!(
            json,
            r#"{"kind":"Document","definitions":[{"kind":"FragmentDefinition","name":{"kind":"Name","value":"Entry"},"typeCondition":{"kind":"NamedType","name":{"kind":"Name","value":"Item"}},"selectionSet":{"kind":"SelectionSet","selections":[{"kind":"Field","name":{"kind":"Name","value":"id"}}]}}]}"#
        );
    }
}

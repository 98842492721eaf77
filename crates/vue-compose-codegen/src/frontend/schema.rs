//! Read-only view of the GraphQL schema.

use std::collections::HashSet;
use std::path::Path;

use graphql_parser::schema::{Definition, TypeDefinition, TypeExtension};

use crate::diagnostic::CompilerError;
use crate::ir::OperationKind;

/// The parts of a schema the generator consults: root operation types and
/// declared type names.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    query_type: Option<String>,
    mutation_type: Option<String>,
    subscription_type: Option<String>,
    types: HashSet<String>,
}

impl Schema {
    /// Parses schema SDL.
    pub fn parse(source: &str, path: &Path) -> Result<Self, CompilerError> {
        let document = graphql_parser::parse_schema::<String>(source).map_err(|e| {
            CompilerError::SchemaParseFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
        })?;

        let mut schema = Schema::default();
        let mut explicit_roots = false;

        for definition in &document.definitions {
            match definition {
                Definition::SchemaDefinition(def) => {
                    explicit_roots = true;
                    schema.query_type = def.query.clone();
                    schema.mutation_type = def.mutation.clone();
                    schema.subscription_type = def.subscription.clone();
                }
                Definition::TypeDefinition(def) => {
                    schema.types.insert(type_definition_name(def).to_string());
                }
                Definition::TypeExtension(ext) => {
                    schema.types.insert(type_extension_name(ext).to_string());
                }
                Definition::DirectiveDefinition(_) => {}
            }
        }

        if !explicit_roots {
            let conventional = |name: &str| schema.types.contains(name).then(|| name.to_string());
            schema.query_type = conventional("Query");
            schema.mutation_type = conventional("Mutation");
            schema.subscription_type = conventional("Subscription");
        }

        tracing::debug!(types = schema.types.len(), "parsed schema");
        Ok(schema)
    }

    /// Root type that operations of the given kind select from.
    pub fn root_type(&self, kind: OperationKind) -> Option<&str> {
        match kind {
            OperationKind::Query => self.query_type.as_deref(),
            OperationKind::Mutation => self.mutation_type.as_deref(),
            OperationKind::Subscription => self.subscription_type.as_deref(),
        }
    }

    /// Whether a type with this name is declared.
    pub fn has_type(&self, name: &str) -> bool {
        self.types.contains(name)
    }
}

fn type_definition_name<'d>(def: &'d TypeDefinition<'_, String>) -> &'d str {
    match def {
        TypeDefinition::Scalar(t) => &t.name,
        TypeDefinition::Object(t) => &t.name,
        TypeDefinition::Interface(t) => &t.name,
        TypeDefinition::Union(t) => &t.name,
        TypeDefinition::Enum(t) => &t.name,
        TypeDefinition::InputObject(t) => &t.name,
    }
}

fn type_extension_name<'d>(ext: &'d TypeExtension<'_, String>) -> &'d str {
    match ext {
        TypeExtension::Scalar(t) => &t.name,
        TypeExtension::Object(t) => &t.name,
        TypeExtension::Interface(t) => &t.name,
        TypeExtension::Union(t) => &t.name,
        TypeExtension::Enum(t) => &t.name,
        TypeExtension::InputObject(t) => &t.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conventional_roots() {
        let schema = Schema::parse(
            "type Query { me: User } type Mutation { noop: Boolean } type User { id: ID! }",
            Path::new("schema.graphql"),
        )
        .unwrap();
        assert_eq!(schema.root_type(OperationKind::Query), Some("Query"));
        assert_eq!(schema.root_type(OperationKind::Mutation), Some("Mutation"));
        assert_eq!(schema.root_type(OperationKind::Subscription), None);
        assert!(schema.has_type("User"));
    }

    #[test]
    fn test_explicit_schema_definition() {
        let schema = Schema::parse(
            "schema { query: Root subscription: Events } type Root { a: Int } type Events { b: Int } type Query { c: Int }",
            Path::new("schema.graphql"),
        )
        .unwrap();
        assert_eq!(schema.root_type(OperationKind::Query), Some("Root"));
        assert_eq!(schema.root_type(OperationKind::Subscription), Some("Events"));
        assert_eq!(schema.root_type(OperationKind::Mutation), None);
    }

    #[test]
    fn test_invalid_sdl() {
        let err = Schema::parse("type {", Path::new("bad.graphql")).unwrap_err();
        assert!(matches!(err, CompilerError::SchemaParseFailed { .. }));
    }
}

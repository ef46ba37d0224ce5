use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::ir::{NormalizedProperty, NormalizedSchema, SchemaShape};
use crate::model::{Schema, SchemaKind};

use super::ref_collector::{collect_refs, union_refs};
use super::ref_resolver::RefResolver;
use super::type_projector::project_type;

/// Project one reusable schema and compute what it imports.
pub fn normalize_schema(
    name: &str,
    schema: &Schema,
    resolver: &RefResolver<'_>,
) -> Result<NormalizedSchema, ResolveError> {
    let mut properties = IndexMap::new();
    let mut additional_properties_ts_type = None;

    let (kind, own_refs) = match &schema.kind {
        SchemaKind::Object {
            properties: declared,
            required,
            additional_properties,
        } => {
            for (prop_name, prop) in declared {
                properties.insert(
                    prop_name.clone(),
                    NormalizedProperty {
                        ts_type: project_type(Some(prop), resolver)?,
                        required: required.contains(prop_name),
                        description: prop.description.clone(),
                        ts_refs: collect_refs(Some(prop), resolver)?,
                    },
                );
            }
            if let Some(value) = additional_properties {
                additional_properties_ts_type = Some(project_type(Some(value), resolver)?);
            }
            (SchemaShape::Object, collect_refs(Some(schema), resolver)?)
        }
        SchemaKind::Array { items } => (SchemaShape::Array, collect_refs(Some(items), resolver)?),
        _ if !schema.enum_values().is_empty() => {
            (SchemaShape::Enum, collect_refs(Some(schema), resolver)?)
        }
        SchemaKind::Boolean { .. }
        | SchemaKind::Number { .. }
        | SchemaKind::String { .. }
        | SchemaKind::Integer
        | SchemaKind::Ref(_)
        | SchemaKind::Unknown => (SchemaShape::Alias, collect_refs(Some(schema), resolver)?),
    };

    let property_refs = properties.values().map(|p| p.ts_refs.clone());
    let mut ts_refs = union_refs(property_refs.chain([own_refs]));
    ts_refs.remove(name);

    Ok(NormalizedSchema {
        key: name.to_string(),
        kind,
        description: schema.description.clone(),
        ts_type: project_type(Some(schema), resolver)?,
        properties,
        additional_properties_ts_type,
        ts_refs,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::NormalizeConfig;

    fn object(properties: Vec<(&str, Schema)>, required: &[&str]) -> Schema {
        SchemaKind::Object {
            properties: properties
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            required: required.iter().map(|s| s.to_string()).collect(),
            additional_properties: None,
        }
        .into()
    }

    #[test]
    fn test_object_properties_in_order() {
        let config = NormalizeConfig::default();
        let item = object(
            vec![
                ("id", Schema::integer()),
                ("tag", Schema::reference("#/definitions/Tag")),
            ],
            &["id"],
        );
        let schemas = IndexMap::from([
            ("Item".to_string(), item.clone()),
            ("Tag".to_string(), Schema::string()),
        ]);
        let resolver = RefResolver::new(&config, &schemas);

        let normalized = normalize_schema("Item", &item, &resolver).unwrap();
        assert_eq!(normalized.kind, SchemaShape::Object);
        assert_eq!(
            normalized.properties.keys().collect::<Vec<_>>(),
            ["id", "tag"]
        );
        assert_eq!(normalized.properties["id"].ts_type, "number");
        assert!(normalized.properties["id"].required);
        assert!(normalized.properties["id"].ts_refs.is_empty());
        assert_eq!(normalized.properties["tag"].ts_type, "Tag");
        assert!(!normalized.properties["tag"].required);
        assert_eq!(
            normalized.ts_refs["Tag"],
            "@/api/api/definitions/Tag"
        );
    }

    #[test]
    fn test_self_reference_is_not_imported() {
        let config = NormalizeConfig::default();
        let node = object(
            vec![
                ("parent", Schema::reference("#/definitions/Node")),
                ("children", Schema::array(Schema::reference("#/definitions/Node"))),
            ],
            &[],
        );
        let schemas = IndexMap::from([("Node".to_string(), node.clone())]);
        let resolver = RefResolver::new(&config, &schemas);

        let normalized = normalize_schema("Node", &node, &resolver).unwrap();
        assert!(normalized.ts_refs.is_empty());
        assert_eq!(normalized.properties["children"].ts_type, "(Node)[]");
        assert!(normalized.properties["parent"].ts_refs.contains_key("Node"));
    }

    #[test]
    fn test_top_level_array_uses_items() {
        let config = NormalizeConfig::default();
        let pets = Schema::array(Schema::reference("#/components/schemas/Pet"));
        let schemas = IndexMap::from([
            ("Pets".to_string(), pets.clone()),
            ("Pet".to_string(), Schema::string()),
        ]);
        let resolver = RefResolver::new(&config, &schemas);

        let normalized = normalize_schema("Pets", &pets, &resolver).unwrap();
        assert_eq!(normalized.kind, SchemaShape::Array);
        assert_eq!(normalized.ts_type, "(Pet)[]");
        assert!(normalized.properties.is_empty());
        assert_eq!(normalized.ts_refs.keys().collect::<Vec<_>>(), ["Pet"]);
    }

    #[test]
    fn test_enum_and_alias_shapes() {
        let config = NormalizeConfig::default();
        let status: Schema = SchemaKind::String {
            enum_values: vec![json!("placed"), json!("delivered")],
        }
        .into();
        let schemas = IndexMap::new();
        let resolver = RefResolver::new(&config, &schemas);

        let normalized = normalize_schema("Status", &status, &resolver).unwrap();
        assert_eq!(normalized.kind, SchemaShape::Enum);
        assert_eq!(normalized.ts_type, r#""placed" | "delivered""#);

        let id = normalize_schema("Id", &Schema::integer(), &resolver).unwrap();
        assert_eq!(id.kind, SchemaShape::Alias);
        assert_eq!(id.ts_type, "number");
    }

    #[test]
    fn test_map_value_refs_and_type() {
        let config = NormalizeConfig::default();
        let inventory: Schema = SchemaKind::Object {
            properties: IndexMap::new(),
            required: vec![],
            additional_properties: Some(Box::new(Schema::reference("#/definitions/Count"))),
        }
        .into();
        let schemas = IndexMap::from([("Count".to_string(), Schema::integer())]);
        let resolver = RefResolver::new(&config, &schemas);

        let normalized = normalize_schema("Inventory", &inventory, &resolver).unwrap();
        assert_eq!(normalized.additional_properties_ts_type.as_deref(), Some("Count"));
        assert_eq!(normalized.ts_type, "{[k: string]: (Count)}");
        assert!(normalized.ts_refs.contains_key("Count"));
    }
}

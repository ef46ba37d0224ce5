use minijinja::{Environment, context};
use oair_core::ir::NormalizedSchema;
use serde::Serialize;

use super::{import_contexts, property_key};

#[derive(Debug, Serialize)]
struct PropertyContext {
    name: String,
    ts_type: String,
    optional: bool,
    description: Option<String>,
}

/// Emit `index.d.ts` for one definition.
pub fn emit_definition(
    env: &Environment<'_>,
    schema: &NormalizedSchema,
) -> Result<String, minijinja::Error> {
    let properties: Vec<PropertyContext> = schema
        .properties
        .iter()
        .map(|(name, prop)| PropertyContext {
            name: property_key(name),
            ts_type: prop.ts_type.clone(),
            optional: !prop.required,
            description: prop.description.as_deref().map(escape_comment),
        })
        .collect();

    env.get_template("definition.d.ts.j2")?.render(context! {
        imports => import_contexts(&schema.ts_refs),
        name => &schema.key,
        description => schema.description.as_deref().map(escape_comment),
        kind => schema.kind,
        ts_type => &schema.ts_type,
        properties => properties,
        index_type => &schema.additional_properties_ts_type,
    })
}

/// Keep free text from closing the surrounding doc comment.
pub(crate) fn escape_comment(text: &str) -> String {
    text.replace("*/", "*\\/").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use oair_core::config::NormalizeConfig;
    use oair_core::model::{Schema, SchemaKind};
    use oair_core::transform::RefResolver;
    use oair_core::transform::schema_normalizer::normalize_schema;

    use super::*;
    use crate::emitters::environment;

    fn render(name: &str, schema: Schema, others: &[&str]) -> String {
        let config = NormalizeConfig::default();
        let mut schemas: IndexMap<String, Schema> = others
            .iter()
            .map(|n| (n.to_string(), Schema::string()))
            .collect();
        schemas.insert(name.to_string(), schema.clone());
        let resolver = RefResolver::new(&config, &schemas);
        let normalized = normalize_schema(name, &schema, &resolver).unwrap();
        emit_definition(&environment().unwrap(), &normalized).unwrap()
    }

    #[test]
    fn test_interface_with_imports() {
        let mut tag = Schema::reference("#/definitions/Tag");
        tag.description = Some("Primary tag */ closed".to_string());
        let item: Schema = SchemaKind::Object {
            properties: IndexMap::from([
                ("id".to_string(), Schema::integer()),
                ("tag".to_string(), tag),
                ("x-rate".to_string(), Schema::string()),
            ]),
            required: vec!["id".to_string()],
            additional_properties: None,
        }
        .into();

        let out = render("Item", item, &["Tag"]);
        assert_eq!(
            out,
            "// Generated by oair\n\
             import { Tag } from \"@/api/api/definitions/Tag\";\n\
             \n\
             export interface Item {\n  \
             id: number;\n  \
             /** Primary tag *\\/ closed */\n  \
             tag?: Tag;\n  \
             \"x-rate\"?: string;\n\
             }\n"
        );
    }

    #[test]
    fn test_alias_without_imports() {
        let mut status: Schema = SchemaKind::String {
            enum_values: vec!["on".into(), "off".into()],
        }
        .into();
        status.description = Some("Switch state".to_string());
        let out = render("Status", status, &[]);
        assert_eq!(
            out,
            "// Generated by oair\n/** Switch state */\nexport type Status = \"on\" | \"off\";\n"
        );
    }

    #[test]
    fn test_array_alias_imports_items() {
        let out = render(
            "Pets",
            Schema::array(Schema::reference("#/definitions/Pet")),
            &["Pet"],
        );
        assert!(out.contains("import { Pet } from \"@/api/api/definitions/Pet\";"));
        assert!(out.ends_with("export type Pets = (Pet)[];\n"));
    }

    #[test]
    fn test_index_signature() {
        let labels: Schema = SchemaKind::Object {
            properties: IndexMap::new(),
            required: vec![],
            additional_properties: Some(Box::new(Schema::string())),
        }
        .into();
        let out = render("Labels", labels, &[]);
        assert!(out.contains("export interface Labels {\n  [k: string]: string;\n}\n"));
    }
}

use indexmap::IndexMap;

use crate::error::TransformError;
use crate::ir::{BodyDescriptor, NormalizedResponse, OperationDescriptor, ParameterLocation};
use crate::model::{BodyEncoding, HttpMethod, Operation};

use super::name_normalizer::capitalize;
use super::param_classifier::classify;
use super::path_template::call_path_expr;
use super::ref_collector::{TsRefs, collect_refs, union_refs};
use super::ref_resolver::RefResolver;
use super::type_projector::project_type;

const FORM_DATA_BODY: &str = "objectToFormData(params.formData)";
const JSON_BODY: &str = "params.data";
const QUERY_CONFIG: &str = "{ params: params.query }";

const API_CONTEXT: &str = "apiContext";
const OBJECT_TO_FORM_DATA: &str = "objectToFormData";

/// `delete` is reserved in the generated language.
fn method_safe(method: HttpMethod) -> String {
    match method {
        HttpMethod::Delete => "delete_".to_string(),
        other => other.as_str().to_string(),
    }
}

/// Derive the call-construction strategy and types for one operation.
pub fn normalize_operation(
    path: &str,
    method: HttpMethod,
    operation: &Operation,
    resolver: &RefResolver<'_>,
) -> Result<OperationDescriptor, TransformError> {
    let config = resolver.config();
    let params = classify(&operation.parameters, resolver)?;
    let mut refs = vec![params.ts_refs.clone()];

    let mut data = params
        .get(ParameterLocation::Body)
        .first()
        .map(|p| BodyDescriptor {
            ts_type: p.ts_type.clone(),
            required: p.required,
        });
    let mut form_data = None;

    if let Some(body) = &operation.request_body {
        let descriptor = BodyDescriptor {
            ts_type: project_type(body.schema.as_ref(), resolver)?,
            required: body.required,
        };
        refs.push(collect_refs(body.schema.as_ref(), resolver)?);
        match body.encoding {
            BodyEncoding::FormData => form_data = Some(descriptor),
            // A declared body parameter wins over the request body.
            BodyEncoding::Json if data.is_none() => data = Some(descriptor),
            BodyEncoding::Json => {}
        }
    }

    let sends_form = params.flags.form_data || form_data.is_some();
    let body_expr = if sends_form {
        Some(FORM_DATA_BODY.to_string())
    } else if data.is_some() {
        Some(JSON_BODY.to_string())
    } else {
        None
    };

    let mut responses = IndexMap::with_capacity(operation.responses.len());
    for (status, response) in &operation.responses {
        refs.push(collect_refs(response.schema.as_ref(), resolver)?);
        responses.insert(
            status.clone(),
            NormalizedResponse {
                description: response.description.clone(),
                ts_type: project_type(response.schema.as_ref(), resolver)?,
                is_default: status == "default",
            },
        );
    }

    refs.push(TsRefs::from([(
        API_CONTEXT.to_string(),
        config.api_util_import(API_CONTEXT),
    )]));
    if sends_form {
        refs.push(TsRefs::from([(
            OBJECT_TO_FORM_DATA.to_string(),
            config.shared_util_import(OBJECT_TO_FORM_DATA),
        )]));
    }

    // The body travels as `data`, never as a structured group.
    let structured_parameters = params
        .by_location
        .iter()
        .filter(|(location, _)| **location != ParameterLocation::Body)
        .map(|(location, list)| (location.as_str().to_string(), list.clone()))
        .collect();

    Ok(OperationDescriptor {
        operation_id: operation.operation_id.clone(),
        summary: operation.summary.clone(),
        description: operation.description.clone(),
        deprecated: operation.deprecated,
        path_key: path.to_string(),
        method,
        method_safe: method_safe(method),
        capitalized_operation_id: capitalize(&operation.operation_id),
        capitalized_method: capitalize(method.as_str()),
        path_expr: call_path_expr(path, params.flags.path),
        body_expr,
        config_expr: params.flags.query.then(|| QUERY_CONFIG.to_string()),
        can_send_body: method.can_send_body(),
        structured_parameters,
        parameter_exists: params.flags,
        data,
        form_data,
        responses,
        ts_refs: union_refs(refs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NormalizeConfig;
    use crate::model::{Parameter, RequestBody, Response, Schema};

    fn schemas() -> IndexMap<String, Schema> {
        IndexMap::from([
            ("Pet".to_string(), Schema::string()),
            ("Error".to_string(), Schema::string()),
        ])
    }

    fn param(name: &str, location: &str, schema: Schema) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: location.to_string(),
            required: true,
            description: None,
            schema: Some(schema),
        }
    }

    fn operation(id: &str, parameters: Vec<Parameter>) -> Operation {
        Operation {
            operation_id: id.to_string(),
            summary: None,
            description: None,
            deprecated: false,
            parameters,
            request_body: None,
            responses: IndexMap::new(),
        }
    }

    #[test]
    fn test_get_with_path_parameter() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let op = operation("getPetById", vec![param("petId", "path", Schema::string())]);

        let d = normalize_operation("/pets/{petId}", HttpMethod::Get, &op, &resolver).unwrap();
        assert_eq!(d.path_expr, "`/pets/${params.path.petId}`");
        assert_eq!(d.config_expr, None);
        assert_eq!(d.body_expr, None);
        assert!(!d.can_send_body);
        assert_eq!(d.method_safe, "get");
        assert_eq!(d.capitalized_operation_id, "GetPetById");
        assert_eq!(d.capitalized_method, "Get");
        assert_eq!(d.structured_parameters["path"][0].ts_type, "string");
    }

    #[test]
    fn test_delete_is_renamed() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let d = normalize_operation(
            "/pets/{petId}",
            HttpMethod::Delete,
            &operation("deletePet", vec![param("petId", "path", Schema::integer())]),
            &resolver,
        )
        .unwrap();
        assert_eq!(d.method_safe, "delete_");
        assert_eq!(d.capitalized_method, "Delete");
        assert!(!d.can_send_body);
    }

    #[test]
    fn test_query_parameters_produce_config() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let d = normalize_operation(
            "/pets",
            HttpMethod::Get,
            &operation("listPets", vec![param("limit", "query", Schema::integer())]),
            &resolver,
        )
        .unwrap();
        assert_eq!(d.path_expr, "\"/pets\"");
        assert_eq!(d.config_expr.as_deref(), Some("{ params: params.query }"));
        assert!(d.parameter_exists.query);
    }

    #[test]
    fn test_body_parameter_drives_data() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let d = normalize_operation(
            "/pets",
            HttpMethod::Post,
            &operation(
                "addPet",
                vec![param("body", "body", Schema::reference("#/definitions/Pet"))],
            ),
            &resolver,
        )
        .unwrap();
        assert_eq!(d.body_expr.as_deref(), Some("params.data"));
        assert_eq!(d.data.as_ref().map(|b| b.ts_type.as_str()), Some("Pet"));
        assert!(d.parameter_exists.body);
        assert!(!d.structured_parameters.contains_key("body"));
        assert!(d.can_send_body);
        assert_eq!(d.ts_refs["Pet"], "@/api/api/definitions/Pet");
    }

    #[test]
    fn test_form_data_takes_precedence() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let d = normalize_operation(
            "/pets/{petId}/photo",
            HttpMethod::Post,
            &operation(
                "uploadPhoto",
                vec![
                    param("petId", "path", Schema::integer()),
                    param("file", "formData", Schema::string()),
                    param("body", "body", Schema::reference("#/definitions/Pet")),
                ],
            ),
            &resolver,
        )
        .unwrap();
        assert_eq!(
            d.body_expr.as_deref(),
            Some("objectToFormData(params.formData)")
        );
        assert_eq!(
            d.ts_refs["objectToFormData"],
            "@/api/utils/objectToFormData"
        );
    }

    #[test]
    fn test_request_body_encodings() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);

        let mut json = operation("createPet", vec![]);
        json.request_body = Some(RequestBody {
            schema: Some(Schema::reference("#/components/schemas/Pet")),
            required: true,
            encoding: BodyEncoding::Json,
        });
        let d = normalize_operation("/pets", HttpMethod::Put, &json, &resolver).unwrap();
        assert_eq!(d.body_expr.as_deref(), Some("params.data"));
        assert_eq!(
            d.data,
            Some(BodyDescriptor {
                ts_type: "Pet".to_string(),
                required: true
            })
        );
        assert!(d.form_data.is_none());

        let mut form = operation("uploadPet", vec![]);
        form.request_body = Some(RequestBody {
            schema: None,
            required: false,
            encoding: BodyEncoding::FormData,
        });
        let d = normalize_operation("/pets", HttpMethod::Post, &form, &resolver).unwrap();
        assert_eq!(
            d.body_expr.as_deref(),
            Some("objectToFormData(params.formData)")
        );
        assert_eq!(d.form_data.map(|b| b.ts_type), Some("any".to_string()));
        assert!(d.data.is_none());
    }

    #[test]
    fn test_responses_and_refs() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let mut op = operation("listPets", vec![]);
        op.responses = IndexMap::from([
            (
                "200".to_string(),
                Response {
                    description: Some("ok".to_string()),
                    schema: Some(Schema::array(Schema::reference("#/definitions/Pet"))),
                },
            ),
            (
                "default".to_string(),
                Response {
                    description: None,
                    schema: Some(Schema::reference("#/definitions/Error")),
                },
            ),
            (
                "204".to_string(),
                Response {
                    description: None,
                    schema: None,
                },
            ),
        ]);

        let d = normalize_operation("/pets", HttpMethod::Get, &op, &resolver).unwrap();
        assert_eq!(d.responses["200"].ts_type, "(Pet)[]");
        assert!(!d.responses["200"].is_default);
        assert!(d.responses["default"].is_default);
        assert_eq!(d.responses["204"].ts_type, "any");
        assert_eq!(
            d.ts_refs.keys().collect::<Vec<_>>(),
            ["Error", "Pet", "apiContext"]
        );
        assert_eq!(d.ts_refs["apiContext"], "@/api/api/utils/apiContext");
    }

    #[test]
    fn test_unresolved_response_ref_fails() {
        let config = NormalizeConfig::default();
        let schemas = schemas();
        let resolver = RefResolver::new(&config, &schemas);
        let mut op = operation("listPets", vec![]);
        op.responses.insert(
            "200".to_string(),
            Response {
                description: None,
                schema: Some(Schema::reference("#/definitions/Ghost")),
            },
        );
        assert!(matches!(
            normalize_operation("/pets", HttpMethod::Get, &op, &resolver),
            Err(TransformError::Resolve(_))
        ));
    }
}

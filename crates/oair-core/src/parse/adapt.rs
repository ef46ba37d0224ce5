//! Translation of both document dialects into the shared [`Spec`] model.
//!
//! Component references for parameters, responses and request bodies are
//! inlined here. Schema references stay symbolic; the normalizer resolves
//! them by name.

use indexmap::IndexMap;

use crate::error::ResolveError;
use crate::model::{
    BodyEncoding, HttpMethod, Operation, Parameter, PathItem, RequestBody, Response, Schema,
    SchemaKind, Spec,
};
use crate::transform::name_normalizer::route_to_name;

use super::openapi::{self as oas, Components, Content, MediaType, OpenApiSpec, Ref};
use super::schema::{self as raw, AdditionalProperties, SchemaOrRef, SchemaType, TypeSet};
use super::swagger::{
    SwaggerOperation, SwaggerParameter, SwaggerParameterOrRef, SwaggerResponseOrRef, SwaggerSpec,
};

const FORM_MEDIA_TYPES: [&str; 2] = ["multipart/form-data", "application/x-www-form-urlencoded"];

/// Convert a raw schema node into the closed model variant.
pub fn adapt_schema(schema_or_ref: &SchemaOrRef) -> Schema {
    match schema_or_ref {
        SchemaOrRef::Ref { ref_path } => Schema::reference(ref_path.clone()),
        SchemaOrRef::Schema(schema) => Schema {
            kind: adapt_kind(schema),
            description: schema.description.clone(),
        },
    }
}

fn adapt_kind(schema: &raw::Schema) -> SchemaKind {
    let single = match &schema.schema_type {
        Some(TypeSet::Single(t)) => Some(t),
        // `[T, "null"]` is nullable T; anything wider has no single shape.
        Some(TypeSet::Multiple(types)) => {
            let mut non_null = types.iter().filter(|t| **t != SchemaType::Null);
            match (non_null.next(), non_null.next()) {
                (Some(t), None) => Some(t),
                _ => return SchemaKind::Unknown,
            }
        }
        Some(TypeSet::Other(_)) => return SchemaKind::Unknown,
        None => None,
    };

    match single {
        Some(SchemaType::String) => SchemaKind::String {
            enum_values: schema.enum_values.clone(),
        },
        Some(SchemaType::Number) => SchemaKind::Number {
            enum_values: schema.enum_values.clone(),
        },
        Some(SchemaType::Integer) => SchemaKind::Integer,
        Some(SchemaType::Boolean) => SchemaKind::Boolean {
            enum_values: schema.enum_values.clone(),
        },
        Some(SchemaType::Array) => array_kind(schema),
        Some(SchemaType::Object) => object_kind(schema),
        Some(SchemaType::Null) => SchemaKind::Unknown,
        // No type keyword: infer from the keywords that are present.
        None if !schema.properties.is_empty() => object_kind(schema),
        None if schema.items.is_some() => array_kind(schema),
        None => SchemaKind::Unknown,
    }
}

fn array_kind(schema: &raw::Schema) -> SchemaKind {
    let items = schema
        .items
        .as_deref()
        .map(adapt_schema)
        .unwrap_or_else(Schema::unknown);
    SchemaKind::Array {
        items: Box::new(items),
    }
}

fn object_kind(schema: &raw::Schema) -> SchemaKind {
    let additional_properties = match &schema.additional_properties {
        Some(AdditionalProperties::Schema(s)) => Some(Box::new(adapt_schema(s))),
        Some(AdditionalProperties::Bool(_)) | None => None,
    };
    SchemaKind::Object {
        properties: schema
            .properties
            .iter()
            .map(|(name, prop)| (name.clone(), adapt_schema(prop)))
            .collect(),
        required: schema.required.clone(),
        additional_properties,
    }
}

// OpenAPI 3.x

/// Translate an OpenAPI 3.x document.
pub fn openapi_to_spec(spec: &OpenApiSpec) -> Result<Spec, ResolveError> {
    let empty = Components::default();
    let components = spec.components.as_ref().unwrap_or(&empty);

    let mut paths = IndexMap::new();
    for (path, item) in &spec.paths {
        paths.insert(path.clone(), openapi_path_item(path, item, components)?);
    }

    Ok(Spec {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        host: None,
        schemes: Vec::new(),
        base_path: None,
        servers: spec.servers.iter().map(|s| s.resolved_url()).collect(),
        paths,
        schemas: components
            .schemas
            .iter()
            .map(|(name, s)| (name.clone(), adapt_schema(s)))
            .collect(),
    })
}

fn openapi_path_item(
    path: &str,
    item: &oas::PathItem,
    components: &Components,
) -> Result<PathItem, ResolveError> {
    let shared = item
        .parameters
        .iter()
        .map(|p| openapi_parameter(p, components))
        .collect::<Result<Vec<_>, _>>()?;

    let mut operations = IndexMap::new();
    for (method, op) in item.operations() {
        let own = op
            .parameters
            .iter()
            .map(|p| openapi_parameter(p, components))
            .collect::<Result<Vec<_>, _>>()?;

        let request_body = match &op.request_body {
            Some(body) => {
                let body = component(body, &components.request_bodies, "requestBodies")?;
                openapi_request_body(body)
            }
            None => None,
        };

        let mut responses = IndexMap::new();
        for (status, resp) in &op.responses {
            let resp = component(resp, &components.responses, "responses")?;
            responses.insert(
                status.clone(),
                Response {
                    description: resp.description.clone(),
                    schema: json_schema(&resp.content),
                },
            );
        }

        operations.insert(
            method,
            Operation {
                operation_id: operation_id(op.operation_id.as_deref(), method, path),
                summary: op.summary.clone(),
                description: op.description.clone(),
                deprecated: op.deprecated,
                parameters: merge_parameters(&shared, own),
                request_body,
                responses,
            },
        );
    }

    Ok(PathItem { operations })
}

fn openapi_parameter(
    param: &Ref<oas::Parameter>,
    components: &Components,
) -> Result<Parameter, ResolveError> {
    let param = component(param, &components.parameters, "parameters")?;
    Ok(Parameter {
        name: param.name.clone(),
        location: param.location.clone(),
        required: param.required,
        description: param.description.clone(),
        schema: param.schema.as_ref().map(adapt_schema),
    })
}

fn openapi_request_body(body: &oas::RequestBody) -> Option<RequestBody> {
    // Form encodings win over JSON when a body accepts both.
    let form = body
        .content
        .iter()
        .find(|(media, _)| FORM_MEDIA_TYPES.contains(&media.as_str()));
    let (encoding, media) = match form {
        Some((_, media)) => (BodyEncoding::FormData, media),
        None => (
            BodyEncoding::Json,
            preferred_json(&body.content).or_else(|| body.content.values().next())?,
        ),
    };

    Some(RequestBody {
        schema: media.schema.as_ref().map(adapt_schema),
        required: body.required,
        encoding,
    })
}

/// Follow a `#/components/{kind}/NAME` reference one level.
fn component<'a, T>(
    item: &'a Ref<T>,
    table: &'a IndexMap<String, Ref<T>>,
    kind: &str,
) -> Result<&'a T, ResolveError> {
    match item {
        Ref::Inline(value) => Ok(value),
        Ref::Ref { ref_path } => {
            let name = component_name(ref_path, &format!("#/components/{kind}/"))?;
            match table.get(name) {
                Some(Ref::Inline(value)) => Ok(value),
                _ => Err(ResolveError::RefTargetNotFound(ref_path.clone())),
            }
        }
    }
}

/// Prefer `application/json`, then any other JSON-flavoured media type.
fn preferred_json(content: &Content) -> Option<&MediaType> {
    content.get("application/json").or_else(|| {
        content
            .iter()
            .find(|(media, _)| media.contains("json"))
            .map(|(_, mt)| mt)
    })
}

fn json_schema(content: &Content) -> Option<Schema> {
    let schema = preferred_json(content)
        .and_then(|mt| mt.schema.as_ref())
        .map(adapt_schema);
    if schema.is_none() && !content.is_empty() {
        log::debug!(
            "ignoring non-JSON response content: {:?}",
            content.keys().collect::<Vec<_>>()
        );
    }
    schema
}

// Swagger 2.0

/// Translate a Swagger 2.0 document.
pub fn swagger_to_spec(spec: &SwaggerSpec) -> Result<Spec, ResolveError> {
    let mut paths = IndexMap::new();
    for (path, item) in &spec.paths {
        let shared = item
            .parameters
            .iter()
            .map(|p| swagger_parameter(p, spec))
            .collect::<Result<Vec<_>, _>>()?;

        let mut operations = IndexMap::new();
        for (method, op) in item.operations() {
            operations.insert(method, swagger_operation(path, method, op, &shared, spec)?);
        }
        paths.insert(path.clone(), PathItem { operations });
    }

    Ok(Spec {
        title: spec.info.title.clone(),
        version: spec.info.version.clone(),
        host: spec.host.clone(),
        schemes: spec.schemes.clone(),
        base_path: spec.base_path.clone(),
        servers: Vec::new(),
        paths,
        schemas: spec
            .definitions
            .iter()
            .map(|(name, s)| (name.clone(), adapt_schema(s)))
            .collect(),
    })
}

fn swagger_operation(
    path: &str,
    method: HttpMethod,
    op: &SwaggerOperation,
    shared: &[Parameter],
    spec: &SwaggerSpec,
) -> Result<Operation, ResolveError> {
    let own = op
        .parameters
        .iter()
        .map(|p| swagger_parameter(p, spec))
        .collect::<Result<Vec<_>, _>>()?;

    let mut responses = IndexMap::new();
    for (status, resp) in &op.responses {
        let resp = match resp {
            SwaggerResponseOrRef::Response(r) => r,
            SwaggerResponseOrRef::Ref { ref_path } => {
                let name = component_name(ref_path, "#/responses/")?;
                spec.responses
                    .get(name)
                    .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))?
            }
        };
        responses.insert(
            status.clone(),
            Response {
                description: resp.description.clone(),
                schema: resp.schema.as_ref().map(adapt_schema),
            },
        );
    }

    Ok(Operation {
        operation_id: operation_id(op.operation_id.as_deref(), method, path),
        summary: op.summary.clone(),
        description: op.description.clone(),
        deprecated: op.deprecated.unwrap_or(false),
        parameters: merge_parameters(shared, own),
        // Swagger bodies travel as `in: body` parameters.
        request_body: None,
        responses,
    })
}

fn swagger_parameter(
    param: &SwaggerParameterOrRef,
    spec: &SwaggerSpec,
) -> Result<Parameter, ResolveError> {
    let param = match param {
        SwaggerParameterOrRef::Parameter(p) => p,
        SwaggerParameterOrRef::Ref { ref_path } => {
            let name = component_name(ref_path, "#/parameters/")?;
            spec.parameters
                .get(name)
                .ok_or_else(|| ResolveError::RefTargetNotFound(ref_path.clone()))?
        }
    };

    let schema = match &param.schema {
        Some(schema) => Some(adapt_schema(schema)),
        None => inline_parameter_schema(param),
    };

    Ok(Parameter {
        name: param.name.clone(),
        location: param.location.clone(),
        required: param.required,
        description: param.description.clone(),
        schema,
    })
}

/// Non-body Swagger parameters declare their type on the parameter itself.
fn inline_parameter_schema(param: &SwaggerParameter) -> Option<Schema> {
    param.schema_type.as_ref()?;
    let inline = raw::Schema {
        schema_type: param.schema_type.clone(),
        description: param.description.clone(),
        items: param.items.clone(),
        enum_values: param.enum_values.clone(),
        ..raw::Schema::default()
    };
    Some(adapt_schema(&SchemaOrRef::Schema(Box::new(inline))))
}

// Shared helpers

/// Path-level parameters apply to every operation unless the operation
/// redeclares the same name and location.
fn merge_parameters(shared: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged: Vec<Parameter> = shared
        .iter()
        .filter(|p| {
            !own.iter()
                .any(|o| o.name == p.name && o.location == p.location)
        })
        .cloned()
        .collect();
    merged.extend(own);
    merged
}

fn operation_id(declared: Option<&str>, method: HttpMethod, path: &str) -> String {
    match declared {
        Some(id) => id.to_string(),
        None => route_to_name(method.as_str(), path),
    }
}

/// Extract `NAME` from `{prefix}NAME`.
fn component_name<'a>(ref_path: &'a str, prefix: &str) -> Result<&'a str, ResolveError> {
    ref_path
        .strip_prefix(prefix)
        .filter(|name| !name.is_empty() && !name.contains('/'))
        .ok_or_else(|| ResolveError::InvalidRefFormat(ref_path.to_string()))
}

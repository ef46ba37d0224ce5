use log::debug;
use minijinja::{Environment, context};
use oair_core::ir::{
    BodyDescriptor, ClassifiedParameter, OperationDescriptor, ParameterLocation, PathRecord,
};
use serde::Serialize;

use super::definitions::escape_comment;
use super::{function_name, import_contexts, property_key, type_name};

#[derive(Debug, Serialize)]
struct MemberContext {
    name: &'static str,
    ts_type: String,
    optional: bool,
}

#[derive(Debug, Serialize)]
struct OperationContext {
    function_name: String,
    type_name: String,
    method_safe: String,
    has_params: bool,
    members: Vec<MemberContext>,
    response_type: String,
    doc_lines: Vec<String>,
    call_args: String,
}

/// Emit `index.ts` with one call per operation of the path.
pub fn emit_path(env: &Environment<'_>, record: &PathRecord) -> Result<String, minijinja::Error> {
    let operations: Vec<OperationContext> =
        record.operations.values().map(operation_context).collect();

    env.get_template("path.ts.j2")?.render(context! {
        imports => import_contexts(&record.ts_refs),
        operations => operations,
    })
}

fn operation_context(op: &OperationDescriptor) -> OperationContext {
    let members = members(op);
    OperationContext {
        function_name: function_name(&op.operation_id),
        type_name: type_name(&op.capitalized_operation_id),
        method_safe: op.method_safe.clone(),
        has_params: !members.is_empty(),
        members,
        response_type: response_type(op),
        doc_lines: doc_lines(op),
        call_args: call_args(op),
    }
}

/// Members of the params interface. Header and cookie parameters are not
/// sent by the generated call and get no member.
fn members(op: &OperationDescriptor) -> Vec<MemberContext> {
    let group = |location: ParameterLocation| {
        op.structured_parameters
            .get(location.as_str())
            .filter(|params| !params.is_empty())
    };
    let mut members = Vec::new();

    if let Some(params) = group(ParameterLocation::Path) {
        members.push(object_member("path", params));
    }
    if let Some(params) = group(ParameterLocation::Query) {
        members.push(object_member("query", params));
    }
    if let Some(params) = group(ParameterLocation::FormData) {
        members.push(object_member("formData", params));
    } else if let Some(body) = &op.form_data {
        members.push(body_member("formData", body));
    }
    if let Some(body) = &op.data {
        members.push(body_member("data", body));
    }

    for skipped in [ParameterLocation::Header, ParameterLocation::Cookie] {
        if group(skipped).is_some() {
            debug!(
                "{}: {} parameters are not part of the generated call",
                op.operation_id,
                skipped.as_str()
            );
        }
    }
    members
}

fn object_member(name: &'static str, params: &[ClassifiedParameter]) -> MemberContext {
    let fields = params
        .iter()
        .map(|p| {
            let marker = if p.required { "" } else { "?" };
            format!("{}{marker}: {}", property_key(&p.name), p.ts_type)
        })
        .collect::<Vec<_>>()
        .join("; ");
    MemberContext {
        name,
        ts_type: format!("{{ {fields} }}"),
        optional: params.iter().all(|p| !p.required),
    }
}

fn body_member(name: &'static str, body: &BodyDescriptor) -> MemberContext {
    MemberContext {
        name,
        ts_type: body.ts_type.clone(),
        optional: !body.required,
    }
}

/// Union of the distinct 2xx response types; the `default` response when no
/// 2xx is declared; `any` otherwise.
fn response_type(op: &OperationDescriptor) -> String {
    let mut types: Vec<&str> = Vec::new();
    for (status, response) in &op.responses {
        if status.starts_with('2') && !types.contains(&response.ts_type.as_str()) {
            types.push(&response.ts_type);
        }
    }
    if types.is_empty() {
        if let Some(default) = op.responses.values().find(|r| r.is_default) {
            types.push(&default.ts_type);
        }
    }
    if types.is_empty() {
        "any".to_string()
    } else {
        types.join(" | ")
    }
}

fn doc_lines(op: &OperationDescriptor) -> Vec<String> {
    let mut lines: Vec<String> = op
        .summary
        .iter()
        .chain(op.description.iter())
        .flat_map(|text| text.lines())
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(escape_comment)
        .collect();
    if op.deprecated {
        lines.push("@deprecated".to_string());
    }
    lines
}

/// `path[, body][, config]`; bodies only for methods that carry one.
fn call_args(op: &OperationDescriptor) -> String {
    let mut args = vec![op.path_expr.clone()];
    if op.can_send_body && (op.body_expr.is_some() || op.config_expr.is_some()) {
        args.push(
            op.body_expr
                .clone()
                .unwrap_or_else(|| "undefined".to_string()),
        );
    }
    if let Some(config) = &op.config_expr {
        args.push(config.clone());
    }
    args.join(", ")
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;
    use oair_core::config::NormalizeConfig;
    use oair_core::model::{HttpMethod, Operation, Parameter, PathItem, Response, Schema};
    use oair_core::transform::RefResolver;
    use oair_core::transform::path_normalizer::normalize_path;

    use super::*;
    use crate::emitters::environment;

    fn param(name: &str, location: &str, required: bool, schema: Schema) -> Parameter {
        Parameter {
            name: name.to_string(),
            location: location.to_string(),
            required,
            description: None,
            schema: Some(schema),
        }
    }

    fn operation(id: &str, parameters: Vec<Parameter>, ok: Option<Schema>) -> Operation {
        Operation {
            operation_id: id.to_string(),
            summary: None,
            description: None,
            deprecated: false,
            parameters,
            request_body: None,
            responses: IndexMap::from([(
                "200".to_string(),
                Response {
                    description: None,
                    schema: ok,
                },
            )]),
        }
    }

    fn record(path: &str, operations: Vec<(HttpMethod, Operation)>) -> PathRecord {
        let config = NormalizeConfig::default();
        let schemas = IndexMap::from([("Pet".to_string(), Schema::string())]);
        let resolver = RefResolver::new(&config, &schemas);
        let item = PathItem {
            operations: operations.into_iter().collect(),
        };
        normalize_path(path, &item, None, &resolver).unwrap()
    }

    #[test]
    fn test_get_with_path_parameter() {
        let record = record(
            "/pets/{petId}",
            vec![(
                HttpMethod::Get,
                operation(
                    "getPet",
                    vec![param("petId", "path", true, Schema::string())],
                    Some(Schema::reference("#/definitions/Pet")),
                ),
            )],
        );
        let out = emit_path(&environment().unwrap(), &record).unwrap();
        assert_eq!(
            out,
            "// Generated by oair\n\
             import { Pet } from \"@/api/api/definitions/Pet\";\n\
             import { apiContext } from \"@/api/api/utils/apiContext\";\n\
             \n\
             export interface GetPetParams {\n  \
             path: { petId: string };\n\
             }\n\
             \n\
             export type GetPetResponse = Pet;\n\
             \n\
             export function getPet(params: GetPetParams): Promise<GetPetResponse> {\n  \
             return apiContext.get<GetPetResponse>(`/pets/${params.path.petId}`);\n\
             }\n"
        );
    }

    #[test]
    fn test_hyphenated_path_parameter_uses_quoted_access() {
        let record = record(
            "/stores/{store-id}",
            vec![(
                HttpMethod::Get,
                operation(
                    "getStore",
                    vec![param("store-id", "path", true, Schema::string())],
                    None,
                ),
            )],
        );
        let out = emit_path(&environment().unwrap(), &record).unwrap();
        assert!(out.contains("  path: { \"store-id\": string };\n"));
        assert!(out.contains(
            "return apiContext.get<GetStoreResponse>(`/stores/${params.path[\"store-id\"]}`);"
        ));
    }

    #[test]
    fn test_delete_and_post_calls() {
        let mut create = operation(
            "addPet",
            vec![param(
                "body",
                "body",
                true,
                Schema::reference("#/definitions/Pet"),
            )],
            None,
        );
        create.summary = Some("Add a pet".to_string());
        create.deprecated = true;
        let record = record(
            "/pets",
            vec![
                (HttpMethod::Post, create),
                (
                    HttpMethod::Delete,
                    operation(
                        "clearPets",
                        vec![param("force", "query", false, Schema::integer())],
                        None,
                    ),
                ),
            ],
        );
        let out = emit_path(&environment().unwrap(), &record).unwrap();
        assert!(out.contains("export interface AddPetParams {\n  data: Pet;\n}\n"));
        assert!(out.contains("/**\n * Add a pet\n * @deprecated\n */\n"));
        assert!(out.contains("return apiContext.post<AddPetResponse>(\"/pets\", params.data);"));
        assert!(out.contains("  query?: { force?: number };\n"));
        assert!(out.contains(
            "return apiContext.delete_<ClearPetsResponse>(\"/pets\", { params: params.query });"
        ));
        assert!(out.contains("export type ClearPetsResponse = any;"));
    }

    #[test]
    fn test_operation_without_params() {
        let record = record(
            "/health",
            vec![(HttpMethod::Post, operation("ping", vec![], None))],
        );
        let out = emit_path(&environment().unwrap(), &record).unwrap();
        assert!(!out.contains("PingParams"));
        assert!(out.contains("export function ping(): Promise<PingResponse> {"));
        assert!(out.contains("return apiContext.post<PingResponse>(\"/health\");"));
    }

    #[test]
    fn test_form_data_call() {
        let record = record(
            "/pets/{petId}/photo",
            vec![(
                HttpMethod::Put,
                operation(
                    "uploadPhoto",
                    vec![
                        param("petId", "path", true, Schema::integer()),
                        param("file", "formData", false, Schema::unknown()),
                    ],
                    None,
                ),
            )],
        );
        let out = emit_path(&environment().unwrap(), &record).unwrap();
        assert!(out.contains(
            "import { objectToFormData } from \"@/api/utils/objectToFormData\";"
        ));
        assert!(out.contains("  formData?: { file?: any };\n"));
        assert!(out.contains(
            "apiContext.put<UploadPhotoResponse>(`/pets/${params.path.petId}/photo`, objectToFormData(params.formData));"
        ));
    }

    #[test]
    fn test_response_type_selection() {
        let mut op = operation("listPets", vec![], Some(Schema::array(Schema::string())));
        op.responses.insert(
            "201".to_string(),
            Response {
                description: None,
                schema: Some(Schema::array(Schema::string())),
            },
        );
        op.responses.insert(
            "default".to_string(),
            Response {
                description: None,
                schema: Some(Schema::reference("#/definitions/Pet")),
            },
        );
        let record = record("/pets", vec![(HttpMethod::Get, op)]);
        assert_eq!(
            response_type(&record.operations["get"]),
            "(string)[]"
        );

        let mut fallback = operation("err", vec![], None);
        fallback.responses = IndexMap::from([(
            "default".to_string(),
            Response {
                description: None,
                schema: Some(Schema::reference("#/definitions/Pet")),
            },
        )]);
        let record = record_with("/err", fallback);
        assert_eq!(response_type(&record.operations["get"]), "Pet");
    }

    fn record_with(path: &str, op: Operation) -> PathRecord {
        record(path, vec![(HttpMethod::Get, op)])
    }
}

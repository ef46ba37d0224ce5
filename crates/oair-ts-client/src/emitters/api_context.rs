use minijinja::{Environment, context};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct MethodContext {
    name: &'static str,
    verb: &'static str,
}

const READ_METHODS: [MethodContext; 5] = [
    MethodContext { name: "get", verb: "GET" },
    MethodContext { name: "delete_", verb: "DELETE" },
    MethodContext { name: "head", verb: "HEAD" },
    MethodContext { name: "options", verb: "OPTIONS" },
    MethodContext { name: "trace", verb: "TRACE" },
];

const WRITE_METHODS: [MethodContext; 3] = [
    MethodContext { name: "post", verb: "POST" },
    MethodContext { name: "put", verb: "PUT" },
    MethodContext { name: "patch", verb: "PATCH" },
];

/// Emit the per-API request context bound to `base_url`.
pub fn emit_api_context(env: &Environment<'_>, base_url: &str) -> Result<String, minijinja::Error> {
    env.get_template("api_context.ts.j2")?.render(context! {
        base_url => base_url,
        read_methods => &READ_METHODS,
        write_methods => &WRITE_METHODS,
    })
}

use std::sync::LazyLock;

use regex::{Captures, Regex};

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([a-zA-Z0-9\-_]+)\}").expect("placeholder pattern is valid")
});

/// Path argument for a generated call.
///
/// With `interpolate`, every `{name}` becomes `${params.path.name}` inside a
/// template literal; otherwise the path is returned as a quoted literal.
/// Names that are not identifiers (`store-id`) use bracket access.
pub fn call_path_expr(path: &str, interpolate: bool) -> String {
    if interpolate {
        let body = PLACEHOLDER.replace_all(path, |caps: &Captures| {
            let name = &caps[1];
            if is_identifier(name) {
                format!("${{params.path.{name}}}")
            } else {
                format!("${{params.path[\"{name}\"]}}")
            }
        });
        format!("`{body}`")
    } else {
        format!("\"{path}\"")
    }
}

/// Rewrite placeholders into directory-safe segments.
///
/// `replace_value` follows JavaScript `String.replace` patterns: `$1` is the
/// placeholder name, `$&` the whole `{name}` and `$$` a literal `$`. The
/// default `_$1` turns `/pets/{petId}` into `/pets/_petId`.
pub fn directory_segment(path: &str, replace_value: &str) -> String {
    PLACEHOLDER
        .replace_all(path, |caps: &Captures| {
            expand_replacement(replace_value, &caps[0], &caps[1])
        })
        .into_owned()
}

fn expand_replacement(pattern: &str, whole: &str, name: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + name.len());
    let mut chars = pattern.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '$' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('$') => out.push('$'),
            Some('&') => out.push_str(whole),
            Some('1') => out.push_str(name),
            _ => {
                out.push('$');
                continue;
            }
        }
        chars.next();
    }
    out
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Output directory for a path, relative to the `paths` root.
///
/// `base_path` is prefixed, placeholders go through [`directory_segment`] and
/// empty segments are dropped, so `/` maps to the root itself.
pub fn path_directory(path: &str, base_path: Option<&str>, replace_value: &str) -> String {
    let full = format!("{}{path}", base_path.unwrap_or(""));
    directory_segment(&full, replace_value)
        .split('/')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

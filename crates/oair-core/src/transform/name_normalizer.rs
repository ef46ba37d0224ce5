use heck::ToPascalCase;

/// Upper-case the first character, leaving the rest untouched.
///
/// `getPetById` → `GetPetById`, `delete` → `Delete`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Synthesize an operation id for operations that declare none.
///
/// The verb comes from the method (a `GET` on a collection lists, a `GET`
/// ending in a placeholder fetches one item) and the noun from the literal
/// path segments:
/// - `GET /pets` → `listPets`
/// - `GET /pets/{petId}` → `getPet`
/// - `POST /stores/{id}/orders` → `createStoresOrders`
/// - `DELETE /pets/{petId}` → `deletePet`
pub fn route_to_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let is_placeholder = |s: &&str| s.starts_with('{') && s.ends_with('}');
    let targets_item = segments.last().is_some_and(is_placeholder);

    let verb = match method.to_ascii_lowercase().as_str() {
        "get" if targets_item => "get".to_string(),
        "get" => "list".to_string(),
        "post" => "create".to_string(),
        "put" => "update".to_string(),
        other => other.to_string(),
    };

    let literals: Vec<&str> = segments
        .iter()
        .copied()
        .filter(|s| !is_placeholder(s))
        .collect();
    let last = literals.len().saturating_sub(1);
    let noun: String = literals
        .iter()
        .enumerate()
        .map(|(i, seg)| {
            if i == last && targets_item {
                singularize(seg).to_pascal_case()
            } else {
                seg.to_pascal_case()
            }
        })
        .collect();

    format!("{verb}{noun}")
}

/// English plural stripping, good enough for resource names.
fn singularize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix("ies").filter(|s| !s.is_empty()) {
        format!("{stem}y")
    } else if ["ses", "xes", "zes"].iter().any(|suffix| word.ends_with(suffix)) {
        word[..word.len() - 2].to_string()
    } else if word.len() > 1 && word.ends_with('s') && !word.ends_with("ss") {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

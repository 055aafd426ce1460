use heck::{ToLowerCamelCase, ToPascalCase, ToSnakeCase, ToTitleCase};

use crate::model::NormalizedName;

/// Create a `NormalizedName` from an arbitrary string, computing all casing variants.
pub fn normalize_name(name: &str) -> NormalizedName {
    let sanitized = sanitize_identifier(name);

    NormalizedName {
        original: name.to_string(),
        pascal_case: sanitized.to_pascal_case(),
        camel_case: sanitized.to_lower_camel_case(),
        snake_case: sanitized.to_snake_case(),
        title_case: name.to_title_case(),
    }
}

/// Derive a camelCase operation name from HTTP method + path, used when an
/// operation has no `operationId`.
///
/// - `GET /pets` → `listPets`
/// - `GET /pets/{id}` → `getPet`
/// - `POST /pets/{id}/photos` → `createPetsPhotos`
pub fn route_to_name(method: &str, path: &str) -> String {
    let mut resource_parts: Vec<&str> = Vec::new();
    let mut ends_with_param = false;

    for seg in path.split('/').filter(|s| !s.is_empty()) {
        if seg.starts_with('{') && seg.ends_with('}') {
            ends_with_param = true;
        } else {
            resource_parts.push(seg);
            ends_with_param = false;
        }
    }

    let prefix = match method.to_uppercase().as_str() {
        "GET" if ends_with_param => "get",
        "GET" => "list",
        "POST" => "create",
        "PUT" => "update",
        "DELETE" => "delete",
        "PATCH" => "patch",
        "OPTIONS" => "options",
        _ => "call",
    };

    let mut name = prefix.to_string();
    for (i, part) in resource_parts.iter().enumerate() {
        let is_last = i == resource_parts.len() - 1;
        let word = if is_last && ends_with_param {
            singularize(part)
        } else {
            part.to_string()
        };
        name.push_str(&word.to_pascal_case());
    }
    name
}

/// Naive singularization: strips trailing 's' if present.
fn singularize(word: &str) -> String {
    if word.ends_with("ies") && word.len() > 3 {
        format!("{}y", &word[..word.len() - 3])
    } else if word.ends_with("ses") || word.ends_with("xes") || word.ends_with("zes") {
        word[..word.len() - 2].to_string()
    } else if word.ends_with('s') && !word.ends_with("ss") && word.len() > 1 {
        word[..word.len() - 1].to_string()
    } else {
        word.to_string()
    }
}

/// Sanitize a string to be a valid identifier.
fn sanitize_identifier(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut prev_was_separator = false;

    for ch in name.chars() {
        if ch.is_alphanumeric() {
            if prev_was_separator && !result.is_empty() {
                result.push('_');
            }
            result.push(ch);
            prev_was_separator = false;
        } else {
            prev_was_separator = true;
        }
    }

    if result.is_empty() {
        return "unnamed".to_string();
    }

    result
}

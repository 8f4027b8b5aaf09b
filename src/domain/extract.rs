use serde_json::Value;

/// Candidate content fields, in selection order. Different backends put the
/// equivalent payload under different keys; a fixed precedence list keeps
/// extraction deterministic across all of them.
const CONTENT_FIELDS: [&str; 5] = ["content", "markdown", "text", "html", "body"];

/// Pull usable content out of a parsed backend response.
///
/// Probes `results[0]` when the response carries a non-empty `results` array,
/// otherwise the top-level object, checking `content`, `markdown`, `text`,
/// `html`, `body` in order and selecting the first non-empty string. Returns
/// None when nothing matches; the adapter then falls back to the raw response
/// text.
pub fn extract_content(data: &Value) -> Option<String> {
    let candidate = match data.get("results").and_then(Value::as_array) {
        Some(results) if !results.is_empty() => &results[0],
        _ => data,
    };
    first_non_empty_field(candidate)
}

fn first_non_empty_field(obj: &Value) -> Option<String> {
    CONTENT_FIELDS
        .iter()
        .filter_map(|field| obj.get(field).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(String::from)
}

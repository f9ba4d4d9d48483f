//! Lenient parsing of JSON emitted by LLMs
//!
//! Models wrap JSON in prose or markdown fences often enough that a
//! strict parse would fail half the time.

use serde_json::Value;

/// Pull the first JSON value out of model output. Tries a direct
/// parse, then fence stripping, then the outermost brace/bracket pair.
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Ok(v) = serde_json::from_str(trimmed) {
        return Some(v);
    }

    if let Some(inner) = strip_fences(trimmed) {
        if let Ok(v) = serde_json::from_str(inner) {
            return Some(v);
        }
    }

    // Whichever delimiter appears first wins, so an array of objects
    // is not mistaken for its first element.
    let obj = trimmed.find('{');
    let arr = trimmed.find('[');
    let pairs: &[(char, char)] = match (obj, arr) {
        (Some(o), Some(a)) if a < o => &[('[', ']'), ('{', '}')],
        _ => &[('{', '}'), ('[', ']')],
    };
    for (open, close) in pairs {
        if let (Some(start), Some(end)) = (trimmed.find(*open), trimmed.rfind(*close)) {
            if start < end {
                if let Ok(v) = serde_json::from_str(&trimmed[start..=end]) {
                    return Some(v);
                }
            }
        }
    }

    None
}

fn strip_fences(text: &str) -> Option<&str> {
    let rest = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))?;
    Some(rest.trim_end().trim_end_matches("```").trim())
}

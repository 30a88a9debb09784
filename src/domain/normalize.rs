use serde_json::{Map, Value};
use tracing::warn;

use crate::domain::AnalysisResult;

// Wire-format keys in priority order. The service started with the
// Portuguese names and later responses have been seen with English ones;
// `reason`/`reply` are the oldest aliases. First non-empty value wins,
// aliases are never merged.
const CATEGORY_KEYS: &[&str] = &["categoria", "category"];
const JUSTIFICATION_KEYS: &[&str] = &["justificativa", "justification", "reason"];
const REPLY_KEYS: &[&str] = &["resposta_sugerida", "suggested_reply", "reply"];

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Remove the fenced code-block markers the service sometimes wraps its
/// JSON in. Deliberately naive (every occurrence is dropped, not just a
/// leading/trailing pair) to stay compatible with what the service has
/// been observed to emit.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace(FENCE_OPEN, "")
        .replace(FENCE_CLOSE, "")
        .trim()
        .to_string()
}

/// Normalize the `result` field of an analysis response. An object is used
/// as-is; a string is unfenced and parsed as JSON. A string that still
/// fails to parse is logged and yields `None` so the caller shows "no
/// result" instead of crashing.
pub fn normalize_result(value: &Value) -> Option<AnalysisResult> {
    match value {
        Value::Object(fields) => Some(resolve_fields(fields)),
        Value::String(raw) => {
            let cleaned = strip_code_fences(raw);
            match serde_json::from_str::<Value>(&cleaned) {
                Ok(Value::Object(fields)) => Some(resolve_fields(&fields)),
                Ok(_) => {
                    warn!("analysis result string parsed to non-object JSON");
                    None
                }
                Err(e) => {
                    warn!(error = %e, "analysis result string is not valid JSON");
                    None
                }
            }
        }
        _ => None,
    }
}

/// Pull the top-level `result` field out of a decoded response body and
/// normalize it.
pub fn extract_analysis(body: &Value) -> Option<AnalysisResult> {
    body.get("result").and_then(normalize_result)
}

fn resolve_fields(fields: &Map<String, Value>) -> AnalysisResult {
    AnalysisResult {
        category: resolve(fields, CATEGORY_KEYS),
        justification: resolve(fields, JUSTIFICATION_KEYS),
        suggested_reply: resolve(fields, REPLY_KEYS),
    }
}

// An empty-string primary counts as absent and falls through to the alias.
fn resolve(fields: &Map<String, Value>, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

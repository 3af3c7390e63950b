use serde_json::Value;

const ELIDED_DATA_PLACEHOLDER: &str = "<elided>";

pub fn emit_debug_payload(request_url: &str, payload: &Value) {
    let redacted = redact_inline_data(payload);
    let formatted_payload = serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|_| "<payload serialization error>".to_string());
    tracing::debug!(url = request_url, "generate_content payload:\n{formatted_payload}");
}

/// Logs model output that failed to parse. The text never reaches the UI.
pub fn emit_response_parse_error(kind: &str, response_text: &str, error: &dyn std::fmt::Display) {
    tracing::warn!(
        kind,
        %error,
        "model response failed validation\nresponse:\n{response_text}"
    );
}

/// Copy of `payload` with every `inlineData.data` value replaced by its length,
/// so base64 image bodies do not flood the log.
fn redact_inline_data(payload: &Value) -> Value {
    match payload {
        Value::Object(map) => {
            let mut out = serde_json::Map::with_capacity(map.len());
            for (key, value) in map {
                if key == "inlineData" {
                    out.insert(key.clone(), redact_inline_body(value));
                } else {
                    out.insert(key.clone(), redact_inline_data(value));
                }
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(redact_inline_data).collect()),
        other => other.clone(),
    }
}

fn redact_inline_body(value: &Value) -> Value {
    let mut body = value.clone();
    if let Some(data) = body.get_mut("data") {
        let length = data.as_str().map(str::len).unwrap_or(0);
        *data = Value::String(format!("{ELIDED_DATA_PLACEHOLDER} ({length} chars)"));
    }
    body
}

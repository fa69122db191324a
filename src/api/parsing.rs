use serde_json::Value;

/// HTTP method of the platform event. Function URL payloads carry it under
/// `requestContext.http.method`, REST-style payloads under `httpMethod`.
pub fn get_method(payload: &Value) -> Option<&str> {
    payload
        .get("httpMethod")
        .and_then(|v| v.as_str())
        .or_else(|| {
            payload
                .get("requestContext")
                .and_then(|ctx| ctx.get("http"))
                .and_then(|http| http.get("method"))
                .and_then(|v| v.as_str())
        })
}

pub fn get_body(payload: &Value) -> Option<&str> {
    payload.get("body").and_then(|v| v.as_str())
}

pub fn get_header_value<'a>(headers: &'a Value, name: &str) -> Option<&'a str> {
    if let Some(v) = headers.get(name).and_then(|s| s.as_str()) {
        return Some(v);
    }
    headers.as_object().and_then(|map| {
        map.iter().find_map(|(k, v)| {
            if k.eq_ignore_ascii_case(name) {
                v.as_str()
            } else {
                None
            }
        })
    })
}

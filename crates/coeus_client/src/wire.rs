use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct CreateUserBody<'a> {
    pub user_name: &'a str,
    pub user_pdf_name: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CreateUserResponse {
    pub user: Option<UserRecord>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UserRecord {
    /// Supabase hands out UUID strings; older rows use integer keys.
    pub id: Option<Value>,
}

impl UserRecord {
    pub fn id_string(&self) -> Option<String> {
        match self.id.as_ref()? {
            Value::String(id) if !id.is_empty() => Some(id.clone()),
            Value::Number(id) => Some(id.to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadResponse {
    pub job_id: Option<String>,
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IngestionResponse {
    pub vectors_stored: Option<u64>,
    pub docs_indexed: Option<u64>,
}

/// Extracts the human-readable message from an error response body.
///
/// Order: `detail` (string, or the first `msg` of a validation list), then
/// `message`, then a bare JSON string, then the raw body text, then `fallback`.
pub fn backend_message(body: &[u8], fallback: &str) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        if let Some(message) = structured_message(&value) {
            return message;
        }
        if let Some(text) = value.as_str() {
            let text = text.trim();
            return if text.is_empty() {
                fallback.to_string()
            } else {
                text.to_string()
            };
        }
        if value.is_object() || value.is_null() {
            return fallback.to_string();
        }
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        fallback.to_string()
    } else {
        text.to_string()
    }
}

fn structured_message(value: &Value) -> Option<String> {
    let non_empty = |s: &str| (!s.trim().is_empty()).then(|| s.to_string());
    match value.get("detail") {
        Some(Value::String(detail)) => {
            if let Some(message) = non_empty(detail) {
                return Some(message);
            }
        }
        Some(Value::Array(items)) => {
            let first = items
                .iter()
                .find_map(|item| item.get("msg").and_then(Value::as_str))
                .and_then(non_empty);
            if first.is_some() {
                return first;
            }
        }
        _ => {}
    }
    value
        .get("message")
        .and_then(Value::as_str)
        .and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_detail_over_message() {
        let body = br#"{"detail":"Job not found","message":"ignored"}"#;
        assert_eq!(backend_message(body, "fallback"), "Job not found");
    }

    #[test]
    fn reads_first_validation_message() {
        let body = br#"{"detail":[{"loc":["body","user_name"],"msg":"field required"}]}"#;
        assert_eq!(backend_message(body, "fallback"), "field required");
    }

    #[test]
    fn uses_message_field() {
        let body = br#"{"message":"quota exceeded"}"#;
        assert_eq!(backend_message(body, "fallback"), "quota exceeded");
    }

    #[test]
    fn object_without_known_fields_uses_fallback() {
        assert_eq!(backend_message(br#"{"error":1}"#, "fallback"), "fallback");
    }

    #[test]
    fn plain_text_then_fallback() {
        assert_eq!(backend_message(b"Bad Gateway\n", "fallback"), "Bad Gateway");
        assert_eq!(backend_message(b"   ", "fallback"), "fallback");
    }

    #[test]
    fn json_string_body_loses_its_quotes() {
        assert_eq!(backend_message(br#""Internal error""#, "fallback"), "Internal error");
        assert_eq!(backend_message(br#""  ""#, "fallback"), "fallback");
    }

    #[test]
    fn numeric_and_string_user_ids() {
        let parsed: CreateUserResponse =
            serde_json::from_str(r#"{"user":{"id":17}}"#).unwrap();
        assert_eq!(parsed.user.unwrap().id_string().as_deref(), Some("17"));

        let parsed: CreateUserResponse =
            serde_json::from_str(r#"{"user":{"id":""}}"#).unwrap();
        assert_eq!(parsed.user.unwrap().id_string(), None);
    }
}

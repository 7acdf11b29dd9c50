use serde::Serialize;
use std::collections::BTreeMap;

/// Header every envelope carries.
pub const ACCESS_CONTROL_ALLOW_ORIGIN: &str = "Access-Control-Allow-Origin";
/// Value of [`ACCESS_CONTROL_ALLOW_ORIGIN`].
pub const ALLOW_ORIGIN: &str = "*";
/// Status used when the caller gives none.
pub const DEFAULT_STATUS: i64 = 200;

/// HTTP-style response with a JSON text body and a permissive CORS header.
///
/// Serializes to `{"statusCode": .., "headers": {..}, "body": ".."}`, the shape
/// API Gateway proxy integrations expect back from a handler.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    status_code: i64,
    headers: BTreeMap<String, String>,
    body: String,
}

impl ResponseEnvelope {
    pub(crate) fn new(status_code: i64, body: String) -> ResponseEnvelope {
        ResponseEnvelope {
            status_code,
            headers: cors_headers(),
            body,
        }
    }

    pub fn status_code(&self) -> i64 {
        self.status_code
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// JSON text of the resolved body, or `""` for a null body.
    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}

impl Default for ResponseEnvelope {
    /// Envelope for a call without body and status: `200` with body `{}`.
    fn default() -> Self {
        crate::empty(DEFAULT_STATUS)
    }
}

fn cors_headers() -> BTreeMap<String, String> {
    let mut headers = BTreeMap::new();
    headers.insert(
        ACCESS_CONTROL_ALLOW_ORIGIN.to_string(),
        ALLOW_ORIGIN.to_string(),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn default_envelope() {
        let envelope = ResponseEnvelope::default();
        assert_eq!(envelope.status_code(), 200);
        assert_eq!(envelope.body(), "{}");
        assert_eq!(envelope.headers().len(), 1);
        assert_eq!(envelope.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    }

    #[test]
    fn serializes_to_proxy_shape() {
        let envelope = ResponseEnvelope::new(404, "\"gone\"".to_string());
        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({
                "statusCode": 404,
                "headers": { "Access-Control-Allow-Origin": "*" },
                "body": "\"gone\""
            })
        );
        assert_eq!(
            serde_json::to_string(&envelope).unwrap(),
            r#"{"statusCode":404,"headers":{"Access-Control-Allow-Origin":"*"},"body":"\"gone\""}"#
        );
    }
}

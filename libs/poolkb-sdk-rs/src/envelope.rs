//! Response stage: turn a raw HTTP response into the envelope payload.

use poolkb_types::{DEFAULT_FAILURE_MESSAGE, Envelope, MISSING_CODE};
use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ApiError;
use crate::transport::RawResponse;

/// Resolve a response to its `data` or to the failure it describes.
///
/// - 2xx with `code == 0`: the `data` field, nothing else.
/// - Any status with a parseable envelope and `code != 0`: `ApiError::Api`
///   carrying the envelope message ("Request failed" when absent).
/// - Other non-2xx responses: `ApiError::Status`.
/// - 2xx JSON object without an integer `code`: `ApiError::Api` with
///   `MISSING_CODE`.
/// - 2xx with a body that is not JSON: `ApiError::Decode`.
pub fn unwrap_envelope(response: RawResponse) -> Result<Value, ApiError> {
    let parsed = serde_json::from_str::<Envelope>(&response.body);

    if !response.is_success() {
        return match parsed {
            Ok(envelope) if !envelope.is_success() => Err(rejection(&envelope)),
            _ => {
                warn!(status = response.status, "request failed without an error envelope");
                Err(ApiError::Status {
                    status: response.status,
                    body: response.body,
                })
            }
        };
    }

    let envelope = match parsed {
        Ok(envelope) => envelope,
        Err(err) => return Err(codeless_rejection(&response.body).unwrap_or(ApiError::Decode(err))),
    };
    if envelope.is_success() {
        Ok(envelope.data)
    } else {
        Err(rejection(&envelope))
    }
}

fn rejection(envelope: &Envelope) -> ApiError {
    let message = envelope.failure_message().to_string();
    warn!(code = envelope.code, message = %message, "request rejected by server");
    ApiError::Api {
        code: envelope.code,
        message,
    }
}

fn codeless_rejection(body: &str) -> Option<ApiError> {
    let object = serde_json::from_str::<Map<String, Value>>(body).ok()?;
    let message = object
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or(DEFAULT_FAILURE_MESSAGE)
        .to_string();
    warn!(message = %message, "response carried no usable code");
    Some(ApiError::Api {
        code: MISSING_CODE,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: Value) -> RawResponse {
        RawResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn test_success_yields_data_only() {
        let data = unwrap_envelope(response(
            200,
            json!({"code": 0, "message": "ok", "data": [{"id": "p1"}]}),
        ))
        .unwrap();

        assert_eq!(data, json!([{"id": "p1"}]));
    }

    #[test]
    fn test_success_without_data_is_null() {
        let data = unwrap_envelope(response(200, json!({"code": 0, "message": "Logged out"}))).unwrap();
        assert_eq!(data, Value::Null);
    }

    #[test]
    fn test_failure_uses_envelope_message() {
        let err = unwrap_envelope(response(200, json!({"code": 1, "message": "not found"})))
            .unwrap_err();

        assert!(matches!(err, ApiError::Api { code: 1, .. }));
        assert_eq!(err.to_string(), "not found");
    }

    #[test]
    fn test_failure_without_message_uses_fallback() {
        let err = unwrap_envelope(response(200, json!({"code": 40001, "data": null}))).unwrap_err();
        assert_eq!(err.to_string(), "Request failed");
    }

    #[test]
    fn test_error_status_with_envelope_is_api_error() {
        let err = unwrap_envelope(response(
            401,
            json!({"code": 401, "message": "Incorrect username or password"}),
        ))
        .unwrap_err();

        assert_eq!(err.code(), Some(401));
        assert_eq!(err.to_string(), "Incorrect username or password");
    }

    #[test]
    fn test_error_status_without_envelope_is_status_error() {
        let err = unwrap_envelope(response(404, json!({"detail": "Post not found"}))).unwrap_err();

        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 404);
                assert!(body.contains("Post not found"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_error_status_with_success_code_is_status_error() {
        let err = unwrap_envelope(response(500, json!({"code": 0, "data": 1}))).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 500, .. }));
    }

    #[test]
    fn test_success_status_without_code_is_rejected() {
        let err = unwrap_envelope(response(200, json!({"detail": "Post not found"}))).unwrap_err();
        assert!(matches!(err, ApiError::Api { code: MISSING_CODE, .. }));
        assert_eq!(err.to_string(), "Request failed");

        let err = unwrap_envelope(response(200, json!({"message": "Token expired"}))).unwrap_err();
        assert_eq!(err.to_string(), "Token expired");

        let err = unwrap_envelope(response(200, json!({"code": "0", "data": []}))).unwrap_err();
        assert_eq!(err.code(), Some(MISSING_CODE));
    }

    #[test]
    fn test_unparseable_success_body_is_decode_error() {
        let err = unwrap_envelope(RawResponse {
            status: 200,
            body: "<html>gateway</html>".into(),
        })
        .unwrap_err();

        assert!(matches!(err, ApiError::Decode(_)));
    }
}

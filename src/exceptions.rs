//! Error mapping
//!
//! Classifies one transport outcome into a decoded value or exactly one typed
//! error, using the merged `exceptions` table of the venue.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::warn;

use crate::client::{HttpResponse, TransportError};
use crate::descriptor::{Descriptor, Node};
use crate::errors::{CcxtError, CcxtResult, ErrorKind};

const DEFAULT_CODE_KEY: &str = "err-code";
const DEFAULT_MESSAGE_KEY: &str = "err-msg";
const DEFAULT_STATUS_ERROR: &str = "error";

/// Venue error signalled by a decoded body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFailure {
    /// `None` when the body flags an error without a usable identifier
    pub code: Option<String>,
    pub message: String,
}

/// Venue error table plus where to find the error indicator in a payload
#[derive(Debug, Clone)]
pub struct ErrorMapper {
    venue: String,
    code_key: String,
    message_key: String,
    /// `options.errorStatusKey` and the value that marks a failed reply
    status: Option<(String, String)>,
    codes: BTreeMap<String, ErrorKind>,
}

impl ErrorMapper {
    /// Builds the table from a merged descriptor. Unknown kind names fail here,
    /// not at call time.
    pub fn from_descriptor(descriptor: &Descriptor) -> CcxtResult<Self> {
        let mut codes = BTreeMap::new();
        match descriptor.get("exceptions") {
            None => {},
            Some(Node::Map(entries)) => {
                for (code, kind) in entries {
                    let path = format!("exceptions.{code}");
                    let name = kind
                        .as_str()
                        .ok_or_else(|| CcxtError::malformed(&path, "error kind must be a string"))?;
                    let kind = name
                        .parse::<ErrorKind>()
                        .map_err(|_| CcxtError::malformed(&path, format!("unknown error kind `{name}`")))?;
                    codes.insert(code.clone(), kind);
                }
            },
            Some(other) => {
                return Err(CcxtError::malformed(
                    "exceptions",
                    format!("expected mapping, found {}", other.type_name()),
                ))
            },
        }

        Ok(Self {
            venue: descriptor.id().unwrap_or("<anonymous>").to_string(),
            code_key: descriptor.option_str("errorCodeKey").unwrap_or(DEFAULT_CODE_KEY).to_string(),
            message_key: descriptor
                .option_str("errorMessageKey")
                .unwrap_or(DEFAULT_MESSAGE_KEY)
                .to_string(),
            status: descriptor.option_str("errorStatusKey").map(|key| {
                let value = descriptor
                    .option_str("errorStatusValue")
                    .unwrap_or(DEFAULT_STATUS_ERROR);
                (key.to_string(), value.to_string())
            }),
            codes,
        })
    }

    /// Mapped kind for a venue error identifier
    pub fn kind_of(&self, code: &str) -> Option<ErrorKind> {
        self.codes.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Venue failure carried by a decoded body, if any.
    ///
    /// A present error-code field flags a failure even when it is empty, and so
    /// does the status field holding its error value.
    pub fn locate(&self, body: &Value) -> Option<VenueFailure> {
        let code = match body.get(&self.code_key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(other) => Some(other.to_string()),
        };
        let status_failed = self
            .status
            .as_ref()
            .is_some_and(|(key, value)| body.get(key).and_then(Value::as_str) == Some(value.as_str()));
        if code.is_none() && !status_failed {
            return None;
        }

        let message = match body.get(&self.message_key) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        };
        Some(VenueFailure {
            code: code.filter(|c| !c.is_empty()),
            message,
        })
    }

    /// Error for a located failure: mapped kind, or generic `ExchangeError`.
    /// Failures without an identifier carry the raw body.
    pub fn venue_error(&self, failure: &VenueFailure, raw: &str, url: &str) -> CcxtError {
        let code = match failure.code.as_deref() {
            Some(code) => code,
            None => {
                warn!(venue = %self.venue, "venue error without identifier");
                return CcxtError::ExchangeError {
                    code: String::new(),
                    message: format!("[{}] {}", self.venue, raw),
                };
            },
        };

        let text = format!("[{}] {}: {}", self.venue, code, failure.message);
        match self.kind_of(code) {
            Some(kind) => kind.into_error(code, text, url),
            None => {
                warn!(venue = %self.venue, code, "unmapped venue error");
                CcxtError::ExchangeError {
                    code: code.to_string(),
                    message: text,
                }
            },
        }
    }

    /// Turns one transport outcome into a decoded value or a typed error.
    pub fn classify(
        &self,
        url: &str,
        outcome: Result<HttpResponse, TransportError>,
    ) -> CcxtResult<Value> {
        let response = outcome?;
        let raw = response.body.trim();
        let decoded: Option<Value> = if raw.is_empty() {
            None
        } else {
            serde_json::from_str(raw).ok()
        };

        if let Some(failure) = decoded.as_ref().and_then(|body| self.locate(body)) {
            return Err(self.venue_error(&failure, raw, url));
        }

        if !response.is_success() {
            return Err(CcxtError::HttpStatus {
                url: url.to_string(),
                status: response.status,
                body: response.body,
            });
        }

        match decoded {
            Some(Value::Null) | None if raw.is_empty() || raw == "null" => {
                Err(CcxtError::NullResponse { url: url.to_string() })
            },
            Some(value) => Ok(value),
            None => Err(CcxtError::BadResponse {
                message: format!("undecodable body from {url}"),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapper() -> ErrorMapper {
        let d = Descriptor::from_value(json!({
            "id": "hadax",
            "options": { "errorStatusKey": "status" },
            "exceptions": { "not-allow-entry-hadax": "PermissionDenied", "1002": "InsufficientFunds" },
        }))
        .unwrap();
        ErrorMapper::from_descriptor(&d).unwrap()
    }

    const URL: &str = "https://api.hadax.com/v1/order/orders";

    #[test]
    fn test_mapped_identifier() {
        let body = r#"{"status":"error","err-code":"not-allow-entry-hadax","err-msg":"no entry"}"#;
        let err = mapper().classify(URL, Ok(HttpResponse::new(200, body))).unwrap_err();
        assert!(matches!(err, CcxtError::PermissionDenied { .. }));
        assert!(err.to_string().contains("no entry"));
    }

    #[test]
    fn test_numeric_identifier() {
        let body = r#"{"err-code":1002,"err-msg":"balance"}"#;
        let err = mapper().classify(URL, Ok(HttpResponse::new(200, body))).unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InsufficientFunds));
    }

    #[test]
    fn test_unmapped_identifier_is_generic() {
        let body = r#"{"status":"error","err-code":"base-symbol-error","err-msg":"bad"}"#;
        let err = mapper().classify(URL, Ok(HttpResponse::new(200, body))).unwrap_err();
        match err {
            CcxtError::ExchangeError { code, message } => {
                assert_eq!(code, "base-symbol-error");
                assert!(message.contains("bad"));
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_error_status_without_code_fails() {
        let body = r#"{"status":"error","err-msg":"invalid request"}"#;
        let err = mapper().classify(URL, Ok(HttpResponse::new(200, body))).unwrap_err();
        match err {
            CcxtError::ExchangeError { code, message } => {
                assert!(code.is_empty());
                assert!(message.contains("invalid request"));
                assert!(message.contains(r#""status":"error""#));
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_empty_code_still_fails() {
        let body = r#"{"status":"error","err-code":"","err-msg":"x"}"#;
        let err = mapper().classify(URL, Ok(HttpResponse::new(200, body))).unwrap_err();
        assert!(matches!(err, CcxtError::ExchangeError { .. }));

        // no status key configured: the code field alone flags the failure
        let plain = ErrorMapper::from_descriptor(&Descriptor::new()).unwrap();
        let err = plain
            .classify(URL, Ok(HttpResponse::new(200, r#"{"err-code":""}"#)))
            .unwrap_err();
        assert!(matches!(err, CcxtError::ExchangeError { .. }));
    }

    #[test]
    fn test_ok_status_passes() {
        let body = r#"{"status":"ok","data":[]}"#;
        assert!(mapper().classify(URL, Ok(HttpResponse::new(200, body))).is_ok());
    }

    #[test]
    fn test_venue_body_on_non_2xx_still_mapped() {
        let body = r#"{"err-code":"not-allow-entry-hadax","err-msg":"x"}"#;
        let err = mapper().classify(URL, Ok(HttpResponse::new(403, body))).unwrap_err();
        assert!(matches!(err, CcxtError::PermissionDenied { .. }));
    }

    #[test]
    fn test_non_2xx_without_venue_body() {
        let err = mapper()
            .classify(URL, Ok(HttpResponse::new(502, "<html>bad gateway</html>")))
            .unwrap_err();
        match err {
            CcxtError::HttpStatus { status, body, .. } => {
                assert_eq!(status, 502);
                assert!(body.contains("bad gateway"));
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_success_and_empty_bodies() {
        let ok = mapper()
            .classify(URL, Ok(HttpResponse::new(200, r#"{"status":"ok","data":[1]}"#)))
            .unwrap();
        assert_eq!(ok["data"], json!([1]));

        let err = mapper().classify(URL, Ok(HttpResponse::new(200, ""))).unwrap_err();
        assert!(matches!(err, CcxtError::NullResponse { .. }));

        let err = mapper().classify(URL, Ok(HttpResponse::new(200, "not json"))).unwrap_err();
        assert!(matches!(err, CcxtError::BadResponse { .. }));
    }

    #[test]
    fn test_transport_failure() {
        let err = mapper()
            .classify(URL, Err(TransportError::Timeout { url: URL.into() }))
            .unwrap_err();
        assert!(matches!(err, CcxtError::RequestTimeout { .. }));
    }

    #[test]
    fn test_unknown_kind_rejected_at_build() {
        let d = Descriptor::from_value(json!({ "exceptions": { "x": "Nope" } })).unwrap();
        let err = ErrorMapper::from_descriptor(&d).unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_custom_indicator_keys() {
        let d = Descriptor::from_value(json!({
            "options": { "errorCodeKey": "code", "errorMessageKey": "msg" },
            "exceptions": { "-2010": "InsufficientFunds" },
        }))
        .unwrap();
        let m = ErrorMapper::from_descriptor(&d).unwrap();
        let err = m
            .classify(URL, Ok(HttpResponse::new(400, r#"{"code":-2010,"msg":"low"}"#)))
            .unwrap_err();
        assert_eq!(err.kind(), Some(ErrorKind::InsufficientFunds));
    }
}

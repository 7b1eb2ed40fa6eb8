//! Request signing
//!
//! Signing is a pluggable strategy: the dispatcher hands it the unsigned request
//! parts plus a clock and the venue credentials, and sends whatever it returns.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::api::HttpMethod;
use crate::errors::{CcxtError, CcxtResult};
use crate::utils::crypto::hmac_sha256_base64;
use crate::utils::time::iso8601_seconds;
use crate::utils::url::encode_query;
use crate::utils::Clock;

/// API credentials. Which fields must be present is declared by the
/// descriptor's `requiredCredentials` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Credentials {
    pub api_key: Option<String>,
    #[serde(alias = "apiSecret")]
    pub secret: Option<String>,
    pub password: Option<String>,
    pub uid: Option<String>,
}

impl Credentials {
    /// Value of a credential by its descriptor name (`apiKey`, `secret`, `password`, `uid`)
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "apiKey" => &self.api_key,
            "secret" => &self.secret,
            "password" => &self.password,
            "uid" => &self.uid,
            _ => return None,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }
}

/// Unsigned request parts
#[derive(Debug, Clone)]
pub struct SignInput<'a> {
    pub method: HttpMethod,
    /// Host the request goes to (`api.hadax.com`)
    pub host: &'a str,
    /// Absolute path including any version prefix (`/v1/order/orders`)
    pub path: &'a str,
    pub query: &'a BTreeMap<String, String>,
    pub body: Option<&'a Value>,
}

/// 서명된 요청
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignedRequest {
    pub headers: BTreeMap<String, String>,
    /// Replaces the unsigned query entirely
    pub query: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Produces authenticated request material
pub trait SigningStrategy: Send + Sync {
    fn sign(
        &self,
        input: &SignInput<'_>,
        clock: &dyn Clock,
        credentials: &Credentials,
    ) -> CcxtResult<SignedRequest>;
}

/// Huobi signature version 2: HMAC-SHA256 over
/// `METHOD\nhost\npath\nsorted-query`, base64 encoded into `Signature`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuobiSigner;

impl SigningStrategy for HuobiSigner {
    fn sign(
        &self,
        input: &SignInput<'_>,
        clock: &dyn Clock,
        credentials: &Credentials,
    ) -> CcxtResult<SignedRequest> {
        let missing = |field: &str| CcxtError::AuthenticationError {
            message: format!("{field} required"),
        };
        let api_key = credentials.field("apiKey").ok_or_else(|| missing("apiKey"))?;
        let secret = credentials.field("secret").ok_or_else(|| missing("secret"))?;

        let mut query = input.query.clone();
        query.insert("AccessKeyId".into(), api_key.to_string());
        query.insert("SignatureMethod".into(), "HmacSHA256".into());
        query.insert("SignatureVersion".into(), "2".into());
        query.insert("Timestamp".into(), iso8601_seconds(clock.now()));

        let payload = format!(
            "{}\n{}\n{}\n{}",
            input.method,
            input.host,
            input.path,
            encode_query(&query)
        );
        query.insert("Signature".into(), hmac_sha256_base64(secret, &payload));

        let mut headers = BTreeMap::new();
        let body = if input.method.carries_body() {
            headers.insert("Content-Type".into(), "application/json".into());
            Some(serde_json::to_string(input.body.unwrap_or(&Value::Object(Default::default())))?)
        } else {
            headers.insert(
                "Content-Type".into(),
                "application/x-www-form-urlencoded".into(),
            );
            None
        };

        Ok(SignedRequest { headers, query, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::FixedClock;
    use serde_json::json;

    fn creds() -> Credentials {
        Credentials {
            api_key: Some("key".into()),
            secret: Some("secret".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_credentials_field_lookup() {
        let c = Credentials {
            api_key: Some("k".into()),
            secret: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(c.field("apiKey"), Some("k"));
        assert_eq!(c.field("secret"), None);
        assert_eq!(c.field("twofa"), None);
    }

    #[test]
    fn test_huobi_get_signature() {
        let mut query = BTreeMap::new();
        query.insert("states".to_string(), "filled".to_string());
        let input = SignInput {
            method: HttpMethod::Get,
            host: "api.hadax.com",
            path: "/v1/order/orders",
            query: &query,
            body: None,
        };

        let signed = HuobiSigner
            .sign(&input, &FixedClock(1_522_228_500_000), &creds())
            .unwrap();

        let expected_payload = "GET\napi.hadax.com\n/v1/order/orders\n\
            AccessKeyId=key&SignatureMethod=HmacSHA256&SignatureVersion=2\
            &Timestamp=2018-03-28T09%3A15%3A00&states=filled";
        assert_eq!(
            signed.query.get("Signature").map(String::as_str),
            Some(hmac_sha256_base64("secret", expected_payload).as_str())
        );
        assert_eq!(signed.query.get("states").map(String::as_str), Some("filled"));
        assert!(signed.body.is_none());
    }

    #[test]
    fn test_huobi_post_carries_json_body() {
        let query = BTreeMap::new();
        let body = json!({ "symbol": "ethbtc", "type": "buy-limit" });
        let input = SignInput {
            method: HttpMethod::Post,
            host: "api.hadax.com",
            path: "/v1/hadax/order/orders/place",
            query: &query,
            body: Some(&body),
        };

        let signed = HuobiSigner.sign(&input, &FixedClock(0), &creds()).unwrap();
        assert_eq!(
            signed.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let sent: Value = serde_json::from_str(signed.body.as_deref().unwrap()).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn test_huobi_requires_secret() {
        let query = BTreeMap::new();
        let input = SignInput {
            method: HttpMethod::Get,
            host: "h",
            path: "/p",
            query: &query,
            body: None,
        };
        let only_key = Credentials {
            api_key: Some("key".into()),
            ..Default::default()
        };
        assert!(HuobiSigner.sign(&input, &FixedClock(0), &only_key).is_err());
    }
}

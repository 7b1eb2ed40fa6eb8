//! Venue instance configuration
//!
//! Settings layered over the descriptor per instance: credentials, the
//! transport timeout and an optional `{hostname}` override.

use serde::Deserialize;

use super::signer::Credentials;

const DEFAULT_TIMEOUT_MS: u64 = 10_000;

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

/// 거래소 인스턴스 설정
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeConfig {
    #[serde(flatten)]
    credentials: Credentials,
    #[serde(default = "default_timeout_ms", alias = "timeout")]
    timeout_ms: u64,
    /// Takes precedence over the descriptor's `hostname`
    #[serde(default)]
    hostname: Option<String>,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            credentials: Credentials::default(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            hostname: None,
        }
    }
}

impl ExchangeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// apiKey + secret, the pair every huobi-family venue requires
    pub fn with_credentials(self, api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        self.with_api_key(api_key).with_secret(secret)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.credentials.api_key = Some(api_key.into());
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.credentials.secret = Some(secret.into());
        self
    }

    /// Passphrase, for venues whose `requiredCredentials` asks for one
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.credentials.password = Some(password.into());
        self
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.credentials.uid = Some(uid.into());
        self
    }

    /// 요청 타임아웃 (밀리초)
    pub fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Points `{hostname}` urls at a mirror (`api.huobi.br.com`)
    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = Some(hostname.into());
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn timeout_ms(&self) -> u64 {
        self.timeout_ms
    }

    pub fn hostname(&self) -> Option<&str> {
        self.hostname.as_deref()
    }

    /// apiKey and secret both set and non-empty
    pub fn has_credentials(&self) -> bool {
        self.credentials.field("apiKey").is_some() && self.credentials.field("secret").is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_fills_credentials() {
        let config = ExchangeConfig::new()
            .with_credentials("key", "secret")
            .with_password("pass")
            .with_timeout(2_500);

        assert!(config.has_credentials());
        assert_eq!(config.credentials().field("apiKey"), Some("key"));
        assert_eq!(config.credentials().field("password"), Some("pass"));
        assert_eq!(config.credentials().field("uid"), None);
        assert_eq!(config.timeout_ms(), 2_500);
    }

    #[test]
    fn test_empty_values_do_not_count() {
        let config = ExchangeConfig::new().with_credentials("key", "");
        assert!(!config.has_credentials());
        assert_eq!(ExchangeConfig::default().timeout_ms(), DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_deserialize_ccxt_field_names() {
        let config: ExchangeConfig = serde_json::from_str(
            r#"{ "apiKey": "k", "secret": "s", "uid": "42", "timeout": 3000, "hostname": "api.huobi.br.com" }"#,
        )
        .unwrap();
        assert!(config.has_credentials());
        assert_eq!(config.credentials().field("uid"), Some("42"));
        assert_eq!(config.timeout_ms(), 3000);
        assert_eq!(config.hostname(), Some("api.huobi.br.com"));

        let bare: ExchangeConfig = serde_json::from_str("{}").unwrap();
        assert!(!bare.has_credentials());
        assert_eq!(bare.timeout_ms(), DEFAULT_TIMEOUT_MS);
    }
}

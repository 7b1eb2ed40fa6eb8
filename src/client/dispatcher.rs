//! Operation dispatcher
//!
//! One generic invoke routine for every bound operation:
//! build → sign (private only) → send → decode → classify.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::signer::{SignInput, SigningStrategy};
use super::transport::{HttpRequest, Transport};
use super::ExchangeConfig;
use crate::api::Operation;
use crate::descriptor::Node;
use crate::errors::{CcxtError, CcxtResult};
use crate::exceptions::ErrorMapper;
use crate::utils::url::{encode_query, host_of};
use crate::utils::Clock;

/// Credentials checked when the descriptor has no `requiredCredentials` table
const DEFAULT_REQUIRED_CREDENTIALS: [&str; 2] = ["apiKey", "secret"];

/// Arguments of one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    /// Values for `{placeholder}`s in the path template
    pub path: BTreeMap<String, String>,
    pub query: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl CallArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(name.into(), value.into());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Executes operations of one venue
pub struct Dispatcher {
    venue: String,
    config: ExchangeConfig,
    transport: Arc<dyn Transport>,
    signer: Option<Arc<dyn SigningStrategy>>,
    clock: Arc<dyn Clock>,
    errors: ErrorMapper,
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("venue", &self.venue)
            .field("has_signer", &self.signer.is_some())
            .field("has_credentials", &self.config.has_credentials())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(
        venue: impl Into<String>,
        config: ExchangeConfig,
        transport: Arc<dyn Transport>,
        signer: Option<Arc<dyn SigningStrategy>>,
        clock: Arc<dyn Clock>,
        errors: ErrorMapper,
    ) -> Self {
        Self {
            venue: venue.into(),
            config,
            transport,
            signer,
            clock,
            errors,
        }
    }

    pub fn errors(&self) -> &ErrorMapper {
        &self.errors
    }

    /// Sends one request for `op` and classifies the reply. Never retries.
    pub async fn invoke(
        &self,
        op: &Operation,
        args: &CallArgs,
        cancel: CancellationToken,
    ) -> CcxtResult<Value> {
        let (endpoint, request) = self.prepare(op, args)?;
        debug!(
            venue = %self.venue,
            operation = %op.id(),
            method = %request.method,
            url = %endpoint,
            "dispatching"
        );
        let outcome = self.transport.send(request, cancel).await;
        self.errors.classify(&endpoint, outcome)
    }

    /// Builds (and for private operations signs) the request without sending it.
    ///
    /// Returns the endpoint url without query alongside the request; errors
    /// report the endpoint so signatures never end up in messages.
    pub fn prepare(&self, op: &Operation, args: &CallArgs) -> CcxtResult<(String, HttpRequest)> {
        if op.is_private() {
            self.check_credentials(op)?;
        }
        if args.body.is_some() && !op.method().carries_body() {
            return Err(CcxtError::InvalidParameter {
                operation: op.id().to_string(),
                message: format!("{} requests cannot carry a body", op.method()),
            });
        }

        let base = self.api_base(op)?;
        let path = self.full_path(op, args)?;
        let endpoint = format!("{base}{path}");

        let (headers, query, body) = if op.is_private() {
            let signer = self.signer.as_ref().ok_or_else(|| CcxtError::MissingSigner {
                venue: self.venue.clone(),
            })?;
            let input = SignInput {
                method: op.method(),
                host: host_of(&base),
                path: &path,
                query: &args.query,
                body: args.body.as_ref(),
            };
            let signed = signer.sign(&input, self.clock.as_ref(), self.config.credentials())?;
            (signed.headers, signed.query, signed.body)
        } else {
            let mut headers = BTreeMap::new();
            let body = match &args.body {
                Some(body) => {
                    headers.insert("Content-Type".to_string(), "application/json".to_string());
                    Some(serde_json::to_string(body)?)
                },
                None => None,
            };
            (headers, args.query.clone(), body)
        };

        let url = if query.is_empty() {
            endpoint.clone()
        } else {
            format!("{endpoint}?{}", encode_query(&query))
        };

        Ok((
            endpoint,
            HttpRequest {
                method: op.method(),
                url,
                headers,
                body,
            },
        ))
    }

    /// Fails with `MissingCredentials` for the first required field that is not configured.
    fn check_credentials(&self, op: &Operation) -> CcxtResult<()> {
        let declared: Option<Vec<&str>> = op
            .descriptor()
            .get_map("requiredCredentials")
            .map(|table| {
                table
                    .iter()
                    .filter(|(_, required)| required.as_bool() == Some(true))
                    .map(|(name, _)| name.as_str())
                    .collect()
            });
        let required = declared.unwrap_or_else(|| DEFAULT_REQUIRED_CREDENTIALS.to_vec());

        match required.into_iter().find(|field| self.config.credentials().field(field).is_none()) {
            Some(field) => Err(CcxtError::MissingCredentials {
                venue: self.venue.clone(),
                operation: op.id().to_string(),
                field: field.to_string(),
            }),
            None => Ok(()),
        }
    }

    /// `urls.api` is either one url or a map keyed by section. `{hostname}` is
    /// filled from the configuration override, then the descriptor.
    fn api_base(&self, op: &Operation) -> CcxtResult<String> {
        let descriptor = op.descriptor();
        let template = match descriptor.get("urls.api") {
            Some(Node::Str(url)) => url.as_str(),
            Some(Node::Map(by_section)) => by_section
                .get(op.section())
                .and_then(Node::as_str)
                .ok_or_else(|| {
                    CcxtError::malformed(
                        format!("urls.api.{}", op.section()),
                        "no url declared for section",
                    )
                })?,
            _ => return Err(CcxtError::malformed("urls.api", "api url is not declared")),
        };

        let base = if template.contains("{hostname}") {
            let hostname = self
                .config
                .hostname()
                .or_else(|| descriptor.hostname())
                .ok_or_else(|| CcxtError::malformed("hostname", "url needs {hostname} but none is set"))?;
            template.replace("{hostname}", hostname)
        } else {
            template.to_string()
        };
        Ok(base.trim_end_matches('/').to_string())
    }

    /// `/{prefix}/{imploded path}`; prefix from `options.apiPrefix.<section>`, else `version`.
    fn full_path(&self, op: &Operation, args: &CallArgs) -> CcxtResult<String> {
        let descriptor = op.descriptor();
        let prefix = descriptor
            .lookup(&["options", "apiPrefix", op.section()])
            .and_then(Node::as_str)
            .or_else(|| descriptor.version())
            .unwrap_or("");

        let path = implode_path(op, &args.path)?;
        Ok(if prefix.is_empty() {
            format!("/{path}")
        } else {
            format!("/{}/{path}", prefix.trim_matches('/'))
        })
    }
}

/// Substitutes every placeholder; missing, empty or unused path params are errors.
pub fn implode_path(op: &Operation, params: &BTreeMap<String, String>) -> CcxtResult<String> {
    let mut path = op.path().to_string();
    for name in op.placeholders() {
        let value = params.get(name).ok_or_else(|| CcxtError::MissingPathParam {
            operation: op.id().to_string(),
            placeholder: name.clone(),
        })?;
        if value.is_empty() {
            return Err(CcxtError::InvalidParameter {
                operation: op.id().to_string(),
                message: format!("path parameter `{name}` is empty"),
            });
        }
        path = path.replace(&format!("{{{name}}}"), &urlencoding::encode(value));
    }

    if let Some(unused) = params.keys().find(|k| !op.placeholders().contains(k)) {
        return Err(CcxtError::InvalidParameter {
            operation: op.id().to_string(),
            message: format!("`{unused}` is not a placeholder of `{}`", op.path()),
        });
    }
    Ok(path)
}

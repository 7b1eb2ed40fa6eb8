//! Venues
//!
//! A venue owns its effective descriptor, the operation table bound from it and
//! a dispatcher. Everything is built once by [`VenueBuilder::build`] and never
//! mutated afterwards; a venue can be shared across tasks behind an `Arc`.

mod registry;

pub use registry::{VenueRegistry, VenueSpec};

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::api::{bind, Operation, Operations};
use crate::client::{CallArgs, Dispatcher, ExchangeConfig, HttpRequest, SigningStrategy, Transport};
use crate::descriptor::{Descriptor, Node};
use crate::errors::{CcxtError, CcxtResult};
use crate::exceptions::ErrorMapper;
use crate::utils::{Clock, SystemClock};

/// Builds a [`Venue`] from an effective descriptor
pub struct VenueBuilder {
    descriptor: Descriptor,
    config: ExchangeConfig,
    transport: Option<Arc<dyn Transport>>,
    signer: Option<Arc<dyn SigningStrategy>>,
    signers: HashMap<String, Arc<dyn SigningStrategy>>,
    clock: Arc<dyn Clock>,
}

impl VenueBuilder {
    pub fn new(descriptor: Descriptor) -> Self {
        Self {
            descriptor,
            config: ExchangeConfig::default(),
            transport: None,
            signer: None,
            signers: HashMap::new(),
            clock: Arc::new(SystemClock),
        }
    }

    pub fn config(mut self, config: ExchangeConfig) -> Self {
        self.config = config;
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Explicit signing strategy; takes precedence over `options.signer`.
    pub fn signer(mut self, signer: Arc<dyn SigningStrategy>) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub(crate) fn with_signers(mut self, signers: HashMap<String, Arc<dyn SigningStrategy>>) -> Self {
        self.signers = signers;
        self
    }

    /// Binds operations, builds the error table and validates every
    /// `options.*Method` reference. All configuration errors surface here.
    pub fn build(self) -> CcxtResult<Venue> {
        let descriptor = Arc::new(self.descriptor);
        let id = descriptor
            .id()
            .ok_or_else(|| CcxtError::malformed("id", "venue id is not declared"))?
            .to_string();
        let name = descriptor.name().unwrap_or(&id).to_string();

        let operations = bind(Arc::clone(&descriptor))?;
        let errors = ErrorMapper::from_descriptor(&descriptor)?;

        if let Some(options) = descriptor.get_map("options") {
            let references = options
                .iter()
                .filter(|(key, _)| key.ends_with("Method"))
                .filter_map(|(_, value)| value.as_str());
            for identifier in references {
                operations.get(identifier)?;
            }
        }

        let signer = match (self.signer, descriptor.option_str("signer")) {
            (Some(signer), _) => Some(signer),
            (None, Some(name)) => Some(self.signers.get(name).cloned().ok_or_else(|| {
                CcxtError::malformed("options.signer", format!("unknown signing strategy `{name}`"))
            })?),
            (None, None) => None,
        };

        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport(&self.config)?,
        };

        debug!(venue = %id, operations = operations.len(), "venue built");

        let dispatcher = Dispatcher::new(id.clone(), self.config, transport, signer, self.clock, errors);
        Ok(Venue {
            id,
            name,
            descriptor,
            operations,
            dispatcher,
        })
    }
}

#[cfg(feature = "http")]
fn default_transport(config: &ExchangeConfig) -> CcxtResult<Arc<dyn Transport>> {
    Ok(Arc::new(crate::client::ReqwestTransport::new(config)?))
}

#[cfg(not(feature = "http"))]
fn default_transport(_config: &ExchangeConfig) -> CcxtResult<Arc<dyn Transport>> {
    Err(CcxtError::NotSupported {
        message: "no transport configured and the `http` feature is disabled".into(),
    })
}

/// 거래소 인스턴스
#[derive(Debug)]
pub struct Venue {
    id: String,
    name: String,
    descriptor: Arc<Descriptor>,
    operations: Operations,
    dispatcher: Dispatcher,
}

impl Venue {
    pub fn builder(descriptor: Descriptor) -> VenueBuilder {
        VenueBuilder::new(descriptor)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn countries(&self) -> Vec<String> {
        self.descriptor.countries()
    }

    /// Effective descriptor
    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    /// Effective descriptor as JSON
    pub fn describe(&self) -> Value {
        self.descriptor.to_value()
    }

    /// 특정 기능 지원 여부
    pub fn has(&self, capability: &str) -> bool {
        self.descriptor.has(capability)
    }

    pub fn common_currency_code(&self, code: &str) -> String {
        self.descriptor.common_currency_code(code)
    }

    pub fn urls(&self) -> Option<&Node> {
        self.descriptor.get("urls")
    }

    pub fn operations(&self) -> &Operations {
        &self.operations
    }

    pub fn operation(&self, identifier: &str) -> CcxtResult<&Operation> {
        self.operations.get(identifier)
    }

    /// Operation named by `options.<key>`, e.g. `fetchMarketsMethod`
    pub fn method(&self, option_key: &str) -> CcxtResult<&Operation> {
        self.operations.resolve_option(&self.descriptor, option_key)
    }

    /// Assembled (and for private operations signed) request, not sent
    pub fn prepare(&self, identifier: &str, args: &CallArgs) -> CcxtResult<HttpRequest> {
        let op = self.operations.get(identifier)?;
        self.dispatcher.prepare(op, args).map(|(_, request)| request)
    }

    /// Invokes an operation by identifier
    pub async fn call(&self, identifier: &str, args: CallArgs) -> CcxtResult<Value> {
        self.call_with_cancel(identifier, args, CancellationToken::new()).await
    }

    /// Invokes an operation; `cancel` is forwarded to the transport.
    pub async fn call_with_cancel(
        &self,
        identifier: &str,
        args: CallArgs,
        cancel: CancellationToken,
    ) -> CcxtResult<Value> {
        let op = self.operations.get(identifier)?;
        self.dispatcher.invoke(op, &args, cancel).await
    }

    /// Invokes the operation selected by `options.<key>`
    pub async fn call_method(&self, option_key: &str, args: CallArgs) -> CcxtResult<Value> {
        let op = self.method(option_key)?;
        self.dispatcher.invoke(op, &args, CancellationToken::new()).await
    }
}

//! Shared test doubles for integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ccxt_runtime::utils::FixedClock;
use ccxt_runtime::{
    ExchangeConfig, HttpRequest, HttpResponse, Transport, TransportError, Venue, VenueRegistry,
};
use tokio_util::sync::CancellationToken;

/// 2018-03-28T09:15:00Z
pub const FIXED_MS: i64 = 1_522_228_500_000;

/// Records every request and replays queued outcomes, then `fallback`.
pub struct StubTransport {
    queued: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    fallback: HttpResponse,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub fn replying(status: u16, body: &str) -> Arc<Self> {
        Arc::new(Self {
            queued: Mutex::new(VecDeque::new()),
            fallback: HttpResponse::new(status, body),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn ok() -> Arc<Self> {
        Self::replying(200, r#"{"status":"ok","data":[]}"#)
    }

    pub fn push(&self, outcome: Result<HttpResponse, TransportError>) {
        self.queued.lock().unwrap().push_back(outcome);
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last(&self) -> HttpRequest {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request recorded")
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn send(
        &self,
        request: HttpRequest,
        cancel: CancellationToken,
    ) -> Result<HttpResponse, TransportError> {
        let url = request.url.clone();
        self.requests.lock().unwrap().push(request);
        if cancel.is_cancelled() {
            return Err(TransportError::Cancelled { url });
        }
        let queued = self.queued.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| Ok(self.fallback.clone()))
    }
}

/// Built-in venue wired to a stub transport and a fixed clock
pub fn venue(id: &str, config: ExchangeConfig, transport: Arc<StubTransport>) -> Venue {
    VenueRegistry::builtin()
        .unwrap()
        .builder(id)
        .unwrap()
        .config(config)
        .transport(transport)
        .clock(Arc::new(FixedClock(FIXED_MS)))
        .build()
        .unwrap()
}

pub fn credentials() -> ExchangeConfig {
    ExchangeConfig::new().with_credentials("key", "secret")
}

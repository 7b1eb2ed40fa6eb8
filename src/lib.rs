//! CCXT-Rust runtime: descriptor merge and dynamic endpoint dispatch
//!
//! 거래소 디스크립터를 병합하고, 선언된 엔드포인트를 호출 가능한 Operation으로 변환하는 런타임
//!
//! ```no_run
//! use ccxt_runtime::{CallArgs, ExchangeConfig, VenueRegistry};
//!
//! # async fn example() -> ccxt_runtime::CcxtResult<()> {
//! let registry = VenueRegistry::builtin()?;
//! let hadax = registry
//!     .builder("hadax")?
//!     .config(ExchangeConfig::new().with_credentials("key", "secret"))
//!     .build()?;
//!
//! let markets = hadax.call_method("fetchMarketsMethod", CallArgs::new()).await?;
//! let order = hadax
//!     .call("privateGetOrderOrdersId", CallArgs::new().path_param("id", "59378"))
//!     .await?;
//! # let _ = (markets, order);
//! # Ok(())
//! # }
//! ```

#![recursion_limit = "256"]

pub mod api;
pub mod client;
pub mod descriptor;
pub mod errors;
pub mod exceptions;
pub mod exchanges;
pub mod utils;
pub mod venue;

// Re-exports
pub use api::{AccessLevel, HttpMethod, Operation, Operations};
pub use client::{
    CallArgs, Credentials, ExchangeConfig, HttpRequest, HttpResponse, HuobiSigner, SignInput,
    SignedRequest, SigningStrategy, Transport, TransportError,
};
pub use descriptor::{merge, Descriptor, Node};
pub use errors::{CcxtError, CcxtResult, ErrorKind};
pub use exceptions::{ErrorMapper, VenueFailure};
pub use venue::{Venue, VenueBuilder, VenueRegistry, VenueSpec};

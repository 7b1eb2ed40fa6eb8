//! Request dispatch and its collaborators

mod config;
mod dispatcher;
#[cfg(feature = "http")]
mod http;
mod signer;
mod transport;

pub use config::ExchangeConfig;
pub use dispatcher::{implode_path, CallArgs, Dispatcher};
#[cfg(feature = "http")]
pub use http::ReqwestTransport;
pub use signer::{Credentials, HuobiSigner, SignInput, SignedRequest, SigningStrategy};
pub use transport::{HttpRequest, HttpResponse, Transport, TransportError};

//! CCXT Error Hierarchy
//!
//! Typed errors raised while building venues and dispatching operations.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::client::TransportError;

/// CCXT error hierarchy
///
/// Venue-mappable classes follow the CCXT hierarchy:
/// - ExchangeError (exchange-specific errors)
///   - AuthenticationError
///     - PermissionDenied
///     - AccountSuspended
///   - ArgumentsRequired
///   - BadRequest
///     - BadSymbol
///   - InsufficientFunds
///   - InvalidAddress
///   - InvalidOrder
///     - OrderNotFound
///     - OrderImmediatelyFillable
///     - OrderNotFillable
///     - DuplicateOrderId
///   - NotSupported
/// - NetworkError
///   - DDoSProtection
///   - RateLimitExceeded
///   - ExchangeNotAvailable
///     - OnMaintenance
///   - InvalidNonce
///   - RequestTimeout
/// - BadResponse
///   - NullResponse
///
/// Configuration and request-construction errors sit outside that tree; they
/// are raised by the runtime itself, never by a venue payload.
#[derive(Error, Debug)]
pub enum CcxtError {
    // === Configuration ===
    /// Descriptor literal has a shape the runtime cannot use
    #[error("Malformed descriptor at `{path}`: {message}")]
    MalformedDescriptor { path: String, message: String },

    /// Two distinct endpoint paths derive the same operation identifier
    #[error("Identifier collision for {identifier}: `{first}` and `{second}`")]
    IdentifierCollision {
        identifier: String,
        first: String,
        second: String,
    },

    /// Venue extends a parent that is not registered
    #[error("Venue {venue} extends unknown parent {parent}")]
    UnresolvedParent { venue: String, parent: String },

    /// Parent chain loops back on itself
    #[error("Inheritance cycle: {chain}")]
    InheritanceCycle { chain: String },

    /// Venue id not registered
    #[error("Unknown venue: {id}")]
    UnknownVenue { id: String },

    /// Identifier does not name a bound operation
    #[error("Operation not found on {venue}: {identifier}")]
    OperationNotFound { venue: String, identifier: String },

    /// Private operation invoked on a venue built without a signing strategy
    #[error("No signing strategy configured for {venue}")]
    MissingSigner { venue: String },

    /// Private operation invoked without the credentials it needs
    #[error("Missing credential `{field}` for {venue}.{operation}")]
    MissingCredentials {
        venue: String,
        operation: String,
        field: String,
    },

    // === Request construction ===
    /// Path template placeholder without a value
    #[error("Missing path parameter `{placeholder}` for {operation}")]
    MissingPathParam {
        operation: String,
        placeholder: String,
    },

    /// Argument the operation cannot accept
    #[error("Invalid parameter for {operation}: {message}")]
    InvalidParameter { operation: String, message: String },

    // === ExchangeError family ===
    /// Generic exchange error, also used for unmapped venue error identifiers
    #[error("Exchange error {code}: {message}")]
    ExchangeError { code: String, message: String },

    /// Authentication failed (invalid API key, signature, etc.)
    #[error("Authentication error: {message}")]
    AuthenticationError { message: String },

    /// API key lacks permission for the operation
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// Account is suspended
    #[error("Account suspended: {message}")]
    AccountSuspended { message: String },

    /// Required arguments missing
    #[error("Arguments required: {message}")]
    ArgumentsRequired { message: String },

    /// Invalid request parameters
    #[error("Bad request: {message}")]
    BadRequest { message: String },

    /// Invalid trading symbol
    #[error("Bad symbol: {message}")]
    BadSymbol { message: String },

    /// Not enough balance
    #[error("Insufficient funds: {message}")]
    InsufficientFunds { message: String },

    /// Invalid deposit/withdrawal address
    #[error("Invalid address: {message}")]
    InvalidAddress { message: String },

    /// Generic invalid order error
    #[error("Invalid order: {message}")]
    InvalidOrder { message: String },

    /// Order not found on exchange
    #[error("Order not found: {message}")]
    OrderNotFound { message: String },

    /// Post-only order would execute immediately
    #[error("Order immediately fillable: {message}")]
    OrderImmediatelyFillable { message: String },

    /// Order cannot be filled (e.g., price too far from market)
    #[error("Order not fillable: {message}")]
    OrderNotFillable { message: String },

    /// Client order ID already used
    #[error("Duplicate order ID: {message}")]
    DuplicateOrderId { message: String },

    /// Feature not supported by this exchange
    #[error("Not supported: {message}")]
    NotSupported { message: String },

    // === NetworkError family ===
    /// Generic network error
    #[error("Network error: {url} - {message}")]
    NetworkError { url: String, message: String },

    /// Non-2xx reply without a venue error body
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        url: String,
        status: u16,
        body: String,
    },

    /// CloudFlare or similar DDoS protection triggered
    #[error("DDoS protection triggered: {message}")]
    DDoSProtection { message: String },

    /// Rate limit exceeded
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded { message: String },

    /// Exchange is temporarily unavailable
    #[error("Exchange not available: {message}")]
    ExchangeNotAvailable { message: String },

    /// Exchange is under maintenance
    #[error("On maintenance: {message}")]
    OnMaintenance { message: String },

    /// Invalid nonce (request timestamp/counter issue)
    #[error("Invalid nonce: {message}")]
    InvalidNonce { message: String },

    /// Request timed out
    #[error("Request timeout: {url}")]
    RequestTimeout { url: String },

    /// Caller cancelled the request before a reply arrived
    #[error("Request cancelled: {url}")]
    RequestCancelled { url: String },

    // === BadResponse family ===
    /// Invalid response from exchange
    #[error("Bad response: {message}")]
    BadResponse { message: String },

    /// Empty/null response from exchange
    #[error("Null response from: {url}")]
    NullResponse { url: String },

    /// JSON parsing error
    #[error("JSON error: {message}")]
    JsonError { message: String },
}

impl CcxtError {
    /// Returns the error code as a string constant
    pub fn code(&self) -> &'static str {
        match self {
            // Configuration
            CcxtError::MalformedDescriptor { .. } => "MALFORMED_DESCRIPTOR",
            CcxtError::IdentifierCollision { .. } => "IDENTIFIER_COLLISION",
            CcxtError::UnresolvedParent { .. } => "UNRESOLVED_PARENT",
            CcxtError::InheritanceCycle { .. } => "INHERITANCE_CYCLE",
            CcxtError::UnknownVenue { .. } => "UNKNOWN_VENUE",
            CcxtError::OperationNotFound { .. } => "OPERATION_NOT_FOUND",
            CcxtError::MissingSigner { .. } => "MISSING_SIGNER",
            CcxtError::MissingCredentials { .. } => "MISSING_CREDENTIALS",
            // Request construction
            CcxtError::MissingPathParam { .. } => "MISSING_PATH_PARAM",
            CcxtError::InvalidParameter { .. } => "INVALID_PARAMETER",
            // ExchangeError family
            CcxtError::ExchangeError { .. } => "EXCHANGE_ERROR",
            CcxtError::AuthenticationError { .. } => "AUTHENTICATION_ERROR",
            CcxtError::PermissionDenied { .. } => "PERMISSION_DENIED",
            CcxtError::AccountSuspended { .. } => "ACCOUNT_SUSPENDED",
            CcxtError::ArgumentsRequired { .. } => "ARGUMENTS_REQUIRED",
            CcxtError::BadRequest { .. } => "BAD_REQUEST",
            CcxtError::BadSymbol { .. } => "BAD_SYMBOL",
            CcxtError::InsufficientFunds { .. } => "INSUFFICIENT_FUNDS",
            CcxtError::InvalidAddress { .. } => "INVALID_ADDRESS",
            CcxtError::InvalidOrder { .. } => "INVALID_ORDER",
            CcxtError::OrderNotFound { .. } => "ORDER_NOT_FOUND",
            CcxtError::OrderImmediatelyFillable { .. } => "ORDER_IMMEDIATELY_FILLABLE",
            CcxtError::OrderNotFillable { .. } => "ORDER_NOT_FILLABLE",
            CcxtError::DuplicateOrderId { .. } => "DUPLICATE_ORDER_ID",
            CcxtError::NotSupported { .. } => "NOT_SUPPORTED",
            // NetworkError family
            CcxtError::NetworkError { .. } => "NETWORK_ERROR",
            CcxtError::HttpStatus { .. } => "HTTP_STATUS",
            CcxtError::DDoSProtection { .. } => "DDOS_PROTECTION",
            CcxtError::RateLimitExceeded { .. } => "RATE_LIMIT_EXCEEDED",
            CcxtError::ExchangeNotAvailable { .. } => "EXCHANGE_NOT_AVAILABLE",
            CcxtError::OnMaintenance { .. } => "ON_MAINTENANCE",
            CcxtError::InvalidNonce { .. } => "INVALID_NONCE",
            CcxtError::RequestTimeout { .. } => "REQUEST_TIMEOUT",
            CcxtError::RequestCancelled { .. } => "REQUEST_CANCELLED",
            // BadResponse family
            CcxtError::BadResponse { .. } => "BAD_RESPONSE",
            CcxtError::NullResponse { .. } => "NULL_RESPONSE",
            CcxtError::JsonError { .. } => "JSON_ERROR",
        }
    }

    /// Venue-mappable kind of this error, if it belongs to the CCXT tree
    pub fn kind(&self) -> Option<ErrorKind> {
        let kind = match self {
            CcxtError::ExchangeError { .. } => ErrorKind::ExchangeError,
            CcxtError::AuthenticationError { .. } => ErrorKind::AuthenticationError,
            CcxtError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            CcxtError::AccountSuspended { .. } => ErrorKind::AccountSuspended,
            CcxtError::ArgumentsRequired { .. } => ErrorKind::ArgumentsRequired,
            CcxtError::BadRequest { .. } => ErrorKind::BadRequest,
            CcxtError::BadSymbol { .. } => ErrorKind::BadSymbol,
            CcxtError::InsufficientFunds { .. } => ErrorKind::InsufficientFunds,
            CcxtError::InvalidAddress { .. } => ErrorKind::InvalidAddress,
            CcxtError::InvalidOrder { .. } => ErrorKind::InvalidOrder,
            CcxtError::OrderNotFound { .. } => ErrorKind::OrderNotFound,
            CcxtError::OrderImmediatelyFillable { .. } => ErrorKind::OrderImmediatelyFillable,
            CcxtError::OrderNotFillable { .. } => ErrorKind::OrderNotFillable,
            CcxtError::DuplicateOrderId { .. } => ErrorKind::DuplicateOrderId,
            CcxtError::NotSupported { .. } => ErrorKind::NotSupported,
            CcxtError::NetworkError { .. } => ErrorKind::NetworkError,
            CcxtError::DDoSProtection { .. } => ErrorKind::DDoSProtection,
            CcxtError::RateLimitExceeded { .. } => ErrorKind::RateLimitExceeded,
            CcxtError::ExchangeNotAvailable { .. } => ErrorKind::ExchangeNotAvailable,
            CcxtError::OnMaintenance { .. } => ErrorKind::OnMaintenance,
            CcxtError::InvalidNonce { .. } => ErrorKind::InvalidNonce,
            CcxtError::RequestTimeout { .. } => ErrorKind::RequestTimeout,
            CcxtError::BadResponse { .. } => ErrorKind::BadResponse,
            CcxtError::NullResponse { .. } => ErrorKind::NullResponse,
            _ => return None,
        };
        Some(kind)
    }

    /// Returns true if this error is temporary and the operation can be retried
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::RequestTimeout { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
                | CcxtError::OnMaintenance { .. }
                | CcxtError::InvalidNonce { .. }
        )
    }

    /// Returns true if this is an authentication-related error
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            CcxtError::AuthenticationError { .. }
                | CcxtError::PermissionDenied { .. }
                | CcxtError::AccountSuspended { .. }
        )
    }

    /// Returns true if this is an order-related error
    pub fn is_order_error(&self) -> bool {
        matches!(
            self,
            CcxtError::InvalidOrder { .. }
                | CcxtError::OrderNotFound { .. }
                | CcxtError::OrderImmediatelyFillable { .. }
                | CcxtError::OrderNotFillable { .. }
                | CcxtError::DuplicateOrderId { .. }
        )
    }

    /// Returns true if this is a network-related error
    pub fn is_network_error(&self) -> bool {
        matches!(
            self,
            CcxtError::NetworkError { .. }
                | CcxtError::HttpStatus { .. }
                | CcxtError::DDoSProtection { .. }
                | CcxtError::RateLimitExceeded { .. }
                | CcxtError::ExchangeNotAvailable { .. }
                | CcxtError::OnMaintenance { .. }
                | CcxtError::InvalidNonce { .. }
                | CcxtError::RequestTimeout { .. }
                | CcxtError::RequestCancelled { .. }
        )
    }

    /// Returns true for errors raised while building a venue or resolving its configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CcxtError::MalformedDescriptor { .. }
                | CcxtError::IdentifierCollision { .. }
                | CcxtError::UnresolvedParent { .. }
                | CcxtError::InheritanceCycle { .. }
                | CcxtError::UnknownVenue { .. }
                | CcxtError::OperationNotFound { .. }
                | CcxtError::MissingSigner { .. }
                | CcxtError::MissingCredentials { .. }
        )
    }

    /// Returns true for per-call argument errors the caller can fix and resend
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            CcxtError::MissingPathParam { .. } | CcxtError::InvalidParameter { .. }
        )
    }

    pub(crate) fn malformed(path: impl Into<String>, message: impl Into<String>) -> Self {
        CcxtError::MalformedDescriptor {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Error kinds a descriptor's `exceptions` table may name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ExchangeError,
    AuthenticationError,
    PermissionDenied,
    AccountSuspended,
    ArgumentsRequired,
    BadRequest,
    BadSymbol,
    InsufficientFunds,
    InvalidAddress,
    InvalidOrder,
    OrderNotFound,
    OrderImmediatelyFillable,
    OrderNotFillable,
    DuplicateOrderId,
    NotSupported,
    NetworkError,
    DDoSProtection,
    RateLimitExceeded,
    ExchangeNotAvailable,
    OnMaintenance,
    InvalidNonce,
    RequestTimeout,
    BadResponse,
    NullResponse,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ExchangeError => "ExchangeError",
            ErrorKind::AuthenticationError => "AuthenticationError",
            ErrorKind::PermissionDenied => "PermissionDenied",
            ErrorKind::AccountSuspended => "AccountSuspended",
            ErrorKind::ArgumentsRequired => "ArgumentsRequired",
            ErrorKind::BadRequest => "BadRequest",
            ErrorKind::BadSymbol => "BadSymbol",
            ErrorKind::InsufficientFunds => "InsufficientFunds",
            ErrorKind::InvalidAddress => "InvalidAddress",
            ErrorKind::InvalidOrder => "InvalidOrder",
            ErrorKind::OrderNotFound => "OrderNotFound",
            ErrorKind::OrderImmediatelyFillable => "OrderImmediatelyFillable",
            ErrorKind::OrderNotFillable => "OrderNotFillable",
            ErrorKind::DuplicateOrderId => "DuplicateOrderId",
            ErrorKind::NotSupported => "NotSupported",
            ErrorKind::NetworkError => "NetworkError",
            ErrorKind::DDoSProtection => "DDoSProtection",
            ErrorKind::RateLimitExceeded => "RateLimitExceeded",
            ErrorKind::ExchangeNotAvailable => "ExchangeNotAvailable",
            ErrorKind::OnMaintenance => "OnMaintenance",
            ErrorKind::InvalidNonce => "InvalidNonce",
            ErrorKind::RequestTimeout => "RequestTimeout",
            ErrorKind::BadResponse => "BadResponse",
            ErrorKind::NullResponse => "NullResponse",
        }
    }

    /// Builds the error for a venue payload carrying `code` and `message`.
    ///
    /// `url` only feeds the variants that are keyed by request url.
    pub fn into_error(self, code: &str, message: String, url: &str) -> CcxtError {
        match self {
            ErrorKind::ExchangeError => CcxtError::ExchangeError {
                code: code.to_string(),
                message,
            },
            ErrorKind::AuthenticationError => CcxtError::AuthenticationError { message },
            ErrorKind::PermissionDenied => CcxtError::PermissionDenied { message },
            ErrorKind::AccountSuspended => CcxtError::AccountSuspended { message },
            ErrorKind::ArgumentsRequired => CcxtError::ArgumentsRequired { message },
            ErrorKind::BadRequest => CcxtError::BadRequest { message },
            ErrorKind::BadSymbol => CcxtError::BadSymbol { message },
            ErrorKind::InsufficientFunds => CcxtError::InsufficientFunds { message },
            ErrorKind::InvalidAddress => CcxtError::InvalidAddress { message },
            ErrorKind::InvalidOrder => CcxtError::InvalidOrder { message },
            ErrorKind::OrderNotFound => CcxtError::OrderNotFound { message },
            ErrorKind::OrderImmediatelyFillable => CcxtError::OrderImmediatelyFillable { message },
            ErrorKind::OrderNotFillable => CcxtError::OrderNotFillable { message },
            ErrorKind::DuplicateOrderId => CcxtError::DuplicateOrderId { message },
            ErrorKind::NotSupported => CcxtError::NotSupported { message },
            ErrorKind::NetworkError => CcxtError::NetworkError {
                url: url.to_string(),
                message,
            },
            ErrorKind::DDoSProtection => CcxtError::DDoSProtection { message },
            ErrorKind::RateLimitExceeded => CcxtError::RateLimitExceeded { message },
            ErrorKind::ExchangeNotAvailable => CcxtError::ExchangeNotAvailable { message },
            ErrorKind::OnMaintenance => CcxtError::OnMaintenance { message },
            ErrorKind::InvalidNonce => CcxtError::InvalidNonce { message },
            ErrorKind::RequestTimeout => CcxtError::RequestTimeout {
                url: url.to_string(),
            },
            ErrorKind::BadResponse => CcxtError::BadResponse { message },
            ErrorKind::NullResponse => CcxtError::NullResponse {
                url: url.to_string(),
            },
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorKind {
    type Err = CcxtError;

    /// Accepts bare class names and namespaced ones (`\ccxt\PermissionDenied`, `ccxt.PermissionDenied`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.rsplit(|c: char| c == '\\' || c == '.').next().unwrap_or(s);
        let kind = match name {
            "ExchangeError" => ErrorKind::ExchangeError,
            "AuthenticationError" => ErrorKind::AuthenticationError,
            "PermissionDenied" => ErrorKind::PermissionDenied,
            "AccountSuspended" => ErrorKind::AccountSuspended,
            "ArgumentsRequired" => ErrorKind::ArgumentsRequired,
            "BadRequest" => ErrorKind::BadRequest,
            "BadSymbol" => ErrorKind::BadSymbol,
            "InsufficientFunds" => ErrorKind::InsufficientFunds,
            "InvalidAddress" => ErrorKind::InvalidAddress,
            "InvalidOrder" => ErrorKind::InvalidOrder,
            "OrderNotFound" => ErrorKind::OrderNotFound,
            "OrderImmediatelyFillable" => ErrorKind::OrderImmediatelyFillable,
            "OrderNotFillable" => ErrorKind::OrderNotFillable,
            "DuplicateOrderId" => ErrorKind::DuplicateOrderId,
            "NotSupported" => ErrorKind::NotSupported,
            "NetworkError" => ErrorKind::NetworkError,
            "DDoSProtection" => ErrorKind::DDoSProtection,
            "RateLimitExceeded" => ErrorKind::RateLimitExceeded,
            "ExchangeNotAvailable" => ErrorKind::ExchangeNotAvailable,
            "OnMaintenance" => ErrorKind::OnMaintenance,
            "InvalidNonce" => ErrorKind::InvalidNonce,
            "RequestTimeout" => ErrorKind::RequestTimeout,
            "BadResponse" => ErrorKind::BadResponse,
            "NullResponse" => ErrorKind::NullResponse,
            _ => {
                return Err(CcxtError::malformed(
                    "exceptions",
                    format!("unknown error kind `{s}`"),
                ))
            }
        };
        Ok(kind)
    }
}

// === From implementations for common error types ===

impl From<serde_json::Error> for CcxtError {
    fn from(err: serde_json::Error) -> Self {
        CcxtError::JsonError {
            message: err.to_string(),
        }
    }
}

impl From<TransportError> for CcxtError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout { url } => CcxtError::RequestTimeout { url },
            TransportError::Cancelled { url } => CcxtError::RequestCancelled { url },
            TransportError::Connect { url, message } | TransportError::Other { url, message } => {
                CcxtError::NetworkError { url, message }
            },
        }
    }
}

/// Result 타입 alias
pub type CcxtResult<T> = Result<T, CcxtError>;

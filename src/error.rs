//! Error types for the PayPal gateway client.
//!
//! Every fallible operation in this crate returns [`Result`], built on the
//! single [`GatewayError`] enum. All variants implement the standard
//! [`std::error::Error`] trait via [`thiserror::Error`].
//!
//! # Error Categories
//!
//! - **Authentication** ([`GatewayError::Auth`]): token acquisition,
//!   revocation, account lookup, and customer-token failures, carrying the
//!   remote error code and description when PayPal supplies them
//! - **Orders** ([`GatewayError::Order`]): create/inspect/capture failures,
//!   carrying the first structured issue from the API's error-detail list
//! - **Input** ([`GatewayError::Validation`]): malformed payload input
//! - **Wire** ([`GatewayError::Transport`], [`GatewayError::Http`]): empty
//!   or non-JSON response bodies, and network-level reqwest failures
//!
//! # Examples
//!
//! ```
//! use paypal_orders::error::{GatewayError, Result};
//!
//! fn require_order(order_id: &str) -> Result<()> {
//!     if order_id.is_empty() {
//!         return Err(GatewayError::State("no order has been created".to_owned()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Result type alias for gateway operations.
///
/// This is a convenience type that uses [`GatewayError`] as the error type.
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Errors that can occur while talking to the PayPal REST API.
///
/// No failure is retried or suppressed internally: every error surfaces to
/// the caller immediately, and the caller decides whether to retry. The
/// idempotency request id makes a retried create or capture safe.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An authentication-related call was rejected by PayPal.
    ///
    /// Raised by token acquisition and revocation, account-info lookup, and
    /// customer-token generation. `code` and `description` carry the remote
    /// `error`/`error_description` (or `name`/`message`) pair when the
    /// response includes one.
    #[error("authentication failed: {code}: {description}")]
    Auth {
        /// Remote error code, e.g. `invalid_client`.
        code: String,
        /// Human-readable description from the remote response.
        description: String,
    },

    /// An order operation was rejected by PayPal.
    ///
    /// Raised by order creation, inspection, and capture. `issue` and
    /// `description` carry the first entry of the response's `details`
    /// list, e.g. `ORDER_NOT_APPROVED`.
    #[error("order operation failed: {issue}: {description}")]
    Order {
        /// Machine-readable issue code from the error-detail list.
        issue: String,
        /// Human-readable description of the issue.
        description: String,
    },

    /// Caller-supplied payload input was rejected locally.
    ///
    /// Raised when a payload string is not syntactically valid JSON, or a
    /// payload value does not serialize to a JSON object. Semantic order
    /// schema validation is delegated to the remote API.
    #[error("invalid payload: {0}")]
    Validation(String),

    /// The response body could not be interpreted.
    ///
    /// Raised when a call that expects a JSON body receives an empty or
    /// syntactically invalid one, or when a fixture transport runs out of
    /// queued replies. This is distinct from [`Http`](Self::Http): the
    /// round trip completed, but the body was unusable.
    #[error("transport error: {0}")]
    Transport(String),

    /// The HTTP round trip itself failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection refusal, DNS and TLS
    /// failures. Timeouts are finite by default (see
    /// [`HttpConfig`](crate::transport::HttpConfig)) and cancellation is
    /// delegated entirely to the transport.
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Client configuration was rejected.
    ///
    /// Raised by [`GatewayConfig::validate`](crate::config::GatewayConfig::validate)
    /// and the TOML constructors.
    #[error("configuration error: {0}")]
    Config(String),

    /// An operation was invoked in the wrong session state.
    ///
    /// Raised when an operation needs state a prior call has not produced,
    /// e.g. capturing before any order was created.
    #[error("invalid client state: {0}")]
    State(String),

    /// The operation is acknowledged but not implemented.
    ///
    /// Order update and authorization-only flows are incomplete upstream
    /// and are deliberately stubbed.
    #[error("{0} is not supported")]
    Unsupported(&'static str),
}

impl GatewayError {
    /// True if this error carries a remote rejection (as opposed to a local
    /// validation, state, or wire problem).
    #[must_use]
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::Order { .. })
    }
}

//! Transport abstraction layer.
//!
//! This module provides a sealed [`Transport`] trait that abstracts the HTTP
//! round trip away from the gateway client. Two implementations ship with
//! the crate:
//!
//! - [`HttpTransport`]: reqwest-backed transport used in production
//! - [`FixtureTransport`]: replays queued canned responses without touching
//!   the network — the injected-response mode used to evaluate captured
//!   API bodies offline and to test the full client
//!
//! Production and test paths share one code path: the client builds an
//! [`ApiRequest`], the transport returns a [`RawResponse`], and the typed
//! decode happens once at this boundary via [`RawResponse::json`].
//!
//! # Examples
//!
//! ```
//! use paypal_orders::transport::{ApiRequest, AuthScheme, FixtureTransport, Method, Transport};
//!
//! # async fn example() -> paypal_orders::error::Result<()> {
//! let transport = FixtureTransport::new();
//! transport.push(200, r#"{"status": "CREATED"}"#);
//!
//! let request = ApiRequest {
//!     base_url: "https://api-m.sandbox.paypal.com/",
//!     method: Method::Get,
//!     path: "v2/checkout/orders/5O190127TN364715T",
//!     auth: AuthScheme::Bearer("A21AA..."),
//!     headers: vec![],
//!     body: None,
//! };
//!
//! let response = transport.send(request).await?;
//! assert_eq!(response.status, 200);
//! # Ok(())
//! # }
//! ```

#[allow(
    redundant_imports,
    reason = "Future needed for RPITIT despite being in Edition 2024 prelude"
)]
use std::future::Future;

use serde_json::Value;

use crate::error::{GatewayError, Result};

pub mod config;
pub mod fixture;
pub mod http;
mod sealed;

pub use config::HttpConfig;
pub use fixture::{FixtureTransport, SeenRequest};
pub use http::HttpTransport;

/// HTTP method subset the PayPal order and identity endpoints use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    /// Resource fetch.
    Get,
    /// Resource creation / RPC-style action.
    Post,
    /// Partial resource update.
    Patch,
}

impl Method {
    /// Returns the method name as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Credential attachment for a single request.
///
/// Token acquisition uses [`Basic`](Self::Basic) with the merchant
/// credentials; every other call uses [`Bearer`](Self::Bearer) with the
/// session access token once one is held.
#[derive(Debug, Clone, Copy)]
pub enum AuthScheme<'a> {
    /// No credential attached.
    None,
    /// HTTP Basic with client id and secret.
    Basic {
        /// Merchant client id.
        username: &'a str,
        /// Merchant client secret.
        password: &'a str,
    },
    /// Bearer token.
    Bearer(&'a str),
}

/// Request body payload.
#[derive(Debug, Clone, Copy)]
pub enum Body<'a> {
    /// JSON-encoded body (`Content-Type: application/json`).
    Json(&'a Value),
    /// URL-encoded form body (`Content-Type: application/x-www-form-urlencoded`).
    Form(&'a [(&'a str, &'a str)]),
}

/// A single request to the remote API.
///
/// Paths are relative to the base URL and do not start with a slash, e.g.
/// `v2/checkout/orders`.
#[derive(Debug, Clone)]
pub struct ApiRequest<'a> {
    /// Environment base URL, with trailing slash.
    pub base_url: &'a str,
    /// HTTP method.
    pub method: Method,
    /// Relative API path, optionally with query string.
    pub path: &'a str,
    /// Credential attachment.
    pub auth: AuthScheme<'a>,
    /// Additional headers, e.g. the idempotency header.
    pub headers: Vec<(&'static str, String)>,
    /// Request body, if any.
    pub body: Option<Body<'a>>,
}

/// Raw response from a transport round trip.
///
/// The status is informational: remote rejections arrive as structured
/// JSON error payloads (with a non-2xx status) and are surfaced as typed
/// errors by the decode layer, not by the transport.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
}

impl RawResponse {
    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if the body is empty or not
    /// syntactically valid JSON. Callers never index into an undecoded
    /// body.
    pub fn json(&self) -> Result<Value> {
        self.json_opt()?.ok_or_else(|| {
            GatewayError::Transport(format!("empty response body (status {})", self.status))
        })
    }

    /// Decodes the body as JSON, treating an empty body as `None`.
    ///
    /// Token termination legitimately returns an empty body on success.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Transport`] if a non-empty body is not
    /// syntactically valid JSON.
    pub fn json_opt(&self) -> Result<Option<Value>> {
        let trimmed = self.body.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        serde_json::from_str(trimmed).map(Some).map_err(|e| {
            GatewayError::Transport(format!(
                "response body is not valid JSON (status {}): {e}",
                self.status
            ))
        })
    }
}

/// Transport abstraction.
///
/// This trait is sealed: only implementations within this crate exist, so
/// every path through the gateway carries the same header, credential, and
/// decoding behavior. Injection still works — the client is generic over
/// the transport — but via the two provided implementations.
pub trait Transport: sealed::private::Sealed + Send + Sync {
    /// Executes one request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an error if the round trip cannot be completed. Remote
    /// rejections with a readable body are NOT errors at this layer.
    fn send<'a>(
        &'a self,
        request: ApiRequest<'a>,
    ) -> impl Future<Output = Result<RawResponse>> + Send + 'a;

    /// Returns the transport name for logging.
    fn name(&self) -> &'static str;
}

//! PayPal REST gateway client.
//!
//! A thin async client for the PayPal checkout and identity APIs:
//! authenticate with OAuth2 client credentials, then create, inspect, and
//! capture orders. Every remote operation returns a uniform
//! [`Envelope`] — `{ success, data, message }` — decoupling callers from
//! the raw API response mapping, and every failure is a typed
//! [`GatewayError`].
//!
//! The client is deliberately thin: no retries, no caching, no background
//! token refresh, no webhook handling. A failed call surfaces immediately
//! and the caller decides what to do next; the idempotency request id sent
//! on create and capture makes a retried call safe.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paypal_orders::{Environment, GatewayClient};
//! use serde_json::json;
//!
//! # async fn example() -> paypal_orders::Result<()> {
//! let mut gateway = GatewayClient::new("client-id", "client-secret", Environment::Sandbox)?;
//!
//! // 1. Authenticate (HTTP Basic with the merchant credentials).
//! gateway.acquire_token().await?;
//!
//! // 2. Stage the order payload. Maps, records, and JSON strings all work.
//! gateway.set_payload(&json!({
//!     "purchase_units": [{
//!         "amount": { "currency_code": "USD", "value": "100.00" }
//!     }],
//!     "application_context": {
//!         "return_url": "https://example.com/return",
//!         "cancel_url": "https://example.com/cancel"
//!     }
//! }))?;
//! gateway.add_field("intent", "CAPTURE")?;
//!
//! // 3. Create the order and redirect the payer for approval.
//! let created = gateway.create_order().await?;
//! println!("order {} -> {}", gateway.order_id(), gateway.approval_link());
//!
//! // 4. After approval, capture the funds.
//! let captured = gateway.capture_order().await?;
//! assert!(captured.success);
//! # Ok(())
//! # }
//! ```
//!
//! # Offline Evaluation
//!
//! The transport is injectable. [`FixtureTransport`] replays pre-supplied
//! response bodies through the exact same decode path as a live call —
//! there is no test-mode flag on any operation:
//!
//! ```rust
//! use paypal_orders::{Environment, FixtureTransport, GatewayClient, GatewayConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> paypal_orders::Result<()> {
//! let config = GatewayConfig::new("client-id", "client-secret", Environment::Sandbox);
//! let mut gateway = GatewayClient::with_transport(config, FixtureTransport::new());
//!
//! gateway.transport().push(201, r#"{
//!     "id": "5O190127TN364715T",
//!     "status": "CREATED",
//!     "links": [
//!         {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/5O190127TN364715T",
//!          "rel": "self", "method": "GET"},
//!         {"href": "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T",
//!          "rel": "approve", "method": "GET"}
//!     ]
//! }"#);
//!
//! let created = gateway.create_order().await?;
//! assert!(created.success);
//! assert_eq!(gateway.order_id(), "5O190127TN364715T");
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`client`]: the gateway client — session state, payload staging, and
//!   the order lifecycle
//! - [`config`]: instance-scoped configuration (environment selection,
//!   order-details success policy, HTTP settings), TOML-deserializable
//! - [`transport`]: the sealed transport seam — reqwest-backed
//!   [`HttpTransport`] and canned-response [`FixtureTransport`]
//! - [`models`]: typed wire models; responses decode once at the transport
//!   boundary into success/failure unions
//! - [`error`]: the [`GatewayError`] enum and [`Result`] alias
//!
//! # Environments
//!
//! [`Environment::Sandbox`] and [`Environment::Live`] are physically
//! distinct endpoints; tokens and orders do not cross over. Both base URLs
//! are fixed by the API contract and not configurable.
//!
//! # Concurrency
//!
//! One client, one logical session: mutating operations take `&mut self`
//! and no internal locking exists. Wrap the client in external
//! synchronization if it must be shared, or construct one client per
//! flow — two clients share no state.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod transport;

pub use client::GatewayClient;
pub use config::{Environment, GatewayConfig, OrderDetailsPolicy};
pub use error::{GatewayError, Result};
pub use models::Envelope;
pub use transport::{FixtureTransport, HttpTransport};

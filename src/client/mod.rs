//! The gateway client.
//!
//! [`GatewayClient`] holds the merchant session (credentials, environment,
//! access token) and the single order slot (idempotency request id, order
//! id, approval link, pending payload), and sequences the remote calls of
//! the order lifecycle. Both concerns live on one object because they share
//! the same mutable session state.
//!
//! The client is generic over the [`Transport`]: production uses
//! [`HttpTransport`], tests and offline evaluation use
//! [`FixtureTransport`](crate::transport::FixtureTransport) — one code
//! path for both.
//!
//! Operations are synchronous in effect: each one blocks its caller until
//! the round trip completes, nothing runs in the background, and no call
//! is retried internally. The client is not meant to be shared across
//! tasks; mutating operations take `&mut self`, which makes concurrent
//! mutation unrepresentable without external synchronization.

mod auth;
mod orders;

use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    config::{Environment, GatewayConfig},
    error::{GatewayError, Result},
    transport::{ApiRequest, AuthScheme, Body, HttpTransport, Method, RawResponse, Transport},
};

/// Client for the PayPal REST checkout and identity APIs.
///
/// # Examples
///
/// ```no_run
/// use paypal_orders::{Environment, GatewayClient};
/// use serde_json::json;
///
/// # async fn example() -> paypal_orders::error::Result<()> {
/// let mut gateway = GatewayClient::new("client-id", "client-secret", Environment::Sandbox)?;
///
/// gateway.acquire_token().await?;
/// gateway.set_payload(&json!({
///     "intent": "CAPTURE",
///     "purchase_units": [{"amount": {"currency_code": "USD", "value": "100.00"}}]
/// }))?;
///
/// let created = gateway.create_order().await?;
/// assert!(created.success);
/// println!("redirect payer to {}", gateway.approval_link());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GatewayClient<T: Transport = HttpTransport> {
    transport: T,
    config: GatewayConfig,
    access_token: String,
    token_type: String,
    client_token: String,
    request_id: Uuid,
    order_id: String,
    approval_link: String,
    payload: Map<String, Value>,
}

impl GatewayClient<HttpTransport> {
    /// Creates a client from credentials and an environment, with default
    /// transport settings.
    ///
    /// Credentials are trimmed before being stored. A fresh idempotency
    /// request id is generated.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(client_id: &str, client_secret: &str, environment: Environment) -> Result<Self> {
        Self::from_config(GatewayConfig::new(client_id, client_secret, environment))
    }

    /// Creates a client from a full configuration.
    ///
    /// Equivalent capability to [`new`](Self::new), for callers that keep
    /// gateway settings in a structured configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP
    /// transport cannot be built.
    pub fn from_config(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::with_config(&config.http)?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: Transport> GatewayClient<T> {
    /// Creates a client over an explicit transport.
    ///
    /// This is the injection seam: hand in a
    /// [`FixtureTransport`](crate::transport::FixtureTransport) to evaluate
    /// pre-supplied response bodies without network access.
    #[must_use]
    pub fn with_transport(mut config: GatewayConfig, transport: T) -> Self {
        config.client_id = config.client_id.trim().to_owned();
        config.client_secret = config.client_secret.trim().to_owned();
        Self {
            transport,
            config,
            access_token: String::new(),
            token_type: String::new(),
            client_token: String::new(),
            request_id: Uuid::new_v4(),
            order_id: String::new(),
            approval_link: String::new(),
            payload: Map::new(),
        }
    }

    /// True iff both client id and client secret are non-empty after
    /// trimming.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.config.client_id.is_empty() && !self.config.client_secret.is_empty()
    }

    /// Returns the active configuration.
    #[must_use]
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Returns the selected environment.
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.config.environment
    }

    /// Returns the current access token, empty if unauthenticated.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Returns the current token type, empty if unauthenticated.
    #[must_use]
    pub fn token_type(&self) -> &str {
        &self.token_type
    }

    /// Returns the customer-scoped client token, empty until generated.
    #[must_use]
    pub fn client_token(&self) -> &str {
        &self.client_token
    }

    /// Returns the idempotency request id sent on create and capture
    /// calls.
    #[must_use]
    pub fn request_id(&self) -> Uuid {
        self.request_id
    }

    /// Replaces the idempotency request id with a fresh UUIDv4 and returns
    /// it.
    ///
    /// [`clear`](Self::clear) deliberately does NOT do this: a retried
    /// create after `clear` still deduplicates against the previous order.
    /// Call this when the next create must be a genuinely new order.
    pub fn rotate_request_id(&mut self) -> Uuid {
        self.request_id = Uuid::new_v4();
        self.request_id
    }

    /// Returns the created order id, empty until an order is created.
    #[must_use]
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// Replaces the pending payload from any serializable value.
    ///
    /// Accepts maps and structured records alike; the value must serialize
    /// to a JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the value does not
    /// serialize to a JSON object.
    pub fn set_payload<P: Serialize + ?Sized>(&mut self, payload: &P) -> Result<()> {
        let value = serde_json::to_value(payload).map_err(|e| {
            GatewayError::Validation(format!("payload does not serialize to JSON: {e}"))
        })?;
        self.store_payload(value)
    }

    /// Replaces the pending payload from a JSON-encoded string.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the string is not valid
    /// JSON or does not encode an object.
    pub fn set_payload_json(&mut self, raw: &str) -> Result<()> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            GatewayError::Validation(format!("the supplied string is not valid JSON: {e}"))
        })?;
        self.store_payload(value)
    }

    fn store_payload(&mut self, value: Value) -> Result<()> {
        match value {
            Value::Object(map) => {
                self.payload = map;
                Ok(())
            }
            other => Err(GatewayError::Validation(format!(
                "payload must be a JSON object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Inserts or replaces a single payload field.
    ///
    /// No semantic validation is applied; order schema correctness is the
    /// remote API's concern and surfaces through its error responses.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Validation`] if the value does not
    /// serialize to JSON.
    pub fn add_field<V: Serialize>(&mut self, name: &str, value: V) -> Result<()> {
        let value = serde_json::to_value(value).map_err(|e| {
            GatewayError::Validation(format!("field '{name}' does not serialize to JSON: {e}"))
        })?;
        self.payload.insert(name.to_owned(), value);
        Ok(())
    }

    /// Returns the pending payload.
    #[must_use]
    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    /// Resets payload, order id, and approval link.
    ///
    /// Credentials, tokens, and the idempotency request id are untouched
    /// (see [`rotate_request_id`](Self::rotate_request_id)).
    pub fn clear(&mut self) {
        self.payload = Map::new();
        self.order_id.clear();
        self.approval_link.clear();
    }

    /// Bearer credential for the current session.
    ///
    /// Attached only once a token is held and its type is `bearer`
    /// (case-insensitive); otherwise the call goes out unauthenticated and
    /// the remote rejection surfaces as a typed error.
    pub(crate) fn session_auth(&self) -> AuthScheme<'_> {
        if !self.access_token.is_empty() && self.token_type.eq_ignore_ascii_case("bearer") {
            AuthScheme::Bearer(&self.access_token)
        } else {
            AuthScheme::None
        }
    }

    /// Builds and sends one request against the session environment.
    pub(crate) async fn dispatch(
        &self,
        method: Method,
        path: &str,
        auth: AuthScheme<'_>,
        headers: Vec<(&'static str, String)>,
        body: Option<Body<'_>>,
    ) -> Result<RawResponse> {
        let request = ApiRequest {
            base_url: self.config.environment.base_url(),
            method,
            path,
            auth,
            headers,
            body,
        };
        self.transport.send(request).await
    }
}

/// Decodes an already-parsed JSON value into a typed reply.
pub(crate) fn decode<R: DeserializeOwned>(value: &Value) -> Result<R> {
    serde_json::from_value(value.clone())
        .map_err(|e| GatewayError::Transport(format!("unexpected response shape: {e}")))
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

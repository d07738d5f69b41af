//! Client configuration types.
//!
//! Configuration is instance-scoped: two clients built from different
//! configurations share nothing, and there is no process-wide state. All
//! structures are TOML-deserializable so deployments can keep gateway
//! settings in a config file.

use serde::Deserialize;

use crate::{
    error::{GatewayError, Result},
    transport::HttpConfig,
};

/// PayPal environment selection.
///
/// Sandbox and Live are physically distinct endpoints; an access token
/// acquired in one is useless in the other.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Production endpoint, real financial transactions.
    #[default]
    Live,
    /// Sandbox endpoint for integration testing.
    Sandbox,
}

impl Environment {
    /// Live system base URL.
    pub const LIVE_URL: &'static str = "https://api-m.paypal.com/";
    /// Sandbox system base URL.
    pub const SANDBOX_URL: &'static str = "https://api-m.sandbox.paypal.com/";

    /// Returns the base URL for this environment, with trailing slash.
    #[must_use]
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Live => Self::LIVE_URL,
            Self::Sandbox => Self::SANDBOX_URL,
        }
    }

    /// True for the sandbox environment.
    #[must_use]
    pub fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }
}

/// Success gate for [`show_order_details`](crate::GatewayClient::show_order_details).
///
/// The upstream behavior treats an order fetch as successful only when the
/// order status is `CREATED`, which misreports approved or completed
/// orders as failures. Both behaviors are available; the narrow one stays
/// the default for compatibility.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderDetailsPolicy {
    /// Success only when the fetched order status is `CREATED`.
    #[default]
    StrictCreated,
    /// Success whenever the fetch itself succeeds; the status is surfaced
    /// through the envelope data rather than gating success.
    FetchSuccess,
}

/// Gateway client configuration.
///
/// Built directly, or deserialized from TOML via [`GatewayConfig::from_toml`]:
///
/// ```
/// use paypal_orders::config::{Environment, GatewayConfig};
///
/// let config = GatewayConfig::from_toml(r#"
///     client_id = "my-client-id"
///     client_secret = "my-client-secret"
///     environment = "sandbox"
///
///     [http]
///     timeout_secs = 20
/// "#)?;
/// assert_eq!(config.environment, Environment::Sandbox);
/// # Ok::<(), paypal_orders::error::GatewayError>(())
/// ```
#[derive(Clone, Deserialize)]
pub struct GatewayConfig {
    /// Merchant client id.
    pub client_id: String,

    /// Merchant client secret.
    pub client_secret: String,

    /// Environment selection (default: live).
    #[serde(default)]
    pub environment: Environment,

    /// Success gate for order-detail fetches (default: strict).
    #[serde(default)]
    pub order_details: OrderDetailsPolicy,

    /// HTTP transport settings.
    #[serde(default)]
    pub http: HttpConfig,
}

impl GatewayConfig {
    /// Creates a configuration from credentials and an environment, with
    /// default transport settings.
    #[must_use]
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        environment: Environment,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            environment,
            order_details: OrderDetailsPolicy::default(),
            http: HttpConfig::default(),
        }
    }

    /// Parses a configuration from a TOML string and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if parsing or validation fails.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| GatewayError::Config(format!("invalid TOML config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    ///
    /// Credentials may be empty here; the credential check is
    /// [`is_configured`](crate::GatewayClient::is_configured). Transport
    /// bounds must hold regardless.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Config`] if the HTTP settings are out of
    /// bounds.
    pub fn validate(&self) -> Result<()> {
        self.http.validate()
    }
}

// Manual Debug: the client secret must not leak into logs.
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("environment", &self.environment)
            .field("order_details", &self.order_details)
            .field("http", &self.http)
            .finish()
    }
}

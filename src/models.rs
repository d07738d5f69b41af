//! Wire models for the PayPal REST API.
//!
//! Responses are decoded once, at the transport boundary, into tagged
//! success/failure unions ([`TokenReply`], [`OrderReply`], [`AccountReply`]).
//! Operations then match on the variant instead of probing for field
//! presence. Failure variants are fully defaulted: any well-formed JSON
//! object that is not a success payload degrades to a typed remote error
//! with fallback code and description, never a missing-field fault.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::GatewayError;

/// Uniform result envelope returned by every remote operation.
///
/// Decouples callers from the raw API response mapping: `success` reports
/// the operation outcome, `data` carries the full remote payload where the
/// operation has one, and `message` is a short human-readable summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Operation outcome.
    pub success: bool,
    /// Full remote payload, when the operation surfaces one.
    pub data: Option<Value>,
    /// Short human-readable summary.
    pub message: Option<String>,
}

impl Envelope {
    /// Builds a success envelope.
    #[must_use]
    pub fn ok(data: Option<Value>, message: impl Into<String>) -> Self {
        Self { success: true, data, message: Some(message.into()) }
    }
}

/// Order lifecycle status.
///
/// Statuses outside the documented set decode as [`Other`](Self::Other)
/// rather than failing the whole response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order created, awaiting payer approval.
    Created,
    /// Order saved for later processing.
    Saved,
    /// Payer approved the order.
    Approved,
    /// Order voided.
    Voided,
    /// Funds captured.
    Completed,
    /// Additional payer action required.
    PayerActionRequired,
    /// Unrecognized status.
    #[serde(other)]
    Other,
}

impl OrderStatus {
    /// Returns the status as sent on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "CREATED",
            Self::Saved => "SAVED",
            Self::Approved => "APPROVED",
            Self::Voided => "VOIDED",
            Self::Completed => "COMPLETED",
            Self::PayerActionRequired => "PAYER_ACTION_REQUIRED",
            Self::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HATEOAS link entry on an order resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkDescription {
    /// Link target.
    pub href: String,
    /// Link relation, e.g. `self`, `approve`, `capture`.
    pub rel: String,
    /// HTTP method for the link, when given.
    #[serde(default)]
    pub method: Option<String>,
}

/// Currency amount, string-encoded on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// ISO 4217 currency code.
    pub currency_code: String,
    /// Decimal amount.
    pub value: Decimal,
}

/// Purchase unit subset consumed by this client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseUnit {
    /// Merchant reference id.
    #[serde(default)]
    pub reference_id: Option<String>,
    /// Unit amount.
    #[serde(default)]
    pub amount: Option<Money>,
    /// Unit description.
    #[serde(default)]
    pub description: Option<String>,
}

/// An order resource as returned by the checkout endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResource {
    /// Order id.
    pub id: String,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// HATEOAS links.
    #[serde(default)]
    pub links: Vec<LinkDescription>,
    /// Purchase units.
    #[serde(default)]
    pub purchase_units: Vec<PurchaseUnit>,
    /// Creation timestamp.
    #[serde(default)]
    pub create_time: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default)]
    pub update_time: Option<DateTime<Utc>>,
}

impl OrderResource {
    /// Returns the payer approval link.
    ///
    /// Found by searching for the `approve` relation; link ordering is not
    /// contractually guaranteed by the API.
    #[must_use]
    pub fn approval_link(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|link| link.rel == "approve")
            .map(|link| link.href.as_str())
    }
}

/// One entry of an order error's `details` list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderIssue {
    /// Machine-readable issue code.
    #[serde(default)]
    pub issue: String,
    /// Human-readable description.
    #[serde(default)]
    pub description: String,
}

/// Structured error payload from the order endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiFailure {
    /// Error name, e.g. `UNPROCESSABLE_ENTITY`.
    #[serde(default)]
    pub name: String,
    /// Top-level error message.
    #[serde(default)]
    pub message: String,
    /// Error-detail list.
    #[serde(default)]
    pub details: Vec<OrderIssue>,
    /// PayPal debug correlation id.
    #[serde(default)]
    pub debug_id: Option<String>,
}

impl ApiFailure {
    /// Converts to [`GatewayError::Order`] carrying the first reported
    /// issue, falling back to the top-level name and message.
    #[must_use]
    pub fn into_order_error(self) -> GatewayError {
        if let Some(first) = self.details.into_iter().next() {
            return GatewayError::Order { issue: first.issue, description: first.description };
        }
        let issue = if self.name.is_empty() { "UNKNOWN_ERROR".to_owned() } else { self.name };
        let description = if self.message.is_empty() {
            "no error detail provided".to_owned()
        } else {
            self.message
        };
        GatewayError::Order { issue, description }
    }
}

/// Order endpoint reply: a resource, or a structured failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OrderReply {
    /// Successfully decoded order resource.
    Order(OrderResource),
    /// Structured error payload (any non-order object).
    Failure(ApiFailure),
}

/// Successful OAuth2 client-credentials grant.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenGrant {
    /// Access token to attach as bearer credential.
    pub access_token: String,
    /// Token type, normally `Bearer`.
    pub token_type: String,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Granted scopes.
    #[serde(default)]
    pub scope: Option<String>,
    /// Application id.
    #[serde(default)]
    pub app_id: Option<String>,
}

/// OAuth2 error payload.
#[derive(Debug, Clone, Deserialize)]
pub struct OAuthFailure {
    /// Error code, e.g. `invalid_client`.
    #[serde(default)]
    pub error: String,
    /// Error description.
    #[serde(default)]
    pub error_description: String,
}

impl OAuthFailure {
    /// Converts to [`GatewayError::Auth`] with fallback code/description.
    #[must_use]
    pub fn into_auth_error(self) -> GatewayError {
        let code = if self.error.is_empty() { "UNKNOWN".to_owned() } else { self.error };
        let description = if self.error_description.is_empty() {
            "no error description provided".to_owned()
        } else {
            self.error_description
        };
        GatewayError::Auth { code, description }
    }

    /// True when the payload actually carries an error indication.
    #[must_use]
    pub fn is_error(&self) -> bool {
        !self.error.is_empty() || !self.error_description.is_empty()
    }
}

/// Token endpoint reply: a grant, or an OAuth2 failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenReply {
    /// Token issued.
    Grant(TokenGrant),
    /// OAuth2 error (any non-grant object).
    Failure(OAuthFailure),
}

/// Merchant account payload from the identity endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountInfo {
    /// Account identifier URI.
    pub user_id: String,
    /// Remaining payload fields, schema-dependent.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Identity endpoint error payload.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityFailure {
    /// Error name.
    #[serde(default)]
    pub name: String,
    /// Error message.
    #[serde(default)]
    pub message: String,
}

impl IdentityFailure {
    /// Converts to [`GatewayError::Auth`] with fallback code/description.
    #[must_use]
    pub fn into_auth_error(self) -> GatewayError {
        let code = if self.name.is_empty() { "UNKNOWN".to_owned() } else { self.name };
        let description = if self.message.is_empty() {
            "response carried no user identifier".to_owned()
        } else {
            self.message
        };
        GatewayError::Auth { code, description }
    }
}

/// Identity endpoint reply: account info, or a failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AccountReply {
    /// Account payload with a user identifier.
    Info(AccountInfo),
    /// Error payload (any object without `user_id`).
    Failure(IdentityFailure),
}

/// Client-side token grant from the identity endpoint.
///
/// Either field may be present; at least one must be for the grant to be
/// usable, which the client checks explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct CustomerTokenGrant {
    /// Client token for client-side SDK initialization.
    #[serde(default)]
    pub client_token: Option<String>,
    /// Identity token.
    #[serde(default)]
    pub id_token: Option<String>,
    /// Lifetime in seconds.
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl CustomerTokenGrant {
    /// Returns the usable token string, preferring the client token.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.client_token.as_deref().or(self.id_token.as_deref())
    }
}

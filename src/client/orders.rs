//! Order lifecycle operations.
//!
//! A client carries a single order slot: `create_order` fills it,
//! `show_order_details` and `capture_order` read it, and `clear` empties
//! it. Create and capture both send the session's idempotency request id,
//! so a retried call cannot produce a duplicate order or double capture.

use serde_json::Value;
use tracing::{info, instrument};

use super::{GatewayClient, decode};
use crate::{
    config::OrderDetailsPolicy,
    error::{GatewayError, Result},
    models::{Envelope, OrderReply, OrderStatus},
    transport::{Body, Method, Transport},
};

const ORDERS_PATH: &str = "v2/checkout/orders";
const PREFER_HEADER: &str = "Prefer";
const PREFER_REPRESENTATION: &str = "return=representation";
const REQUEST_ID_HEADER: &str = "PayPal-Request-Id";

fn order_path(order_id: &str) -> String {
    format!("{ORDERS_PATH}/{order_id}")
}

fn capture_path(order_id: &str) -> String {
    format!("{ORDERS_PATH}/{order_id}/capture")
}

fn unexpected_status(operation: &str, status: OrderStatus) -> GatewayError {
    GatewayError::Order {
        issue: "UNEXPECTED_ORDER_STATUS".to_owned(),
        description: format!("{operation} returned status {status}"),
    }
}

impl<T: Transport> GatewayClient<T> {
    fn idempotent_headers(&self) -> Vec<(&'static str, String)> {
        vec![
            (PREFER_HEADER, PREFER_REPRESENTATION.to_owned()),
            (REQUEST_ID_HEADER, self.request_id.to_string()),
        ]
    }

    /// Creates an order from the pending payload.
    ///
    /// Sends the payload to the order-creation endpoint with the session's
    /// idempotency request id. A reply with status `CREATED` or `APPROVED`
    /// fills the order slot: the order id and the payer approval link
    /// (searched by its `approve` relation) become readable through
    /// [`order_id`](Self::order_id) and
    /// [`approval_link`](Self::approval_link).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Order`] carrying the first reported issue
    /// and description on rejection, or on any other order status.
    #[instrument(skip(self), fields(request_id = %self.request_id))]
    pub async fn create_order(&mut self) -> Result<Envelope> {
        let payload = Value::Object(self.payload.clone());
        let headers = self.idempotent_headers();
        let raw = self
            .dispatch(
                Method::Post,
                ORDERS_PATH,
                self.session_auth(),
                headers,
                Some(Body::Json(&payload)),
            )
            .await?;

        let value = raw.json()?;
        match decode::<OrderReply>(&value)? {
            OrderReply::Order(order)
                if matches!(order.status, OrderStatus::Created | OrderStatus::Approved) =>
            {
                self.approval_link = order.approval_link().unwrap_or_default().to_owned();
                self.order_id = order.id;
                info!(order_id = %self.order_id, "order created");
                Ok(Envelope::ok(Some(value), "order created"))
            }
            OrderReply::Order(order) => Err(unexpected_status("order creation", order.status)),
            OrderReply::Failure(failure) => Err(failure.into_order_error()),
        }
    }

    /// Returns the payer approval link captured at creation time, empty if
    /// no order has been created.
    #[must_use]
    pub fn approval_link(&self) -> &str {
        &self.approval_link
    }

    /// Fetches the created order.
    ///
    /// The success gate is configurable
    /// ([`OrderDetailsPolicy`](crate::config::OrderDetailsPolicy)): the
    /// default reproduces the historical behavior of succeeding only on
    /// status `CREATED`; `FetchSuccess` succeeds on any decodable order
    /// and surfaces the status through the envelope data.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::State`] before any order was created, and
    /// [`GatewayError::Order`] on remote rejection or (under the strict
    /// policy) a non-`CREATED` status.
    #[instrument(skip(self), fields(order_id = %self.order_id))]
    pub async fn show_order_details(&self) -> Result<Envelope> {
        if self.order_id.is_empty() {
            return Err(GatewayError::State("no order has been created".to_owned()));
        }

        let path = order_path(&self.order_id);
        let raw = self
            .dispatch(Method::Get, &path, self.session_auth(), vec![], None)
            .await?;

        let value = raw.json()?;
        match decode::<OrderReply>(&value)? {
            OrderReply::Order(order) => match self.config.order_details {
                OrderDetailsPolicy::FetchSuccess => {
                    Ok(Envelope::ok(Some(value), "order details retrieved"))
                }
                OrderDetailsPolicy::StrictCreated if order.status == OrderStatus::Created => {
                    Ok(Envelope::ok(Some(value), "order details retrieved"))
                }
                OrderDetailsPolicy::StrictCreated => {
                    Err(unexpected_status("order details fetch", order.status))
                }
            },
            OrderReply::Failure(failure) => Err(failure.into_order_error()),
        }
    }

    /// Captures payment for the approved order.
    ///
    /// Sends the capture request with the same idempotency request id as
    /// creation. Success means the reply status is `COMPLETED`.
    ///
    /// To evaluate a pre-supplied capture response body without a network
    /// call, construct the client over a
    /// [`FixtureTransport`](crate::transport::FixtureTransport) — the
    /// decode and gating logic is identical to the live path.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::State`] before any order was created,
    /// [`GatewayError::Order`] with the first reported issue on rejection
    /// or on a non-`COMPLETED` status.
    #[instrument(skip(self), fields(order_id = %self.order_id, request_id = %self.request_id))]
    pub async fn capture_order(&mut self) -> Result<Envelope> {
        if self.order_id.is_empty() {
            return Err(GatewayError::State("no order has been created".to_owned()));
        }

        let path = capture_path(&self.order_id);
        let headers = self.idempotent_headers();
        let raw = self
            .dispatch(Method::Post, &path, self.session_auth(), headers, None)
            .await?;

        let value = raw.json()?;
        match decode::<OrderReply>(&value)? {
            OrderReply::Order(order) if order.status == OrderStatus::Completed => {
                info!(order_id = %order.id, "payment captured");
                Ok(Envelope::ok(Some(value), "payment captured"))
            }
            OrderReply::Order(order) => Err(unexpected_status("payment capture", order.status)),
            OrderReply::Failure(failure) => Err(failure.into_order_error()),
        }
    }

    /// Partially updates the created order.
    ///
    /// # Errors
    ///
    /// Always returns [`GatewayError::Unsupported`]; the upstream update
    /// flow is incomplete and deliberately stubbed.
    pub async fn update_order(&mut self) -> Result<Envelope> {
        Err(GatewayError::Unsupported("order update"))
    }

    /// Authorizes (without capturing) payment for the approved order.
    ///
    /// # Errors
    ///
    /// Always returns [`GatewayError::Unsupported`]; the upstream
    /// authorization-only flow is incomplete and deliberately stubbed.
    pub async fn authorize_order(&mut self) -> Result<Envelope> {
        Err(GatewayError::Unsupported("order authorization"))
    }
}

//! Offline capture evaluation example.
//!
//! Feeds a captured capture-endpoint response body through the client via
//! a `FixtureTransport` — the same decode and gating path a live call
//! takes, with no network access and no test-mode flag.
//!
//! ```bash
//! cargo run --example offline_capture
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use paypal_orders::{Environment, FixtureTransport, GatewayClient, GatewayConfig};

const CREATED_REPLY: &str = r#"{
    "id": "97Y953627T008845P",
    "status": "CREATED",
    "links": [
        {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/97Y953627T008845P",
         "rel": "self", "method": "GET"},
        {"href": "https://www.sandbox.paypal.com/checkoutnow?token=97Y953627T008845P",
         "rel": "approve", "method": "GET"}
    ]
}"#;

const CAPTURE_REPLY: &str = r#"{
    "id": "97Y953627T008845P",
    "intent": "CAPTURE",
    "status": "COMPLETED",
    "purchase_units": [
        {
            "reference_id": "default",
            "amount": { "currency_code": "USD", "value": "100.00" }
        }
    ],
    "create_time": "2022-05-16T20:45:50Z",
    "update_time": "2022-05-16T21:09:31Z"
}"#;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("paypal-orders: Offline Capture Example\n");

    let config = GatewayConfig::new("client-id", "client-secret", Environment::Sandbox);
    let mut gateway = GatewayClient::with_transport(config, FixtureTransport::new());

    // Queue the canned replies the flow will consume, in order.
    gateway.transport().push(201, CREATED_REPLY);
    gateway.transport().push(201, CAPTURE_REPLY);

    let created = gateway.create_order().await?;
    println!("create:  success={} order={}", created.success, gateway.order_id());

    let captured = gateway.capture_order().await?;
    let data = captured.data.expect("capture envelope carries the full payload");
    println!("capture: success={} status={}", captured.success, data["status"]);
    println!("amount:  {} {}",
        data["purchase_units"][0]["amount"]["value"],
        data["purchase_units"][0]["amount"]["currency_code"]
    );

    // Every request the client built is on record.
    for request in gateway.transport().requests() {
        println!("sent:    {} {} (auth: {})", request.method, request.path, request.auth);
    }

    Ok(())
}

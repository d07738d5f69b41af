//! Sandbox checkout example.
//!
//! Acquires an access token, creates an order, and prints the payer
//! approval link.
//!
//! # Running this example
//!
//! Set your sandbox merchant credentials and run:
//! ```bash
//! export PAYPAL_CLIENT_ID=<client id>
//! export PAYPAL_CLIENT_SECRET=<client secret>
//! cargo run --example checkout
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    reason = "examples are allowed to use println"
)]

use std::env;

use paypal_orders::{Environment, GatewayClient};
use serde_json::json;

fn load_credentials() -> Result<(String, String), Box<dyn std::error::Error>> {
    let client_id = env::var("PAYPAL_CLIENT_ID")
        .map_err(|_| "PAYPAL_CLIENT_ID environment variable not set")?;
    let client_secret = env::var("PAYPAL_CLIENT_SECRET")
        .map_err(|_| "PAYPAL_CLIENT_SECRET environment variable not set")?;
    Ok((client_id, client_secret))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("paypal-orders: Sandbox Checkout Example\n");

    // Step 1: Build the client against the sandbox environment.
    let (client_id, client_secret) = load_credentials()?;
    let mut gateway = GatewayClient::new(&client_id, &client_secret, Environment::Sandbox)?;
    println!("1. Client configured: {}", gateway.is_configured());

    // Step 2: Authenticate with the merchant credentials.
    let token = gateway.acquire_token().await?;
    println!("2. {}", token.message.unwrap_or_default());

    // Step 3: Stage the order payload.
    gateway.set_payload(&json!({
        "purchase_units": [
            {
                "items": [
                    {
                        "name": "T-Shirt",
                        "description": "Green XL",
                        "quantity": "1",
                        "unit_amount": { "currency_code": "USD", "value": "100.00" }
                    }
                ],
                "amount": {
                    "currency_code": "USD",
                    "value": "100.00",
                    "breakdown": {
                        "item_total": { "currency_code": "USD", "value": "100.00" }
                    }
                }
            }
        ],
        "application_context": {
            "return_url": "https://example.com/return",
            "cancel_url": "https://example.com/cancel"
        }
    }))?;
    gateway.add_field("intent", "CAPTURE")?;
    println!("3. Payload staged ({} top-level fields)", gateway.payload().len());

    // Step 4: Create the order.
    let created = gateway.create_order().await?;
    println!("4. {}", created.message.unwrap_or_default());
    println!("   order id:      {}", gateway.order_id());
    println!("   request id:    {}", gateway.request_id());
    println!("   approval link: {}", gateway.approval_link());

    // The payer must open the approval link before capture can succeed.
    // Once approved, `gateway.capture_order().await?` collects the funds.
    println!("\nRedirect the payer to the approval link, then capture.");

    Ok(())
}

//! Integration tests for the gateway client.
//!
//! Every test drives the full client through a `FixtureTransport`, so the
//! request building, credential attachment, and response decoding paths
//! are the same ones a live client uses. The order payload and the capture
//! response are captured fixtures from real sandbox traffic.

use paypal_orders::{
    Environment, FixtureTransport, GatewayClient, GatewayConfig, GatewayError,
};
use serde::Serialize;
use serde_json::json;

/// Order payload staged before creation.
const ORDER_PAYLOAD: &str = r#"{
    "purchase_units": [
        {
            "items": [
                {
                    "name": "T-Shirt",
                    "description": "Green XL",
                    "quantity": "1",
                    "unit_amount": {
                        "currency_code": "USD",
                        "value": "100.00"
                    }
                }
            ],
            "amount": {
                "currency_code": "USD",
                "value": "100.00",
                "breakdown": {
                    "item_total": {
                        "currency_code": "USD",
                        "value": "100.00"
                    }
                }
            }
        }
    ],
    "application_context": {
        "return_url": "https://example.com/return",
        "cancel_url": "https://example.com/cancel"
    }
}"#;

/// Captured capture-endpoint response for order 97Y953627T008845P.
const CAPTURE_FIXTURE: &str = r#"{
    "id": "97Y953627T008845P",
    "intent": "CAPTURE",
    "status": "COMPLETED",
    "purchase_units": [
        {
            "reference_id": "default",
            "amount": {
                "currency_code": "USD",
                "value": "100.00",
                "breakdown": {
                    "item_total": {
                        "currency_code": "USD",
                        "value": "100.00"
                    },
                    "shipping": {
                        "currency_code": "USD",
                        "value": "0.00"
                    }
                }
            },
            "payee": {
                "email_address": "john_merchant@example.com",
                "merchant_id": "C7CYMKZDG8D6E"
            },
            "description": "T-Shirt",
            "payments": {
                "captures": [
                    {
                        "id": "31H931502U998360B",
                        "status": "COMPLETED",
                        "amount": {
                            "currency_code": "USD",
                            "value": "100.00"
                        },
                        "final_capture": true,
                        "seller_receivable_breakdown": {
                            "gross_amount": {
                                "currency_code": "USD",
                                "value": "100.00"
                            },
                            "paypal_fee": {
                                "currency_code": "USD",
                                "value": "3.98"
                            },
                            "net_amount": {
                                "currency_code": "USD",
                                "value": "96.02"
                            }
                        },
                        "create_time": "2022-05-16T21:09:31Z",
                        "update_time": "2022-05-16T21:09:31Z"
                    }
                ]
            }
        }
    ],
    "payer": {
        "name": {
            "given_name": "John",
            "surname": "Doe"
        },
        "email_address": "sb-bej4m7008058@personal.example.com",
        "payer_id": "87HA637EEKCEW"
    },
    "create_time": "2022-05-16T20:45:50Z",
    "update_time": "2022-05-16T21:09:31Z",
    "links": [
        {
            "href": "https://api.sandbox.paypal.com/v2/checkout/orders/97Y953627T008845P",
            "rel": "self",
            "method": "GET"
        }
    ]
}"#;

fn fixture_client() -> GatewayClient<FixtureTransport> {
    let config = GatewayConfig::new("client-id", "client-secret", Environment::Sandbox);
    GatewayClient::with_transport(config, FixtureTransport::new())
}

fn token_reply() -> String {
    json!({"access_token": "A21AAFsandbox", "token_type": "Bearer", "expires_in": 32400})
        .to_string()
}

fn created_order_reply(order_id: &str) -> String {
    json!({
        "id": order_id,
        "status": "CREATED",
        "links": [
            {"href": format!("https://api-m.sandbox.paypal.com/v2/checkout/orders/{order_id}"), "rel": "self", "method": "GET"},
            {"href": format!("https://www.sandbox.paypal.com/checkoutnow?token={order_id}"), "rel": "approve", "method": "GET"}
        ]
    })
    .to_string()
}

#[test]
fn is_configured_requires_both_credentials_after_trimming() {
    let cases = [
        ("client-id", "client-secret", true),
        ("  client-id  ", "  client-secret  ", true),
        ("", "client-secret", false),
        ("client-id", "", false),
        ("   ", "client-secret", false),
        ("client-id", "\t\n", false),
        ("", "", false),
    ];

    for (id, secret, expected) in cases {
        let config = GatewayConfig::new(id, secret, Environment::Sandbox);
        let gateway = GatewayClient::with_transport(config, FixtureTransport::new());
        assert_eq!(gateway.is_configured(), expected, "id={id:?} secret={secret:?}");
    }
}

#[test]
fn payload_is_equal_across_all_three_input_forms() {
    #[derive(Serialize)]
    struct Amount {
        currency_code: &'static str,
        value: &'static str,
    }

    #[derive(Serialize)]
    struct PurchaseUnit {
        amount: Amount,
    }

    #[derive(Serialize)]
    struct OrderRequest {
        intent: &'static str,
        purchase_units: Vec<PurchaseUnit>,
    }

    let record = OrderRequest {
        intent: "CAPTURE",
        purchase_units: vec![PurchaseUnit {
            amount: Amount { currency_code: "USD", value: "100.00" },
        }],
    };
    let mapping = json!({
        "intent": "CAPTURE",
        "purchase_units": [{"amount": {"currency_code": "USD", "value": "100.00"}}]
    });
    let encoded = mapping.to_string();

    let mut from_record = fixture_client();
    from_record.set_payload(&record).unwrap();

    let mut from_mapping = fixture_client();
    from_mapping.set_payload(&mapping).unwrap();

    let mut from_string = fixture_client();
    from_string.set_payload_json(&encoded).unwrap();

    assert_eq!(from_record.payload(), from_mapping.payload());
    assert_eq!(from_mapping.payload(), from_string.payload());
}

#[test]
fn set_payload_rejects_invalid_json_string() {
    let mut gateway = fixture_client();
    let err = gateway.set_payload_json("{\"unterminated\": ").unwrap_err();
    assert!(matches!(err, GatewayError::Validation(_)));
    assert!(gateway.payload().is_empty());
}

#[test]
fn add_field_sets_intent_without_disturbing_other_keys() {
    let mut gateway = fixture_client();
    gateway.set_payload_json(ORDER_PAYLOAD).unwrap();
    gateway.add_field("intent", "CAPTURE").unwrap();

    let payload = gateway.payload();
    assert_eq!(payload["intent"], "CAPTURE");
    assert!(payload.contains_key("purchase_units"));
    assert!(payload.contains_key("application_context"));
    assert_eq!(
        payload["purchase_units"][0]["amount"]["value"],
        "100.00"
    );
}

#[tokio::test]
async fn acquire_then_revoke_leaves_token_state_empty() {
    let mut gateway = fixture_client();
    gateway.transport().push(200, token_reply());
    gateway.acquire_token().await.unwrap();
    assert_eq!(gateway.access_token(), "A21AAFsandbox");
    assert_eq!(gateway.token_type(), "Bearer");

    gateway.transport().push(200, "");
    let envelope = gateway.revoke_token().await.unwrap();
    assert!(envelope.success);
    assert!(gateway.access_token().is_empty());
    assert!(gateway.token_type().is_empty());
}

#[tokio::test]
async fn token_call_uses_basic_auth_and_later_calls_use_bearer() {
    let mut gateway = fixture_client();
    gateway.transport().push(200, token_reply());
    gateway.acquire_token().await.unwrap();

    gateway.set_payload_json(ORDER_PAYLOAD).unwrap();
    gateway.add_field("intent", "CAPTURE").unwrap();
    gateway.transport().push(201, created_order_reply("5O190127TN364715T"));
    gateway.create_order().await.unwrap();

    let seen = gateway.transport().requests();
    assert_eq!(seen[0].path, "v1/oauth2/token");
    assert_eq!(seen[0].auth, "basic");
    assert_eq!(seen[1].path, "v2/checkout/orders");
    assert_eq!(seen[1].auth, "bearer");
}

#[tokio::test]
async fn create_order_picks_approval_link_by_relation() {
    let mut gateway = fixture_client();
    gateway.set_payload_json(ORDER_PAYLOAD).unwrap();
    gateway.add_field("intent", "CAPTURE").unwrap();

    gateway.transport().push(201, created_order_reply("5O190127TN364715T"));
    let envelope = gateway.create_order().await.unwrap();

    assert!(envelope.success);
    assert_eq!(gateway.order_id(), "5O190127TN364715T");
    assert_eq!(
        gateway.approval_link(),
        "https://www.sandbox.paypal.com/checkoutnow?token=5O190127TN364715T"
    );
    let data = envelope.data.unwrap();
    assert_eq!(data["links"][1]["rel"], "approve");
}

#[tokio::test]
async fn create_order_approval_link_survives_shuffled_links() {
    let mut gateway = fixture_client();
    gateway.transport().push(
        201,
        json!({
            "id": "X9",
            "status": "CREATED",
            "links": [
                {"href": "https://www.sandbox.paypal.com/checkoutnow?token=X9", "rel": "approve", "method": "GET"},
                {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/X9", "rel": "self", "method": "GET"},
                {"href": "https://api-m.sandbox.paypal.com/v2/checkout/orders/X9/capture", "rel": "capture", "method": "POST"}
            ]
        })
        .to_string(),
    );

    gateway.create_order().await.unwrap();
    assert_eq!(
        gateway.approval_link(),
        "https://www.sandbox.paypal.com/checkoutnow?token=X9"
    );
}

#[tokio::test]
async fn create_order_failure_embeds_first_issue_description() {
    let mut gateway = fixture_client();
    gateway.set_payload_json(ORDER_PAYLOAD).unwrap();

    gateway.transport().push(
        400,
        json!({
            "name": "INVALID_REQUEST",
            "message": "Request is not well-formed, syntactically incorrect, or violates schema.",
            "details": [
                {"issue": "MISSING_REQUIRED_PARAMETER", "description": "A required field / parameter is missing."}
            ]
        })
        .to_string(),
    );

    let err = gateway.create_order().await.unwrap_err();
    let GatewayError::Order { issue, description } = err else {
        panic!("expected order error, got {err}");
    };
    assert_eq!(issue, "MISSING_REQUIRED_PARAMETER");
    assert!(description.contains("required field"));
    assert!(gateway.order_id().is_empty());
    assert!(gateway.approval_link().is_empty());
}

#[tokio::test]
async fn capture_with_injected_fixture_reports_completed_order() {
    let mut gateway = fixture_client();
    gateway.transport().push(201, created_order_reply("97Y953627T008845P"));
    gateway.create_order().await.unwrap();

    gateway.transport().push(201, CAPTURE_FIXTURE);
    let envelope = gateway.capture_order().await.unwrap();

    assert!(envelope.success);
    let data = envelope.data.unwrap();
    assert_eq!(data["id"], "97Y953627T008845P");
    assert_eq!(data["status"], "COMPLETED");
    assert_eq!(
        data["purchase_units"][0]["payments"]["captures"][0]["seller_receivable_breakdown"]
            ["net_amount"]["value"],
        "96.02"
    );
}

#[tokio::test]
async fn capture_sends_idempotency_header_matching_create() {
    let mut gateway = fixture_client();
    gateway.transport().push(201, created_order_reply("97Y953627T008845P"));
    gateway.create_order().await.unwrap();
    gateway.transport().push(201, CAPTURE_FIXTURE);
    gateway.capture_order().await.unwrap();

    let request_id = gateway.request_id().to_string();
    let seen = gateway.transport().requests();
    for request in &seen {
        let header = request
            .headers
            .iter()
            .find(|(name, _)| name == "PayPal-Request-Id")
            .map(|(_, value)| value.as_str());
        assert_eq!(header, Some(request_id.as_str()), "path {}", request.path);
    }
    assert_eq!(seen[1].path, "v2/checkout/orders/97Y953627T008845P/capture");
}

#[tokio::test]
async fn capture_rejection_surfaces_first_issue() {
    let mut gateway = fixture_client();
    gateway.transport().push(201, created_order_reply("X1"));
    gateway.create_order().await.unwrap();

    gateway.transport().push(
        422,
        json!({
            "name": "UNPROCESSABLE_ENTITY",
            "message": "The requested action could not be performed.",
            "details": [
                {"issue": "ORDER_NOT_APPROVED", "description": "Payer has not yet approved the Order for payment."}
            ]
        })
        .to_string(),
    );

    let err = gateway.capture_order().await.unwrap_err();
    let GatewayError::Order { issue, .. } = err else {
        panic!("expected order error, got {err}");
    };
    assert_eq!(issue, "ORDER_NOT_APPROVED");
}

#[tokio::test]
async fn clear_resets_order_slot_but_not_session() {
    let mut gateway = fixture_client();
    gateway.transport().push(200, token_reply());
    gateway.acquire_token().await.unwrap();

    gateway.set_payload_json(ORDER_PAYLOAD).unwrap();
    gateway.transport().push(201, created_order_reply("X2"));
    gateway.create_order().await.unwrap();
    let request_id = gateway.request_id();

    gateway.clear();

    assert!(gateway.order_id().is_empty());
    assert!(gateway.approval_link().is_empty());
    assert!(gateway.payload().is_empty());
    // Session survives: credentials, token, and the idempotency id.
    assert!(gateway.is_configured());
    assert_eq!(gateway.access_token(), "A21AAFsandbox");
    assert_eq!(gateway.request_id(), request_id);
}

#[tokio::test]
async fn independent_clients_share_no_token_or_order_state() {
    let mut first = fixture_client();
    let second = fixture_client();

    first.transport().push(200, token_reply());
    first.acquire_token().await.unwrap();
    first.transport().push(201, created_order_reply("X3"));
    first.create_order().await.unwrap();

    assert_eq!(first.access_token(), "A21AAFsandbox");
    assert_eq!(first.order_id(), "X3");
    assert!(second.access_token().is_empty());
    assert!(second.order_id().is_empty());
    assert_ne!(first.request_id(), second.request_id());
}

#[tokio::test]
async fn non_json_body_is_a_transport_error_not_a_crash() {
    let mut gateway = fixture_client();
    gateway.transport().push(502, "<html>502 Bad Gateway</html>");
    let err = gateway.acquire_token().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));

    gateway.transport().push(201, created_order_reply("X4"));
    gateway.create_order().await.unwrap();
    gateway.transport().push(200, "");
    let err = gateway.show_order_details().await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn full_checkout_flow_over_fixtures() {
    let mut gateway = fixture_client();
    let transport = gateway.transport();
    transport.push(200, token_reply());
    transport.push(201, created_order_reply("97Y953627T008845P"));
    transport.push(200, json!({"id": "97Y953627T008845P", "status": "CREATED"}).to_string());
    transport.push(201, CAPTURE_FIXTURE);
    transport.push(200, "");

    gateway.acquire_token().await.unwrap();
    gateway.set_payload_json(ORDER_PAYLOAD).unwrap();
    gateway.add_field("intent", "CAPTURE").unwrap();

    let created = gateway.create_order().await.unwrap();
    assert!(created.success);
    assert!(!gateway.approval_link().is_empty());

    let details = gateway.show_order_details().await.unwrap();
    assert!(details.success);

    let captured = gateway.capture_order().await.unwrap();
    assert!(captured.success);
    assert_eq!(captured.data.unwrap()["id"], "97Y953627T008845P");

    let revoked = gateway.revoke_token().await.unwrap();
    assert!(revoked.success);
    assert!(gateway.access_token().is_empty());
    assert_eq!(gateway.transport().remaining(), 0);
}

//! Fixture transport for offline response evaluation.
//!
//! [`FixtureTransport`] replays queued canned responses instead of touching
//! the network, and records every request it is handed. It exists for two
//! callers: tests driving the full client, and applications that need to
//! evaluate a captured API body (for example a capture response relayed by
//! another system) through the exact same decode path as a live call.

use std::{
    collections::VecDeque,
    sync::Mutex,
};

use crate::{
    error::{GatewayError, Result},
    transport::{ApiRequest, AuthScheme, Body, Method, RawResponse, Transport, sealed},
};

/// A request observed by a [`FixtureTransport`].
#[derive(Debug, Clone)]
pub struct SeenRequest {
    /// HTTP method.
    pub method: Method,
    /// Relative API path.
    pub path: String,
    /// Credential scheme: `"none"`, `"basic"`, or `"bearer"`.
    pub auth: &'static str,
    /// Headers as handed to the transport.
    pub headers: Vec<(String, String)>,
    /// Rendered body: JSON text, or `k=v&...` for form bodies.
    pub body: Option<String>,
}

/// Transport that replays queued responses without network access.
///
/// Responses are consumed in FIFO order, one per request. Sending with an
/// empty queue is a [`GatewayError::Transport`] error — a fixture-driven
/// test that issues an unplanned request should fail loudly.
///
/// # Examples
///
/// ```
/// use paypal_orders::transport::{FixtureTransport};
///
/// let transport = FixtureTransport::new();
/// transport.push(201, r#"{"id": "5O190127TN364715T", "status": "CREATED"}"#);
/// ```
#[derive(Debug, Default)]
pub struct FixtureTransport {
    replies: Mutex<VecDeque<RawResponse>>,
    seen: Mutex<Vec<SeenRequest>>,
}

impl sealed::private::Sealed for FixtureTransport {}

impl FixtureTransport {
    /// Creates a transport with an empty reply queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport pre-loaded with a single reply.
    #[must_use]
    pub fn with_reply(status: u16, body: impl Into<String>) -> Self {
        let transport = Self::new();
        transport.push(status, body);
        transport
    }

    /// Queues a canned response.
    pub fn push(&self, status: u16, body: impl Into<String>) {
        self.replies
            .lock()
            .expect("fixture reply queue lock poisoned")
            .push_back(RawResponse { status, body: body.into() });
    }

    /// Returns the requests observed so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().expect("fixture request log lock poisoned").clone()
    }

    /// Number of replies still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.lock().expect("fixture reply queue lock poisoned").len()
    }

    fn render_body(body: Option<Body<'_>>) -> Option<String> {
        match body {
            Some(Body::Json(value)) => Some(value.to_string()),
            // Recorded verbatim for assertions, not URL-encoded.
            Some(Body::Form(fields)) => Some(
                fields
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&"),
            ),
            None => None,
        }
    }
}

impl Transport for FixtureTransport {
    async fn send<'a>(&'a self, request: ApiRequest<'a>) -> Result<RawResponse> {
        self.seen.lock().expect("fixture request log lock poisoned").push(SeenRequest {
            method: request.method,
            path: request.path.to_owned(),
            auth: match request.auth {
                AuthScheme::None => "none",
                AuthScheme::Basic { .. } => "basic",
                AuthScheme::Bearer(_) => "bearer",
            },
            headers: request
                .headers
                .iter()
                .map(|(name, value)| ((*name).to_owned(), value.clone()))
                .collect(),
            body: Self::render_body(request.body),
        });

        self.replies
            .lock()
            .expect("fixture reply queue lock poisoned")
            .pop_front()
            .ok_or_else(|| {
                GatewayError::Transport(format!(
                    "no fixture reply queued for {} {}",
                    request.method, request.path
                ))
            })
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}

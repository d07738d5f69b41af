//! Token lifecycle and identity operations.

use serde_json::json;
use tracing::{info, instrument};

use super::{GatewayClient, decode};
use crate::{
    error::Result,
    models::{AccountReply, CustomerTokenGrant, Envelope, OAuthFailure, TokenReply},
    transport::{AuthScheme, Body, Method, Transport},
};

const TOKEN_PATH: &str = "v1/oauth2/token";
const TOKEN_TERMINATE_PATH: &str = "v1/oauth2/token/terminate";
const USERINFO_PATH: &str = "v1/identity/oauth2/userinfo?schema=paypalv1.1";
const GENERATE_TOKEN_PATH: &str = "v1/identity/generate-token";

/// Fixed form fields of the client-credentials token request.
const TOKEN_REQUEST_FORM: &[(&str, &str)] = &[
    ("grant_type", "client_credentials"),
    ("ignoreCache", "true"),
    ("return_authn_schemes", "true"),
    ("return_client_metadata", "true"),
    ("return_unconsented_scopes", "true"),
];

impl<T: Transport> GatewayClient<T> {
    /// Acquires an OAuth2 access token with the merchant credentials.
    ///
    /// Uses HTTP Basic auth with client id and secret — the only call that
    /// does. On success the token and its type are stored on the session
    /// and attached as bearer credential to every subsequent call.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`](crate::GatewayError::Auth) with the
    /// remote code and description when no token is issued.
    #[instrument(skip(self), fields(environment = ?self.config.environment))]
    pub async fn acquire_token(&mut self) -> Result<Envelope> {
        let raw = self
            .dispatch(
                Method::Post,
                TOKEN_PATH,
                AuthScheme::Basic {
                    username: &self.config.client_id,
                    password: &self.config.client_secret,
                },
                vec![],
                Some(Body::Form(TOKEN_REQUEST_FORM)),
            )
            .await?;

        let value = raw.json()?;
        match decode::<TokenReply>(&value)? {
            TokenReply::Grant(grant) => {
                self.access_token = grant.access_token;
                self.token_type = grant.token_type;
                info!("access token acquired");
                Ok(Envelope::ok(None, "access token acquired"))
            }
            TokenReply::Failure(failure) => Err(failure.into_auth_error()),
        }
    }

    /// Terminates the current access token.
    ///
    /// Local token state is cleared only when the remote side reports no
    /// error; on failure the session keeps its token untouched.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`](crate::GatewayError::Auth) when the
    /// response carries an error payload.
    #[instrument(skip(self))]
    pub async fn revoke_token(&mut self) -> Result<Envelope> {
        let form = [("token", self.access_token.as_str()), ("token_type_hint", "ACCESS_TOKEN")];
        let raw = self
            .dispatch(
                Method::Post,
                TOKEN_TERMINATE_PATH,
                self.session_auth(),
                vec![],
                Some(Body::Form(&form)),
            )
            .await?;

        // Successful termination returns an empty body.
        if let Some(value) = raw.json_opt()? {
            let failure: OAuthFailure = decode(&value)?;
            if failure.is_error() {
                return Err(failure.into_auth_error());
            }
        }

        self.access_token.clear();
        self.token_type.clear();
        info!("access token revoked");
        Ok(Envelope::ok(None, "access token revoked"))
    }

    /// Fetches the merchant account info for the authenticated session.
    ///
    /// Requires a prior successful [`acquire_token`](Self::acquire_token);
    /// the bearer credential is attached automatically.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`](crate::GatewayError::Auth) when the
    /// response lacks a user identifier.
    #[instrument(skip(self))]
    pub async fn account_info(&self) -> Result<Envelope> {
        let raw = self
            .dispatch(Method::Get, USERINFO_PATH, self.session_auth(), vec![], None)
            .await?;

        let value = raw.json()?;
        match decode::<AccountReply>(&value)? {
            AccountReply::Info(_) => Ok(Envelope::ok(Some(value), "account info retrieved")),
            AccountReply::Failure(failure) => Err(failure.into_auth_error()),
        }
    }

    /// Generates a client-side token keyed to a customer identifier.
    ///
    /// The token string is kept on the session and returned in the
    /// envelope data.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Auth`](crate::GatewayError::Auth) when the
    /// reply carries neither a client token nor an identity token.
    #[instrument(skip(self))]
    pub async fn generate_customer_token(&mut self, customer_id: &str) -> Result<Envelope> {
        let body = json!({ "customer_id": customer_id });
        let raw = self
            .dispatch(
                Method::Post,
                GENERATE_TOKEN_PATH,
                self.session_auth(),
                vec![],
                Some(Body::Json(&body)),
            )
            .await?;

        let value = raw.json()?;
        let grant: CustomerTokenGrant = decode(&value)?;
        match grant.token() {
            Some(token) => {
                self.client_token = token.to_owned();
                info!("customer token generated");
                Ok(Envelope::ok(Some(value), "customer token generated"))
            }
            None => {
                let failure: OAuthFailure = decode(&value)?;
                Err(failure.into_auth_error())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        config::{Environment, GatewayConfig},
        error::GatewayError,
        transport::{FixtureTransport, Method},
        GatewayClient,
    };

    fn fixture_client() -> GatewayClient<FixtureTransport> {
        let config = GatewayConfig::new("client-id", "client-secret", Environment::Sandbox);
        GatewayClient::with_transport(config, FixtureTransport::new())
    }

    #[tokio::test]
    async fn test_acquire_token_stores_grant() {
        let mut gateway = fixture_client();
        gateway.transport().push(
            200,
            json!({"access_token": "A21AAF", "token_type": "Bearer", "expires_in": 32400})
                .to_string(),
        );

        let envelope = gateway.acquire_token().await.unwrap();
        assert!(envelope.success);
        assert!(envelope.data.is_none());
        assert_eq!(gateway.access_token(), "A21AAF");
        assert_eq!(gateway.token_type(), "Bearer");
    }

    #[tokio::test]
    async fn test_acquire_token_sends_fixed_form_with_basic_auth() {
        let mut gateway = fixture_client();
        gateway
            .transport()
            .push(200, json!({"access_token": "A", "token_type": "Bearer"}).to_string());
        gateway.acquire_token().await.unwrap();

        let seen = gateway.transport().requests();
        assert_eq!(seen[0].method, Method::Post);
        assert_eq!(seen[0].path, "v1/oauth2/token");
        let body = seen[0].body.as_deref().unwrap();
        assert!(body.contains("grant_type=client_credentials"));
        assert!(body.contains("ignoreCache=true"));
        assert!(body.contains("return_authn_schemes=true"));
        assert!(body.contains("return_client_metadata=true"));
        assert!(body.contains("return_unconsented_scopes=true"));
    }

    #[tokio::test]
    async fn test_acquire_token_failure_keeps_session_unauthenticated() {
        let mut gateway = fixture_client();
        gateway.transport().push(
            401,
            json!({"error": "invalid_client", "error_description": "Client Authentication failed"})
                .to_string(),
        );

        let err = gateway.acquire_token().await.unwrap_err();
        assert!(matches!(err, GatewayError::Auth { .. }));
        assert!(gateway.access_token().is_empty());
        assert!(gateway.token_type().is_empty());
    }

    #[tokio::test]
    async fn test_acquire_token_empty_body_is_transport_error() {
        let mut gateway = fixture_client();
        gateway.transport().push(502, "");

        let err = gateway.acquire_token().await.unwrap_err();
        assert!(matches!(err, GatewayError::Transport(_)));
    }

    #[tokio::test]
    async fn test_revoke_token_clears_session_on_empty_body() {
        let mut gateway = fixture_client();
        gateway
            .transport()
            .push(200, json!({"access_token": "A21AAF", "token_type": "Bearer"}).to_string());
        gateway.acquire_token().await.unwrap();

        gateway.transport().push(200, "");
        let envelope = gateway.revoke_token().await.unwrap();
        assert!(envelope.success);
        assert!(gateway.access_token().is_empty());
        assert!(gateway.token_type().is_empty());

        let seen = gateway.transport().requests();
        assert_eq!(seen[1].path, "v1/oauth2/token/terminate");
        assert_eq!(
            seen[1].body.as_deref(),
            Some("token=A21AAF&token_type_hint=ACCESS_TOKEN")
        );
    }

    #[tokio::test]
    async fn test_revoke_token_failure_keeps_local_state() {
        let mut gateway = fixture_client();
        gateway
            .transport()
            .push(200, json!({"access_token": "A21AAF", "token_type": "Bearer"}).to_string());
        gateway.acquire_token().await.unwrap();

        gateway.transport().push(
            401,
            json!({"error": "invalid_token", "error_description": "Token signature verification failed"})
                .to_string(),
        );
        let err = gateway.revoke_token().await.unwrap_err();
        assert!(matches!(err, GatewayError::Auth { .. }));
        assert_eq!(gateway.access_token(), "A21AAF");
        assert_eq!(gateway.token_type(), "Bearer");
    }

    #[tokio::test]
    async fn test_account_info_success() {
        let gateway = fixture_client();
        gateway.transport().push(
            200,
            json!({
                "user_id": "https://www.paypal.com/webapps/auth/identity/user/abc",
                "name": "Jesse Merchant"
            })
            .to_string(),
        );

        let envelope = gateway.account_info().await.unwrap();
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert!(data["user_id"].as_str().unwrap().contains("/identity/user/"));

        let seen = gateway.transport().requests();
        assert_eq!(seen[0].path, "v1/identity/oauth2/userinfo?schema=paypalv1.1");
    }

    #[tokio::test]
    async fn test_account_info_without_user_id_is_auth_error() {
        let gateway = fixture_client();
        gateway
            .transport()
            .push(401, json!({"name": "INVALID_TOKEN", "message": "Token is not valid"}).to_string());

        let err = gateway.account_info().await.unwrap_err();
        let GatewayError::Auth { code, .. } = err else {
            panic!("expected auth error");
        };
        assert_eq!(code, "INVALID_TOKEN");
    }

    #[tokio::test]
    async fn test_generate_customer_token_stores_client_token() {
        let mut gateway = fixture_client();
        gateway
            .transport()
            .push(200, json!({"client_token": "ct-abc", "expires_in": 3600}).to_string());

        let envelope = gateway.generate_customer_token("customer-77").await.unwrap();
        assert!(envelope.success);
        assert_eq!(gateway.client_token(), "ct-abc");

        let seen = gateway.transport().requests();
        assert_eq!(seen[0].path, "v1/identity/generate-token");
        assert!(seen[0].body.as_deref().unwrap().contains("customer-77"));
    }

    #[tokio::test]
    async fn test_generate_customer_token_accepts_id_token() {
        let mut gateway = fixture_client();
        gateway.transport().push(200, json!({"id_token": "it-def"}).to_string());

        gateway.generate_customer_token("customer-77").await.unwrap();
        assert_eq!(gateway.client_token(), "it-def");
    }

    #[tokio::test]
    async fn test_generate_customer_token_without_token_is_auth_error() {
        let mut gateway = fixture_client();
        gateway.transport().push(
            400,
            json!({"error": "invalid_request", "error_description": "customer_id is invalid"})
                .to_string(),
        );

        let err = gateway.generate_customer_token("nope").await.unwrap_err();
        assert!(matches!(err, GatewayError::Auth { .. }));
        assert!(gateway.client_token().is_empty());
    }
}

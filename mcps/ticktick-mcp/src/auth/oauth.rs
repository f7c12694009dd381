//! OAuth token endpoint calls (authorization code exchange and refresh)

use std::sync::Arc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Method;
use serde::Deserialize;
use tracing::instrument;

use super::token::{now_ms, TokenSet};
use crate::client::transport::{Body, HttpRequest, Transport};
use crate::error::{TickTickError, TickTickResult};

pub const TOKEN_URL: &str = "https://ticktick.com/oauth/token";
pub const DEFAULT_REDIRECT_URI: &str = "https://nikitatsym.github.io/ticktick-mcp/";
pub const SCOPES: &str = "tasks:read tasks:write";

/// Lifetime assumed when the token endpoint omits `expires_in`
const DEFAULT_EXPIRES_IN_SECS: i64 = 3600;

/// OAuth application credentials
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    /// Both halves must be present and non-empty
    pub fn from_parts(client_id: Option<String>, client_secret: Option<String>) -> Option<Self> {
        match (client_id, client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Some(Self {
                    client_id,
                    client_secret,
                })
            }
            _ => None,
        }
    }

    /// `Authorization` header value: `Basic base64(id:secret)`
    pub fn basic_authorization(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    scope: Option<String>,
}

impl TokenResponse {
    fn into_token_set(self, now_ms: i64, prior_refresh: Option<&str>) -> TokenSet {
        let expires_in = self.expires_in.unwrap_or(DEFAULT_EXPIRES_IN_SECS);
        TokenSet {
            access_token: self.access_token,
            refresh_token: self
                .refresh_token
                .filter(|t| !t.is_empty())
                .or_else(|| prior_refresh.map(str::to_string)),
            token_type: self.token_type,
            expires_at: Some(now_ms.saturating_add(expires_in.saturating_mul(1000))),
            scope: self.scope,
        }
    }
}

/// Client for the provider's token endpoint
pub struct OAuthClient {
    transport: Arc<dyn Transport>,
    token_url: String,
    redirect_uri: String,
}

impl OAuthClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        token_url: impl Into<String>,
        redirect_uri: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            token_url: token_url.into(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Trade a one-time authorization code for tokens
    #[instrument(skip_all)]
    pub async fn exchange_code(
        &self,
        code: &str,
        credentials: &ClientCredentials,
    ) -> TickTickResult<TokenSet> {
        let form = vec![
            ("grant_type".to_string(), "authorization_code".to_string()),
            ("code".to_string(), code.to_string()),
            ("redirect_uri".to_string(), self.redirect_uri.clone()),
            ("scope".to_string(), SCOPES.to_string()),
        ];
        self.request_tokens("exchange", form, credentials, None).await
    }

    /// Obtain a fresh access token; keeps `refresh_token` if the response has none
    #[instrument(skip_all)]
    pub async fn refresh(
        &self,
        refresh_token: &str,
        credentials: &ClientCredentials,
    ) -> TickTickResult<TokenSet> {
        let form = vec![
            ("grant_type".to_string(), "refresh_token".to_string()),
            ("refresh_token".to_string(), refresh_token.to_string()),
        ];
        self.request_tokens("refresh", form, credentials, Some(refresh_token))
            .await
    }

    async fn request_tokens(
        &self,
        grant: &'static str,
        form: Vec<(String, String)>,
        credentials: &ClientCredentials,
        prior_refresh: Option<&str>,
    ) -> TickTickResult<TokenSet> {
        let response = self
            .transport
            .send(HttpRequest {
                method: Method::POST,
                url: self.token_url.clone(),
                authorization: Some(credentials.basic_authorization()),
                body: Body::Form(form),
            })
            .await?;

        if response.status >= 400 {
            return Err(TickTickError::TokenEndpoint {
                grant,
                status: response.status,
                body: response.body,
            });
        }

        let parsed: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| TickTickError::InvalidResponse(format!("token {grant}: {e}")))?;

        Ok(parsed.into_token_set(now_ms(), prior_refresh))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::transport::testing::*;
    use serde_json::json;

    fn credentials() -> ClientCredentials {
        ClientCredentials::from_parts(Some("cid".into()), Some("secret".into())).unwrap()
    }

    fn form_value<'a>(body: &'a Body, key: &str) -> Option<&'a str> {
        match body {
            Body::Form(pairs) => pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_basic_authorization() {
        assert_eq!(credentials().basic_authorization(), "Basic Y2lkOnNlY3JldA==");
    }

    #[test]
    fn test_credentials_require_both_parts() {
        assert!(ClientCredentials::from_parts(Some("id".into()), None).is_none());
        assert!(ClientCredentials::from_parts(Some("".into()), Some("s".into())).is_none());
        assert!(ClientCredentials::from_parts(None, Some("s".into())).is_none());
    }

    #[tokio::test]
    async fn test_exchange_code_request_and_expiry() {
        let transport = FakeTransport::new(|_| {
            json(
                200,
                json!({
                    "access_token": "new",
                    "refresh_token": "r1",
                    "expires_in": 7200,
                    "scope": SCOPES
                }),
            )
        });
        let oauth = OAuthClient::new(transport.clone(), TOKEN_URL, DEFAULT_REDIRECT_URI);

        let before = now_ms();
        let tokens = oauth.exchange_code("code-1", &credentials()).await.unwrap();

        assert_eq!(tokens.access_token, "new");
        assert_eq!(tokens.refresh_token.as_deref(), Some("r1"));
        let expires_at = tokens.expires_at.unwrap();
        assert!(expires_at >= before + 7_200_000);
        assert!(expires_at <= now_ms() + 7_200_000);

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.url, TOKEN_URL);
        assert_eq!(request.authorization.as_deref(), Some("Basic Y2lkOnNlY3JldA=="));
        assert_eq!(form_value(&request.body, "grant_type"), Some("authorization_code"));
        assert_eq!(form_value(&request.body, "code"), Some("code-1"));
        assert_eq!(form_value(&request.body, "redirect_uri"), Some(DEFAULT_REDIRECT_URI));
        assert_eq!(form_value(&request.body, "scope"), Some(SCOPES));
    }

    #[tokio::test]
    async fn test_refresh_keeps_prior_refresh_token_and_defaults_expiry() {
        let transport = FakeTransport::new(|_| json(200, json!({"access_token": "fresh"})));
        let oauth = OAuthClient::new(transport.clone(), TOKEN_URL, DEFAULT_REDIRECT_URI);

        let before = now_ms();
        let tokens = oauth.refresh("old-refresh", &credentials()).await.unwrap();

        assert_eq!(tokens.access_token, "fresh");
        assert_eq!(tokens.refresh_token.as_deref(), Some("old-refresh"));
        assert!(tokens.expires_at.unwrap() >= before + DEFAULT_EXPIRES_IN_SECS * 1000);

        let request = &transport.requests()[0];
        assert_eq!(form_value(&request.body, "grant_type"), Some("refresh_token"));
        assert_eq!(form_value(&request.body, "refresh_token"), Some("old-refresh"));
    }

    #[tokio::test]
    async fn test_huge_expires_in_saturates() {
        let transport = FakeTransport::new(|_| {
            json(200, json!({"access_token": "fresh", "expires_in": i64::MAX}))
        });
        let oauth = OAuthClient::new(transport, TOKEN_URL, DEFAULT_REDIRECT_URI);

        let tokens = oauth.refresh("r", &credentials()).await.unwrap();
        assert_eq!(tokens.expires_at, Some(i64::MAX));
        assert!(!tokens.is_expired());
    }

    #[tokio::test]
    async fn test_error_status_is_hard_failure() {
        let transport = FakeTransport::new(|_| text(400, "invalid_grant"));
        let oauth = OAuthClient::new(transport, TOKEN_URL, DEFAULT_REDIRECT_URI);

        let err = oauth.refresh("r", &credentials()).await.unwrap_err();
        match err {
            TickTickError::TokenEndpoint { grant, status, body } => {
                assert_eq!(grant, "refresh");
                assert_eq!(status, 400);
                assert_eq!(body, "invalid_grant");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

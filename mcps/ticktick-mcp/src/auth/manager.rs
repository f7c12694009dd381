//! Access token resolution
//!
//! Strategies are tried in a fixed order; the first one that yields a token
//! wins:
//!
//! 1. `Configured`: a token supplied via configuration (persisted, never expiry-checked)
//! 2. `Stored`: the persisted token while it is still fresh
//! 3. `Refresh`: the persisted token is stale and a refresh token is available
//! 4. `CodeExchange`: a one-time authorization code is configured
//!
//! Refresh and exchange failures are logged and fall through to the next
//! strategy. When nothing applies the result is [`TickTickError::Unauthenticated`].

use tracing::{info, warn};

use super::oauth::{ClientCredentials, OAuthClient};
use super::store::TokenStore;
use super::token::TokenSet;
use crate::error::{TickTickError, TickTickResult};

/// Authentication inputs taken from configuration
#[derive(Debug, Clone, Default)]
pub struct AuthSettings {
    pub credentials: Option<ClientCredentials>,
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub auth_code: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Configured,
    Stored,
    Refresh,
    CodeExchange,
}

const RESOLUTION_ORDER: [Strategy; 4] = [
    Strategy::Configured,
    Strategy::Stored,
    Strategy::Refresh,
    Strategy::CodeExchange,
];

pub struct AuthManager {
    settings: AuthSettings,
    store: TokenStore,
    oauth: OAuthClient,
}

impl AuthManager {
    pub fn new(settings: AuthSettings, store: TokenStore, oauth: OAuthClient) -> Self {
        Self {
            settings,
            store,
            oauth,
        }
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    /// Resolve a usable access token
    pub async fn get_access_token(&self) -> TickTickResult<String> {
        let stored = self.store.load().await;

        for strategy in RESOLUTION_ORDER {
            if let Some(tokens) = self.attempt(strategy, stored.as_ref()).await? {
                return Ok(tokens.access_token);
            }
        }

        Err(TickTickError::Unauthenticated)
    }

    /// Refresh the persisted token unconditionally (used after a 401)
    ///
    /// `Ok(None)` when there is nothing to refresh with.
    pub async fn refresh_stored(&self) -> TickTickResult<Option<TokenSet>> {
        let Some(credentials) = &self.settings.credentials else {
            return Ok(None);
        };
        let Some(refresh_token) = self.store.load().await.and_then(|t| t.refresh_token) else {
            return Ok(None);
        };

        info!("Access token rejected, refreshing...");
        let tokens = self.oauth.refresh(&refresh_token, credentials).await?;
        self.store.save(&tokens).await?;
        info!("Token refreshed successfully.");
        Ok(Some(tokens))
    }

    async fn attempt(
        &self,
        strategy: Strategy,
        stored: Option<&TokenSet>,
    ) -> TickTickResult<Option<TokenSet>> {
        match strategy {
            Strategy::Configured => {
                let Some(access_token) = &self.settings.access_token else {
                    return Ok(None);
                };
                let tokens = TokenSet::from_access_token(
                    access_token.clone(),
                    self.settings.refresh_token.clone(),
                );
                self.store.save(&tokens).await?;
                Ok(Some(tokens))
            }

            Strategy::Stored => Ok(stored.filter(|t| !t.is_expired()).cloned()),

            Strategy::Refresh => {
                let Some(stored) = stored.filter(|t| t.is_expired()) else {
                    return Ok(None);
                };
                let (Some(refresh_token), Some(credentials)) =
                    (&stored.refresh_token, &self.settings.credentials)
                else {
                    return Ok(None);
                };

                info!("Access token expired, refreshing...");
                match self.oauth.refresh(refresh_token, credentials).await {
                    Ok(tokens) => {
                        self.store.save(&tokens).await?;
                        info!("Token refreshed successfully.");
                        Ok(Some(tokens))
                    }
                    Err(e) => {
                        warn!(error = %e, "Token refresh failed");
                        Ok(None)
                    }
                }
            }

            Strategy::CodeExchange => {
                let (Some(code), Some(credentials)) =
                    (&self.settings.auth_code, &self.settings.credentials)
                else {
                    return Ok(None);
                };

                info!("Exchanging auth code for tokens...");
                match self.oauth.exchange_code(code, credentials).await {
                    Ok(tokens) => {
                        self.store.save(&tokens).await?;
                        info!(path = %self.store.path().display(), "Tokens saved");
                        Ok(Some(tokens))
                    }
                    Err(e) => {
                        warn!(error = %e, "Auth code exchange failed");
                        Ok(None)
                    }
                }
            }
        }
    }
}

//! OAuth token lifecycle
//!
//! Token persistence, the provider's token endpoint, and the resolution
//! chain that turns configuration plus stored state into an access token.

pub mod manager;
pub mod oauth;
pub mod store;
pub mod token;

pub use manager::{AuthManager, AuthSettings};
pub use oauth::{ClientCredentials, OAuthClient};
pub use store::TokenStore;
pub use token::TokenSet;

use crate::domain::session::SessionUser;
use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynOAuthService = Arc<dyn OAuthServiceTrait + Send + Sync>;

#[async_trait]
pub trait OAuthServiceTrait {
    /// Provider URL the browser is sent to, carrying `state` back on the callback.
    fn authorization_url(&self, state: &str) -> Result<String, ServiceError>;
    /// Redeems an authorization code and assembles the user's profile.
    async fn fetch_profile(&self, code: &str) -> Result<SessionUser, ServiceError>;
}

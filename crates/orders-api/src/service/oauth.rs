use crate::{abstract_trait::OAuthServiceTrait, config::OAuthConfig, domain::session::SessionUser};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use shared::errors::ServiceError;
use std::time::Duration;
use tracing::{info, warn};

pub const GOOGLE_SCOPES: &str =
    "openid email profile https://www.googleapis.com/auth/user.phonenumbers.read";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PhoneNumber {
    #[serde(default)]
    canonical_form: Option<String>,
    #[serde(default)]
    value: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PeopleResponse {
    #[serde(default)]
    phone_numbers: Vec<PhoneNumber>,
}

impl PeopleResponse {
    fn first_number(self) -> Option<String> {
        self.phone_numbers
            .into_iter()
            .find_map(|p| p.canonical_form.or(p.value))
    }
}

/// Authorization-code client for Google's OAuth 2.0 and People endpoints.
#[derive(Debug, Clone)]
pub struct GoogleOAuthService {
    client: Client,
    config: OAuthConfig,
}

impl GoogleOAuthService {
    pub fn new(config: OAuthConfig) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ServiceError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    async fn exchange_code(&self, code: &str) -> Result<String, ServiceError> {
        let params = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
        ];

        let response = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Token request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::Upstream(format!(
                "Token endpoint returned {status}: {body}"
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Invalid token response: {e}")))?;

        Ok(token.access_token)
    }

    async fn user_info(&self, access_token: &str) -> Result<UserInfo, ServiceError> {
        let response = self
            .client
            .get(&self.config.userinfo_url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Userinfo request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Upstream(format!(
                "Userinfo endpoint returned {status}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ServiceError::Upstream(format!("Invalid userinfo response: {e}")))
    }

    /// The phone number is optional, so any failure here degrades to `None`.
    async fn phone_number(&self, access_token: &str) -> Option<String> {
        let response = match self
            .client
            .get(&self.config.people_url)
            .query(&[("personFields", "phoneNumbers")])
            .bearer_auth(access_token)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => resp,
            Ok(resp) => {
                warn!("People API returned {}", resp.status());
                return None;
            }
            Err(e) => {
                warn!("People API request failed: {e}");
                return None;
            }
        };

        match response.json::<PeopleResponse>().await {
            Ok(people) => people.first_number(),
            Err(e) => {
                warn!("Invalid People API response: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl OAuthServiceTrait for GoogleOAuthService {
    fn authorization_url(&self, state: &str) -> Result<String, ServiceError> {
        let url = Url::parse_with_params(
            &self.config.auth_url,
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("scope", GOOGLE_SCOPES),
                ("state", state),
            ],
        )
        .map_err(|e| ServiceError::Internal(format!("Invalid authorization URL: {e}")))?;

        Ok(url.into())
    }

    async fn fetch_profile(&self, code: &str) -> Result<SessionUser, ServiceError> {
        let access_token = self.exchange_code(code).await?;
        let info = self.user_info(&access_token).await?;
        let contact = self.phone_number(&access_token).await;

        info!("🔑 Google login for {}", info.email);

        let name = info
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| info.email.clone());

        Ok(SessionUser {
            name,
            email: info.email,
            contact,
        })
    }
}

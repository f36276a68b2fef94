use crate::{abstract_trait::SessionServiceTrait, domain::session::SessionUser};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use shared::errors::ServiceError;

pub const SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    name: String,
    #[serde(default)]
    contact: Option<String>,
    iat: usize,
    exp: usize,
}

/// Signs and verifies the HS256 session token kept in the `session` cookie.
#[derive(Clone)]
pub struct SessionSigner {
    secret: String,
    ttl: Duration,
}

impl SessionSigner {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.to_string(),
            ttl: Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn with_ttl(secret: &str, ttl: Duration) -> Self {
        Self {
            secret: secret.to_string(),
            ttl,
        }
    }
}

impl SessionServiceTrait for SessionSigner {
    fn issue(&self, user: &SessionUser) -> Result<String, ServiceError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.email.clone(),
            name: user.name.clone(),
            contact: user.contact.clone(),
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_ref()),
        )
        .map_err(ServiceError::Jwt)
    }

    fn verify(&self, token: &str) -> Result<SessionUser, ServiceError> {
        let decoding_key = DecodingKey::from_secret(self.secret.as_ref());
        let mut validation = Validation::default();
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &decoding_key, &validation).map_err(ServiceError::Jwt)?;

        let Claims {
            sub, name, contact, ..
        } = token_data.claims;

        Ok(SessionUser {
            name,
            email: sub,
            contact,
        })
    }
}

use crate::domain::session::SessionUser;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynSessionService = Arc<dyn SessionServiceTrait + Send + Sync>;

pub trait SessionServiceTrait {
    fn issue(&self, user: &SessionUser) -> Result<String, ServiceError>;
    fn verify(&self, token: &str) -> Result<SessionUser, ServiceError>;
}

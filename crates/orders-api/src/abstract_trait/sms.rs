use async_trait::async_trait;
use shared::errors::ServiceError;
use std::sync::Arc;

pub type DynSmsService = Arc<dyn SmsServiceTrait + Send + Sync>;

#[async_trait]
pub trait SmsServiceTrait {
    async fn send(&self, to: &str, message: &str) -> Result<(), ServiceError>;
}

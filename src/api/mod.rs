use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod model;

pub use client::SubscriptionApi;
pub use error::ApiError;
pub use model::Subscription;
pub use model::SubscriptionDraft;

/// Backend seam for the subscriptions endpoint.
///
/// `SubscriptionApi` is the real implementation; the page controller only
/// depends on this trait so tests can substitute a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionBackend: Send + Sync {
    async fn list(&self) -> Result<Vec<Subscription>, ApiError>;
    async fn get(&self, id: i64) -> Result<Subscription, ApiError>;
    async fn create(&self, draft: &SubscriptionDraft) -> Result<Subscription, ApiError>;
    async fn update(&self, id: i64, draft: &SubscriptionDraft) -> Result<Subscription, ApiError>;
    async fn delete(&self, id: i64) -> Result<(), ApiError>;
}

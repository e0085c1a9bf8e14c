//! Port for the remote text-generation service.
//!
//! The service is a black box that produces opportunity batches, promotional
//! content and streamed chat advice. Implementations map every transport
//! failure, non-success status and malformed payload to
//! [`DomainError::RemoteGeneration`]; callers never retry automatically.

use crate::domain::entities::chat::ChatMessage;
use crate::domain::entities::opportunity::{ExpiredDomain, Product};
use crate::domain::entities::plan::{DomainSalePitch, MarketingPlan};
use crate::domain::error::DomainError;
use async_trait::async_trait;
use futures::stream::BoxStream;

/// Lazy, finite sequence of advice text chunks in arrival order.
///
/// End of stream means the reply is complete. Dropping the stream closes the
/// underlying connection.
pub type AdviceStream = BoxStream<'static, Result<String, DomainError>>;

#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generator name for logging
    fn name(&self) -> &str;

    async fn fetch_products(&self) -> Result<Vec<Product>, DomainError>;

    async fn fetch_domains(&self) -> Result<Vec<ExpiredDomain>, DomainError>;

    async fn marketing_plan(&self, product: &Product) -> Result<MarketingPlan, DomainError>;

    async fn domain_pitch(&self, domain: &ExpiredDomain) -> Result<DomainSalePitch, DomainError>;

    /// Opens an advice stream. `history` holds the conversation before `new_message`.
    async fn stream_advice(
        &self,
        history: &[ChatMessage],
        new_message: &str,
    ) -> Result<AdviceStream, DomainError>;
}

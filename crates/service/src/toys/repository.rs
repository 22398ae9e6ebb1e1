use async_trait::async_trait;

use super::domain::{Toy, ToyFields};
use crate::errors::ServiceError;

/// Storage abstraction for toy records.
/// Lookups by id are first-match over insertion order.
#[async_trait]
pub trait ToyRepository: Send + Sync {
    /// All toys in insertion order.
    async fn list(&self) -> Vec<Toy>;
    /// Append a new toy; the store assigns its id.
    async fn create(&self, fields: ToyFields) -> Toy;
    async fn update(&self, id: u64, patch: ToyFields) -> Result<Toy, ServiceError>;
    async fn delete(&self, id: u64) -> Result<(), ServiceError>;
}

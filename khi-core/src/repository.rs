use async_trait::async_trait;
use serde_json::Value;

use crate::{Deal, DealFilter, DealResult};

/// Storage for deals. Bodies arrive as raw JSON so that every backend
/// applies the same presence checks and merge rules from [`Deal`].
#[async_trait]
pub trait DealRepository: Send + Sync {
    /// Deals matching `filter`, in insertion order.
    async fn list_deals(&self, filter: &DealFilter) -> DealResult<Vec<Deal>>;

    async fn get_deal(&self, id: u64) -> DealResult<Option<Deal>>;

    async fn create_deal(&self, fields: Value) -> DealResult<Deal>;

    /// Shallow-merges `fields` into the stored deal; see [`Deal::merged`].
    async fn update_deal(&self, id: u64, fields: Value) -> DealResult<Deal>;

    /// Removes the deal and hands it back.
    async fn delete_deal(&self, id: u64) -> DealResult<Deal>;

    async fn count(&self) -> DealResult<usize>;
}

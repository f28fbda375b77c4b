use async_trait::async_trait;
use chrono::Utc;
use khi_core::{Deal, DealError, DealFilter, DealRepository, DealResult};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Process-local deal store. Contents are lost on restart.
///
/// Ids come from a counter that only moves forward, so an id freed by a
/// delete is never handed out again.
pub struct InMemoryDealRepository {
    inner: RwLock<DealTable>,
}

struct DealTable {
    deals: Vec<Deal>,
    next_id: u64,
}

impl InMemoryDealRepository {
    pub fn new() -> Self {
        Self::with_deals(Vec::new())
    }

    pub fn with_deals(deals: Vec<Deal>) -> Self {
        let next_id = deals.iter().map(|d| d.id).max().unwrap_or(0) + 1;
        Self {
            inner: RwLock::new(DealTable { deals, next_id }),
        }
    }

    /// Store preloaded with the demo catalogue.
    pub fn seeded() -> DealResult<Self> {
        let deals = crate::seed::demo_deals(Utc::now())?;
        info!("Seeded deal store with {} demo deals", deals.len());
        Ok(Self::with_deals(deals))
    }
}

impl Default for InMemoryDealRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl DealTable {
    fn position(&self, id: u64) -> DealResult<usize> {
        self.deals
            .iter()
            .position(|d| d.id == id)
            .ok_or_else(DealError::not_found)
    }
}

#[async_trait]
impl DealRepository for InMemoryDealRepository {
    async fn list_deals(&self, filter: &DealFilter) -> DealResult<Vec<Deal>> {
        let table = self.inner.read().await;
        if filter.is_empty() {
            return Ok(table.deals.clone());
        }
        Ok(table
            .deals
            .iter()
            .filter(|d| filter.matches(d))
            .cloned()
            .collect())
    }

    async fn get_deal(&self, id: u64) -> DealResult<Option<Deal>> {
        let table = self.inner.read().await;
        Ok(table.deals.iter().find(|d| d.id == id).cloned())
    }

    async fn create_deal(&self, fields: Value) -> DealResult<Deal> {
        let mut table = self.inner.write().await;
        let deal = Deal::from_submission(table.next_id, fields, Utc::now())?;

        table.next_id += 1;
        table.deals.push(deal.clone());
        debug!(deal_id = deal.id, destination = %deal.destination, "Deal created");

        Ok(deal)
    }

    async fn update_deal(&self, id: u64, fields: Value) -> DealResult<Deal> {
        let mut table = self.inner.write().await;
        let index = table.position(id)?;

        let updated = table.deals[index].merged(&fields)?;
        table.deals[index] = updated.clone();
        debug!(deal_id = id, "Deal updated");

        Ok(updated)
    }

    async fn delete_deal(&self, id: u64) -> DealResult<Deal> {
        let mut table = self.inner.write().await;
        let index = table.position(id)?;

        let removed = table.deals.remove(index);
        debug!(deal_id = id, "Deal deleted");

        Ok(removed)
    }

    async fn count(&self) -> DealResult<usize> {
        Ok(self.inner.read().await.deals.len())
    }
}

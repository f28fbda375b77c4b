use std::sync::Arc;
use khi_core::DealRepository;

#[derive(Clone)]
pub struct AppState {
    pub deal_repo: Arc<dyn DealRepository>,
}

impl AppState {
    pub fn new(deal_repo: Arc<dyn DealRepository>) -> Self {
        Self { deal_repo }
    }
}

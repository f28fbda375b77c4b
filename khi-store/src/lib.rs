pub mod app_config;
pub mod memory_repo;
pub mod seed;

pub use memory_repo::InMemoryDealRepository;

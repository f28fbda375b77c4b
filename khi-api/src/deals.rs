use axum::{
    body::Bytes,
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use khi_core::{filter::parse_leading_int, Deal, DealFilter};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::{error::AppError, state::AppState};

const LIST_FAILED: &str = "Failed to fetch deals";
const CREATE_FAILED: &str = "Failed to create deal";
const UPDATE_FAILED: &str = "Failed to update deal";
const DELETE_FAILED: &str = "Failed to delete deal";

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct DealIdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListDealsResponse {
    pub success: bool,
    pub deals: Vec<Deal>,
    pub total: usize,
}

#[derive(Debug, Serialize)]
pub struct DealResponse {
    pub success: bool,
    pub deal: Deal,
    pub message: &'static str,
}

impl DealResponse {
    fn ok(deal: Deal, message: &'static str) -> Json<Self> {
        Json(Self {
            success: true,
            deal,
            message,
        })
    }
}

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/api/deals",
        get(list_deals)
            .post(create_deal)
            .put(update_deal)
            .delete(delete_deal),
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/deals?category=&destination=&maxPrice=
pub async fn list_deals(
    State(state): State<AppState>,
    query: Result<Query<DealFilter>, QueryRejection>,
) -> Result<Json<ListDealsResponse>, AppError> {
    let Query(filter) = query.map_err(|e| AppError::internal(LIST_FAILED, e))?;
    info!("GET /api/deals - filter: {:?}", filter);

    let deals = state
        .deal_repo
        .list_deals(&filter)
        .await
        .map_err(|e| AppError::from_deal(e, LIST_FAILED))?;

    Ok(Json(ListDealsResponse {
        success: true,
        total: deals.len(),
        deals,
    }))
}

/// POST /api/deals
pub async fn create_deal(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<DealResponse>, AppError> {
    let fields = parse_body(&body, CREATE_FAILED)?;

    let deal = state
        .deal_repo
        .create_deal(fields)
        .await
        .map_err(|e| AppError::from_deal(e, CREATE_FAILED))?;

    info!(deal_id = deal.id, "Created deal to {}", deal.destination_city);
    Ok(DealResponse::ok(deal, "Deal created successfully"))
}

/// PUT /api/deals?id=
pub async fn update_deal(
    State(state): State<AppState>,
    query: Result<Query<DealIdQuery>, QueryRejection>,
    body: Bytes,
) -> Result<Json<DealResponse>, AppError> {
    let raw_id = required_id(query, UPDATE_FAILED)?;
    let fields = parse_body(&body, UPDATE_FAILED)?;
    let id = resolve_id(&raw_id)?;

    let deal = state
        .deal_repo
        .update_deal(id, fields)
        .await
        .map_err(|e| AppError::from_deal(e, UPDATE_FAILED))?;

    info!(deal_id = deal.id, "Updated deal");
    Ok(DealResponse::ok(deal, "Deal updated successfully"))
}

/// DELETE /api/deals?id=
pub async fn delete_deal(
    State(state): State<AppState>,
    query: Result<Query<DealIdQuery>, QueryRejection>,
) -> Result<Json<DealResponse>, AppError> {
    let raw_id = required_id(query, DELETE_FAILED)?;
    let id = resolve_id(&raw_id)?;

    let deal = state
        .deal_repo
        .delete_deal(id)
        .await
        .map_err(|e| AppError::from_deal(e, DELETE_FAILED))?;

    info!(deal_id = deal.id, "Deleted deal");
    Ok(DealResponse::ok(deal, "Deal deleted successfully"))
}

// ============================================================================
// Helpers
// ============================================================================

fn parse_body(body: &Bytes, failure: &'static str) -> Result<Value, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        warn!("Rejected request body: {}", e);
        AppError::internal(failure, e)
    })
}

fn required_id(
    query: Result<Query<DealIdQuery>, QueryRejection>,
    failure: &'static str,
) -> Result<String, AppError> {
    let Query(query) = query.map_err(|e| AppError::internal(failure, e))?;
    match query.id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(AppError::ValidationError("Deal ID is required".to_string())),
    }
}

/// Ids are read by their leading digits; anything unreadable names no deal.
fn resolve_id(raw: &str) -> Result<u64, AppError> {
    parse_leading_int(raw)
        .and_then(|id| u64::try_from(id).ok())
        .ok_or_else(|| AppError::NotFoundError("Deal not found".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_id() {
        assert_eq!(resolve_id("3").unwrap(), 3);
        assert_eq!(resolve_id("3abc").unwrap(), 3);
        assert!(matches!(resolve_id("abc"), Err(AppError::NotFoundError(_))));
        assert!(matches!(resolve_id("-1"), Err(AppError::NotFoundError(_))));
    }

    #[test]
    fn test_required_id() {
        let missing = required_id(Ok(Query(DealIdQuery { id: None })), UPDATE_FAILED);
        assert!(matches!(missing, Err(AppError::ValidationError(ref m)) if m == "Deal ID is required"));

        let empty = required_id(Ok(Query(DealIdQuery { id: Some(String::new()) })), UPDATE_FAILED);
        assert!(matches!(empty, Err(AppError::ValidationError(_))));
    }

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        let err = parse_body(&Bytes::from_static(b"{not json"), CREATE_FAILED).unwrap_err();
        assert!(matches!(err, AppError::InternalServerError { message, .. } if message == CREATE_FAILED));
    }
}

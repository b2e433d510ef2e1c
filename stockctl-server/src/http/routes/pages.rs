//! HTML page endpoints

use axum::{extract::State, response::Html, routing::get, Router};
use stockctl_core::Location;

use crate::http::error::ApiError;
use crate::http::pages;
use crate::http::server::AppState;

/// GET / - quick-add form and active inventory
async fn index(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let items = state.repo.list_active_items().await?;
    Ok(Html(pages::index_page(&items)))
}

/// GET /topstock - active items in overstock
async fn topstock(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let items = state.repo.list_items_at(Location::Overstock).await?;
    Ok(Html(pages::topstock_page(&items)))
}

/// Page routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/topstock", get(topstock))
}

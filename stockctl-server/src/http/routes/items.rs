//! Inventory endpoints: quick-add, listings, name suggestions

use axum::{
    extract::{rejection::FormRejection, rejection::QueryRejection, Query, State},
    response::Redirect,
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use stockctl_core::models::optional;
use stockctl_core::{
    InventoryItem, Location, LowStockRow, NameSuggestion, NewItem, DEFAULT_LOW_STOCK_THRESHOLD,
};

use crate::http::error::ApiError;
use crate::http::server::AppState;

/// Quick-add form body
///
/// Accepts both the long field names and the short ones older forms post.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub item: String,
    #[serde(alias = "qty")]
    pub quantity: i32,
    #[serde(default, alias = "cat")]
    pub category: Option<String>,
    #[serde(default)]
    pub aisle: Option<String>,
    #[serde(default, alias = "pos")]
    pub position: Option<String>,
    #[serde(default, alias = "loc")]
    pub location_type: Option<String>,
    #[serde(default)]
    pub barcode: Option<String>,
    #[serde(default, alias = "img")]
    pub image_url: Option<String>,
}

impl AddItemForm {
    fn into_new_item(self) -> Result<NewItem, ApiError> {
        let location = match optional(self.location_type) {
            Some(raw) => raw.parse::<Location>()?,
            None => Location::default(),
        };

        Ok(NewItem::new(&self.item, self.quantity, location)?
            .with_category(self.category)
            .with_placement(self.aisle, self.position)
            .with_barcode(self.barcode)
            .with_image_url(self.image_url))
    }
}

#[derive(Debug, Deserialize)]
pub struct LowStockParams {
    pub threshold: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    pub q: String,
}

/// POST /add - create an item and remember its name, then back to the form
async fn add(
    State(state): State<AppState>,
    form: Result<Form<AddItemForm>, FormRejection>,
) -> Result<Redirect, ApiError> {
    let Form(form) = form.map_err(|e| ApiError::BadRequest {
        message: e.body_text(),
    })?;
    let item = form.into_new_item()?;

    let outcome = stockctl_core::add_item(&*state.repo, &item).await?;
    tracing::info!(
        item = item.name(),
        name_remembered = outcome.name_remembered,
        "item added"
    );

    Ok(Redirect::to("/"))
}

/// GET /items - active items as JSON
async fn list_items(State(state): State<AppState>) -> Result<Json<Vec<InventoryItem>>, ApiError> {
    Ok(Json(state.repo.list_active_items().await?))
}

/// GET /low?threshold=N - low-stock rows as JSON
async fn low_stock(
    State(state): State<AppState>,
    params: Result<Query<LowStockParams>, QueryRejection>,
) -> Result<Json<Vec<LowStockRow>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest {
        message: e.body_text(),
    })?;
    let threshold = params.threshold.unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD);

    Ok(Json(state.repo.low_stock(threshold).await?))
}

/// GET /suggest?q=... - catalog names containing q
async fn suggest(
    State(state): State<AppState>,
    params: Result<Query<SuggestParams>, QueryRejection>,
) -> Result<Json<Vec<NameSuggestion>>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::BadRequest {
        message: e.body_text(),
    })?;

    Ok(Json(state.repo.suggest_names(&params.q).await?))
}

/// Inventory routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/add", post(add))
        .route("/items", get(list_items))
        .route("/low", get(low_stock))
        .route("/suggest", get(suggest))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use stockctl_core::{MemoryRepository, Repository};
    use tower::ServiceExt;

    use crate::http::server::{build_router, AppState};

    fn app(repo: Arc<MemoryRepository>) -> axum::Router {
        build_router(AppState::new(repo))
    }

    async fn post_form(repo: Arc<MemoryRepository>, body: &str) -> Response {
        app(repo)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/add")
                    .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn get(repo: Arc<MemoryRepository>, uri: &str) -> Response {
        app(repo)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn add_redirects_and_item_is_listed() {
        let repo = Arc::new(MemoryRepository::new());

        let response = post_form(
            repo.clone(),
            "item=Tito%27s+Vodka&quantity=6&category=Vodka&aisle=A4&position=&location_type=shelf",
        )
        .await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let body = json(get(repo.clone(), "/items").await).await;
        let rows = body.as_array().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["item"], "Tito's Vodka");
        assert_eq!(rows[0]["quantity"], 6);
        assert_eq!(rows[0]["location_type"], "shelf");
        assert_eq!(rows[0]["aisle"], "A4");
        assert!(rows[0]["position"].is_null());

        let names = repo.suggest_names("Tito").await.unwrap();
        assert_eq!(names.len(), 1);
    }

    #[tokio::test]
    async fn add_accepts_short_field_names() {
        let repo = Arc::new(MemoryRepository::new());

        let response =
            post_form(repo.clone(), "item=Jameson&qty=2&cat=Whiskey&pos=Top&img=").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let items = repo.list_active_items().await.unwrap();
        assert_eq!(items[0].category.as_deref(), Some("Whiskey"));
        assert_eq!(items[0].position.as_deref(), Some("Top"));
        assert_eq!(items[0].location_type, "overstock");
        assert!(items[0].image_url.is_none());
    }

    #[tokio::test]
    async fn add_rejects_unknown_location() {
        let repo = Arc::new(MemoryRepository::new());

        let response = post_form(
            repo.clone(),
            "item=Jameson&quantity=2&location_type=basement",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(repo.list_active_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_rejects_blank_name_and_bad_quantity() {
        let repo = Arc::new(MemoryRepository::new());

        let response = post_form(repo.clone(), "item=++&quantity=2").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = post_form(repo.clone(), "item=Jameson&quantity=lots").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn add_succeeds_when_catalog_is_down() {
        let repo = Arc::new(MemoryRepository::new().with_catalog_offline());

        let response = post_form(repo.clone(), "item=Jameson&quantity=2").await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(repo.list_active_items().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn low_uses_default_threshold() {
        let repo = Arc::new(MemoryRepository::new());
        post_form(repo.clone(), "item=A&quantity=3").await;
        post_form(repo.clone(), "item=B&quantity=4").await;

        let body = json(get(repo.clone(), "/low").await).await;
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["item"], "A");

        let body = json(get(repo.clone(), "/low?threshold=10").await).await;
        assert_eq!(body.as_array().unwrap().len(), 2);

        let response = get(repo, "/low?threshold=many").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn suggest_returns_name_objects() {
        let repo = Arc::new(MemoryRepository::new());
        for name in ["Jim Beam", "Jameson", "Tito's Vodka"] {
            repo.remember_name(name).await.unwrap();
        }

        let body = json(get(repo.clone(), "/suggest?q=Ja").await).await;
        assert_eq!(body, serde_json::json!([{ "name": "Jameson" }]));

        let response = get(repo, "/suggest").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn offline_store_is_503() {
        let repo = Arc::new(MemoryRepository::offline());

        let response = get(repo.clone(), "/items").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json(response).await["error"], "storage_unavailable");

        let response = post_form(repo, "item=Jameson&quantity=2").await;
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn topstock_lists_only_overstock() {
        let repo = Arc::new(MemoryRepository::new());
        post_form(
            repo.clone(),
            "item=Shelved+Gin&quantity=1&location_type=shelf",
        )
        .await;
        post_form(repo.clone(), "item=Boxed+Rum&quantity=12").await;

        let html = text(get(repo, "/topstock").await).await;
        assert!(html.contains("Boxed Rum"));
        assert!(!html.contains("Shelved Gin"));
    }

    #[tokio::test]
    async fn index_escapes_item_names() {
        let repo = Arc::new(MemoryRepository::new());
        post_form(repo.clone(), "item=%3Cb%3Ebold%3C%2Fb%3E&quantity=1")
            .await;

        let response = get(repo, "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = text(response).await;
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[tokio::test]
    async fn nul_in_form_or_query_is_400() {
        let repo = Arc::new(MemoryRepository::new());

        let response = post_form(repo.clone(), "item=Gin%00&quantity=2").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"], "validation_error");

        let response = post_form(repo.clone(), "item=Gin&quantity=2&barcode=08%00").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(repo.list_active_items().await.unwrap().is_empty());

        let response = get(repo, "/suggest?q=%00").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json(response).await["error"], "validation_error");
    }
}

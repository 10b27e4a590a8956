//! Categories API endpoints.

use api_types::category::{CategoryCreate, CategoryKind, CategoryUpdate, CategoryView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use crate::{ServerError, server::ServerState};

fn map_kind(kind: engine::CategoryKind) -> CategoryKind {
    match kind {
        engine::CategoryKind::Income => CategoryKind::Income,
        engine::CategoryKind::Expense => CategoryKind::Expense,
    }
}

fn engine_kind(kind: CategoryKind) -> engine::CategoryKind {
    match kind {
        CategoryKind::Income => engine::CategoryKind::Income,
        CategoryKind::Expense => engine::CategoryKind::Expense,
    }
}

fn map_category(category: engine::Category) -> CategoryView {
    CategoryView {
        id: category.id,
        name: category.name,
        parent_id: category.parent_id,
        kind: map_kind(category.kind),
        subcategories: Vec::new(),
    }
}

fn map_tree(tree: engine::CategoryTree) -> CategoryView {
    let mut view = map_category(tree.category);
    view.subcategories = tree.subcategories.into_iter().map(map_category).collect();
    view
}

pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<CategoryView>>, ServerError> {
    let categories = state
        .engine
        .list_categories()
        .await?
        .into_iter()
        .map(map_tree)
        .collect();
    Ok(Json(categories))
}

pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<CategoryView>), ServerError> {
    let category = state
        .engine
        .create_category(&payload.name, payload.parent_id, payload.kind.map(engine_kind))
        .await?;
    Ok((StatusCode::CREATED, Json(map_category(category))))
}

pub async fn update(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
    Json(payload): Json<CategoryUpdate>,
) -> Result<Json<CategoryView>, ServerError> {
    let category = state
        .engine
        .rename_category(category_id, &payload.name)
        .await?;
    Ok(Json(map_category(category)))
}

pub async fn delete(
    State(state): State<ServerState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_category(category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

//! Budgets API endpoints.

use api_types::budget::{BudgetListQuery, BudgetUpsert, BudgetView};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{Datelike, Utc};

use crate::{ServerError, server::ServerState};
use engine::Period;

/// Resolves an optional month/year pair, defaulting to the current UTC
/// month/year. The "now" default lives here at the boundary; the engine only
/// ever sees explicit periods.
///
/// Out-of-range values resolve to `None`: the read endpoints answer those
/// with an empty list instead of an error, like an unrecognized kind.
pub(crate) fn resolve_period(month: Option<u32>, year: Option<i32>) -> Option<Period> {
    let today = Utc::now().date_naive();
    Period::new(
        month.unwrap_or_else(|| today.month()),
        year.unwrap_or_else(|| today.year()),
    )
    .ok()
}

fn map_budget(budget: engine::Budget) -> BudgetView {
    BudgetView {
        id: budget.id,
        category_id: budget.category_id,
        amount_minor: budget.amount_minor,
        month: budget.month,
        year: budget.year,
        created_at: budget.created_at,
    }
}

pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<BudgetListQuery>,
) -> Result<Json<Vec<BudgetView>>, ServerError> {
    let Some(period) = resolve_period(query.month, query.year) else {
        return Ok(Json(Vec::new()));
    };
    let budgets = state
        .engine
        .list_budgets(period)
        .await?
        .into_iter()
        .map(map_budget)
        .collect();
    Ok(Json(budgets))
}

/// Upserts the budget row for `(category, month, year)`: 201 on first write,
/// 200 when an existing amount was overwritten.
pub async fn upsert(
    State(state): State<ServerState>,
    Json(payload): Json<BudgetUpsert>,
) -> Result<(StatusCode, Json<BudgetView>), ServerError> {
    let period = Period::new(payload.month, payload.year)?;
    let (budget, created) = state
        .engine
        .upsert_budget(payload.category_id, payload.amount_minor, period)
        .await?;

    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(map_budget(budget))))
}

//! Report API endpoints.
//!
//! These handlers resolve the wall clock (missing month/year default to the
//! current UTC month/year) and convert the engine's minor-unit figures into
//! the major-unit floats the charts consume.

use api_types::report::{
    CategoryReportView, CategorySpendingView, MonthSpendingView, ReportQuery,
    SpendingComparisonResponse, SubcategoryReportView,
};
use axum::{
    Json,
    extract::{Query, State},
};
use chrono::Utc;

use crate::{ServerError, budgets::resolve_period, server::ServerState};
use engine::CategoryKind;

fn major(minor: i64) -> f64 {
    minor as f64 / 100.0
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// An absent kind defaults to expense; an unrecognized kind is `None`, which
/// the handlers answer with an empty row list rather than an error.
fn parse_kind(kind: Option<&str>) -> Option<CategoryKind> {
    match kind {
        None => Some(CategoryKind::Expense),
        Some(value) => CategoryKind::try_from(value).ok(),
    }
}

fn map_subcategory(row: engine::SubcategoryReport) -> SubcategoryReportView {
    SubcategoryReportView {
        category_id: row.id,
        category_name: row.name,
        budgeted: major(row.budgeted_minor),
        actual: major(row.actual_minor),
        difference: major(row.difference_minor),
    }
}

fn map_overview_row(row: engine::CategoryReport) -> CategoryReportView {
    CategoryReportView {
        category_id: row.id,
        category_name: row.name,
        budgeted: major(row.budgeted_minor),
        actual: major(row.actual_minor),
        difference: major(row.difference_minor),
        subcategory_count: row.subcategories.len(),
        subcategories: row.subcategories.into_iter().map(map_subcategory).collect(),
    }
}

fn map_spending_row(row: engine::CategoryReport) -> CategorySpendingView {
    CategorySpendingView {
        category_id: row.id,
        category_name: row.name,
        budgeted: major(row.budgeted_minor),
        actual: major(row.actual_minor),
        difference: major(row.difference_minor),
        percentage: round2(row.percentage),
        subcategory_count: row.subcategories.len(),
        subcategories: row.subcategories.into_iter().map(map_subcategory).collect(),
    }
}

fn map_month(spending: engine::PeriodSpending) -> MonthSpendingView {
    MonthSpendingView {
        month: spending.month,
        year: spending.year,
        data: spending.cumulative_minor.into_iter().map(major).collect(),
        budget: major(spending.budget_minor),
    }
}

pub async fn budget_overview(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<CategoryReportView>>, ServerError> {
    let Some(period) = resolve_period(query.month, query.year) else {
        return Ok(Json(Vec::new()));
    };
    let Some(kind) = parse_kind(query.kind.as_deref()) else {
        return Ok(Json(Vec::new()));
    };

    let rows = state
        .engine
        .budget_overview(period, kind)
        .await?
        .into_iter()
        .map(map_overview_row)
        .collect();
    Ok(Json(rows))
}

pub async fn category_spending(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Vec<CategorySpendingView>>, ServerError> {
    let Some(period) = resolve_period(query.month, query.year) else {
        return Ok(Json(Vec::new()));
    };
    let Some(kind) = parse_kind(query.kind.as_deref()) else {
        return Ok(Json(Vec::new()));
    };

    let rows = state
        .engine
        .category_spending(period, kind)
        .await?
        .into_iter()
        .map(map_spending_row)
        .collect();
    Ok(Json(rows))
}

pub async fn spending_comparison(
    State(state): State<ServerState>,
) -> Result<Json<SpendingComparisonResponse>, ServerError> {
    let today = Utc::now().date_naive();
    let comparison = state.engine.spending_comparison(today).await?;

    Ok(Json(SpendingComparisonResponse {
        days: comparison.days,
        current_month: map_month(comparison.current),
        previous_month: map_month(comparison.previous),
    }))
}

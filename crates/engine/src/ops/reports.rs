//! Report computations: budget-vs-actual rollups and the month-over-month
//! spending comparison.
//!
//! Everything here is a pure read-only function of the ledger state and the
//! explicit period/date parameters. Rollups never recurse past one level and
//! are computed on the fly, so a subcategory's amounts are counted exactly
//! once: in its own row and in the parent's combined totals.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use sea_orm::{
    ColumnTrait, EntityTrait, FromQueryResult, JoinType, QueryFilter, QuerySelect, RelationTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Category, CategoryKind, Period, ResultEngine, budgets, categories, transactions};

use super::Engine;

/// Own (not combined) figures for a single subcategory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryReport {
    pub id: Uuid,
    pub name: String,
    pub budgeted_minor: i64,
    pub actual_minor: i64,
    pub difference_minor: i64,
}

/// One report row per top-level category.
///
/// `budgeted_minor` and `actual_minor` combine the category's own figures
/// with those of all its direct subcategories; the nested rows keep their own
/// figures only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CategoryReport {
    pub id: Uuid,
    pub name: String,
    pub budgeted_minor: i64,
    pub actual_minor: i64,
    /// `actual - budgeted`; the caller interprets the sign per kind.
    pub difference_minor: i64,
    /// `actual / budgeted * 100`, or `0.0` whenever nothing is budgeted.
    ///
    /// The zero is a documented policy for avoiding division by zero, not a
    /// "no data" marker.
    pub percentage: f64,
    pub subcategories: Vec<SubcategoryReport>,
}

/// One month's cumulative expense curve plus its total expense budget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSpending {
    pub month: u32,
    pub year: i32,
    /// Running expense total per day, aligned with `SpendingComparison::days`.
    pub cumulative_minor: Vec<i64>,
    pub budget_minor: i64,
}

/// Current vs. previous month cumulative spending, truncated to the current
/// day of month so the two curves compare like for like.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpendingComparison {
    pub days: Vec<u32>,
    pub current: PeriodSpending,
    pub previous: PeriodSpending,
}

#[derive(FromQueryResult)]
struct SumRow {
    total: Option<i64>,
}

impl Engine {
    /// Budget-vs-actual rows for every top-level category of `kind` in the
    /// period.
    ///
    /// Categories without transactions or budgets still produce a row with
    /// zero figures.
    pub async fn budget_overview(
        &self,
        period: Period,
        kind: CategoryKind,
    ) -> ResultEngine<Vec<CategoryReport>> {
        self.category_rollup(period, kind).await
    }

    /// Same rollup as [`Engine::budget_overview`]; the spending view is the
    /// one that surfaces the percentage.
    pub async fn category_spending(
        &self,
        period: Period,
        kind: CategoryKind,
    ) -> ResultEngine<Vec<CategoryReport>> {
        self.category_rollup(period, kind).await
    }

    async fn category_rollup(
        &self,
        period: Period,
        kind: CategoryKind,
    ) -> ResultEngine<Vec<CategoryReport>> {
        let models = categories::Entity::find()
            .filter(categories::Column::Kind.eq(kind.as_str()))
            .all(&self.database)
            .await?;

        let mut tops: Vec<Category> = Vec::new();
        let mut children: Vec<Category> = Vec::new();
        for model in models {
            let category = Category::try_from(model)?;
            if category.is_top_level() {
                tops.push(category);
            } else {
                children.push(category);
            }
        }

        let mut rows = Vec::with_capacity(tops.len());
        for top in tops {
            let (own_actual, own_budgeted) =
                self.period_totals(top.id, kind.into(), period).await?;

            let mut subcategories = Vec::new();
            let mut combined_actual = own_actual;
            let mut combined_budgeted = own_budgeted;
            for sub in children.iter().filter(|c| c.parent_id == Some(top.id)) {
                let (sub_actual, sub_budgeted) =
                    self.period_totals(sub.id, kind.into(), period).await?;
                combined_actual += sub_actual;
                combined_budgeted += sub_budgeted;
                subcategories.push(SubcategoryReport {
                    id: sub.id,
                    name: sub.name.clone(),
                    budgeted_minor: sub_budgeted,
                    actual_minor: sub_actual,
                    difference_minor: sub_actual - sub_budgeted,
                });
            }

            rows.push(CategoryReport {
                id: top.id,
                name: top.name,
                budgeted_minor: combined_budgeted,
                actual_minor: combined_actual,
                difference_minor: combined_actual - combined_budgeted,
                percentage: percentage(combined_actual, combined_budgeted),
                subcategories,
            });
        }

        Ok(rows)
    }

    /// `(actual, budgeted)` minor-unit totals for one category in a period.
    async fn period_totals(
        &self,
        category_id: Uuid,
        kind: crate::TransactionKind,
        period: Period,
    ) -> ResultEngine<(i64, i64)> {
        let (start, end) = period.date_range()?;

        let actual = transactions::Entity::find()
            .select_only()
            .column_as(transactions::Column::AmountMinor.sum(), "total")
            .filter(transactions::Column::CategoryId.eq(category_id))
            .filter(transactions::Column::Kind.eq(kind.as_str()))
            .filter(transactions::Column::Date.gte(start))
            .filter(transactions::Column::Date.lt(end))
            .into_model::<SumRow>()
            .one(&self.database)
            .await?
            .and_then(|row| row.total)
            .unwrap_or(0);

        let budgeted = budgets::Entity::find()
            .filter(budgets::Column::CategoryId.eq(category_id))
            .filter(budgets::Column::Month.eq(period.month() as i32))
            .filter(budgets::Column::Year.eq(period.year()))
            .one(&self.database)
            .await?
            .map(|model| model.amount_minor)
            .unwrap_or(0);

        Ok((actual, budgeted))
    }

    /// Cumulative expense curves for the month of `today` and the month
    /// before it, both truncated to `today`'s day of month.
    pub async fn spending_comparison(&self, today: NaiveDate) -> ResultEngine<SpendingComparison> {
        let current = Period::from_date(today);
        let previous = current.previous();
        let days: Vec<u32> = (1..=today.day()).collect();

        let current_spending = self.period_spending(current, &days).await?;
        let previous_spending = self.period_spending(previous, &days).await?;

        Ok(SpendingComparison {
            days,
            current: current_spending,
            previous: previous_spending,
        })
    }

    async fn period_spending(&self, period: Period, days: &[u32]) -> ResultEngine<PeriodSpending> {
        let daily = self.daily_expense_totals(period).await?;

        let mut cumulative_minor = Vec::with_capacity(days.len());
        let mut running = 0i64;
        for day in days {
            running += daily.get(day).copied().unwrap_or(0);
            cumulative_minor.push(running);
        }

        Ok(PeriodSpending {
            month: period.month(),
            year: period.year(),
            cumulative_minor,
            budget_minor: self.expense_budget_total(period).await?,
        })
    }

    /// Sparse day-of-month map of expense totals; days without expenses are
    /// absent rather than zero.
    async fn daily_expense_totals(&self, period: Period) -> ResultEngine<HashMap<u32, i64>> {
        let (start, end) = period.date_range()?;

        let models = transactions::Entity::find()
            .filter(transactions::Column::Kind.eq(crate::TransactionKind::Expense.as_str()))
            .filter(transactions::Column::Date.gte(start))
            .filter(transactions::Column::Date.lt(end))
            .all(&self.database)
            .await?;

        let mut totals = HashMap::new();
        for model in models {
            *totals.entry(model.date.day()).or_insert(0) += model.amount_minor;
        }
        Ok(totals)
    }

    /// Flat sum of every budget attached to an expense category in the
    /// period. Parent and subcategory budgets each count once; no rollup.
    async fn expense_budget_total(&self, period: Period) -> ResultEngine<i64> {
        let total = budgets::Entity::find()
            .select_only()
            .column_as(budgets::Column::AmountMinor.sum(), "total")
            .join(JoinType::InnerJoin, budgets::Relation::Categories.def())
            .filter(budgets::Column::Month.eq(period.month() as i32))
            .filter(budgets::Column::Year.eq(period.year()))
            .filter(categories::Column::Kind.eq(CategoryKind::Expense.as_str()))
            .into_model::<SumRow>()
            .one(&self.database)
            .await?
            .and_then(|row| row.total)
            .unwrap_or(0);

        Ok(total)
    }
}

fn percentage(actual_minor: i64, budgeted_minor: i64) -> f64 {
    if budgeted_minor > 0 {
        (actual_minor as f64 / budgeted_minor as f64) * 100.0
    } else {
        0.0
    }
}

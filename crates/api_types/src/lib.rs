//! Request/response types shared between the server and its clients.
//!
//! CRUD payloads carry amounts in minor units (`amount_minor`, integer
//! cents); the report responses expose major-unit floats rounded to two
//! decimals, which is what the charts consume.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod category {
    use super::*;

    /// Category kind as it travels over the wire.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum CategoryKind {
        Income,
        #[default]
        Expense,
    }

    impl CategoryKind {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Income => "income",
                Self::Expense => "expense",
            }
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryCreate {
        pub name: String,
        pub parent_id: Option<Uuid>,
        /// Optional; subcategories inherit the parent's kind, top-level
        /// categories default to `expense`.
        pub kind: Option<CategoryKind>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryView {
        pub id: Uuid,
        pub name: String,
        pub parent_id: Option<Uuid>,
        pub kind: CategoryKind,
        pub subcategories: Vec<CategoryView>,
    }
}

pub mod transaction {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum TransactionKind {
        Income,
        Expense,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionCreate {
        pub description: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub kind: TransactionKind,
        pub category_id: Option<Uuid>,
        pub note: Option<String>,
    }

    /// Partial update. Omitted fields stay untouched; for `category_id` and
    /// `note` an explicit JSON `null` clears the value.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct TransactionUpdate {
        pub description: Option<String>,
        pub amount_minor: Option<i64>,
        pub date: Option<NaiveDate>,
        pub kind: Option<TransactionKind>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub category_id: Option<Option<Uuid>>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        pub note: Option<Option<String>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TransactionView {
        pub id: Uuid,
        pub description: String,
        pub amount_minor: i64,
        pub date: NaiveDate,
        pub kind: TransactionKind,
        pub category_id: Option<Uuid>,
        pub note: Option<String>,
        pub created_at: DateTime<Utc>,
    }
}

pub mod budget {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetUpsert {
        pub category_id: Uuid,
        pub amount_minor: i64,
        pub month: u32,
        pub year: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetListQuery {
        pub month: Option<u32>,
        pub year: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct BudgetView {
        pub id: Uuid,
        pub category_id: Uuid,
        pub amount_minor: i64,
        pub month: u32,
        pub year: i32,
        pub created_at: DateTime<Utc>,
    }
}

pub mod report {
    use super::*;

    /// Query parameters shared by the report endpoints.
    ///
    /// Missing month/year default to the current UTC month/year; a missing
    /// kind defaults to `expense`. An unrecognized kind or an out-of-range
    /// month/year is answered with an empty row list rather than an error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct ReportQuery {
        pub month: Option<u32>,
        pub year: Option<i32>,
        pub kind: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SubcategoryReportView {
        pub category_id: Uuid,
        pub category_name: String,
        pub budgeted: f64,
        pub actual: f64,
        pub difference: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategoryReportView {
        pub category_id: Uuid,
        pub category_name: String,
        /// Category budget plus all direct subcategory budgets.
        pub budgeted: f64,
        /// Category actuals plus all direct subcategory actuals.
        pub actual: f64,
        pub difference: f64,
        pub subcategory_count: usize,
        pub subcategories: Vec<SubcategoryReportView>,
    }

    /// Category-spending row: the overview row plus the percent-of-budget
    /// figure (`0.0` when nothing is budgeted).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CategorySpendingView {
        pub category_id: Uuid,
        pub category_name: String,
        pub budgeted: f64,
        pub actual: f64,
        pub difference: f64,
        pub percentage: f64,
        pub subcategory_count: usize,
        pub subcategories: Vec<SubcategoryReportView>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct MonthSpendingView {
        pub month: u32,
        pub year: i32,
        /// Cumulative spending per day, aligned with `days`.
        pub data: Vec<f64>,
        pub budget: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SpendingComparisonResponse {
        pub days: Vec<u32>,
        pub current_month: MonthSpendingView,
        pub previous_month: MonthSpendingView,
    }
}

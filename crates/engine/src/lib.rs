//! Domain engine for the finance tracker.
//!
//! The engine owns the database and exposes every operation the HTTP layer
//! needs: category/transaction/budget CRUD plus the two report computations
//! (budget-vs-actual rollups and the month-over-month spending comparison).
//! Reports are pure read-only functions of the ledger state and the explicit
//! period/date parameters they receive.

pub use budgets::Budget;
pub use categories::{Category, CategoryKind};
pub use error::EngineError;
pub use ops::{
    CategoryReport, CategoryTree, Engine, EngineBuilder, NewTransaction, PeriodSpending,
    SpendingComparison, SubcategoryReport, TransactionUpdate,
};
pub use period::Period;
pub use transactions::{Transaction, TransactionKind};

pub mod budgets;
pub mod categories;
mod error;
mod ops;
mod period;
pub mod transactions;

type ResultEngine<T> = Result<T, EngineError>;

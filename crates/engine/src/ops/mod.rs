use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

mod budgets;
mod categories;
mod reports;
mod transactions;

pub use categories::CategoryTree;
pub use reports::{CategoryReport, PeriodSpending, SpendingComparison, SubcategoryReport};
pub use transactions::{NewTransaction, TransactionUpdate};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    /// Load a category row, failing with `KeyNotFound` when absent.
    pub(crate) async fn find_category<C>(
        db: &C,
        category_id: Uuid,
    ) -> ResultEngine<crate::categories::Model>
    where
        C: sea_orm::ConnectionTrait,
    {
        use sea_orm::EntityTrait;

        crate::categories::Entity::find_by_id(category_id)
            .one(db)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("category not exists".to_string()))
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> Engine {
        Engine {
            database: self.database,
        }
    }
}

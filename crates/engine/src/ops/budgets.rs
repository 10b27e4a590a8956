//! Budget operations.

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
    prelude::*,
};
use uuid::Uuid;

use crate::{Budget, Period, ResultEngine, budgets};

use super::{Engine, with_tx};

impl Engine {
    /// Sets the budget for a category in a given period.
    ///
    /// At most one row exists per `(category, month, year)`: when a row is
    /// already present its amount is overwritten and `created` is `false`.
    /// The write is a single atomic transaction.
    pub async fn upsert_budget(
        &self,
        category_id: Uuid,
        amount_minor: i64,
        period: Period,
    ) -> ResultEngine<(Budget, bool)> {
        with_tx!(self, |db_tx| {
            Self::find_category(&db_tx, category_id).await?;

            let existing = budgets::Entity::find()
                .filter(budgets::Column::CategoryId.eq(category_id))
                .filter(budgets::Column::Month.eq(period.month() as i32))
                .filter(budgets::Column::Year.eq(period.year()))
                .one(&db_tx)
                .await?;

            match existing {
                Some(model) => {
                    if amount_minor < 0 {
                        return Err(crate::EngineError::InvalidAmount(
                            "amount_minor must be >= 0".to_string(),
                        ));
                    }
                    let mut active = model.into_active_model();
                    active.amount_minor = ActiveValue::Set(amount_minor);
                    let updated = active.update(&db_tx).await?;
                    tracing::debug!(
                        %category_id,
                        month = period.month(),
                        year = period.year(),
                        "budget overwritten"
                    );
                    Ok((Budget::from(updated), false))
                }
                None => {
                    let budget = Budget::new(category_id, amount_minor, period, Utc::now())?;
                    budgets::ActiveModel::from(&budget).insert(&db_tx).await?;
                    tracing::debug!(
                        %category_id,
                        month = period.month(),
                        year = period.year(),
                        "budget created"
                    );
                    Ok((budget, true))
                }
            }
        })
    }

    /// Lists the budgets allocated for a period.
    pub async fn list_budgets(&self, period: Period) -> ResultEngine<Vec<Budget>> {
        let models = budgets::Entity::find()
            .filter(budgets::Column::Month.eq(period.month() as i32))
            .filter(budgets::Column::Year.eq(period.year()))
            .all(&self.database)
            .await?;

        Ok(models.into_iter().map(Budget::from).collect())
    }
}

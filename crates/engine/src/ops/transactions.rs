//! Transaction operations.

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveValue, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, QueryOrder,
    TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, Transaction, TransactionKind, transactions};

use super::{Engine, with_tx};

/// Input for creating a transaction.
#[derive(Clone, Debug)]
pub struct NewTransaction {
    pub description: String,
    pub amount_minor: i64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
}

/// Partial update for a transaction.
///
/// Outer `None` leaves a field untouched; for the nullable fields the inner
/// option distinguishes "set" from "clear".
#[derive(Clone, Debug, Default)]
pub struct TransactionUpdate {
    pub description: Option<String>,
    pub amount_minor: Option<i64>,
    pub date: Option<NaiveDate>,
    pub kind: Option<TransactionKind>,
    pub category_id: Option<Option<Uuid>>,
    pub note: Option<Option<String>>,
}

impl Engine {
    /// Records a new transaction. The referenced category, when given, must
    /// exist.
    pub async fn create_transaction(&self, new: NewTransaction) -> ResultEngine<Transaction> {
        with_tx!(self, |db_tx| {
            if let Some(category_id) = new.category_id {
                Self::find_category(&db_tx, category_id).await?;
            }

            let tx = Transaction::new(
                &new.description,
                new.amount_minor,
                new.date,
                new.kind,
                new.category_id,
                new.note,
                Utc::now(),
            )?;
            transactions::ActiveModel::from(&tx).insert(&db_tx).await?;
            Ok(tx)
        })
    }

    /// Applies a partial update to an existing transaction.
    pub async fn update_transaction(
        &self,
        transaction_id: Uuid,
        update: TransactionUpdate,
    ) -> ResultEngine<Transaction> {
        if let Some(amount_minor) = update.amount_minor
            && amount_minor <= 0
        {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = transactions::Entity::find_by_id(transaction_id)
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("transaction not exists".to_string()))?;

            if let Some(Some(category_id)) = update.category_id {
                Self::find_category(&db_tx, category_id).await?;
            }

            let mut active = model.into_active_model();
            if let Some(description) = update.description {
                let trimmed = description.trim();
                if trimmed.is_empty() {
                    return Err(EngineError::InvalidName(
                        "description must not be empty".to_string(),
                    ));
                }
                active.description = ActiveValue::Set(trimmed.to_string());
            }
            if let Some(amount_minor) = update.amount_minor {
                active.amount_minor = ActiveValue::Set(amount_minor);
            }
            if let Some(date) = update.date {
                active.date = ActiveValue::Set(date);
            }
            if let Some(kind) = update.kind {
                active.kind = ActiveValue::Set(kind.as_str().to_string());
            }
            if let Some(category_id) = update.category_id {
                active.category_id = ActiveValue::Set(category_id);
            }
            if let Some(note) = update.note {
                active.note = ActiveValue::Set(note);
            }

            let updated = active.update(&db_tx).await?;
            Transaction::try_from(updated)
        })
    }

    /// Deletes a transaction.
    pub async fn delete_transaction(&self, transaction_id: Uuid) -> ResultEngine<()> {
        let result = transactions::Entity::delete_by_id(transaction_id)
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound(
                "transaction not exists".to_string(),
            ));
        }
        tracing::debug!(%transaction_id, "transaction deleted");
        Ok(())
    }

    /// Lists all transactions, most recent date first.
    pub async fn list_transactions(&self) -> ResultEngine<Vec<Transaction>> {
        let models = transactions::Entity::find()
            .order_by_desc(transactions::Column::Date)
            .order_by_desc(transactions::Column::CreatedAt)
            .all(&self.database)
            .await?;

        models.into_iter().map(Transaction::try_from).collect()
    }
}

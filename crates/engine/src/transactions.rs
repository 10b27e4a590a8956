//! Ledger transactions.
//!
//! A `Transaction` is a flat, dated record. The amount is stored in **minor
//! units** (cents) and is always positive: direction is carried by the
//! income/expense kind, never by the sign of the amount.

use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl TryFrom<&str> for TransactionKind {
    type Error = EngineError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            other => Err(EngineError::InvalidName(format!(
                "invalid transaction kind: {other}"
            ))),
        }
    }
}

/// A category's kind selects the matching transaction kind in reports.
impl From<crate::CategoryKind> for TransactionKind {
    fn from(kind: crate::CategoryKind) -> Self {
        match kind {
            crate::CategoryKind::Income => Self::Income,
            crate::CategoryKind::Expense => Self::Expense,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub description: String,
    pub amount_minor: i64,
    pub date: NaiveDate,
    pub kind: TransactionKind,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        description: &str,
        amount_minor: i64,
        date: NaiveDate,
        kind: TransactionKind,
        category_id: Option<Uuid>,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount_minor <= 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be > 0".to_string(),
            ));
        }
        let description = description.trim();
        if description.is_empty() {
            return Err(EngineError::InvalidName(
                "description must not be empty".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            description: description.to_string(),
            amount_minor,
            date,
            kind,
            category_id,
            note,
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub description: String,
    pub amount_minor: i64,
    pub date: Date,
    pub kind: String,
    pub category_id: Option<Uuid>,
    pub note: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Categories,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Transaction {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: model.id,
            description: model.description,
            amount_minor: model.amount_minor,
            date: model.date,
            kind: TransactionKind::try_from(model.kind.as_str())?,
            category_id: model.category_id,
            note: model.note,
            created_at: model.created_at,
        })
    }
}

impl From<&Transaction> for ActiveModel {
    fn from(tx: &Transaction) -> Self {
        Self {
            id: ActiveValue::Set(tx.id),
            description: ActiveValue::Set(tx.description.clone()),
            amount_minor: ActiveValue::Set(tx.amount_minor),
            date: ActiveValue::Set(tx.date),
            kind: ActiveValue::Set(tx.kind.as_str().to_string()),
            category_id: ActiveValue::Set(tx.category_id),
            note: ActiveValue::Set(tx.note.clone()),
            created_at: ActiveValue::Set(tx.created_at),
        }
    }
}

//! Monthly budget allocations.
//!
//! At most one budget row exists per `(category_id, month, year)`; the
//! uniqueness is backed by an index and writes go through an upsert that
//! overwrites the existing amount instead of duplicating the row.

use chrono::{DateTime, Utc};
use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, Period, ResultEngine};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub month: u32,
    pub year: i32,
    pub created_at: DateTime<Utc>,
}

impl Budget {
    pub fn new(
        category_id: Uuid,
        amount_minor: i64,
        period: Period,
        created_at: DateTime<Utc>,
    ) -> ResultEngine<Self> {
        if amount_minor < 0 {
            return Err(EngineError::InvalidAmount(
                "amount_minor must be >= 0".to_string(),
            ));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            category_id,
            amount_minor,
            month: period.month(),
            year: period.year(),
            created_at,
        })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub amount_minor: i64,
    pub month: i32,
    pub year: i32,
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

impl From<Model> for Budget {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            amount_minor: model.amount_minor,
            month: model.month as u32,
            year: model.year,
            created_at: model.created_at,
        }
    }
}

impl From<&Budget> for ActiveModel {
    fn from(budget: &Budget) -> Self {
        Self {
            id: ActiveValue::Set(budget.id),
            category_id: ActiveValue::Set(budget.category_id),
            amount_minor: ActiveValue::Set(budget.amount_minor),
            month: ActiveValue::Set(budget.month as i32),
            year: ActiveValue::Set(budget.year),
            created_at: ActiveValue::Set(budget.created_at),
        }
    }
}

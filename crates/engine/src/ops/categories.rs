//! Category operations.
//!
//! The hierarchy is fixed at one level: only a top-level category can be a
//! parent, and a subcategory always carries its parent's kind. Both rules are
//! enforced here at creation time so the report rollups never have to deal
//! with deeper nesting or mixed-kind groups.

use sea_orm::{
    ActiveValue, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Category, CategoryKind, EngineError, ResultEngine, budgets, categories, transactions,
};

use super::{Engine, with_tx};

/// A top-level category together with its direct subcategories.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTree {
    pub category: Category,
    pub subcategories: Vec<Category>,
}

impl Engine {
    /// Creates a category, optionally nested under a top-level parent.
    ///
    /// When `parent_id` is set the parent must exist and be top-level, and an
    /// explicit `kind` must match the parent's. When `kind` is omitted it is
    /// inherited from the parent, or defaults to expense for top-level
    /// categories.
    pub async fn create_category(
        &self,
        name: &str,
        parent_id: Option<Uuid>,
        kind: Option<CategoryKind>,
    ) -> ResultEngine<Category> {
        with_tx!(self, |db_tx| {
            let resolved_kind = match parent_id {
                Some(parent_id) => {
                    let parent = Self::find_category(&db_tx, parent_id).await?;
                    if parent.parent_id.is_some() {
                        return Err(EngineError::InvalidParent(
                            "parent must be a top-level category".to_string(),
                        ));
                    }
                    let parent_kind = CategoryKind::try_from(parent.kind.as_str())?;
                    if let Some(kind) = kind
                        && kind != parent_kind
                    {
                        return Err(EngineError::InvalidParent(format!(
                            "subcategory kind must match parent kind {}",
                            parent_kind.as_str()
                        )));
                    }
                    parent_kind
                }
                None => kind.unwrap_or_default(),
            };

            let category = Category::new(name, parent_id, resolved_kind)?;
            categories::ActiveModel::from(&category).insert(&db_tx).await?;
            Ok(category)
        })
    }

    /// Renames a category.
    pub async fn rename_category(&self, category_id: Uuid, name: &str) -> ResultEngine<Category> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(EngineError::InvalidName(
                "category name must not be empty".to_string(),
            ));
        }

        with_tx!(self, |db_tx| {
            let model = Self::find_category(&db_tx, category_id).await?;
            let mut active = model.into_active_model();
            active.name = ActiveValue::Set(trimmed.to_string());
            let updated = active.update(&db_tx).await?;
            Category::try_from(updated)
        })
    }

    /// Deletes a category together with its subcategories and every
    /// transaction and budget attached to any of them.
    ///
    /// The cascade is applied explicitly instead of leaning on the store's
    /// foreign keys so the behavior does not depend on connection pragmas.
    pub async fn delete_category(&self, category_id: Uuid) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            Self::find_category(&db_tx, category_id).await?;

            let subcategory_ids: Vec<Uuid> = categories::Entity::find()
                .filter(categories::Column::ParentId.eq(category_id))
                .all(&db_tx)
                .await?
                .into_iter()
                .map(|model| model.id)
                .collect();

            let mut doomed = subcategory_ids;
            doomed.push(category_id);
            tracing::debug!(
                %category_id,
                subcategories = doomed.len() - 1,
                "deleting category tree"
            );

            transactions::Entity::delete_many()
                .filter(transactions::Column::CategoryId.is_in(doomed.clone()))
                .exec(&db_tx)
                .await?;
            budgets::Entity::delete_many()
                .filter(budgets::Column::CategoryId.is_in(doomed.clone()))
                .exec(&db_tx)
                .await?;
            categories::Entity::delete_many()
                .filter(categories::Column::Id.is_in(doomed))
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Lists top-level categories with their subcategories attached, in
    /// natural query order.
    pub async fn list_categories(&self) -> ResultEngine<Vec<CategoryTree>> {
        let models = categories::Entity::find().all(&self.database).await?;

        let mut tops: Vec<CategoryTree> = Vec::new();
        let mut children: Vec<Category> = Vec::new();
        for model in models {
            let category = Category::try_from(model)?;
            if category.is_top_level() {
                tops.push(CategoryTree {
                    category,
                    subcategories: Vec::new(),
                });
            } else {
                children.push(category);
            }
        }

        for child in children {
            if let Some(tree) = tops
                .iter_mut()
                .find(|tree| Some(tree.category.id) == child.parent_id)
            {
                tree.subcategories.push(child);
            }
        }

        Ok(tops)
    }
}

use crate::entities::food_item_entity as foods;
use crate::error::{AppError, AppResult};
use crate::models::{FoodCategory, NewFoodItem};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};

/// Nutrition guide entries, maintained by the coach and read by everyone.
#[derive(Clone)]
pub struct FoodService {
    pool: DatabaseConnection,
}

impl FoodService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn add(&self, new: NewFoodItem) -> AppResult<foods::Model> {
        let item = foods::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            category: Set(new.category),
            nutrition: Set(new.nutrition),
            details: Set(new.details),
            ..Default::default()
        };
        let item = item.insert(&self.pool).await?;
        Ok(item)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<foods::Model>> {
        let item = foods::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(item)
    }

    pub async fn update(&self, item: foods::Model) -> AppResult<foods::Model> {
        foods::Entity::find_by_id(item.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("food item {}", item.id)))?;

        let model = foods::ActiveModel {
            id: Set(item.id),
            name: Set(item.name),
            description: Set(item.description),
            category: Set(item.category),
            nutrition: Set(item.nutrition),
            details: Set(item.details),
        };
        let updated = model.update(&self.pool).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let item = foods::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("food item {id}")))?;
        item.delete(&self.pool).await?;
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<foods::Model>> {
        let rows = foods::Entity::find().all(&self.pool).await?;
        Ok(rows)
    }

    pub async fn list_by_category(&self, category: FoodCategory) -> AppResult<Vec<foods::Model>> {
        let rows = foods::Entity::find()
            .filter(foods::Column::Category.eq(category))
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}

use crate::models::{FoodCategory, FoodDetails, Localized, NutritionFacts};
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "food_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Localized,
    pub description: Localized,
    pub category: FoodCategory,
    pub nutrition: NutritionFacts,
    pub details: FoodDetails,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

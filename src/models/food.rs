use crate::models::Localized;
use sea_orm::{DeriveActiveEnum, EnumIter, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    #[sea_orm(string_value = "protein")]
    Protein,
    #[sea_orm(string_value = "carbohydrate")]
    Carbohydrate,
    #[sea_orm(string_value = "vegetable")]
    Vegetable,
    #[sea_orm(string_value = "fruit")]
    Fruit,
    #[sea_orm(string_value = "dairy")]
    Dairy,
    #[sea_orm(string_value = "fat")]
    Fat,
    #[sea_orm(string_value = "snack")]
    Snack,
}

/// Per 100 g.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct FoodDetails {
    pub benefits: Localized,
    pub recommendation: Localized,
    pub allergens: Localized,
}

/// Payload for creating a food item; the store assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFoodItem {
    pub name: Localized,
    pub description: Localized,
    pub category: FoodCategory,
    pub nutrition: NutritionFacts,
    pub details: FoodDetails,
}

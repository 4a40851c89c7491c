use crate::models::Localized;
use sea_orm::{DeriveActiveEnum, EnumIter, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    #[sea_orm(string_value = "beginner")]
    Beginner,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "advanced")]
    Advanced,
}

/// Ordered instruction steps, one bilingual pair per step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Instructions(pub Vec<Localized>);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewExercise {
    pub name: Localized,
    pub description: Localized,
    pub muscle_group: Localized,
    pub difficulty: Difficulty,
    pub instructions: Instructions,
    pub image_url: String,
    pub video_url: Option<String>,
    pub video_data_url: Option<String>,
}

/// Lookup criteria used by the AI-integration layer when it assembles a
/// workout plan. Both fields optional; `None` matches everything.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseCriteria {
    pub difficulty: Option<Difficulty>,
    pub muscle_group: Option<String>,
}

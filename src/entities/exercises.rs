use crate::models::{Difficulty, Instructions, Localized};
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize)]
#[sea_orm(table_name = "exercises")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: Localized,
    pub description: Localized,
    pub muscle_group: Localized,
    pub difficulty: Difficulty,
    pub instructions: Instructions,
    pub image_url: String,
    pub video_url: Option<String>,
    pub video_data_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

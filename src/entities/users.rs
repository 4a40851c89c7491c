use crate::models::{ActiveSectionIds, AssignedSpecialists, SubscriptionTier};
use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    /// Stored normalized: trimmed and lowercased. Unique.
    pub email: String,
    /// Plaintext, compared byte-for-byte at login. Existing client data
    /// already stores it this way, so hashing would strand every account.
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub picture: Option<String>,
    pub is_coach: bool,
    pub subscription_tier: SubscriptionTier,
    pub subscription_end_date: Option<DateTime<Utc>>,
    pub trial_used: bool,
    pub points: i64,
    pub weekly_workout_count: i64,
    pub last_workout_date: Option<NaiveDate>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub place_of_birth: Option<String>,
    pub phone_number: Option<String>,
    pub assigned_specialists: AssignedSpecialists,
    pub active_section_ids: ActiveSectionIds,
    #[serde(skip_serializing)]
    pub email_reset_token: Option<String>,
    pub email_reset_token_expires: Option<DateTime<Utc>>,
    pub is_new_user: bool,
    pub created_at: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

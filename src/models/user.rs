use chrono::{DateTime, NaiveDate, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{DeriveActiveEnum, EnumIter, FromJsonQueryResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, DeriveActiveEnum, EnumIter)]
#[sea_orm(rs_type = "String", db_type = "String(None)")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[sea_orm(string_value = "free")]
    Free,
    #[sea_orm(string_value = "silver")]
    Silver,
    #[sea_orm(string_value = "gold")]
    Gold,
    #[sea_orm(string_value = "platinum")]
    Platinum,
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubscriptionTier::Free => write!(f, "free"),
            SubscriptionTier::Silver => write!(f, "silver"),
            SubscriptionTier::Gold => write!(f, "gold"),
            SubscriptionTier::Platinum => write!(f, "platinum"),
        }
    }
}

/// Specialists a coach can assign to a client.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct AssignedSpecialists {
    pub trainer: bool,
    pub dietitian: bool,
    pub physiotherapist: bool,
}

/// Dashboard sections a user has switched on.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct ActiveSectionIds(pub Vec<i64>);

/// Identity details collected by the verification flow. A user counts as
/// verified once `full_name` is stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationDetails {
    pub full_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub place_of_birth: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// No user loaded yet.
    Loading,
    Active,
    Expired,
}

/// Read-only view the UI derives its flags from, recomputed whenever the
/// loaded user record changes.
#[derive(Debug, Clone, Serialize)]
pub struct AuthSnapshot {
    pub user: crate::entities::users::Model,
    pub session_token: String,
    pub is_coach: bool,
    pub is_verified: bool,
    pub subscription_status: SubscriptionStatus,
    /// Whole-day ceiling of time left on the subscription, for display.
    pub days_remaining: Option<i64>,
}

impl AuthSnapshot {
    pub fn derive(user: crate::entities::users::Model, session_token: String) -> Self {
        let now = Utc::now();
        let (subscription_status, days_remaining) = derive_subscription(&user, now);
        Self {
            is_coach: user.is_coach,
            is_verified: user.full_name.is_some(),
            subscription_status,
            days_remaining,
            session_token,
            user,
        }
    }
}

/// Coaches carry an implicit active platinum subscription; everyone else is
/// active iff the end date is strictly in the future.
pub fn derive_subscription(
    user: &crate::entities::users::Model,
    now: DateTime<Utc>,
) -> (SubscriptionStatus, Option<i64>) {
    if user.is_coach {
        let days = user
            .subscription_end_date
            .map(|end| days_remaining_ceil(end, now));
        return (SubscriptionStatus::Active, days);
    }
    match user.subscription_end_date {
        Some(end) if end > now => (
            SubscriptionStatus::Active,
            Some(days_remaining_ceil(end, now)),
        ),
        _ => (SubscriptionStatus::Expired, None),
    }
}

fn days_remaining_ceil(end: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = (end - now).num_seconds();
    if secs <= 0 {
        return 0;
    }
    (secs + 86_399) / 86_400
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user_with_end(end: Option<DateTime<Utc>>, is_coach: bool) -> crate::entities::users::Model {
        crate::entities::users::Model {
            id: 1,
            name: "t".into(),
            email: "t@x.com".into(),
            password: Some("pw".into()),
            picture: None,
            is_coach,
            subscription_tier: SubscriptionTier::Free,
            subscription_end_date: end,
            trial_used: false,
            points: 0,
            weekly_workout_count: 0,
            last_workout_date: None,
            full_name: None,
            date_of_birth: None,
            place_of_birth: None,
            phone_number: None,
            assigned_specialists: AssignedSpecialists::default(),
            active_section_ids: ActiveSectionIds::default(),
            email_reset_token: None,
            email_reset_token_expires: None,
            is_new_user: false,
            created_at: Utc::now(),
            last_login: None,
        }
    }

    #[test]
    fn test_subscription_active_just_before_expiry() {
        let now = Utc::now();
        let user = user_with_end(Some(now + Duration::milliseconds(1)), false);
        let (status, _) = derive_subscription(&user, now);
        assert_eq!(status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_subscription_expired_just_after_expiry() {
        let now = Utc::now();
        let user = user_with_end(Some(now - Duration::milliseconds(1)), false);
        let (status, days) = derive_subscription(&user, now);
        assert_eq!(status, SubscriptionStatus::Expired);
        assert_eq!(days, None);
    }

    #[test]
    fn test_subscription_no_end_date_is_expired() {
        let now = Utc::now();
        let (status, _) = derive_subscription(&user_with_end(None, false), now);
        assert_eq!(status, SubscriptionStatus::Expired);
    }

    #[test]
    fn test_coach_always_active() {
        let now = Utc::now();
        let (status, _) = derive_subscription(&user_with_end(None, true), now);
        assert_eq!(status, SubscriptionStatus::Active);
    }

    #[test]
    fn test_days_remaining_is_whole_day_ceiling() {
        let now = Utc::now();
        let user = user_with_end(Some(now + Duration::hours(25)), false);
        let (_, days) = derive_subscription(&user, now);
        assert_eq!(days, Some(2));

        let user = user_with_end(Some(now + Duration::hours(23)), false);
        let (_, days) = derive_subscription(&user, now);
        assert_eq!(days, Some(1));
    }
}

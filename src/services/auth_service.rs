use crate::config::SeedConfig;
use crate::entities::user_entity as users;
use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, EventBus};
use crate::models::{
    ActiveSectionIds, AssignedSpecialists, AuthSnapshot, LoginStatus, MessageChannel, MessageKind,
    SubscriptionStatus, SubscriptionTier, VerificationDetails, UNKNOWN_USER_ID,
};
use crate::services::{ActivityService, MessageService, SessionService, UserService};
use crate::session::SessionAnchor;
use crate::utils::normalize_email;
use chrono::{DateTime, Datelike, Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Device string recorded in the audit log. There is no server to observe
/// anything better.
const DEVICE: &str = "web-client";

/// Seeded coach subscriptions effectively never expire.
const COACH_SUBSCRIPTION_DAYS: i64 = 3652;

/// Login, registration, session resume and every mutation of the signed-in
/// user. Holds the loaded user in memory so the UI reads flags without a
/// refetch; every mutation writes through to the store first.
#[derive(Clone)]
pub struct AuthService {
    pool: DatabaseConnection,
    sessions: SessionService,
    activities: ActivityService,
    messages: MessageService,
    users: UserService,
    anchor: Arc<dyn SessionAnchor>,
    events: EventBus,
    seed: SeedConfig,
    state: Arc<RwLock<Option<AuthSnapshot>>>,
}

impl AuthService {
    pub fn new(
        pool: DatabaseConnection,
        anchor: Arc<dyn SessionAnchor>,
        events: EventBus,
        seed: SeedConfig,
    ) -> Self {
        Self {
            sessions: SessionService::new(pool.clone()),
            activities: ActivityService::new(pool.clone()),
            messages: MessageService::new(pool.clone(), events.clone()),
            users: UserService::new(pool.clone()),
            pool,
            anchor,
            events,
            seed,
            state: Arc::new(RwLock::new(None)),
        }
    }

    /// Runs once at startup: reconcile the coach accounts, then try to
    /// resume whatever session the anchor remembers.
    pub async fn bootstrap(&self) -> AppResult<()> {
        self.seed_coaches().await?;
        self.resume_session().await?;
        Ok(())
    }

    /// Idempotent upsert-by-email. Existing accounts are promoted in place;
    /// missing ones are created with a long platinum subscription.
    async fn seed_coaches(&self) -> AppResult<()> {
        for email in &self.seed.coach_emails {
            let email = normalize_email(email);
            let existing = users::Entity::find()
                .filter(users::Column::Email.eq(&email))
                .one(&self.pool)
                .await?;

            match existing {
                Some(user) if user.is_coach => {}
                Some(user) => {
                    let mut model = user.into_active_model();
                    model.is_coach = Set(true);
                    model.subscription_tier = Set(SubscriptionTier::Platinum);
                    model.subscription_end_date =
                        Set(Some(Utc::now() + Duration::days(COACH_SUBSCRIPTION_DAYS)));
                    model.update(&self.pool).await?;
                }
                None => {
                    let name = email.split('@').next().unwrap_or("coach").to_string();
                    users::ActiveModel {
                        name: Set(name),
                        email: Set(email.clone()),
                        password: Set(None),
                        is_coach: Set(true),
                        subscription_tier: Set(SubscriptionTier::Platinum),
                        subscription_end_date:
                            Set(Some(Utc::now() + Duration::days(COACH_SUBSCRIPTION_DAYS))),
                        trial_used: Set(false),
                        points: Set(0),
                        weekly_workout_count: Set(0),
                        assigned_specialists: Set(AssignedSpecialists::default()),
                        active_section_ids: Set(ActiveSectionIds::default()),
                        is_new_user: Set(false),
                        created_at: Set(Utc::now()),
                        ..Default::default()
                    }
                    .insert(&self.pool)
                    .await?;
                }
            }
        }
        Ok(())
    }

    /// A missing or ended session just discards the anchor; the app starts
    /// logged out.
    async fn resume_session(&self) -> AppResult<()> {
        let Some(token) = self.anchor.load() else {
            return Ok(());
        };
        match self.sessions.get_session(&token).await? {
            Some((session, user)) => {
                self.publish_state(user, session.token).await;
            }
            None => self.anchor.clear(),
        }
        Ok(())
    }

    // -------- session lifecycle --------

    /// Coach accounts authenticate by email alone; everyone else needs an
    /// exact match against the stored plaintext password. Both behaviors are
    /// what the deployed clients rely on and must survive a rewrite intact.
    pub async fn login(&self, email: &str, password: Option<&str>) -> AppResult<AuthSnapshot> {
        let email = normalize_email(email);
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.pool)
            .await?;

        let Some(user) = user else {
            self.audit(UNKNOWN_USER_ID, LoginStatus::Failed, Some("unknown email"))
                .await;
            return Err(AppError::InvalidCredentials);
        };

        if !user.is_coach {
            let matches = match (password, user.password.as_deref()) {
                (Some(given), Some(stored)) => given == stored,
                _ => false,
            };
            if !matches {
                self.audit(user.id, LoginStatus::Failed, Some("wrong password"))
                    .await;
                return Err(AppError::InvalidCredentials);
            }
        }

        self.complete_login(user).await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: Option<String>,
    ) -> AppResult<AuthSnapshot> {
        let email = normalize_email(email);
        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(AppError::EmailAlreadyRegistered);
        }

        let user = users::ActiveModel {
            name: Set(name.to_string()),
            email: Set(email),
            password: Set(password.clone()),
            is_coach: Set(false),
            subscription_tier: Set(SubscriptionTier::Free),
            trial_used: Set(false),
            points: Set(0),
            weekly_workout_count: Set(0),
            assigned_specialists: Set(AssignedSpecialists::default()),
            active_section_ids: Set(ActiveSectionIds::default()),
            is_new_user: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&self.pool)
        .await?;

        // Best effort; a failed notification must not fail registration
        if let Err(e) = self.notify_owner(&user, password.as_deref()).await {
            log::warn!("Owner notification for registration failed: {e}");
        }

        self.complete_login(user).await
    }

    /// Shared tail of login and registration: audit, stamp `last_login`,
    /// open a session, remember it in the anchor, publish the state.
    async fn complete_login(&self, user: users::Model) -> AppResult<AuthSnapshot> {
        self.audit(user.id, LoginStatus::Success, None).await;

        let mut model = user.into_active_model();
        model.last_login = Set(Some(Utc::now()));
        let user = model.update(&self.pool).await?;

        let session = self.sessions.create_session(user.id).await?;
        self.anchor.store(&session.token);

        let snapshot = self.publish_state(user, session.token).await;
        Ok(snapshot)
    }

    /// Always succeeds, signed in or not.
    pub async fn logout(&self) -> AppResult<()> {
        let token = {
            let state = self.state.read().await;
            state.as_ref().map(|s| s.session_token.clone())
        };
        if let Some(token) = token {
            self.sessions.end_session(&token).await?;
        }
        self.anchor.clear();
        *self.state.write().await = None;
        Ok(())
    }

    // -------- derived read-only state --------

    pub async fn current(&self) -> Option<AuthSnapshot> {
        self.state.read().await.clone()
    }

    pub async fn is_coach(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.is_coach)
            .unwrap_or(false)
    }

    pub async fn is_verified(&self) -> bool {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.is_verified)
            .unwrap_or(false)
    }

    /// `Loading` until a user record is loaded.
    pub async fn subscription_status(&self) -> SubscriptionStatus {
        self.state
            .read()
            .await
            .as_ref()
            .map(|s| s.subscription_status)
            .unwrap_or(SubscriptionStatus::Loading)
    }

    // -------- mutations of the signed-in user --------

    pub async fn complete_verification(
        &self,
        details: VerificationDetails,
    ) -> AppResult<AuthSnapshot> {
        self.mutate_current_user(|model| {
            model.full_name = Set(Some(details.full_name.clone()));
            model.date_of_birth = Set(details.date_of_birth);
            model.place_of_birth = Set(details.place_of_birth.clone());
            model.phone_number = Set(details.phone_number.clone());
        })
        .await
    }

    pub async fn update_profile_picture(&self, picture: &str) -> AppResult<AuthSnapshot> {
        let picture = picture.to_string();
        self.mutate_current_user(move |model| {
            model.picture = Set(Some(picture));
        })
        .await
    }

    /// Dropping back to `free` burns the trial.
    pub async fn update_subscription(
        &self,
        tier: SubscriptionTier,
        end_date: Option<DateTime<Utc>>,
    ) -> AppResult<AuthSnapshot> {
        self.mutate_current_user(move |model| {
            model.subscription_tier = Set(tier);
            model.subscription_end_date = Set(end_date);
            if tier == SubscriptionTier::Free {
                model.trial_used = Set(true);
            }
        })
        .await
    }

    pub async fn set_assigned_specialists(
        &self,
        specialists: AssignedSpecialists,
    ) -> AppResult<AuthSnapshot> {
        self.mutate_current_user(move |model| {
            model.assigned_specialists = Set(specialists);
        })
        .await
    }

    pub async fn set_active_sections(&self, section_ids: Vec<i64>) -> AppResult<AuthSnapshot> {
        self.mutate_current_user(move |model| {
            model.active_section_ids = Set(ActiveSectionIds(section_ids));
        })
        .await
    }

    /// Silent no-op when logged out, unlike the verification/profile calls.
    pub async fn add_points(&self, points: i64) -> AppResult<()> {
        if self.state.read().await.is_none() {
            return Ok(());
        }
        let current = self.require_current_user().await?;
        let next = (current.points + points).max(0);
        self.mutate_current_user(move |model| {
            model.points = Set(next);
        })
        .await?;
        Ok(())
    }

    pub async fn reset_points(&self) -> AppResult<()> {
        if self.state.read().await.is_none() {
            return Ok(());
        }
        self.mutate_current_user(|model| {
            model.points = Set(0);
        })
        .await?;
        Ok(())
    }

    pub async fn clear_new_user_flag(&self) -> AppResult<()> {
        if self.state.read().await.is_none() {
            return Ok(());
        }
        self.mutate_current_user(|model| {
            model.is_new_user = Set(false);
        })
        .await?;
        Ok(())
    }

    /// Bumps the weekly counter, restarting it when the ISO week rolled
    /// over since the last workout.
    pub async fn record_workout(&self) -> AppResult<AuthSnapshot> {
        let today = Utc::now().date_naive();
        let user = self.require_current_user().await?;
        let same_week = user
            .last_workout_date
            .map(|d| d.iso_week() == today.iso_week() && d.year() == today.year())
            .unwrap_or(false);
        let count = if same_week {
            user.weekly_workout_count + 1
        } else {
            1
        };
        self.mutate_current_user(move |model| {
            model.weekly_workout_count = Set(count);
            model.last_workout_date = Set(Some(today));
        })
        .await
    }

    // -------- email reset --------

    /// Issues a short-lived token for changing the account email. The token
    /// would normally leave through an email collaborator; the core only
    /// stores and returns it.
    pub async fn begin_email_reset(&self) -> AppResult<String> {
        let token = Uuid::new_v4().to_string();
        let stored = token.clone();
        self.mutate_current_user(move |model| {
            model.email_reset_token = Set(Some(stored));
            model.email_reset_token_expires = Set(Some(Utc::now() + Duration::hours(1)));
        })
        .await?;
        Ok(token)
    }

    pub async fn complete_email_reset(
        &self,
        token: &str,
        new_email: &str,
    ) -> AppResult<AuthSnapshot> {
        let user = self.require_current_user().await?;
        let valid = user.email_reset_token.as_deref() == Some(token)
            && user
                .email_reset_token_expires
                .map(|t| t > Utc::now())
                .unwrap_or(false);
        if !valid {
            return Err(AppError::ValidationError(
                "Invalid or expired email reset token".to_string(),
            ));
        }

        let new_email = normalize_email(new_email);
        let taken = users::Entity::find()
            .filter(users::Column::Email.eq(&new_email))
            .filter(users::Column::Id.ne(user.id))
            .one(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(AppError::EmailAlreadyRegistered);
        }

        self.mutate_current_user(move |model| {
            model.email = Set(new_email);
            model.email_reset_token = Set(None);
            model.email_reset_token_expires = Set(None);
        })
        .await
    }

    // -------- internals --------

    async fn audit(&self, user_id: i64, status: LoginStatus, reason: Option<&str>) {
        if let Err(e) = self
            .activities
            .record(user_id, status, DEVICE, reason.map(String::from))
            .await
        {
            log::warn!("Failed to append login activity: {e}");
        }
    }

    /// Registration side channel to the owner account. Carries the plaintext
    /// password, as the existing clients expect.
    async fn notify_owner(&self, user: &users::Model, password: Option<&str>) -> AppResult<()> {
        let owner = self
            .users
            .find_by_email(&self.seed.owner_email)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("owner account {}", self.seed.owner_email)))?;

        let content = format!(
            "New registration: {} <{}> password: {}",
            user.name,
            user.email,
            password.unwrap_or("(none)")
        );
        self.messages
            .append(
                user.id,
                owner.id,
                MessageKind::Text,
                &content,
                Some(MessageChannel::Coach),
            )
            .await?;
        Ok(())
    }

    async fn require_current_user(&self) -> AppResult<users::Model> {
        let user_id = {
            let state = self.state.read().await;
            state.as_ref().map(|s| s.user.id)
        }
        .ok_or(AppError::NoActiveUser)?;

        // Read-modify-write starts from the stored row, not the snapshot
        users::Entity::find_by_id(user_id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {user_id}")))
    }

    async fn mutate_current_user<F>(&self, apply: F) -> AppResult<AuthSnapshot>
    where
        F: FnOnce(&mut users::ActiveModel),
    {
        let user = self.require_current_user().await?;
        let token = {
            let state = self.state.read().await;
            state
                .as_ref()
                .map(|s| s.session_token.clone())
                .unwrap_or_default()
        };

        let mut model = user.into_active_model();
        apply(&mut model);
        let user = model.update(&self.pool).await?;

        let snapshot = self.publish_state(user, token).await;
        Ok(snapshot)
    }

    async fn publish_state(&self, user: users::Model, token: String) -> AuthSnapshot {
        let user_id = user.id;
        let snapshot = AuthSnapshot::derive(user, token);
        *self.state.write().await = Some(snapshot.clone());
        self.events.publish(ChangeEvent::UserUpdated(user_id));
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;
    use crate::entities::session_entity as sessions;
    use crate::session::MemoryAnchor;

    fn seed() -> SeedConfig {
        SeedConfig {
            coach_emails: vec!["coach@x.com".to_string(), "admin@x.com".to_string()],
            owner_email: "coach@x.com".to_string(),
        }
    }

    async fn service(pool: &DatabaseConnection) -> AuthService {
        let auth = AuthService::new(
            pool.clone(),
            Arc::new(MemoryAnchor::new()),
            EventBus::new(),
            seed(),
        );
        auth.bootstrap().await.unwrap();
        auth
    }

    #[tokio::test]
    async fn test_register_then_login_normalized_email() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        let registered = auth
            .register("Anna", "a@x.com", Some("pw1".to_string()))
            .await
            .unwrap();
        auth.logout().await.unwrap();

        // Different case and whitespace resolve to the same account
        let logged_in = auth.login(" A@X.com ", Some("pw1")).await.unwrap();
        assert_eq!(logged_in.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_register_duplicate_email_rejected() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        auth.register("Anna", "a@x.com", Some("pw1".to_string()))
            .await
            .unwrap();
        let err = auth
            .register("Another", " A@X.COM", Some("pw2".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmailAlreadyRegistered));

        // No second user, and only the first registration's session exists
        let user_count = users::Entity::find().all(&pool).await.unwrap().len();
        // two seeded coaches + one registration
        assert_eq!(user_count, 3);
        let session_count = sessions::Entity::find().all(&pool).await.unwrap().len();
        assert_eq!(session_count, 1);
    }

    #[tokio::test]
    async fn test_coach_login_bypasses_password() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        let snapshot = auth.login("coach@x.com", None).await.unwrap();
        assert!(snapshot.is_coach);
        assert_eq!(snapshot.subscription_status, SubscriptionStatus::Active);

        // Exactly one active session and one success audit row
        let session_rows = sessions::Entity::find().all(&pool).await.unwrap();
        assert_eq!(session_rows.len(), 1);
        assert!(session_rows[0].is_active);

        let activities = ActivityService::new(pool.clone())
            .list_for_user(snapshot.user.id)
            .await
            .unwrap();
        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].status, LoginStatus::Success);
    }

    #[tokio::test]
    async fn test_wrong_password_fails_and_is_audited() {
        let pool = test_pool().await;
        let auth = service(&pool).await;
        let registered = auth
            .register("Anna", "a@x.com", Some("pw1".to_string()))
            .await
            .unwrap();
        auth.logout().await.unwrap();

        assert!(matches!(
            auth.login("a@x.com", Some("nope")).await,
            Err(AppError::InvalidCredentials)
        ));
        assert!(matches!(
            auth.login("a@x.com", None).await,
            Err(AppError::InvalidCredentials)
        ));

        let failed: Vec<_> = ActivityService::new(pool.clone())
            .list_for_user(registered.user.id)
            .await
            .unwrap()
            .into_iter()
            .filter(|a| a.status == LoginStatus::Failed)
            .collect();
        assert_eq!(failed.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_email_audited_with_sentinel_id() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        assert!(matches!(
            auth.login("ghost@x.com", Some("pw")).await,
            Err(AppError::InvalidCredentials)
        ));

        let rows = ActivityService::new(pool.clone())
            .list_for_user(UNKNOWN_USER_ID)
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, LoginStatus::Failed);
    }

    #[tokio::test]
    async fn test_user_without_stored_password_cannot_login() {
        let pool = test_pool().await;
        let auth = service(&pool).await;
        auth.register("NoPw", "n@x.com", None).await.unwrap();
        auth.logout().await.unwrap();

        // Stored password is NULL; nothing matches it, not even empty
        assert!(matches!(
            auth.login("n@x.com", Some("")).await,
            Err(AppError::InvalidCredentials)
        ));
    }

    #[tokio::test]
    async fn test_registration_notifies_owner() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        let snapshot = auth
            .register("Anna", "a@x.com", Some("pw1".to_string()))
            .await
            .unwrap();

        let owner = users::Entity::find()
            .filter(users::Column::Email.eq("coach@x.com"))
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        let thread = MessageService::new(pool.clone(), EventBus::new())
            .conversation(snapshot.user.id, owner.id, Some(MessageChannel::Coach))
            .await
            .unwrap();
        assert_eq!(thread.len(), 1);
        assert!(thread[0].content.contains("pw1"));
    }

    #[tokio::test]
    async fn test_logout_always_succeeds() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        // Logged out already
        auth.logout().await.unwrap();

        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();
        auth.logout().await.unwrap();
        assert!(auth.current().await.is_none());
        assert_eq!(
            auth.subscription_status().await,
            SubscriptionStatus::Loading
        );
        // And again
        auth.logout().await.unwrap();
    }

    #[tokio::test]
    async fn test_session_resume_across_restart() {
        let pool = test_pool().await;
        let anchor = Arc::new(MemoryAnchor::new());
        let auth = AuthService::new(pool.clone(), anchor.clone(), EventBus::new(), seed());
        auth.bootstrap().await.unwrap();
        let registered = auth
            .register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();

        // Same anchor, fresh service: the "page reload"
        let reloaded = AuthService::new(pool.clone(), anchor.clone(), EventBus::new(), seed());
        reloaded.bootstrap().await.unwrap();
        let resumed = reloaded.current().await.expect("session resumes");
        assert_eq!(resumed.user.id, registered.user.id);
    }

    #[tokio::test]
    async fn test_stale_anchor_discarded() {
        let pool = test_pool().await;
        let anchor = Arc::new(MemoryAnchor::new());
        anchor.store("no-such-session");

        let auth = AuthService::new(pool.clone(), anchor.clone(), EventBus::new(), seed());
        auth.bootstrap().await.unwrap();

        assert!(auth.current().await.is_none());
        assert_eq!(anchor.load(), None);
    }

    #[tokio::test]
    async fn test_add_points_accumulates_and_persists() {
        let pool = test_pool().await;
        let anchor = Arc::new(MemoryAnchor::new());
        let auth = AuthService::new(pool.clone(), anchor.clone(), EventBus::new(), seed());
        auth.bootstrap().await.unwrap();
        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();

        auth.add_points(50).await.unwrap();

        // Reload the session between the two calls; the intermediate state
        // must already be durable
        let reloaded = AuthService::new(pool.clone(), anchor.clone(), EventBus::new(), seed());
        reloaded.bootstrap().await.unwrap();
        assert_eq!(reloaded.current().await.unwrap().user.points, 50);

        reloaded.add_points(50).await.unwrap();
        assert_eq!(reloaded.current().await.unwrap().user.points, 100);
    }

    #[tokio::test]
    async fn test_points_never_negative_and_noop_logged_out() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        // Logged out: silent no-ops
        auth.add_points(10).await.unwrap();
        auth.reset_points().await.unwrap();
        auth.clear_new_user_flag().await.unwrap();

        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();
        auth.add_points(-30).await.unwrap();
        assert_eq!(auth.current().await.unwrap().user.points, 0);

        auth.add_points(70).await.unwrap();
        auth.reset_points().await.unwrap();
        assert_eq!(auth.current().await.unwrap().user.points, 0);
    }

    #[tokio::test]
    async fn test_complete_verification_flips_flag() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        assert!(matches!(
            auth.complete_verification(VerificationDetails {
                full_name: "Anna Kovács".to_string(),
                date_of_birth: None,
                place_of_birth: None,
                phone_number: None,
            })
            .await,
            Err(AppError::NoActiveUser)
        ));

        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();
        assert!(!auth.is_verified().await);

        let snapshot = auth
            .complete_verification(VerificationDetails {
                full_name: "Anna Kovács".to_string(),
                date_of_birth: None,
                place_of_birth: Some("Budapest".to_string()),
                phone_number: Some("+36 30 000 0000".to_string()),
            })
            .await
            .unwrap();
        assert!(snapshot.is_verified);
        assert!(auth.is_verified().await);
    }

    #[tokio::test]
    async fn test_downgrade_to_free_burns_trial() {
        let pool = test_pool().await;
        let auth = service(&pool).await;
        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();

        let snapshot = auth
            .update_subscription(
                SubscriptionTier::Gold,
                Some(Utc::now() + Duration::days(30)),
            )
            .await
            .unwrap();
        assert!(!snapshot.user.trial_used);
        assert_eq!(snapshot.subscription_status, SubscriptionStatus::Active);

        let snapshot = auth
            .update_subscription(SubscriptionTier::Free, None)
            .await
            .unwrap();
        assert!(snapshot.user.trial_used);
        assert_eq!(snapshot.subscription_status, SubscriptionStatus::Expired);
    }

    #[tokio::test]
    async fn test_record_workout_weekly_rollover() {
        let pool = test_pool().await;
        let auth = service(&pool).await;
        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();

        let snapshot = auth.record_workout().await.unwrap();
        assert_eq!(snapshot.user.weekly_workout_count, 1);
        let snapshot = auth.record_workout().await.unwrap();
        assert_eq!(snapshot.user.weekly_workout_count, 2);

        // Pretend the last workout was a month ago
        let user = users::Entity::find_by_id(snapshot.user.id)
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        let mut model = user.into_active_model();
        model.last_workout_date = Set(Some(Utc::now().date_naive() - Duration::days(30)));
        model.update(&pool).await.unwrap();

        let snapshot = auth.record_workout().await.unwrap();
        assert_eq!(snapshot.user.weekly_workout_count, 1);
    }

    #[tokio::test]
    async fn test_email_reset_flow() {
        let pool = test_pool().await;
        let auth = service(&pool).await;
        auth.register("Anna", "a@x.com", Some("pw".to_string()))
            .await
            .unwrap();

        let token = auth.begin_email_reset().await.unwrap();

        assert!(matches!(
            auth.complete_email_reset("wrong-token", "b@x.com").await,
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            auth.complete_email_reset(&token, "coach@x.com").await,
            Err(AppError::EmailAlreadyRegistered)
        ));

        let snapshot = auth.complete_email_reset(&token, "B@X.com ").await.unwrap();
        assert_eq!(snapshot.user.email, "b@x.com");
        assert!(snapshot.user.email_reset_token.is_none());
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent_and_promotes() {
        let pool = test_pool().await;
        let auth = service(&pool).await;

        // Run again: no duplicates
        auth.bootstrap().await.unwrap();
        let coaches = users::Entity::find()
            .filter(users::Column::IsCoach.eq(true))
            .all(&pool)
            .await
            .unwrap();
        assert_eq!(coaches.len(), 2);

        // A later seed list can promote an existing account in place
        auth.register("Kata", "kata@x.com", Some("pw".to_string()))
            .await
            .unwrap();
        auth.logout().await.unwrap();
        let mut promoted_seed = seed();
        promoted_seed.coach_emails.push("kata@x.com".to_string());
        let auth2 = AuthService::new(
            pool.clone(),
            Arc::new(MemoryAnchor::new()),
            EventBus::new(),
            promoted_seed,
        );
        auth2.bootstrap().await.unwrap();

        let kata = users::Entity::find()
            .filter(users::Column::Email.eq("kata@x.com"))
            .one(&pool)
            .await
            .unwrap()
            .unwrap();
        assert!(kata.is_coach);
        assert_eq!(kata.subscription_tier, SubscriptionTier::Platinum);
    }
}

use crate::entities::{session_entity as sessions, user_entity as users};
use crate::error::AppResult;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set,
};
use uuid::Uuid;

#[derive(Clone)]
pub struct SessionService {
    pool: DatabaseConnection,
}

impl SessionService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Always a brand-new token; ended sessions are never reactivated.
    pub async fn create_session(&self, user_id: i64) -> AppResult<sessions::Model> {
        let session = sessions::ActiveModel {
            token: Set(Uuid::new_v4().to_string()),
            user_id: Set(user_id),
            is_active: Set(true),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let session = session.insert(&self.pool).await?;
        Ok(session)
    }

    /// Joins against the current user row so profile and subscription
    /// changes are visible on the next resume. `None` for unknown or ended
    /// tokens, and for sessions whose user has since been deleted.
    pub async fn get_session(
        &self,
        token: &str,
    ) -> AppResult<Option<(sessions::Model, users::Model)>> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token))
            .one(&self.pool)
            .await?;

        let session = match session {
            Some(s) if s.is_active => s,
            _ => return Ok(None),
        };

        let user = users::Entity::find_by_id(session.user_id)
            .one(&self.pool)
            .await?;

        Ok(user.map(|u| (session, u)))
    }

    /// Idempotent: unknown or already-ended tokens are a no-op.
    pub async fn end_session(&self, token: &str) -> AppResult<()> {
        let session = sessions::Entity::find()
            .filter(sessions::Column::Token.eq(token))
            .one(&self.pool)
            .await?;

        if let Some(session) = session {
            if session.is_active {
                let mut model = session.into_active_model();
                model.is_active = Set(false);
                model.update(&self.pool).await?;
            }
        }
        Ok(())
    }
}

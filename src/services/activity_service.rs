use crate::entities::login_activity_entity as activities;
use crate::error::AppResult;
use crate::models::LoginStatus;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

#[derive(Clone)]
pub struct ActivityService {
    pool: DatabaseConnection,
}

impl ActivityService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// Append-only. Callers treat this as fire-and-forget; the auth flow
    /// logs failures instead of propagating them.
    pub async fn record(
        &self,
        user_id: i64,
        status: LoginStatus,
        device: &str,
        failure_reason: Option<String>,
    ) -> AppResult<activities::Model> {
        let row = activities::ActiveModel {
            user_id: Set(user_id),
            time: Set(Utc::now()),
            // No server to observe the real address; the UI shows a dash
            ip: Set("local".to_string()),
            device: Set(device.to_string()),
            status: Set(status),
            failure_reason: Set(failure_reason),
            ..Default::default()
        };
        let row = row.insert(&self.pool).await?;
        Ok(row)
    }

    pub async fn list_for_user(&self, user_id: i64) -> AppResult<Vec<activities::Model>> {
        let rows = activities::Entity::find()
            .filter(activities::Column::UserId.eq(user_id))
            .order_by_desc(activities::Column::Time)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_all(&self) -> AppResult<Vec<activities::Model>> {
        let rows = activities::Entity::find()
            .order_by_desc(activities::Column::Time)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;
    use crate::models::UNKNOWN_USER_ID;

    #[tokio::test]
    async fn test_record_and_list() {
        let pool = test_pool().await;
        let service = ActivityService::new(pool);

        service
            .record(7, LoginStatus::Success, "browser", None)
            .await
            .unwrap();
        service
            .record(
                UNKNOWN_USER_ID,
                LoginStatus::Failed,
                "browser",
                Some("unknown email".to_string()),
            )
            .await
            .unwrap();

        let mine = service.list_for_user(7).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].status, LoginStatus::Success);

        let unknown = service.list_for_user(UNKNOWN_USER_ID).await.unwrap();
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].failure_reason.as_deref(), Some("unknown email"));

        assert_eq!(service.list_all().await.unwrap().len(), 2);
    }
}

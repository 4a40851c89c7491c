use crate::entities::user_entity as users;
use crate::error::AppResult;
use crate::utils::normalize_email;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

/// Read-side lookups over user accounts, for screens that show someone other
/// than the signed-in user: the coach's client list, or a conversation
/// partner picker. All account mutations go through [`crate::services::AuthService`].
#[derive(Clone)]
pub struct UserService {
    pool: DatabaseConnection,
}

impl UserService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<users::Model>> {
        let user = users::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(user)
    }

    /// Lookup by address, normalized the same way registration stores it.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<users::Model>> {
        let email = normalize_email(email);
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(&email))
            .one(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn list(&self) -> AppResult<Vec<users::Model>> {
        let rows = users::Entity::find()
            .order_by_asc(users::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_coaches(&self) -> AppResult<Vec<users::Model>> {
        let rows = users::Entity::find()
            .filter(users::Column::IsCoach.eq(true))
            .order_by_asc(users::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn list_clients(&self) -> AppResult<Vec<users::Model>> {
        let rows = users::Entity::find()
            .filter(users::Column::IsCoach.eq(false))
            .order_by_asc(users::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;
    use crate::models::{ActiveSectionIds, AssignedSpecialists, SubscriptionTier};
    use chrono::Utc;
    use sea_orm::{ActiveModelTrait, Set};

    async fn insert_user(pool: &DatabaseConnection, email: &str, is_coach: bool) -> users::Model {
        users::ActiveModel {
            name: Set("Test".to_string()),
            email: Set(email.to_string()),
            password: Set(Some("pw".to_string())),
            is_coach: Set(is_coach),
            subscription_tier: Set(SubscriptionTier::Free),
            trial_used: Set(false),
            points: Set(0),
            weekly_workout_count: Set(0),
            assigned_specialists: Set(AssignedSpecialists::default()),
            active_section_ids: Set(ActiveSectionIds::default()),
            is_new_user: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_and_list() {
        let pool = test_pool().await;
        let service = UserService::new(pool.clone());
        let a = insert_user(&pool, "a@x.com", false).await;
        insert_user(&pool, "b@x.com", false).await;

        let fetched = service.get(a.id).await.unwrap().unwrap();
        assert_eq!(fetched.email, "a@x.com");
        assert!(service.get(404).await.unwrap().is_none());
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_find_by_email_normalizes() {
        let pool = test_pool().await;
        let service = UserService::new(pool.clone());
        insert_user(&pool, "kata@x.com", false).await;

        let found = service.find_by_email("  Kata@X.com ").await.unwrap();
        assert_eq!(found.unwrap().email, "kata@x.com");
        assert!(service.find_by_email("nobody@x.com").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_coach_and_client_partitions() {
        let pool = test_pool().await;
        let service = UserService::new(pool.clone());
        let coach = insert_user(&pool, "coach@x.com", true).await;
        insert_user(&pool, "client@x.com", false).await;

        let coaches = service.list_coaches().await.unwrap();
        assert_eq!(coaches.len(), 1);
        assert_eq!(coaches[0].id, coach.id);

        let clients = service.list_clients().await.unwrap();
        assert_eq!(clients.len(), 1);
        assert!(!clients[0].is_coach);
    }
}

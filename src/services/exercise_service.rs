use crate::entities::exercise_entity as exercises;
use crate::error::{AppError, AppResult};
use crate::models::{ExerciseCriteria, NewExercise};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter, Set,
};

/// Exercise library. The AI-integration layer reads it through
/// `find_by_name` and `search` when assembling workout plans.
#[derive(Clone)]
pub struct ExerciseService {
    pool: DatabaseConnection,
}

impl ExerciseService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn add(&self, new: NewExercise) -> AppResult<exercises::Model> {
        let exercise = exercises::ActiveModel {
            name: Set(new.name),
            description: Set(new.description),
            muscle_group: Set(new.muscle_group),
            difficulty: Set(new.difficulty),
            instructions: Set(new.instructions),
            image_url: Set(new.image_url),
            video_url: Set(new.video_url),
            video_data_url: Set(new.video_data_url),
            ..Default::default()
        };
        let exercise = exercise.insert(&self.pool).await?;
        Ok(exercise)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<exercises::Model>> {
        let exercise = exercises::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(exercise)
    }

    pub async fn update(&self, exercise: exercises::Model) -> AppResult<exercises::Model> {
        exercises::Entity::find_by_id(exercise.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("exercise {}", exercise.id)))?;

        let model = exercises::ActiveModel {
            id: Set(exercise.id),
            name: Set(exercise.name),
            description: Set(exercise.description),
            muscle_group: Set(exercise.muscle_group),
            difficulty: Set(exercise.difficulty),
            instructions: Set(exercise.instructions),
            image_url: Set(exercise.image_url),
            video_url: Set(exercise.video_url),
            video_data_url: Set(exercise.video_data_url),
        };
        let updated = model.update(&self.pool).await?;
        Ok(updated)
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        let exercise = exercises::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("exercise {id}")))?;
        exercise.delete(&self.pool).await?;
        Ok(())
    }

    pub async fn list(&self) -> AppResult<Vec<exercises::Model>> {
        let rows = exercises::Entity::find().all(&self.pool).await?;
        Ok(rows)
    }

    /// Case-insensitive exact match on either language. Names live inside a
    /// JSON column, so the comparison happens here rather than in SQL.
    pub async fn find_by_name(&self, name: &str) -> AppResult<Option<exercises::Model>> {
        let rows = exercises::Entity::find().all(&self.pool).await?;
        Ok(rows.into_iter().find(|e| e.name.matches(name)))
    }

    pub async fn search(&self, criteria: &ExerciseCriteria) -> AppResult<Vec<exercises::Model>> {
        let mut query = exercises::Entity::find();
        if let Some(difficulty) = criteria.difficulty {
            query = query.filter(exercises::Column::Difficulty.eq(difficulty));
        }
        let rows = query.all(&self.pool).await?;
        let rows = match &criteria.muscle_group {
            Some(group) => rows
                .into_iter()
                .filter(|e| e.muscle_group.matches(group))
                .collect(),
            None => rows,
        };
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;
    use crate::models::{Difficulty, Instructions, Localized};

    fn exercise(en: &str, hu: &str, group: &str, difficulty: Difficulty) -> NewExercise {
        NewExercise {
            name: Localized::new(en, hu),
            description: Localized::default(),
            muscle_group: Localized::new(group, group),
            difficulty,
            instructions: Instructions(vec![Localized::new("Step 1", "1. lépés")]),
            image_url: "img.jpg".to_string(),
            video_url: None,
            video_data_url: None,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_either_language() {
        let pool = test_pool().await;
        let service = ExerciseService::new(pool);

        service
            .add(exercise("Push-up", "Fekvőtámasz", "chest", Difficulty::Beginner))
            .await
            .unwrap();

        assert!(service.find_by_name("push-up").await.unwrap().is_some());
        assert!(service.find_by_name("fekvőtámasz").await.unwrap().is_some());
        assert!(service.find_by_name("deadlift").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_search_by_criteria() {
        let pool = test_pool().await;
        let service = ExerciseService::new(pool);

        service
            .add(exercise("Push-up", "Fekvőtámasz", "chest", Difficulty::Beginner))
            .await
            .unwrap();
        service
            .add(exercise("Bench press", "Fekvenyomás", "chest", Difficulty::Advanced))
            .await
            .unwrap();
        service
            .add(exercise("Squat", "Guggolás", "legs", Difficulty::Beginner))
            .await
            .unwrap();

        let beginner_chest = service
            .search(&ExerciseCriteria {
                difficulty: Some(Difficulty::Beginner),
                muscle_group: Some("chest".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(beginner_chest.len(), 1);
        assert_eq!(beginner_chest[0].name.en, "Push-up");

        let all = service.search(&ExerciseCriteria::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let pool = test_pool().await;
        let service = ExerciseService::new(pool);

        let created = service
            .add(exercise("Plank", "Plank", "core", Difficulty::Intermediate))
            .await
            .unwrap();
        let mut changed = created.clone();
        changed.video_url = Some("https://v/1".to_string());
        service.update(changed).await.unwrap();

        let fetched = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(fetched.video_url.as_deref(), Some("https://v/1"));
        assert_eq!(fetched.name, created.name);
    }
}

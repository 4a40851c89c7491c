use crate::entities::{
    custom_card_entity as cards, dashboard_post_entity as posts, section_entity as sections,
};
use crate::error::{AppError, AppResult};
use crate::events::{ChangeEvent, EventBus};
use crate::models::{NewCard, NewPost, NewSection, PostAudience};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, ModelTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

/// Coach-managed dashboard content: posts, the sections grouping them, and
/// free-form cards.
#[derive(Clone)]
pub struct DashboardService {
    pool: DatabaseConnection,
    events: EventBus,
}

impl DashboardService {
    pub fn new(pool: DatabaseConnection, events: EventBus) -> Self {
        Self { pool, events }
    }

    // -------- posts --------

    pub async fn add_post(&self, new: NewPost) -> AppResult<posts::Model> {
        let post = posts::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            media_url: Set(new.media_url),
            media_type: Set(new.media_type),
            user_id: Set(new.user_id),
            section_id: Set(new.section_id),
            button_text: Set(new.button_text),
            button_link: Set(new.button_link),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let post = post.insert(&self.pool).await?;
        self.events.publish(ChangeEvent::PostsChanged);
        Ok(post)
    }

    pub async fn get_post(&self, id: i64) -> AppResult<Option<posts::Model>> {
        let post = posts::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(post)
    }

    /// Whole-record replace. A missing id is a programming error upstream
    /// and fails with `NotFound` rather than upserting.
    pub async fn update_post(&self, post: posts::Model) -> AppResult<posts::Model> {
        posts::Entity::find_by_id(post.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {}", post.id)))?;

        let model = posts::ActiveModel {
            id: Set(post.id),
            title: Set(post.title),
            content: Set(post.content),
            media_url: Set(post.media_url),
            media_type: Set(post.media_type),
            user_id: Set(post.user_id),
            section_id: Set(post.section_id),
            button_text: Set(post.button_text),
            button_link: Set(post.button_link),
            created_at: Set(post.created_at),
        };
        let updated = model.update(&self.pool).await?;
        self.events.publish(ChangeEvent::PostsChanged);
        Ok(updated)
    }

    pub async fn delete_post(&self, id: i64) -> AppResult<()> {
        let post = posts::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("post {id}")))?;
        post.delete(&self.pool).await?;
        self.events.publish(ChangeEvent::PostsChanged);
        Ok(())
    }

    /// Posts visible to an audience: broadcasts plus the user's own.
    pub async fn list_posts(&self, audience: PostAudience) -> AppResult<Vec<posts::Model>> {
        let mut query = posts::Entity::find();
        if let PostAudience::User(user_id) = audience {
            query = query.filter(
                Condition::any()
                    .add(posts::Column::UserId.is_null())
                    .add(posts::Column::UserId.eq(user_id)),
            );
        }
        let rows = query
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn posts_for_section(&self, section_id: i64) -> AppResult<Vec<posts::Model>> {
        let rows = posts::Entity::find()
            .filter(posts::Column::SectionId.eq(section_id))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    // -------- sections --------

    pub async fn add_section(&self, new: NewSection) -> AppResult<sections::Model> {
        let section = sections::ActiveModel {
            name: Set(new.name),
            background_image: Set(new.background_image),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let section = section.insert(&self.pool).await?;
        self.events.publish(ChangeEvent::SectionsChanged);
        Ok(section)
    }

    pub async fn get_section(&self, id: i64) -> AppResult<Option<sections::Model>> {
        let section = sections::Entity::find_by_id(id).one(&self.pool).await?;
        Ok(section)
    }

    pub async fn update_section(&self, section: sections::Model) -> AppResult<sections::Model> {
        sections::Entity::find_by_id(section.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("section {}", section.id)))?;

        let model = sections::ActiveModel {
            id: Set(section.id),
            name: Set(section.name),
            background_image: Set(section.background_image),
            created_at: Set(section.created_at),
        };
        let updated = model.update(&self.pool).await?;
        self.events.publish(ChangeEvent::SectionsChanged);
        Ok(updated)
    }

    /// Posts reference sections by back-reference only, so the cascade is
    /// ours to do. One transaction: either the section and all its posts go,
    /// or nothing does.
    pub async fn delete_section(&self, id: i64) -> AppResult<()> {
        let txn = self.pool.begin().await?;

        let section = sections::Entity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("section {id}")))?;

        posts::Entity::delete_many()
            .filter(posts::Column::SectionId.eq(id))
            .exec(&txn)
            .await?;
        section.delete(&txn).await?;

        txn.commit().await?;
        self.events.publish(ChangeEvent::SectionsChanged);
        self.events.publish(ChangeEvent::PostsChanged);
        Ok(())
    }

    pub async fn list_sections(&self) -> AppResult<Vec<sections::Model>> {
        let rows = sections::Entity::find()
            .order_by_asc(sections::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    // -------- custom cards --------

    pub async fn add_card(&self, new: NewCard) -> AppResult<cards::Model> {
        let card = cards::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        let card = card.insert(&self.pool).await?;
        self.events.publish(ChangeEvent::CardsChanged);
        Ok(card)
    }

    pub async fn update_card(&self, card: cards::Model) -> AppResult<cards::Model> {
        cards::Entity::find_by_id(card.id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("card {}", card.id)))?;

        let model = cards::ActiveModel {
            id: Set(card.id),
            title: Set(card.title),
            content: Set(card.content),
            created_at: Set(card.created_at),
        };
        let updated = model.update(&self.pool).await?;
        self.events.publish(ChangeEvent::CardsChanged);
        Ok(updated)
    }

    pub async fn delete_card(&self, id: i64) -> AppResult<()> {
        let card = cards::Entity::find_by_id(id)
            .one(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("card {id}")))?;
        card.delete(&self.pool).await?;
        self.events.publish(ChangeEvent::CardsChanged);
        Ok(())
    }

    pub async fn list_cards(&self) -> AppResult<Vec<cards::Model>> {
        let rows = cards::Entity::find()
            .order_by_asc(cards::Column::CreatedAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}

use crate::entities::message_entity as messages;
use crate::error::AppResult;
use crate::events::{ChangeEvent, EventBus};
use crate::models::{MessageChannel, MessageKind};
use crate::utils::conversation_id;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// The message log is append-only: no update or delete is exposed.
#[derive(Clone)]
pub struct MessageService {
    pool: DatabaseConnection,
    events: EventBus,
}

impl MessageService {
    pub fn new(pool: DatabaseConnection, events: EventBus) -> Self {
        Self { pool, events }
    }

    pub async fn append(
        &self,
        sender_id: i64,
        receiver_id: i64,
        kind: MessageKind,
        content: &str,
        channel: Option<MessageChannel>,
    ) -> AppResult<messages::Model> {
        let conversation = conversation_id(sender_id, receiver_id);
        let message = messages::ActiveModel {
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            conversation_id: Set(conversation.clone()),
            kind: Set(kind),
            content: Set(content.to_string()),
            channel: Set(channel),
            sent_at: Set(Utc::now()),
            ..Default::default()
        };
        let message = message.insert(&self.pool).await?;
        self.events.publish(ChangeEvent::MessageAppended {
            conversation_id: conversation,
        });
        Ok(message)
    }

    /// Chronological thread between two users. `channel` of `Some` narrows
    /// to one sub-stream; `None` returns the whole thread.
    pub async fn conversation(
        &self,
        user_a: i64,
        user_b: i64,
        channel: Option<MessageChannel>,
    ) -> AppResult<Vec<messages::Model>> {
        let mut query = messages::Entity::find()
            .filter(messages::Column::ConversationId.eq(conversation_id(user_a, user_b)));
        if let Some(channel) = channel {
            query = query.filter(messages::Column::Channel.eq(channel));
        }
        let rows = query
            .order_by_asc(messages::Column::SentAt)
            .order_by_asc(messages::Column::Id)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Every thread the user takes part in, for the inbox list.
    pub async fn conversations_for_user(&self, user_id: i64) -> AppResult<Vec<messages::Model>> {
        let rows = messages::Entity::find()
            .filter(
                messages::Column::SenderId
                    .eq(user_id)
                    .or(messages::Column::ReceiverId.eq(user_id)),
            )
            .order_by_asc(messages::Column::SentAt)
            .all(&self.pool)
            .await?;
        Ok(rows)
    }
}

use crate::models::Localized;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub media_url: Option<String>,
    pub media_type: Option<String>,
    /// `None` broadcasts the post to every user.
    pub user_id: Option<i64>,
    pub section_id: Option<i64>,
    pub button_text: Option<String>,
    pub button_link: Option<String>,
}

/// Post audience filter: a concrete user sees broadcasts plus their own
/// posts; `All` is the coach's admin view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostAudience {
    All,
    User(i64),
}

impl PostAudience {
    /// `-1` is the legacy "all users" sentinel the admin UI sends.
    pub fn from_user_id(user_id: i64) -> Self {
        if user_id == -1 {
            PostAudience::All
        } else {
            PostAudience::User(user_id)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSection {
    pub name: Localized,
    pub background_image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCard {
    pub title: String,
    pub content: String,
}

use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};

/// Bilingual text, stored as one JSON column.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, FromJsonQueryResult)]
pub struct Localized {
    pub en: String,
    pub hu: String,
}

impl Localized {
    pub fn new(en: impl Into<String>, hu: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            hu: hu.into(),
        }
    }

    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        self.en.to_lowercase() == needle || self.hu.to_lowercase() == needle
    }
}

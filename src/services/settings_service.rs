use crate::entities::setting_entity as settings;
use crate::error::AppResult;
use crate::events::{ChangeEvent, EventBus};
use crate::models::{PlanPrices, SettingKey, SettingValue, SpecialistFlags, ThemeColors};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    Set, TransactionTrait,
};

#[derive(Clone)]
pub struct SettingsService {
    pool: DatabaseConnection,
    events: EventBus,
}

impl SettingsService {
    pub fn new(pool: DatabaseConnection, events: EventBus) -> Self {
        Self { pool, events }
    }

    pub async fn get(&self, key: SettingKey) -> AppResult<Option<SettingValue>> {
        let row = settings::Entity::find()
            .filter(settings::Column::Key.eq(key.as_str()))
            .one(&self.pool)
            .await?;
        match row {
            Some(row) => Ok(Some(SettingValue::from_json(key, row.value)?)),
            None => Ok(None),
        }
    }

    /// Upsert keyed by the setting name, in one transaction.
    pub async fn set(&self, value: SettingValue) -> AppResult<()> {
        let key = value.key();
        let json = value.to_json()?;

        let txn = self.pool.begin().await?;
        let existing = settings::Entity::find()
            .filter(settings::Column::Key.eq(key.as_str()))
            .one(&txn)
            .await?;
        match existing {
            Some(row) => {
                let mut model = row.into_active_model();
                model.value = Set(json);
                model.update(&txn).await?;
            }
            None => {
                settings::ActiveModel {
                    key: Set(key.as_str().to_string()),
                    value: Set(json),
                    ..Default::default()
                }
                .insert(&txn)
                .await?;
            }
        }
        txn.commit().await?;

        self.events.publish(match key {
            SettingKey::ThemeColors => ChangeEvent::ThemeChanged,
            SettingKey::BackgroundImage => ChangeEvent::BackgroundChanged,
            _ => ChangeEvent::SettingChanged(key),
        });
        Ok(())
    }

    // Typed accessors with the defaults the UI renders before the coach has
    // saved anything.

    pub async fn theme_colors(&self) -> AppResult<ThemeColors> {
        match self.get(SettingKey::ThemeColors).await? {
            Some(SettingValue::ThemeColors(v)) => Ok(v),
            _ => Ok(ThemeColors::default()),
        }
    }

    pub async fn background_image(&self) -> AppResult<Option<String>> {
        match self.get(SettingKey::BackgroundImage).await? {
            Some(SettingValue::BackgroundImage(v)) => Ok(v),
            _ => Ok(None),
        }
    }

    pub async fn specialist_flags(&self) -> AppResult<SpecialistFlags> {
        match self.get(SettingKey::SpecialistFlags).await? {
            Some(SettingValue::SpecialistFlags(v)) => Ok(v),
            _ => Ok(SpecialistFlags::default()),
        }
    }

    pub async fn plan_prices(&self) -> AppResult<PlanPrices> {
        match self.get(SettingKey::PlanPrices).await? {
            Some(SettingValue::PlanPrices(v)) => Ok(v),
            _ => Ok(PlanPrices::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::connection::test_pool;

    #[tokio::test]
    async fn test_set_then_get_round_trip() {
        let pool = test_pool().await;
        let service = SettingsService::new(pool, EventBus::new());

        let mut colors = ThemeColors::default();
        colors.primary = "#ff0000".to_string();
        service
            .set(SettingValue::ThemeColors(colors.clone()))
            .await
            .unwrap();

        assert_eq!(service.theme_colors().await.unwrap(), colors);
    }

    #[tokio::test]
    async fn test_set_twice_overwrites_single_row() {
        let pool = test_pool().await;
        let service = SettingsService::new(pool.clone(), EventBus::new());

        service
            .set(SettingValue::BackgroundImage(Some("a.jpg".to_string())))
            .await
            .unwrap();
        service
            .set(SettingValue::BackgroundImage(Some("b.jpg".to_string())))
            .await
            .unwrap();

        assert_eq!(
            service.background_image().await.unwrap(),
            Some("b.jpg".to_string())
        );
        let rows = settings::Entity::find().all(&pool).await.unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[tokio::test]
    async fn test_unset_keys_fall_back_to_defaults() {
        let pool = test_pool().await;
        let service = SettingsService::new(pool, EventBus::new());

        assert_eq!(service.theme_colors().await.unwrap(), ThemeColors::default());
        assert_eq!(service.background_image().await.unwrap(), None);
        assert_eq!(service.plan_prices().await.unwrap(), PlanPrices::default());
    }

    #[tokio::test]
    async fn test_theme_write_publishes_theme_changed() {
        let pool = test_pool().await;
        let bus = EventBus::new();
        let mut rx = bus.subscribe();
        let service = SettingsService::new(pool, bus);

        service
            .set(SettingValue::ThemeColors(ThemeColors::default()))
            .await
            .unwrap();
        assert_eq!(rx.recv().await.unwrap(), ChangeEvent::ThemeChanged);
    }
}

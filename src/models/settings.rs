use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Closed set of setting slots. Each key has exactly one value shape; no
/// open string-keyed access is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKey {
    ThemeColors,
    BackgroundImage,
    SpecialistFlags,
    PlanPrices,
}

impl SettingKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettingKey::ThemeColors => "theme_colors",
            SettingKey::BackgroundImage => "background_image",
            SettingKey::SpecialistFlags => "specialist_flags",
            SettingKey::PlanPrices => "plan_prices",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub background: String,
    pub text: String,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#10b981".to_string(),
            secondary: "#1f2937".to_string(),
            accent: "#f59e0b".to_string(),
            background: "#111827".to_string(),
            text: "#f9fafb".to_string(),
        }
    }
}

/// Which specialist surfaces the coach has activated app-wide.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpecialistFlags {
    pub trainer: bool,
    pub dietitian: bool,
    pub physiotherapist: bool,
}

/// Price for each billing cycle of one plan, in the smallest currency unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanPriceRow {
    pub monthly: i64,
    pub quarterly: i64,
    pub semiannual: i64,
    pub yearly: i64,
}

/// The singleton price table: three paid plans, four billing cycles each.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlanPrices {
    pub silver: PlanPriceRow,
    pub gold: PlanPriceRow,
    pub platinum: PlanPriceRow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SettingValue {
    ThemeColors(ThemeColors),
    BackgroundImage(Option<String>),
    SpecialistFlags(SpecialistFlags),
    PlanPrices(PlanPrices),
}

impl SettingValue {
    pub fn key(&self) -> SettingKey {
        match self {
            SettingValue::ThemeColors(_) => SettingKey::ThemeColors,
            SettingValue::BackgroundImage(_) => SettingKey::BackgroundImage,
            SettingValue::SpecialistFlags(_) => SettingKey::SpecialistFlags,
            SettingValue::PlanPrices(_) => SettingKey::PlanPrices,
        }
    }

    /// Inner value only; the key lives in its own column.
    pub fn to_json(&self) -> AppResult<serde_json::Value> {
        let value = match self {
            SettingValue::ThemeColors(v) => serde_json::to_value(v)?,
            SettingValue::BackgroundImage(v) => serde_json::to_value(v)?,
            SettingValue::SpecialistFlags(v) => serde_json::to_value(v)?,
            SettingValue::PlanPrices(v) => serde_json::to_value(v)?,
        };
        Ok(value)
    }

    pub fn from_json(key: SettingKey, value: serde_json::Value) -> AppResult<Self> {
        let parsed = match key {
            SettingKey::ThemeColors => SettingValue::ThemeColors(
                serde_json::from_value(value).map_err(AppError::SerdeJsonError)?,
            ),
            SettingKey::BackgroundImage => SettingValue::BackgroundImage(
                serde_json::from_value(value).map_err(AppError::SerdeJsonError)?,
            ),
            SettingKey::SpecialistFlags => SettingValue::SpecialistFlags(
                serde_json::from_value(value).map_err(AppError::SerdeJsonError)?,
            ),
            SettingKey::PlanPrices => SettingValue::PlanPrices(
                serde_json::from_value(value).map_err(AppError::SerdeJsonError)?,
            ),
        };
        Ok(parsed)
    }
}

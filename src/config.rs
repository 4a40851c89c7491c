use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        // mode=rwc creates the database file on first open
        Self {
            url: "sqlite://fitcoach.db?mode=rwc".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Where the opaque session token is remembered across restarts.
    pub anchor_path: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            anchor_path: ".fitcoach-session".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Accounts reconciled as coaches on startup. Coaches authenticate by
    /// email alone; keep this list short.
    pub coach_emails: Vec<String>,
    /// Account receiving registration notifications. Must be one of the
    /// coach emails.
    pub owner_email: String,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            coach_emails: vec![
                "coach@fitcoach.app".to_string(),
                "admin@fitcoach.app".to_string(),
            ],
            owner_email: "coach@fitcoach.app".to_string(),
        }
    }
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let mut config: Config = match std::fs::read_to_string(&config_path) {
            Ok(config_str) => {
                toml::from_str(&config_str).map_err(|e| format!("invalid {config_path}: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Config::default(),
            Err(e) => {
                return Err(format!("cannot read {config_path}: {e}").into());
            }
        };

        // Environment overrides win over file values
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("SESSION_ANCHOR_PATH") {
            config.session.anchor_path = v;
        }
        if let Ok(v) = env::var("SEED_COACH_EMAILS") {
            config.seed.coach_emails = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("SEED_OWNER_EMAIL") {
            config.seed.owner_email = v;
        }

        Ok(config)
    }
}

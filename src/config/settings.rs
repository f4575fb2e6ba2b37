use std::str::FromStr;

use log::warn;

#[derive(Debug, Clone)]
pub struct RatingSettings {
    pub initial_rating: i64,
    pub k_factor: f64,
    pub rating_floor: i64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            initial_rating: 1200,
            k_factor: 32.0,
            rating_floor: 0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub path: String,
    pub pool_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "colosseum_pool.db".to_string(),
            pool_size: 8,
            busy_timeout_ms: 5000,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub api_prefix: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            api_prefix: "/api/pool".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub database: DatabaseSettings,
    pub server: ServerSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from the process environment, after loading
    /// a `.env` file from the working directory if one exists.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("Loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Overlays values returned by `lookup` on top of the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        if let Some(path) = lookup("DATABASE_PATH") {
            config.database.path = path;
        }
        if let Some(prefix) = lookup("API_PREFIX") {
            config.server.api_prefix = normalize_prefix(&prefix);
        }

        override_parsed(&lookup, "DATABASE_POOL_SIZE", &mut config.database.pool_size);
        override_parsed(&lookup, "DATABASE_BUSY_TIMEOUT_MS", &mut config.database.busy_timeout_ms);
        override_validated(&lookup, "ELO_K_FACTOR", &mut config.rating.k_factor, |k| {
            k.is_finite() && *k > 0.0
        });
        override_parsed(&lookup, "ELO_INITIAL_RATING", &mut config.rating.initial_rating);

        config
    }
}

fn override_parsed<F, T>(lookup: &F, key: &str, target: &mut T)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    override_validated(lookup, key, target, |_| true);
}

// Unparseable values and values rejected by `accept` both keep the default
fn override_validated<F, T, V>(lookup: &F, key: &str, target: &mut T, accept: V)
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    V: Fn(&T) -> bool,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse::<T>() {
        Ok(value) if accept(&value) => *target = value,
        _ => warn!("Ignoring invalid value {:?} for {}", raw, key),
    }
}

// "" and "/" both mean the routes live at the root
fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

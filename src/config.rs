use std::env;

/// Process-wide settings, read from the environment once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_host: String,
    pub db_user: String,
    pub db_password: String,
    pub db_database: String,
    pub db_port: u16,
    pub port: u16,
}

impl Config {
    /// Loads the configuration. Database values may be absent: the pool is
    /// built lazily, so a misconfigured database shows up as failing queries
    /// rather than a failed boot.
    pub fn from_env() -> Config {
        Config {
            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            db_user: env::var("DB_USER").unwrap_or_default(),
            db_password: env::var("DB_PASSWORD").unwrap_or_default(),
            db_database: env::var("DB_DATABASE").unwrap_or_default(),
            db_port: parse_port(env::var("DB_PORT").ok(), 3306),
            port: parse_port(env::var("PORT").ok(), 3000),
        }
    }
}

fn parse_port(value: Option<String>, fallback: u16) -> u16 {
    value.and_then(|raw| raw.parse().ok()).unwrap_or(fallback)
}

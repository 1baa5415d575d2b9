use std::env;

/// Process configuration, read once at startup and carried inside the
/// application context. No runtime reconfiguration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    pub database_url: String,
    pub token_secret: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Reads configuration through an injectable lookup so the parsing and
    /// required-variable rules are testable without touching process env.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidVar { var: "PORT", value: v })?,
            None => 3000,
        };

        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::MissingVar("DATABASE_URL"))?;

        let token_secret = lookup("TOKEN_SECRET").ok_or(ConfigError::MissingVar("TOKEN_SECRET"))?;

        Ok(Self { port, database_url, token_secret })
    }
}

use crate::{env_optional, ConfigError, FromEnv};

/// Postgres connection string for backends that reach the database over HTTP.
///
/// A missing `DATABASE_URL` is not a load error: services start without it and
/// report the problem per request through [`DatabaseConfig::url`].
#[derive(Clone, Default)]
pub struct DatabaseConfig {
    url: Option<String>,
}

impl DatabaseConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }

    /// Config with no connection string at all
    pub fn unset() -> Self {
        Self { url: None }
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }

    /// The connection string, or `MissingEnvVar("DATABASE_URL")`
    pub fn url(&self) -> Result<&str, ConfigError> {
        self.url
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))
    }
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl FromEnv for DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            url: env_optional("DATABASE_URL"),
        })
    }
}

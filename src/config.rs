use secrecy::Secret;
use serde::Deserialize;

const DEFAULT_LOG_LEVEL: &str = "contact_dispatcher=info,tower_http=info,axum::rejection=trace";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
    pub log_level: String,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
}

#[derive(Deserialize, Clone)]
pub struct EmailClientSettings {
    pub smtp_host: String,
    /// The account used to authenticate against the SMTP relay, also used as sender.
    pub username: String,
    pub password: Secret<String>,
    pub admin_email: Option<String>,
}

impl EmailClientSettings {
    /// Recipient of the administrator notification. Falls back to the sending account.
    pub fn admin_recipient(&self) -> &str {
        self.admin_email
            .as_deref()
            .filter(|address| !address.is_empty())
            .unwrap_or(&self.username)
    }
}

/// Runtime mode. Only `production` turns on the strict origin allow-list.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(from = "String")]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Production => "production",
        }
    }
}

impl From<String> for Environment {
    fn from(value: String) -> Self {
        if value == "production" {
            Environment::Production
        } else {
            Environment::Development
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Empty variables count as unset.
fn env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Reads the process configuration from the environment.
///
/// `EMAIL_USER` and `EMAIL_PASS` are required, everything else has a default.
pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    config::Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 5000_i64)?
        .set_default("application.environment", "development")?
        .set_default("email_client.smtp_host", "smtp.gmail.com")?
        .set_default("log_level", DEFAULT_LOG_LEVEL)?
        .set_override_option("application.host", env("HOST"))?
        .set_override_option("application.port", env("PORT"))?
        .set_override_option("application.environment", env("NODE_ENV"))?
        .set_override_option("email_client.smtp_host", env("SMTP_HOST"))?
        .set_override_option("email_client.username", env("EMAIL_USER"))?
        .set_override_option("email_client.password", env("EMAIL_PASS"))?
        .set_override_option("email_client.admin_email", env("ADMIN_EMAIL"))?
        .build()?
        .try_deserialize()
}

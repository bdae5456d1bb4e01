use crate::contract::ContractMode;
use crate::domain::ReservedDomain;
use secrecy::{ExposeSecret, Secret};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::time::Duration;

#[derive(serde::Deserialize, Clone, Debug)]
pub struct Settings {
    pub api: ApiSettings,
    pub database: DatabaseSettings,
    pub synthetic_data: SyntheticDataSettings,
    pub contract: ContractSettings,
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ApiSettings {
    /// Service root, e.g. `http://localhost:3333`. `/health` lives here.
    pub base_url: String,
    /// Prefix of every resource route, e.g. `/api`.
    pub api_prefix: String,
    /// Left unset, requests wait for as long as the test runner lets them.
    #[serde(default)]
    pub timeout_milliseconds: Option<u64>,
}

impl ApiSettings {
    pub fn api_url(&self) -> String {
        format!(
            "{}{}",
            self.base_url.trim_end_matches('/'),
            self.api_prefix.trim_end_matches('/')
        )
    }

    pub fn service_url(&self) -> String {
        self.base_url.trim_end_matches('/').to_string()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_milliseconds.map(Duration::from_millis)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    pub username: String,
    pub password: Secret<String>,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub database_name: String,
    #[serde(default)]
    pub require_ssl: bool,
}

impl DatabaseSettings {
    pub fn connect_options(&self) -> PgConnectOptions {
        let ssl_mode = if self.require_ssl {
            PgSslMode::Require
        } else {
            PgSslMode::Prefer
        };
        PgConnectOptions::new()
            .host(&self.host)
            .username(&self.username)
            .password(self.password.expose_secret())
            .port(self.port)
            .ssl_mode(ssl_mode)
            .database(&self.database_name)
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct SyntheticDataSettings {
    pub reserved_domain: String,
}

impl SyntheticDataSettings {
    pub fn reserved_domain(&self) -> Result<ReservedDomain, String> {
        ReservedDomain::parse(self.reserved_domain.clone())
    }
}

#[derive(serde::Deserialize, Clone, Debug)]
pub struct ContractSettings {
    #[serde(default)]
    pub mode: ContractMode,
}

/// Plain `DB_*` variables, as exported by CI jobs and docker-compose files.
/// They win over every other source.
const LEGACY_DATABASE_OVERRIDES: [(&str, &str); 5] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_USER", "database.username"),
    ("DB_PASS", "database.password"),
    ("DB_NAME", "database.database_name"),
];

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir().map_err(|e| {
        config::ConfigError::Message(format!("Failed to determine the current directory: {e}"))
    })?;
    let configuration_directory = base_path.join("configuration");

    // Detect the running environment.
    // Default to `local` if unspecified.
    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(config::ConfigError::Message)?;
    let environment_filename = format!("{}.yaml", environment.as_str());

    let mut builder = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")))
        .add_source(
            config::File::from(configuration_directory.join(environment_filename))
                .required(false),
        )
        // Add in settings from environment variables (with a prefix of APP and '__' as separator)
        // E.g. `APP_API__BASE_URL=http://127.0.0.1:3333` would set `Settings.api.base_url`
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        );
    for (variable, key) in LEGACY_DATABASE_OVERRIDES {
        builder = builder.set_override_option(key, std::env::var(variable).ok())?;
    }

    builder.build()?.try_deserialize::<Settings>()
}

/// The possible runtime environment for the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Local,
    Ci,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Ci => "ci",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "ci" => Ok(Self::Ci),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `ci`.",
                other
            )),
        }
    }
}

use secrecy::Secret;
use serde_aux::prelude::deserialize_number_from_string;

use crate::domain::application::OperatorAddress;

/// Port on which SMTP servers expect TLS from the first byte.
const IMPLICIT_TLS_PORT: u16 = 465;

/// Flat environment variables mapped onto configuration keys.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("SMTP_HOST", "smtp.host"),
    ("SMTP_PORT", "smtp.port"),
    ("SMTP_USER", "smtp.username"),
    ("SMTP_PASS", "smtp.password"),
    ("PORT", "app.port"),
];

#[derive(Debug)]
pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "production" => Ok(Self::Production),
            other => Err(format!(
                "{} is not a supported environment. Use either `local` or `production`.",
                other,
            )),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct SmtpSettings {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub username: String,
    pub password: Secret<String>,
}

impl SmtpSettings {
    /// Port 465 speaks TLS immediately; every other port upgrades with STARTTLS when offered.
    pub fn implicit_tls(&self) -> bool {
        self.port == IMPLICIT_TLS_PORT
    }

    /// The authenticated account doubles as the mailbox that receives new leads.
    pub fn operator(&self) -> OperatorAddress {
        OperatorAddress(self.username.clone())
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct AppConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

#[derive(serde::Deserialize, Clone)]
pub struct Configuration {
    pub app: AppConfig,
    pub smtp: SmtpSettings,
}

pub fn get_configuration() -> Result<Configuration, config::ConfigError> {
    let mut settings = config::Config::default();

    let base_path = std::env::current_dir().expect("Failed to determine the current directory");
    let configuration_directory = base_path.join("configuration");

    // Read in default configuration
    settings.merge(config::File::from(configuration_directory.join("base")).required(true))?;

    let environment: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .expect("Failed to parse APP_ENVIRONMENT");

    // Read in layer environment specific file.
    settings.merge(
        config::File::from(configuration_directory.join(environment.as_str())).required(true),
    )?;

    settings.merge(config::Environment::with_prefix("app").separator("__"))?;

    // SMTP credentials have no file defaults, they only ever come from the environment.
    for &(variable, key) in ENV_OVERRIDES {
        if let Ok(value) = std::env::var(variable) {
            settings.set(key, value)?;
        }
    }

    settings.try_into()
}

use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use crate::server::error::config::ConfigError;

/// Runtime configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    pub listen_address: String,
    pub listen_port: u16,
    pub db: DbConfig,
    pub smtp: SmtpConfig,
    pub gateway: GatewayConfig,
    /// Recipient for transfer-proof review notifications
    pub admin_email: String,
    /// Check-in URL printed into ticket QR codes, with `{id}` and
    /// `{ticket_number}` placeholders
    pub qr_url_template: String,
    /// Directory rendered ticket documents are written to
    pub storage_path: PathBuf,
    pub event_name: String,
    pub event_date: String,
}

#[derive(Clone)]
pub struct DbConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl DbConfig {
    pub fn url(&self) -> String {
        format!(
            "postgres://{}:{}@{}:{}/{}",
            self.username, self.password, self.host, self.port, self.name
        )
    }
}

#[derive(Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// From address on every outbound mail
    pub sender: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayEnvironment {
    Sandbox,
    Production,
}

impl GatewayEnvironment {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "sandbox" => Some(GatewayEnvironment::Sandbox),
            "production" => Some(GatewayEnvironment::Production),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub struct GatewayConfig {
    pub server_key: String,
    pub environment: GatewayEnvironment,
}

impl GatewayConfig {
    pub fn base_url(&self) -> &'static str {
        match self.environment {
            GatewayEnvironment::Sandbox => "https://api.sandbox.midtrans.com",
            GatewayEnvironment::Production => "https://api.midtrans.com",
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = {
            let value = require("GATEWAY_ENVIRONMENT")?;
            GatewayEnvironment::parse(&value).ok_or_else(|| {
                ConfigError::invalid(
                    "GATEWAY_ENVIRONMENT",
                    format!("expected sandbox or production, got {value:?}"),
                )
            })?
        };

        Ok(Self {
            listen_address: require("ADDRESS")?,
            listen_port: parse_var("PORT")?,
            db: DbConfig {
                host: require("DB_HOST")?,
                port: parse_var("DB_PORT")?,
                username: require("DB_USERNAME")?,
                password: require("DB_PASSWORD")?,
                name: require("DB_NAME")?,
            },
            smtp: SmtpConfig {
                host: require("SMTP_HOST")?,
                port: parse_var("SMTP_PORT")?,
                username: require("SMTP_USERNAME")?,
                password: require("SMTP_PASSWORD")?,
                sender: require("MAIL_SENDER")?,
            },
            gateway: GatewayConfig {
                server_key: require("GATEWAY_SERVER_KEY")?,
                environment,
            },
            admin_email: require("ADMIN_EMAIL")?,
            qr_url_template: require("QR_URL_TEMPLATE")?,
            storage_path: PathBuf::from(require("STORAGE_PATH")?),
            event_name: require("EVENT_NAME")?,
            event_date: require("EVENT_DATE")?,
        })
    }
}

fn require(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn parse_var<T>(name: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    let value = require(name)?;
    value
        .parse()
        .map_err(|e| ConfigError::invalid(name, format!("{e}")))
}

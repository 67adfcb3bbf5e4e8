use std::{env, str::FromStr};

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};

use crate::errors::{AppError, AppResult};

const DEV_SECRET_KEY: &str = "dev_secret_key_change_in_production";
const TEST_SECRET_KEY: &str = "test_secret_key";
const MIN_SECRET_LEN: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Development,
    Testing,
    Production,
}

impl FromStr for Profile {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Profile::Development),
            "testing" | "test" => Ok(Profile::Testing),
            "production" | "prod" => Ok(Profile::Production),
            other => Err(AppError::InternalError(format!(
                "unknown APP_SETTINGS profile '{}'",
                other
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub profile: Profile,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// Prefix for the `self` links attached to serialized resources.
    pub base_url: String,
    pub secret_key: SecretString,
    pub bcrypt_cost: u32,
    pub token_expiration_days: i64,
    pub token_expiration_seconds: i64,
    pub page_size: u64,
}

impl Config {
    /// Built-in settings for a profile, before any environment overrides.
    pub fn defaults(profile: Profile) -> Self {
        let (db_name, secret, bcrypt_cost, days, seconds) = match profile {
            Profile::Development => ("quizdrill-dev", DEV_SECRET_KEY, 4, 5, 0),
            Profile::Testing => ("quizdrill-test", TEST_SECRET_KEY, 4, 0, 5),
            Profile::Production => ("quizdrill", DEV_SECRET_KEY, 12, 5, 0),
        };

        Self {
            profile,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: db_name.to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            base_url: "http://localhost:8080".to_string(),
            secret_key: SecretString::from(secret.to_string()),
            bcrypt_cost,
            token_expiration_days: days,
            token_expiration_seconds: seconds,
            page_size: 5,
        }
    }

    pub fn from_env() -> AppResult<Self> {
        let profile = match env::var("APP_SETTINGS") {
            Ok(value) => value.parse()?,
            Err(_) => Profile::Development,
        };
        let defaults = Self::defaults(profile);

        Ok(Self {
            profile,
            mongo_conn_string: env::var("MONGO_CONN_STRING").unwrap_or(defaults.mongo_conn_string),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or(defaults.mongo_db_name),
            web_server_host: env::var("WEB_SERVER_HOST").unwrap_or(defaults.web_server_host),
            web_server_port: parse_var("WEB_SERVER_PORT").unwrap_or(defaults.web_server_port),
            base_url: env::var("BASE_URL").unwrap_or(defaults.base_url),
            secret_key: env::var("SECRET_KEY")
                .map(SecretString::from)
                .unwrap_or(defaults.secret_key),
            bcrypt_cost: parse_var("BCRYPT_LOG_ROUNDS").unwrap_or(defaults.bcrypt_cost),
            token_expiration_days: parse_var("TOKEN_EXPIRATION_DAYS")
                .unwrap_or(defaults.token_expiration_days),
            token_expiration_seconds: parse_var("TOKEN_EXPIRATION_SECONDS")
                .unwrap_or(defaults.token_expiration_seconds),
            page_size: parse_var("PAGINATION_NUMBER")
                .filter(|size| *size > 0)
                .unwrap_or(defaults.page_size),
        })
    }

    /// Token lifetime as `days + seconds`. Values chrono cannot represent are
    /// a configuration error.
    pub fn token_ttl(&self) -> AppResult<Duration> {
        Duration::try_days(self.token_expiration_days)
            .zip(Duration::try_seconds(self.token_expiration_seconds))
            .and_then(|(days, seconds)| days.checked_add(&seconds))
            .ok_or_else(|| {
                AppError::InternalError(format!(
                    "token expiration of {} days and {} seconds is out of range",
                    self.token_expiration_days, self.token_expiration_seconds
                ))
            })
    }

    /// Rejects settings that must never reach a production deployment.
    pub fn validate_for_production(&self) -> AppResult<()> {
        if self.profile != Profile::Production {
            return Ok(());
        }

        let secret = self.secret_key.expose_secret();
        if secret == DEV_SECRET_KEY || secret == TEST_SECRET_KEY {
            return Err(AppError::InternalError(
                "SECRET_KEY is using a default value; set it to a secure random string".to_string(),
            ));
        }
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::InternalError(format!(
                "SECRET_KEY is too short ({}); it must be at least {} characters",
                secret.len(),
                MIN_SECRET_LEN
            )));
        }
        if self.token_ttl()? <= Duration::zero() {
            return Err(AppError::InternalError(
                "token expiration must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

fn parse_var<T: FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.parse().ok())
}

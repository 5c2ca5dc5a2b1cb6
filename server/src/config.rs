// server/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::str::FromStr;

/// Which `UserRepository` implementation backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
  Postgres,
  Memory,
}

impl FromStr for StorageKind {
  type Err = AppError;

  fn from_str(s: &str) -> Result<Self> {
    match s.trim().to_ascii_lowercase().as_str() {
      "postgres" | "postgresql" => Ok(StorageKind::Postgres),
      "memory" | "in-memory" => Ok(StorageKind::Memory),
      other => Err(AppError::Config(format!(
        "Invalid STORAGE value '{}': expected 'postgres' or 'memory'",
        other
      ))),
    }
  }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub storage: StorageKind,
  // Required only when storage is Postgres.
  pub database_url: Option<String>,
  pub log_json: bool,
}

fn optional_env(name: &str) -> Option<String> {
  env::var(name).ok().filter(|value| !value.trim().is_empty())
}

fn required_env(name: &str) -> Result<String> {
  optional_env(name).ok_or_else(|| AppError::Config(format!("{} must be set", name)))
}

/// Parses `name`, falling back to `default` when the variable is unset.
fn parsed_env<T>(name: &str, default: T) -> Result<T>
where
  T: FromStr,
  T::Err: std::fmt::Display,
{
  match optional_env(name) {
    Some(raw) => raw
      .trim()
      .parse()
      .map_err(|e| AppError::Config(format!("Invalid {} value '{}': {}", name, raw, e))),
    None => Ok(default),
  }
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let storage = match optional_env("STORAGE") {
      Some(raw) => raw.parse::<StorageKind>()?,
      None => StorageKind::Postgres,
    };
    let database_url = match storage {
      StorageKind::Postgres => Some(required_env("DATABASE_URL")?),
      StorageKind::Memory => optional_env("DATABASE_URL"),
    };

    Ok(Self {
      server_host: optional_env("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
      server_port: parsed_env("SERVER_PORT", 8080u16)?,
      storage,
      database_url,
      log_json: parsed_env("LOG_JSON", false)?,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}

//! Runtime configuration from the environment (and `.env` in development).
//!
//! - `FITLOG_DB_PATH`: database file; defaults to the app data dir
//! - `FITLOG_LOG`: tracing filter, e.g. `fit_log_lib=debug`
//! - `FITLOG_BODY_WEIGHT_KG`: body weight for cardio estimates when the profile has none
//! - `FITLOG_CARDIO_TABLE`: JSON file replacing the built-in cardio coefficients

use std::env;
use std::fs;
use std::path::PathBuf;

use crate::metrics::{CardioCalorieTable, DEFAULT_BODY_WEIGHT_KG};

pub const DB_PATH_VAR: &str = "FITLOG_DB_PATH";
pub const LOG_VAR: &str = "FITLOG_LOG";
pub const BODY_WEIGHT_VAR: &str = "FITLOG_BODY_WEIGHT_KG";
pub const CARDIO_TABLE_VAR: &str = "FITLOG_CARDIO_TABLE";

const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
  pub db_path: Option<PathBuf>,
  pub log_filter: String,
  pub body_weight_kg: f64,
  pub cardio_table: CardioCalorieTable,
}

impl Default for AppConfig {
  fn default() -> Self {
    Self {
      db_path: None,
      log_filter: DEFAULT_LOG_FILTER.to_string(),
      body_weight_kg: DEFAULT_BODY_WEIGHT_KG,
      cardio_table: CardioCalorieTable::default(),
    }
  }
}

impl AppConfig {
  /// Load configuration, reading `.env` first if present
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_vars()
  }

  /// Load from the process environment only
  pub fn from_vars() -> Result<Self, ConfigError> {
    let db_path = non_empty_var(DB_PATH_VAR).map(PathBuf::from);

    let log_filter = non_empty_var(LOG_VAR).unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let body_weight_kg = match non_empty_var(BODY_WEIGHT_VAR) {
      Some(raw) => raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|w| w.is_finite() && *w > 0.0)
        .ok_or(ConfigError::Invalid {
          var: BODY_WEIGHT_VAR,
          value: raw,
        })?,
      None => DEFAULT_BODY_WEIGHT_KG,
    };

    let cardio_table = match non_empty_var(CARDIO_TABLE_VAR) {
      Some(path) => {
        let json = fs::read_to_string(&path).map_err(|e| ConfigError::CardioTable {
          path: path.clone(),
          message: e.to_string(),
        })?;
        CardioCalorieTable::from_json(&json)
          .map_err(|message| ConfigError::CardioTable { path, message })?
      }
      None => CardioCalorieTable::default(),
    };

    Ok(Self {
      db_path,
      log_filter,
      body_weight_kg,
      cardio_table,
    })
  }
}

fn non_empty_var(name: &str) -> Option<String> {
  env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
  #[error("Invalid value for {var}: '{value}'")]
  Invalid { var: &'static str, value: String },

  #[error("Failed to load cardio table from {path}: {message}")]
  CardioTable { path: String, message: String },
}

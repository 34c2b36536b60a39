//! Error types shared by the stores and the command layer.

use serde::Serialize;

/// ---------------------------------------------------------------------------
/// Store Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
  #[error("Database error: {0}")]
  Database(String),

  #[error("Corrupt record under '{key}': {message}")]
  Serialization { key: String, message: String },

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error("Not found: {0}")]
  NotFound(String),
}

impl From<sqlx::Error> for StoreError {
  fn from(e: sqlx::Error) -> Self {
    StoreError::Database(e.to_string())
  }
}

impl From<validator::ValidationErrors> for StoreError {
  fn from(e: validator::ValidationErrors) -> Self {
    StoreError::Validation(e.to_string())
  }
}

impl Serialize for StoreError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Auth Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
  #[error("Username already exists")]
  DuplicateIdentity,

  #[error("Username not found")]
  UnknownIdentity,

  #[error("Incorrect password")]
  InvalidCredential,

  #[error("Invalid input: {0}")]
  Validation(String),

  #[error(transparent)]
  Store(#[from] StoreError),
}

impl From<sqlx::Error> for AuthError {
  fn from(e: sqlx::Error) -> Self {
    AuthError::Store(e.into())
  }
}

impl From<validator::ValidationErrors> for AuthError {
  fn from(e: validator::ValidationErrors) -> Self {
    AuthError::Validation(e.to_string())
  }
}

impl Serialize for AuthError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

//! Local key-value persistence
//!
//! Two flat tables behind the stores:
//! - `kv_store`: app data as JSON strings (profile, workouts, nutrition, session)
//! - `secure_store`: credentials, looked up by exact key only
//!
//! Every write replaces the whole value. There are no transactions across
//! keys: callers load, mutate in memory, and write the full value back.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::DbPool;
use crate::error::{StoreError, StoreResult};

/// ---------------------------------------------------------------------------
/// Storage Keys
/// ---------------------------------------------------------------------------

pub mod keys {
  pub const PROFILE: &str = "@user_profile";
  pub const APP_SETTINGS: &str = "@app_settings";
  pub const COMPLETED_WORKOUTS: &str = "@completed_workouts";
  pub const ACTIVE_WORKOUT: &str = "@active_strength_workout";
  pub const CONSUMED_FOODS: &str = "@consumed_calories";
  pub const CURRENT_USER: &str = "@auth_current_user";

  /// Per-identity user snapshot, keyed by the normalized identity
  pub fn identity_profile(normalized: &str) -> String {
    format!("@profile_{}", normalized)
  }

  /// Snapshot key written by early builds, still read as a fallback
  pub fn legacy_identity_profile(normalized: &str) -> String {
    format!("profile_{}", normalized)
  }

  /// Per-identity credential in the secure store, keyed by the sanitized identity
  pub fn credential(sanitized: &str) -> String {
    format!("cred_{}", sanitized)
  }
}

/// ---------------------------------------------------------------------------
/// Key-Value Store
/// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct KvStore {
  pool: DbPool,
}

impl KvStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM kv_store WHERE key = ?1")
      .bind(key)
      .fetch_optional(&self.pool)
      .await?;
    Ok(value)
  }

  pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
    sqlx::query(
      r#"
      INSERT INTO kv_store (key, value)
      VALUES (?1, ?2)
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = CURRENT_TIMESTAMP
      "#,
    )
    .bind(key)
    .bind(value)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  pub async fn remove(&self, key: &str) -> StoreResult<()> {
    sqlx::query("DELETE FROM kv_store WHERE key = ?1")
      .bind(key)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  /// Remove several keys. Every key is attempted; the first failure is returned afterwards.
  pub async fn remove_many(&self, keys: &[&str]) -> StoreResult<()> {
    let mut first_error = None;
    for key in keys {
      if let Err(e) = self.remove(key).await {
        tracing::error!(key = %key, error = %e, "Failed to remove key");
        first_error.get_or_insert(e);
      }
    }
    match first_error {
      Some(e) => Err(e),
      None => Ok(()),
    }
  }

  pub async fn all_keys(&self) -> StoreResult<Vec<String>> {
    let keys: Vec<String> = sqlx::query_scalar("SELECT key FROM kv_store ORDER BY key")
      .fetch_all(&self.pool)
      .await?;
    Ok(keys)
  }

  /// Load and decode a JSON value
  pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Option<T>> {
    match self.get(key).await? {
      Some(raw) => serde_json::from_str(&raw)
        .map(Some)
        .map_err(|e| StoreError::Serialization {
          key: key.to_string(),
          message: e.to_string(),
        }),
      None => Ok(None),
    }
  }

  /// Encode and store a JSON value, replacing what was there
  pub async fn set_json<T: Serialize>(&self, key: &str, value: &T) -> StoreResult<()> {
    let raw = serde_json::to_string(value).map_err(|e| StoreError::Serialization {
      key: key.to_string(),
      message: e.to_string(),
    })?;
    self.set(key, &raw).await
  }

  /// Load a JSON array, treating a missing key as empty
  pub async fn get_list<T: DeserializeOwned>(&self, key: &str) -> StoreResult<Vec<T>> {
    Ok(self.get_json::<Vec<T>>(key).await?.unwrap_or_default())
  }

  /// Remove every key in the store. Secrets are not touched.
  pub async fn clear_all(&self) -> StoreResult<usize> {
    let keys = self.all_keys().await?;
    let refs: Vec<&str> = keys.iter().map(String::as_str).collect();
    self.remove_many(&refs).await?;
    tracing::info!(count = keys.len(), "Cleared all app data");
    Ok(keys.len())
  }
}

/// ---------------------------------------------------------------------------
/// Secret Store
/// ---------------------------------------------------------------------------

/// Credential storage. Only exact-key access, no listing.
#[derive(Clone)]
pub struct SecretStore {
  pool: DbPool,
}

impl SecretStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }

  pub async fn get(&self, key: &str) -> StoreResult<Option<String>> {
    let value: Option<String> =
      sqlx::query_scalar("SELECT value FROM secure_store WHERE key = ?1")
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
    Ok(value)
  }

  pub async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
    sqlx::query(
      r#"
      INSERT INTO secure_store (key, value)
      VALUES (?1, ?2)
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = CURRENT_TIMESTAMP
      "#,
    )
    .bind(key)
    .bind(value)
    .execute(&self.pool)
    .await?;

    Ok(())
  }

  pub async fn remove(&self, key: &str) -> StoreResult<()> {
    sqlx::query("DELETE FROM secure_store WHERE key = ?1")
      .bind(key)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db};
  use serde::Deserialize;

  #[derive(Debug, PartialEq, Serialize, Deserialize)]
  struct Sample {
    name: String,
    count: i64,
  }

  #[tokio::test]
  async fn test_set_get_overwrite_remove() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());

    assert_eq!(kv.get("missing").await.unwrap(), None);

    kv.set("greeting", "hello").await.unwrap();
    kv.set("greeting", "hi").await.unwrap();
    assert_eq!(kv.get("greeting").await.unwrap().as_deref(), Some("hi"));

    kv.remove("greeting").await.unwrap();
    assert_eq!(kv.get("greeting").await.unwrap(), None);

    // Removing an absent key is fine
    kv.remove("greeting").await.unwrap();

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_json_helpers_and_corrupt_values() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());

    let sample = Sample { name: "squat".into(), count: 3 };
    kv.set_json("sample", &sample).await.unwrap();
    let loaded: Option<Sample> = kv.get_json("sample").await.unwrap();
    assert_eq!(loaded, Some(sample));

    let empty: Vec<Sample> = kv.get_list("no_list").await.unwrap();
    assert!(empty.is_empty());

    kv.set("sample", "{not json").await.unwrap();
    let result = kv.get_json::<Sample>("sample").await;
    assert!(matches!(result, Err(StoreError::Serialization { ref key, .. }) if key == "sample"));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_remove_many_and_clear_all() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());

    for key in ["a", "b", "c"] {
      kv.set(key, "1").await.unwrap();
    }
    kv.remove_many(&["a", "b", "zzz"]).await.unwrap();
    assert_eq!(kv.all_keys().await.unwrap(), vec!["c".to_string()]);

    let secrets = SecretStore::new(pool.clone());
    secrets.set("cred_x", "pw").await.unwrap();

    assert_eq!(kv.clear_all().await.unwrap(), 1);
    assert!(kv.all_keys().await.unwrap().is_empty());
    // Secrets survive a data reset
    assert_eq!(secrets.get("cred_x").await.unwrap().as_deref(), Some("pw"));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_remove_many_reports_failure_after_trying_every_key() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());
    kv.set("a", "1").await.unwrap();
    pool.close().await;

    let result = kv.remove_many(&["a", "b"]).await;
    assert!(matches!(result, Err(StoreError::Database(_))));
  }

  #[tokio::test]
  async fn test_secret_store_is_separate_from_kv() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());
    let secrets = SecretStore::new(pool.clone());

    secrets.set("cred_alex", "secret").await.unwrap();
    assert_eq!(kv.get("cred_alex").await.unwrap(), None);

    secrets.set("cred_alex", "rotated").await.unwrap();
    assert_eq!(secrets.get("cred_alex").await.unwrap().as_deref(), Some("rotated"));

    secrets.remove("cred_alex").await.unwrap();
    assert_eq!(secrets.get("cred_alex").await.unwrap(), None);

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_key_builders() {
    assert_eq!(keys::identity_profile("alex@example.com"), "@profile_alex@example.com");
    assert_eq!(keys::legacy_identity_profile("alex"), "profile_alex");
    assert_eq!(keys::credential("alex_example.com"), "cred_alex_example.com");
  }
}

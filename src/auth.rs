//! Local Accounts
//!
//! Credentials live in the secret store under `cred_<sanitized identity>`.
//! The signed-in user is written to `@auth_current_user` and mirrored to a
//! per-identity snapshot so a later sign-in restores it.
//!
//! There is no process-wide current user. Operations that act on the
//! signed-in user take the `Session` returned by sign-up/sign-in and return
//! the updated one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::{AuthError, StoreError};
use crate::models::{User, UserPatch};
use crate::storage::{keys, KvStore, SecretStore};
use crate::time_utils::time_id;

/// Trimmed, lower-cased identity used for every lookup
pub fn normalize(identity: &str) -> String {
  identity.trim().to_lowercase()
}

/// Secret-store keys only allow `[A-Za-z0-9._-]`; everything else becomes `_`
pub fn sanitize(normalized: &str) -> String {
  normalized
    .chars()
    .map(|c| {
      if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
        c
      } else {
        '_'
      }
    })
    .collect()
}

/// The signed-in user, handed to callers and passed back explicitly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Session {
  user: User,
}

impl Session {
  pub fn new(user: User) -> Self {
    Self { user }
  }

  pub fn user(&self) -> &User {
    &self.user
  }

  pub fn into_user(self) -> User {
    self.user
  }
}

/// Outcome of an account deletion. Every key is attempted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletionReport {
  pub removed: Vec<String>,
  /// Key and error message for each removal that failed
  pub failed: Vec<(String, String)>,
}

impl DeletionReport {
  pub fn is_complete(&self) -> bool {
    self.failed.is_empty()
  }

  fn record(&mut self, key: String, result: Result<(), StoreError>) {
    match result {
      Ok(()) => self.removed.push(key),
      Err(e) => {
        tracing::error!(key = %key, error = %e, "Failed to remove key during account deletion");
        self.failed.push((key, e.to_string()));
      }
    }
  }
}

const ACCOUNT_KEYS: [&str; 6] = [
  keys::PROFILE,
  keys::APP_SETTINGS,
  keys::COMPLETED_WORKOUTS,
  keys::ACTIVE_WORKOUT,
  keys::CONSUMED_FOODS,
  keys::CURRENT_USER,
];

#[derive(Clone)]
pub struct AuthStore {
  kv: KvStore,
  secrets: SecretStore,
}

impl AuthStore {
  pub fn new(kv: KvStore, secrets: SecretStore) -> Self {
    Self { kv, secrets }
  }

  fn check_input(identity: &str, secret: &str) -> Result<String, AuthError> {
    let normalized = normalize(identity);
    if normalized.is_empty() {
      return Err(AuthError::Validation("Username is required".to_string()));
    }
    if secret.is_empty() {
      return Err(AuthError::Validation("Password is required".to_string()));
    }
    Ok(normalized)
  }

  async fn write_user(&self, user: &User) -> Result<(), AuthError> {
    self.kv.set_json(keys::CURRENT_USER, user).await?;
    self
      .kv
      .set_json(&keys::identity_profile(&user.username), user)
      .await?;
    Ok(())
  }

  async fn load_snapshot(&self, normalized: &str) -> Result<Option<User>, AuthError> {
    if let Some(user) = self.kv.get_json(&keys::identity_profile(normalized)).await? {
      return Ok(Some(user));
    }
    Ok(
      self
        .kv
        .get_json(&keys::legacy_identity_profile(normalized))
        .await?,
    )
  }

  pub async fn sign_up(
    &self,
    identity: &str,
    secret: &str,
    now: DateTime<Utc>,
  ) -> Result<Session, AuthError> {
    let normalized = Self::check_input(identity, secret)?;
    let cred_key = keys::credential(&sanitize(&normalized));

    if self.secrets.get(&cred_key).await?.is_some() {
      return Err(AuthError::DuplicateIdentity);
    }
    self.secrets.set(&cred_key, secret).await?;

    let user = User {
      id: time_id(now, |_| false),
      username: normalized,
      name: None,
      email: None,
      has_completed_onboarding: false,
    };
    self.write_user(&user).await?;

    tracing::info!(user_id = %user.id, "Account created");
    Ok(Session::new(user))
  }

  pub async fn sign_in(&self, identity: &str, secret: &str) -> Result<Session, AuthError> {
    let normalized = Self::check_input(identity, secret)?;
    let cred_key = keys::credential(&sanitize(&normalized));

    let stored = self
      .secrets
      .get(&cred_key)
      .await?
      .ok_or(AuthError::UnknownIdentity)?;

    if !bool::from(stored.as_bytes().ct_eq(secret.as_bytes())) {
      tracing::warn!("Sign-in rejected: incorrect password");
      return Err(AuthError::InvalidCredential);
    }

    let user = match self.load_snapshot(&normalized).await? {
      Some(user) => user,
      None => User {
        id: normalized.clone(),
        username: normalized.clone(),
        name: None,
        email: None,
        has_completed_onboarding: false,
      },
    };
    self.kv.set_json(keys::CURRENT_USER, &user).await?;

    tracing::info!(user_id = %user.id, "Signed in");
    Ok(Session::new(user))
  }

  pub async fn sign_out(&self) -> Result<(), AuthError> {
    self.kv.remove(keys::CURRENT_USER).await?;
    tracing::info!("Signed out");
    Ok(())
  }

  /// The persisted session from a previous launch, if any
  pub async fn current_session(&self) -> Result<Option<Session>, AuthError> {
    let user: Option<User> = self.kv.get_json(keys::CURRENT_USER).await?;
    Ok(user.map(Session::new))
  }

  /// Merge `patch` into the session's user and persist both copies
  pub async fn update_user(&self, session: Session, patch: UserPatch) -> Result<Session, AuthError> {
    let mut user = session.into_user();
    patch.apply_to(&mut user);
    self.write_user(&user).await?;
    Ok(Session::new(user))
  }

  pub async fn complete_onboarding(&self, session: Session) -> Result<Session, AuthError> {
    self
      .update_user(
        session,
        UserPatch {
          has_completed_onboarding: Some(true),
          ..Default::default()
        },
      )
      .await
  }

  /// Remove the credential, the identity snapshot and all app data.
  /// Each removal is independent; failures are logged and reported, and
  /// never stop the remaining removals. A blank identity removes nothing.
  pub async fn delete_account(&self, identity: &str) -> Result<DeletionReport, AuthError> {
    let normalized = normalize(identity);
    if normalized.is_empty() {
      return Err(AuthError::Validation("Username is required".to_string()));
    }
    let mut report = DeletionReport::default();

    let cred_key = keys::credential(&sanitize(&normalized));
    let result = self.secrets.remove(&cred_key).await;
    report.record(cred_key, result);

    for key in [
      keys::identity_profile(&normalized),
      keys::legacy_identity_profile(&normalized),
    ] {
      let result = self.kv.remove(&key).await;
      report.record(key, result);
    }

    for key in ACCOUNT_KEYS {
      let result = self.kv.remove(key).await;
      report.record(key.to_string(), result);
    }

    tracing::info!(
      removed = report.removed.len(),
      failed = report.failed.len(),
      "Account deletion finished"
    );
    Ok(report)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::{setup_test_db, teardown_test_db};
  use chrono::TimeZone;

  fn store(pool: &sqlx::SqlitePool) -> AuthStore {
    AuthStore::new(KvStore::new(pool.clone()), SecretStore::new(pool.clone()))
  }

  fn now() -> DateTime<Utc> {
    Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
  }

  #[test]
  fn test_normalize_and_sanitize() {
    assert_eq!(normalize("  Alex@Example.COM "), "alex@example.com");
    assert_eq!(sanitize("alex@example.com"), "alex_example.com");
    assert_eq!(sanitize("a-b_c.d 9"), "a-b_c.d_9");
    // Distinct identities can collide
    assert_eq!(sanitize("a@b"), sanitize("a+b"));
  }

  #[tokio::test]
  async fn test_sign_up_then_sign_in() {
    let pool = setup_test_db().await;
    let auth = store(&pool);

    let session = auth.sign_up(" Alex@Example.com", "hunter22", now()).await.unwrap();
    assert_eq!(session.user().username, "alex@example.com");
    assert_eq!(session.user().id, "1700000000000");
    assert!(!session.user().has_completed_onboarding);

    let current = auth.current_session().await.unwrap();
    assert_eq!(current, Some(session.clone()));

    auth.sign_out().await.unwrap();
    assert_eq!(auth.current_session().await.unwrap(), None);

    let again = auth.sign_in("alex@example.com", "hunter22").await.unwrap();
    assert_eq!(again, session);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sign_up_rejects_duplicate_identity() {
    let pool = setup_test_db().await;
    let auth = store(&pool);

    auth.sign_up("alex", "secret1", now()).await.unwrap();
    let dup = auth.sign_up("  ALEX ", "other", now()).await;
    assert!(matches!(dup, Err(AuthError::DuplicateIdentity)));

    let blank = auth.sign_up("   ", "secret1", now()).await;
    assert!(matches!(blank, Err(AuthError::Validation(_))));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sign_in_errors() {
    let pool = setup_test_db().await;
    let auth = store(&pool);

    let unknown = auth.sign_in("nobody", "pw").await;
    assert!(matches!(unknown, Err(AuthError::UnknownIdentity)));

    auth.sign_up("alex", "correct", now()).await.unwrap();
    let wrong = auth.sign_in("alex", "incorrect").await;
    assert!(matches!(wrong, Err(AuthError::InvalidCredential)));
    let prefix = auth.sign_in("alex", "correc").await;
    assert!(matches!(prefix, Err(AuthError::InvalidCredential)));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sign_in_without_snapshot_builds_basic_user() {
    let pool = setup_test_db().await;
    let secrets = SecretStore::new(pool.clone());
    secrets.set("cred_sam", "pw").await.unwrap();

    let session = store(&pool).sign_in("Sam", "pw").await.unwrap();
    assert_eq!(session.user().id, "sam");
    assert_eq!(session.user().username, "sam");

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_sign_in_reads_legacy_snapshot_key() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());
    SecretStore::new(pool.clone()).set("cred_sam", "pw").await.unwrap();
    kv.set(
      "profile_sam",
      r#"{"id":"42","username":"sam","name":"Sam","hasCompletedOnboarding":true}"#,
    )
    .await
    .unwrap();

    let session = store(&pool).sign_in("sam", "pw").await.unwrap();
    assert_eq!(session.user().id, "42");
    assert!(session.user().has_completed_onboarding);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_update_user_writes_session_and_snapshot() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());
    let auth = store(&pool);

    let session = auth.sign_up("alex", "pw1234", now()).await.unwrap();
    let session = auth
      .update_user(
        session,
        UserPatch {
          name: Some("Alex".into()),
          ..Default::default()
        },
      )
      .await
      .unwrap();
    let session = auth.complete_onboarding(session).await.unwrap();

    assert_eq!(session.user().name.as_deref(), Some("Alex"));
    assert!(session.user().has_completed_onboarding);

    let snapshot: Option<User> = kv.get_json(&keys::identity_profile("alex")).await.unwrap();
    assert_eq!(snapshot.as_ref(), Some(session.user()));
    assert_eq!(auth.current_session().await.unwrap(), Some(session));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_delete_account_removes_everything() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());
    let auth = store(&pool);

    auth.sign_up("alex@example.com", "pw1234", now()).await.unwrap();
    kv.set(keys::PROFILE, "{}").await.unwrap();
    kv.set(keys::COMPLETED_WORKOUTS, "[]").await.unwrap();
    kv.set("unrelated", "1").await.unwrap();

    let report = auth.delete_account("Alex@Example.com").await.unwrap();
    assert!(report.is_complete());
    assert_eq!(report.removed.len(), 9);
    assert!(report.removed.contains(&"cred_alex_example.com".to_string()));

    let remaining = kv.all_keys().await.unwrap();
    assert_eq!(remaining, vec!["unrelated".to_string()]);

    let signin = auth.sign_in("alex@example.com", "pw1234").await;
    assert!(matches!(signin, Err(AuthError::UnknownIdentity)));

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_delete_account_with_blank_identity_removes_nothing() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());
    let auth = store(&pool);

    auth.sign_up("alex", "pw1234", now()).await.unwrap();
    kv.set(keys::PROFILE, "{}").await.unwrap();
    kv.set(keys::COMPLETED_WORKOUTS, "[]").await.unwrap();
    let before = kv.all_keys().await.unwrap();

    let result = auth.delete_account("   ").await;
    assert!(matches!(result, Err(AuthError::Validation(_))));

    assert_eq!(kv.all_keys().await.unwrap(), before);
    assert!(auth.sign_in("alex", "pw1234").await.is_ok());

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_delete_account_attempts_every_key_on_failure() {
    let pool = setup_test_db().await;
    let auth = store(&pool);
    pool.close().await;

    let report = auth.delete_account("alex").await.unwrap();
    assert!(report.removed.is_empty());
    assert_eq!(report.failed.len(), 9);
    assert_eq!(report.failed[0].0, "cred_alex");
    assert_eq!(report.failed[8].0, keys::CURRENT_USER);
  }
}

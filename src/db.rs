use chrono::{DateTime, NaiveDate, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::{AuthStore, DeletionReport, Session};
use crate::config::AppConfig;
use crate::error::{AuthError, StoreResult};
use crate::metrics::BodyMetrics;
use crate::models::CardioWorkout;
use crate::nutrition::{NutritionStore, NutritionSummary};
use crate::onboarding::{self, OnboardingDraft};
use crate::profile::ProfileStore;
use crate::settings::SettingsStore;
use crate::storage::{KvStore, SecretStore};
use crate::workouts::{BurnSummary, CardioEntry, WorkoutStore};

pub type DbPool = SqlitePool;

const DB_FILE_NAME: &str = "fit-log.db";

/// Application state holding the database connection pool
pub struct AppState {
  pub db: DbPool,
  pub config: AppConfig,
}

impl AppState {
  pub fn new(db: DbPool, config: AppConfig) -> Self {
    Self { db, config }
  }

  pub fn kv(&self) -> KvStore {
    KvStore::new(self.db.clone())
  }

  pub fn profiles(&self) -> ProfileStore {
    ProfileStore::new(self.kv())
  }

  pub fn settings(&self) -> SettingsStore {
    SettingsStore::new(self.kv())
  }

  pub fn workouts(&self) -> WorkoutStore {
    WorkoutStore::new(self.kv())
  }

  pub fn nutrition(&self) -> NutritionStore {
    NutritionStore::new(self.kv())
  }

  pub fn auth(&self) -> AuthStore {
    AuthStore::new(self.kv(), SecretStore::new(self.db.clone()))
  }

  /// ---------------------------------------------------------------------------
  /// Operations spanning more than one store
  /// ---------------------------------------------------------------------------

  /// Profile weight, else the configured fallback
  pub async fn body_weight_kg(&self) -> StoreResult<f64> {
    let profile = self.profiles().load_or_default().await?;
    Ok(
      profile
        .weight
        .filter(|w| *w > 0)
        .map(|w| w as f64)
        .unwrap_or(self.config.body_weight_kg),
    )
  }

  pub async fn body_metrics(&self, today: NaiveDate) -> StoreResult<BodyMetrics> {
    let profile = self.profiles().load_or_default().await?;
    Ok(BodyMetrics::for_profile(&profile, today))
  }

  pub async fn log_cardio(&self, entry: CardioEntry, now: DateTime<Utc>) -> StoreResult<CardioWorkout> {
    let weight = self.body_weight_kg().await?;
    self
      .workouts()
      .log_cardio(entry, &self.config.cardio_table, weight, now)
      .await
  }

  pub async fn burn_summary(&self, day: NaiveDate) -> StoreResult<BurnSummary> {
    let goal = self.profiles().load_or_default().await?.daily_burn_goal();
    self.workouts().burn_summary(day, goal).await
  }

  pub async fn nutrition_summary(&self, day: NaiveDate) -> StoreResult<NutritionSummary> {
    let goal = self.profiles().load_or_default().await?.daily_calorie_goal();
    self.nutrition().summary(day, goal).await
  }

  pub async fn complete_onboarding(
    &self,
    draft: OnboardingDraft,
    now: DateTime<Utc>,
  ) -> Result<Session, AuthError> {
    onboarding::complete_onboarding(&self.auth(), &self.profiles(), draft, now).await
  }

  pub async fn delete_account(&self, identity: &str) -> Result<DeletionReport, AuthError> {
    self.auth().delete_account(identity).await
  }

  /// Remove every app-data key. Credentials cannot be listed and stay behind.
  pub async fn clear_all_data(&self) -> StoreResult<usize> {
    self.kv().clear_all().await
  }
}

/// Get the path to the database file
/// Stored in the platform app data dir unless FITLOG_DB_PATH overrides it
#[cfg(feature = "app")]
fn get_db_path<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &AppConfig,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
  use tauri::Manager;

  if let Some(path) = &config.db_path {
    return Ok(path.clone());
  }

  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| format!("Failed to get app data dir: {}", e))?;

  Ok(db_file_in(&data_dir))
}

/// Initialize the database for the running app
#[cfg(feature = "app")]
pub async fn initialize_db<R: tauri::Runtime>(
  app: &tauri::AppHandle<R>,
  config: &AppConfig,
) -> Result<DbPool, Box<dyn std::error::Error>> {
  let db_path = get_db_path(app, config)?;
  connect(&db_path).await
}

/// Open (creating if needed) the database file and run migrations
pub async fn connect(db_path: &Path) -> Result<DbPool, Box<dyn std::error::Error>> {
  // Create directory if it doesn't exist
  if let Some(parent) = db_path.parent() {
    fs::create_dir_all(parent)?;
  }

  let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
  tracing::info!(path = %db_path.display(), "Initializing database");

  // Create connection pool
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;

  // Run migrations
  sqlx::migrate!("./migrations").run(&pool).await?;

  tracing::info!("Database initialized successfully");

  Ok(pool)
}

/// Default file name used when a caller only has a directory
pub fn db_file_in(dir: &Path) -> PathBuf {
  dir.join(DB_FILE_NAME)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::{Profile, ProfilePatch};
  use crate::test_utils::{
    local_instant, mock_cardio, mock_food_item, mock_profile, seed_test_profile, setup_test_db,
    teardown_test_db, today,
  };

  async fn state() -> AppState {
    AppState::new(setup_test_db().await, AppConfig::default())
  }

  #[tokio::test]
  async fn test_body_weight_falls_back_to_config() {
    let mut config = AppConfig::default();
    config.body_weight_kg = 82.0;
    let state = AppState::new(setup_test_db().await, config);

    assert_eq!(state.body_weight_kg().await.unwrap(), 82.0);

    state
      .profiles()
      .save(ProfilePatch {
        weight: Some(64),
        ..Default::default()
      })
      .await
      .unwrap();
    assert_eq!(state.body_weight_kg().await.unwrap(), 64.0);

    teardown_test_db(state.db.clone()).await;
  }

  #[tokio::test]
  async fn test_log_cardio_uses_profile_weight() {
    let state = state().await;
    seed_test_profile(&state.kv(), &mock_profile()).await;

    let entry = CardioEntry {
      activity_name: "Run".into(),
      distance: "5".into(),
      duration: "30".into(),
      ..Default::default()
    };
    let saved = state.log_cardio(entry, local_instant(today(), 7)).await.unwrap();
    assert_eq!(saved.calories, "350");

    teardown_test_db(state.db.clone()).await;
  }

  #[tokio::test]
  async fn test_summaries_use_profile_goals() {
    let state = state().await;
    let mut profile = Profile::default();
    profile.daily_calorie_goal = Some(1500);
    profile.daily_calorie_burn_goal = Some(400);
    seed_test_profile(&state.kv(), &profile).await;

    let day = today();
    state.workouts().append(mock_cardio("1", "100", local_instant(day, 7))).await.unwrap();
    state.nutrition().append(&mock_food_item(), 2.0, local_instant(day, 8)).await.unwrap();

    let burn = state.burn_summary(day).await.unwrap();
    assert_eq!(burn.goal, 400);
    assert_eq!(burn.remaining, 300);

    let intake = state.nutrition_summary(day).await.unwrap();
    assert_eq!(intake.goal, 1500);
    assert_eq!(intake.totals.calories, 156.0);

    let metrics = state.body_metrics(day).await.unwrap();
    assert_eq!(metrics.daily_calorie_goal, 1500);

    teardown_test_db(state.db.clone()).await;
  }

  #[tokio::test]
  async fn test_clear_all_data() {
    let state = state().await;
    seed_test_profile(&state.kv(), &mock_profile()).await;
    state.workouts().append(mock_cardio("1", "100", Utc::now())).await.unwrap();

    assert_eq!(state.clear_all_data().await.unwrap(), 2);
    assert!(state.profiles().load().await.unwrap().is_none());

    teardown_test_db(state.db.clone()).await;
  }

  #[tokio::test]
  async fn test_connect_creates_file_and_schema() {
    let dir = std::env::temp_dir().join(format!(
      "fit-log-db-test-{}",
      chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let path = db_file_in(&dir);

    let pool = connect(&path).await.expect("Should open database");
    assert!(path.exists());

    let tables: Vec<(String,)> = sqlx::query_as(
      "SELECT name FROM sqlite_master WHERE type='table' AND name IN ('kv_store', 'secure_store')",
    )
    .fetch_all(&pool)
    .await
    .expect("Failed to query tables");
    assert_eq!(tables.len(), 2);

    pool.close().await;
    let _ = fs::remove_dir_all(&dir);
  }
}

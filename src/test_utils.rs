//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Database setup/teardown
//! - Mock data factories
//! - Local-time helpers
//! - Helper assertions

use crate::models::{
  CardioKind, CardioWorkout, ConsumedFood, Exercise, FoodItem, Profile, StrengthWorkout, Workout,
  WorkoutSet,
};
use crate::storage::{keys, KvStore};
use chrono::{DateTime, Duration, Local, NaiveDate, TimeZone, Utc};
use sqlx::SqlitePool;

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  // Run migrations
  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// Store a profile record
pub async fn seed_test_profile(kv: &KvStore, profile: &Profile) {
  kv.set_json(keys::PROFILE, profile)
    .await
    .expect("Failed to seed profile");
}

/// Store a raw JSON value under a key, bypassing the typed stores
pub async fn seed_raw(kv: &KvStore, key: &str, json: &str) {
  kv.set(key, json).await.expect("Failed to seed raw value");
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Profile with the reference body measurements (175 cm, 70 kg)
pub fn mock_profile() -> Profile {
  serde_json::from_value(serde_json::json!({
    "name": "Test User",
    "email": "test@example.com",
    "gender": "male",
    "dateOfBirth": "2000-01-01",
    "height": 175,
    "weight": 70,
    "aim": "maintain"
  }))
  .expect("Failed to build mock profile")
}

pub fn mock_cardio(id: &str, calories: &str, timestamp: DateTime<Utc>) -> Workout {
  Workout::Cardio(CardioWorkout {
    id: id.to_string(),
    activity_name: "Morning Run".to_string(),
    workout_type: Some(CardioKind::Run),
    distance: "5".to_string(),
    duration: "30".to_string(),
    calories: calories.to_string(),
    timestamp,
  })
}

/// Strength workout with one exercise and one 60 kg x 5 set
pub fn mock_strength(id: &str, total_calories: Option<i64>, timestamp: DateTime<Utc>) -> Workout {
  Workout::Strength(StrengthWorkout {
    id: id.to_string(),
    title: "Push Day".to_string(),
    duration: Some(1800),
    exercises: vec![Exercise {
      id: format!("{}-ex", id),
      name: "Bench Press".to_string(),
      sets: vec![WorkoutSet {
        id: format!("{}-set", id),
        weight: "60".to_string(),
        reps: "5".to_string(),
        calories: Some(2.1),
      }],
    }],
    total_calories,
    timestamp,
  })
}

pub fn mock_food_item() -> FoodItem {
  FoodItem {
    id: "1".to_string(),
    name: "Idli".to_string(),
    category: "Indian Breakfast".to_string(),
    calories: 78.0,
    protein: 2.0,
    carbs: 17.0,
    fats: 0.5,
    serving_size: "2 pieces".to_string(),
  }
}

pub fn mock_consumed(id: &str, calories: f64, consumed_at: DateTime<Utc>) -> ConsumedFood {
  ConsumedFood {
    id: id.to_string(),
    name: format!("Food {}", id),
    category: "Western".to_string(),
    calories: Some(calories),
    protein: Some(10.0),
    carbs: Some(20.0),
    fats: Some(5.0),
    serving_size: "1 serving".to_string(),
    quantity: Some(1.0),
    consumed_at,
  }
}

/// ---------------------------------------------------------------------------
/// Time Helpers
/// ---------------------------------------------------------------------------

/// Instant at the given local wall-clock hour on `day`
pub fn local_instant(day: NaiveDate, hour: u32) -> DateTime<Utc> {
  let naive = day.and_hms_opt(hour, 0, 0).expect("Invalid hour");
  Local
    .from_local_datetime(&naive)
    .earliest()
    .expect("Nonexistent local time")
    .with_timezone(&Utc)
}

pub fn today() -> NaiveDate {
  Local::now().date_naive()
}

pub fn days_ago(days: i64) -> NaiveDate {
  today() - Duration::days(days)
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let left_val = $left;
    let right_val = $right;
    let diff = (left_val - right_val).abs();
    assert!(
      diff < $tolerance,
      "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}`,\n  tolerance: `{:?}`",
      left_val,
      right_val,
      diff,
      $tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::time_utils::local_day;

  #[tokio::test]
  async fn test_setup_test_db() {
    let pool = setup_test_db().await;

    let tables: Vec<(String,)> =
      sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name='kv_store'")
        .fetch_all(&pool)
        .await
        .expect("Failed to query tables");
    assert_eq!(tables.len(), 1);

    teardown_test_db(pool).await;
  }

  #[tokio::test]
  async fn test_seed_test_profile() {
    let pool = setup_test_db().await;
    let kv = KvStore::new(pool.clone());

    seed_test_profile(&kv, &mock_profile()).await;
    let stored: Option<Profile> = kv.get_json(keys::PROFILE).await.unwrap();
    assert_eq!(stored.and_then(|p| p.height), Some(175));

    teardown_test_db(pool).await;
  }

  #[test]
  fn test_local_instant_lands_on_day() {
    let day = days_ago(3);
    assert_eq!(local_day(local_instant(day, 9)), day);
    assert_eq!(local_day(local_instant(day, 23)), day);
  }

  #[test]
  fn test_assert_approx_eq_macro() {
    assert_approx_eq!(1.0_f64, 1.001, 0.01);
    assert_approx_eq!(100.0_f64, 100.05, 0.1);
  }

  #[test]
  #[should_panic]
  fn test_assert_approx_eq_macro_fails() {
    assert_approx_eq!(1.0_f64, 2.0, 0.01);
  }
}

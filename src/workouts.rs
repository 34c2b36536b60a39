//! Workout History and the In-Progress Session
//!
//! Completed workouts live in one array, newest first. The in-progress
//! strength session is a separate singleton record; completing it appends
//! to the history and then removes the singleton. Those are two writes, so
//! a crash in between can leave the session behind to be completed again.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{StoreError, StoreResult};
use crate::metrics::{self, CardioCalorieTable};
use crate::models::{ActiveWorkout, CardioKind, CardioWorkout, StrengthWorkout, Workout};
use crate::storage::{keys, KvStore};
use crate::time_utils::{local_day, time_id};

/// ---------------------------------------------------------------------------
/// Cardio Entry
/// ---------------------------------------------------------------------------

/// Cardio form input. Distance and duration stay as typed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CardioEntry {
  #[validate(custom(function = "crate::models::not_blank"))]
  pub activity_name: String,
  #[serde(default)]
  pub workout_type: Option<CardioKind>,
  #[validate(custom(function = "crate::models::not_blank"))]
  pub distance: String,
  #[validate(custom(function = "crate::models::not_blank"))]
  pub duration: String,
  /// Left empty to have it estimated
  #[serde(default)]
  pub calories: Option<String>,
}

impl CardioEntry {
  pub fn kind(&self) -> CardioKind {
    self
      .workout_type
      .unwrap_or_else(|| CardioKind::from_label(&self.activity_name))
  }

  /// Build the stored record, estimating calories when none were given
  pub fn into_workout(
    self,
    id: String,
    now: DateTime<Utc>,
    table: &CardioCalorieTable,
    weight_kg: f64,
  ) -> CardioWorkout {
    let kind = self.kind();
    let calories = match self.calories.as_deref().map(str::trim) {
      Some(given) if !given.is_empty() => given.to_string(),
      _ => metrics::cardio_calories(table, kind, &self.distance, &self.duration, weight_kg)
        .to_string(),
    };

    CardioWorkout {
      id,
      activity_name: self.activity_name.trim().to_string(),
      workout_type: Some(kind),
      distance: self.distance.trim().to_string(),
      duration: self.duration.trim().to_string(),
      calories,
      timestamp: now,
    }
  }
}

/// ---------------------------------------------------------------------------
/// Burn Summary
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BurnSummary {
  pub day: NaiveDate,
  pub workout_count: usize,
  pub calories_burned: i64,
  pub goal: i64,
  /// Percent of goal, capped at 100
  pub progress: f64,
  pub remaining: i64,
}

impl BurnSummary {
  pub fn for_workouts(day: NaiveDate, workouts: &[Workout], goal: i64) -> Self {
    let calories_burned: i64 = workouts.iter().map(Workout::calories_burned).sum();
    let progress = if goal > 0 {
      (calories_burned as f64 / goal as f64 * 100.0).min(100.0)
    } else {
      0.0
    };

    Self {
      day,
      workout_count: workouts.len(),
      calories_burned,
      goal,
      progress,
      remaining: (goal - calories_burned).max(0),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Workout Store
/// ---------------------------------------------------------------------------

#[derive(Clone)]
pub struct WorkoutStore {
  kv: KvStore,
}

impl WorkoutStore {
  pub fn new(kv: KvStore) -> Self {
    Self { kv }
  }

  /// Full history, newest first
  pub async fn list_all(&self) -> StoreResult<Vec<Workout>> {
    self.kv.get_list(keys::COMPLETED_WORKOUTS).await
  }

  /// Workouts whose timestamp falls on `day` in the device's timezone
  pub async fn list_for_day(&self, day: NaiveDate) -> StoreResult<Vec<Workout>> {
    let all = self.list_all().await?;
    Ok(
      all
        .into_iter()
        .filter(|w| local_day(w.timestamp()) == day)
        .collect(),
    )
  }

  pub async fn find(&self, id: &str) -> StoreResult<Option<Workout>> {
    let all = self.list_all().await?;
    Ok(all.into_iter().find(|w| w.id() == id))
  }

  /// Insert at the front of the history. A missing or colliding id is
  /// replaced with a fresh time-derived one.
  pub async fn append(&self, mut workout: Workout) -> StoreResult<Workout> {
    let mut all = self.list_all().await?;

    let collides = |id: &str| all.iter().any(|w| w.id() == id);
    if workout.id().is_empty() || collides(workout.id()) {
      let id = time_id(workout.timestamp(), collides);
      workout.set_id(id);
    }

    all.insert(0, workout.clone());
    self.kv.set_json(keys::COMPLETED_WORKOUTS, &all).await?;

    tracing::info!(id = %workout.id(), name = %workout.display_name(), "Saved workout");
    Ok(workout)
  }

  /// Drop every workout whose id is in `ids`. Returns how many were removed.
  pub async fn remove_many(&self, ids: &[String]) -> StoreResult<usize> {
    let all = self.list_all().await?;
    let before = all.len();
    let kept: Vec<Workout> = all
      .into_iter()
      .filter(|w| !ids.iter().any(|id| id == w.id()))
      .collect();
    let removed = before - kept.len();

    if removed > 0 {
      self.kv.set_json(keys::COMPLETED_WORKOUTS, &kept).await?;
      tracing::info!(removed, "Deleted workouts");
    }
    Ok(removed)
  }

  /// Validate a cardio entry and append it to the history
  pub async fn log_cardio(
    &self,
    entry: CardioEntry,
    table: &CardioCalorieTable,
    weight_kg: f64,
    now: DateTime<Utc>,
  ) -> StoreResult<CardioWorkout> {
    entry.validate()?;
    let cardio = entry.into_workout(String::new(), now, table, weight_kg);
    match self.append(Workout::Cardio(cardio)).await? {
      Workout::Cardio(saved) => Ok(saved),
      Workout::Strength(_) => Err(StoreError::Validation("Expected a cardio workout".to_string())),
    }
  }

  pub async fn burn_summary(&self, day: NaiveDate, goal: i64) -> StoreResult<BurnSummary> {
    let workouts = self.list_for_day(day).await?;
    Ok(BurnSummary::for_workouts(day, &workouts, goal))
  }

  // ---------------------------------------------------------------------------
  // Active strength session
  // ---------------------------------------------------------------------------

  /// The in-progress session. A record flagged inactive counts as none.
  pub async fn load_active(&self) -> StoreResult<Option<ActiveWorkout>> {
    let active: Option<ActiveWorkout> = self.kv.get_json(keys::ACTIVE_WORKOUT).await?;
    Ok(active.filter(|w| w.is_active))
  }

  /// Start a new session, replacing any existing one. The title may be
  /// filled in later; it is required only on completion.
  pub async fn start_active(&self, title: &str, now: DateTime<Utc>) -> StoreResult<ActiveWorkout> {
    let active = ActiveWorkout::start(title, now);
    self.save_active(&active).await?;
    tracing::debug!(title = %active.workout_title, "Started strength workout");
    Ok(active)
  }

  pub async fn save_active(&self, active: &ActiveWorkout) -> StoreResult<()> {
    self.kv.set_json(keys::ACTIVE_WORKOUT, active).await
  }

  pub async fn clear_active(&self) -> StoreResult<()> {
    self.kv.remove(keys::ACTIVE_WORKOUT).await
  }

  pub async fn discard_active(&self) -> StoreResult<()> {
    self.clear_active().await?;
    tracing::debug!("Discarded strength workout");
    Ok(())
  }

  /// Turn the in-progress session into a completed strength workout
  pub async fn complete_active(&self, now: DateTime<Utc>) -> StoreResult<StrengthWorkout> {
    let active = self
      .load_active()
      .await?
      .ok_or_else(|| StoreError::NotFound("No workout in progress".to_string()))?;

    if active.workout_title.trim().is_empty() {
      return Err(StoreError::Validation("Workout title is required".to_string()));
    }
    if active.exercises.is_empty() {
      return Err(StoreError::Validation("Add at least one exercise".to_string()));
    }

    let completed = active.to_completed(String::new(), now);
    let saved = match self.append(Workout::Strength(completed)).await? {
      Workout::Strength(saved) => saved,
      Workout::Cardio(_) => {
        return Err(StoreError::Validation("Expected a strength workout".to_string()))
      }
    };
    self.clear_active().await?;

    Ok(saved)
  }
}

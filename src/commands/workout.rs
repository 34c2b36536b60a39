//! Tauri commands for workout history and the in-progress strength session

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tauri::State;

use super::fail;
use crate::catalog;
use crate::db::AppState;
use crate::models::{ActiveWorkout, CardioWorkout, StrengthWorkout, Workout};
use crate::time_utils::today_local;
use crate::workouts::{BurnSummary, CardioEntry};

/// Workouts on `day` (today when omitted), newest first
#[tauri::command]
pub async fn list_workouts_for_day(
  state: State<'_, Arc<AppState>>,
  day: Option<NaiveDate>,
) -> Result<Vec<Workout>, String> {
  state
    .workouts()
    .list_for_day(day.unwrap_or_else(today_local))
    .await
    .map_err(|e| fail("Failed to load workouts", e))
}

/// Detail lookup; `None` when the id is unknown
#[tauri::command]
pub async fn get_workout(
  state: State<'_, Arc<AppState>>,
  id: String,
) -> Result<Option<Workout>, String> {
  state
    .workouts()
    .find(&id)
    .await
    .map_err(|e| fail("Failed to load workout", e))
}

#[tauri::command]
pub async fn log_cardio(
  state: State<'_, Arc<AppState>>,
  entry: CardioEntry,
) -> Result<CardioWorkout, String> {
  state
    .log_cardio(entry, Utc::now())
    .await
    .map_err(|e| fail("Failed to save cardio workout", e))
}

/// Delete the selected workouts; returns how many were removed
#[tauri::command]
pub async fn delete_workouts(
  state: State<'_, Arc<AppState>>,
  ids: Vec<String>,
) -> Result<usize, String> {
  state
    .workouts()
    .remove_many(&ids)
    .await
    .map_err(|e| fail("Failed to delete workouts", e))
}

#[tauri::command]
pub async fn get_burn_summary(
  state: State<'_, Arc<AppState>>,
  day: Option<NaiveDate>,
) -> Result<BurnSummary, String> {
  state
    .burn_summary(day.unwrap_or_else(today_local))
    .await
    .map_err(|e| fail("Failed to compute calories burned", e))
}

#[tauri::command]
pub fn search_exercises(query: String) -> Vec<String> {
  catalog::search_exercises(&query)
    .into_iter()
    .map(str::to_string)
    .collect()
}

// ---------------------------------------------------------------------------
// Active strength session
// ---------------------------------------------------------------------------

#[tauri::command]
pub async fn get_active_workout(
  state: State<'_, Arc<AppState>>,
) -> Result<Option<ActiveWorkout>, String> {
  state
    .workouts()
    .load_active()
    .await
    .map_err(|e| fail("Failed to load active workout", e))
}

#[tauri::command]
pub async fn start_active_workout(
  state: State<'_, Arc<AppState>>,
  title: String,
) -> Result<ActiveWorkout, String> {
  state
    .workouts()
    .start_active(&title, Utc::now())
    .await
    .map_err(|e| fail("Failed to start workout", e))
}

/// Persist the session after an edit
#[tauri::command]
pub async fn save_active_workout(
  state: State<'_, Arc<AppState>>,
  workout: ActiveWorkout,
) -> Result<(), String> {
  state
    .workouts()
    .save_active(&workout)
    .await
    .map_err(|e| fail("Failed to save workout state", e))
}

#[tauri::command]
pub async fn complete_active_workout(
  state: State<'_, Arc<AppState>>,
) -> Result<StrengthWorkout, String> {
  state
    .workouts()
    .complete_active(Utc::now())
    .await
    .map_err(|e| fail("Failed to save workout", e))
}

#[tauri::command]
pub async fn discard_active_workout(state: State<'_, Arc<AppState>>) -> Result<(), String> {
  state
    .workouts()
    .discard_active()
    .await
    .map_err(|e| fail("Failed to discard workout", e))
}

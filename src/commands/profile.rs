//! Tauri commands for the profile, preferences and data reset

use std::sync::Arc;
use tauri::State;

use super::fail;
use crate::db::AppState;
use crate::metrics::BodyMetrics;
use crate::models::{AppSettings, AppSettingsPatch, Profile, ProfilePatch};
use crate::time_utils::today_local;

/// Stored profile, or `None` before onboarding
#[tauri::command]
pub async fn get_profile(state: State<'_, Arc<AppState>>) -> Result<Option<Profile>, String> {
  state
    .profiles()
    .load()
    .await
    .map_err(|e| fail("Failed to load profile", e))
}

/// Merge a partial update into the profile
#[tauri::command]
pub async fn save_profile(
  state: State<'_, Arc<AppState>>,
  patch: ProfilePatch,
) -> Result<Profile, String> {
  state
    .profiles()
    .save(patch)
    .await
    .map_err(|e| fail("Failed to save profile", e))
}

/// BMI, age and calorie targets derived from the profile
#[tauri::command]
pub async fn get_body_metrics(state: State<'_, Arc<AppState>>) -> Result<BodyMetrics, String> {
  state
    .body_metrics(today_local())
    .await
    .map_err(|e| fail("Failed to compute body metrics", e))
}

#[tauri::command]
pub async fn get_app_settings(state: State<'_, Arc<AppState>>) -> Result<AppSettings, String> {
  state
    .settings()
    .load()
    .await
    .map_err(|e| fail("Failed to load settings", e))
}

#[tauri::command]
pub async fn save_app_settings(
  state: State<'_, Arc<AppState>>,
  patch: AppSettingsPatch,
) -> Result<AppSettings, String> {
  state
    .settings()
    .save(patch)
    .await
    .map_err(|e| fail("Failed to save settings", e))
}

/// Wipe all app data; returns the number of keys removed
#[tauri::command]
pub async fn clear_all_data(state: State<'_, Arc<AppState>>) -> Result<usize, String> {
  state
    .clear_all_data()
    .await
    .map_err(|e| fail("Failed to clear app data", e))
}

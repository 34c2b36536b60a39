//! Tauri commands for local accounts and onboarding

use chrono::Utc;
use std::sync::Arc;
use tauri::State;

use super::fail;
use crate::auth::{DeletionReport, Session};
use crate::db::AppState;
use crate::onboarding::OnboardingDraft;

#[tauri::command]
pub async fn sign_up(
  state: State<'_, Arc<AppState>>,
  username: String,
  password: String,
) -> Result<Session, String> {
  state
    .auth()
    .sign_up(&username, &password, Utc::now())
    .await
    .map_err(|e| fail("Sign-up failed", e))
}

#[tauri::command]
pub async fn sign_in(
  state: State<'_, Arc<AppState>>,
  username: String,
  password: String,
) -> Result<Session, String> {
  state
    .auth()
    .sign_in(&username, &password)
    .await
    .map_err(|e| fail("Sign-in failed", e))
}

#[tauri::command]
pub async fn sign_out(state: State<'_, Arc<AppState>>) -> Result<(), String> {
  state
    .auth()
    .sign_out()
    .await
    .map_err(|e| fail("Sign-out failed", e))
}

/// Session restored from the last launch
#[tauri::command]
pub async fn get_session(state: State<'_, Arc<AppState>>) -> Result<Option<Session>, String> {
  state
    .auth()
    .current_session()
    .await
    .map_err(|e| fail("Failed to load session", e))
}

#[tauri::command]
pub async fn complete_onboarding(
  state: State<'_, Arc<AppState>>,
  draft: OnboardingDraft,
) -> Result<Session, String> {
  state
    .complete_onboarding(draft, Utc::now())
    .await
    .map_err(|e| fail("Failed to complete onboarding", e))
}

/// Returns a report once the username is valid; check `failed` for keys
/// that could not be removed
#[tauri::command]
pub async fn delete_account(
  state: State<'_, Arc<AppState>>,
  username: String,
) -> Result<DeletionReport, String> {
  state
    .delete_account(&username)
    .await
    .map_err(|e| fail("Failed to delete account", e))
}

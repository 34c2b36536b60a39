//! Tauri commands for food logging

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use tauri::State;

use super::fail;
use crate::catalog;
use crate::db::AppState;
use crate::models::{ConsumedFood, FoodItem};
use crate::nutrition::NutritionSummary;
use crate::time_utils::today_local;

#[tauri::command]
pub async fn list_foods_for_day(
  state: State<'_, Arc<AppState>>,
  day: Option<NaiveDate>,
) -> Result<Vec<ConsumedFood>, String> {
  state
    .nutrition()
    .list_for_day(day.unwrap_or_else(today_local))
    .await
    .map_err(|e| fail("Failed to load foods", e))
}

#[tauri::command]
pub fn get_food_categories() -> Vec<String> {
  catalog::categories()
}

#[tauri::command]
pub fn search_foods(query: String, category: Option<String>) -> Vec<FoodItem> {
  catalog::search_foods(&query, category.as_deref())
}

/// Log `quantity` servings of a catalog food
#[tauri::command]
pub async fn add_food(
  state: State<'_, Arc<AppState>>,
  food_id: String,
  quantity: f64,
) -> Result<ConsumedFood, String> {
  let food = catalog::find_food(&food_id).ok_or_else(|| {
    tracing::warn!(food_id = %food_id, "Unknown food");
    format!("Unknown food: {}", food_id)
  })?;

  state
    .nutrition()
    .append(&food, quantity, Utc::now())
    .await
    .map_err(|e| fail("Failed to add food", e))
}

/// Remove the entry at `index` in the day's list
#[tauri::command]
pub async fn remove_food(
  state: State<'_, Arc<AppState>>,
  day: Option<NaiveDate>,
  index: usize,
) -> Result<Option<ConsumedFood>, String> {
  state
    .nutrition()
    .remove_at(day.unwrap_or_else(today_local), index)
    .await
    .map_err(|e| fail("Failed to remove food", e))
}

#[tauri::command]
pub async fn get_nutrition_summary(
  state: State<'_, Arc<AppState>>,
  day: Option<NaiveDate>,
) -> Result<NutritionSummary, String> {
  state
    .nutrition_summary(day.unwrap_or_else(today_local))
    .await
    .map_err(|e| fail("Failed to compute nutrition totals", e))
}

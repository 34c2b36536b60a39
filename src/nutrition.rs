//! Consumed-food log under `@consumed_calories`.
//!
//! Entries are kept in the order they were logged. The `id` of an entry is
//! the catalog id of the food, so it is not unique; removal is by position
//! in a day's view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::models::{ConsumedFood, FoodItem};
use crate::storage::{keys, KvStore};
use crate::time_utils::local_day;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
  pub calories: f64,
  pub protein: f64,
  pub carbs: f64,
  pub fats: f64,
}

impl NutritionTotals {
  pub fn sum(foods: &[ConsumedFood]) -> Self {
    foods.iter().fold(Self::default(), |acc, food| Self {
      calories: acc.calories + food.calories.unwrap_or(0.0),
      protein: acc.protein + food.protein.unwrap_or(0.0),
      carbs: acc.carbs + food.carbs.unwrap_or(0.0),
      fats: acc.fats + food.fats.unwrap_or(0.0),
    })
  }
}

/// A day's intake against the profile's goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionSummary {
  pub day: NaiveDate,
  pub totals: NutritionTotals,
  pub goal: i64,
  /// Percent of goal, capped at 100
  pub progress: f64,
  /// Never negative
  pub remaining: f64,
}

impl NutritionSummary {
  pub fn for_foods(day: NaiveDate, foods: &[ConsumedFood], goal: i64) -> Self {
    let totals = NutritionTotals::sum(foods);
    let goal_kcal = goal as f64;
    let progress = if goal > 0 {
      (totals.calories / goal_kcal * 100.0).min(100.0)
    } else {
      0.0
    };

    Self {
      day,
      totals,
      goal,
      progress,
      remaining: (goal_kcal - totals.calories).max(0.0),
    }
  }
}

#[derive(Clone)]
pub struct NutritionStore {
  kv: KvStore,
}

impl NutritionStore {
  pub fn new(kv: KvStore) -> Self {
    Self { kv }
  }

  pub async fn list_all(&self) -> StoreResult<Vec<ConsumedFood>> {
    self.kv.get_list(keys::CONSUMED_FOODS).await
  }

  /// Entries consumed on `day` in the device's timezone, in logging order
  pub async fn list_for_day(&self, day: NaiveDate) -> StoreResult<Vec<ConsumedFood>> {
    let all = self.list_all().await?;
    Ok(
      all
        .into_iter()
        .filter(|f| local_day(f.consumed_at) == day)
        .collect(),
    )
  }

  /// Log `quantity` servings of a catalog food. Nutrients are multiplied
  /// here, once; the catalog entry is left as is.
  pub async fn append(
    &self,
    food: &FoodItem,
    quantity: f64,
    consumed_at: DateTime<Utc>,
  ) -> StoreResult<ConsumedFood> {
    if !(quantity.is_finite() && quantity > 0.0) {
      return Err(StoreError::Validation("Quantity must be greater than zero".to_string()));
    }

    let consumed = ConsumedFood::from_item(food, quantity, food.id.clone(), consumed_at);
    let mut all = self.list_all().await?;
    all.push(consumed.clone());
    self.kv.set_json(keys::CONSUMED_FOODS, &all).await?;

    tracing::info!(food = %food.name, quantity, "Logged food");
    Ok(consumed)
  }

  /// Remove the entry at `index` within `day`'s view. Entries from other
  /// days are written back untouched, ahead of the remaining day entries.
  /// An out-of-range index changes nothing.
  pub async fn remove_at(&self, day: NaiveDate, index: usize) -> StoreResult<Option<ConsumedFood>> {
    let all = self.list_all().await?;
    let (mut day_items, mut rebuilt): (Vec<ConsumedFood>, Vec<ConsumedFood>) = all
      .into_iter()
      .partition(|f| local_day(f.consumed_at) == day);

    if index >= day_items.len() {
      return Ok(None);
    }
    let removed = day_items.remove(index);
    rebuilt.append(&mut day_items);
    self.kv.set_json(keys::CONSUMED_FOODS, &rebuilt).await?;

    tracing::info!(food = %removed.name, "Removed food");
    Ok(Some(removed))
  }

  pub async fn summary(&self, day: NaiveDate, goal: i64) -> StoreResult<NutritionSummary> {
    let foods = self.list_for_day(day).await?;
    Ok(NutritionSummary::for_foods(day, &foods, goal))
  }
}

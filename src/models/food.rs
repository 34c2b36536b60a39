use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;

/// Catalog entry. Nutrients are per serving.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodItem {
  pub id: String,
  pub name: String,
  pub category: String,
  pub calories: f64,
  pub protein: f64,
  pub carbs: f64,
  pub fats: f64,
  pub serving_size: String,
}

/// A logged food. Nutrients are already multiplied by `quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumedFood {
  #[serde(deserialize_with = "lenient::string")]
  pub id: String,
  pub name: String,
  #[serde(default)]
  pub category: String,
  #[serde(default, deserialize_with = "lenient::opt_f64")]
  pub calories: Option<f64>,
  #[serde(default, deserialize_with = "lenient::opt_f64")]
  pub protein: Option<f64>,
  #[serde(default, deserialize_with = "lenient::opt_f64")]
  pub carbs: Option<f64>,
  #[serde(default, deserialize_with = "lenient::opt_f64")]
  pub fats: Option<f64>,
  #[serde(default)]
  pub serving_size: String,
  #[serde(default, deserialize_with = "lenient::opt_f64")]
  pub quantity: Option<f64>,
  pub consumed_at: DateTime<Utc>,
}

impl ConsumedFood {
  /// Scale a catalog entry by `quantity` servings
  pub fn from_item(item: &FoodItem, quantity: f64, id: String, consumed_at: DateTime<Utc>) -> Self {
    Self {
      id,
      name: item.name.clone(),
      category: item.category.clone(),
      calories: Some(item.calories * quantity),
      protein: Some(item.protein * quantity),
      carbs: Some(item.carbs * quantity),
      fats: Some(item.fats * quantity),
      serving_size: item.serving_size.clone(),
      quantity: Some(quantity),
      consumed_at,
    }
  }
}

//! Built-in food and exercise lists.

use crate::models::FoodItem;

/// Matches every category in [`search_foods`]
pub const ALL_CATEGORIES: &str = "All";

/// (id, name, category, kcal, protein g, carbs g, fats g, serving)
type FoodRow = (&'static str, &'static str, &'static str, f64, f64, f64, f64, &'static str);

const FOODS: &[FoodRow] = &[
  ("1", "Idli (2 pcs)", "Indian Breakfast", 78.0, 2.0, 17.0, 0.5, "2 pieces"),
  ("2", "Dosa (Plain)", "Indian Breakfast", 133.0, 3.0, 22.0, 4.0, "1 dosa"),
  ("3", "Masala Dosa", "Indian Breakfast", 285.0, 6.0, 42.0, 10.0, "1 dosa"),
  ("4", "Poha", "Indian Breakfast", 250.0, 5.0, 40.0, 8.0, "1 bowl"),
  ("5", "Upma", "Indian Breakfast", 193.0, 5.0, 33.0, 5.0, "1 bowl"),
  ("6", "Paratha (Plain)", "Indian Breakfast", 210.0, 4.0, 28.0, 9.0, "1 paratha"),
  ("7", "Aloo Paratha", "Indian Breakfast", 330.0, 6.0, 45.0, 14.0, "1 paratha"),

  ("8", "Dal Tadka", "Indian Main Course", 144.0, 8.0, 20.0, 4.0, "1 bowl"),
  ("9", "Rajma Curry", "Indian Main Course", 186.0, 10.0, 26.0, 5.0, "1 bowl"),
  ("10", "Chole (Chickpea Curry)", "Indian Main Course", 210.0, 12.0, 30.0, 6.0, "1 bowl"),
  ("11", "Paneer Butter Masala", "Indian Main Course", 380.0, 14.0, 18.0, 28.0, "1 bowl"),
  ("12", "Palak Paneer", "Indian Main Course", 285.0, 12.0, 15.0, 20.0, "1 bowl"),
  ("13", "Chicken Curry", "Indian Main Course", 240.0, 28.0, 8.0, 12.0, "1 bowl"),
  ("14", "Butter Chicken", "Indian Main Course", 490.0, 30.0, 12.0, 35.0, "1 bowl"),
  ("15", "Biryani (Chicken)", "Indian Main Course", 420.0, 24.0, 52.0, 14.0, "1 plate"),
  ("16", "Biryani (Veg)", "Indian Main Course", 340.0, 8.0, 55.0, 10.0, "1 plate"),

  ("17", "White Rice (Cooked)", "Rice & Bread", 206.0, 4.0, 45.0, 0.5, "1 bowl"),
  ("18", "Brown Rice (Cooked)", "Rice & Bread", 218.0, 5.0, 46.0, 2.0, "1 bowl"),
  ("19", "Jeera Rice", "Rice & Bread", 240.0, 4.0, 48.0, 4.0, "1 bowl"),
  ("20", "Roti (Chapati)", "Rice & Bread", 71.0, 3.0, 15.0, 0.4, "1 roti"),
  ("21", "Naan", "Rice & Bread", 262.0, 9.0, 45.0, 5.0, "1 naan"),
  ("22", "Butter Naan", "Rice & Bread", 310.0, 9.0, 46.0, 10.0, "1 naan"),

  ("23", "Samosa", "Indian Snacks", 252.0, 4.0, 28.0, 14.0, "1 piece"),
  ("24", "Pakora", "Indian Snacks", 180.0, 4.0, 20.0, 10.0, "100g"),
  ("25", "Vada Pav", "Indian Snacks", 290.0, 6.0, 42.0, 11.0, "1 piece"),
  ("26", "Pani Puri (6 pcs)", "Indian Snacks", 125.0, 3.0, 22.0, 3.0, "6 pieces"),
  ("27", "Bhel Puri", "Indian Snacks", 175.0, 4.0, 28.0, 6.0, "1 bowl"),

  ("28", "Pizza (Margherita)", "Western", 266.0, 11.0, 33.0, 10.0, "1 slice"),
  ("29", "Burger", "Western", 295.0, 17.0, 30.0, 12.0, "1 burger"),
  ("30", "Pasta (Red Sauce)", "Western", 220.0, 8.0, 42.0, 3.0, "1 bowl"),
  ("31", "Pasta (White Sauce)", "Western", 310.0, 10.0, 38.0, 14.0, "1 bowl"),
  ("32", "French Fries", "Western", 312.0, 4.0, 41.0, 15.0, "medium"),
  ("33", "Fried Chicken", "Western", 246.0, 19.0, 12.0, 14.0, "1 piece"),

  ("34", "Chai (Tea with Milk)", "Beverages", 74.0, 2.0, 10.0, 3.0, "1 cup"),
  ("35", "Coffee (with Milk)", "Beverages", 38.0, 2.0, 4.0, 1.5, "1 cup"),
  ("36", "Lassi (Sweet)", "Beverages", 180.0, 6.0, 28.0, 5.0, "1 glass"),
  ("37", "Mango Shake", "Beverages", 250.0, 6.0, 48.0, 4.0, "1 glass"),
  ("38", "Soft Drink", "Beverages", 140.0, 0.0, 39.0, 0.0, "330ml"),

  ("39", "Banana", "Fruits", 105.0, 1.0, 27.0, 0.3, "1 medium"),
  ("40", "Apple", "Fruits", 95.0, 0.5, 25.0, 0.3, "1 medium"),
  ("41", "Mango", "Fruits", 135.0, 1.0, 35.0, 0.6, "1 medium"),
  ("42", "Orange", "Fruits", 62.0, 1.0, 15.0, 0.2, "1 medium"),

  ("43", "Boiled Egg", "Eggs & Dairy", 78.0, 6.0, 0.6, 5.0, "1 egg"),
  ("44", "Omelette (2 eggs)", "Eggs & Dairy", 184.0, 14.0, 2.0, 14.0, "2 eggs"),
  ("45", "Milk (Full Fat)", "Eggs & Dairy", 149.0, 8.0, 12.0, 8.0, "1 cup"),
  ("46", "Curd (Plain)", "Eggs & Dairy", 98.0, 6.0, 7.0, 5.0, "1 bowl"),
  ("47", "Paneer", "Eggs & Dairy", 265.0, 18.0, 4.0, 20.0, "100g"),
];

const EXERCISES: &[&str] = &[
  "Bench Press",
  "Incline Bench Press",
  "Decline Bench Press",
  "Dumbbell Bench Press",
  "Incline Dumbbell Press",
  "Chest Fly",
  "Cable Crossover",
  "Push-ups",
  "Dips",
  "Pec Deck",
  "Deadlift",
  "Pull-ups",
  "Chin-ups",
  "Barbell Row",
  "Dumbbell Row",
  "T-Bar Row",
  "Lat Pulldown",
  "Seated Cable Row",
  "Face Pulls",
  "Shrugs",
  "Overhead Press",
  "Military Press",
  "Dumbbell Shoulder Press",
  "Arnold Press",
  "Lateral Raises",
  "Front Raises",
  "Rear Delt Fly",
  "Upright Row",
  "Barbell Curl",
  "Dumbbell Curl",
  "Hammer Curl",
  "Preacher Curl",
  "Cable Curl",
  "Concentration Curl",
  "Tricep Dips",
  "Tricep Pushdown",
  "Overhead Tricep Extension",
  "Skull Crushers",
  "Close Grip Bench Press",
  "Tricep Kickback",
  "Squat",
  "Front Squat",
  "Leg Press",
  "Leg Extension",
  "Lunges",
  "Bulgarian Split Squat",
  "Romanian Deadlift",
  "Leg Curl",
  "Good Mornings",
  "Calf Raises",
  "Seated Calf Raises",
  "Plank",
  "Crunches",
  "Russian Twists",
  "Leg Raises",
  "Cable Crunches",
  "Ab Wheel Rollout",
  "Clean and Press",
  "Power Clean",
  "Burpees",
];

fn to_item(row: &FoodRow) -> FoodItem {
  let (id, name, category, calories, protein, carbs, fats, serving_size) = *row;
  FoodItem {
    id: id.to_string(),
    name: name.to_string(),
    category: category.to_string(),
    calories,
    protein,
    carbs,
    fats,
    serving_size: serving_size.to_string(),
  }
}

pub fn foods() -> Vec<FoodItem> {
  FOODS.iter().map(to_item).collect()
}

pub fn find_food(id: &str) -> Option<FoodItem> {
  FOODS.iter().find(|row| row.0 == id).map(to_item)
}

/// `All` followed by each category in catalog order
pub fn categories() -> Vec<String> {
  let mut out = vec![ALL_CATEGORIES.to_string()];
  for row in FOODS {
    if !out.iter().any(|c| c == row.2) {
      out.push(row.2.to_string());
    }
  }
  out
}

/// Case-insensitive name match within a category (`All` or `None` for any)
pub fn search_foods(query: &str, category: Option<&str>) -> Vec<FoodItem> {
  let needle = query.trim().to_lowercase();
  FOODS
    .iter()
    .filter(|row| row.1.to_lowercase().contains(&needle))
    .filter(|row| match category {
      None | Some(ALL_CATEGORIES) => true,
      Some(c) => row.2 == c,
    })
    .map(to_item)
    .collect()
}

/// Exercise names, alphabetical
pub fn exercises() -> Vec<&'static str> {
  let mut names = EXERCISES.to_vec();
  names.sort_unstable();
  names
}

pub fn search_exercises(query: &str) -> Vec<&'static str> {
  let needle = query.trim().to_lowercase();
  exercises()
    .into_iter()
    .filter(|name| name.to_lowercase().contains(&needle))
    .collect()
}

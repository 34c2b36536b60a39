use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::metrics;
use crate::time_utils::time_id;

/// ---------------------------------------------------------------------------
/// Strength Building Blocks
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSet {
  pub id: String,
  /// Kilograms, as typed
  #[serde(default, deserialize_with = "lenient::string")]
  pub weight: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub reps: String,
  /// Derived from weight and reps whenever either changes
  #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
  pub calories: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  pub id: String,
  #[serde(default)]
  pub name: String,
  #[serde(default)]
  pub sets: Vec<WorkoutSet>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetField {
  Weight,
  Reps,
}

fn sum_set_calories(exercises: &[Exercise]) -> f64 {
  exercises
    .iter()
    .flat_map(|ex| ex.sets.iter())
    .map(|set| set.calories.unwrap_or(0.0))
    .sum()
}

/// ---------------------------------------------------------------------------
/// Completed Workouts
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrengthWorkout {
  pub id: String,
  pub title: String,
  /// Seconds from start to completion
  #[serde(default, deserialize_with = "lenient::opt_i64")]
  pub duration: Option<i64>,
  #[serde(default)]
  pub exercises: Vec<Exercise>,
  #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
  pub total_calories: Option<i64>,
  pub timestamp: DateTime<Utc>,
}

impl StrengthWorkout {
  pub fn set_count(&self) -> usize {
    self.exercises.iter().map(|ex| ex.sets.len()).sum()
  }

  /// Saved total when present, otherwise summed from the sets
  pub fn calories_burned(&self) -> i64 {
    match self.total_calories {
      Some(total) if total > 0 => total,
      _ => sum_set_calories(&self.exercises).round() as i64,
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardioKind {
  Walk,
  Run,
  Ride,
  #[serde(other)]
  Other,
}

impl CardioKind {
  /// Kind named anywhere in a free-text activity label ("Morning Run")
  pub fn from_label(label: &str) -> Self {
    let label = label.to_lowercase();
    if label.contains("run") || label.contains("jog") {
      CardioKind::Run
    } else if label.contains("walk") || label.contains("hike") {
      CardioKind::Walk
    } else if label.contains("ride") || label.contains("cycl") || label.contains("bike") {
      CardioKind::Ride
    } else {
      CardioKind::Other
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardioWorkout {
  pub id: String,
  pub activity_name: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub workout_type: Option<CardioKind>,
  /// Kilometres, as typed
  #[serde(default, deserialize_with = "lenient::string")]
  pub distance: String,
  /// Minutes, as typed
  #[serde(default, deserialize_with = "lenient::string")]
  pub duration: String,
  #[serde(default, deserialize_with = "lenient::string")]
  pub calories: String,
  pub timestamp: DateTime<Utc>,
}

impl CardioWorkout {
  pub fn calories_burned(&self) -> i64 {
    lenient::parse_number(&self.calories)
      .map(|c| c.trunc() as i64)
      .unwrap_or(0)
  }
}

/// A completed workout as stored in `@completed_workouts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Workout {
  Strength(StrengthWorkout),
  Cardio(CardioWorkout),
}

impl Workout {
  pub fn id(&self) -> &str {
    match self {
      Workout::Strength(w) => &w.id,
      Workout::Cardio(w) => &w.id,
    }
  }

  pub fn timestamp(&self) -> DateTime<Utc> {
    match self {
      Workout::Strength(w) => w.timestamp,
      Workout::Cardio(w) => w.timestamp,
    }
  }

  pub fn display_name(&self) -> &str {
    match self {
      Workout::Strength(w) => &w.title,
      Workout::Cardio(w) => &w.activity_name,
    }
  }

  /// One-line summary shown in the day list
  pub fn details(&self) -> String {
    match self {
      Workout::Strength(w) => format!("{} exercises, {} sets", w.exercises.len(), w.set_count()),
      Workout::Cardio(w) => format!("{} km, {} min", w.distance, w.duration),
    }
  }

  pub fn calories_burned(&self) -> i64 {
    match self {
      Workout::Strength(w) => w.calories_burned(),
      Workout::Cardio(w) => w.calories_burned(),
    }
  }

  pub(crate) fn set_id(&mut self, id: String) {
    match self {
      Workout::Strength(w) => w.id = id,
      Workout::Cardio(w) => w.id = id,
    }
  }
}

/// ---------------------------------------------------------------------------
/// In-Progress Strength Workout
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveWorkout {
  #[serde(default)]
  pub workout_title: String,
  #[serde(with = "chrono::serde::ts_milliseconds")]
  pub start_time: DateTime<Utc>,
  #[serde(default)]
  pub exercises: Vec<Exercise>,
  #[serde(default)]
  pub is_active: bool,
}

impl ActiveWorkout {
  pub fn start(title: &str, now: DateTime<Utc>) -> Self {
    Self {
      workout_title: title.trim().to_string(),
      start_time: now,
      exercises: Vec::new(),
      is_active: true,
    }
  }

  pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
    (now - self.start_time).num_seconds().max(0)
  }

  pub fn total_calories(&self) -> f64 {
    sum_set_calories(&self.exercises)
  }

  fn id_in_use(&self, id: &str) -> bool {
    self
      .exercises
      .iter()
      .any(|ex| ex.id == id || ex.sets.iter().any(|s| s.id == id))
  }

  /// Add an exercise and return its id
  pub fn add_exercise(&mut self, name: &str, now: DateTime<Utc>) -> String {
    let id = time_id(now, |candidate| self.id_in_use(candidate));
    self.exercises.push(Exercise {
      id: id.clone(),
      name: name.to_string(),
      sets: Vec::new(),
    });
    id
  }

  pub fn remove_exercise(&mut self, exercise_id: &str) -> bool {
    let before = self.exercises.len();
    self.exercises.retain(|ex| ex.id != exercise_id);
    self.exercises.len() != before
  }

  pub fn rename_exercise(&mut self, exercise_id: &str, name: &str) -> bool {
    match self.exercises.iter_mut().find(|ex| ex.id == exercise_id) {
      Some(ex) => {
        ex.name = name.to_string();
        true
      }
      None => false,
    }
  }

  /// Append an empty set to an exercise and return the set id
  pub fn add_set(&mut self, exercise_id: &str, now: DateTime<Utc>) -> Option<String> {
    let id = time_id(now, |candidate| self.id_in_use(candidate));
    let exercise = self.exercises.iter_mut().find(|ex| ex.id == exercise_id)?;
    exercise.sets.push(WorkoutSet {
      id: id.clone(),
      weight: String::new(),
      reps: String::new(),
      calories: None,
    });
    Some(id)
  }

  pub fn remove_set(&mut self, exercise_id: &str, set_id: &str) -> bool {
    match self.exercises.iter_mut().find(|ex| ex.id == exercise_id) {
      Some(ex) => {
        let before = ex.sets.len();
        ex.sets.retain(|s| s.id != set_id);
        ex.sets.len() != before
      }
      None => false,
    }
  }

  /// Edit weight or reps; the set's calories are recomputed
  pub fn update_set(&mut self, exercise_id: &str, set_id: &str, field: SetField, value: &str) -> bool {
    let set = self
      .exercises
      .iter_mut()
      .find(|ex| ex.id == exercise_id)
      .and_then(|ex| ex.sets.iter_mut().find(|s| s.id == set_id));

    match set {
      Some(set) => {
        match field {
          SetField::Weight => set.weight = value.to_string(),
          SetField::Reps => set.reps = value.to_string(),
        }
        set.calories = Some(metrics::strength_set_calories(&set.weight, &set.reps));
        true
      }
      None => false,
    }
  }

  /// Snapshot as a completed workout
  pub fn to_completed(&self, id: String, now: DateTime<Utc>) -> StrengthWorkout {
    StrengthWorkout {
      id,
      title: self.workout_title.trim().to_string(),
      duration: Some(self.elapsed_seconds(now)),
      exercises: self.exercises.clone(),
      total_calories: Some(self.total_calories().round() as i64),
      timestamp: now,
    }
  }
}

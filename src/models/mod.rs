pub mod food;
pub mod lenient;
pub mod profile;
pub mod settings;
pub mod user;
pub mod workout;

pub use food::{ConsumedFood, FoodItem};
pub use profile::{FitnessAim, Gender, Profile, ProfilePatch};
pub use settings::{AppSettings, AppSettingsPatch};
pub use user::{User, UserPatch};
pub use workout::{
  ActiveWorkout, CardioKind, CardioWorkout, Exercise, SetField, StrengthWorkout, Workout,
  WorkoutSet,
};

use validator::ValidationError;

/// Rejects strings that are empty once trimmed
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
  if value.trim().is_empty() {
    return Err(ValidationError::new("blank"));
  }
  Ok(())
}

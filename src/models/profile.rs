use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use validator::Validate;

use super::lenient;

pub const DEFAULT_DAILY_CALORIE_GOAL: i64 = 2000;
pub const DEFAULT_DAILY_BURN_GOAL: i64 = 600;

/// ---------------------------------------------------------------------------
/// Gender / Fitness Aim
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Gender {
  Male,
  Female,
  #[default]
  Unset,
}

impl Gender {
  pub fn from_label(label: &str) -> Self {
    match label.trim().to_lowercase().as_str() {
      "male" => Gender::Male,
      "female" => Gender::Female,
      _ => Gender::Unset,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Gender::Male => "male",
      Gender::Female => "female",
      Gender::Unset => "",
    }
  }

  pub fn is_unset(&self) -> bool {
    *self == Gender::Unset
  }
}

impl Serialize for Gender {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Gender {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(Gender::from_label).unwrap_or_default())
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitnessAim {
  Loss,
  Gain,
  #[default]
  Maintain,
}

impl FitnessAim {
  pub fn as_str(&self) -> &'static str {
    match self {
      FitnessAim::Loss => "loss",
      FitnessAim::Gain => "gain",
      FitnessAim::Maintain => "maintain",
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      FitnessAim::Loss => "Weight Loss",
      FitnessAim::Gain => "Weight Gain",
      FitnessAim::Maintain => "Maintain Weight",
    }
  }
}

impl std::str::FromStr for FitnessAim {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "loss" => Ok(Self::Loss),
      "gain" => Ok(Self::Gain),
      "maintain" => Ok(Self::Maintain),
      _ => Err(format!("Unknown fitness aim: {}", s)),
    }
  }
}

impl Serialize for FitnessAim {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for FitnessAim {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()).unwrap_or_default())
  }
}

/// ---------------------------------------------------------------------------
/// Profile Record
/// ---------------------------------------------------------------------------

/// The single user profile. Height is cm and weight is kg, always.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default, skip_serializing_if = "Gender::is_unset")]
  pub gender: Gender,
  #[serde(default, deserialize_with = "lenient::opt_date", skip_serializing_if = "Option::is_none")]
  pub date_of_birth: Option<NaiveDate>,
  #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
  pub height: Option<i64>,
  #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
  pub weight: Option<i64>,
  #[serde(default)]
  pub aim: FitnessAim,
  #[serde(default, deserialize_with = "lenient::opt_f64", skip_serializing_if = "Option::is_none")]
  pub goal_weight: Option<f64>,
  #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
  pub daily_calorie_goal: Option<i64>,
  #[serde(default, deserialize_with = "lenient::opt_i64", skip_serializing_if = "Option::is_none")]
  pub daily_calorie_burn_goal: Option<i64>,
  /// Keys this version does not model, kept so saves never drop them
  #[serde(flatten)]
  pub extra: Map<String, Value>,
}

impl Profile {
  /// Intake goal; unset or zero falls back to the default
  pub fn daily_calorie_goal(&self) -> i64 {
    self
      .daily_calorie_goal
      .filter(|g| *g > 0)
      .unwrap_or(DEFAULT_DAILY_CALORIE_GOAL)
  }

  pub fn daily_burn_goal(&self) -> i64 {
    self
      .daily_calorie_burn_goal
      .filter(|g| *g > 0)
      .unwrap_or(DEFAULT_DAILY_BURN_GOAL)
  }

  /// Date of birth, including records that used the older `dob` key
  pub fn birth_date(&self) -> Option<NaiveDate> {
    self.date_of_birth.or_else(|| {
      self
        .extra
        .get("dob")
        .and_then(Value::as_str)
        .and_then(lenient::parse_date)
    })
  }
}

/// ---------------------------------------------------------------------------
/// Partial Update
/// ---------------------------------------------------------------------------

/// Fields to change on the stored profile; `None` leaves a field alone
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
  #[validate(length(min = 1, max = 100))]
  pub name: Option<String>,
  #[validate(email)]
  pub email: Option<String>,
  pub gender: Option<Gender>,
  pub date_of_birth: Option<NaiveDate>,
  #[validate(range(min = 50, max = 300))]
  pub height: Option<i64>,
  #[validate(range(min = 20, max = 500))]
  pub weight: Option<i64>,
  pub aim: Option<FitnessAim>,
  #[validate(range(min = 20.0, max = 500.0))]
  pub goal_weight: Option<f64>,
  #[validate(range(min = 0, max = 20000))]
  pub daily_calorie_goal: Option<i64>,
  #[validate(range(min = 0, max = 20000))]
  pub daily_calorie_burn_goal: Option<i64>,
}

impl ProfilePatch {
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.email.is_none()
      && self.gender.is_none()
      && self.date_of_birth.is_none()
      && self.height.is_none()
      && self.weight.is_none()
      && self.aim.is_none()
      && self.goal_weight.is_none()
      && self.daily_calorie_goal.is_none()
      && self.daily_calorie_burn_goal.is_none()
  }

  /// Shallow merge into an existing record
  pub fn apply_to(self, profile: &mut Profile) {
    if let Some(name) = self.name {
      profile.name = Some(name.trim().to_string());
    }
    if let Some(email) = self.email {
      profile.email = Some(email.trim().to_string());
    }
    if let Some(gender) = self.gender {
      profile.gender = gender;
    }
    if let Some(dob) = self.date_of_birth {
      profile.date_of_birth = Some(dob);
      profile.extra.remove("dob");
    }
    if let Some(height) = self.height {
      profile.height = Some(height);
    }
    if let Some(weight) = self.weight {
      profile.weight = Some(weight);
    }
    if let Some(aim) = self.aim {
      profile.aim = aim;
    }
    if let Some(goal_weight) = self.goal_weight {
      profile.goal_weight = Some(goal_weight);
    }
    if let Some(goal) = self.daily_calorie_goal {
      profile.daily_calorie_goal = Some(goal);
    }
    if let Some(goal) = self.daily_calorie_burn_goal {
      profile.daily_calorie_burn_goal = Some(goal);
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_legacy_record_with_string_numbers() {
    let json = r#"{
      "name": "Alex",
      "gender": "male",
      "dob": "1995-06-15",
      "height": "175",
      "weight": "70",
      "aim": "loss",
      "dailyCalorieGoal": 0,
      "hasCompletedOnboarding": true
    }"#;
    let profile: Profile = serde_json::from_str(json).unwrap();

    assert_eq!(profile.gender, Gender::Male);
    assert_eq!(profile.height, Some(175));
    assert_eq!(profile.weight, Some(70));
    assert_eq!(profile.aim, FitnessAim::Loss);
    assert_eq!(profile.birth_date(), NaiveDate::from_ymd_opt(1995, 6, 15));
    // Zero goal falls back to the default
    assert_eq!(profile.daily_calorie_goal(), 2000);
    assert_eq!(profile.daily_burn_goal(), 600);
    assert_eq!(profile.extra.get("hasCompletedOnboarding"), Some(&Value::Bool(true)));
  }

  #[test]
  fn test_unknown_enum_values_fall_back() {
    let profile: Profile =
      serde_json::from_str(r#"{"gender": "prefer not", "aim": 3}"#).unwrap();
    assert_eq!(profile.gender, Gender::Unset);
    assert_eq!(profile.aim, FitnessAim::Maintain);
  }

  #[test]
  fn test_serialized_form_is_numeric_and_keeps_extras() {
    let mut profile: Profile =
      serde_json::from_str(r#"{"height": "180", "username": "alex"}"#).unwrap();
    profile.daily_calorie_goal = Some(2200);

    let value = serde_json::to_value(&profile).unwrap();
    assert_eq!(value["height"], serde_json::json!(180));
    assert_eq!(value["dailyCalorieGoal"], serde_json::json!(2200));
    assert_eq!(value["username"], serde_json::json!("alex"));
    assert_eq!(value["aim"], serde_json::json!("maintain"));
    assert!(value.get("gender").is_none());
  }

  #[test]
  fn test_patch_validation() {
    let ok = ProfilePatch {
      height: Some(180),
      weight: Some(82),
      email: Some("alex@example.com".into()),
      ..Default::default()
    };
    assert!(ok.validate().is_ok());

    let too_short = ProfilePatch { height: Some(20), ..Default::default() };
    assert!(too_short.validate().is_err());

    let bad_email = ProfilePatch { email: Some("not-an-email".into()), ..Default::default() };
    assert!(bad_email.validate().is_err());

    let negative_goal = ProfilePatch { daily_calorie_goal: Some(-5), ..Default::default() };
    assert!(negative_goal.validate().is_err());
  }

  #[test]
  fn test_patch_merge_only_touches_given_fields() {
    let mut profile = Profile {
      name: Some("Alex".into()),
      height: Some(170),
      weight: Some(70),
      ..Default::default()
    };
    ProfilePatch { weight: Some(68), aim: Some(FitnessAim::Gain), ..Default::default() }
      .apply_to(&mut profile);

    assert_eq!(profile.name.as_deref(), Some("Alex"));
    assert_eq!(profile.height, Some(170));
    assert_eq!(profile.weight, Some(68));
    assert_eq!(profile.aim, FitnessAim::Gain);
  }
}

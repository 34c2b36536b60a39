//! Body and Calorie Metrics
//!
//! Pure calculations over profile and workout values:
//! - BMI and its category
//! - daily intake target (Mifflin-St Jeor, moderate activity, aim adjustment)
//! - calories burned by a cardio session (speed-band table, swappable)
//! - calories burned by one strength set
//! - age from date of birth, metric/imperial conversion
//!
//! Nothing here touches storage. Missing inputs produce `None` or 0, never a panic.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::lenient::{parse_leading_int, parse_number};
use crate::models::{CardioKind, FitnessAim, Gender, Profile};

pub const DEFAULT_BODY_WEIGHT_KG: f64 = 70.0;
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
pub const DEFAULT_AGE: i32 = 25;

/// Moderately active
const ACTIVITY_FACTOR: f64 = 1.55;
const LOSS_ADJUSTMENT: f64 = -500.0;
const GAIN_ADJUSTMENT: f64 = 300.0;

const CM_PER_INCH: f64 = 2.54;
const LB_PER_KG: f64 = 2.20462;

/// Shown wherever a metric cannot be computed
pub const NO_VALUE: &str = "--";

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

// ---------------------------------------------------------------------------
/// BMI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BmiCategory {
    Underweight,
    Healthy,
    Overweight,
    Obese,
    Unknown,
}

impl BmiCategory {
    pub fn for_bmi(bmi: Option<f64>) -> Self {
        match bmi {
            None => Self::Unknown,
            Some(v) if v < 18.5 => Self::Underweight,
            Some(v) if v < 25.0 => Self::Healthy,
            Some(v) if v < 30.0 => Self::Overweight,
            Some(_) => Self::Obese,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Underweight => "Underweight",
            Self::Healthy => "Healthy",
            Self::Overweight => "Overweight",
            Self::Obese => "Obese",
            Self::Unknown => "Unknown",
        }
    }
}

impl std::fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// weight / (height in metres)^2, one decimal place
pub fn bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let height = height_cm.filter(|h| *h > 0.0)?;
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let metres = height / 100.0;
    Some(round_to(weight / (metres * metres), 1))
}

pub fn format_bmi(bmi: Option<f64>) -> String {
    match bmi {
        Some(v) => format!("{:.1}", v),
        None => NO_VALUE.to_string(),
    }
}

// ---------------------------------------------------------------------------
/// Daily Intake Target
// ---------------------------------------------------------------------------

/// Mifflin-St Jeor BMR scaled by the activity factor, adjusted for the aim.
/// An unset gender uses the midpoint of the male and female offsets.
pub fn daily_calorie_target(
    gender: Gender,
    weight_kg: f64,
    height_cm: f64,
    age: i32,
    aim: FitnessAim,
) -> i64 {
    let offset = match gender {
        Gender::Male => 5.0,
        Gender::Female => -161.0,
        Gender::Unset => -78.0,
    };
    let bmr = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age as f64 + offset;
    let adjustment = match aim {
        FitnessAim::Loss => LOSS_ADJUSTMENT,
        FitnessAim::Gain => GAIN_ADJUSTMENT,
        FitnessAim::Maintain => 0.0,
    };
    (bmr * ACTIVITY_FACTOR + adjustment).round() as i64
}

/// Whole years between `dob` and `today`, counting the birthday itself
pub fn age_on(dob: Option<NaiveDate>, today: NaiveDate) -> i32 {
    let Some(dob) = dob else {
        return DEFAULT_AGE;
    };
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// Everything the profile screen derives from the stored record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMetrics {
    pub bmi: Option<f64>,
    pub bmi_display: String,
    pub bmi_category: BmiCategory,
    pub age: i32,
    pub recommended_calories: i64,
    pub daily_calorie_goal: i64,
    pub daily_burn_goal: i64,
}

impl BodyMetrics {
    pub fn for_profile(profile: &Profile, today: NaiveDate) -> Self {
        let height = profile.height.map(|h| h as f64);
        let weight = profile.weight.map(|w| w as f64);
        let bmi = bmi(height, weight);
        let age = age_on(profile.birth_date(), today);

        Self {
            bmi,
            bmi_display: format_bmi(bmi),
            bmi_category: BmiCategory::for_bmi(bmi),
            age,
            recommended_calories: daily_calorie_target(
                profile.gender,
                weight.unwrap_or(DEFAULT_BODY_WEIGHT_KG),
                height.unwrap_or(DEFAULT_HEIGHT_CM),
                age,
                profile.aim,
            ),
            daily_calorie_goal: profile.daily_calorie_goal(),
            daily_burn_goal: profile.daily_burn_goal(),
        }
    }
}

// ---------------------------------------------------------------------------
/// Cardio Burn
// ---------------------------------------------------------------------------

/// One speed band. `max_kmh: None` is the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBand {
    pub max_kmh: Option<f64>,
    pub kcal_per_kg_km: f64,
    pub met: f64,
}

impl SpeedBand {
    const fn below(max_kmh: f64, kcal_per_kg_km: f64, met: f64) -> Self {
        Self { max_kmh: Some(max_kmh), kcal_per_kg_km, met }
    }

    const fn open(kcal_per_kg_km: f64, met: f64) -> Self {
        Self { max_kmh: None, kcal_per_kg_km, met }
    }
}

/// Coefficients for the cardio estimator. Loadable from JSON so the
/// numbers can be tuned without a rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardioCalorieTable {
    pub walk: Vec<SpeedBand>,
    pub run: Vec<SpeedBand>,
    pub ride: Vec<SpeedBand>,
    /// Flat MET for activities with no distance model
    pub other_met: f64,
    /// Relative gap above which the two estimates are averaged
    pub divergence: f64,
}

impl Default for CardioCalorieTable {
    fn default() -> Self {
        Self {
            walk: vec![
                SpeedBand::below(4.0, 0.80, 2.8),
                SpeedBand::below(5.5, 0.75, 3.5),
                SpeedBand::below(6.5, 0.72, 4.3),
                SpeedBand::open(0.75, 5.0),
            ],
            run: vec![
                SpeedBand::below(8.0, 0.95, 7.0),
                SpeedBand::below(10.0, 1.0, 9.0),
                SpeedBand::below(12.0, 1.0, 10.5),
                SpeedBand::open(1.05, 12.5),
            ],
            ride: vec![
                SpeedBand::below(16.0, 0.35, 4.0),
                SpeedBand::below(19.0, 0.30, 6.8),
                SpeedBand::below(22.0, 0.32, 8.0),
                SpeedBand::below(25.0, 0.35, 10.0),
                SpeedBand::open(0.40, 12.0),
            ],
            other_met: 5.0,
            divergence: 0.20,
        }
    }
}

impl CardioCalorieTable {
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Invalid cardio table: {}", e))
    }

    fn bands(&self, kind: CardioKind) -> &[SpeedBand] {
        match kind {
            CardioKind::Walk => &self.walk,
            CardioKind::Run => &self.run,
            CardioKind::Ride => &self.ride,
            CardioKind::Other => &[],
        }
    }

    fn band_for(&self, kind: CardioKind, speed_kmh: f64) -> Option<&SpeedBand> {
        self.bands(kind)
            .iter()
            .find(|band| band.max_kmh.map_or(true, |max| speed_kmh < max))
    }

    /// Estimated kcal for a session; 0 when duration is not positive.
    /// Activities with speed bands also need a positive distance.
    pub fn calories(&self, kind: CardioKind, distance_km: f64, duration_min: f64, weight_kg: f64) -> i64 {
        if !(duration_min > 0.0 && weight_kg > 0.0) {
            return 0;
        }
        let hours = duration_min / 60.0;
        let flat_met = self.other_met * weight_kg * hours;

        let estimate = if self.bands(kind).is_empty() {
            flat_met
        } else {
            if !(distance_km > 0.0) {
                return 0;
            }
            match self.band_for(kind, distance_km / hours) {
                Some(band) => {
                    let by_distance = band.kcal_per_kg_km * weight_kg * distance_km;
                    let by_met = band.met * weight_kg * hours;
                    if by_distance > 0.0 && (by_met - by_distance).abs() / by_distance > self.divergence {
                        (by_distance + by_met) / 2.0
                    } else {
                        by_distance
                    }
                }
                None => flat_met,
            }
        };

        estimate.round().max(0.0) as i64
    }
}

/// Cardio estimate from the raw form strings
pub fn cardio_calories(
    table: &CardioCalorieTable,
    kind: CardioKind,
    distance_km: &str,
    duration_min: &str,
    weight_kg: f64,
) -> i64 {
    match parse_number(duration_min) {
        Some(duration) => {
            let distance = parse_number(distance_km).unwrap_or(0.0);
            table.calories(kind, distance, duration, weight_kg)
        }
        None => 0,
    }
}

// ---------------------------------------------------------------------------
/// Strength Burn
// ---------------------------------------------------------------------------

const SECONDS_PER_REP: f64 = 3.0;
const SET_SETUP_SECONDS: f64 = 3.0;

/// kcal for one set, one decimal place. Heavy low-rep sets score highest,
/// light or high-rep sets lowest.
pub fn strength_set_calories(weight_kg: &str, reps: &str) -> f64 {
    let weight = parse_number(weight_kg).unwrap_or(0.0);
    // Whole reps only: "8.5" counts as 8 and "10 reps" as 10
    let reps = parse_leading_int(reps).unwrap_or(0) as f64;
    if weight <= 0.0 || reps <= 0.0 {
        return 0.0;
    }

    let met = if weight > 50.0 && reps <= 6.0 {
        6.0
    } else if weight < 20.0 || reps > 12.0 {
        3.5
    } else {
        5.0
    };
    let hours = (reps * SECONDS_PER_REP + SET_SETUP_SECONDS) / 3600.0;
    round_to(met * DEFAULT_BODY_WEIGHT_KG * hours, 1)
}

// ---------------------------------------------------------------------------
/// Unit Conversion
// ---------------------------------------------------------------------------

/// Whole feet and rounded inches
pub fn cm_to_feet_inches(cm: f64) -> (i64, i64) {
    let total_inches = cm / CM_PER_INCH;
    let mut feet = (total_inches / 12.0).floor() as i64;
    let mut inches = (total_inches % 12.0).round() as i64;
    if inches == 12 {
        feet += 1;
        inches = 0;
    }
    (feet, inches)
}

pub fn feet_inches_to_cm(feet: i64, inches: i64) -> i64 {
    (((feet * 12 + inches) as f64) * CM_PER_INCH).round() as i64
}

pub fn kg_to_lb(kg: f64) -> i64 {
    (kg * LB_PER_KG).round() as i64
}

pub fn lb_to_kg(lb: f64) -> i64 {
    (lb / LB_PER_KG).round() as i64
}

//! Sign-up completion: validate the collected answers, create the account
//! and seed the profile.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::auth::{AuthStore, Session};
use crate::error::AuthError;
use crate::metrics::age_on;
use crate::models::{Gender, ProfilePatch, UserPatch};
use crate::profile::ProfileStore;
use crate::time_utils::local_day;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_AGE: i32 = 16;

fn password_strength(value: &str) -> Result<(), ValidationError> {
  if value.trim().chars().count() < MIN_PASSWORD_LEN {
    return Err(ValidationError::new("password_too_short"));
  }
  Ok(())
}

fn gender_chosen(value: &Gender) -> Result<(), ValidationError> {
  if value.is_unset() {
    return Err(ValidationError::new("gender_required"));
  }
  Ok(())
}

/// Answers gathered across the onboarding screens
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingDraft {
  #[validate(custom(function = "crate::models::not_blank"), length(max = 100))]
  pub name: String,
  #[validate(email)]
  pub email: String,
  #[validate(custom(function = "password_strength"))]
  pub password: String,
  pub date_of_birth: NaiveDate,
  #[serde(default)]
  #[validate(custom(function = "gender_chosen"))]
  pub gender: Gender,
}

impl OnboardingDraft {
  /// Field rules plus the minimum age as of `today`
  pub fn check(&self, today: NaiveDate) -> Result<(), AuthError> {
    self.validate()?;
    if age_on(Some(self.date_of_birth), today) < MIN_AGE {
      return Err(AuthError::Validation(format!(
        "You must be at least {} years old to create an account",
        MIN_AGE
      )));
    }
    Ok(())
  }
}

/// Create the account (the email is the username), mark onboarding done and
/// save the profile. Nothing is written if the draft is invalid.
pub async fn complete_onboarding(
  auth: &AuthStore,
  profiles: &ProfileStore,
  draft: OnboardingDraft,
  now: DateTime<Utc>,
) -> Result<Session, AuthError> {
  draft.check(local_day(now))?;

  let email = draft.email.trim().to_string();
  let session = auth.sign_up(&email, &draft.password, now).await?;
  let session = auth
    .update_user(
      session,
      UserPatch {
        name: Some(draft.name.trim().to_string()),
        email: Some(email.clone()),
        has_completed_onboarding: Some(true),
      },
    )
    .await?;

  profiles
    .save(ProfilePatch {
      name: Some(draft.name),
      email: Some(email),
      date_of_birth: Some(draft.date_of_birth),
      gender: Some(draft.gender),
      ..Default::default()
    })
    .await?;

  tracing::info!(user_id = %session.user().id, "Onboarding completed");
  Ok(session)
}

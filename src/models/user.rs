use serde::{Deserialize, Serialize};

/// Signed-in user, stored under `@auth_current_user` and as the per-identity snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  pub id: String,
  pub username: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub email: Option<String>,
  #[serde(default)]
  pub has_completed_onboarding: bool,
}

/// Partial user update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
  pub name: Option<String>,
  pub email: Option<String>,
  pub has_completed_onboarding: Option<bool>,
}

impl UserPatch {
  pub fn apply_to(self, user: &mut User) {
    if let Some(name) = self.name {
      user.name = Some(name);
    }
    if let Some(email) = self.email {
      user.email = Some(email);
    }
    if let Some(done) = self.has_completed_onboarding {
      user.has_completed_onboarding = done;
    }
  }
}

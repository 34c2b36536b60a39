use serde::{Deserialize, Serialize};

/// App-level preferences stored under `@app_settings`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
  #[serde(default = "default_on")]
  pub dark_mode: bool,
  #[serde(default = "default_on")]
  pub notifications: bool,
}

fn default_on() -> bool {
  true
}

impl Default for AppSettings {
  fn default() -> Self {
    Self {
      dark_mode: true,
      notifications: true,
    }
  }
}

/// Partial settings update
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingsPatch {
  pub dark_mode: Option<bool>,
  pub notifications: Option<bool>,
}

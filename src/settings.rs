//! App preferences under `@app_settings`.

use crate::error::StoreResult;
use crate::models::{AppSettings, AppSettingsPatch};
use crate::storage::{keys, KvStore};

#[derive(Clone)]
pub struct SettingsStore {
  kv: KvStore,
}

impl SettingsStore {
  pub fn new(kv: KvStore) -> Self {
    Self { kv }
  }

  /// Stored settings, or the defaults (everything on)
  pub async fn load(&self) -> StoreResult<AppSettings> {
    Ok(self.kv.get_json(keys::APP_SETTINGS).await?.unwrap_or_default())
  }

  pub async fn save(&self, patch: AppSettingsPatch) -> StoreResult<AppSettings> {
    let mut settings = self.load().await?;
    if let Some(dark_mode) = patch.dark_mode {
      settings.dark_mode = dark_mode;
    }
    if let Some(notifications) = patch.notifications {
      settings.notifications = notifications;
    }
    self.kv.set_json(keys::APP_SETTINGS, &settings).await?;
    Ok(settings)
  }
}

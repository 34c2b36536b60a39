//! The single user profile under `profile`.

use validator::Validate;

use crate::error::{StoreError, StoreResult};
use crate::models::{Profile, ProfilePatch};
use crate::storage::{keys, KvStore};

#[derive(Clone)]
pub struct ProfileStore {
  kv: KvStore,
}

impl ProfileStore {
  pub fn new(kv: KvStore) -> Self {
    Self { kv }
  }

  pub async fn load(&self) -> StoreResult<Option<Profile>> {
    self.kv.get_json(keys::PROFILE).await
  }

  /// Load the profile, or an empty one if nothing has been saved
  pub async fn load_or_default(&self) -> StoreResult<Profile> {
    Ok(self.load().await?.unwrap_or_default())
  }

  /// Validate a partial update, merge it into the stored record and write
  /// the whole record back. Invalid input never reaches storage.
  pub async fn save(&self, patch: ProfilePatch) -> StoreResult<Profile> {
    patch.validate()?;
    if patch.is_empty() {
      return Err(StoreError::Validation("Nothing to update".to_string()));
    }

    let mut profile = self.load_or_default().await?;
    patch.apply_to(&mut profile);
    self.kv.set_json(keys::PROFILE, &profile).await?;

    tracing::debug!("Saved profile");
    Ok(profile)
  }
}

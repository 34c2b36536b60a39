pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod error;
pub mod metrics;
pub mod models;
pub mod nutrition;
pub mod onboarding;
pub mod profile;
pub mod settings;
pub mod storage;
pub mod time_utils;
pub mod workouts;

#[cfg(feature = "app")]
mod commands;

#[cfg(test)]
mod test_utils;

use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_logging(filter: &str) {
  let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

  // A second call (tests, mobile re-entry) keeps the first subscriber
  let _ = fmt().with_env_filter(env_filter).with_target(true).try_init();
}

#[cfg(feature = "app")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
  use config::AppConfig;
  use db::AppState;
  use std::sync::Arc;
  use tauri::Manager;

  let config = match AppConfig::from_env() {
    Ok(config) => config,
    Err(e) => {
      eprintln!("Invalid configuration, using defaults: {}", e);
      AppConfig::default()
    }
  };
  init_logging(&config.log_filter);

  tauri::Builder::default()
    .setup(move |app| {
      // Initialize database
      let app_handle = app.handle().clone();
      let pool = tauri::async_runtime::block_on(db::initialize_db(&app_handle, &config))
        .map_err(|e| {
          tracing::error!(error = %e, "Failed to initialize database");
          e
        })?;

      app_handle.manage(Arc::new(AppState::new(pool, config)));
      tracing::info!("Database ready");
      Ok(())
    })
    .invoke_handler(tauri::generate_handler![
      // Profile and preferences
      commands::profile::get_profile,
      commands::profile::save_profile,
      commands::profile::get_body_metrics,
      commands::profile::get_app_settings,
      commands::profile::save_app_settings,
      commands::profile::clear_all_data,
      // Workouts
      commands::workout::list_workouts_for_day,
      commands::workout::get_workout,
      commands::workout::log_cardio,
      commands::workout::delete_workouts,
      commands::workout::get_burn_summary,
      commands::workout::search_exercises,
      commands::workout::get_active_workout,
      commands::workout::start_active_workout,
      commands::workout::save_active_workout,
      commands::workout::complete_active_workout,
      commands::workout::discard_active_workout,
      // Nutrition
      commands::nutrition::list_foods_for_day,
      commands::nutrition::get_food_categories,
      commands::nutrition::search_foods,
      commands::nutrition::add_food,
      commands::nutrition::remove_food,
      commands::nutrition::get_nutrition_summary,
      // Accounts
      commands::auth::sign_up,
      commands::auth::sign_in,
      commands::auth::sign_out,
      commands::auth::get_session,
      commands::auth::complete_onboarding,
      commands::auth::delete_account,
    ])
    .run(tauri::generate_context!())
    .expect("error while running tauri application");
}

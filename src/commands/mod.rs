pub mod auth;
pub mod nutrition;
pub mod profile;
pub mod workout;

use std::fmt::Display;

/// Log a failed operation and turn it into the message the UI shows
pub(crate) fn fail(context: &str, err: impl Display) -> String {
  tracing::error!(error = %err, "{}", context);
  format!("{}: {}", context, err)
}

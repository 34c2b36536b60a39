//! Shared helpers for record ids and local-day comparisons.

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Calendar day of an instant in the device's timezone
pub fn local_day(instant: DateTime<Utc>) -> NaiveDate {
  instant.with_timezone(&Local).date_naive()
}

pub fn today_local() -> NaiveDate {
  Local::now().date_naive()
}

/// Time-derived record id (epoch milliseconds), bumped until it does not
/// collide with an id already in use.
pub fn time_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
  let mut candidate = now.timestamp_millis();
  while taken(&candidate.to_string()) {
    candidate += 1;
  }
  candidate.to_string()
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::TimeZone;

  #[test]
  fn test_time_id_skips_taken_ids() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    assert_eq!(time_id(now, |_| false), "1700000000000");

    let taken = ["1700000000000", "1700000000001"];
    assert_eq!(time_id(now, |id| taken.contains(&id)), "1700000000002");
  }

  #[test]
  fn test_local_day_matches_local_calendar() {
    let local_noon = Local.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
    let instant = local_noon.with_timezone(&Utc);
    assert_eq!(local_day(instant), NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
  }
}

//! Episode release evaluation
//!
//! A pure predicate deciding whether an episode is watchable "now". The
//! reference date is injected (see `clock`) rather than read from the wall
//! clock, so callers control what "now" means.

use chrono::NaiveDate;

use crate::types::Episode;

/// Is this episode released as of `today`?
///
/// True iff the release date is at or before `today`. Two deliberate
/// leniencies err toward watchability:
///
/// - an episode whose upstream record had no release date was stamped with
///   the fetch-time "today" during validation, so it evaluates as released
///   relative to the moment the record was constructed;
/// - an impossible calendar date (month 13, February 30, ...) is treated
///   as released rather than hidden.
pub fn is_released(episode: &Episode, today: NaiveDate) -> bool {
    match episode.release_date.as_date() {
        Some(date) => date <= today,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReleaseDate, FALLBACK_PLOT};
    use proptest::prelude::*;

    fn episode_released_on(year: i32, month: u32, day: u32) -> Episode {
        Episode {
            id: "ep1".to_string(),
            title: "Pilot".to_string(),
            season_number: 1,
            episode_number: 1,
            plot: FALLBACK_PLOT.to_string(),
            poster: None,
            rating: None,
            release_date: ReleaseDate { year, month, day },
        }
    }

    #[test]
    fn test_past_release_is_released() {
        let ep = episode_released_on(2020, 3, 15);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(is_released(&ep, today));
    }

    #[test]
    fn test_release_today_is_released() {
        let ep = episode_released_on(2024, 1, 1);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(is_released(&ep, today));
    }

    #[test]
    fn test_future_release_is_not_released() {
        let ep = episode_released_on(2024, 1, 2);
        let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert!(!is_released(&ep, today));
    }

    #[test]
    fn test_impossible_date_is_released() {
        let ep = episode_released_on(2024, 2, 30);
        let today = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
        assert!(is_released(&ep, today));
    }

    proptest! {
        // Released episodes stay released: if the predicate holds at some
        // date it holds at every later date.
        #[test]
        fn released_is_monotonic_in_time(
            year in 1990i32..2100,
            month in 1u32..=12,
            day in 1u32..=28,
            offset_days in 0i64..20_000,
        ) {
            let ep = episode_released_on(year, month, day);
            let start = NaiveDate::from_ymd_opt(year, month, day).unwrap();
            let later = start + chrono::Duration::days(offset_days);

            prop_assert!(is_released(&ep, start));
            prop_assert!(is_released(&ep, later));
        }
    }
}

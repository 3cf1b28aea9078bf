//! Data types for the binge core library
//!
//! This module contains the domain model shared by the fetch layer and the
//! session state machine. All types implement Serialize and Deserialize so
//! that a GUI shell can pass them over a JSON boundary unchanged.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Poster path used when an episode has no primary image, or when the
/// image fails to load in the shell.
pub const FALLBACK_POSTER: &str = "/img.png";

/// Placeholder plot for episodes the API returns without a description.
pub const FALLBACK_PLOT: &str = "No description available.";

/// A season as reported by the seasons endpoint.
///
/// The label is kept verbatim; upstream occasionally reports labels such
/// as `"Unknown"` that carry no usable number. Those seasons stay in the
/// stored set but are excluded from the navigable season numbers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    /// Season label as received (usually numeric, not guaranteed)
    pub label: String,
    /// Number of episodes upstream reports for this season
    pub episode_count: u32,
}

impl Season {
    /// Parse the season number out of the label.
    ///
    /// Matches lenient `parseInt` semantics: a leading run of ASCII digits
    /// is accepted even when followed by junk, so `"3"` and `"3x"` are both
    /// season 3 while `"Unknown"` is `None`.
    ///
    /// # Example
    /// ```
    /// use binge_core::Season;
    ///
    /// let season = Season { label: "2".to_string(), episode_count: 10 };
    /// assert_eq!(season.number(), Some(2));
    ///
    /// let odd = Season { label: "Unknown".to_string(), episode_count: 1 };
    /// assert_eq!(odd.number(), None);
    /// ```
    pub fn number(&self) -> Option<u32> {
        let trimmed = self.label.trim();
        let digits: String = trimmed
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

/// Calendar date an episode was (or will be) released.
///
/// Stored as raw year/month/day fields, as received. The fields are not
/// validated on construction; `as_date` reports whether they form a real
/// calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseDate {
    pub year: i32,
    /// 1-indexed month
    pub month: u32,
    pub day: u32,
}

impl ReleaseDate {
    /// Build a release date from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self {
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }

    /// Interpret the raw fields as a calendar date.
    ///
    /// Returns `None` for impossible dates (month 13, February 30, ...).
    pub fn as_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    /// Human-readable form, e.g. `"Jan 5, 2024"`.
    ///
    /// Impossible dates render as `"Unknown date"`.
    pub fn format_long(&self) -> String {
        match self.as_date() {
            Some(date) => date.format("%b %-d, %Y").to_string(),
            None => "Unknown date".to_string(),
        }
    }
}

/// Aggregate rating attached to an episode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    /// Aggregate score, typically on a 0-10 scale
    pub aggregate: f32,
    /// Number of votes behind the aggregate
    pub votes: u32,
}

/// One watchable unit within a season.
///
/// Instances are produced by record validation in the `api` module, which
/// guarantees a non-empty id and title and a positive episode number, and
/// fills in the plot and release-date defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Opaque upstream id, unique within a title
    pub id: String,
    /// Episode title
    pub title: String,
    /// Season this episode belongs to (1-based)
    pub season_number: u32,
    /// Episode number within the season (1-based)
    pub episode_number: u32,
    /// Plot summary; never empty (defaults to [`FALLBACK_PLOT`])
    pub plot: String,
    /// Primary image URL, if upstream has one
    pub poster: Option<String>,
    /// Aggregate rating, if the episode has been rated
    pub rating: Option<Rating>,
    /// Release date; defaults to the fetch-time "today" when upstream
    /// omits it, which deliberately makes such episodes releasable
    pub release_date: ReleaseDate,
}

impl Episode {
    /// Episode code in `SxxEyy` form, e.g. `S01E05`.
    pub fn code(&self) -> String {
        format!("S{:02}E{:02}", self.season_number, self.episode_number)
    }

    /// Poster URL with the static placeholder as fallback.
    pub fn poster_url(&self) -> &str {
        self.poster.as_deref().unwrap_or(FALLBACK_POSTER)
    }
}

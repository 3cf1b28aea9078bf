//! Seasons endpoint payload
//!
//! Shape: `{ "seasons": [ { "season": "1", "episodeCount": 10 }, ... ] }`.
//! The list is assumed complete in a single response; no pagination.

use serde::Deserialize;

use crate::types::Season;

/// Raw body of `GET /titles/{id}/seasons`.
#[derive(Debug, Deserialize)]
pub struct SeasonsResponse {
    #[serde(default)]
    pub seasons: Vec<SeasonRecord>,
}

/// One season entry as upstream sends it.
#[derive(Debug, Deserialize)]
pub struct SeasonRecord {
    #[serde(default)]
    pub season: Option<String>,
    #[serde(rename = "episodeCount", default)]
    pub episode_count: u32,
}

/// Convert a seasons payload into stored seasons.
///
/// Records are kept in upstream order, including ones whose label is
/// missing or non-numeric: the caller derives the navigable season-number
/// set separately and relies on the raw first element to pick the initial
/// season. A missing label becomes an empty string, which parses to no
/// season number.
pub fn collect_seasons(response: SeasonsResponse) -> Vec<Season> {
    response
        .seasons
        .into_iter()
        .map(|record| Season {
            label: record.season.unwrap_or_default(),
            episode_count: record.episode_count,
        })
        .collect()
}

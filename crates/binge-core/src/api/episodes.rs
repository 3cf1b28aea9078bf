//! Episodes endpoint payload
//!
//! Shape: `{ "episodes": [ { "id", "title", "primaryImage"?, "season",
//! "episodeNumber", "plot"?, "rating"?, "releaseDate"? }, ... ] }`.
//! Only the first page is ever fetched (see `ImdbClient::fetch_episodes`).

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::types::{Episode, Rating, ReleaseDate, FALLBACK_PLOT};

/// Raw body of `GET /titles/{id}/episodes?season=..&pageSize=..`.
#[derive(Debug, Deserialize)]
pub struct EpisodesResponse {
    #[serde(default)]
    pub episodes: Vec<EpisodeRecord>,
}

/// One episode entry as upstream sends it. Everything is optional here;
/// validation decides what is required.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EpisodeRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub primary_image: Option<ImageRecord>,
    #[serde(default)]
    pub season: Option<String>,
    #[serde(default)]
    pub episode_number: Option<u32>,
    #[serde(default)]
    pub plot: Option<String>,
    #[serde(default)]
    pub rating: Option<RatingRecord>,
    #[serde(default)]
    pub release_date: Option<ReleaseDateRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ImageRecord {
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingRecord {
    #[serde(default)]
    pub aggregate_rating: Option<f32>,
    #[serde(default)]
    pub vote_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct ReleaseDateRecord {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub month: Option<u32>,
    #[serde(default)]
    pub day: Option<u32>,
}

/// Convert an episodes payload into validated episodes.
///
/// Records missing an id, a title, or a positive episode number are
/// dropped silently; a partially broken response still yields its usable
/// episodes. `today` stamps the release date of records that come without
/// one, which makes such episodes releasable by default.
pub fn collect_episodes(response: EpisodesResponse, today: NaiveDate) -> Vec<Episode> {
    let total = response.episodes.len();
    let episodes: Vec<Episode> = response
        .episodes
        .into_iter()
        .filter_map(|record| validate_record(record, today))
        .collect();

    if episodes.len() < total {
        debug!(
            kept = episodes.len(),
            dropped = total - episodes.len(),
            "dropped episode records missing required fields"
        );
    }

    episodes
}

/// Validate a single record, applying defaults.
fn validate_record(record: EpisodeRecord, today: NaiveDate) -> Option<Episode> {
    let id = record.id.filter(|id| !id.is_empty())?;
    let title = record.title.filter(|title| !title.is_empty())?;
    let episode_number = record.episode_number.filter(|&n| n > 0)?;

    let season_number = record
        .season
        .map(|label| {
            let digits: String = label
                .trim()
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok().filter(|&n| n > 0).unwrap_or(1)
        })
        .unwrap_or(1);

    let release_date = match record.release_date {
        Some(raw) => {
            // Partial dates happen; missing month/day round down to the 1st.
            let fallback = ReleaseDate::from_date(today);
            ReleaseDate {
                year: raw.year.unwrap_or(fallback.year),
                month: raw.month.unwrap_or(1),
                day: raw.day.unwrap_or(1),
            }
        }
        None => ReleaseDate::from_date(today),
    };

    let rating = record.rating.and_then(|raw| {
        raw.aggregate_rating.map(|aggregate| Rating {
            aggregate,
            votes: raw.vote_count.unwrap_or(0),
        })
    });

    Some(Episode {
        id,
        title,
        season_number,
        episode_number,
        plot: record
            .plot
            .filter(|plot| !plot.is_empty())
            .unwrap_or_else(|| FALLBACK_PLOT.to_string()),
        poster: record.primary_image.and_then(|image| image.url),
        rating,
        release_date,
    })
}

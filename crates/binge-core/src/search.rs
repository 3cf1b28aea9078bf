//! Free-text episode search
//!
//! Case-insensitive substring filter over episode titles. Cheap enough to
//! re-run on every keystroke for realistic list sizes (tens of items), so
//! no debouncing or indexing.

use crate::types::Episode;

/// Filter episodes whose title contains `query`, case-insensitively.
///
/// An empty or whitespace-only query returns the full list in order.
/// The result is always a subsequence of the input.
///
/// # Example
/// ```
/// use binge_core::search::filter_by_title;
/// # use binge_core::{Episode, ReleaseDate};
/// # fn ep(title: &str) -> Episode {
/// #     Episode {
/// #         id: title.to_string(),
/// #         title: title.to_string(),
/// #         season_number: 1,
/// #         episode_number: 1,
/// #         plot: String::from("-"),
/// #         poster: None,
/// #         rating: None,
/// #         release_date: ReleaseDate { year: 2020, month: 1, day: 1 },
/// #     }
/// # }
/// let episodes = vec![ep("Pilot"), ep("The Calm"), ep("Pilot Part 2")];
/// let hits = filter_by_title(&episodes, "pilot");
/// assert_eq!(hits.len(), 2);
/// ```
pub fn filter_by_title<'a>(episodes: &'a [Episode], query: &str) -> Vec<&'a Episode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return episodes.iter().collect();
    }
    episodes
        .iter()
        .filter(|ep| ep.title.to_lowercase().contains(&needle))
        .collect()
}

//! Playback address construction
//!
//! The video player is an external embed provider addressed purely by URL.
//! Building that URL is a projection of selection state, never a source of
//! truth: callers must pass the season/episode pair that the session
//! currently considers effective.

/// Build the embed player URL for a series position.
///
/// Shape: `{base}/embed/tv?imdb={id}&season={s}&episode={e}`. The base may
/// carry a trailing slash; the title id is percent-encoded.
///
/// # Example
/// ```
/// use binge_core::playback::embed_url;
///
/// let url = embed_url("https://vidsrc.example", "tt0903747", 2, 5);
/// assert_eq!(url, "https://vidsrc.example/embed/tv?imdb=tt0903747&season=2&episode=5");
/// ```
pub fn embed_url(base: &str, title_id: &str, season: u32, episode: u32) -> String {
    format!(
        "{}/embed/tv?imdb={}&season={}&episode={}",
        base.trim_end_matches('/'),
        urlencoding::encode(title_id),
        season,
        episode
    )
}

//! binge core library
//!
//! Season/episode orchestration core for a series playback front end:
//! given an IMDb title id, discover its seasons, lazily fetch episode
//! lists per season, auto-select a sensible default episode, navigate
//! prev/next, filter episodes by title, and derive the embed player URL,
//! while degrading to a manual numeric picker when metadata is
//! unreachable.
//!
//! # Features
//! - Rate-limited JSON client for the two metadata endpoints
//! - Per-concern loading/error flags (seasons vs. episodes)
//! - Race-safe episode fetches (newest request wins)
//! - Release-date gating with an injected clock for deterministic tests

pub mod api;
pub mod client;
pub mod clock;
pub mod error;
pub mod playback;
pub mod release;
pub mod search;
pub mod session;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, ImdbClient, RateLimiter};
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{BingeError, Result};
pub use session::{EpisodeFetch, FetchState, SeriesSession};
pub use types::{Episode, Rating, ReleaseDate, Season, FALLBACK_PLOT, FALLBACK_POSTER};

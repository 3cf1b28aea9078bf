//! Wire payloads and record validation
//!
//! One submodule per upstream endpoint. Each defines the serde shapes the
//! endpoint answers with and a `collect_*` function that turns a payload
//! into validated domain types, dropping individually broken records
//! instead of failing the whole response.

pub mod episodes;
pub mod seasons;

pub use episodes::{collect_episodes, EpisodesResponse};
pub use seasons::{collect_seasons, SeasonsResponse};

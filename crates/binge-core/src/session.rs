//! Series playback session
//!
//! One `SeriesSession` owns the whole episode/season orchestration state
//! for a single title view: the fetched season set, the episode list of
//! the currently browsed season, the selected episode, per-concern fetch
//! flags, and the degraded manual mode. A title change means constructing
//! a new session; nothing is shared across titles.
//!
//! Fetches are split into a `begin` step that tags the request with the
//! requested season and a generation counter, and an `apply` step that
//! discards results which no longer match current state. The async
//! convenience methods compose the two around the HTTP call; shells with
//! their own event loop can drive the halves directly.

use tracing::{debug, warn};

use crate::api;
use crate::client::ImdbClient;
use crate::clock::{Clock, SystemClock};
use crate::error::Result;
use crate::playback;
use crate::release;
use crate::search;
use crate::types::{Episode, Season};

/// Loading/error state of one fetch concern.
///
/// Seasons and episodes each carry their own state because their failures
/// degrade differently in the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// Never attempted
    #[default]
    Idle,
    /// Request in flight (between begin and apply)
    Loading,
    /// Last attempt succeeded with usable data
    Loaded,
    /// Last attempt failed or returned nothing usable; terminal until the
    /// next triggering event
    Failed,
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, FetchState::Loaded)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchState::Failed)
    }
}

/// Tag identifying one episode fetch cycle.
///
/// Returned by [`SeriesSession::begin_episode_fetch`]; must be handed back
/// to [`SeriesSession::apply_episode_fetch`] together with the outcome.
#[derive(Debug)]
pub struct EpisodeFetch {
    season: u32,
    generation: u64,
}

impl EpisodeFetch {
    /// Season this fetch was issued for.
    pub fn season(&self) -> u32 {
        self.season
    }
}

/// Orchestration state for one title view.
///
/// # Example
/// ```no_run
/// use binge_core::{ImdbClient, SeriesSession};
///
/// # async fn example() -> Result<(), binge_core::BingeError> {
/// let client = ImdbClient::new()?;
/// let mut session = SeriesSession::new(client, "tt0903747");
/// session.initialize().await;
///
/// if session.is_degraded() {
///     session.set_manual_position(1, 1);
/// }
/// println!("{}", session.playback_url("https://vidsrc.example"));
/// # Ok(())
/// # }
/// ```
pub struct SeriesSession<C: Clock = SystemClock> {
    client: ImdbClient,
    clock: C,
    title_id: String,
    seasons: Vec<Season>,
    episodes: Vec<Episode>,
    selected: Option<Episode>,
    current_season: u32,
    current_episode: u32,
    seasons_state: FetchState,
    episodes_state: FetchState,
    initial_pick_done: bool,
    episode_generation: u64,
    player_dirty: bool,
}

impl SeriesSession<SystemClock> {
    /// Create a session for one title, using the system clock.
    pub fn new(client: ImdbClient, title_id: impl Into<String>) -> Self {
        Self::with_clock(client, title_id, SystemClock)
    }
}

impl<C: Clock> SeriesSession<C> {
    /// Create a session with an explicit clock (tests, reproduction).
    pub fn with_clock(client: ImdbClient, title_id: impl Into<String>, clock: C) -> Self {
        Self {
            client,
            clock,
            title_id: title_id.into().trim().to_string(),
            seasons: Vec::new(),
            episodes: Vec::new(),
            selected: None,
            current_season: 1,
            current_episode: 1,
            seasons_state: FetchState::Idle,
            episodes_state: FetchState::Idle,
            initial_pick_done: false,
            episode_generation: 0,
            // The player starts unloaded.
            player_dirty: true,
        }
    }

    // ---- orchestration ----------------------------------------------------

    /// Load the season list, then the initial season's episodes.
    ///
    /// The seasons fetch must complete and assign an initial season before
    /// the first episode fetch is issued; a seasons failure therefore skips
    /// the episode fetch entirely and leaves the session degraded.
    pub async fn initialize(&mut self) {
        self.load_seasons().await;
        if self.seasons_state.is_loaded() {
            self.load_current_season_episodes().await;
        }
    }

    /// Fetch and store the season list.
    ///
    /// On success with a non-empty list the current season becomes the
    /// first returned season's number (upstream order is not assumed
    /// sorted), defaulting to 1 when that label is unparsable. An empty or
    /// malformed response and any transport failure set the seasons flag
    /// to `Failed`; there is no automatic retry.
    pub async fn load_seasons(&mut self) {
        self.seasons_state = FetchState::Loading;
        match self.client.fetch_seasons(&self.title_id).await {
            Ok(payload) => {
                let seasons = api::collect_seasons(payload);
                if seasons.is_empty() {
                    warn!(title = %self.title_id, "seasons response was empty");
                    self.seasons_state = FetchState::Failed;
                } else {
                    self.current_season = seasons[0].number().unwrap_or(1);
                    self.seasons = seasons;
                    self.seasons_state = FetchState::Loaded;
                }
            }
            Err(err) => {
                warn!(title = %self.title_id, error = %err, "seasons fetch failed");
                self.seasons_state = FetchState::Failed;
            }
        }
    }

    /// Fetch the current season's episodes (begin + HTTP + apply).
    pub async fn load_current_season_episodes(&mut self) {
        let fetch = self.begin_episode_fetch();
        let outcome = self.request_episodes(fetch.season()).await;
        self.apply_episode_fetch(fetch, outcome);
    }

    /// Switch to another season and fetch its episodes.
    ///
    /// Re-selecting the current season is a no-op, which also means a
    /// failed episode fetch is only retried by moving to a different
    /// season (or a new title, i.e. a new session). Switching season never
    /// touches the selected episode or the player.
    pub async fn select_season(&mut self, season: u32) {
        let Some(fetch) = self.begin_season_change(season) else {
            return;
        };
        let outcome = self.request_episodes(fetch.season()).await;
        self.apply_episode_fetch(fetch, outcome);
    }

    /// Begin an episode fetch for the current season.
    ///
    /// Marks the episodes concern as loading and returns the tag that a
    /// later [`apply_episode_fetch`](Self::apply_episode_fetch) must
    /// present. Beginning a newer fetch invalidates all older tags.
    pub fn begin_episode_fetch(&mut self) -> EpisodeFetch {
        self.episode_generation += 1;
        self.episodes_state = FetchState::Loading;
        EpisodeFetch {
            season: self.current_season,
            generation: self.episode_generation,
        }
    }

    /// Change the current season and begin fetching its episodes.
    ///
    /// Returns `None` (and does nothing) when `season` already is the
    /// current season.
    pub fn begin_season_change(&mut self, season: u32) -> Option<EpisodeFetch> {
        if season == self.current_season {
            return None;
        }
        self.current_season = season;
        Some(self.begin_episode_fetch())
    }

    /// Apply the outcome of an episode fetch.
    ///
    /// A result whose tag is not the most recently begun fetch, or whose
    /// season no longer matches the current season, is discarded: the
    /// newest request always wins, regardless of arrival order.
    ///
    /// The first successful non-empty apply of the session's lifetime runs
    /// the initial auto-selection: the last element of the releasable
    /// filter in upstream order (upstream is assumed ascending by episode
    /// number and is not re-sorted). With no releasable episode nothing is
    /// selected. Either way the initial pick never runs again, so later
    /// season switches cannot change the selection.
    pub fn apply_episode_fetch(&mut self, fetch: EpisodeFetch, outcome: Result<Vec<Episode>>) {
        if fetch.generation != self.episode_generation || fetch.season != self.current_season {
            debug!(
                season = fetch.season,
                generation = fetch.generation,
                "discarding stale episode fetch result"
            );
            return;
        }

        match outcome {
            Ok(episodes) if !episodes.is_empty() => {
                self.episodes = episodes;
                self.episodes_state = FetchState::Loaded;
                self.run_initial_pick();
            }
            Ok(_) => {
                warn!(
                    title = %self.title_id,
                    season = fetch.season,
                    "episodes response had no valid records"
                );
                self.episodes_state = FetchState::Failed;
            }
            Err(err) => {
                warn!(
                    title = %self.title_id,
                    season = fetch.season,
                    error = %err,
                    "episodes fetch failed"
                );
                self.episodes_state = FetchState::Failed;
            }
        }
    }

    async fn request_episodes(&self, season: u32) -> Result<Vec<Episode>> {
        let today = self.clock.today();
        self.client
            .fetch_episodes(&self.title_id, season)
            .await
            .map(|payload| api::collect_episodes(payload, today))
    }

    fn run_initial_pick(&mut self) {
        if self.initial_pick_done {
            return;
        }
        self.initial_pick_done = true;

        let today = self.clock.today();
        let pick = self
            .episodes
            .iter()
            .filter(|ep| release::is_released(ep, today))
            .last()
            .cloned();

        if let Some(ep) = pick {
            debug!(episode = %ep.code(), "initial auto-selection");
            self.current_episode = ep.episode_number;
            self.selected = Some(ep);
        }
    }

    // ---- selection --------------------------------------------------------

    /// Select an episode from the currently loaded list by id.
    ///
    /// Selecting an unreleased or unknown episode is a silent no-op.
    /// A successful selection updates the season/episode counters to match
    /// (selection is the source of truth, not the counters) and marks the
    /// player for a hard reload. Returns whether the selection applied.
    pub fn select_episode(&mut self, episode_id: &str) -> bool {
        let Some(ep) = self
            .episodes
            .iter()
            .find(|ep| ep.id == episode_id)
            .cloned()
        else {
            return false;
        };
        if !release::is_released(&ep, self.clock.today()) {
            return false;
        }

        self.current_season = ep.season_number;
        self.current_episode = ep.episode_number;
        self.selected = Some(ep);
        self.player_dirty = true;
        true
    }

    /// Whether a previous episode exists in the loaded list.
    pub fn has_previous(&self) -> bool {
        matches!(self.selected_index(), Some(index) if index > 0)
    }

    /// Whether a next episode exists in the loaded list.
    pub fn has_next(&self) -> bool {
        matches!(self.selected_index(), Some(index) if index + 1 < self.episodes.len())
    }

    /// Step to the previous episode of the loaded list.
    ///
    /// A no-op at the list start, when nothing is selected, or when the
    /// selection is not part of the loaded list (after browsing to another
    /// season). Returns whether a selection applied.
    pub fn select_previous(&mut self) -> bool {
        match self.selected_index() {
            Some(index) if index > 0 => {
                let id = self.episodes[index - 1].id.clone();
                self.select_episode(&id)
            }
            _ => false,
        }
    }

    /// Step to the next episode of the loaded list.
    ///
    /// Boundary and no-selection cases behave like
    /// [`select_previous`](Self::select_previous).
    pub fn select_next(&mut self) -> bool {
        match self.selected_index() {
            Some(index) if index + 1 < self.episodes.len() => {
                let id = self.episodes[index + 1].id.clone();
                self.select_episode(&id)
            }
            _ => false,
        }
    }

    fn selected_index(&self) -> Option<usize> {
        let selected = self.selected.as_ref()?;
        self.episodes.iter().position(|ep| ep.id == selected.id)
    }

    // ---- fallback / manual mode -------------------------------------------

    /// Whether the session is degraded to manual mode.
    ///
    /// True when either fetch concern failed; the shell should render the
    /// numeric season/episode picker and keep the player usable.
    pub fn is_degraded(&self) -> bool {
        self.seasons_state.is_failed() || self.episodes_state.is_failed()
    }

    /// Set the playback position from raw numbers, bypassing metadata.
    ///
    /// Escape hatch for the degraded mode: clears any selection so the
    /// playback address is built from the counters alone, and marks the
    /// player for a hard reload. Never triggers a fetch.
    pub fn set_manual_position(&mut self, season: u32, episode: u32) {
        self.current_season = season;
        self.current_episode = episode;
        self.selected = None;
        self.player_dirty = true;
    }

    // ---- derived views ----------------------------------------------------

    /// Stored seasons, in upstream order.
    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    /// Navigable season numbers: parsed, deduplicated, ascending.
    /// Seasons with unparsable labels are dropped, not errored.
    pub fn season_numbers(&self) -> Vec<u32> {
        let mut numbers: Vec<u32> = self.seasons.iter().filter_map(Season::number).collect();
        numbers.sort_unstable();
        numbers.dedup();
        numbers
    }

    /// Episodes of the currently loaded season, in upstream order.
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Episodes whose title matches a free-text query (see `search`).
    pub fn search_episodes(&self, query: &str) -> Vec<&Episode> {
        search::filter_by_title(&self.episodes, query)
    }

    /// The selected episode, if any ("now playing" panel data).
    pub fn selected_episode(&self) -> Option<&Episode> {
        self.selected.as_ref()
    }

    /// Is this episode released as of the session clock's today?
    pub fn is_released(&self, episode: &Episode) -> bool {
        release::is_released(episode, self.clock.today())
    }

    /// Currently browsed season number.
    pub fn current_season(&self) -> u32 {
        self.current_season
    }

    /// Current episode counter (tracks the selection; raw manual value in
    /// degraded mode).
    pub fn current_episode(&self) -> u32 {
        self.current_episode
    }

    /// Fetch state of the seasons concern.
    pub fn seasons_state(&self) -> FetchState {
        self.seasons_state
    }

    /// Fetch state of the episodes concern.
    pub fn episodes_state(&self) -> FetchState {
        self.episodes_state
    }

    /// Title id this session is bound to.
    pub fn title_id(&self) -> &str {
        &self.title_id
    }

    /// Build the player URL for the effective position.
    ///
    /// The selected episode wins; without a selection the raw counters are
    /// used, which keeps the player addressable in degraded mode.
    pub fn playback_url(&self, embed_base: &str) -> String {
        let (season, episode) = match &self.selected {
            Some(ep) => (ep.season_number, ep.episode_number),
            None => (self.current_season, self.current_episode),
        };
        playback::embed_url(embed_base, &self.title_id, season, episode)
    }

    /// Whether the player should visually reload (hard transition).
    ///
    /// Set by episode selection and manual positioning; season browsing
    /// leaves the player untouched.
    pub fn player_needs_reload(&self) -> bool {
        self.player_dirty
    }

    /// Acknowledge that the player finished loading the current address.
    pub fn mark_player_loaded(&mut self) {
        self.player_dirty = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::error::BingeError;
    use crate::types::{ReleaseDate, FALLBACK_PLOT};
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TITLE: &str = "tt0903747";

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn offline_session() -> SeriesSession<FixedClock> {
        // Client is never exercised by the pure state-machine tests.
        let client = ImdbClient::new().unwrap();
        SeriesSession::with_clock(client, TITLE, FixedClock(today()))
    }

    fn episode(season: u32, number: u32, released: bool) -> Episode {
        let release_date = if released {
            ReleaseDate {
                year: 2020,
                month: 1,
                day: number,
            }
        } else {
            ReleaseDate {
                year: 2030,
                month: 1,
                day: number,
            }
        };
        Episode {
            id: format!("s{season}e{number}"),
            title: format!("Episode {number}"),
            season_number: season,
            episode_number: number,
            plot: FALLBACK_PLOT.to_string(),
            poster: None,
            rating: None,
            release_date,
        }
    }

    /// Drive one successful episode fetch through begin/apply.
    fn load(session: &mut SeriesSession<FixedClock>, episodes: Vec<Episode>) {
        let fetch = session.begin_episode_fetch();
        session.apply_episode_fetch(fetch, Ok(episodes));
    }

    #[test]
    fn test_initial_pick_last_releasable() {
        let mut session = offline_session();
        load(
            &mut session,
            vec![
                episode(1, 1, true),
                episode(1, 2, true),
                episode(1, 3, false),
            ],
        );

        let selected = session.selected_episode().expect("auto-selection");
        assert_eq!(selected.episode_number, 2);
        assert_eq!(session.current_episode(), 2);
        assert!(session.episodes_state().is_loaded());
    }

    #[test]
    fn test_initial_pick_skipped_when_nothing_releasable() {
        let mut session = offline_session();
        load(
            &mut session,
            vec![episode(1, 1, false), episode(1, 2, false)],
        );

        assert!(session.selected_episode().is_none());
        // Player stays addressable through the raw counters.
        assert_eq!(
            session.playback_url("https://embed.example"),
            "https://embed.example/embed/tv?imdb=tt0903747&season=1&episode=1"
        );
    }

    #[test]
    fn test_initial_pick_runs_only_once() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, true), episode(1, 2, true)]);
        assert_eq!(session.selected_episode().unwrap().episode_number, 2);

        // Season switch brings a fresh successful fetch; the selection must
        // not move automatically.
        let fetch = session.begin_season_change(2).unwrap();
        session.apply_episode_fetch(
            fetch,
            Ok(vec![episode(2, 1, true), episode(2, 2, true)]),
        );

        let selected = session.selected_episode().unwrap();
        assert_eq!(selected.season_number, 1);
        assert_eq!(selected.episode_number, 2);
    }

    #[test]
    fn test_initial_pick_waits_for_first_success() {
        let mut session = offline_session();

        let fetch = session.begin_episode_fetch();
        session.apply_episode_fetch(
            fetch,
            Err(BingeError::Api {
                status: 500,
                message: "boom".to_string(),
            }),
        );
        assert!(session.episodes_state().is_failed());
        assert!(session.selected_episode().is_none());

        // First success after a failure still performs the initial pick.
        let fetch = session.begin_season_change(2).unwrap();
        session.apply_episode_fetch(fetch, Ok(vec![episode(2, 1, true)]));
        assert_eq!(session.selected_episode().unwrap().season_number, 2);
    }

    #[test]
    fn test_selecting_unreleased_episode_is_noop() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, true), episode(1, 2, false)]);
        session.mark_player_loaded();

        let before = session.selected_episode().cloned();
        assert!(!session.select_episode("s1e2"));
        assert_eq!(session.selected_episode().cloned(), before);
        assert_eq!(session.current_episode(), 1);
        assert!(!session.player_needs_reload());
    }

    #[test]
    fn test_selecting_released_episode_updates_counters_and_player() {
        let mut session = offline_session();
        load(
            &mut session,
            vec![
                episode(1, 1, true),
                episode(1, 2, true),
                episode(1, 3, true),
            ],
        );
        session.mark_player_loaded();

        assert!(session.select_episode("s1e1"));
        assert_eq!(session.current_episode(), 1);
        assert_eq!(session.current_season(), 1);
        assert!(session.player_needs_reload());
    }

    #[test]
    fn test_prev_next_navigation_and_boundaries() {
        let mut session = offline_session();
        load(
            &mut session,
            vec![
                episode(1, 1, true),
                episode(1, 2, true),
                episode(1, 3, true),
            ],
        );

        // Auto-selected the last one; can't go further forward.
        assert!(session.has_previous());
        assert!(!session.has_next());
        assert!(!session.select_next());
        assert_eq!(session.selected_episode().unwrap().episode_number, 3);

        assert!(session.select_previous());
        assert!(session.select_previous());
        assert_eq!(session.selected_episode().unwrap().episode_number, 1);

        // At the list start now.
        assert!(!session.has_previous());
        assert!(!session.select_previous());
        assert_eq!(session.selected_episode().unwrap().episode_number, 1);
    }

    #[test]
    fn test_navigation_disabled_without_selection() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, false)]);

        assert!(!session.has_previous());
        assert!(!session.has_next());
        assert!(!session.select_next());
        assert!(!session.select_previous());
    }

    #[test]
    fn test_navigation_disabled_after_browsing_other_season() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, true), episode(1, 2, true)]);

        let fetch = session.begin_season_change(2).unwrap();
        session.apply_episode_fetch(fetch, Ok(vec![episode(2, 1, true)]));

        // Selection still points at season 1, which is no longer loaded.
        assert_eq!(session.selected_episode().unwrap().season_number, 1);
        assert!(!session.has_previous());
        assert!(!session.has_next());
    }

    #[test]
    fn test_rapid_season_changes_newest_wins() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, true)]);

        let fetch2 = session.begin_season_change(2).unwrap();
        let fetch3 = session.begin_season_change(3).unwrap();

        // Out-of-order arrival: season 3 lands first, then the stale 2.
        session.apply_episode_fetch(fetch3, Ok(vec![episode(3, 1, true)]));
        session.apply_episode_fetch(fetch2, Ok(vec![episode(2, 1, true)]));

        assert_eq!(session.current_season(), 3);
        assert!(session.episodes().iter().all(|ep| ep.season_number == 3));
        assert!(session.episodes_state().is_loaded());
    }

    #[test]
    fn test_stale_failure_does_not_clobber_newer_result() {
        let mut session = offline_session();

        let fetch2 = session.begin_season_change(2).unwrap();
        let fetch3 = session.begin_season_change(3).unwrap();

        session.apply_episode_fetch(fetch3, Ok(vec![episode(3, 1, true)]));
        session.apply_episode_fetch(
            fetch2,
            Err(BingeError::Api {
                status: 500,
                message: "late failure".to_string(),
            }),
        );

        assert!(session.episodes_state().is_loaded());
        assert_eq!(session.episodes().len(), 1);
    }

    #[test]
    fn test_reselecting_current_season_is_noop() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, true)]);

        assert!(session.begin_season_change(1).is_none());
        assert!(session.episodes_state().is_loaded());
    }

    #[test]
    fn test_empty_episode_list_flags_error() {
        let mut session = offline_session();
        load(&mut session, vec![]);

        assert!(session.episodes_state().is_failed());
        assert!(session.is_degraded());
    }

    #[test]
    fn test_manual_position_bypasses_selection() {
        let mut session = offline_session();
        load(&mut session, vec![episode(1, 1, true)]);
        session.mark_player_loaded();

        session.set_manual_position(4, 7);
        assert!(session.selected_episode().is_none());
        assert!(session.player_needs_reload());
        assert_eq!(
            session.playback_url("https://embed.example"),
            "https://embed.example/embed/tv?imdb=tt0903747&season=4&episode=7"
        );
    }

    #[test]
    fn test_season_numbers_sorted_deduplicated() {
        let mut session = offline_session();
        session.seasons = vec![
            Season {
                label: "3".to_string(),
                episode_count: 1,
            },
            Season {
                label: "1".to_string(),
                episode_count: 1,
            },
            Season {
                label: "Unknown".to_string(),
                episode_count: 1,
            },
            Season {
                label: "3".to_string(),
                episode_count: 1,
            },
        ];

        assert_eq!(session.season_numbers(), vec![1, 3]);
    }

    #[test]
    fn test_search_episodes_delegates_to_filter() {
        let mut session = offline_session();
        let mut pilot = episode(1, 1, true);
        pilot.title = "Pilot".to_string();
        let mut calm = episode(1, 2, true);
        calm.title = "The Calm".to_string();
        load(&mut session, vec![pilot, calm]);

        let hits = session.search_episodes("pilot");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Pilot");
    }

    #[test]
    fn test_playback_url_prefers_selection() {
        let mut session = offline_session();
        load(&mut session, vec![episode(2, 5, true)]);
        // Auto-selection picked S02E05; counters say season 1.
        assert_eq!(
            session.playback_url("https://embed.example"),
            "https://embed.example/embed/tv?imdb=tt0903747&season=2&episode=5"
        );
    }

    // ---- end-to-end against a mock server ---------------------------------

    async fn mock_client(server: &MockServer) -> ImdbClient {
        ImdbClient::with_config(crate::client::ClientConfig {
            base_url: server.uri(),
            requests_per_second: 1000.0,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_initialize_happy_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/seasons")))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                // Unsorted on purpose: the first element wins.
                r#"{ "seasons": [ { "season": "2", "episodeCount": 2 }, { "season": "1", "episodeCount": 2 } ] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/episodes")))
            .and(query_param("season", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "episodes": [
                    { "id": "a", "title": "One", "season": "2", "episodeNumber": 1,
                      "releaseDate": { "year": 2020, "month": 1, "day": 1 } },
                    { "id": "b", "title": "Two", "season": "2", "episodeNumber": 2,
                      "releaseDate": { "year": 2030, "month": 1, "day": 1 } }
                ] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let mut session = SeriesSession::with_clock(client, TITLE, FixedClock(today()));
        session.initialize().await;

        assert!(session.seasons_state().is_loaded());
        assert!(session.episodes_state().is_loaded());
        assert_eq!(session.current_season(), 2);
        assert_eq!(session.season_numbers(), vec![1, 2]);
        // "Two" is unreleased, so "One" is the latest releasable.
        assert_eq!(session.selected_episode().unwrap().id, "a");
    }

    #[tokio::test]
    async fn test_unparsable_first_season_defaults_to_one() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/seasons")))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "seasons": [ { "season": "Unknown", "episodeCount": 1 }, { "season": "2", "episodeCount": 1 } ] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let mut session = SeriesSession::with_clock(client, TITLE, FixedClock(today()));
        session.load_seasons().await;

        assert!(session.seasons_state().is_loaded());
        assert_eq!(session.current_season(), 1);
        assert_eq!(session.season_numbers(), vec![2]);
    }

    #[tokio::test]
    async fn test_seasons_failure_degrades_without_episode_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/seasons")))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let mut session = SeriesSession::with_clock(client, TITLE, FixedClock(today()));
        session.initialize().await;

        assert!(session.seasons_state().is_failed());
        // Episode fetch was never issued.
        assert!(matches!(session.episodes_state(), FetchState::Idle));
        assert!(session.is_degraded());
        assert!(session.episodes().is_empty());

        // Episode interaction stays a harmless no-op; playback still works.
        assert!(!session.select_episode("anything"));
        assert!(!session.select_next());
        session.set_manual_position(1, 1);
        assert_eq!(
            session.playback_url("https://embed.example"),
            "https://embed.example/embed/tv?imdb=tt0903747&season=1&episode=1"
        );
    }

    #[tokio::test]
    async fn test_select_season_refetches_episodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/seasons")))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "seasons": [ { "season": "1", "episodeCount": 1 }, { "season": "2", "episodeCount": 1 } ] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/episodes")))
            .and(query_param("season", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "episodes": [ { "id": "a", "title": "One", "season": "1", "episodeNumber": 1,
                    "releaseDate": { "year": 2020, "month": 1, "day": 1 } } ] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("/titles/{TITLE}/episodes")))
            .and(query_param("season", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{ "episodes": [ { "id": "b", "title": "Opener", "season": "2", "episodeNumber": 1,
                    "releaseDate": { "year": 2021, "month": 1, "day": 1 } } ] }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let client = mock_client(&server).await;
        let mut session = SeriesSession::with_clock(client, TITLE, FixedClock(today()));
        session.initialize().await;
        assert_eq!(session.selected_episode().unwrap().id, "a");

        session.select_season(2).await;
        assert_eq!(session.current_season(), 2);
        assert_eq!(session.episodes()[0].id, "b");
        // The whole list was replaced, and the selection did not move.
        assert_eq!(session.episodes().len(), 1);
        assert_eq!(session.selected_episode().unwrap().id, "a");
    }
}

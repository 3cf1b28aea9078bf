//! binge command-line shell
//!
//! Thin text front end over `binge-core`: loads one series, prints the
//! season and episode lists, and emits the embed player URL for the
//! current selection. When metadata fetches fail it falls back to the
//! manual numeric mode, mirroring what a GUI shell would render.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use binge_core::{ClientConfig, ImdbClient, SeriesSession};

#[derive(Parser, Debug)]
#[command(name = "binge", version, about = "Browse a series and derive its player URL")]
struct Args {
    /// IMDb title id of the series, e.g. tt0903747
    title: String,

    /// Switch to this season after loading (defaults to the first season
    /// the API reports)
    #[arg(long)]
    season: Option<u32>,

    /// Select this episode number within the loaded season
    #[arg(long)]
    episode: Option<u32>,

    /// Filter the episode list by a title substring
    #[arg(long)]
    query: Option<String>,

    /// Base domain of the embed player provider
    #[arg(long, env = "BINGE_EMBED_BASE", default_value = "https://vidsrc.xyz")]
    embed_base: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    if let Err(err) = run(args).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let client = ImdbClient::with_config(ClientConfig {
        timeout_secs: args.timeout,
        ..ClientConfig::default()
    })?;
    let mut session = SeriesSession::new(client, &args.title);

    session.initialize().await;
    if let Some(season) = args.season {
        session.select_season(season).await;
    }

    if session.is_degraded() {
        render_degraded(&mut session, &args);
        return Ok(());
    }

    if let Some(number) = args.episode {
        select_by_number(&mut session, number);
    }

    render(&session, &args);
    Ok(())
}

/// Manual fallback: metadata is unavailable, but the player URL only
/// needs raw numbers.
fn render_degraded(session: &mut SeriesSession, args: &Args) {
    let season = args.season.unwrap_or(1);
    let episode = args.episode.unwrap_or(1);
    session.set_manual_position(season, episode);

    println!("Could not load series metadata; manual selection mode.");
    println!("Playing S{season:02}E{episode:02}:");
    println!("  {}", session.playback_url(&args.embed_base));
}

fn select_by_number(session: &mut SeriesSession, number: u32) {
    let id = session
        .episodes()
        .iter()
        .find(|ep| ep.episode_number == number)
        .map(|ep| ep.id.clone());

    match id {
        Some(id) => {
            if !session.select_episode(&id) {
                println!(
                    "Episode {number} of season {} is not released yet.",
                    session.current_season()
                );
            }
        }
        None => println!(
            "No episode {number} in season {}.",
            session.current_season()
        ),
    }
}

fn render(session: &SeriesSession, args: &Args) {
    let seasons = session
        .season_numbers()
        .iter()
        .map(|n| {
            if *n == session.current_season() {
                format!("[S{n}]")
            } else {
                format!("S{n}")
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    println!("Seasons: {seasons}");

    let query = args.query.as_deref().unwrap_or("");
    let episodes = session.search_episodes(query);
    if episodes.is_empty() {
        println!("\nNo episodes match your search.");
    } else {
        println!("\nSeason {}:", session.current_season());
        for ep in episodes {
            let marker = if session.is_released(ep) { ' ' } else { '*' };
            let rating = ep
                .rating
                .map(|r| format!("{:.1} ({})", r.aggregate, r.votes))
                .unwrap_or_else(|| "—".to_string());
            println!(
                "  {}{} {} [{}] {}",
                marker,
                ep.code(),
                ep.title,
                rating,
                ep.release_date.format_long()
            );
        }
        println!("  (* not yet released)");
    }

    if let Some(ep) = session.selected_episode() {
        println!("\nNow playing: {} {}", ep.code(), ep.title);
        println!("  {}", ep.plot);
        let prev = if session.has_previous() { "prev" } else { "-" };
        let next = if session.has_next() { "next" } else { "-" };
        println!("  navigation: {prev} | {next}");
    }

    println!("\nPlayer URL:");
    println!("  {}", session.playback_url(&args.embed_base));
}

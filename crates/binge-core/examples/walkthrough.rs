use binge_core::{ImdbClient, SeriesSession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = ImdbClient::new()?;
    let mut session = SeriesSession::new(client, "tt0903747");

    println!("Loading tt0903747 (Breaking Bad)...\n");
    session.initialize().await;

    if session.is_degraded() {
        session.set_manual_position(1, 1);
        println!("Metadata unavailable, manual mode:");
        println!("  {}", session.playback_url("https://vidsrc.example"));
        return Ok(());
    }

    let numbers = session.season_numbers();
    println!(
        "Seasons: {}",
        numbers
            .iter()
            .map(|n| format!("S{n}"))
            .collect::<Vec<_>>()
            .join(" ")
    );

    println!("\nSeason {}:", session.current_season());
    for ep in session.episodes() {
        let marker = if session.is_released(ep) { " " } else { "*" };
        let rating = ep
            .rating
            .map(|r| format!("{:.1}", r.aggregate))
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

    if let Some(ep) = session.selected_episode() {
        println!("\nNow playing: {} {}", ep.code(), ep.title);
        println!("  {}", ep.plot);
    }
    println!("\n{}", session.playback_url("https://vidsrc.example"));

    Ok(())
}

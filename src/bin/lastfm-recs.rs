use clap::{Parser, Subcommand};
use lastfm_recs::{LastFmCatalog, LastFmCatalogClient, Recommender};

/// Last.fm track recommendation generator
#[derive(Parser)]
#[command(
    name = "lastfm-recs",
    about = "Last.fm track recommendation generator",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate track recommendations seeded by an artist
    Recommend {
        /// Artist name to seed the recommendations with
        artist: String,

        /// Random seed for reproducible seed-track sampling
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Search for artists by name
    SearchArtist {
        /// Artist name to search for
        name: String,
    },
    /// Search for tracks by name
    SearchTrack {
        /// Track name to search for
        name: String,

        /// Narrow the search to one artist
        #[arg(long)]
        artist: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Cli::parse();

    let api_key = match std::env::var("LASTFM_API_KEY") {
        Ok(key) => key,
        Err(_) => {
            eprintln!("Error: no API key configured");
            eprintln!();
            eprintln!("Please set the following environment variable:");
            eprintln!("  LASTFM_API_KEY=your_lastfm_api_key");
            eprintln!();
            eprintln!("You can create an API key at https://www.last.fm/api/account/create");
            std::process::exit(1);
        }
    };

    let http_client = http_client::native::NativeClient::new();
    let catalog = LastFmCatalogClient::new(Box::new(http_client), api_key);

    match args.command {
        Commands::Recommend { artist, seed } => {
            let mut recommender = match seed {
                Some(seed) => Recommender::with_seed(catalog, seed),
                None => Recommender::new(catalog),
            };

            let result = recommender.recommend(&artist).await;
            println!("{}", result.message);
            if !result.seed_artist.is_empty() {
                println!("Seed artist: {}", result.seed_artist);
                println!("Compared against: {}", result.similar_artists.join(", "));
                println!("Candidates considered: {}", result.total_candidates);
                println!();
            }
            for (i, rec) in result.recommendations.iter().enumerate() {
                println!(
                    "{:2}. {} by {} (seen {}x, match {:.3}, {} plays)",
                    i + 1,
                    rec.name,
                    rec.artist_name,
                    rec.count_instance,
                    rec.avg_match,
                    rec.popularity
                );
            }
        }
        Commands::SearchArtist { name } => {
            let artists = catalog.search_artist(&name).await?;
            if artists.is_empty() {
                println!("No artists found for '{name}'");
            }
            for artist in artists {
                println!("{} ({} listeners)", artist.name, artist.listeners);
            }
        }
        Commands::SearchTrack { name, artist } => {
            let tracks = catalog.search_track(&name, artist.as_deref()).await?;
            if tracks.is_empty() {
                println!("No tracks found for '{name}'");
            }
            for track in tracks {
                println!(
                    "{} by {} ({} listeners)",
                    track.name, track.artist, track.listeners
                );
            }
        }
    }

    Ok(())
}

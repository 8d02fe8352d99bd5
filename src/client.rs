use crate::parsing::{
    dedup_track_matches, parse_artist_search_response, parse_similar_artists_response,
    parse_similar_tracks_response, parse_top_tracks_response, parse_track_search_response,
};
use crate::ranking::{sort_by_listeners, sort_by_playcount};
use crate::types::{Artist, ArtistHandle, SimilarArtist, SimilarTrack, TopTrack, TrackHandle, TrackMatch};
use crate::{LastFmCatalog, LastFmError, Result};
use async_trait::async_trait;
use http_client::{HttpClient, Request};
use http_types::{Method, Url};
use std::time::Duration;

/// Per-call deadline for the similarity endpoints.
const CATALOG_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream result limit for searches and similar-artist queries.
const SEARCH_LIMIT: u32 = 100;

/// Upstream result limit for similar-track queries; a recommendation request
/// issues up to five of these.
const SIMILAR_TRACK_LIMIT: u32 = 25;

/// Catalog client backed by the Last.fm web-service API.
///
/// # Examples
///
/// ```rust,no_run
/// use lastfm_recs::{LastFmCatalog, LastFmCatalogClient, Result};
///
/// #[tokio::main]
/// async fn main() -> Result<()> {
///     // Create client with any HTTP implementation
///     let http_client = http_client::native::NativeClient::new();
///     let catalog = LastFmCatalogClient::new(Box::new(http_client), "api-key".to_string());
///
///     let artists = catalog.search_artist("Nirvana").await?;
///     for artist in artists {
///         println!("{} ({} listeners)", artist.name, artist.listeners);
///     }
///
///     Ok(())
/// }
/// ```
pub struct LastFmCatalogClient {
    client: Box<dyn HttpClient>,
    api_key: String,
    base_url: String,
}

impl LastFmCatalogClient {
    /// Create a new [`LastFmCatalogClient`] with the default Last.fm
    /// web-service URL.
    ///
    /// # Arguments
    ///
    /// * `client` - Any HTTP client implementation that implements [`HttpClient`]
    /// * `api_key` - A Last.fm API key
    pub fn new(client: Box<dyn HttpClient>, api_key: String) -> Self {
        Self::with_base_url(client, api_key, "https://ws.audioscrobbler.com".to_string())
    }

    /// Create a new [`LastFmCatalogClient`] with a custom base URL.
    ///
    /// This is useful for testing or if Last.fm changes their domain.
    pub fn with_base_url(client: Box<dyn HttpClient>, api_key: String, base_url: String) -> Self {
        LastFmCatalogClient {
            client,
            api_key,
            base_url,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/2.0/?method={}&api_key={}&format=json",
            self.base_url,
            method,
            urlencoding::encode(&self.api_key)
        )
    }

    async fn get_body(&self, url: &str) -> Result<String> {
        log::debug!("GET {url}");

        let parsed = url
            .parse::<Url>()
            .map_err(|e| LastFmError::Http(e.to_string()))?;
        let request = Request::new(Method::Get, parsed);

        let mut response = self
            .client
            .send(request)
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))?;

        response
            .body_string()
            .await
            .map_err(|e| LastFmError::Http(e.to_string()))
    }

    /// Like [`get_body`](Self::get_body) but bounded by [`CATALOG_TIMEOUT`].
    async fn get_body_bounded(&self, url: &str) -> Result<String> {
        match tokio::time::timeout(CATALOG_TIMEOUT, self.get_body(url)).await {
            Ok(result) => result,
            Err(_) => Err(LastFmError::Http(format!(
                "request timed out after {}s",
                CATALOG_TIMEOUT.as_secs()
            ))),
        }
    }

    /// Search for tracks by name, optionally narrowed to one artist.
    ///
    /// Duplicate (name, artist) pairs are dropped case-insensitively, keeping
    /// the first instance, and the survivors are ranked by listener count.
    pub async fn search_track(
        &self,
        name: &str,
        artist: Option<&str>,
    ) -> Result<Vec<TrackMatch>> {
        let mut url = format!(
            "{}&track={}&limit={}",
            self.method_url("track.search"),
            urlencoding::encode(name),
            SEARCH_LIMIT
        );
        if let Some(artist) = artist {
            url.push_str(&format!("&artist={}", urlencoding::encode(artist)));
        }

        let body = self.get_body(&url).await?;
        let mut tracks = dedup_track_matches(parse_track_search_response(&body)?);
        sort_by_listeners(&mut tracks);
        Ok(tracks)
    }
}

#[async_trait(?Send)]
impl LastFmCatalog for LastFmCatalogClient {
    async fn search_artist(&self, name: &str) -> Result<Vec<Artist>> {
        let url = format!(
            "{}&artist={}&limit={}",
            self.method_url("artist.search"),
            urlencoding::encode(name),
            SEARCH_LIMIT
        );

        let body = self.get_body(&url).await?;
        let mut artists = parse_artist_search_response(&body)?;
        sort_by_listeners(&mut artists);
        Ok(artists)
    }

    async fn top_tracks(&self, handle: ArtistHandle) -> Result<Vec<TopTrack>> {
        let (key, value) = handle.query_param();
        let url = format!(
            "{}&{}={}&limit={}",
            self.method_url("artist.gettoptracks"),
            key,
            urlencoding::encode(value),
            SEARCH_LIMIT
        );

        let body = self.get_body(&url).await?;
        let mut tracks = parse_top_tracks_response(&body)?;
        sort_by_playcount(&mut tracks);
        Ok(tracks)
    }

    async fn similar_artists(&self, handle: ArtistHandle) -> Vec<SimilarArtist> {
        let (key, value) = handle.query_param();
        let url = format!(
            "{}&{}={}&limit={}",
            self.method_url("artist.getsimilar"),
            key,
            urlencoding::encode(value),
            SEARCH_LIMIT
        );

        let outcome = self
            .get_body_bounded(&url)
            .await
            .and_then(|body| parse_similar_artists_response(&body));
        match outcome {
            Ok(artists) => artists,
            Err(e) => {
                log::warn!("artist.getsimilar failed, treating as no matches: {e}");
                Vec::new()
            }
        }
    }

    async fn similar_tracks(&self, handle: Option<TrackHandle>) -> Vec<SimilarTrack> {
        // No usable identifier means no upstream call at all.
        let Some(handle) = handle else {
            return Vec::new();
        };

        let mut url = format!(
            "{}&limit={}",
            self.method_url("track.getsimilar"),
            SIMILAR_TRACK_LIMIT
        );
        match &handle {
            TrackHandle::Mbid(mbid) => {
                url.push_str(&format!("&mbid={}", urlencoding::encode(mbid)));
            }
            TrackHandle::NameAndArtist { track, artist } => {
                url.push_str(&format!(
                    "&track={}&artist={}",
                    urlencoding::encode(track),
                    urlencoding::encode(artist)
                ));
            }
        }

        let outcome = self
            .get_body_bounded(&url)
            .await
            .and_then(|body| parse_similar_tracks_response(&body));
        match outcome {
            Ok(tracks) => tracks,
            Err(e) => {
                log::warn!("track.getsimilar failed, treating as no matches: {e}");
                Vec::new()
            }
        }
    }
}

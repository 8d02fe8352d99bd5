use crate::types::{Artist, ArtistHandle, SimilarArtist, SimilarTrack, TopTrack, TrackHandle};
use crate::Result;
use async_trait::async_trait;

/// Trait for the catalog queries the recommendation engine depends on.
///
/// This trait abstracts the Last.fm lookups needed for the similarity fan-out
/// so the engine can be driven by a scripted or mocked catalog in tests. It is
/// the sole seam between the engine and the network.
///
/// The two similarity operations return plain `Vec`s: the catalog owns the
/// fallback-on-error policy for them, converting timeouts, connection errors
/// and malformed payloads into an empty result so "no similar entries" and
/// "error contacting the catalog" are indistinguishable to the engine. The
/// search and top-tracks operations return `Result`s, and the engine treats an
/// error the same as an empty list.
///
/// # Mocking Support
///
/// When the `mock` feature is enabled, this crate provides `MockLastFmCatalog`
/// that implements this trait using the `mockall` library.
#[cfg_attr(feature = "mock", mockall::automock)]
#[async_trait(?Send)]
pub trait LastFmCatalog {
    /// Search for artists by name, ranked by listener count descending.
    async fn search_artist(&self, name: &str) -> Result<Vec<Artist>>;

    /// Fetch an artist's top tracks, ranked by play count descending.
    async fn top_tracks(&self, handle: ArtistHandle) -> Result<Vec<TopTrack>>;

    /// Fetch artists similar to the given one, filtered to match scores in
    /// `[0.3, 1.0)`, in upstream similarity order.
    ///
    /// Any failure yields an empty list.
    async fn similar_artists(&self, handle: ArtistHandle) -> Vec<SimilarArtist>;

    /// Fetch tracks similar to the given one, filtered to match scores of at
    /// least 0.2 and capped at 25 entries upstream.
    ///
    /// A `None` handle yields an empty list without contacting the catalog;
    /// any failure also yields an empty list.
    async fn similar_tracks(&self, handle: Option<TrackHandle>) -> Vec<SimilarTrack>;
}

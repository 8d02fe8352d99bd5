//! Data types for Last.fm music metadata and recommendations.
//!
//! This module contains the core data structures used throughout the crate:
//! the flat records produced by the catalog client, the lookup handles that
//! encode mbid-versus-name priority, and the aggregated recommendation output.
//!
//! All records are transient values produced and consumed within a single
//! recommendation request; nothing here is persisted.

use serde::{Deserialize, Serialize};

// ================================================================================================
// CATALOG RECORDS
// ================================================================================================

/// An artist as returned by `artist.search`.
///
/// # Examples
///
/// ```rust
/// use lastfm_recs::Artist;
///
/// let artist = Artist {
///     name: "Radiohead".to_string(),
///     listeners: "5074696".to_string(),
///     mbid: "a74b1b7f-71a5-4011-9441-d0b5e4122711".to_string(),
/// };
///
/// println!("{} ({} listeners)", artist.name, artist.listeners);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    /// The artist name
    pub name: String,
    /// Listener count as served by Last.fm.
    ///
    /// Last.fm serves counts as strings and occasionally serves non-numeric
    /// placeholders; ranking treats anything non-numeric as zero.
    pub listeners: String,
    /// MusicBrainz identifier; empty when Last.fm has no canonical id
    pub mbid: String,
}

/// A track as returned by `track.search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMatch {
    /// The track name/title
    pub name: String,
    /// The artist name (a plain string in search results)
    pub artist: String,
    /// Listener count as served by Last.fm
    pub listeners: String,
    /// MusicBrainz identifier; may be empty
    pub mbid: String,
}

/// A track from an artist's `artist.gettoptracks` listing.
///
/// Top tracks are the seeds of the similarity fan-out: the engine collects
/// them for the seed artist and its two closest matches, then expands each
/// surviving seed through `track.getsimilar`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopTrack {
    /// The track name/title
    pub name: String,
    /// Play count as served by Last.fm (string-typed, non-numeric means zero)
    pub playcount: String,
    /// MusicBrainz identifier for the track; may be empty
    pub mbid: String,
    /// The artist name
    pub artist_name: String,
    /// MusicBrainz identifier for the artist; may be empty
    pub artist_mbid: String,
}

/// An artist from `artist.getsimilar`, filtered to match scores in `[0.3, 1.0)`.
///
/// A score of exactly 1.0 is a self-match artifact and is excluded during
/// parsing, as are scores below 0.3.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarArtist {
    /// The artist name
    pub name: String,
    /// Similarity confidence in `[0.3, 1.0)` after filtering
    pub match_score: f64,
    /// MusicBrainz identifier; may be empty
    pub mbid: String,
}

/// A track from `track.getsimilar`, filtered to match scores of at least 0.2.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTrack {
    /// The track name/title
    pub name: String,
    /// The artist name
    pub artist_name: String,
    /// MusicBrainz identifier for the artist; may be empty
    pub artist_mbid: String,
    /// MusicBrainz identifier for the track; may be empty
    pub mbid: String,
    /// Similarity confidence, at least 0.2 after filtering
    pub match_score: f64,
    /// Play count, zero when Last.fm served a non-numeric value
    pub playcount: u64,
    /// Listener count; unreliable for this endpoint, kept for completeness
    pub listeners: u64,
    /// Popularity metric for ranking; equals `playcount` since listener
    /// counts are unreliable on the similarity endpoint
    pub popularity: u64,
}

// ================================================================================================
// LOOKUP HANDLES
// ================================================================================================

/// How to address an artist in a catalog query.
///
/// Last.fm accepts either a MusicBrainz id or a free-text name, and the mbid
/// is the more precise of the two. [`ArtistHandle::from_parts`] encodes the
/// priority in one place: mbid when present, name as the fallback, `None`
/// when neither is usable.
///
/// # Examples
///
/// ```rust
/// use lastfm_recs::ArtistHandle;
///
/// assert_eq!(
///     ArtistHandle::from_parts("abc-123", "Nirvana"),
///     Some(ArtistHandle::Mbid("abc-123".to_string()))
/// );
/// assert_eq!(
///     ArtistHandle::from_parts("", "Nirvana"),
///     Some(ArtistHandle::Name("Nirvana".to_string()))
/// );
/// assert_eq!(ArtistHandle::from_parts("", "  "), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtistHandle {
    /// Address the artist by MusicBrainz id
    Mbid(String),
    /// Address the artist by name
    Name(String),
}

impl ArtistHandle {
    /// Build a handle from an optional mbid and name, preferring the mbid.
    pub fn from_parts(mbid: &str, name: &str) -> Option<Self> {
        if !mbid.trim().is_empty() {
            Some(ArtistHandle::Mbid(mbid.to_string()))
        } else if !name.trim().is_empty() {
            Some(ArtistHandle::Name(name.to_string()))
        } else {
            None
        }
    }

    /// The query parameter this handle contributes to a catalog URL.
    pub fn query_param(&self) -> (&'static str, &str) {
        match self {
            ArtistHandle::Mbid(mbid) => ("mbid", mbid),
            ArtistHandle::Name(name) => ("artist", name),
        }
    }
}

/// How to address a track in a catalog query.
///
/// Prefers the track mbid; falls back to the (track name, artist name) pair
/// when both are present. Seed tracks that have neither produce no handle and
/// are skipped by the engine without an upstream call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackHandle {
    /// Address the track by MusicBrainz id
    Mbid(String),
    /// Address the track by its name together with its artist's name
    NameAndArtist {
        /// The track name
        track: String,
        /// The artist name
        artist: String,
    },
}

impl TrackHandle {
    /// Build a handle from an optional mbid and a (name, artist) pair,
    /// preferring the mbid.
    pub fn from_parts(mbid: &str, track: &str, artist: &str) -> Option<Self> {
        if !mbid.trim().is_empty() {
            Some(TrackHandle::Mbid(mbid.to_string()))
        } else if !track.trim().is_empty() && !artist.trim().is_empty() {
            Some(TrackHandle::NameAndArtist {
                track: track.to_string(),
                artist: artist.to_string(),
            })
        } else {
            None
        }
    }
}

// ================================================================================================
// RECOMMENDATION OUTPUT
// ================================================================================================

/// One ranked recommendation, aggregated from similar-track candidates.
///
/// Candidates are grouped by exact track name (case-sensitive); each group
/// becomes one `Recommendation` carrying how many similarity edges mentioned
/// the track and the average strength of those edges.
///
/// # Examples
///
/// ```rust
/// use lastfm_recs::Recommendation;
///
/// let rec = Recommendation {
///     name: "Heart-Shaped Box".to_string(),
///     artist_name: "Nirvana".to_string(),
///     artist_mbid: String::new(),
///     mbid: String::new(),
///     count_instance: 3,
///     avg_match: 0.7,
///     popularity: 1_905_098,
/// };
///
/// println!("{} by {} (seen {} times)", rec.name, rec.artist_name, rec.count_instance);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// The track name (the aggregation key)
    pub name: String,
    /// Artist name from the first-seen candidate with this track name
    pub artist_name: String,
    /// Artist mbid from the first-seen candidate; may be empty
    pub artist_mbid: String,
    /// Track mbid from the first-seen candidate; may be empty
    pub mbid: String,
    /// Number of similarity edges that mentioned this track
    pub count_instance: u32,
    /// Mean match score across those edges, rounded to 3 decimal places
    pub avg_match: f64,
    /// Highest popularity value seen across the group
    pub popularity: u64,
}

/// The result of one [`recommend`](crate::Recommender::recommend) call.
///
/// There is exactly one success shape and one no-results shape, differentiated
/// only by the `message` field and an empty `recommendations` list. Callers
/// check the list length or the message rather than matching on an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    /// Ranked recommendations, at most 10
    pub recommendations: Vec<Recommendation>,
    /// The resolved seed artist name; empty on a no-results outcome
    pub seed_artist: String,
    /// The two comparable artist names; empty on a no-results outcome
    pub similar_artists: Vec<String>,
    /// Candidate count before truncation to the top 10
    pub total_candidates: usize,
    /// Human-readable outcome description
    pub message: String,
}

impl RecommendationResult {
    /// A terminal no-results outcome carrying only an explanatory message.
    pub fn empty(message: impl Into<String>) -> Self {
        RecommendationResult {
            recommendations: Vec::new(),
            seed_artist: String::new(),
            similar_artists: Vec::new(),
            total_candidates: 0,
            message: message.into(),
        }
    }
}

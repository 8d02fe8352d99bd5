//! JSON parsing for Last.fm web-service responses.
//!
//! Each catalog endpoint gets a pair of serde structs mirroring the nested
//! payload shape plus a `parse_*_response` function that flattens it into the
//! crate's record types. Match-score filtering happens here, at ingestion, so
//! every caller sees already-filtered records.
//!
//! Last.fm serves numeric fields inconsistently: counts are usually strings
//! (`"1905098"`), match scores are strings on some endpoints and numbers on
//! others, and placeholder values like `"N/A"` show up in the wild. The
//! `parse_count` / `count_from_value` / `score_from_value` helpers apply one
//! uniform rule: anything non-numeric is zero.

use crate::types::{Artist, SimilarArtist, SimilarTrack, TopTrack, TrackMatch};
use crate::{LastFmError, Result};
use serde::Deserialize;
use serde_json::Value;

/// Similar artists below this match score are discarded.
pub(crate) const MIN_ARTIST_MATCH: f64 = 0.3;
/// Similar tracks below this match score are discarded.
pub(crate) const MIN_TRACK_MATCH: f64 = 0.2;

/// Parse a string-typed count, treating anything non-numeric as zero.
///
/// Mirrors the "digits or nothing" rule: `"1905098"` parses, while `""`,
/// `"N/A"` and `"-3"` are all zero.
pub fn parse_count(raw: &str) -> u64 {
    if !raw.is_empty() && raw.chars().all(|c| c.is_ascii_digit()) {
        raw.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Coerce a count that may arrive as a JSON number or string.
fn count_from_value(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => parse_count(s),
        _ => 0,
    }
}

/// Coerce a match score that may arrive as a JSON number or string.
fn score_from_value(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

// =============================================================================
// artist.search
// =============================================================================

#[derive(Deserialize)]
pub struct ArtistSearchResponse {
    pub results: Option<ArtistSearchResults>,
}

#[derive(Deserialize)]
pub struct ArtistSearchResults {
    pub artistmatches: Option<ArtistMatches>,
}

#[derive(Deserialize)]
pub struct ArtistMatches {
    #[serde(default)]
    pub artist: Vec<ApiArtist>,
}

#[derive(Deserialize)]
pub struct ApiArtist {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub listeners: String,
    #[serde(default)]
    pub mbid: String,
}

/// Flatten an `artist.search` payload.
///
/// A payload without the nested `results.artistmatches` structure is an empty
/// result, not a parse error; Last.fm omits the nesting on empty searches.
pub fn parse_artist_search_response(json: &str) -> Result<Vec<Artist>> {
    let response: ArtistSearchResponse =
        serde_json::from_str(json).map_err(|e| LastFmError::Parse(e.to_string()))?;

    let artists = response
        .results
        .and_then(|r| r.artistmatches)
        .map(|m| m.artist)
        .unwrap_or_default();

    Ok(artists
        .into_iter()
        .map(|a| Artist {
            name: a.name,
            listeners: a.listeners,
            mbid: a.mbid,
        })
        .collect())
}

// =============================================================================
// track.search
// =============================================================================

#[derive(Deserialize)]
pub struct TrackSearchResponse {
    pub results: Option<TrackSearchResults>,
}

#[derive(Deserialize)]
pub struct TrackSearchResults {
    pub trackmatches: Option<TrackMatches>,
}

#[derive(Deserialize)]
pub struct TrackMatches {
    #[serde(default)]
    pub track: Vec<ApiTrackMatch>,
}

#[derive(Deserialize)]
pub struct ApiTrackMatch {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub listeners: String,
    #[serde(default)]
    pub mbid: String,
}

pub fn parse_track_search_response(json: &str) -> Result<Vec<TrackMatch>> {
    let response: TrackSearchResponse =
        serde_json::from_str(json).map_err(|e| LastFmError::Parse(e.to_string()))?;

    let tracks = response
        .results
        .and_then(|r| r.trackmatches)
        .map(|m| m.track)
        .unwrap_or_default();

    Ok(tracks
        .into_iter()
        .map(|t| TrackMatch {
            name: t.name,
            artist: t.artist,
            listeners: t.listeners,
            mbid: t.mbid,
        })
        .collect())
}

/// Drop duplicate (name, artist) pairs, case-insensitively, keeping the first
/// instance of each. Search results repeat popular tracks across releases.
pub fn dedup_track_matches(tracks: Vec<TrackMatch>) -> Vec<TrackMatch> {
    let mut seen = std::collections::HashSet::new();
    tracks
        .into_iter()
        .filter(|t| seen.insert((t.name.to_lowercase(), t.artist.to_lowercase())))
        .collect()
}

// =============================================================================
// artist.gettoptracks
// =============================================================================

#[derive(Deserialize)]
pub struct TopTracksResponse {
    pub toptracks: Option<TopTracksBody>,
}

#[derive(Deserialize)]
pub struct TopTracksBody {
    #[serde(default)]
    pub track: Vec<ApiTopTrack>,
}

#[derive(Deserialize)]
pub struct ApiTopTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub playcount: String,
    #[serde(default)]
    pub mbid: String,
    pub artist: Option<ApiArtistRef>,
}

/// The embedded artist object used by the top-tracks and similar-tracks
/// endpoints.
#[derive(Deserialize)]
pub struct ApiArtistRef {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: String,
}

pub fn parse_top_tracks_response(json: &str) -> Result<Vec<TopTrack>> {
    let response: TopTracksResponse =
        serde_json::from_str(json).map_err(|e| LastFmError::Parse(e.to_string()))?;

    let tracks = response.toptracks.map(|b| b.track).unwrap_or_default();

    Ok(tracks
        .into_iter()
        .map(|t| {
            let (artist_name, artist_mbid) = t
                .artist
                .map(|a| (a.name, a.mbid))
                .unwrap_or_default();
            TopTrack {
                name: t.name,
                playcount: t.playcount,
                mbid: t.mbid,
                artist_name,
                artist_mbid,
            }
        })
        .collect())
}

// =============================================================================
// artist.getsimilar
// =============================================================================

#[derive(Deserialize)]
pub struct SimilarArtistsResponse {
    pub similarartists: Option<SimilarArtistsBody>,
}

#[derive(Deserialize)]
pub struct SimilarArtistsBody {
    #[serde(default)]
    pub artist: Vec<ApiSimilarArtist>,
}

#[derive(Deserialize)]
pub struct ApiSimilarArtist {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "match", default)]
    pub match_score: Value,
    #[serde(default)]
    pub mbid: String,
}

/// Flatten an `artist.getsimilar` payload, keeping match scores in
/// `[MIN_ARTIST_MATCH, 1.0)`.
///
/// A score of exactly 1.0 is Last.fm reporting the artist as similar to
/// itself, so it is excluded along with everything below the floor.
pub fn parse_similar_artists_response(json: &str) -> Result<Vec<SimilarArtist>> {
    let response: SimilarArtistsResponse =
        serde_json::from_str(json).map_err(|e| LastFmError::Parse(e.to_string()))?;

    let artists = response.similarartists.map(|b| b.artist).unwrap_or_default();

    Ok(artists
        .into_iter()
        .filter_map(|a| {
            let match_score = score_from_value(&a.match_score);
            if match_score >= MIN_ARTIST_MATCH && match_score != 1.0 {
                Some(SimilarArtist {
                    name: a.name,
                    match_score,
                    mbid: a.mbid,
                })
            } else {
                None
            }
        })
        .collect())
}

// =============================================================================
// track.getsimilar
// =============================================================================

#[derive(Deserialize)]
pub struct SimilarTracksResponse {
    pub similartracks: Option<SimilarTracksBody>,
}

#[derive(Deserialize)]
pub struct SimilarTracksBody {
    #[serde(default)]
    pub track: Vec<ApiSimilarTrack>,
}

#[derive(Deserialize)]
pub struct ApiSimilarTrack {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mbid: String,
    #[serde(rename = "match", default)]
    pub match_score: Value,
    #[serde(default)]
    pub playcount: Value,
    #[serde(default)]
    pub listeners: Value,
    pub artist: Option<ApiArtistRef>,
}

/// Flatten a `track.getsimilar` payload, keeping match scores of at least
/// `MIN_TRACK_MATCH`.
///
/// Popularity is taken from the play count; the listeners field is unreliable
/// on this endpoint but carried through for completeness.
pub fn parse_similar_tracks_response(json: &str) -> Result<Vec<SimilarTrack>> {
    let response: SimilarTracksResponse =
        serde_json::from_str(json).map_err(|e| LastFmError::Parse(e.to_string()))?;

    let tracks = response.similartracks.map(|b| b.track).unwrap_or_default();

    Ok(tracks
        .into_iter()
        .filter_map(|t| {
            let match_score = score_from_value(&t.match_score);
            if match_score < MIN_TRACK_MATCH {
                return None;
            }
            let playcount = count_from_value(&t.playcount);
            let listeners = count_from_value(&t.listeners);
            let (artist_name, artist_mbid) = t
                .artist
                .map(|a| (a.name, a.mbid))
                .unwrap_or_default();
            Some(SimilarTrack {
                name: t.name,
                artist_name,
                artist_mbid,
                mbid: t.mbid,
                match_score,
                playcount,
                listeners,
                popularity: playcount,
            })
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("1905098"), 1905098);
        assert_eq!(parse_count("0"), 0);
        assert_eq!(parse_count(""), 0);
        assert_eq!(parse_count("N/A"), 0);
        assert_eq!(parse_count("-3"), 0);
        assert_eq!(parse_count("12.5"), 0);
    }

    #[test]
    fn test_parse_artist_search() {
        let json = r##"{
            "results": {
                "artistmatches": {
                    "artist": [
                        {"name": "Nirvana", "listeners": "5074696", "mbid": "abc-123"},
                        {"name": "Nirvana UK", "listeners": "12345", "mbid": ""}
                    ]
                }
            }
        }"##;

        let artists = parse_artist_search_response(json).unwrap();
        assert_eq!(artists.len(), 2);
        assert_eq!(artists[0].name, "Nirvana");
        assert_eq!(artists[0].listeners, "5074696");
        assert_eq!(artists[0].mbid, "abc-123");
        assert_eq!(artists[1].mbid, "");
    }

    #[test]
    fn test_parse_artist_search_missing_structure() {
        let artists = parse_artist_search_response(r#"{"results": {}}"#).unwrap();
        assert!(artists.is_empty());

        let artists = parse_artist_search_response(r#"{}"#).unwrap();
        assert!(artists.is_empty());
    }

    #[test]
    fn test_parse_artist_search_malformed_json() {
        let err = parse_artist_search_response("not json").unwrap_err();
        assert!(matches!(err, LastFmError::Parse(_)));
    }

    #[test]
    fn test_parse_track_search_and_dedup() {
        let json = r##"{
            "results": {
                "trackmatches": {
                    "track": [
                        {"name": "Come As You Are", "artist": "Nirvana", "listeners": "900", "mbid": "t-1"},
                        {"name": "come as you are", "artist": "NIRVANA", "listeners": "800", "mbid": "t-2"},
                        {"name": "Come As You Are", "artist": "Midge Ure", "listeners": "100", "mbid": ""}
                    ]
                }
            }
        }"##;

        let tracks = dedup_track_matches(parse_track_search_response(json).unwrap());
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].mbid, "t-1");
        assert_eq!(tracks[1].artist, "Midge Ure");
    }

    #[test]
    fn test_parse_top_tracks() {
        let json = r##"{
            "toptracks": {
                "track": [
                    {
                        "name": "Smells Like Teen Spirit",
                        "playcount": "1905098",
                        "mbid": "track-mbid",
                        "artist": {"name": "Nirvana", "mbid": "artist-mbid"}
                    },
                    {
                        "name": "Obscure B-Side",
                        "playcount": "N/A",
                        "mbid": ""
                    }
                ]
            }
        }"##;

        let tracks = parse_top_tracks_response(json).unwrap();
        assert_eq!(tracks.len(), 2);
        assert_eq!(tracks[0].name, "Smells Like Teen Spirit");
        assert_eq!(tracks[0].playcount, "1905098");
        assert_eq!(tracks[0].artist_name, "Nirvana");
        assert_eq!(tracks[0].artist_mbid, "artist-mbid");
        assert_eq!(tracks[1].artist_name, "");
        assert_eq!(tracks[1].playcount, "N/A");
    }

    #[test]
    fn test_similar_artist_match_filter() {
        let json = r##"{
            "similarartists": {
                "artist": [
                    {"name": "Self", "match": "1.0", "mbid": ""},
                    {"name": "At The Floor", "match": "0.3", "mbid": ""},
                    {"name": "Below The Floor", "match": "0.29999", "mbid": ""},
                    {"name": "Strong", "match": "0.85", "mbid": "m-1"}
                ]
            }
        }"##;

        let artists = parse_similar_artists_response(json).unwrap();
        let names: Vec<&str> = artists.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["At The Floor", "Strong"]);
        assert!((artists[0].match_score - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_similar_artist_numeric_match() {
        // track.getsimilar serves numbers; artist.getsimilar has been seen
        // doing both, so both shapes must coerce.
        let json = r##"{
            "similarartists": {
                "artist": [
                    {"name": "Numeric", "match": 0.5, "mbid": ""},
                    {"name": "Garbage", "match": "uh oh", "mbid": ""}
                ]
            }
        }"##;

        let artists = parse_similar_artists_response(json).unwrap();
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Numeric");
    }

    #[test]
    fn test_similar_track_match_filter() {
        let json = r##"{
            "similartracks": {
                "track": [
                    {"name": "Kept", "match": 0.2, "playcount": 10, "listeners": 5,
                     "artist": {"name": "A", "mbid": ""}, "mbid": ""},
                    {"name": "Dropped", "match": 0.19, "playcount": 10, "listeners": 5,
                     "artist": {"name": "B", "mbid": ""}, "mbid": ""},
                    {"name": "Perfect", "match": 1.0, "playcount": 3, "listeners": 1,
                     "artist": {"name": "C", "mbid": ""}, "mbid": ""}
                ]
            }
        }"##;

        let tracks = parse_similar_tracks_response(json).unwrap();
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        // No upper exclusion for tracks, unlike similar artists.
        assert_eq!(names, vec!["Kept", "Perfect"]);
    }

    #[test]
    fn test_similar_track_popularity_from_playcount() {
        let json = r##"{
            "similartracks": {
                "track": [
                    {"name": "X", "match": "0.7", "playcount": "1200", "listeners": "N/A",
                     "artist": {"name": "A", "mbid": "am"}, "mbid": "tm"}
                ]
            }
        }"##;

        let tracks = parse_similar_tracks_response(json).unwrap();
        assert_eq!(tracks[0].playcount, 1200);
        assert_eq!(tracks[0].listeners, 0);
        assert_eq!(tracks[0].popularity, 1200);
        assert_eq!(tracks[0].artist_name, "A");
        assert_eq!(tracks[0].artist_mbid, "am");
    }

    #[test]
    fn test_parse_similar_missing_structure() {
        assert!(parse_similar_artists_response(r#"{}"#).unwrap().is_empty());
        assert!(parse_similar_tracks_response(r#"{}"#).unwrap().is_empty());
    }
}

use thiserror::Error;

/// Error types for Last.fm catalog operations.
///
/// The similarity endpoints ([`similar_artists`](crate::LastFmCatalog::similar_artists)
/// and [`similar_tracks`](crate::LastFmCatalog::similar_tracks)) never surface these
/// errors; they convert any failure into an empty result at the client boundary so a
/// single failing branch of the recommendation fan-out cannot abort the whole request.
/// The search and top-tracks operations do return them, and the recommendation engine
/// treats any such error the same as an empty result.
#[derive(Error, Debug)]
pub enum LastFmError {
    /// HTTP/network related errors.
    ///
    /// This includes connection failures, timeouts, DNS errors, and other
    /// low-level networking issues.
    #[error("HTTP error: {0}")]
    Http(String),

    /// Failed to parse a Last.fm web-service response.
    ///
    /// This can happen when Last.fm changes their JSON payloads or returns
    /// an error document instead of the expected result.
    #[error("Failed to parse response: {0}")]
    Parse(String),
}

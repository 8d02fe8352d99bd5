pub mod client;
pub mod error;
pub mod parsing;
pub mod ranking;
pub mod recommend;
pub mod r#trait;
pub mod types;

pub use client::LastFmCatalogClient;
pub use error::LastFmError;
pub use r#trait::LastFmCatalog;
pub use recommend::Recommender;
pub use types::{
    Artist, ArtistHandle, Recommendation, RecommendationResult, SimilarArtist, SimilarTrack,
    TopTrack, TrackHandle, TrackMatch,
};

#[cfg(feature = "mock")]
pub use r#trait::MockLastFmCatalog;

pub type Result<T> = std::result::Result<T, LastFmError>;

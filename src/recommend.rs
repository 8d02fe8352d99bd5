//! The recommendation engine: a five-stage similarity fan-out.
//!
//! Starting from one artist name, the engine resolves the artist, finds its
//! two closest matches, pools the top tracks of all three, expands a bounded
//! random sample of that pool through track similarity, then aggregates and
//! ranks the candidates. Every stage tolerates catalog failure: a failing
//! branch is skipped, and a stage left with nothing to work on produces a
//! terminal no-results outcome instead of an error.

use crate::parsing::parse_count;
use crate::types::{
    ArtistHandle, Recommendation, RecommendationResult, SimilarTrack, TopTrack, TrackHandle,
};
use crate::LastFmCatalog;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::cmp::Ordering;
use std::collections::HashMap;

/// How many comparable artists the fan-out needs alongside the seed.
const SIMILAR_ARTIST_COUNT: usize = 2;

/// Seed-track cap; bounds the number of similar-track calls per request.
const MAX_SEED_TRACKS: usize = 5;

/// Soft candidate ceiling. Once the accumulated candidate count reaches this,
/// no further similarity calls are issued; the final batch may overshoot.
const MAX_CANDIDATES: usize = 100;

/// At most this many recommendations are returned.
const MAX_RECOMMENDATIONS: usize = 10;

/// Fallback mode takes this many top tracks from each comparable artist.
const FALLBACK_TRACKS_PER_ARTIST: usize = 5;

/// Fixed match score assigned to fallback recommendations; fallback tracks
/// carry no similarity edge of their own.
const FALLBACK_AVG_MATCH: f64 = 0.5;

/// Track recommendation engine over any [`LastFmCatalog`].
///
/// Each [`recommend`](Recommender::recommend) call is independent and holds no
/// state beyond the shared random source used to sample seed tracks.
///
/// # Examples
///
/// ```rust,no_run
/// # use lastfm_recs::{LastFmCatalogClient, Recommender};
/// # tokio_test::block_on(async {
/// let http_client = http_client::native::NativeClient::new();
/// let catalog = LastFmCatalogClient::new(Box::new(http_client), "api-key".to_string());
/// let mut recommender = Recommender::new(catalog);
///
/// let result = recommender.recommend("Nirvana").await;
/// println!("{}", result.message);
/// for rec in &result.recommendations {
///     println!("{} by {}", rec.name, rec.artist_name);
/// }
/// # });
/// ```
pub struct Recommender<C> {
    catalog: C,
    rng: StdRng,
}

impl<C: LastFmCatalog> Recommender<C> {
    /// Create an engine with an OS-entropy-seeded random source.
    pub fn new(catalog: C) -> Self {
        Recommender {
            catalog,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create an engine with a fixed random seed.
    ///
    /// Seed-track sampling becomes deterministic, which tests rely on.
    pub fn with_seed(catalog: C, seed: u64) -> Self {
        Recommender {
            catalog,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Produce ranked track recommendations for the given artist name.
    ///
    /// Never fails: catalog errors are absorbed along the way and every
    /// no-results condition comes back as a [`RecommendationResult`] with an
    /// empty recommendation list and an explanatory message.
    pub async fn recommend(&mut self, artist_name: &str) -> RecommendationResult {
        // Stage 1: resolve the seed artist. The search is listener-ranked, so
        // the first result is the strongest match.
        let artists = match self.catalog.search_artist(artist_name).await {
            Ok(artists) => artists,
            Err(e) => {
                log::warn!("artist search for '{artist_name}' failed: {e}");
                Vec::new()
            }
        };
        let Some(seed) = artists.into_iter().next() else {
            return RecommendationResult::empty("No artists found for the given name");
        };
        log::debug!("resolved seed artist '{}' (mbid '{}')", seed.name, seed.mbid);

        // Stage 2: find the two comparable artists, in upstream similarity
        // order. A catalog failure already surfaced as an empty list.
        let similar = match ArtistHandle::from_parts(&seed.mbid, &seed.name) {
            Some(handle) => self.catalog.similar_artists(handle).await,
            None => Vec::new(),
        };
        if similar.len() < SIMILAR_ARTIST_COUNT {
            return RecommendationResult::empty("Not enough similar artists found");
        }
        let comparables: Vec<(String, String)> = similar[..SIMILAR_ARTIST_COUNT]
            .iter()
            .map(|a| (a.mbid.clone(), a.name.clone()))
            .collect();

        let mut seed_artists = vec![(seed.mbid.clone(), seed.name.clone())];
        seed_artists.extend(comparables.iter().cloned());

        // Stage 3: pool the top tracks of all three artists, then sample at
        // most MAX_SEED_TRACKS of them to bound the expensive next stage.
        let mut pool = Vec::new();
        for (mbid, name) in &seed_artists {
            let Some(handle) = ArtistHandle::from_parts(mbid, name) else {
                continue;
            };
            match self.catalog.top_tracks(handle).await {
                Ok(tracks) => pool.extend(tracks),
                Err(e) => {
                    log::debug!("top tracks for '{name}' failed, skipping: {e}");
                }
            }
        }
        if pool.is_empty() {
            return RecommendationResult::empty("No seed tracks found");
        }
        pool.shuffle(&mut self.rng);
        pool.truncate(MAX_SEED_TRACKS);

        // Stage 4: expand each seed track through track similarity, stopping
        // early once the candidate pool is large enough.
        let mut candidates: Vec<SimilarTrack> = Vec::new();
        for track in &pool {
            let handle = TrackHandle::from_parts(&track.mbid, &track.name, &track.artist_name);
            candidates.extend(self.catalog.similar_tracks(handle).await);
            if candidates.len() >= MAX_CANDIDATES {
                break;
            }
        }

        // Stage 5: aggregate, rank and finalize.
        if candidates.is_empty() {
            return self.fallback(&seed.name, &comparables).await;
        }
        let total_candidates = candidates.len();

        let mut recommendations = aggregate(candidates);
        recommendations.truncate(MAX_RECOMMENDATIONS);

        RecommendationResult {
            message: format!("Found {} recommendations", recommendations.len()),
            recommendations,
            seed_artist: seed.name,
            similar_artists: comparables.into_iter().map(|(_, name)| name).collect(),
            total_candidates,
        }
    }

    /// Degraded path for when the similarity fan-out came up empty: recommend
    /// the comparable artists' own top tracks (not the seed's, which the
    /// caller presumably knows already).
    async fn fallback(
        &mut self,
        seed_name: &str,
        comparables: &[(String, String)],
    ) -> RecommendationResult {
        let mut recommendations = Vec::new();
        for (mbid, name) in comparables {
            let Some(handle) = ArtistHandle::from_parts(mbid, name) else {
                continue;
            };
            let tracks = match self.catalog.top_tracks(handle).await {
                Ok(tracks) => tracks,
                Err(e) => {
                    log::debug!("fallback top tracks for '{name}' failed, skipping: {e}");
                    continue;
                }
            };
            recommendations.extend(tracks.into_iter().take(FALLBACK_TRACKS_PER_ARTIST).map(
                |track: TopTrack| Recommendation {
                    popularity: parse_count(&track.playcount),
                    name: track.name,
                    artist_name: track.artist_name,
                    artist_mbid: track.artist_mbid,
                    mbid: track.mbid,
                    count_instance: 1,
                    avg_match: FALLBACK_AVG_MATCH,
                },
            ));
        }

        if recommendations.is_empty() {
            return RecommendationResult::empty("No similar tracks found");
        }

        let total_candidates = recommendations.len();
        recommendations.truncate(MAX_RECOMMENDATIONS);

        RecommendationResult {
            message: format!(
                "Found {} recommendations (fallback mode)",
                recommendations.len()
            ),
            recommendations,
            seed_artist: seed_name.to_string(),
            similar_artists: comparables.iter().map(|(_, name)| name.clone()).collect(),
            total_candidates,
        }
    }
}

/// Group candidates by exact track name and rank the groups.
///
/// The key is the case-sensitive track name: the similarity graph reports the
/// same track through many edges and the mention count is the strongest
/// ranking signal, ahead of average match strength. Artist and mbid fields
/// come from the first-seen candidate of each group and popularity is the
/// group maximum.
fn aggregate(candidates: Vec<SimilarTrack>) -> Vec<Recommendation> {
    struct Group {
        count: u32,
        total_match: f64,
        artist_name: String,
        artist_mbid: String,
        mbid: String,
        popularity: u64,
    }

    // First-seen order is kept so that the stable sort below leaves ties in a
    // deterministic order.
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Group> = HashMap::new();

    for candidate in candidates {
        match groups.get_mut(&candidate.name) {
            Some(group) => {
                group.count += 1;
                group.total_match += candidate.match_score;
                group.popularity = group.popularity.max(candidate.popularity);
            }
            None => {
                order.push(candidate.name.clone());
                groups.insert(
                    candidate.name,
                    Group {
                        count: 1,
                        total_match: candidate.match_score,
                        artist_name: candidate.artist_name,
                        artist_mbid: candidate.artist_mbid,
                        mbid: candidate.mbid,
                        popularity: candidate.popularity,
                    },
                );
            }
        }
    }

    let mut recommendations: Vec<Recommendation> = order
        .into_iter()
        .filter_map(|name| {
            let group = groups.remove(&name)?;
            let avg_match = round3(group.total_match / f64::from(group.count));
            Some(Recommendation {
                name,
                artist_name: group.artist_name,
                artist_mbid: group.artist_mbid,
                mbid: group.mbid,
                count_instance: group.count,
                avg_match,
                popularity: group.popularity,
            })
        })
        .collect();

    // Mention count first, average match second, both descending.
    recommendations.sort_by(|a, b| {
        b.count_instance
            .cmp(&a.count_instance)
            .then_with(|| {
                b.avg_match
                    .partial_cmp(&a.avg_match)
                    .unwrap_or(Ordering::Equal)
            })
    });

    recommendations
}

fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

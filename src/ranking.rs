//! Descending sorts over Last.fm's string-typed count fields.
//!
//! Two policies, both "larger numeric field wins": play count for top-tracks
//! listings and listener count for search results. Counts stay string-typed
//! until comparison and anything non-numeric compares as zero. Both sorts are
//! stable, so equal counts keep their upstream relative order.

use crate::parsing::parse_count;
use crate::types::{Artist, TopTrack, TrackMatch};
use std::cmp::Reverse;

/// Types that carry a Last.fm listener count.
pub trait ListenerCount {
    /// The raw, string-typed listener count.
    fn listeners(&self) -> &str;
}

impl ListenerCount for Artist {
    fn listeners(&self) -> &str {
        &self.listeners
    }
}

impl ListenerCount for TrackMatch {
    fn listeners(&self) -> &str {
        &self.listeners
    }
}

/// Sort tracks by play count, descending.
pub fn sort_by_playcount(tracks: &mut [TopTrack]) {
    tracks.sort_by_key(|t| Reverse(parse_count(&t.playcount)));
}

/// Sort search results by listener count, descending.
pub fn sort_by_listeners<T: ListenerCount>(items: &mut [T]) {
    items.sort_by_key(|i| Reverse(parse_count(i.listeners())));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_track(name: &str, playcount: &str) -> TopTrack {
        TopTrack {
            name: name.to_string(),
            playcount: playcount.to_string(),
            mbid: String::new(),
            artist_name: "Artist".to_string(),
            artist_mbid: String::new(),
        }
    }

    fn artist(name: &str, listeners: &str) -> Artist {
        Artist {
            name: name.to_string(),
            listeners: listeners.to_string(),
            mbid: String::new(),
        }
    }

    #[test]
    fn test_sort_by_playcount_descending() {
        let mut tracks = vec![
            top_track("low", "10"),
            top_track("high", "5000"),
            top_track("mid", "300"),
        ];
        sort_by_playcount(&mut tracks);
        let names: Vec<&str> = tracks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
    }

    #[test]
    fn test_sort_by_playcount_idempotent() {
        let mut tracks = vec![
            top_track("a", "900"),
            top_track("b", "500"),
            top_track("c", "100"),
        ];
        let sorted = tracks.clone();
        sort_by_playcount(&mut tracks);
        assert_eq!(tracks, sorted);
    }

    #[test]
    fn test_non_numeric_playcount_sorts_as_zero() {
        let mut tracks = vec![
            top_track("bogus", "N/A"),
            top_track("real", "42"),
            top_track("also-zero", "0"),
        ];
        sort_by_playcount(&mut tracks);
        assert_eq!(tracks[0].name, "real");
        // Stable sort keeps the two zero-count entries in input order.
        assert_eq!(tracks[1].name, "bogus");
        assert_eq!(tracks[2].name, "also-zero");
    }

    #[test]
    fn test_sort_artists_by_listeners() {
        let mut artists = vec![
            artist("small", "100"),
            artist("big", "5074696"),
            artist("broken", ""),
        ];
        sort_by_listeners(&mut artists);
        assert_eq!(artists[0].name, "big");
        assert_eq!(artists[1].name, "small");
        assert_eq!(artists[2].name, "broken");
    }

    #[test]
    fn test_sort_track_matches_by_listeners() {
        let mut tracks = vec![
            TrackMatch {
                name: "quiet".to_string(),
                artist: "A".to_string(),
                listeners: "7".to_string(),
                mbid: String::new(),
            },
            TrackMatch {
                name: "loud".to_string(),
                artist: "B".to_string(),
                listeners: "900000".to_string(),
                mbid: String::new(),
            },
        ];
        sort_by_listeners(&mut tracks);
        assert_eq!(tracks[0].name, "loud");
    }
}

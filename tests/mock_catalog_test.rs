#[cfg(feature = "mock")]
mod mock_tests {
    use lastfm_recs::{
        Artist, ArtistHandle, LastFmCatalog, MockLastFmCatalog, Result, SimilarArtist,
    };
    use mockall::predicate::*; // for eq(), any(), etc.

    #[tokio::test]
    async fn test_mock_search_artist() -> Result<()> {
        let mut mock_catalog = MockLastFmCatalog::new();

        let expected = vec![Artist {
            name: "Nirvana".to_string(),
            listeners: "5074696".to_string(),
            mbid: "nirvana-mbid".to_string(),
        }];

        // Set up expectations
        mock_catalog
            .expect_search_artist()
            .with(eq("Nirvana"))
            .times(1)
            .returning(move |_| Ok(expected.clone()));

        // Use the mock as a trait object
        let catalog: &dyn LastFmCatalog = &mock_catalog;

        let artists = catalog.search_artist("Nirvana").await?;
        assert_eq!(artists.len(), 1);
        assert_eq!(artists[0].name, "Nirvana");

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_similar_artists() -> Result<()> {
        let mut mock_catalog = MockLastFmCatalog::new();

        mock_catalog
            .expect_similar_artists()
            .with(eq(ArtistHandle::Mbid("nirvana-mbid".to_string())))
            .times(1)
            .returning(|_| {
                vec![SimilarArtist {
                    name: "Soundgarden".to_string(),
                    match_score: 0.4,
                    mbid: String::new(),
                }]
            });

        let catalog: &dyn LastFmCatalog = &mock_catalog;

        let similar = catalog
            .similar_artists(ArtistHandle::Mbid("nirvana-mbid".to_string()))
            .await;
        assert_eq!(similar.len(), 1);
        assert_eq!(similar[0].name, "Soundgarden");

        Ok(())
    }

    #[tokio::test]
    async fn test_mock_similar_tracks_without_handle() -> Result<()> {
        let mut mock_catalog = MockLastFmCatalog::new();

        mock_catalog
            .expect_similar_tracks()
            .with(eq(None))
            .times(1)
            .returning(|_| Vec::new());

        let catalog: &dyn LastFmCatalog = &mock_catalog;

        let similar = catalog.similar_tracks(None).await;
        assert!(similar.is_empty());

        Ok(())
    }
}

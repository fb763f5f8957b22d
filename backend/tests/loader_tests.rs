//! Dataset loading: file parsing, malformed input and timeouts.

mod support;

use std::io::Write;
use std::time::Duration;

use housing_viz::data::{
    load_dataset, load_state, DatasetSource, DatasetState, FileSource, InMemorySource, LoadError,
    DEFAULT_FETCH_TIMEOUT,
};
use housing_viz::models::PropertyType;
use tempfile::NamedTempFile;

fn temp_json(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(content.as_bytes()).expect("write temp file");
    file
}

#[cfg(test)]
mod loader_tests {
    use super::*;

    #[tokio::test]
    async fn test_load_fixture_file() {
        let source = FileSource::new(support::fixture_path("listings.json"));
        let dataset = load_dataset(&source, DEFAULT_FETCH_TIMEOUT)
            .await
            .expect("fixture loads");

        assert_eq!(dataset.len(), 15);
        assert!(dataset.source().ends_with("listings.json"));

        let listings = dataset.listings();
        assert_eq!(listings[1].property_type, PropertyType::Condo);
        assert_eq!(listings[3].price, Some(900_000.0));
        assert_eq!(listings[3].sqft, Some(1100.0));
        assert_eq!(listings[6].property_type, PropertyType::SingleFamily);
        assert_eq!(listings[8].price, None);
        assert_eq!(listings[13].property_type, PropertyType::Townhouse);
    }

    #[tokio::test]
    async fn test_malformed_json_is_parse_error() {
        let file = temp_json("[{\"city\": \"Boston\", ");
        let source = FileSource::new(file.path());
        let err = load_dataset(&source, DEFAULT_FETCH_TIMEOUT)
            .await
            .unwrap_err();

        assert!(matches!(err, LoadError::Parse { .. }));
        assert_eq!(err.context().operation.as_deref(), Some("parse_rows"));
        assert_eq!(
            err.context().source.as_deref(),
            Some(file.path().display().to_string().as_str())
        );
    }

    #[tokio::test]
    async fn test_unknown_property_type_fails_load() {
        let file = temp_json(r#"[{"city": "Salem", "propertyType": "Castle", "price": 1}]"#);
        let state = load_state(&FileSource::new(file.path()), DEFAULT_FETCH_TIMEOUT).await;

        match state {
            DatasetState::Failed { message } => {
                assert!(message.contains("malformed"));
                assert!(message.contains("Castle"));
            }
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_failed_state() {
        let dir = tempfile::tempdir().expect("temp dir");
        let source = FileSource::new(dir.path().join("absent.json"));
        let state = load_state(&source, DEFAULT_FETCH_TIMEOUT).await;
        assert!(state.is_failed());
        assert!(source.describe().ends_with("absent.json"));
    }

    #[tokio::test]
    async fn test_empty_array_is_ready_and_empty() {
        let file = temp_json("[]");
        let state = load_state(&FileSource::new(file.path()), DEFAULT_FETCH_TIMEOUT).await;
        assert!(state.dataset().expect("ready").is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_source_yields_timeout_state() {
        let source =
            InMemorySource::new(support::fixture_listings()).with_delay(Duration::from_secs(30));
        let state = load_state(&source, Duration::from_secs(10)).await;

        match state {
            DatasetState::Failed { message } => assert!(message.contains("too long")),
            other => panic!("expected Failed, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_source_within_timeout_is_ready() {
        let source =
            InMemorySource::new(support::fixture_listings()).with_delay(Duration::from_secs(2));
        let state = load_state(&source, Duration::from_secs(10)).await;
        assert_eq!(state.dataset().map(|d| d.len()), Some(15));
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use typeahead::config::EngineConfig;
    use typeahead::engine::{AutocompleteEngine, WordListOutcome};
    use typeahead::source::SourceKind;
    use typeahead::store::JsonFileStore;

    async fn open_engine(path: &std::path::Path) -> AutocompleteEngine {
        let store = JsonFileStore::open(path).unwrap();
        AutocompleteEngine::open(Arc::new(store), EngineConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typeahead.json");

        // 1. Scan and import against a fresh database
        {
            let mut engine = open_engine(&path).await;
            engine
                .rescan(["The aqueduct carried water across the valley."])
                .await
                .unwrap();
            engine
                .add_or_update_word_list("latin", "aqueduct\naquifer\n")
                .await
                .unwrap();
            assert_eq!(engine.suggest("aqu").len(), 2);
        }

        // 2. A new engine over the same file sees everything
        let engine = open_engine(&path).await;
        let suggestions = engine.suggest("aqu");
        let texts: Vec<&str> = suggestions
            .iter()
            .map(|s| s.display_text.as_str())
            .collect();
        assert!(texts.contains(&"aqueduct"));
        assert!(texts.contains(&"aquifer"));

        // 3. Scanned occurrences and list entries kept their frequencies
        let aqueduct = suggestions
            .iter()
            .find(|s| s.display_text == "aqueduct")
            .unwrap();
        assert_eq!(aqueduct.frequency, Some(1));
    }

    #[tokio::test]
    async fn test_checksum_gate_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typeahead.json");

        {
            let mut engine = open_engine(&path).await;
            let outcome = engine
                .add_or_update_word_list("anatomy", "sternum\nfemur\n")
                .await
                .unwrap();
            assert_eq!(outcome, WordListOutcome::Imported { words: 2 });
        }

        // Same content after a reopen is detected as unchanged
        let mut engine = open_engine(&path).await;
        let outcome = engine
            .add_or_update_word_list("anatomy", "sternum\nfemur\n")
            .await
            .unwrap();
        assert_eq!(outcome, WordListOutcome::Unchanged);

        // Changed content is re-imported
        let outcome = engine
            .add_or_update_word_list("anatomy", "sternum\ntibia\n")
            .await
            .unwrap();
        assert_eq!(outcome, WordListOutcome::Imported { words: 2 });
        assert!(engine.suggest("fem").is_empty(), "stale entries are purged");
        assert_eq!(engine.suggest("tib").len(), 1);
    }

    #[tokio::test]
    async fn test_sources_record_provenance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typeahead.json");

        let mut engine = open_engine(&path).await;
        engine.rescan(["granite bedrock"]).await.unwrap();
        engine
            .add_or_update_word_list("minerals", "granite\nbasalt\n")
            .await
            .unwrap();

        let sources = engine.sources().await.unwrap();
        assert_eq!(sources.len(), 2);
        assert!(sources
            .iter()
            .any(|s| s.kind == SourceKind::Scan && s.name == "scan"));
        assert!(sources
            .iter()
            .any(|s| s.kind == SourceKind::WordList && s.name == "minerals"));

        // The same word from two sources is deduplicated at suggest time
        let granite: Vec<_> = engine
            .suggest("gra")
            .into_iter()
            .filter(|s| s.display_text == "granite")
            .collect();
        assert_eq!(granite.len(), 1);
    }

    #[tokio::test]
    async fn test_removing_a_list_does_not_disturb_scanned_words() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typeahead.json");

        let mut engine = open_engine(&path).await;
        engine.rescan(["granite cliffs"]).await.unwrap();
        engine
            .add_or_update_word_list("minerals", "granite\nbasalt\n")
            .await
            .unwrap();

        assert!(engine.remove_word_list("minerals").await.unwrap());
        assert!(engine.suggest("bas").is_empty());
        assert_eq!(engine.suggest("gra").len(), 1, "scanned granite remains");

        // Removal is idempotent from the caller's point of view
        assert!(!engine.remove_word_list("minerals").await.unwrap());
    }

    #[tokio::test]
    async fn test_corrupt_database_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("typeahead.json");
        fs::write(&path, "{ not json at all").unwrap();

        assert!(JsonFileStore::open(&path).is_err());
    }
}

//! Integration tests for the Signal Extractor

#[cfg(test)]
mod tests {
    use crate::{ChunkError, ExtractorConfig, SignalExtractor};
    use lighthouse_domain::{NoProgress, ProgressReporter, SignalCategory};
    use lighthouse_llm::MockProvider;
    use std::sync::{Arc, Mutex};

    /// 30 characters that split into three 12/2 windows, each with a marker
    /// run no other window contains
    const THREE_CHUNK_TEXT: &str = "AAAAAAAAAABBBBBBBBBBCCCCCCCCCC";

    fn small_windows() -> ExtractorConfig {
        ExtractorConfig {
            chunk_size: 12,
            overlap: 2,
            ..ExtractorConfig::default()
        }
    }

    fn reply(category: &str, speaker: &str, content: &str) -> String {
        format!(
            r#"{{"extracted_signals": [{{"category": "{}", "speaker": "{}", "content": "{}", "priority_signal": "High"}}]}}"#,
            category, speaker, content
        )
    }

    fn scripted_provider() -> MockProvider {
        let mut llm = MockProvider::new(r#"{"extracted_signals": []}"#);
        llm.add_response("AAAAAAAAAA", reply("Explicit_Requirement", "Sarah", "first"));
        llm.add_response("BBBBBBBBBB", reply("Action_Item", "John", "second"));
        llm.add_response("CCCCCCCCCC", reply("Identified_Risk", "Ana", "third"));
        llm
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<(usize, usize, String)>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn report(&self, completed: usize, total: usize, message: &str) {
            self.events
                .lock()
                .unwrap()
                .push((completed, total, message.to_string()));
        }
    }

    #[tokio::test]
    async fn test_full_extraction_flow() {
        let llm = MockProvider::new(
            r#"{"extracted_signals": [
                {"category": "Explicit_Requirement", "speaker": "Sarah", "content": "We need CSV export", "priority_signal": "High"},
                {"category": "Technical_Specification", "speaker": "John", "content": "Make sure it's fast", "priority_signal": "Medium"}
            ]}"#,
        );
        let extractor =
            SignalExtractor::new(Arc::new(llm), ExtractorConfig::default()).unwrap();

        let outcome = extractor
            .extract_text("Sarah: We need CSV export. John: Make sure it's fast.", &NoProgress)
            .await
            .unwrap();

        assert_eq!(outcome.signals.len(), 2);
        assert_eq!(outcome.signals[0].category, SignalCategory::ExplicitRequirement);
        assert_eq!(outcome.signals[0].speaker, "Sarah");
        assert_eq!(outcome.signals[1].category, SignalCategory::TechnicalSpecification);
        assert_eq!(outcome.signals[1].speaker, "John");
    }

    #[tokio::test]
    async fn test_signals_follow_chunk_order() {
        let llm = Arc::new(scripted_provider());
        let extractor = SignalExtractor::new(Arc::clone(&llm), small_windows()).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        let contents: Vec<&str> = outcome.signals.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(outcome.metadata.chunk_count, 3);
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_failed_chunk_does_not_abort_run() {
        let mut llm = MockProvider::new(r#"{"extracted_signals": []}"#);
        llm.add_response("AAAAAAAAAA", reply("Explicit_Requirement", "Sarah", "first"));
        llm.add_error("BBBBBBBBBB");
        llm.add_response("CCCCCCCCCC", reply("Identified_Risk", "Ana", "third"));
        let llm = Arc::new(llm);
        let extractor = SignalExtractor::new(Arc::clone(&llm), small_windows()).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        let contents: Vec<&str> = outcome.signals.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "third"]);
        assert_eq!(outcome.failed_chunk_count(), 1);
        assert_eq!(outcome.succeeded_chunk_count(), 2);
        assert_eq!(outcome.failures[0].sequence_index, 1);
        assert!(matches!(outcome.failures[0].error, ChunkError::Generation(_)));
        assert_eq!(llm.call_count(), 3);
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_chunk_failure() {
        let mut llm = MockProvider::new(r#"{"extracted_signals": []}"#);
        llm.add_response("AAAAAAAAAA", reply("Decision_Made", "Sarah", "first"));
        llm.add_response("BBBBBBBBBB", "Sorry, I cannot help with that.");
        llm.add_response("CCCCCCCCCC", r#"{"signals": []}"#);
        let extractor = SignalExtractor::new(Arc::new(llm), small_windows()).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        assert_eq!(outcome.signals.len(), 1);
        assert_eq!(outcome.failed_chunk_count(), 2);
        assert!(matches!(outcome.failures[0].error, ChunkError::InvalidJson(_)));
        assert_eq!(outcome.failures[1].sequence_index, 2);
        assert!(matches!(outcome.failures[1].error, ChunkError::UnexpectedShape(_)));
    }

    #[tokio::test]
    async fn test_all_chunks_failing_yields_empty_outcome() {
        let llm = MockProvider::new("not json at all");
        let extractor = SignalExtractor::new(Arc::new(llm), small_windows()).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        assert!(outcome.is_empty());
        assert_eq!(outcome.failed_chunk_count(), 3);
        let indices: Vec<usize> = outcome.failures.iter().map(|f| f.sequence_index).collect();
        assert_eq!(indices, vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn test_bare_list_reply_is_accepted() {
        let llm = MockProvider::new(
            r#"[{"category": "User_Pain_Point", "speaker": "", "content": "Exports are slow", "priority_signal": "High"}]"#,
        );
        let extractor =
            SignalExtractor::new(Arc::new(llm), ExtractorConfig::default()).unwrap();

        let outcome = extractor.extract_text("Exports are slow", &NoProgress).await.unwrap();

        assert_eq!(outcome.signals.len(), 1);
        assert_eq!(outcome.signals[0].speaker, "Unknown");
    }

    #[tokio::test]
    async fn test_rejected_records_are_counted() {
        let llm = MockProvider::new(
            r#"{"extracted_signals": [
                {"category": "Business_Goal", "speaker": "Ana", "content": "Grow retention", "priority_signal": "High"},
                {"category": "Nice_To_Have", "speaker": "Ana", "content": "Confetti", "priority_signal": "Low"},
                {"category": "Open_Question", "speaker": "Ana"}
            ]}"#,
        );
        let extractor = SignalExtractor::new(Arc::new(llm), small_windows()).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        assert_eq!(outcome.signals.len(), 3);
        assert_eq!(outcome.rejected_records, 6);
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_sequential_progress_reports_each_chunk() {
        let extractor =
            SignalExtractor::new(Arc::new(scripted_provider()), small_windows()).unwrap();
        let progress = RecordingProgress::default();

        extractor.extract_text(THREE_CHUNK_TEXT, &progress).await.unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(
            events,
            vec![
                (1, 3, "Analyzed chunk 1 of 3".to_string()),
                (2, 3, "Analyzed chunk 2 of 3".to_string()),
                (3, 3, "Analyzed chunk 3 of 3".to_string()),
            ]
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_extraction_matches_sequential_order() {
        let config = ExtractorConfig {
            max_concurrent_chunks: 3,
            ..small_windows()
        };
        let llm = Arc::new(scripted_provider());
        let extractor = SignalExtractor::new(Arc::clone(&llm), config).unwrap();
        let progress = RecordingProgress::default();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &progress).await.unwrap();

        let contents: Vec<&str> = outcome.signals.iter().map(|s| s.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(llm.call_count(), 3);

        let completed: Vec<(usize, usize)> = progress
            .events
            .lock()
            .unwrap()
            .iter()
            .map(|(c, t, _)| (*c, *t))
            .collect();
        assert_eq!(completed, vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_concurrent_extraction_isolates_failures() {
        let mut llm = MockProvider::new(r#"{"extracted_signals": []}"#);
        llm.add_error("AAAAAAAAAA");
        llm.add_response("BBBBBBBBBB", reply("Action_Item", "John", "second"));
        llm.add_error("CCCCCCCCCC");
        let config = ExtractorConfig {
            max_concurrent_chunks: 2,
            ..small_windows()
        };
        let extractor = SignalExtractor::new(Arc::new(llm), config).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        assert_eq!(outcome.signals.len(), 1);
        assert_eq!(outcome.signals[0].content, "second");
        let indices: Vec<usize> = outcome.failures.iter().map(|f| f.sequence_index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[tokio::test]
    async fn test_extraction_metadata() {
        let llm = MockProvider::new("[]").with_model_name("test-model");
        let extractor = SignalExtractor::new(Arc::new(llm), small_windows()).unwrap();

        let outcome = extractor.extract_text(THREE_CHUNK_TEXT, &NoProgress).await.unwrap();

        assert_eq!(outcome.metadata.model_name, "test-model");
        assert_eq!(outcome.metadata.chunk_count, 3);
        assert!(outcome.metadata.timestamp > 0);
    }

    #[tokio::test]
    async fn test_extract_prepared_chunks() {
        let llm = Arc::new(scripted_provider());
        let extractor = SignalExtractor::new(Arc::clone(&llm), small_windows()).unwrap();

        let chunks = extractor.chunk(THREE_CHUNK_TEXT).unwrap();
        let last_two = chunks.into_iter().skip(1).collect();
        let outcome = extractor.extract(last_two, &NoProgress).await;

        assert_eq!(outcome.metadata.chunk_count, 2);
        assert_eq!(outcome.signals.len(), 2);
        assert_eq!(llm.calls_containing("AAAAAAAAAA"), 0);
    }

    #[tokio::test]
    async fn test_failures_keep_chunk_sequence_index() {
        let mut llm = MockProvider::new(r#"{"extracted_signals": []}"#);
        llm.add_error("CCCCCCCCCC");
        let config = ExtractorConfig {
            max_concurrent_chunks: 2,
            ..small_windows()
        };
        let extractor = SignalExtractor::new(Arc::new(llm), config).unwrap();

        let chunks = extractor.chunk(THREE_CHUNK_TEXT).unwrap();
        let last_two = chunks.into_iter().skip(1).collect();
        let outcome = extractor.extract(last_two, &NoProgress).await;

        assert_eq!(outcome.failed_chunk_count(), 1);
        assert_eq!(outcome.failures[0].sequence_index, 2);
    }
}

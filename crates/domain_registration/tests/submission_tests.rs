//! Submission orchestration tests

use std::sync::{Arc, Mutex};
use std::time::Duration;

use proptest::prelude::*;

use domain_registration::{
    FixedDelayPacing, MockRecordStore, NoPacing, OutcomeStatus, PacingPolicy, ParticipantRecord,
    SubmissionBatch, SubmissionService, ValidationError,
};

fn participant(i: usize) -> ParticipantRecord {
    ParticipantRecord::new(
        format!("Nom{i}"),
        format!("Prenom{i}"),
        format!("p{i}@example.com"),
        "Acme",
    )
}

fn batch(count: usize) -> SubmissionBatch {
    (0..count).fold(SubmissionBatch::new("grp-1", "Atelier"), |b, i| {
        b.with_participant(participant(i))
    })
}

/// Records every wait it is asked for, and never pauses
#[derive(Debug, Default)]
struct RecordingPacing {
    calls: Mutex<Vec<(usize, usize)>>,
}

impl PacingPolicy for RecordingPacing {
    fn wait_before_next(&self, index: usize, total: usize) -> Duration {
        self.calls.lock().unwrap().push((index, total));
        Duration::ZERO
    }
}

// ============================================================================
// Outcome aggregation
// ============================================================================

mod outcome_tests {
    use super::*;

    #[tokio::test]
    async fn test_all_success() {
        let store = Arc::new(MockRecordStore::new());
        let service = SubmissionService::with_pacing(store.clone(), Arc::new(NoPacing));

        let outcome = service.submit(&batch(3)).await.unwrap().outcome();

        assert_eq!(outcome.status, OutcomeStatus::Success);
        assert!(outcome.success);
        assert_eq!(outcome.message, "3 participants inscrits avec succès.");
        assert_eq!(store.records().await.len(), 3);
    }

    #[tokio::test]
    async fn test_second_of_three_fails() {
        let store = Arc::new(MockRecordStore::new().fail_for_email("p1@example.com"));
        let service = SubmissionService::with_pacing(store.clone(), Arc::new(NoPacing));

        let report = service.submit(&batch(3)).await.unwrap();
        let outcome = report.outcome();

        assert_eq!(store.call_count(), 3);
        assert_eq!(outcome.created, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.status.http_status(), 207);
        assert_eq!(outcome.message, "2 sur 3 participants inscrits. Certains ont échoué.");

        let written: Vec<_> = store.records().await.into_iter().map(|r| r.participant.email).collect();
        assert_eq!(written, vec!["p0@example.com", "p2@example.com"]);
    }

    #[tokio::test]
    async fn test_all_fail_reports_last_cause() {
        let store = Arc::new(
            MockRecordStore::new()
                .fail_always()
                .with_failure_message("Could not find database"),
        );
        let service = SubmissionService::with_pacing(store.clone(), Arc::new(NoPacing));

        let outcome = service.submit(&batch(2)).await.unwrap().outcome();

        assert_eq!(outcome.status, OutcomeStatus::Failed);
        assert_eq!(outcome.status.http_status(), 500);
        assert_eq!(
            outcome.message,
            "Erreur lors de l'inscription : Could not find database"
        );
        assert_eq!(store.call_count(), 2);
    }

    #[tokio::test]
    async fn test_rejected_batch_writes_nothing() {
        let store = Arc::new(MockRecordStore::new());
        let service = SubmissionService::with_pacing(store.clone(), Arc::new(NoPacing));

        let err = service.submit(&SubmissionBatch::new("grp-1", "Atelier")).await.unwrap_err();
        assert_eq!(err, ValidationError::EmptyBatch);

        let err = service.submit(&SubmissionBatch::new("  ", "Atelier").with_participant(participant(0))).await.unwrap_err();
        assert_eq!(err, ValidationError::MissingGroup);

        assert_eq!(store.call_count(), 0);
    }
}

// ============================================================================
// Pacing
// ============================================================================

mod pacing_tests {
    use super::*;

    #[tokio::test]
    async fn test_policy_consulted_between_items_only() {
        let pacing = Arc::new(RecordingPacing::default());
        let service = SubmissionService::with_pacing(Arc::new(MockRecordStore::new()), pacing.clone());

        service.submit(&batch(5)).await.unwrap();

        let calls = pacing.calls.lock().unwrap().clone();
        assert_eq!(calls, vec![(1, 5), (2, 5), (3, 5), (4, 5)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_five_participants_wait_four_times() {
        let service = SubmissionService::new(Arc::new(MockRecordStore::new()));

        let start = tokio::time::Instant::now();
        service.submit(&batch(5)).await.unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(4 * 350), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(5 * 350), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_small_batch_is_not_delayed() {
        let service = SubmissionService::new(Arc::new(MockRecordStore::new()));

        let start = tokio::time::Instant::now();
        service.submit(&batch(2)).await.unwrap();

        assert!(start.elapsed() < Duration::from_millis(1));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failures_do_not_skip_pauses() {
        let store = Arc::new(MockRecordStore::new().fail_always());
        let service = SubmissionService::with_pacing(
            store,
            Arc::new(FixedDelayPacing::new(0, Duration::from_millis(100))),
        );

        let start = tokio::time::Instant::now();
        service.submit(&batch(3)).await.unwrap();

        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_millis(200), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_millis(300), "elapsed {elapsed:?}");
    }
}

// ============================================================================
// Properties
// ============================================================================

fn failure_pattern() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..12)
}

proptest! {
    #[test]
    fn prop_counts_add_up_and_status_matches(pattern in failure_pattern()) {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        runtime.block_on(async {
            let mut store = MockRecordStore::new();
            for (i, fails) in pattern.iter().enumerate() {
                if *fails {
                    store = store.fail_on_call(i);
                }
            }
            let store = Arc::new(store);
            let service = SubmissionService::with_pacing(store.clone(), Arc::new(NoPacing));

            let report = service.submit(&batch(pattern.len())).await.unwrap();
            let outcome = report.outcome();
            let expected_failed = pattern.iter().filter(|f| **f).count();

            prop_assert_eq!(outcome.created + outcome.failed, pattern.len());
            prop_assert_eq!(outcome.failed, expected_failed);
            prop_assert_eq!(store.call_count(), pattern.len());

            let expected_status = if expected_failed == 0 {
                OutcomeStatus::Success
            } else if expected_failed == pattern.len() {
                OutcomeStatus::Failed
            } else {
                OutcomeStatus::Partial
            };
            prop_assert_eq!(outcome.status, expected_status);
            prop_assert_eq!(outcome.success, expected_failed == 0);

            let failed_indices: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
            let expected_indices: Vec<usize> = pattern
                .iter()
                .enumerate()
                .filter_map(|(i, f)| f.then_some(i))
                .collect();
            prop_assert_eq!(failed_indices, expected_indices);
            Ok(())
        })?;
    }
}

//! Custom Test Assertions
//!
//! Provides assertion helpers for submission results that give more
//! meaningful failure messages than standard assertions.

use domain_registration::{OutcomeStatus, SubmissionReport};

/// Asserts the counts and status of a finished submission
///
/// # Panics
///
/// Panics with the full report when any count or the status differs
pub fn assert_report(report: &SubmissionReport, created: usize, failed: usize, status: OutcomeStatus) {
    assert_eq!(
        (report.created_count(), report.failed_count(), report.status()),
        (created, failed, status),
        "unexpected submission result: {report:#?}"
    );
    assert_eq!(
        report.created_count() + report.failed_count(),
        report.total,
        "created and failed do not add up to the batch size"
    );
}

/// Asserts that failures were recorded at exactly these batch positions
///
/// # Panics
///
/// Panics if the failed indices differ
pub fn assert_failed_at(report: &SubmissionReport, indices: &[usize]) {
    let actual: Vec<usize> = report.failures.iter().map(|f| f.index).collect();
    assert_eq!(actual, indices, "failures: {:#?}", report.failures);
}

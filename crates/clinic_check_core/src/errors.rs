//! Error types for the check flow.

use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur while running the end-to-end check flow.
///
/// Every variant here is fatal to the run: tolerated conditions (duplicate
/// fixtures, duplicate appointment slots, a failed booking) never surface
/// as errors, they are logged and the flow continues.
#[derive(Error, Debug)]
pub enum Error {
    /// A clinic API call failed.
    ///
    /// Covers login failures, transport errors, and non-duplicate create
    /// rejections. There is no retry; the run terminates.
    #[error("Clinic API error: {0}")]
    Client(#[from] clinic_client::Error),

    /// The server reported a duplicate but the lookup found no match.
    ///
    /// Distinct from [`Error::Client`] so a run can tell "creation failed"
    /// apart from "creation says the fixture exists, yet listing the
    /// resources does not show it".
    #[error("Could not find existing {kind} despite duplicate report")]
    FixtureNotFound {
        /// The fixture kind that could not be resolved.
        kind: &'static str,
    },

    /// The doctor's schedule still lacks the configured day after setup.
    ///
    /// Raised when the create call was rejected and a re-listing of the
    /// doctor's schedule does not show the day either.
    #[error("Doctor {doctor_id} has no {day} schedule after setup")]
    ScheduleUnavailable {
        /// The doctor whose schedule was being ensured.
        doctor_id: i64,
        /// The configured day of week.
        day: String,
    },
}

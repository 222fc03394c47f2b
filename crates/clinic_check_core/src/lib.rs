//! Core orchestration for ClinicCheck.
//!
//! This crate drives the end-to-end smoke check against a running
//! clinic-management API: an admin phase that idempotently ensures the test
//! fixtures exist, a patient phase that books an appointment, and a doctor
//! phase that verifies the booking is visible. The HTTP surface lives in
//! the `clinic_client` crate; this crate owns sequencing, the
//! create-or-find fixture logic, and the run report.

pub mod ensure;
pub mod errors;
pub mod flow;

pub use ensure::ensure_fixture;
pub use errors::Error;
pub use flow::{run_flow, Credentials, FixtureConfig, FlowConfig, FlowReport, Verification};

//! Idempotent create-or-find for test fixtures.
//!
//! Re-running the check flow must not duplicate departments, doctors, or
//! schedule entries. The server rejects duplicates; when it does, the
//! existing record is looked up by listing the resource and scanning for
//! the one matching a uniqueness predicate. Dataset size is test-fixture
//! scale, so the scan stays linear.

use std::future::Future;

use clinic_client::{CreateOutcome, ResourceId};
use tracing::info;

use crate::errors::Error;

#[cfg(test)]
#[path = "ensure_tests.rs"]
mod tests;

/// Ensures a fixture exists and returns its identifier.
///
/// Attempts creation first. A duplicate report falls back to listing all
/// resources of the kind and scanning for the record matching `matches`;
/// finding none after a duplicate report is [`Error::FixtureNotFound`].
/// Any non-duplicate creation failure propagates immediately.
///
/// # Arguments
///
/// * `kind` - Fixture kind for logging and error tagging, e.g. `"department"`.
/// * `create` - Performs the creation request.
/// * `list` - Lists all resources of the kind, used only on the duplicate path.
/// * `matches` - Uniqueness predicate identifying the fixture among the listed records.
/// * `id_of` - Extracts the identifier from a matched record.
pub async fn ensure_fixture<T, C, L, FutC, FutL, M, I>(
    kind: &'static str,
    create: C,
    list: L,
    matches: M,
    id_of: I,
) -> Result<ResourceId, Error>
where
    C: FnOnce() -> FutC,
    FutC: Future<Output = Result<CreateOutcome, clinic_client::Error>>,
    L: FnOnce() -> FutL,
    FutL: Future<Output = Result<Vec<T>, clinic_client::Error>>,
    M: Fn(&T) -> bool,
    I: Fn(&T) -> ResourceId,
{
    match create().await? {
        CreateOutcome::Created(id) => {
            info!(kind, id, "Created fixture");
            Ok(id)
        }
        CreateOutcome::Duplicate(message) => {
            info!(kind, %message, "Fixture already exists, looking up its id");
            let items = list().await?;
            let id = items
                .iter()
                .find(|item| matches(item))
                .map(&id_of)
                .ok_or(Error::FixtureNotFound { kind })?;
            info!(kind, id, "Found existing fixture");
            Ok(id)
        }
    }
}

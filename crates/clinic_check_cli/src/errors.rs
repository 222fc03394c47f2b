use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the ClinicCheck CLI application.
///
/// This enum represents all possible error conditions that can arise during
/// CLI operations, including configuration issues and failures of the check
/// flow itself.
#[derive(Error, Debug)]
pub enum Error {
    /// The clinic API client could not be constructed or a call failed
    /// outside the flow.
    #[error("Clinic API error: {0}")]
    Client(#[from] clinic_client::Error),

    /// Configuration error occurred while loading or saving configuration.
    ///
    /// This error is returned when there are issues with the configuration
    /// file, such as missing files, invalid TOML, or write failures.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The end-to-end check flow failed with a fatal error.
    #[error("Check flow failed: {0}")]
    Flow(#[from] clinic_check_core::Error),
}

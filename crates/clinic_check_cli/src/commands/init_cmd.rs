//! The `init` command: writes a default configuration file.

use std::path::PathBuf;

use clap::Args;

use crate::config::{get_config_path, AppConfig};
use crate::errors::Error;

#[cfg(test)]
#[path = "init_cmd_tests.rs"]
mod tests;

/// Arguments for the `init` command.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Where to write the configuration file (defaults to ./clinic-check.toml)
    #[arg(long)]
    pub path: Option<String>,

    /// Overwrite an existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Writes the default configuration and returns the path written to.
///
/// # Errors
///
/// Returns `Error::Config` if the target file already exists and `--force`
/// was not given, or if the file cannot be written.
pub fn execute(args: &InitArgs) -> Result<PathBuf, Error> {
    let path = get_config_path(args.path.as_deref());

    if path.exists() && !args.force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {:?} (use --force to overwrite)",
            path
        )));
    }

    AppConfig::default().save(&path)?;
    Ok(path)
}

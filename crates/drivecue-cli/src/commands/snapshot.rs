//! Single poll

use anyhow::Result;
use tracing::debug;

use crate::config::DriveCueConfig;
use crate::error::CliError;
use crate::output;
use crate::session::Session;

/// Poll once and print everything the snapshot holds.
pub async fn execute(config: &DriveCueConfig, json: bool) -> Result<()> {
    let mut session = Session::from_config(config)?;
    let tick = session.tick().await;
    debug!(outcome = ?tick.error, "Snapshot poll finished");

    output::print_snapshot(&tick, json);
    match tick.error {
        Some(err) => Err(CliError::from(err).into()),
        None => Ok(()),
    }
}

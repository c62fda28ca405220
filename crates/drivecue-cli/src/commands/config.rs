//! Configuration inspection commands

use anyhow::Result;

use crate::commands::ConfigCommands;
use crate::config::DriveCueConfig;
use crate::output;

pub fn execute(cmd: &ConfigCommands, config: &DriveCueConfig, json: bool) -> Result<()> {
    match cmd {
        ConfigCommands::Show => output::print_config(config, json)?,
        ConfigCommands::Check => {
            config.validate()?;
            output::print_validation_ok(json);
        }
    }
    Ok(())
}

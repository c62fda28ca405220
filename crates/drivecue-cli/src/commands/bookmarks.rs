//! Bookmark listing

use anyhow::Result;

use crate::config::DriveCueConfig;
use crate::output;

pub fn execute(config: &DriveCueConfig, json: bool) -> Result<()> {
    output::print_bookmarks(&config.bookmarks, json);
    Ok(())
}

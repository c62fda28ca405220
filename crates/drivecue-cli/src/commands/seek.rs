//! Seek, skip and reset

use anyhow::Result;

use crate::commands::SeekArgs;
use crate::config::DriveCueConfig;
use crate::error::CliError;
use crate::output;
use drivecue_telemetry::TelemetrySource;

use crate::session::{Session, Tick};

/// Where a seek should land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeekTarget {
    Offset(i64),
    /// Move `step_s` past `from_s`, or past the current scenario time.
    Skip { from_s: Option<i64>, step_s: i64 },
    Reset,
}

impl SeekTarget {
    pub fn resolve(args: &SeekArgs, config: &DriveCueConfig) -> Result<Self, CliError> {
        if args.reset {
            return Ok(SeekTarget::Reset);
        }
        if let Some(from_s) = args.skip {
            return Ok(SeekTarget::Skip {
                from_s,
                step_s: config.skip_step_s,
            });
        }
        if let Some(index) = args.bookmark {
            return bookmark_offset(config, index).map(SeekTarget::Offset);
        }
        Ok(SeekTarget::Offset(args.seconds.unwrap_or(0)))
    }
}

pub(crate) fn bookmark_offset(config: &DriveCueConfig, index: usize) -> Result<i64, CliError> {
    config
        .bookmarks
        .get(index)
        .ok_or(CliError::BookmarkNotFound {
            index,
            available: config.bookmarks.len(),
        })
}

pub(crate) async fn apply<S: TelemetrySource>(session: &mut Session<S>, target: SeekTarget) -> Tick {
    match target {
        SeekTarget::Offset(offset_s) => session.seek(offset_s).await,
        SeekTarget::Skip {
            from_s: Some(from_s),
            step_s,
        } => session.seek(from_s.saturating_add(step_s)).await,
        SeekTarget::Skip {
            from_s: None,
            step_s,
        } => {
            // The scenario clock is only known once a record has been seen.
            let first = session.tick().await;
            if first.error.is_some() {
                return first;
            }
            session.skip_forward(step_s).await
        }
        SeekTarget::Reset => session.reset().await,
    }
}

pub async fn execute(args: &SeekArgs, config: &DriveCueConfig, json: bool) -> Result<()> {
    let target = SeekTarget::resolve(args, config)?;
    let mut session = Session::from_config(config)?;
    let tick = apply(&mut session, target).await;

    output::print_snapshot(&tick, json);
    match tick.error {
        Some(err) => Err(CliError::from(err).into()),
        None => Ok(()),
    }
}

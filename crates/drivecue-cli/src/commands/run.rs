//! Periodic poll-and-classify loop

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::commands::RunArgs;
use crate::commands::seek::{self, SeekTarget};
use crate::config::DriveCueConfig;
use crate::output;
use crate::session::{Session, Tick};

pub async fn execute(args: &RunArgs, config: &DriveCueConfig, json: bool) -> Result<()> {
    let start = match args.bookmark {
        Some(index) => seek::bookmark_offset(config, index)?,
        None => args.from.unwrap_or(0),
    };

    let mut session = Session::from_config(config)?;
    let first = seek::apply(&mut session, SeekTarget::Offset(start)).await;
    report(&first, args.quiet, json);

    let mut ticker = tokio::time::interval(Duration::from_millis(config.poll_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately and the seek above already polled.
    ticker.tick().await;

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut polls: u64 = 0;
    while args.ticks.is_none_or(|limit| polls < limit) {
        tokio::select! {
            _ = ticker.tick() => {}
            result = &mut shutdown => {
                result.context("Failed to listen for Ctrl-C")?;
                info!(polls, "Interrupted, stopping");
                break;
            }
        }

        let tick = session.tick().await;
        report(&tick, args.quiet, json);
        polls = polls.saturating_add(1);
    }

    output::print_trip_summary(session.trip_summary().as_ref(), json);
    Ok(())
}

fn report(tick: &Tick, quiet: bool, json: bool) {
    if !quiet || tick.transition.is_some() || tick.trip_started {
        output::print_tick(tick, json);
    }
}

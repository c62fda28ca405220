//! Output formatting for CLI responses

use anyhow::Error;
use colored::*;
use drivecue_classifier::DrivingState;
use drivecue_telemetry::{ScenarioBookmarks, TripSummary, format_scenario_time};
use serde::Serialize;
use serde_json::json;

use crate::config::DriveCueConfig;
use crate::error::CliError;
use crate::session::Tick;

/// Print error in JSON format
pub fn print_error_json(error: &Error) {
    let error_json = json!({
        "success": false,
        "error": {
            "message": error.to_string(),
            "type": error_type_name(error)
        }
    });
    print_json(&error_json);
}

/// Print error in human-readable format
pub fn print_error_human(error: &Error) {
    eprintln!("{} {}", "Error:".red().bold(), error);

    let mut source = error.source();
    while let Some(err) = source {
        eprintln!("  {} {}", "Caused by:".yellow(), err);
        source = err.source();
    }
}

fn error_type_name(error: &Error) -> &'static str {
    match error.downcast_ref::<CliError>() {
        Some(CliError::InvalidConfiguration(_)) => "invalid_configuration",
        Some(CliError::BookmarkNotFound { .. }) => "bookmark_not_found",
        Some(CliError::SourceUnavailable(_)) => "source_unavailable",
        Some(CliError::Telemetry(_)) => "telemetry",
        Some(CliError::IoError(_)) => "io",
        Some(CliError::JsonError(_)) => "json",
        Some(CliError::YamlError(_)) => "yaml",
        None => "unknown",
    }
}

fn print_json(value: &impl Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => eprintln!("Failed to format output as JSON: {e}"),
    }
}

fn colored_state(state: DrivingState) -> ColoredString {
    let label = format!("{:<9}", state.as_str());
    match state {
        DrivingState::Startup => label.dimmed(),
        DrivingState::Stopped => label.red(),
        DrivingState::Cruising => label.green(),
        DrivingState::Active => label.yellow(),
        DrivingState::Demanding => label.magenta().bold(),
    }
}

/// Print one poll-and-classify cycle.
///
/// In JSON mode each tick is a single line so a long run streams as NDJSON.
pub fn print_tick(tick: &Tick, json: bool) {
    if json {
        match serde_json::to_string(tick) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to format tick as JSON: {e}"),
        }
        return;
    }

    let snapshot = &tick.snapshot;
    println!(
        "[{}] {} {:>6.1} km/h  {}  fuel {:>5.1}  {}",
        format_scenario_time(snapshot.time_s),
        colored_state(tick.state),
        snapshot.speed,
        snapshot.position,
        snapshot.residual_fuel,
        snapshot.status.dimmed()
    );

    if let Some(transition) = tick.transition {
        println!(
            "  {} {} -> {}",
            "State:".bold(),
            transition.from,
            colored_state(transition.to)
        );
    }
    if tick.trip_started {
        println!("  {}", "Trip started".cyan().bold());
    }
}

/// Print the snapshot behind a tick with every channel listed.
pub fn print_snapshot(tick: &Tick, json: bool) {
    if json {
        print_json(&json!({ "success": true, "tick": tick }));
        return;
    }

    let snapshot = &tick.snapshot;
    println!("{}", "Vehicle Snapshot:".bold());
    println!("  Vehicle:       {}", snapshot.vehicle_id);
    if let Some(vid) = &snapshot.vid {
        println!("  VID:           {vid}");
    }
    println!("  Scenario time: {}", format_scenario_time(snapshot.time_s));
    println!("  State:         {}", colored_state(tick.state));
    println!("  Position:      {}", snapshot.position);
    println!("  Speed:         {:.1} km/h", snapshot.speed);
    println!("  Yaw rate:      {:.2} deg/s", snapshot.yaw_rate);
    println!(
        "  Acceleration:  lat {:.3} / long {:.3} m/s²",
        snapshot.lateral_acceleration, snapshot.longitudinal_acceleration
    );
    println!("  Accelerator:   {:.0}%", snapshot.accelerator_pedal_ratio);
    println!("  Brake:         {}", on_off(snapshot.brake_on));
    println!("  Parking brake: {}", on_off(snapshot.parking_brake_on));
    println!("  Steering:      {:.1} deg", snapshot.steering_angle);
    println!("  Engine:        {:.0} rpm, {:.0} °C", snapshot.engine_rpm, snapshot.engine_temperature);
    println!("  Outside:       {:.0} °C", snapshot.outside_temperature);
    println!("  Fuel:          {:.0}/255", snapshot.residual_fuel);
    println!("  Odometer:      {:.1}", snapshot.odometer);
    println!("  Status:        {}", snapshot.status);
}

fn on_off(on: bool) -> ColoredString {
    if on { "on".green() } else { "off".dimmed() }
}

pub fn print_trip_summary(summary: Option<&TripSummary>, json: bool) {
    if json {
        print_json(&json!({ "success": true, "trip": summary }));
        return;
    }

    match summary {
        Some(summary) => {
            println!("{}", "Trip Summary:".bold());
            println!("  {:.2} miles", summary.distance);
            println!("  {:.1} hours", summary.elapsed_hours);
            println!("  {:.1} gallons", summary.fuel_used_gallons);
        }
        None => println!("{}", "No trip recorded".yellow()),
    }
}

pub fn print_bookmarks(bookmarks: &ScenarioBookmarks, json: bool) {
    if json {
        let entries: Vec<_> = bookmarks
            .iter()
            .enumerate()
            .map(|(index, offset_s)| {
                json!({
                    "index": index,
                    "offset_s": offset_s,
                    "time": format_scenario_time(offset_s),
                })
            })
            .collect();
        print_json(&json!({ "success": true, "bookmarks": entries }));
        return;
    }

    if bookmarks.is_empty() {
        println!("{}", "No bookmarks configured".yellow());
        return;
    }
    println!("{}", "Scenario Bookmarks:".bold());
    for (index, offset_s) in bookmarks.iter().enumerate() {
        println!("  {index:>2}  {}  ({offset_s} s)", format_scenario_time(offset_s));
    }
}

/// Print the effective configuration with the API key masked.
pub fn print_config(config: &DriveCueConfig, json: bool) -> Result<(), CliError> {
    let mut shown = config.clone();
    if shown.api_key.is_some() {
        shown.api_key = Some("********".to_string());
    }

    if json {
        print_json(&json!({ "success": true, "config": shown }));
    } else {
        print!("{}", serde_yaml::to_string(&shown)?);
    }
    Ok(())
}

pub fn print_validation_ok(json: bool) {
    if json {
        print_json(&json!({ "success": true, "valid": true }));
    } else {
        println!("{}", "Configuration is valid".green());
    }
}

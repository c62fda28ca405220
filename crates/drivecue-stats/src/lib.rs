//! Rolling sample windows for vehicle telemetry channels.
//!
//! Each tracked measurement keeps only its most recent samples in a
//! fixed-capacity [`SampleWindow`]. Every push evicts the oldest sample once the
//! window is full and refreshes the window's [`Statistics`] (count, mean, min,
//! max and Bessel-corrected standard deviation).
//!
//! # Example
//!
//! ```
//! use drivecue_stats::SampleWindow;
//!
//! let mut window: SampleWindow = SampleWindow::new();
//! window.push(10.0);
//! window.push(20.0);
//!
//! let stats = window.statistics();
//! assert_eq!(stats.count, 2);
//! assert!((stats.mean - 15.0).abs() < 1e-9);
//! assert!((stats.sd - 7.0710678).abs() < 1e-6);
//! ```
//!
//! Windows are plain value types backed by an inline ring buffer, so pushing a
//! sample never allocates.

#![deny(static_mut_refs)]
#![deny(unused_must_use)]
#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod statistics;
pub mod window;

pub use statistics::Statistics;
pub use window::{SampleWindow, WINDOW_CAPACITY};

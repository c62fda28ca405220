//! Window maintenance and threshold evaluation.

use drivecue_stats::{SampleWindow, Statistics, WINDOW_CAPACITY};
use drivecue_telemetry::TelemetrySnapshot;
use tracing::{debug, info};

use crate::{Channel, DrivingState};

/// Brake window minimum meaning "held for the whole window". Brake samples
/// are only ever 0.0 or 1.0.
const BRAKE_HELD: f64 = 1.0;
const CRUISING_MAX_SPEED_SD: f64 = 10.0;
const CRUISING_MIN_SPEED_MEAN: f64 = 40.0;
const DEMANDING_MIN_YAW_RATE_MEAN: f64 = 5.0;
const DEMANDING_MIN_SPEED_MEAN: f64 = 30.0;

/// Derive the driving state from window statistics. First match wins:
///
/// 1. fewer than a full window of speed samples: `Startup`
/// 2. never moved and braking throughout: `Stopped`
/// 3. steady speed above 40: `Cruising`
/// 4. turning hard above 30: `Demanding`
/// 5. otherwise `Active`
pub fn classify(speed: &Statistics, brake: &Statistics, yaw_rate: &Statistics) -> DrivingState {
    if speed.count < WINDOW_CAPACITY {
        DrivingState::Startup
    } else if speed.max == 0.0 && brake.min >= BRAKE_HELD {
        DrivingState::Stopped
    } else if speed.sd < CRUISING_MAX_SPEED_SD && speed.mean > CRUISING_MIN_SPEED_MEAN {
        DrivingState::Cruising
    } else if yaw_rate.mean > DEMANDING_MIN_YAW_RATE_MEAN && speed.mean > DEMANDING_MIN_SPEED_MEAN
    {
        DrivingState::Demanding
    } else {
        DrivingState::Active
    }
}

/// Keeps one sample window per [`Channel`] and the most recent state.
///
/// Driven by the caller once per poll; concurrent updates must be serialized
/// by the caller.
#[derive(Debug, Clone, Default)]
pub struct DrivingStateClassifier {
    accelerator_pedal: SampleWindow,
    brake: SampleWindow,
    lateral_acceleration: SampleWindow,
    longitudinal_acceleration: SampleWindow,
    speed: SampleWindow,
    yaw_rate: SampleWindow,
    state: Option<DrivingState>,
}

impl DrivingStateClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Push one sample per channel from `snapshot` and re-evaluate the state.
    pub fn update(&mut self, snapshot: &TelemetrySnapshot) -> DrivingState {
        for channel in Channel::ALL {
            let sample = channel.sample(snapshot);
            self.window_mut(channel).push(sample);
        }

        let state = classify(
            &self.speed.statistics(),
            &self.brake.statistics(),
            &self.yaw_rate.statistics(),
        );

        debug!(
            %state,
            speed_mean = self.speed.statistics().mean,
            speed_sd = self.speed.statistics().sd,
            yaw_rate_mean = self.yaw_rate.statistics().mean,
            "Driving state evaluated"
        );
        if self.state != Some(state) {
            info!(previous = ?self.state, %state, time_s = snapshot.time_s, "Driving state changed");
        }

        self.state = Some(state);
        state
    }

    /// Clear all history and return to `Startup`.
    pub fn reset(&mut self) {
        for channel in Channel::ALL {
            self.window_mut(channel).clear();
        }
        self.state = Some(DrivingState::Startup);
    }

    /// Most recently derived state; `None` before the first update or reset.
    pub fn state(&self) -> Option<DrivingState> {
        self.state
    }

    pub fn window(&self, channel: Channel) -> &SampleWindow {
        match channel {
            Channel::AcceleratorPedal => &self.accelerator_pedal,
            Channel::Brake => &self.brake,
            Channel::LateralAcceleration => &self.lateral_acceleration,
            Channel::LongitudinalAcceleration => &self.longitudinal_acceleration,
            Channel::Speed => &self.speed,
            Channel::YawRate => &self.yaw_rate,
        }
    }

    pub fn statistics(&self, channel: Channel) -> Statistics {
        self.window(channel).statistics()
    }

    fn window_mut(&mut self, channel: Channel) -> &mut SampleWindow {
        match channel {
            Channel::AcceleratorPedal => &mut self.accelerator_pedal,
            Channel::Brake => &mut self.brake,
            Channel::LateralAcceleration => &mut self.lateral_acceleration,
            Channel::LongitudinalAcceleration => &mut self.longitudinal_acceleration,
            Channel::Speed => &mut self.speed,
            Channel::YawRate => &mut self.yaw_rate,
        }
    }
}

//! Mapping from source wall-clock timestamps to scenario time.
//!
//! The scenario clock advances 1:1 with the source's wall clock from a fixed
//! anchor (the first successful poll), offset by whatever origin was most
//! recently requested through seek/reset:
//!
//! ```text
//! scenario_s = (wall_ms - anchor_ms) / 1000 + origin_s
//! ```

/// Anchor and origin of the scenario clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeBase {
    anchor_wall_ms: Option<i64>,
    scenario_origin_s: i64,
}

impl TimeBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Anchor the clock at `wall_ms` unless it is already anchored. Returns
    /// true when this call set the anchor.
    pub fn record_anchor_if_unset(&mut self, wall_ms: i64) -> bool {
        if self.anchor_wall_ms.is_some() {
            return false;
        }
        self.anchor_wall_ms = Some(wall_ms);
        true
    }

    /// Set the scenario offset that the anchor corresponds to.
    pub fn set_origin(&mut self, scenario_s: i64) {
        self.scenario_origin_s = scenario_s;
    }

    /// Scenario time for a source timestamp, truncated to whole seconds.
    /// `None` until the anchor has been recorded.
    pub fn scenario_time_for(&self, wall_ms: i64) -> Option<i64> {
        let anchor = self.anchor_wall_ms?;
        let elapsed_s = wall_ms.saturating_sub(anchor) / 1000;
        Some(elapsed_s.saturating_add(self.scenario_origin_s))
    }

    pub fn anchor_wall_ms(&self) -> Option<i64> {
        self.anchor_wall_ms
    }

    pub fn scenario_origin_s(&self) -> i64 {
        self.scenario_origin_s
    }

    pub fn is_anchored(&self) -> bool {
        self.anchor_wall_ms.is_some()
    }
}

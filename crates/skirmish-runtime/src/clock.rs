//! Game clock with a clamped frame delta

use serde::Deserialize;

/// Clock settings from the `[clock]` config table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Largest frame delta the simulation will accept, in seconds
    pub max_frame_time: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            max_frame_time: 0.1,
        }
    }
}

/// Tracks game time. Every frame runs on one variable delta, clamped so a
/// stall cannot push the simulation through a huge step.
pub struct GameClock {
    /// Total elapsed game time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds, after clamping
    pub delta_time: f64,
    /// Frame deltas above this are clamped (default: 100ms)
    pub max_frame_time: f64,
}

impl Default for GameClock {
    fn default() -> Self {
        Self::from_config(&ClockConfig::default())
    }
}

impl GameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &ClockConfig) -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            max_frame_time: config.max_frame_time,
        }
    }

    /// Advance by an externally measured delta, clamping after a stall.
    /// Returns the delta the simulation should use.
    pub fn advance(&mut self, raw_dt: f64) -> f64 {
        self.delta_time = raw_dt.clamp(0.0, self.max_frame_time);
        self.total_time += self.delta_time;
        self.delta_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_defaults() {
        let clock = GameClock::new();
        assert!((clock.max_frame_time - 0.1).abs() < 1e-10);
        assert_eq!(clock.total_time, 0.0);
        assert_eq!(clock.delta_time, 0.0);
    }

    #[test]
    fn short_frames_pass_through() {
        let mut clock = GameClock::new();
        let dt = clock.advance(1.0 / 60.0);
        assert!((dt - 1.0 / 60.0).abs() < 1e-10);
        assert!((clock.delta_time - dt).abs() < 1e-10);
    }

    #[test]
    fn stall_is_clamped_to_max_frame_time() {
        let mut clock = GameClock::new();
        let dt = clock.advance(2.5);
        assert!((dt - 0.1).abs() < 1e-10);
        assert!((clock.total_time - 0.1).abs() < 1e-10);
    }

    #[test]
    fn negative_delta_is_ignored() {
        let mut clock = GameClock::new();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.total_time, 0.0);
    }

    #[test]
    fn configured_limit_is_honoured() {
        let mut clock = GameClock::from_config(&ClockConfig {
            max_frame_time: 0.25,
        });
        assert!((clock.advance(0.2) - 0.2).abs() < 1e-10);
        assert!((clock.advance(1.0) - 0.25).abs() < 1e-10);
        assert!((clock.total_time - 0.45).abs() < 1e-10);
    }
}

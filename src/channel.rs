//! Linear bandwidth + latency cost model for the migration channel.
//!
//! This is deliberately the simplest module in the crate: one immutable
//! struct and one pure function. Everything downstream (the engine) treats
//! [`Channel::transfer_time`] as the sole place simulated time is produced
//! from a data volume.

/// A point-to-point migration channel with a fixed transfer speed and a
/// fixed per-transfer latency.
///
/// `delay` is documented by the as-built system as milliseconds but is
/// added directly into a seconds-valued clock; [`Channel::transfer_time`]
/// preserves that numeric behavior exactly rather than "fixing" the unit
/// mismatch, so that migrated traces reproduce bit-for-bit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Channel {
    /// Transfer speed in MB/s.
    speed: f64,
    /// Fixed per-transfer latency, added as-is into the seconds clock.
    delay: f64,
}

impl Channel {
    /// Construct a channel. Neither parameter is validated — a zero or
    /// negative speed simply produces an infinite or negative transfer
    /// time, which is a configuration mistake for the caller, not a
    /// condition this constructor can usefully reject.
    pub fn new(speed: f64, delay: f64) -> Self {
        Self { speed, delay }
    }

    /// The default channel used by the CLI driver and by the as-built
    /// source: `speed = 10`, `delay = 10`.
    pub fn default_channel() -> Self {
        Self::new(10.0, 10.0)
    }

    /// Time to move `volume_kb` kilobytes over this channel:
    /// `delay + volume_kb / (1000 * speed)`.
    pub fn transfer_time(&self, volume_kb: f64) -> f64 {
        self.delay + (volume_kb / 1000.0) / self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transfer_time_matches_closed_form() {
        let c = Channel::new(10.0, 10.0);
        // One page (4 KB): 10 + 4 / (1000 * 10) = 10.0004
        assert!((c.transfer_time(4.0) - 10.0004).abs() < 1e-12);
    }

    #[test]
    fn transfer_time_zero_volume_is_pure_delay() {
        let c = Channel::new(10.0, 10.0);
        assert_eq!(c.transfer_time(0.0), 10.0);
    }

    #[test]
    fn transfer_time_scales_linearly_with_volume() {
        let c = Channel::new(20.0, 0.0);
        assert!((c.transfer_time(200.0) - 0.01).abs() < 1e-12);
        assert!((c.transfer_time(400.0) - 0.02).abs() < 1e-12);
    }
}

//! Finite-difference kinematic estimation
//!
//! The estimator turns the raw elevation sample stream into per-tick
//! backward-difference estimates of vertical velocity, acceleration and jerk.
//! The differences are deliberately NOT scaled into per-second rates: the
//! fixed cycle rate is baked into the downstream gains, and converting to
//! true rates would silently detune them.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Kinematic state of the vehicle for a single cycle.
///
/// Each derivative is computed strictly from the immediately preceding value
/// of the one-order-lower quantity. No smoothing or outlier rejection is
/// applied, raw sensor noise propagates through all three orders.
#[derive(Debug, Default, Clone, Copy, Serialize)]
pub struct KinematicSample {
    /// Measured elevation above the reference surface.
    ///
    /// Units: meters
    pub elevation_m: f64,

    /// Change in elevation since the previous cycle.
    ///
    /// Units: meters/tick
    pub velocity_m_tick: f64,

    /// Change in velocity since the previous cycle.
    ///
    /// Units: meters/tick^2
    pub accel_m_tick2: f64,

    /// Change in acceleration since the previous cycle.
    ///
    /// Units: meters/tick^3
    pub jerk_m_tick3: f64,
}

/// Estimator retaining the previous cycle's sample.
///
/// Only one sample of history is kept, fully replaced on every update.
#[derive(Debug, Default)]
pub struct KinematicEstimator {
    prev: Option<KinematicSample>,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl KinematicEstimator {
    /// Update the estimate from a new elevation sample.
    ///
    /// On the very first call there is no prior state to difference against,
    /// so the previous sample is defined as the current one and all three
    /// derivatives are exactly zero.
    pub fn update(&mut self, elevation_m: f64) -> KinematicSample {
        let sample = match self.prev {
            Some(prev) => {
                let velocity_m_tick = elevation_m - prev.elevation_m;
                let accel_m_tick2 = velocity_m_tick - prev.velocity_m_tick;
                let jerk_m_tick3 = accel_m_tick2 - prev.accel_m_tick2;

                KinematicSample {
                    elevation_m,
                    velocity_m_tick,
                    accel_m_tick2,
                    jerk_m_tick3,
                }
            }
            None => KinematicSample {
                elevation_m,
                ..KinematicSample::default()
            },
        };

        // The current sample becomes the retained previous sample
        self.prev = Some(sample);

        sample
    }

    /// Get the elevation of the last accepted sample, if any.
    ///
    /// Used as the fallback value when the elevation sensor read is
    /// unavailable for a cycle.
    pub fn last_elevation_m(&self) -> Option<f64> {
        self.prev.map(|s| s.elevation_m)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

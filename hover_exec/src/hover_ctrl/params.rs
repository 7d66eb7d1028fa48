//! Parameters structure for HoverCtrl

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for Hover control.
///
/// The `Default` implementation carries the flight-proven tuning for the
/// reference vehicle, which assumes a 60 Hz cycle rate. The spring, damper
/// and PID gains are calibrated against per-tick kinematic differences, not
/// per-second rates, so retuning is required if the cycle rate changes.
#[derive(Debug, Deserialize)]
pub struct Params {
    // ---- PID COMPENSATOR ----

    /// Proportional gain of the jerk compensator.
    pub k_p: f64,

    /// Integral gain of the jerk compensator.
    pub k_i: f64,

    /// Derivative gain of the jerk compensator.
    pub k_d: f64,

    /// Time step of the jerk compensator.
    ///
    /// Units: seconds
    pub time_step_s: f64,

    // ---- SPRING-DAMPER BLEND ----

    /// Spring gain applied to the displacement error (target height minus
    /// measured elevation).
    pub spring_const: f64,

    /// Damping gain applied to the per-tick vertical velocity.
    pub damper_const: f64,

    // ---- OUTPUT SHAPING ----

    /// Minimum thrust percentage written to each thruster while hover is
    /// active. Strictly positive, so transient negative demands can never
    /// fully disable a thruster.
    pub min_thrust_floor: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            k_p: 3.0,
            k_i: 2.0,
            k_d: 1.0,
            time_step_s: 1.0 / 60.0,
            spring_const: 10.0,
            damper_const: 600.0,
            min_thrust_floor: 0.01,
        }
    }
}

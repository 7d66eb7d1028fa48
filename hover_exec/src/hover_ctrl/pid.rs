//! Fixed-step PID compensator
//!
//! This controller operates over a scalar error signal sampled at a fixed
//! time step, with an optional per-call step override. HoverCtrl feeds it the
//! per-tick jerk estimate, damping the high-frequency oscillation that a
//! displacement-only controller exhibits.
//!
//! The integral term is a plain rectangular accumulation with NO anti-windup
//! clamping. This is a deliberate simplicity tradeoff inherited from the
//! original tuning - the gains were calibrated against the unclamped
//! accumulator, so clamping must not be added without retuning.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use serde::Serialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// A PID controller over a scalar error signal.
#[derive(Debug, Serialize, Clone)]
pub struct Pid {
    /// Proportional gain
    k_p: f64,

    /// Integral gain
    k_i: f64,

    /// Derivative gain
    k_d: f64,

    /// Time step assumed between calls
    time_step_s: f64,

    /// Cached inverse of the time step
    inv_time_step_s: f64,

    /// The integral accumulation
    integral: f64,

    /// Previous error
    prev_error: f64,

    /// True until the first call after construction or reset
    first_run: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Pid {
    /// Create a new controller with the given gains and time step.
    pub fn new(k_p: f64, k_i: f64, k_d: f64, time_step_s: f64) -> Self {
        Self {
            k_p,
            k_i,
            k_d,
            time_step_s,
            inv_time_step_s: 1.0 / time_step_s,
            integral: 0.0,
            prev_error: 0.0,
            first_run: true,
        }
    }

    /// Get the value of the controller for the given error.
    ///
    /// `time_step_s` overrides the stored time step for this and all
    /// subsequent calls; passing `None` reuses the stored step.
    ///
    /// On the first call after construction or `reset` the derivative term is
    /// forced to zero, as there is no valid previous error to difference
    /// against.
    pub fn control(&mut self, error: f64, time_step_s: Option<f64>) -> f64 {
        // Adopt the step override before computing, so the cached inverse is
        // consistent for this call
        if let Some(step) = time_step_s {
            if step != self.time_step_s {
                self.time_step_s = step;
                self.inv_time_step_s = 1.0 / step;
            }
        }

        // Compute derivative term
        let mut error_derivative = (error - self.prev_error) * self.inv_time_step_s;

        if self.first_run {
            error_derivative = 0.0;
            self.first_run = false;
        }

        // Accumulate the integral term (rectangular)
        self.integral += error * self.time_step_s;

        // Store this error as last error
        self.prev_error = error;

        // Construct output
        self.k_p * error + self.k_i * self.integral + self.k_d * error_derivative
    }

    /// Reset the controller to its just-constructed state.
    ///
    /// Zeroes the integral accumulator and previous error, and re-arms the
    /// first-run flag so the next call suppresses the derivative term.
    pub fn reset(&mut self) {
        self.integral = 0.0;
        self.prev_error = 0.0;
        self.first_run = true;
    }
}

impl Default for Pid {
    fn default() -> Self {
        // Inert controller, replaced at module init. The unit step avoids a
        // division by zero in the cached inverse.
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    const DT: f64 = 1.0 / 60.0;

    #[test]
    fn test_first_call_suppresses_derivative() {
        let mut pid = Pid::new(0.0, 0.0, 1.0, DT);

        // Pure-D controller: first call must be exactly zero even with a
        // large error
        assert_eq!(pid.control(100.0, None), 0.0);

        // Second call with the same error has zero derivative too
        assert_eq!(pid.control(100.0, None), 0.0);

        // A changing error now produces a nonzero derivative: 1.0 / dt
        let out = pid.control(101.0, None);
        assert!((out - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_integral_grows_linearly() {
        let mut pid = Pid::new(0.0, 1.0, 0.0, DT);

        // Pure-I controller with constant error: output after n calls is
        // n * e * dt
        let e = 3.0;
        for n in 1..=20 {
            let out = pid.control(e, None);
            assert!((out - (n as f64) * e * DT).abs() < 1e-12);
        }
    }

    #[test]
    fn test_proportional_term() {
        let mut pid = Pid::new(2.5, 0.0, 0.0, DT);
        assert_eq!(pid.control(4.0, None), 10.0);
    }

    #[test]
    fn test_reset_reproduces_first_call() {
        let mut pid = Pid::new(1.0, 1.0, 1.0, DT);

        let first = pid.control(5.0, None);
        pid.control(7.0, None);
        pid.control(-2.0, None);

        pid.reset();

        // After reset the controller behaves exactly as freshly constructed:
        // zero derivative, integral restarted from e*dt
        assert_eq!(pid.control(5.0, None), first);
    }

    #[test]
    fn test_step_override_is_sticky() {
        let mut pid = Pid::new(0.0, 1.0, 0.0, 1.0);

        // Override the step to 0.5 s, integral = e * 0.5
        assert!((pid.control(1.0, Some(0.5)) - 0.5).abs() < 1e-12);

        // Subsequent call without an explicit step reuses the override
        assert!((pid.control(1.0, None) - 1.0).abs() < 1e-12);
    }
}

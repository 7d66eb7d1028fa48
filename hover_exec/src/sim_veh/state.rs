//! Implementations for the simulated vehicle state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
use super::Params;
use util::maths::clamp;
use veh_if::eqpt::sensors::SensorData;
use veh_if::eqpt::thruster::{ThrustDem, ThrusterDems, ThrusterReadings};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Simulated vehicle state
pub struct SimVeh {
    params: Params,

    /// Elevation above the reference surface.
    ///
    /// Units: meters
    elevation_m: f64,

    /// Vertical velocity, positive up.
    ///
    /// Units: meters/second
    velocity_ms: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl SimVeh {
    /// Create a new simulated vehicle from the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            elevation_m: params.initial_elevation_m,
            velocity_ms: 0.0,
            params,
        }
    }

    /// Sample the vehicle's sensors.
    ///
    /// The elevation reading is unavailable above the sensor range, which is
    /// how the real altimeter behaves with no reference surface in range.
    pub fn sensors(&self) -> SensorData {
        let elevation_m = if self.elevation_m <= self.params.sensor_range_m {
            Some(self.elevation_m)
        } else {
            None
        };

        SensorData {
            gravity_mss: self.params.gravity_mss,
            mass_kg: self.params.mass_kg,
            elevation_m,
        }
    }

    /// Read the thruster bank.
    pub fn thruster_readings(&self) -> ThrusterReadings {
        ThrusterReadings {
            max_eff_thrust_n: self.params.thruster_max_eff_thrust_n.clone(),
        }
    }

    /// Integrate the vehicle under the given thrust demands for one step.
    ///
    /// This is where the hardware clamping lives: percentages outside [0, 1]
    /// and raw forces outside the thruster's capacity are saturated before
    /// they produce force.
    pub fn step(&mut self, dems: &ThrusterDems, dt_s: f64) {
        let mut total_thrust_n = 0.0;

        for (i, dem) in dems.dems.iter().enumerate() {
            let max_n = match self.params.thruster_max_eff_thrust_n.get(i) {
                Some(m) => *m,
                None => continue,
            };

            total_thrust_n += match *dem {
                ThrustDem::Pct(p) => clamp(&p, &0.0, &1.0) * max_n,
                ThrustDem::Force(f) => clamp(&f, &0.0, &max_n),
            };
        }

        let accel_mss = total_thrust_n / self.params.mass_kg - self.params.gravity_mss;

        self.velocity_ms += accel_mss * dt_s;
        self.elevation_m += self.velocity_ms * dt_s;

        // Ground contact
        if self.elevation_m < 0.0 {
            self.elevation_m = 0.0;
            self.velocity_ms = 0.0;
        }
    }

    /// Get the true elevation of the vehicle in meters.
    pub fn elevation_m(&self) -> f64 {
        self.elevation_m
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

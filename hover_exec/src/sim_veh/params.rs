//! Parameters structure for the simulated vehicle

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use serde::Deserialize;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Parameters for the simulated vehicle.
#[derive(Debug, Deserialize)]
pub struct Params {
    /// Physical mass of the vehicle.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    /// Magnitude of the gravity acceleration.
    ///
    /// Units: meters/second^2
    pub gravity_mss: f64,

    /// Maximum effective thrust of each upward-facing thruster.
    ///
    /// Units: newtons
    pub thruster_max_eff_thrust_n: Vec<f64>,

    /// Elevation above the reference surface at the start of the run.
    ///
    /// Units: meters
    pub initial_elevation_m: f64,

    /// Maximum range of the elevation sensor. Above this the elevation
    /// reading is unavailable.
    ///
    /// Units: meters
    pub sensor_range_m: f64,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl Default for Params {
    fn default() -> Self {
        Params {
            mass_kg: 1000.0,
            gravity_mss: 9.81,
            thruster_max_eff_thrust_n: vec![6000.0, 6000.0],
            initial_elevation_m: 0.0,
            sensor_range_m: 1000.0,
        }
    }
}

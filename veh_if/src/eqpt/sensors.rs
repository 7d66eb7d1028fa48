//! # Vehicle sensor data

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Physical state of the vehicle sampled once at the start of each cycle.
///
/// This data is read-only to the control modules.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy)]
pub struct SensorData {
    /// Magnitude of the natural gravity acceleration at the vehicle.
    ///
    /// Units: meters/second^2
    pub gravity_mss: f64,

    /// Physical mass of the vehicle, including cargo.
    ///
    /// Units: kilograms
    pub mass_kg: f64,

    /// Elevation of the vehicle above the reference surface, or `None` if no
    /// reference surface is in sensor range.
    ///
    /// Units: meters
    pub elevation_m: Option<f64>,
}

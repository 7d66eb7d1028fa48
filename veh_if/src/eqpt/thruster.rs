//! # Thruster bank readings and demands

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use serde::{Deserialize, Serialize};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Per-cycle reading of the upward-facing thruster bank.
///
/// The maximum effective thrust of a thruster may change from cycle to cycle
/// with damage, orientation or atmosphere, so a fresh reading is supplied on
/// every cycle.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct ThrusterReadings {
    /// Maximum effective thrust of each thruster in the bank.
    ///
    /// Units: newtons
    pub max_eff_thrust_n: Vec<f64>,
}

/// Demands that are sent to the thruster bank for execution.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct ThrusterDems {
    /// The demanded override for each thruster, in the same order as the
    /// readings the demands were calculated from.
    pub dems: Vec<ThrustDem>,
}

// ------------------------------------------------------------------------------------------------
// ENUMS
// ------------------------------------------------------------------------------------------------

/// An override demand for a single thruster.
///
/// The controller writes exactly one of the two forms per thruster per cycle,
/// never both.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum ThrustDem {
    /// Thrust as a fraction of the thruster's maximum effective thrust.
    ///
    /// Values above 1.0 are passed through unchanged, any hardware clamping
    /// is the thruster's responsibility.
    Pct(f64),

    /// Raw thrust force.
    ///
    /// Units: newtons
    Force(f64),
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl ThrusterReadings {
    /// Get the number of thrusters in the bank.
    pub fn num_thrusters(&self) -> usize {
        self.max_eff_thrust_n.len()
    }

    /// Get the total maximum effective thrust of the bank in newtons.
    pub fn total_max_eff_thrust_n(&self) -> f64 {
        self.max_eff_thrust_n.iter().sum()
    }
}

impl ThrusterDems {
    /// Build a demand set commanding all `num` thrusters to the same
    /// percentage override.
    pub fn all_pct(num: usize, pct: f64) -> Self {
        Self {
            dems: vec![ThrustDem::Pct(pct); num],
        }
    }

    /// Build a demand set commanding all `num` thrusters to zero raw force.
    pub fn all_zero_force(num: usize) -> Self {
        Self {
            dems: vec![ThrustDem::Force(0.0); num],
        }
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_total_max_eff_thrust() {
        let readings = ThrusterReadings {
            max_eff_thrust_n: vec![6000.0, 6000.0],
        };
        assert_eq!(readings.num_thrusters(), 2);
        assert_eq!(readings.total_max_eff_thrust_n(), 12000.0);

        let empty = ThrusterReadings::default();
        assert_eq!(empty.total_max_eff_thrust_n(), 0.0);
    }

    #[test]
    fn test_dem_builders() {
        let dems = ThrusterDems::all_pct(3, 0.5);
        assert_eq!(dems.dems, vec![ThrustDem::Pct(0.5); 3]);

        let dems = ThrusterDems::all_zero_force(2);
        assert_eq!(dems.dems, vec![ThrustDem::Force(0.0); 2]);
    }
}

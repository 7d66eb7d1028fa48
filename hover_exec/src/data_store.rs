//! # Data Store

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use crate::hover_ctrl;
use veh_if::eqpt::thruster::ThrusterDems;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Global data store for the executable.
#[derive(Default)]
pub struct DataStore {
    // Cycle management
    /// Number of cycles already executed
    pub num_cycles: u128,

    /// True if this cycle falls on a 1Hz boundary
    pub is_1_hz_cycle: bool,

    /// Simulation elapsed time
    pub sim_time_s: f64,

    // HoverCtrl
    pub hover_ctrl: hover_ctrl::HoverCtrl,
    pub hover_ctrl_input: hover_ctrl::InputData,
    pub hover_ctrl_output: ThrusterDems,
    pub hover_ctrl_status_rpt: hover_ctrl::StatusReport,

    // Monitoring Counters
    /// Number of consecutive cycle overruns
    pub num_consec_cycle_overruns: u64,
}

// ---------------------------------------------------------------------------
// IMPLS
// ---------------------------------------------------------------------------

impl DataStore {
    /// Perform the start of cycle updates.
    ///
    /// Clears items which are wiped at the start of each cycle and advances
    /// the cycle bookkeeping.
    pub fn cycle_start(&mut self, cycle_frequency_hz: f64) {
        // Commands are one-shot, a TC left over from the previous cycle must
        // not execute twice. The continuous operator input is NOT cleared, it
        // holds until the next adjust command.
        self.hover_ctrl_input.tc = None;

        self.is_1_hz_cycle = self.num_cycles % (cycle_frequency_hz as u128) == 0;

        self.sim_time_s = self.num_cycles as f64 / cycle_frequency_hz;
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use veh_if::tc::Tc;

    #[test]
    fn test_cycle_start_clears_tc() {
        let mut ds = DataStore::default();
        ds.hover_ctrl_input.tc = Some(Tc::ToggleHover);

        ds.cycle_start(60.0);
        assert!(ds.hover_ctrl_input.tc.is_none());
    }

    #[test]
    fn test_1_hz_boundary() {
        let mut ds = DataStore::default();

        ds.cycle_start(60.0);
        assert!(ds.is_1_hz_cycle);

        ds.num_cycles = 30;
        ds.cycle_start(60.0);
        assert!(!ds.is_1_hz_cycle);

        ds.num_cycles = 60;
        ds.cycle_start(60.0);
        assert!(ds.is_1_hz_cycle);
        assert!((ds.sim_time_s - 1.0).abs() < 1e-12);
    }
}

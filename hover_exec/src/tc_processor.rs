//! # Telecommand processor module
//!
//! The telecommand processor handles commands coming from any source (timed
//! script or interactive console) and routes them to the modules.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{debug, warn};

// Internal
use crate::data_store::DataStore;
use veh_if::tc::Tc;

// ---------------------------------------------------------------------------
// PUBLIC FUNCTIONS
// ---------------------------------------------------------------------------

/// Execute a telecommand.
///
/// Mutates the datastore to send commands to different modules.
pub fn exec(ds: &mut DataStore, tc: &Tc) {
    debug!("Executing TC: {:?}", tc);

    match *tc {
        // The continuous manual adjustment rate holds until the next Adjust,
        // standing in for the cockpit stick. It is not a one-shot command so
        // it bypasses the TC slot.
        Tc::Adjust(rate_m_tick) => ds.hover_ctrl_input.operator_input = rate_m_tick,

        // All other commands are hover control mode transitions
        _ => ds.hover_ctrl_input.tc = Some(*tc),
    }
}

/// Parse and execute a raw command line.
///
/// A line which fails to parse produces a status line and no state change,
/// malformed input is never fatal.
pub fn exec_line(ds: &mut DataStore, line: &str) {
    match Tc::from_line(line) {
        Ok(tc) => exec(ds, &tc),
        Err(e) => warn!("{}", e),
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_exec_line_routes_to_hover_ctrl() {
        let mut ds = DataStore::default();

        exec_line(&mut ds, "setHeight 25");
        assert_eq!(ds.hover_ctrl_input.tc, Some(Tc::SetHeight(25.0)));
    }

    #[test]
    fn test_adjust_sets_continuous_input() {
        let mut ds = DataStore::default();

        // The rate lands on the continuous channel, not the TC slot
        exec_line(&mut ds, "adjust 0.05");
        assert!(ds.hover_ctrl_input.tc.is_none());
        assert_eq!(ds.hover_ctrl_input.operator_input, 0.05);

        // It holds across cycle boundaries until the next adjust
        ds.cycle_start(60.0);
        assert_eq!(ds.hover_ctrl_input.operator_input, 0.05);

        exec_line(&mut ds, "adjust 0");
        assert_eq!(ds.hover_ctrl_input.operator_input, 0.0);
    }

    #[test]
    fn test_manual_adjust_reaches_the_controller() {
        use util::module::State;
        use veh_if::eqpt::sensors::SensorData;
        use veh_if::eqpt::thruster::ThrusterReadings;

        let mut ds = DataStore::default();
        ds.hover_ctrl_input.sensors = SensorData {
            gravity_mss: 9.81,
            mass_kg: 1000.0,
            elevation_m: Some(10.0),
        };
        ds.hover_ctrl_input.thrusters = ThrusterReadings {
            max_eff_thrust_n: vec![6000.0, 6000.0],
        };

        // Enable hover, then manual adjust, then command a climb rate, one
        // command per cycle as the main loop would
        for line in &["toggleHover", "manualMode", "adjust 0.5"] {
            ds.cycle_start(60.0);
            exec_line(&mut ds, line);
            let (_, rpt) = ds.hover_ctrl.proc(&ds.hover_ctrl_input).unwrap();
            ds.hover_ctrl_status_rpt = rpt;
        }

        // The adjust cycle moved the target by one rate step
        assert_eq!(ds.hover_ctrl_status_rpt.target_height_m, 10.5);

        // The rate holds with no further commands
        ds.cycle_start(60.0);
        let (_, rpt) = ds.hover_ctrl.proc(&ds.hover_ctrl_input).unwrap();
        assert_eq!(rpt.target_height_m, 11.0);
    }

    #[test]
    fn test_malformed_line_leaves_state_unchanged() {
        let mut ds = DataStore::default();

        exec_line(&mut ds, "wibble 42");
        assert!(ds.hover_ctrl_input.tc.is_none());

        exec_line(&mut ds, "setHeight ten");
        assert!(ds.hover_ctrl_input.tc.is_none());
    }
}

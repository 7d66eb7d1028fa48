//! Implementations for the HoverCtrl state structure

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use log::{trace, warn};
use serde::Serialize;

// Internal
use super::{
    HoverCtrlError, KinematicEstimator, KinematicSample, ModeState, Params, Pid,
    DEFAULT_TARGET_HEIGHT_M,
};
use util::{
    archive::{Archived, Archiver},
    module::State,
    params,
    session::Session,
};
use veh_if::{
    eqpt::sensors::SensorData,
    eqpt::thruster::{ThrusterDems, ThrusterReadings},
    tc::Tc,
};

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Hover control module state
#[derive(Default)]
pub struct HoverCtrl {
    pub(crate) params: Params,

    /// Operator-controlled mode state
    pub(crate) mode: ModeState,

    /// Kinematic estimator retaining the previous cycle's sample
    kin_est: KinematicEstimator,

    /// Jerk compensator
    pid: Pid,

    /// The kinematic sample of the current cycle
    kin: KinematicSample,
    arch_kin: Archiver,

    pub(crate) report: StatusReport,
    arch_report: Archiver,

    output: Option<ThrusterDems>,
}

/// Input data to Hover Control.
#[derive(Default, Clone)]
pub struct InputData {
    /// The telecommand to be executed, or `None` if there is no new command
    /// on this cycle.
    pub tc: Option<Tc>,

    /// Continuous manual height adjustment rate, applied to the target
    /// height each cycle while manual adjust mode is set. Held between
    /// cycles until the operator commands a new rate.
    ///
    /// Units: meters/tick
    pub operator_input: f64,

    /// Physical state of the vehicle sampled at the start of this cycle.
    pub sensors: SensorData,

    /// Reading of the thruster bank taken at the start of this cycle.
    pub thrusters: ThrusterReadings,
}

/// Status report for HoverCtrl processing.
///
/// The per-cycle status display lines are rendered from this report.
#[derive(Clone, Default, Serialize, Debug)]
pub struct StatusReport {
    /// True if hover mode was active this cycle.
    pub hover_enabled: bool,

    /// True if manual height adjustment was active this cycle.
    pub manual_adjust: bool,

    /// Thrust-to-weight ratio of the bank. Informational, refreshed when the
    /// mix runs and held at the last mixed value otherwise.
    pub t2w: f64,

    /// The target levitation height after clamping and manual adjustment.
    ///
    /// Units: meters
    pub target_height_m: f64,

    /// The elevation used by the mix this cycle.
    ///
    /// Units: meters
    pub true_height_m: f64,

    /// The thrust percentage written to every thruster.
    pub thrust_pct: f64,

    /// True if the raw thrust percentage fell below the minimum floor and was
    /// raised to it.
    pub floor_applied: bool,

    /// True if the mix was skipped because the total thrust capacity or the
    /// vehicle weight was degenerate (zero or non-finite).
    pub degenerate_mix: bool,

    /// True if the elevation reading was unavailable and the previous sample
    /// (or zero) was used instead.
    pub elevation_fallback: bool,
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl State for HoverCtrl {
    type InitData = &'static str;
    type InitError = HoverCtrlError;

    type InputData = InputData;
    type OutputData = ThrusterDems;
    type StatusReport = StatusReport;
    type ProcError = HoverCtrlError;

    /// Initialise the HoverCtrl module.
    ///
    /// Expected init data is the path to the parameter file
    fn init(&mut self, init_data: Self::InitData, session: &Session) -> Result<(), Self::InitError> {
        // Load the parameters and rebuild the module around them
        let params = params::load(init_data)?;
        *self = Self::with_params(params)?;

        // Create the arch folder for hover_ctrl
        let mut arch_path = session.arch_root.clone();
        arch_path.push("hover_ctrl");
        std::fs::create_dir_all(arch_path).map_err(HoverCtrlError::ArchiveInitError)?;

        // Initialise the archivers. Failure leaves the default (dropping)
        // archiver in place, which is not worth failing the init over.
        if let Ok(a) = Archiver::from_path(session, "hover_ctrl/kinematics.csv") {
            self.arch_kin = a;
        }
        if let Ok(a) = Archiver::from_path(session, "hover_ctrl/status_report.csv") {
            self.arch_report = a;
        }

        Ok(())
    }

    /// Perform cyclic processing of Hover Control.
    ///
    /// The full control cycle runs synchronously here: mode transition from
    /// this cycle's telecommand, target clamping and manual adjustment,
    /// elevation fallback, kinematic estimation, jerk PID and the thrust mix.
    fn proc(
        &mut self,
        input_data: &Self::InputData,
    ) -> Result<(Self::OutputData, Self::StatusReport), Self::ProcError> {
        // Clear the status report. The thrust-to-weight ratio survives the
        // clear so that the status display keeps echoing the last mixed
        // value on cycles where the mix does not run.
        let last_t2w = self.report.t2w;
        self.report = StatusReport::default();
        self.report.t2w = last_t2w;

        // Apply this cycle's mode transition, if a command arrived. Dispatch
        // happens before any read of the mode state, so a command and its
        // effect are observed in the same cycle.
        if let Some(ref tc) = input_data.tc {
            self.mode = self.mode.apply_tc(tc);
        }

        let num_thrusters = input_data.thrusters.num_thrusters();

        // With hover disabled every thruster is forced to zero raw override
        // and no estimator/PID processing occurs
        if !self.mode.hover_enabled {
            self.report.manual_adjust = self.mode.manual_adjust;
            self.report.target_height_m = self.mode.target_height_m;
            self.report.true_height_m = input_data
                .sensors
                .elevation_m
                .or_else(|| self.kin_est.last_elevation_m())
                .unwrap_or(0.0);

            let dems = ThrusterDems::all_zero_force(num_thrusters);
            self.output = Some(dems.clone());
            return Ok((dems, self.report.clone()));
        }

        self.report.hover_enabled = true;
        self.report.manual_adjust = self.mode.manual_adjust;

        // While hover is active the target can never sit below the default
        // height floor
        if self.mode.target_height_m < DEFAULT_TARGET_HEIGHT_M {
            self.mode.target_height_m = DEFAULT_TARGET_HEIGHT_M;
        }

        // Continuous manual height adjustment
        if self.mode.manual_adjust {
            self.mode.target_height_m += input_data.operator_input;
        }

        self.report.target_height_m = self.mode.target_height_m;

        // An unavailable elevation reading falls back to the last accepted
        // sample (or zero before any sample exists) rather than failing the
        // cycle
        let elevation_m = match input_data.sensors.elevation_m {
            Some(e) => e,
            None => {
                self.report.elevation_fallback = true;
                self.kin_est.last_elevation_m().unwrap_or(0.0)
            }
        };
        self.report.true_height_m = elevation_m;

        // Degenerate-divisor policy: with no usable thrust capacity or no
        // weight the mix is skipped for the cycle and all thrusters are
        // commanded to zero raw override. Estimator and PID state are left
        // untouched so a transient degenerate cycle has no control history
        // side effects.
        let total_thrust_n = input_data.thrusters.total_max_eff_thrust_n();
        let weight_n = input_data.sensors.gravity_mss * input_data.sensors.mass_kg;

        if total_thrust_n <= 0.0 || weight_n <= 0.0 || !weight_n.is_finite() {
            warn!(
                "Degenerate thrust mix skipped (total capacity {} N, weight {} N)",
                total_thrust_n, weight_n
            );
            self.report.degenerate_mix = true;

            let dems = ThrusterDems::all_zero_force(num_thrusters);
            self.output = Some(dems.clone());
            return Ok((dems, self.report.clone()));
        }

        // Estimate the vertical kinematics from the new elevation sample
        self.kin = self.kin_est.update(elevation_m);

        // The PID compensator operates on the jerk estimate
        let pid_correction = self.pid.control(self.kin.jerk_m_tick3, None);

        // Mix the thrust demands
        let dems = self.calc_thrust_dems(
            input_data.sensors,
            elevation_m,
            self.kin,
            pid_correction,
            &input_data.thrusters,
        );

        trace!(
            "HoverCtrl output: pct {:.4} across {} thrusters (T2W {:.3})",
            self.report.thrust_pct,
            num_thrusters,
            self.report.t2w
        );

        self.output = Some(dems.clone());

        Ok((dems, self.report.clone()))
    }
}

impl HoverCtrl {
    /// Build a module around the given parameters, without session archiving.
    ///
    /// `init` performs the same construction after loading the parameter
    /// file; this entry point exists so the module can be driven directly in
    /// unit tests.
    pub fn with_params(params: Params) -> Result<Self, HoverCtrlError> {
        if params.time_step_s <= 0.0 {
            return Err(HoverCtrlError::InvalidParam("time_step_s must be positive"));
        }
        if params.min_thrust_floor <= 0.0 {
            return Err(HoverCtrlError::InvalidParam(
                "min_thrust_floor must be strictly positive",
            ));
        }

        let pid = Pid::new(params.k_p, params.k_i, params.k_d, params.time_step_s);

        Ok(HoverCtrl {
            pid,
            params,
            ..HoverCtrl::default()
        })
    }

    /// Get the current mode state.
    pub fn mode(&self) -> &ModeState {
        &self.mode
    }

    /// Restore the mode state from a persisted storage blob.
    ///
    /// Called once at startup, before the first cycle.
    pub fn restore_mode(&mut self, blob: &str) {
        self.mode = ModeState::decode(blob);
    }
}

impl Archived for HoverCtrl {
    fn write(&mut self) -> Result<(), Box<dyn std::error::Error>> {
        self.arch_kin.serialise(self.kin)?;
        self.arch_report.serialise(self.report.clone())?;

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use veh_if::eqpt::thruster::ThrustDem;

    /// Build an input for a vehicle of the given mass in the given gravity,
    /// with two healthy 6 kN thrusters.
    fn input(elevation_m: Option<f64>, gravity_mss: f64, mass_kg: f64) -> InputData {
        InputData {
            tc: None,
            operator_input: 0.0,
            sensors: SensorData {
                gravity_mss,
                mass_kg,
                elevation_m,
            },
            thrusters: ThrusterReadings {
                max_eff_thrust_n: vec![6000.0, 6000.0],
            },
        }
    }

    fn hovering_ctrl() -> HoverCtrl {
        let mut ctrl = HoverCtrl::with_params(Params::default()).unwrap();
        ctrl.restore_mode("True;False;10");
        ctrl
    }

    #[test]
    fn test_pure_weight_compensation() {
        // Target 10, elevation 10, no motion: the thrust percentage reduces
        // exactly to weight / total capacity = 9810 / 12000 = 0.8175
        let mut ctrl = hovering_ctrl();

        let (dems, report) = ctrl.proc(&input(Some(10.0), 9.81, 1000.0)).unwrap();

        assert!((report.thrust_pct - 0.8175).abs() < 1e-12);
        assert!((report.t2w - 12000.0 / 9810.0).abs() < 1e-12);
        assert!(!report.floor_applied);
        for dem in dems.dems {
            match dem {
                ThrustDem::Pct(p) => assert!((p - 0.8175).abs() < 1e-12),
                _ => panic!("expected a percentage demand"),
            }
        }
    }

    #[test]
    fn test_thrust_floor() {
        // Vehicle far above the target: raw demand is strongly negative, but
        // the written percentage never drops below the floor
        let mut ctrl = hovering_ctrl();

        let (dems, report) = ctrl.proc(&input(Some(100.0), 9.81, 1000.0)).unwrap();

        assert!(report.floor_applied);
        assert_eq!(report.thrust_pct, ctrl.params.min_thrust_floor);
        assert_eq!(
            dems.dems,
            vec![ThrustDem::Pct(ctrl.params.min_thrust_floor); 2]
        );
    }

    #[test]
    fn test_hover_disabled_zeroes_raw_overrides() {
        let mut ctrl = HoverCtrl::with_params(Params::default()).unwrap();

        let (dems, report) = ctrl.proc(&input(Some(10.0), 9.81, 1000.0)).unwrap();

        assert!(!report.hover_enabled);
        assert_eq!(dems.dems, vec![ThrustDem::Force(0.0); 2]);

        // Estimator state untouched: no sample was accepted
        assert_eq!(ctrl.kin_est.last_elevation_m(), None);
    }

    #[test]
    fn test_target_clamped_to_default_floor() {
        // setHeight -5 followed by a hover-enabled cycle resolves the target
        // to the default height, not -5
        let mut ctrl = hovering_ctrl();

        let mut inp = input(Some(10.0), 9.81, 1000.0);
        inp.tc = Some(Tc::SetHeight(-5.0));

        let (_, report) = ctrl.proc(&inp).unwrap();
        assert_eq!(report.target_height_m, DEFAULT_TARGET_HEIGHT_M);
    }

    #[test]
    fn test_manual_adjust_moves_target() {
        let mut ctrl = HoverCtrl::with_params(Params::default()).unwrap();
        ctrl.restore_mode("True;True;15");

        let mut inp = input(Some(15.0), 9.81, 1000.0);
        inp.operator_input = 1.0;

        let (_, report) = ctrl.proc(&inp).unwrap();
        assert_eq!(report.target_height_m, 16.0);

        // Manual adjust off: the operator input is ignored
        let mut ctrl = hovering_ctrl();
        let mut inp = input(Some(10.0), 9.81, 1000.0);
        inp.operator_input = 1.0;
        let (_, report) = ctrl.proc(&inp).unwrap();
        assert_eq!(report.target_height_m, 10.0);
    }

    #[test]
    fn test_degenerate_capacity_skips_mix() {
        let mut ctrl = hovering_ctrl();

        let mut inp = input(Some(10.0), 9.81, 1000.0);
        inp.thrusters.max_eff_thrust_n = vec![0.0, 0.0];

        let (dems, report) = ctrl.proc(&inp).unwrap();

        assert!(report.degenerate_mix);
        assert_eq!(dems.dems, vec![ThrustDem::Force(0.0); 2]);

        // No estimator update on a degenerate cycle
        assert_eq!(ctrl.kin_est.last_elevation_m(), None);
    }

    #[test]
    fn test_degenerate_gravity_skips_mix() {
        let mut ctrl = hovering_ctrl();

        let (dems, report) = ctrl.proc(&input(Some(10.0), 0.0, 1000.0)).unwrap();

        assert!(report.degenerate_mix);
        assert_eq!(dems.dems, vec![ThrustDem::Force(0.0); 2]);
    }

    #[test]
    fn test_elevation_fallback() {
        let mut ctrl = hovering_ctrl();

        // First cycle accepts a reading
        let (_, report) = ctrl.proc(&input(Some(12.0), 9.81, 1000.0)).unwrap();
        assert!(!report.elevation_fallback);

        // Second cycle has no reading: the previous sample is reused, so the
        // estimated velocity is zero
        let (_, report) = ctrl.proc(&input(None, 9.81, 1000.0)).unwrap();
        assert!(report.elevation_fallback);
        assert_eq!(report.true_height_m, 12.0);
        assert_eq!(ctrl.kin.velocity_m_tick, 0.0);
    }

    #[test]
    fn test_t2w_held_across_disabled_cycles() {
        let mut ctrl = hovering_ctrl();
        ctrl.proc(&input(Some(10.0), 9.81, 1000.0)).unwrap();

        // Disabling hover skips the mix, but the displayed ratio keeps the
        // last mixed value
        let mut inp = input(Some(10.0), 9.81, 1000.0);
        inp.tc = Some(Tc::ToggleHover);

        let (_, report) = ctrl.proc(&inp).unwrap();
        assert!(!report.hover_enabled);
        assert!((report.t2w - 12000.0 / 9810.0).abs() < 1e-12);
    }

    #[test]
    fn test_toggle_hover_takes_effect_same_cycle() {
        let mut ctrl = HoverCtrl::with_params(Params::default()).unwrap();

        let mut inp = input(Some(10.0), 9.81, 1000.0);
        inp.tc = Some(Tc::ToggleHover);

        // The toggle lands before the mix reads the mode state
        let (dems, report) = ctrl.proc(&inp).unwrap();
        assert!(report.hover_enabled);
        assert!(matches!(dems.dems[0], ThrustDem::Pct(_)));
    }
}

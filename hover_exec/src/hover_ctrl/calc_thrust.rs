//! Thrust mix calculations

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal imports
use super::{HoverCtrl, KinematicSample};
use veh_if::eqpt::sensors::SensorData;
use veh_if::eqpt::thruster::{ThrusterDems, ThrusterReadings};

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl HoverCtrl {
    /// Perform the thrust mix calculations.
    ///
    /// Combines static weight compensation, inertial compensation against the
    /// current vertical acceleration, and the spring-damper + PID correction
    /// term scaled by the thrust-to-weight ratio, into one normalised thrust
    /// percentage applied uniformly across the bank.
    ///
    /// The caller has already rejected degenerate divisors (zero capacity or
    /// zero weight), so the divisions here are well defined.
    pub(crate) fn calc_thrust_dems(
        &mut self,
        sensors: SensorData,
        elevation_m: f64,
        kin: KinematicSample,
        pid_correction: f64,
        thrusters: &ThrusterReadings,
    ) -> ThrusterDems {
        let total_thrust_n = thrusters.total_max_eff_thrust_n();

        // Thrust to weight ratio of the bank. Reported for display and used
        // as a scaling factor in the mix.
        let t2w = total_thrust_n / (sensors.gravity_mss * sensors.mass_kg);

        // Positive displacement means the vehicle is below the target
        let displacement_m = self.mode.target_height_m - elevation_m;

        // Total demanded force:
        //   - mass * gravity holds the static weight
        //   - mass * acceleration opposes the current vertical acceleration
        //   - the spring-damper term on displacement/velocity plus the jerk
        //     PID correction, scaled by T2W and mass
        let demanded_force_n = sensors.mass_kg * sensors.gravity_mss
            + kin.accel_m_tick2 * sensors.mass_kg
            + (displacement_m * self.params.spring_const
                - kin.velocity_m_tick * self.params.damper_const
                + pid_correction)
                * t2w
                * sensors.mass_kg;

        // Demanded force over the bank's total capacity. Deliberately not
        // capped above: values over 1.0 pass through and any hardware
        // clamping is the thruster's responsibility.
        let thrust_pct = demanded_force_n / total_thrust_n;

        // The floor keeps every thruster alight through transient negative
        // demands
        let floored_pct = thrust_pct.max(self.params.min_thrust_floor);

        self.report.t2w = t2w;
        self.report.thrust_pct = floored_pct;
        self.report.floor_applied = floored_pct > thrust_pct;

        ThrusterDems::all_pct(thrusters.num_thrusters(), floored_pct)
    }
}

// ---------------------------------------------------------------------------
// TESTS
// ---------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::super::Params;
    use super::*;
    use veh_if::eqpt::thruster::ThrustDem;

    fn test_ctrl(target_height_m: f64) -> HoverCtrl {
        let mut ctrl = HoverCtrl::with_params(Params::default()).unwrap();
        ctrl.restore_mode(&format!("true;false;{}", target_height_m));
        ctrl
    }

    fn sensors(gravity_mss: f64, mass_kg: f64) -> SensorData {
        SensorData {
            gravity_mss,
            mass_kg,
            elevation_m: None,
        }
    }

    fn bank(max_n: f64, num: usize) -> ThrusterReadings {
        ThrusterReadings {
            max_eff_thrust_n: vec![max_n; num],
        }
    }

    #[test]
    fn test_static_mix_is_weight_over_capacity() {
        let mut ctrl = test_ctrl(10.0);

        // Zero displacement, velocity, acceleration and correction: the mix
        // is pure weight compensation
        let dems = ctrl.calc_thrust_dems(
            sensors(9.81, 1000.0),
            10.0,
            KinematicSample::default(),
            0.0,
            &bank(6000.0, 2),
        );

        assert!((ctrl.report.thrust_pct - 0.8175).abs() < 1e-12);
        assert_eq!(dems.dems.len(), 2);
    }

    #[test]
    fn test_displacement_raises_demand() {
        let mut ctrl = test_ctrl(20.0);

        // Vehicle 5 m below target: the spring term pushes the demand above
        // pure weight compensation
        ctrl.calc_thrust_dems(
            sensors(9.81, 1000.0),
            15.0,
            KinematicSample::default(),
            0.0,
            &bank(6000.0, 2),
        );
        let below_pct = ctrl.report.thrust_pct;

        ctrl.calc_thrust_dems(
            sensors(9.81, 1000.0),
            20.0,
            KinematicSample::default(),
            0.0,
            &bank(6000.0, 2),
        );
        let on_target_pct = ctrl.report.thrust_pct;

        assert!(below_pct > on_target_pct);
    }

    #[test]
    fn test_upward_velocity_damps_demand() {
        let mut ctrl = test_ctrl(10.0);

        let kin = KinematicSample {
            elevation_m: 10.0,
            velocity_m_tick: 0.1,
            ..KinematicSample::default()
        };

        ctrl.calc_thrust_dems(sensors(9.81, 1000.0), 10.0, kin, 0.0, &bank(6000.0, 2));

        // Climbing at the target: the damper term pulls the demand below
        // pure weight compensation
        assert!(ctrl.report.thrust_pct < 0.8175);
    }

    #[test]
    fn test_no_upper_cap() {
        let mut ctrl = test_ctrl(1000.0);

        // Far below an extreme target: the demand exceeds 100% and is passed
        // through uncapped
        let dems = ctrl.calc_thrust_dems(
            sensors(9.81, 1000.0),
            0.0,
            KinematicSample::default(),
            0.0,
            &bank(6000.0, 2),
        );

        assert!(ctrl.report.thrust_pct > 1.0);
        assert!(matches!(dems.dems[0], ThrustDem::Pct(p) if p > 1.0));
    }

    #[test]
    fn test_floor_on_negative_demand() {
        let mut ctrl = test_ctrl(10.0);

        // Far above the target: the raw percentage is negative, the written
        // one is the floor
        let dems = ctrl.calc_thrust_dems(
            sensors(9.81, 1000.0),
            500.0,
            KinematicSample::default(),
            0.0,
            &bank(6000.0, 2),
        );

        assert!(ctrl.report.floor_applied);
        assert_eq!(dems.dems, vec![ThrustDem::Pct(0.01); 2]);
    }
}

//! Main hover control executable entry point.
//!
//! # Architecture
//!
//! The general execution methodology consists of:
//!
//!     - Initialise all modules
//!     - Main loop:
//!         - System input acquisition:
//!             - Vehicle sensor sampling
//!             - Thruster bank reading
//!         - Telecommand processing and handling
//!         - Hover control processing
//!         - Thruster demand execution
//!
//! # Modules
//!
//! All modules (e.g. `hover_ctrl`) shall meet the following requirements:
//!     1. Provide a public struct implementing the `util::module::State` trait.

// ---------------------------------------------------------------------------
// USE MODULES FROM LIBRARY
// ---------------------------------------------------------------------------

use hover_lib::{
    data_store::DataStore,
    sim_veh::{self, SimVeh},
    tc_processor,
};

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// External
use color_eyre::{
    eyre::{eyre, WrapErr},
    Report,
};
use log::{debug, info, warn};
use std::env;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

// Internal
use util::{
    archive::Archived,
    host,
    logger::{logger_init, LevelFilter},
    module::State,
    raise_error,
    script_interpreter::{PendingTcs, ScriptInterpreter},
    session::Session,
};

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// Target period of one cycle.
const CYCLE_PERIOD_S: f64 = 1.0 / 60.0;

/// Number of cycles per second
const CYCLE_FREQUENCY_HZ: f64 = 1.0 / CYCLE_PERIOD_S;

/// Path of the persisted mode state blob, relative to the software root.
const STORAGE_FILE: &str = "storage/hover_ctrl.storage";

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Executable main function, entry point.
fn main() -> Result<(), Report> {
    // ---- EARLY INITIALISATION ----

    // Initialise session
    let session =
        Session::new("hover_exec", "sessions").wrap_err("Failed to create the session")?;

    // Initialise logger
    logger_init(LevelFilter::Trace, &session).wrap_err("Failed to initialise logging")?;

    // Log information on this execution.
    info!("Hover Control Executable\n");
    info!("Session directory: {:?}\n", session.session_root);

    // ---- LOAD PARAMETERS ----

    let sim_params: sim_veh::Params =
        util::params::load("sim_veh.toml").wrap_err("Could not load simulated vehicle params")?;

    info!("Exec parameters loaded");

    // ---- INITIALISE TC SOURCE ----

    // TC source is used to determine whether we're getting TCs from a script
    // or from the console.
    let mut tc_source = TcSource::None;

    // Collect all arguments
    let args: Vec<String> = env::args().collect();

    debug!("CLI arguments: {:?}", args);

    // If we have a single argument use it as the script path
    if args.len() == 2 {
        info!("Loading script from \"{}\"", &args[1]);

        // Load the script interpreter
        let si = ScriptInterpreter::new(&args[1]).wrap_err("Failed to load script")?;

        // Display some info
        info!(
            "Loaded script lasts {:.02} s and contains {} TCs\n",
            si.get_duration(),
            si.get_num_tcs()
        );

        // Set the interpreter in the source
        tc_source = TcSource::Script(si);
    }
    // If no arguments read commands from the console
    else if args.len() == 1 {
        info!("No script provided, commands will be read from the console\n");
        tc_source = TcSource::Console(spawn_console_source());
    } else {
        return Err(eyre!(
            "Expected either zero or one argument, found {}",
            args.len() - 1
        ));
    }

    // ---- INITIALISE DATASTORE ----

    info!("Initialising modules...");

    let mut ds = DataStore::default();

    // ---- INITIALISE MODULES ----

    ds.hover_ctrl
        .init("hover_ctrl.toml", &session)
        .wrap_err("Failed to initialise HoverCtrl")?;
    info!("HoverCtrl init complete");

    // ---- RESTORE PERSISTED STATE ----

    let storage_path = get_storage_path()?;

    match std::fs::read_to_string(&storage_path) {
        Ok(blob) => {
            ds.hover_ctrl.restore_mode(&blob);
            info!("Mode state restored from {:?}: {:?}", storage_path, ds.hover_ctrl.mode());
        }
        Err(_) => {
            info!("No persisted mode state found, using defaults");
        }
    }

    // ---- INITIALISE SIMULATED VEHICLE ----

    let mut sim = SimVeh::new(sim_params);
    info!("Simulated vehicle initialised");

    info!("Module initialisation complete\n");

    // ---- MAIN LOOP ----

    info!("Begining main loop\n");

    loop {
        // Get cycle start time
        let cycle_start_instant = Instant::now();

        // Clear items that need wiping at the start of the cycle
        ds.cycle_start(CYCLE_FREQUENCY_HZ);

        // ---- DATA INPUT ----

        ds.hover_ctrl_input.sensors = sim.sensors();
        ds.hover_ctrl_input.thrusters = sim.thruster_readings();

        // ---- TELECOMMAND PROCESSING ----

        // Branch depending on the source
        match tc_source {
            // If no source no point in continuing so break
            TcSource::None => raise_error!("No TC source present"),

            TcSource::Script(ref mut si) => match si.get_pending_tcs() {
                PendingTcs::None => (),
                PendingTcs::Some(tc_vec) => {
                    for tc in tc_vec.iter() {
                        tc_processor::exec(&mut ds, tc);
                    }
                }
                // End of the script ends the run
                PendingTcs::EndOfScript => {
                    info!("End of TC script");
                    break;
                }
            },

            TcSource::Console(ref rx) => match rx.try_recv() {
                Ok(line) => {
                    if line.trim().eq_ignore_ascii_case("exit") {
                        info!("Exit requested");
                        break;
                    }
                    tc_processor::exec_line(&mut ds, &line);
                }
                Err(TryRecvError::Empty) => (),
                Err(TryRecvError::Disconnected) => {
                    info!("Console input closed");
                    break;
                }
            },
        }

        // ---- CONTROL ALGORITHM PROCESSING ----

        // HoverCtrl processing
        match ds.hover_ctrl.proc(&ds.hover_ctrl_input) {
            Ok((o, r)) => {
                ds.hover_ctrl_output = o;
                ds.hover_ctrl_status_rpt = r;
            }
            Err(e) => {
                warn!("Error during HoverCtrl processing: {}", e)
            }
        };

        // Execute the demands on the vehicle
        sim.step(&ds.hover_ctrl_output, CYCLE_PERIOD_S);

        // ---- WRITE ARCHIVES ----

        if let Err(e) = ds.hover_ctrl.write() {
            warn!("Could not write HoverCtrl archives: {}", e);
        }

        // ---- STATUS DISPLAY ----

        if ds.is_1_hz_cycle {
            let rpt = &ds.hover_ctrl_status_rpt;
            info!(
                "Hover Control {}",
                if rpt.hover_enabled { "Enabled" } else { "Disabled" }
            );
            info!(
                "Manual Height {}",
                if rpt.hover_enabled && rpt.manual_adjust {
                    "Enabled"
                } else {
                    "Disabled"
                }
            );
            info!("T/W Ratio: {:.3}", rpt.t2w);
            info!("Lev Height: {:.2} m", rpt.target_height_m);
            info!("True Height: {:.2} m\n", rpt.true_height_m);

            // The sim's ground truth, for spotting sensed-vs-true divergence
            // when the elevation reading is in fallback
            debug!("Sim elevation: {:.2} m", sim.elevation_m());
        }

        // ---- CYCLE MANAGEMENT ----

        let cycle_dur = Instant::now() - cycle_start_instant;

        // Get sleep duration
        match Duration::from_secs_f64(CYCLE_PERIOD_S).checked_sub(cycle_dur) {
            Some(d) => {
                ds.num_consec_cycle_overruns = 0;
                thread::sleep(d);
            }
            None => {
                warn!(
                    "Cycle overran by {:.06} s",
                    cycle_dur.as_secs_f64() - CYCLE_PERIOD_S
                );
                ds.num_consec_cycle_overruns += 1;
            }
        }

        // Increment cycle counter
        ds.num_cycles += 1;
    }

    // ---- SHUTDOWN ----

    // Persist the mode state for the next run
    let blob = ds.hover_ctrl.mode().encode();

    if let Some(parent) = storage_path.parent() {
        std::fs::create_dir_all(parent).wrap_err("Could not create the storage directory")?;
    }
    std::fs::write(&storage_path, &blob).wrap_err("Could not write the mode state blob")?;
    info!("Mode state persisted to {:?}: {}", storage_path, blob);

    info!("End of execution");

    Ok(())
}

/// Get the path to the persisted mode state blob.
fn get_storage_path() -> Result<PathBuf, Report> {
    let mut path = host::get_sw_root().wrap_err("Could not find the software root")?;
    path.push(STORAGE_FILE);
    Ok(path)
}

/// Spawn the console reader thread, returning the channel lines arrive on.
fn spawn_console_source() -> Receiver<String> {
    let (tx, rx) = channel();

    thread::spawn(move || {
        let stdin = std::io::stdin();
        let mut line = String::new();

        loop {
            line.clear();
            match stdin.read_line(&mut line) {
                // EOF closes the source
                Ok(0) => break,
                Ok(_) => {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });

    rx
}

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Various sources for the telecommands incoming to the exec.
enum TcSource {
    None,
    Console(Receiver<String>),
    Script(ScriptInterpreter),
}

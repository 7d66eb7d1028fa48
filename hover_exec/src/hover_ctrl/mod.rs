//! Hover control module
//!
//! HoverCtrl holds the vehicle at an operator-set height above the reference
//! surface. Each cycle it estimates the vehicle's vertical kinematics from
//! the raw elevation reading, runs a PID compensator on the jerk, and blends
//! gravity/mass compensation with a spring-damper term on the height and
//! velocity errors to produce a normalised thrust percentage for every
//! thruster in the bank.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod calc_thrust;
mod kinematics;
mod mode;
mod params;
mod pid;
mod state;

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

// Internal
pub use kinematics::*;
pub use mode::*;
pub use params::*;
pub use pid::*;
pub use state::*;

// ---------------------------------------------------------------------------
// CONSTANTS
// ---------------------------------------------------------------------------

/// The default target levitation height above the reference surface.
///
/// While hover mode is active the target height is clamped up to this value,
/// so the vehicle can never be commanded to hold a height below it.
///
/// Units: meters
pub const DEFAULT_TARGET_HEIGHT_M: f64 = 10.0;

// ---------------------------------------------------------------------------
// ENUMERATIONS
// ---------------------------------------------------------------------------

/// Possible errors that can occur during HoverCtrl operation.
#[derive(Debug, thiserror::Error)]
pub enum HoverCtrlError {
    #[error("Failed to load the hover control parameters: {0}")]
    ParamLoadError(#[from] util::params::LoadError),

    #[error("Invalid parameter: {0}")]
    InvalidParam(&'static str),

    #[error("Could not initialise the module archives: {0}")]
    ArchiveInitError(std::io::Error),
}

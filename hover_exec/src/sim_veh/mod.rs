//! # Simulated vehicle module
//!
//! A vertical-axis point mass model standing in for the real vehicle. It
//! supplies the sensor and thruster readings the control modules need each
//! cycle and integrates the thrust demands they produce, closing the control
//! loop without hardware.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

mod params;
mod state;

// ---------------------------------------------------------------------------
// EXPORTS
// ---------------------------------------------------------------------------

pub use params::*;
pub use state::*;

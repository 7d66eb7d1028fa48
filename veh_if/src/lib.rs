//! # Vehicle interface library
//!
//! This library defines the data exchanged between the hover control
//! executable and its equipment collaborators (thruster bank and vehicle
//! sensors), as well as the telecommands accepted by the executable.

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

/// Equipment data - thruster readings/demands and vehicle sensor data
pub mod eqpt;

/// Telecommand data - the commands accepted by the exec and their text parser
pub mod tc;

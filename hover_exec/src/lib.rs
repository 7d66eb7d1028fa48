//! # Hover control library.
//!
//! This library allows other crates in the workspace (and the unit tests) to
//! access items defined inside the hover exec crate.

// ------------------------------------------------------------------------------------------------
// MODULES
// ------------------------------------------------------------------------------------------------

/// Global data store for the executable
pub mod data_store;

/// Hover control module - converts elevation readings and operator commands into thruster demands
pub mod hover_ctrl;

/// Simulated vehicle - a vertical-axis point mass model used to close the loop without hardware
pub mod sim_veh;

/// Telecommand processor - routes incoming telecommands to the modules
pub mod tc_processor;

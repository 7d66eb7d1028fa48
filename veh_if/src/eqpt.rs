//! # Equipment data module

// ---------------------------------------------------------------------------
// MODULES
// ---------------------------------------------------------------------------

pub mod sensors;
pub mod thruster;

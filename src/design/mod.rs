//----------------------------------------
// design mod
//----------------------------------------
//! Validates a design request, runs it through every method and collects
//! the comparison table.
pub mod compute_design;
pub mod error;
pub mod report;
pub mod types;
pub mod validate;

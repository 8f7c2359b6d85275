//----------------------------------------
// ncp mod
//----------------------------------------
pub mod error;
mod root_find;
pub mod solve_ncp;

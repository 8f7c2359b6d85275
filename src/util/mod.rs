//----------------------------------------
// util mod
//----------------------------------------
pub mod quadrature;
pub mod round;
pub mod search;

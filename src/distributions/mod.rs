//----------------------------------------
// distributions mod
//----------------------------------------
pub mod bivariate_normal;
pub mod bivariate_t;
pub mod critical_values;
pub mod error;
pub mod noncentral;
pub mod std_normal;

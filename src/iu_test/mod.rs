//----------------------------------------
// intersection-union test mod
//----------------------------------------
//! Power and sample size for the intersection-union test of co-primary
//! continuous endpoints in a cluster-randomized trial. Every endpoint must
//! reject its one-sided t test; the joint rejection probability follows a
//! multivariate noncentral t.
pub mod power;
pub mod sample_size;
pub mod types;

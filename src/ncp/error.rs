//----------------------------------------
// noncentrality errors
//----------------------------------------
use crate::error::CrtcomputeErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum NcpError {
    #[error("could not bracket target {target} (reached {reached} at upper bound {upper_bound})")]
    NoBracket {
        target: f64,
        reached: f64,
        upper_bound: f64,
    },
    #[error("failed to converge (bracket [{lower}, {upper}] after {iterations} iterations)")]
    FailedToConverge {
        lower: f64,
        upper: f64,
        iterations: usize,
    },
    #[error("objective was not finite at {0}")]
    NonFinite(f64),
}

impl Into<CrtcomputeErr> for NcpError {
    fn into(self) -> CrtcomputeErr {
        CrtcomputeErr::NoncentralityCompute(self)
    }
}

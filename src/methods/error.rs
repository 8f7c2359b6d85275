//----------------------------------------
// method errors
//----------------------------------------
use crate::error::CrtcomputeErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum MethodError {
    #[error(
        "endpoint covariance matrix is not positive definite (determinant {determinant}); \
        check rho1 and rho2 against the ICCs"
    )]
    SingularCovariance { determinant: f64 },
    #[error("{method} needs at least {needed} clusters per arm; got {got}")]
    TooFewClusters {
        method: &'static str,
        needed: u64,
        got: u64,
    },
}

impl Into<CrtcomputeErr> for MethodError {
    fn into(self) -> CrtcomputeErr {
        CrtcomputeErr::Method(self)
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum InfeasibleDesignError {
    #[error("target power cannot be reached")]
    TargetUnreachable,
}

impl Into<CrtcomputeErr> for InfeasibleDesignError {
    fn into(self) -> CrtcomputeErr {
        CrtcomputeErr::Infeasible(self)
    }
}

//----------------------------------------
// Crate error type
//----------------------------------------
use crate::design::error::ValidationError;
use crate::distributions::error::DistributionErr;
use crate::methods::error::{InfeasibleDesignError, MethodError};
use crate::ncp::error::NcpError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum CrtcomputeErr {
    #[error("while validating design input: {0}")]
    Validation(ValidationError),
    #[error("while solving for noncentrality parameter: {0}")]
    NoncentralityCompute(NcpError),
    #[error("while evaluating distribution: {0}")]
    Distribution(DistributionErr),
    #[error("while evaluating design method: {0}")]
    Method(MethodError),
    #[error("infeasible design: {0}")]
    Infeasible(InfeasibleDesignError),
}

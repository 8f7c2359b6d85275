//----------------------------------------
// distribution errors
//----------------------------------------
use crate::error::CrtcomputeErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DistributionErr {
    #[error("degrees of freedom should be positive; got {0}")]
    BadDegreesOfFreedom(f64),
    #[error("arguments to quantile function should be in (0, 1); got {0}")]
    QuantileOutOfBounds(f64),
    #[error("noncentrality parameter should be finite and non-negative; got {0}")]
    BadNoncentrality(f64),
    #[error("correlation should be in [-1, 1]; got {0}")]
    CorrelationOutOfBounds(f64),
}

impl Into<CrtcomputeErr> for DistributionErr {
    fn into(self) -> CrtcomputeErr {
        CrtcomputeErr::Distribution(self)
    }
}

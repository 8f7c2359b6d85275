//----------------------------------------
// validation errors
//----------------------------------------
use crate::design::types::Output;
use crate::error::CrtcomputeErr;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    #[error("unsupported mode '{0}'; expected one of power, K, m")]
    UnsupportedMode(String),
    #[error("unsupported dist '{0}'; expected Chi2 or F")]
    UnsupportedDist(String),
    #[error("{name} must be supplied when solving for {solving_for}")]
    MissingParameter {
        name: &'static str,
        solving_for: Output,
    },
    #[error("{name} must be left unset when solving for {solving_for}")]
    UnexpectedParameter {
        name: &'static str,
        solving_for: Output,
    },
    #[error("{name} must be a positive integer; got {value}")]
    NotPositiveInteger { name: &'static str, value: f64 },
    #[error("{name} must be a finite number; got {value}")]
    NotNumeric { name: &'static str, value: f64 },
    #[error("{name} must lie in {range}; got {value}")]
    OutOfRange {
        name: &'static str,
        value: f64,
        range: &'static str,
    },
    #[error("search ceiling must be at least 1")]
    ZeroSearchCeiling,
}

impl Into<CrtcomputeErr> for ValidationError {
    fn into(self) -> CrtcomputeErr {
        CrtcomputeErr::Validation(self)
    }
}

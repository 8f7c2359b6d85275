//----------------------------------------
// Root lib
//----------------------------------------
//! Power and sample size for cluster-randomized trials with two co-primary
//! continuous endpoints. Given two of power, clusters per arm (K) and
//! cluster size (m), the third is solved for under five testing strategies:
//! p-value adjustment, a combined outcome, a single 1-df combined test, a
//! disjunctive 2-df test and a conjunctive intersection-union test.

/// This module houses the public API
pub mod compute;
mod design;
mod distributions;
/// This module contains error types
pub mod error;
mod iu_test;
mod methods;
mod ncp;
mod util;

pub use design::error::ValidationError;
pub use distributions::error::DistributionErr;
pub use error::CrtcomputeErr;
pub use methods::error::{InfeasibleDesignError, MethodError};
pub use ncp::error::NcpError;

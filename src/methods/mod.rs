//----------------------------------------
// methods mod
//----------------------------------------
//! The five testing strategies for two co-primary endpoints. Each solves
//! for power, clusters per arm or cluster size given the other two.
pub mod combined_outcome;
pub mod conjunctive_iu;
mod covariance;
pub mod disjunctive_2df;
mod endpoint;
pub mod error;
pub mod pval_adj;
pub mod single_1df;
#[cfg(test)]
pub(crate) mod test_params;
pub mod types;

use crate::error::CrtcomputeErr;
use combined_outcome::CombinedOutcome;
use conjunctive_iu::ConjunctiveIu;
use disjunctive_2df::Disjunctive2df;
use pval_adj::PValueAdjustment;
use single_1df::Single1df;
use types::{ArmClusters, DesignParams, MethodOutcome, SampleSize};

/// A testing strategy that can solve for any one of power, clusters per arm
/// (K) and cluster size (m)
pub trait DesignMethod: Sync {
    /// Row label in the report
    fn label(&self) -> &'static str;

    /// Power with k treatment clusters of size m, rounded to 4 decimals
    fn power(
        &self,
        k: u64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<f64>, CrtcomputeErr>;

    /// Clusters per arm needed to reach the target power with clusters of
    /// size m
    fn clusters(
        &self,
        power: f64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<ArmClusters>, CrtcomputeErr>;

    /// Cluster size needed to reach the target power with k treatment
    /// clusters
    fn cluster_size(
        &self,
        power: f64,
        k: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<SampleSize>, CrtcomputeErr>;
}

/// Every method, in report order
pub static METHOD_REGISTRY: &[&dyn DesignMethod] = &[
    &PValueAdjustment,
    &CombinedOutcome,
    &Single1df,
    &Disjunctive2df,
    &ConjunctiveIu,
];

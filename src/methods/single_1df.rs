use tracing::debug;

use crate::error::CrtcomputeErr;
use crate::methods::covariance::EndpointCovariance;
use crate::methods::types::{ArmClusters, DesignParams, MethodOutcome, SampleSize};
use crate::methods::DesignMethod;
use crate::ncp::solve_ncp::{chi_squared_power, solve_ncp};
use crate::util::round::round_to;
use crate::util::search::first_integer_reaching;

/// Noncentrality of the GLS-combined 1-df statistic; linear in k
fn combined_test_ncp(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let cov = EndpointCovariance::new(params, m as f64);
    let quadratic = cov.combined_quadratic([params.beta1, params.beta2])?;
    Ok(k as f64 * m as f64 / params.allocation_factor() * quadratic)
}

fn unrounded_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    chi_squared_power(params.alpha, 1.0, combined_test_ncp(k, m, params)?)
}

pub fn single_1df_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let power = round_to(unrounded_power(k, m, params)?, 4);
    debug!(k, m, power, "single 1-df power");
    Ok(power)
}

pub fn single_1df_clusters(
    power: f64,
    m: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let target_ncp = solve_ncp(params.alpha, power, 1.0)?;
    if target_ncp == 0.0 {
        return Ok(SampleSize::Required(1));
    }
    let per_cluster = combined_test_ncp(1, m, params)?;
    let k = SampleSize::from_ceiling(target_ncp / per_cluster);
    debug!(power, m, %k, "single 1-df clusters");
    Ok(k)
}

pub fn single_1df_cluster_size(
    power: f64,
    k: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let found = first_integer_reaching(|m| unrounded_power(k, m, params), power, 1, &params.search)?;
    let m = SampleSize::from_search(found);
    debug!(power, k, %m, "single 1-df cluster size");
    Ok(m)
}

pub struct Single1df;

impl DesignMethod for Single1df {
    fn label(&self) -> &'static str {
        "3. Single 1-df Combined Test"
    }

    fn power(
        &self,
        k: u64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<f64>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(single_1df_power(k, m, params)?))
    }

    fn clusters(
        &self,
        power: f64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<ArmClusters>, CrtcomputeErr> {
        let k = single_1df_clusters(power, m, params)?;
        Ok(MethodOutcome::Single(ArmClusters::allocated(k, params.r)))
    }

    fn cluster_size(
        &self,
        power: f64,
        k: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<SampleSize>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(single_1df_cluster_size(power, k, params)?))
    }
}

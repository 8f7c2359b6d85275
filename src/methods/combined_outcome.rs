use tracing::debug;

use crate::error::CrtcomputeErr;
use crate::methods::endpoint::Endpoint;
use crate::methods::types::{ArmClusters, DesignParams, MethodOutcome, SampleSize};
use crate::methods::DesignMethod;
use crate::ncp::solve_ncp::{chi_squared_power, solve_ncp};
use crate::util::round::round_to;

/// Effect, variance and ICC of the summed outcome Y1 + Y2
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombinedParams {
    pub beta_c: f64,
    /// Rounded to two decimals
    pub var_yc: f64,
    /// Uses the unrounded variance in its denominator
    pub rho0_c: f64,
}

pub fn combined_params(params: &DesignParams) -> CombinedParams {
    let sd_product = (params.var_y1 * params.var_y2).sqrt();
    let var_sum = params.var_y1 + params.var_y2 + 2.0 * params.rho2 * sd_product;
    let cluster_cov =
        params.rho01 * params.var_y1 + params.rho02 * params.var_y2 + 2.0 * params.rho1 * sd_product;
    CombinedParams {
        beta_c: params.beta1 + params.beta2,
        var_yc: round_to(var_sum, 2),
        rho0_c: cluster_cov / var_sum,
    }
}

fn combined_endpoint(params: &DesignParams) -> Endpoint {
    let combined = combined_params(params);
    Endpoint {
        beta: combined.beta_c,
        var: combined.var_yc,
        icc: combined.rho0_c,
    }
}

pub fn combined_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let ncp = combined_endpoint(params).ncp(k as f64, m as f64, params.allocation_factor());
    let power = round_to(chi_squared_power(params.alpha, 1.0, ncp)?, 4);
    debug!(k, m, ncp, power, "combined outcome power");
    Ok(power)
}

pub fn combined_clusters(
    power: f64,
    m: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let target_ncp = solve_ncp(params.alpha, power, 1.0)?;
    let k = combined_endpoint(params).clusters_for(target_ncp, m as f64, params.allocation_factor());
    debug!(power, m, %k, "combined outcome clusters");
    Ok(k)
}

pub fn combined_cluster_size(
    power: f64,
    k: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let target_ncp = solve_ncp(params.alpha, power, 1.0)?;
    let m =
        combined_endpoint(params).cluster_size_for(target_ncp, k as f64, params.allocation_factor());
    debug!(power, k, %m, "combined outcome cluster size");
    Ok(m)
}

pub struct CombinedOutcome;

impl DesignMethod for CombinedOutcome {
    fn label(&self) -> &'static str {
        "2. Combined Outcomes"
    }

    fn power(
        &self,
        k: u64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<f64>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(combined_power(k, m, params)?))
    }

    fn clusters(
        &self,
        power: f64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<ArmClusters>, CrtcomputeErr> {
        let k = combined_clusters(power, m, params)?;
        Ok(MethodOutcome::Single(ArmClusters::allocated(k, params.r)))
    }

    fn cluster_size(
        &self,
        power: f64,
        k: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<SampleSize>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(combined_cluster_size(power, k, params)?))
    }
}

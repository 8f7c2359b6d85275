use tracing::debug;

use crate::distributions::{critical_values::f_critical, noncentral::noncentral_f_cdf};
use crate::error::CrtcomputeErr;
use crate::methods::covariance::EndpointCovariance;
use crate::methods::error::MethodError;
use crate::methods::types::{ArmClusters, DesignParams, Dist, MethodOutcome, SampleSize};
use crate::methods::DesignMethod;
use crate::ncp::solve_ncp::{chi_squared_power, solve_ncp};
use crate::util::round::round_to;
use crate::util::search::first_integer_reaching;

const WALD_DF: f64 = 2.0;

/// Noncentrality of the 2-df Wald statistic; linear in k
fn wald_ncp(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let cov = EndpointCovariance::new(params, m as f64);
    let quadratic = cov.wald_quadratic([params.beta1, params.beta2])?;
    Ok(k as f64 * m as f64 / params.allocation_factor() * quadratic)
}

/// Denominator degrees of freedom for the F reference: total clusters less
/// two parameters per endpoint
fn denominator_df(k: u64, r: f64) -> f64 {
    k as f64 * (1.0 + r) - 2.0 * WALD_DF
}

/// Smallest k leaving at least one denominator degree of freedom
fn min_clusters_for_f(r: f64) -> u64 {
    ((1.0 + 2.0 * WALD_DF) / (1.0 + r)).ceil().max(1.0) as u64
}

fn unrounded_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let ncp = wald_ncp(k, m, params)?;
    match params.dist {
        Dist::Chi2 => chi_squared_power(params.alpha, WALD_DF, ncp),
        Dist::F => {
            let df2 = denominator_df(k, params.r);
            if df2 < 1.0 {
                return Err(MethodError::TooFewClusters {
                    method: "disjunctive F test",
                    needed: min_clusters_for_f(params.r),
                    got: k,
                }
                .into());
            }
            let crit = f_critical(params.alpha, WALD_DF, df2)?;
            // T / 2 is noncentral F(2, df2) with the Wald noncentrality
            Ok(1.0 - noncentral_f_cdf(crit, WALD_DF, df2, ncp)?)
        }
    }
}

pub fn disjunctive_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let power = round_to(unrounded_power(k, m, params)?, 4);
    debug!(k, m, dist = %params.dist, power, "disjunctive 2-df power");
    Ok(power)
}

pub fn disjunctive_clusters(
    power: f64,
    m: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let k = match params.dist {
        Dist::Chi2 => {
            let target_ncp = solve_ncp(params.alpha, power, WALD_DF)?;
            if target_ncp == 0.0 {
                SampleSize::Required(1)
            } else {
                SampleSize::from_ceiling(target_ncp / wald_ncp(1, m, params)?)
            }
        }
        Dist::F => {
            let start = min_clusters_for_f(params.r);
            let found =
                first_integer_reaching(|k| unrounded_power(k, m, params), power, start, &params.search)?;
            SampleSize::from_search(found)
        }
    };
    debug!(power, m, dist = %params.dist, %k, "disjunctive 2-df clusters");
    Ok(k)
}

pub fn disjunctive_cluster_size(
    power: f64,
    k: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let found = first_integer_reaching(|m| unrounded_power(k, m, params), power, 1, &params.search)?;
    let m = SampleSize::from_search(found);
    debug!(power, k, dist = %params.dist, %m, "disjunctive 2-df cluster size");
    Ok(m)
}

pub struct Disjunctive2df;

impl DesignMethod for Disjunctive2df {
    fn label(&self) -> &'static str {
        "4. Disjunctive 2-df Test"
    }

    fn power(
        &self,
        k: u64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<f64>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(disjunctive_power(k, m, params)?))
    }

    fn clusters(
        &self,
        power: f64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<ArmClusters>, CrtcomputeErr> {
        let k = disjunctive_clusters(power, m, params)?;
        Ok(MethodOutcome::Single(ArmClusters::allocated(k, params.r)))
    }

    fn cluster_size(
        &self,
        power: f64,
        k: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<SampleSize>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(disjunctive_cluster_size(power, k, params)?))
    }
}

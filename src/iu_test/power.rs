use tracing::trace;

use crate::distributions::{
    bivariate_t::bivariate_noncentral_t_upper, critical_values::t_critical,
};
use crate::error::CrtcomputeErr;
use crate::iu_test::types::{IuDesign, N_ENDPOINTS};

/// Degrees of freedom of the endpoint t statistics with n_clusters in total
pub fn iu_degrees_of_freedom(n_clusters: u64) -> f64 {
    n_clusters as f64 - 2.0 * N_ENDPOINTS as f64
}

/// Probability that every endpoint's one-sided level-alpha t test rejects
/// with n_clusters randomized in total
pub fn iu_power(design: &IuDesign, n_clusters: u64, alpha: f64) -> Result<f64, CrtcomputeErr> {
    let df = iu_degrees_of_freedom(n_clusters);
    let crit = t_critical(alpha, df)?;

    let omega = design.unit_covariance();
    let n = n_clusters as f64;
    let mut tau = [0.0; N_ENDPOINTS];
    for k in 0..N_ENDPOINTS {
        tau[k] = (design.betas[k] - design.deltas[k]) / (omega[k][k] / n).sqrt();
    }
    let rho = omega[0][1] / (omega[0][0] * omega[1][1]).sqrt();

    let power = bivariate_noncentral_t_upper(crit, tau, rho, df)?;
    trace!(n_clusters, df, crit, ?tau, rho, power, "IU power");
    Ok(power)
}

use statrs::function::gamma::ln_gamma;
use std::f64::consts::LN_2;

use crate::distributions::bivariate_normal::bivariate_normal_upper;
use crate::distributions::error::DistributionErr;
use crate::error::CrtcomputeErr;
use crate::util::quadrature::integrate;

const PANELS: usize = 32;
const TOL: f64 = 1e-11;
// Half-width of the integration window for S, in units of 1 / sqrt(df)
const WINDOW: f64 = 10.0;

/// Density of S = sqrt(W / df) for W ~ chi^2(df)
fn scaled_chi_density(s: f64, df: f64, log_norm: f64) -> f64 {
    if s <= 0.0 {
        // Only one degree of freedom leaves mass at the origin
        return if df == 1.0 { log_norm.exp() } else { 0.0 };
    }
    (log_norm + (df - 1.0) * s.ln() - df * s * s / 2.0).exp()
}

/// P(T_1 > crit, T_2 > crit) where T_q = (Z_q + tau_q) / S, (Z_1, Z_2) is a
/// standard bivariate normal with correlation rho and S = sqrt(W / df) with
/// W ~ chi^2(df) independent of Z.
///
/// Conditioning on S gives a bivariate normal orthant probability, which is
/// integrated against the density of S.
pub fn bivariate_noncentral_t_upper(
    crit: f64,
    tau: [f64; 2],
    rho: f64,
    df: f64,
) -> Result<f64, CrtcomputeErr> {
    if !(df > 0.0) || !df.is_finite() {
        return Err(DistributionErr::BadDegreesOfFreedom(df).into());
    }
    if !(-1.0..=1.0).contains(&rho) {
        return Err(DistributionErr::CorrelationOutOfBounds(rho).into());
    }

    let half_df = df / 2.0;
    let log_norm = LN_2 + half_df * half_df.ln() - ln_gamma(half_df);

    let integrand = |s: f64| {
        let density = scaled_chi_density(s, df, log_norm);
        if density == 0.0 {
            return 0.0;
        }
        density * bivariate_normal_upper(crit * s - tau[0], crit * s - tau[1], rho)
    };

    let half_width = WINDOW / df.sqrt();
    let lower = (1.0 - half_width).max(0.0);
    let upper = 1.0 + half_width;
    let p = integrate(&integrand, lower, upper, PANELS, TOL);

    Ok(p.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use statrs::distribution::{ContinuousCDF, StudentsT};

    #[test]
    fn large_df_approaches_bivariate_normal() {
        let p = bivariate_noncentral_t_upper(1.645, [2.5, 3.0], 0.3, 1e6).unwrap();
        let expected = bivariate_normal_upper(1.645 - 2.5, 1.645 - 3.0, 0.3);
        assert!((p - expected).abs() < 1e-4);
    }

    #[test]
    fn perfect_correlation_central_is_univariate_t() {
        // With rho = 1 and equal shifts both statistics coincide
        let df = 8.0;
        let p = bivariate_noncentral_t_upper(1.2, [0.0, 0.0], 1.0, df).unwrap();
        let t_dist = StudentsT::new(0.0, 1.0, df).unwrap();
        assert!((p - (1.0 - t_dist.cdf(1.2))).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_freedom() {
        // Independent central Cauchy-like statistics at crit 0 split the
        // plane into quarters
        let p = bivariate_noncentral_t_upper(0.0, [0.0, 0.0], 0.0, 1.0).unwrap();
        assert!((p - 0.25).abs() < 1e-6);
    }

    #[test]
    fn increasing_in_shift() {
        let mut prev = 0.0;
        for shift in [0.0, 1.0, 2.0, 3.0, 4.0] {
            let cur = bivariate_noncentral_t_upper(1.7, [shift, shift], 0.2, 20.0).unwrap();
            assert!(cur > prev);
            prev = cur;
        }
    }

    #[test]
    fn bad_arguments() {
        assert!(bivariate_noncentral_t_upper(1.0, [0.0, 0.0], 0.5, 0.0).is_err());
        assert!(bivariate_noncentral_t_upper(1.0, [0.0, 0.0], 1.5, 5.0).is_err());
    }
}

use statrs::function::{beta::beta_reg, gamma::gamma_lr, gamma::ln_gamma};

use crate::distributions::error::DistributionErr;
use crate::error::CrtcomputeErr;

// Poisson weights below this are dropped once past the mode
const MIXTURE_EPS: f64 = 1e-17;
const MAX_MIXTURE_TERMS: u32 = 1_000_000;

/// Sums Poisson(half_ncp) weights times component(j), walking outwards from
/// the mode so large noncentralities stay stable
fn poisson_mixture<F>(half_ncp: f64, component: F) -> f64
where
    F: Fn(f64) -> f64,
{
    if half_ncp == 0.0 {
        return component(0.0);
    }
    let log_half_ncp = half_ncp.ln();
    let weight = |j: f64| (-half_ncp + j * log_half_ncp - ln_gamma(j + 1.0)).exp();
    let mode = half_ncp.floor();

    let mut total = 0.0;

    // Upwards from the mode
    let mut j = mode;
    for _ in 0..MAX_MIXTURE_TERMS {
        let w = weight(j);
        total += w * component(j);
        if w < MIXTURE_EPS {
            break;
        }
        j += 1.0;
    }

    // Downwards from just below the mode
    let mut j = mode - 1.0;
    while j >= 0.0 {
        let w = weight(j);
        total += w * component(j);
        if w < MIXTURE_EPS {
            break;
        }
        j -= 1.0;
    }

    total.clamp(0.0, 1.0)
}

/// Accepts +inf, the noncentrality of an effect measured without noise
fn check_ncp(ncp: f64) -> Result<(), CrtcomputeErr> {
    if ncp.is_nan() || ncp < 0.0 {
        return Err(DistributionErr::BadNoncentrality(ncp).into());
    }
    Ok(())
}

/// CDF of the noncentral chi-squared distribution, as a Poisson mixture of
/// central chi-squared CDFs with df + 2j degrees of freedom
pub fn noncentral_chi_squared_cdf(x: f64, df: f64, ncp: f64) -> Result<f64, CrtcomputeErr> {
    if !(df > 0.0) || !df.is_finite() {
        return Err(DistributionErr::BadDegreesOfFreedom(df).into());
    }
    check_ncp(ncp)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    if x == f64::INFINITY {
        return Ok(1.0);
    }
    if ncp == f64::INFINITY {
        return Ok(0.0);
    }
    let half_x = x / 2.0;
    Ok(poisson_mixture(ncp / 2.0, |j| gamma_lr(df / 2.0 + j, half_x)))
}

/// CDF of the noncentral F distribution with (df1, df2) degrees of freedom,
/// as a Poisson mixture of regularized incomplete beta functions
pub fn noncentral_f_cdf(x: f64, df1: f64, df2: f64, ncp: f64) -> Result<f64, CrtcomputeErr> {
    for df in [df1, df2] {
        if !(df > 0.0) || !df.is_finite() {
            return Err(DistributionErr::BadDegreesOfFreedom(df).into());
        }
    }
    check_ncp(ncp)?;
    if x <= 0.0 {
        return Ok(0.0);
    }
    if x == f64::INFINITY {
        return Ok(1.0);
    }
    if ncp == f64::INFINITY {
        return Ok(0.0);
    }
    let y = df1 * x / (df1 * x + df2);
    Ok(poisson_mixture(ncp / 2.0, |j| {
        beta_reg(df1 / 2.0 + j, df2 / 2.0, y)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::std_normal::std_normal_cdf;
    use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor};

    // With one degree of freedom X = (Z + sqrt(ncp))^2
    fn one_df_cdf(x: f64, ncp: f64) -> f64 {
        let (sx, sl) = (x.sqrt(), ncp.sqrt());
        std_normal_cdf(sx - sl) - std_normal_cdf(-sx - sl)
    }

    #[test]
    fn one_df_matches_shifted_normal() {
        for ncp in [0.0, 0.3, 2.0, 7.848879, 16.4, 120.0, 900.0] {
            for x in [0.1, 1.0, 3.841459, 10.0, 40.0, 1000.0] {
                let got = noncentral_chi_squared_cdf(x, 1.0, ncp).unwrap();
                let expected = one_df_cdf(x, ncp);
                assert!(
                    (got - expected).abs() < 1e-9,
                    "x {x}, ncp {ncp}: got {got}, expected {expected}"
                );
            }
        }
    }

    #[test]
    fn zero_ncp_is_central() {
        let chi_sq = ChiSquared::new(3.0).unwrap();
        for x in [0.5, 2.0, 7.81] {
            let got = noncentral_chi_squared_cdf(x, 3.0, 0.0).unwrap();
            assert!((got - chi_sq.cdf(x)).abs() < 1e-12);
        }
    }

    #[test]
    fn eighty_percent_power_one_df() {
        // (z_0.975 + z_0.8)^2 gives 80% power for a two-sided z test
        let cdf = noncentral_chi_squared_cdf(3.841459, 1.0, 7.848879).unwrap();
        assert!((1.0 - cdf - 0.8).abs() < 1e-5);
    }

    #[test]
    fn decreasing_in_ncp() {
        let mut prev = 1.0;
        for ncp in [0.0, 1.0, 5.0, 10.0, 20.0] {
            let cur = noncentral_chi_squared_cdf(5.99, 2.0, ncp).unwrap();
            assert!(cur < prev);
            prev = cur;
        }
    }

    #[test]
    fn f_zero_ncp_is_central() {
        let f_dist = FisherSnedecor::new(2.0, 12.0).unwrap();
        for x in [0.2, 1.0, 3.89] {
            let got = noncentral_f_cdf(x, 2.0, 12.0, 0.0).unwrap();
            assert!((got - f_dist.cdf(x)).abs() < 1e-10);
        }
    }

    #[test]
    fn f_large_denominator_df_approaches_chi_squared() {
        // df1 * F(df1, inf, ncp) ~ chi^2(df1, ncp)
        let f_cdf = noncentral_f_cdf(3.0, 2.0, 1e6, 9.0).unwrap();
        let chi_cdf = noncentral_chi_squared_cdf(6.0, 2.0, 9.0).unwrap();
        assert!((f_cdf - chi_cdf).abs() < 1e-4);
    }

    #[test]
    fn bad_arguments() {
        assert!(noncentral_chi_squared_cdf(1.0, 0.0, 1.0).is_err());
        assert!(noncentral_chi_squared_cdf(1.0, 1.0, -1.0).is_err());
        assert!(noncentral_chi_squared_cdf(1.0, 1.0, f64::NAN).is_err());
        assert!(noncentral_f_cdf(1.0, 2.0, -3.0, 1.0).is_err());
    }

    #[test]
    fn infinite_noncentrality() {
        assert_eq!(noncentral_chi_squared_cdf(3.84, 1.0, f64::INFINITY).unwrap(), 0.0);
        assert_eq!(noncentral_f_cdf(3.4, 2.0, 26.0, f64::INFINITY).unwrap(), 0.0);
        assert!(noncentral_chi_squared_cdf(3.84, 1.0, f64::NEG_INFINITY).is_err());
    }
}

use tracing::debug;

use crate::distributions::{
    critical_values::chi_squared_critical, noncentral::noncentral_chi_squared_cdf,
};
use crate::error::CrtcomputeErr;
use crate::ncp::root_find::root_find_monotonic;

/// Relative tolerance on the noncentrality parameter
const NCP_TOL: f64 = 1e-10;

/// Power of a level-alpha chi-squared test with df degrees of freedom when
/// the statistic has noncentrality ncp
pub fn chi_squared_power(alpha: f64, df: f64, ncp: f64) -> Result<f64, CrtcomputeErr> {
    let crit = chi_squared_critical(alpha, df)?;
    Ok(1.0 - noncentral_chi_squared_cdf(crit, df, ncp)?)
}

/// Finds the noncentrality parameter at which a level-alpha chi-squared test
/// with df degrees of freedom reaches the target power.
///
/// The returned value never undershoots: evaluating the power at it gives at
/// least `power`. Targets at or below alpha need no noncentrality and give 0.
pub fn solve_ncp(alpha: f64, power: f64, df: f64) -> Result<f64, CrtcomputeErr> {
    let crit = chi_squared_critical(alpha, df)?;
    if power <= alpha {
        debug!(alpha, power, df, "target power at or below alpha");
        return Ok(0.0);
    }
    let upper_tail = |ncp: f64| noncentral_chi_squared_cdf(crit, df, ncp).map(|cdf| 1.0 - cdf);
    let ncp = root_find_monotonic(upper_tail, 0.0, power, NCP_TOL)?;
    debug!(alpha, power, df, ncp, "solved noncentrality parameter");
    Ok(ncp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_df_eighty_percent() {
        let ncp = solve_ncp(0.05, 0.8, 1.0).unwrap();
        // (z_0.975 + z_0.8)^2, less a hair for the opposite tail
        assert!((ncp - 7.848879).abs() < 1e-3);
        assert!(chi_squared_power(0.05, 1.0, ncp).unwrap() >= 0.8);
    }

    #[test]
    fn two_df_ninety_percent() {
        let ncp = solve_ncp(0.05, 0.9, 2.0).unwrap();
        // Tabulated value for (alpha, power, df) = (0.05, 0.9, 2)
        assert!((ncp - 12.654).abs() < 1e-2);
        assert!(chi_squared_power(0.05, 2.0, ncp).unwrap() >= 0.9);
    }

    #[test]
    fn power_at_alpha_needs_no_noncentrality() {
        assert_eq!(solve_ncp(0.05, 0.05, 1.0).unwrap(), 0.0);
        assert_eq!(solve_ncp(0.05, 0.01, 1.0).unwrap(), 0.0);
    }

    #[test]
    fn increasing_in_power() {
        let lower = solve_ncp(0.05, 0.8, 1.0).unwrap();
        let upper = solve_ncp(0.05, 0.9, 1.0).unwrap();
        assert!(upper > lower);
    }

    #[test]
    fn bad_alpha_propagates() {
        assert!(solve_ncp(0.0, 0.8, 1.0).is_err());
    }
}

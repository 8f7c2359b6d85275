use statrs::distribution::{ChiSquared, Continuous, ContinuousCDF, FisherSnedecor, StudentsT};

use crate::distributions::error::DistributionErr;
use crate::error::CrtcomputeErr;

fn check_alpha(alpha: f64) -> Result<(), CrtcomputeErr> {
    if !(alpha > 0.0 && alpha < 1.0) {
        return Err(DistributionErr::QuantileOutOfBounds(alpha).into());
    }
    Ok(())
}

const NEWTON_STEPS: usize = 10;
const NEWTON_TOL: f64 = 1e-15;

/// Polishes statrs' quantile, which is only good to a few parts in 1e5, by
/// Newton steps on cdf(x) = p. `positive` keeps iterates on (0, inf) for
/// distributions supported there.
fn upper_quantile<D>(dist: &D, alpha: f64, positive: bool) -> f64
where
    D: ContinuousCDF<f64, f64> + Continuous<f64, f64>,
{
    let p = 1.0 - alpha;
    let mut x = dist.inverse_cdf(p);
    for _ in 0..NEWTON_STEPS {
        let density = dist.pdf(x);
        if !(density > 0.0) || !density.is_finite() {
            break;
        }
        let step = (dist.cdf(x) - p) / density;
        let mut next = x - step;
        if positive && next <= 0.0 {
            next = x / 2.0;
        }
        if !next.is_finite() {
            break;
        }
        let moved = (next - x).abs();
        x = next;
        if moved <= NEWTON_TOL * x.abs().max(1.0) {
            break;
        }
    }
    x
}

/// Upper-tail chi-squared quantile, i.e. the central critical value of a
/// level-alpha test
pub fn chi_squared_critical(alpha: f64, df: f64) -> Result<f64, CrtcomputeErr> {
    check_alpha(alpha)?;
    let chi_sq = match ChiSquared::new(df) {
        Ok(d) => d,
        Err(_) => return Err(DistributionErr::BadDegreesOfFreedom(df).into()),
    };
    Ok(upper_quantile(&chi_sq, alpha, true))
}

/// Upper-tail F quantile with (df1, df2) degrees of freedom
pub fn f_critical(alpha: f64, df1: f64, df2: f64) -> Result<f64, CrtcomputeErr> {
    check_alpha(alpha)?;
    if !(df1 > 0.0) {
        return Err(DistributionErr::BadDegreesOfFreedom(df1).into());
    }
    let f_dist = match FisherSnedecor::new(df1, df2) {
        Ok(d) => d,
        Err(_) => return Err(DistributionErr::BadDegreesOfFreedom(df2).into()),
    };
    Ok(upper_quantile(&f_dist, alpha, true))
}

/// Upper-tail Student t quantile, for one-sided tests
pub fn t_critical(alpha: f64, df: f64) -> Result<f64, CrtcomputeErr> {
    check_alpha(alpha)?;
    let t_dist = match StudentsT::new(0.0, 1.0, df) {
        Ok(d) => d,
        Err(_) => return Err(DistributionErr::BadDegreesOfFreedom(df).into()),
    };
    Ok(upper_quantile(&t_dist, alpha, false))
}

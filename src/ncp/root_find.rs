use crate::error::CrtcomputeErr;
use crate::ncp::error::NcpError;

const MAX_DOUBLINGS: usize = 64;
const MAX_BISECTIONS: usize = 200;

/// Given a monotonically increasing function f(x) and lower bound, finds
/// the smallest x' (to within tol, relative) to the right of the lower bound
/// such that f(x') >= target. The returned value always satisfies the
/// inequality; if f(lower_bound) already does, lower_bound is returned.
pub fn root_find_monotonic<F>(
    f: F,
    lower_bound: f64,
    target: f64,
    tol: f64,
) -> Result<f64, CrtcomputeErr>
where
    F: Fn(f64) -> Result<f64, CrtcomputeErr>,
{
    let eval = |x: f64| -> Result<f64, CrtcomputeErr> {
        let y = f(x)?;
        if !y.is_finite() {
            return Err(NcpError::NonFinite(x).into());
        }
        Ok(y)
    };

    if eval(lower_bound)? >= target {
        return Ok(lower_bound);
    }

    // Set window for search
    let mut lower_bound = lower_bound;
    let mut upper_bound = lower_bound;
    let mut f_upper_bound = f64::NEG_INFINITY;
    let mut safety = 0;
    while safety < MAX_DOUBLINGS {
        upper_bound *= 2.;
        upper_bound += 1.; // In case lower_bound is zero
        f_upper_bound = eval(upper_bound)?;
        if f_upper_bound >= target {
            break;
        }
        lower_bound = upper_bound;
        safety += 1;
    }
    if f_upper_bound < target {
        return Err(NcpError::NoBracket {
            target,
            reached: f_upper_bound,
            upper_bound,
        }
        .into());
    }

    // Perform search; f(lower_bound) < target <= f(upper_bound) throughout
    for _ in 0..MAX_BISECTIONS {
        if upper_bound - lower_bound <= tol * upper_bound.max(1.0) {
            return Ok(upper_bound);
        }
        let x = (lower_bound + upper_bound) / 2.;
        if eval(x)? >= target {
            upper_bound = x;
        } else {
            lower_bound = x;
        }
    }
    Err(NcpError::FailedToConverge {
        lower: lower_bound,
        upper: upper_bound,
        iterations: MAX_BISECTIONS,
    }
    .into())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn basic_linear_root_find() {
        let f = |x| Ok(x);
        let res =
            root_find_monotonic(f, 0.0, 3., 0.0001).expect("failed to perform linear root find");
        assert!((res - 3.0).abs() < 0.001);
        assert!(res >= 3.0);
    }

    #[test]
    fn basic_quadratic_root_find() {
        let f = |x: f64| Ok(x * x);
        let res = root_find_monotonic(f, 0.0, 9., 0.0001)
            .expect("failed to perform quadratic root find");
        assert!((res - 3.0).abs() < 0.001);
        assert!(res * res >= 9.0);
    }

    #[test]
    fn lower_bound_already_sufficient() {
        let f = |x: f64| Ok(x + 10.0);
        let res = root_find_monotonic(f, 0.0, 5., 0.0001).unwrap();
        assert_eq!(res, 0.0);
    }

    #[test]
    fn bounded_function_cannot_be_bracketed() {
        let f = |x: f64| Ok(1.0 - (-x).exp());
        match root_find_monotonic(f, 0.0, 2.0, 0.0001) {
            Err(CrtcomputeErr::NoncentralityCompute(NcpError::NoBracket { target, .. })) => {
                assert_eq!(target, 2.0)
            }
            other => panic!("expected bracket failure, got {other:?}"),
        }
    }

    #[test]
    fn nan_objective_is_an_error() {
        let f = |_x: f64| Ok(f64::NAN);
        assert!(matches!(
            root_find_monotonic(f, 0.0, 1.0, 0.0001),
            Err(CrtcomputeErr::NoncentralityCompute(NcpError::NonFinite(_)))
        ));
    }
}

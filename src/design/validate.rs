use crate::design::error::ValidationError;
use crate::design::types::{DesignInput, Output};
use crate::error::CrtcomputeErr;
use crate::methods::types::DesignParams;

/// The two fixed quantities for the chosen solve mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Target {
    Power { k: u64, m: u64 },
    Clusters { power: f64, m: u64 },
    ClusterSize { power: f64, k: u64 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedDesign {
    pub target: Target,
    pub params: DesignParams,
}

// Largest count accepted; beyond this f64 no longer holds every integer
const MAX_COUNT: f64 = 9_007_199_254_740_992.0;

fn require(
    maybe_value: Option<f64>,
    name: &'static str,
    solving_for: Output,
) -> Result<f64, CrtcomputeErr> {
    match maybe_value {
        Some(value) => Ok(value),
        None => Err(ValidationError::MissingParameter { name, solving_for }.into()),
    }
}

fn forbid(
    maybe_value: Option<f64>,
    name: &'static str,
    solving_for: Output,
) -> Result<(), CrtcomputeErr> {
    match maybe_value {
        Some(_) => Err(ValidationError::UnexpectedParameter { name, solving_for }.into()),
        None => Ok(()),
    }
}

fn positive_integer(value: f64, name: &'static str) -> Result<u64, CrtcomputeErr> {
    if !value.is_finite() || value < 1.0 || value.fract() != 0.0 || value > MAX_COUNT {
        return Err(ValidationError::NotPositiveInteger { name, value }.into());
    }
    Ok(value as u64)
}

fn finite(value: f64, name: &'static str) -> Result<f64, CrtcomputeErr> {
    if !value.is_finite() {
        return Err(ValidationError::NotNumeric { name, value }.into());
    }
    Ok(value)
}

/// Checks a finite value against a range predicate described by `range`
fn in_range<P>(value: f64, name: &'static str, range: &'static str, ok: P) -> Result<f64, CrtcomputeErr>
where
    P: Fn(f64) -> bool,
{
    let value = finite(value, name)?;
    if !ok(value) {
        return Err(ValidationError::OutOfRange { name, value, range }.into());
    }
    Ok(value)
}

fn probability(value: f64, name: &'static str) -> Result<f64, CrtcomputeErr> {
    in_range(value, name, "(0, 1)", |x| x > 0.0 && x < 1.0)
}

fn target(output: Output, input: &DesignInput) -> Result<Target, CrtcomputeErr> {
    match output {
        Output::Power => {
            forbid(input.maybe_power, "power", output)?;
            let k = require(input.maybe_k, "K", output)?;
            let m = require(input.maybe_m, "m", output)?;
            Ok(Target::Power {
                k: positive_integer(k, "K")?,
                m: positive_integer(m, "m")?,
            })
        }
        Output::Clusters => {
            forbid(input.maybe_k, "K", output)?;
            let power = require(input.maybe_power, "power", output)?;
            let m = require(input.maybe_m, "m", output)?;
            Ok(Target::Clusters {
                power: probability(power, "power")?,
                m: positive_integer(m, "m")?,
            })
        }
        Output::ClusterSize => {
            forbid(input.maybe_m, "m", output)?;
            let power = require(input.maybe_power, "power", output)?;
            let k = require(input.maybe_k, "K", output)?;
            Ok(Target::ClusterSize {
                power: probability(power, "power")?,
                k: positive_integer(k, "K")?,
            })
        }
    }
}

fn params(input: &DesignInput) -> Result<DesignParams, CrtcomputeErr> {
    let icc = |x: f64| (0.0..1.0).contains(&x);
    let correlation = |x: f64| (-1.0..=1.0).contains(&x);
    let positive = |x: f64| x > 0.0;

    if input.search.ceiling < 1 {
        return Err(ValidationError::ZeroSearchCeiling.into());
    }

    Ok(DesignParams {
        alpha: probability(input.alpha, "alpha")?,
        beta1: finite(input.beta1, "beta1")?,
        beta2: finite(input.beta2, "beta2")?,
        var_y1: in_range(input.var_y1, "varY1", "(0, inf)", positive)?,
        var_y2: in_range(input.var_y2, "varY2", "(0, inf)", positive)?,
        rho01: in_range(input.rho01, "rho01", "[0, 1)", icc)?,
        rho02: in_range(input.rho02, "rho02", "[0, 1)", icc)?,
        rho1: in_range(input.rho1, "rho1", "[-1, 1]", correlation)?,
        rho2: in_range(input.rho2, "rho2", "[-1, 1]", correlation)?,
        r: in_range(input.r, "r", "(0, inf)", positive)?,
        dist: input.dist,
        search: input.search,
    })
}

/// Checks that exactly the right quantities are supplied for the solve mode
/// and that every parameter lies in its domain
pub fn validate(output: Output, input: &DesignInput) -> Result<ValidatedDesign, CrtcomputeErr> {
    let target = target(output, input)?;
    let params = params(input)?;
    Ok(ValidatedDesign { target, params })
}

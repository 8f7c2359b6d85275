//----------------------------------------
// methods mod types
//----------------------------------------
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::design::error::ValidationError;
use crate::error::CrtcomputeErr;
use crate::methods::error::InfeasibleDesignError;
use crate::util::search::SearchConfig;

/// Reference distribution for the disjunctive 2-df test
#[derive(Default, Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dist {
    #[default]
    Chi2,
    F,
}

impl FromStr for Dist {
    type Err = CrtcomputeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Chi2" => Ok(Dist::Chi2),
            "F" => Ok(Dist::F),
            other => Err(ValidationError::UnsupportedDist(other.to_string()).into()),
        }
    }
}

impl TryFrom<String> for Dist {
    type Error = CrtcomputeErr;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Dist> for String {
    fn from(dist: Dist) -> String {
        dist.to_string()
    }
}

impl fmt::Display for Dist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dist::Chi2 => write!(f, "Chi2"),
            Dist::F => write!(f, "F"),
        }
    }
}

/// Validated nuisance parameters shared by every design method
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignParams {
    pub alpha: f64,
    pub beta1: f64,
    pub beta2: f64,
    pub var_y1: f64,
    pub var_y2: f64,
    /// ICC of the first endpoint
    pub rho01: f64,
    /// ICC of the second endpoint
    pub rho02: f64,
    /// Correlation between endpoints of different subjects in a cluster
    pub rho1: f64,
    /// Correlation between endpoints within a subject
    pub rho2: f64,
    /// Allocation ratio, control clusters per treatment cluster
    pub r: f64,
    pub dist: Dist,
    pub search: SearchConfig,
}

impl DesignParams {
    /// Variance inflation from unequal allocation; exactly 2 when r = 1
    pub(crate) fn allocation_factor(&self) -> f64 {
        1.0 + 1.0 / self.r
    }
}

/// Ceiling-rounded integer requirement, or the sentinel for designs whose
/// target cannot be met
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SampleSize {
    Required(u64),
    Infeasible,
}

impl SampleSize {
    /// Rounds a continuous requirement upwards; non-finite or overflowing
    /// requirements are infeasible
    pub(crate) fn from_ceiling(x: f64) -> SampleSize {
        if !x.is_finite() || x < 0.0 || x.ceil() >= u64::MAX as f64 {
            return SampleSize::Infeasible;
        }
        SampleSize::Required((x.ceil() as u64).max(1))
    }

    pub(crate) fn from_search(found: Option<u64>) -> SampleSize {
        match found {
            Some(n) => SampleSize::Required(n),
            None => SampleSize::Infeasible,
        }
    }

    /// Larger of two requirements; infeasible wins
    pub(crate) fn max(self, other: SampleSize) -> SampleSize {
        match (self, other) {
            (SampleSize::Required(a), SampleSize::Required(b)) => SampleSize::Required(a.max(b)),
            _ => SampleSize::Infeasible,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SampleSize::Infeasible)
    }

    /// The integer requirement, or an error for the infeasible sentinel
    pub fn required(self) -> Result<u64, CrtcomputeErr> {
        match self {
            SampleSize::Required(n) => Ok(n),
            SampleSize::Infeasible => Err(InfeasibleDesignError::TargetUnreachable.into()),
        }
    }
}

impl fmt::Display for SampleSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SampleSize::Required(n) => write!(f, "{n}"),
            SampleSize::Infeasible => write!(f, "Inf"),
        }
    }
}

/// Clusters needed in each arm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArmClusters {
    pub treatment: SampleSize,
    pub control: SampleSize,
}

impl ArmClusters {
    /// Control arm gets ceil(r * K1) clusters
    pub(crate) fn allocated(treatment: SampleSize, r: f64) -> ArmClusters {
        let control = match treatment {
            SampleSize::Required(k) => SampleSize::from_ceiling(r * k as f64),
            SampleSize::Infeasible => SampleSize::Infeasible,
        };
        ArmClusters { treatment, control }
    }

    pub(crate) fn balanced(k: SampleSize) -> ArmClusters {
        ArmClusters {
            treatment: k,
            control: k,
        }
    }
}

/// A method's answer: one value, or one per labelled variant
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutcome<T> {
    Single(T),
    Variants(Vec<(&'static str, T)>),
}

impl<T> MethodOutcome<T> {
    pub fn map<U, F>(self, f: F) -> MethodOutcome<U>
    where
        F: Fn(T) -> U,
    {
        match self {
            MethodOutcome::Single(v) => MethodOutcome::Single(f(v)),
            MethodOutcome::Variants(vs) => {
                MethodOutcome::Variants(vs.into_iter().map(|(l, v)| (l, f(v))).collect())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceiling_never_rounds_down() {
        assert_eq!(SampleSize::from_ceiling(7.0001), SampleSize::Required(8));
        assert_eq!(SampleSize::from_ceiling(8.0), SampleSize::Required(8));
        assert_eq!(SampleSize::from_ceiling(0.2), SampleSize::Required(1));
    }

    #[test]
    fn non_finite_is_infeasible() {
        assert!(SampleSize::from_ceiling(f64::INFINITY).is_infeasible());
        assert!(SampleSize::from_ceiling(f64::NAN).is_infeasible());
        assert!(SampleSize::from_ceiling(-3.0).is_infeasible());
    }

    #[test]
    fn infeasible_dominates_max() {
        let a = SampleSize::Required(4);
        assert_eq!(a.max(SampleSize::Required(9)), SampleSize::Required(9));
        assert_eq!(a.max(SampleSize::Infeasible), SampleSize::Infeasible);
    }

    #[test]
    fn required_errors_on_sentinel() {
        assert_eq!(SampleSize::Required(3).required().unwrap(), 3);
        match SampleSize::Infeasible.required() {
            Err(e) => assert_eq!(
                format!("{e}"),
                "infeasible design: target power cannot be reached"
            ),
            Ok(_) => panic!(),
        }
    }

    #[test]
    fn allocated_control_arm() {
        let arms = ArmClusters::allocated(SampleSize::Required(7), 1.5);
        assert_eq!(arms.control, SampleSize::Required(11));
        let arms = ArmClusters::allocated(SampleSize::Required(7), 1.0);
        assert_eq!(arms.control, SampleSize::Required(7));
    }

    #[test]
    fn dist_parsing() {
        assert_eq!("Chi2".parse::<Dist>().unwrap(), Dist::Chi2);
        assert_eq!("F".parse::<Dist>().unwrap(), Dist::F);
        match "chi".parse::<Dist>() {
            Err(CrtcomputeErr::Validation(ValidationError::UnsupportedDist(s))) => {
                assert_eq!(s, "chi")
            }
            other => panic!("expected unsupported dist, got {other:?}"),
        }
    }
}

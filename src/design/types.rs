//----------------------------------------
// design mod types
//----------------------------------------
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::design::error::ValidationError;
use crate::error::CrtcomputeErr;
use crate::methods::types::Dist;
use crate::util::search::SearchConfig;

/// The quantity being solved for
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum Output {
    #[serde(rename = "power")]
    Power,
    /// Clusters per arm
    #[serde(rename = "K")]
    Clusters,
    /// Subjects per cluster
    #[serde(rename = "m")]
    ClusterSize,
}

impl FromStr for Output {
    type Err = CrtcomputeErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "power" => Ok(Output::Power),
            "K" => Ok(Output::Clusters),
            "m" => Ok(Output::ClusterSize),
            other => Err(ValidationError::UnsupportedMode(other.to_string()).into()),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Power => write!(f, "power"),
            Output::Clusters => write!(f, "K"),
            Output::ClusterSize => write!(f, "m"),
        }
    }
}

fn default_alpha() -> f64 {
    0.05
}

fn default_r() -> f64 {
    1.0
}

/// Caller-supplied design. Exactly one of K, m and power is left unset;
/// K and m are kept as raw numbers so that fractional counts can be
/// rejected during validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignInput {
    /// Clusters in the treatment arm
    #[serde(rename = "K", default)]
    pub maybe_k: Option<f64>,
    /// Subjects per cluster
    #[serde(rename = "m", default)]
    pub maybe_m: Option<f64>,
    #[serde(rename = "power", default)]
    pub maybe_power: Option<f64>,
    #[serde(default = "default_alpha")]
    pub alpha: f64,
    pub beta1: f64,
    pub beta2: f64,
    #[serde(rename = "varY1")]
    pub var_y1: f64,
    #[serde(rename = "varY2")]
    pub var_y2: f64,
    pub rho01: f64,
    pub rho02: f64,
    pub rho1: f64,
    pub rho2: f64,
    /// Control clusters per treatment cluster
    #[serde(default = "default_r")]
    pub r: f64,
    #[serde(default)]
    pub dist: Dist,
    #[serde(default)]
    pub search: SearchConfig,
}

impl DesignInput {
    /// Design with the given effects and correlation structure, alpha = 0.05,
    /// equal allocation and nothing yet fixed among K, m and power
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        beta1: f64,
        beta2: f64,
        var_y1: f64,
        var_y2: f64,
        rho01: f64,
        rho02: f64,
        rho1: f64,
        rho2: f64,
    ) -> DesignInput {
        DesignInput {
            maybe_k: None,
            maybe_m: None,
            maybe_power: None,
            alpha: default_alpha(),
            beta1,
            beta2,
            var_y1,
            var_y2,
            rho01,
            rho02,
            rho1,
            rho2,
            r: default_r(),
            dist: Dist::default(),
            search: SearchConfig::default(),
        }
    }

    pub fn with_k(mut self, k: f64) -> Self {
        self.maybe_k = Some(k);
        self
    }

    pub fn with_m(mut self, m: f64) -> Self {
        self.maybe_m = Some(m);
        self
    }

    pub fn with_power(mut self, power: f64) -> Self {
        self.maybe_power = Some(power);
        self
    }

    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_allocation(mut self, r: f64) -> Self {
        self.r = r;
        self
    }

    pub fn with_dist(mut self, dist: Dist) -> Self {
        self.dist = dist;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }
}

use tracing::debug;

use crate::error::CrtcomputeErr;
use crate::methods::endpoint::Endpoint;
use crate::methods::types::{ArmClusters, DesignParams, MethodOutcome, SampleSize};
use crate::methods::DesignMethod;
use crate::ncp::solve_ncp::{chi_squared_power, solve_ncp};
use crate::util::round::round_to;

/// Multiplicity adjustments for testing the two endpoints separately
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Bonferroni,
    Sidak,
    /// Dubey / Armitage-Parmar, which relaxes towards the unadjusted level as
    /// the endpoints become correlated
    Dap,
}

pub const ADJUSTMENTS: [Adjustment; 3] = [Adjustment::Bonferroni, Adjustment::Sidak, Adjustment::Dap];

impl Adjustment {
    pub fn label(&self) -> &'static str {
        match self {
            Adjustment::Bonferroni => "a. Bonferroni",
            Adjustment::Sidak => "b. Sidak",
            Adjustment::Dap => "c. D/AP",
        }
    }

    /// Per-endpoint significance level
    pub fn level(&self, alpha: f64, rho2: f64) -> f64 {
        match self {
            Adjustment::Bonferroni => alpha / 2.0,
            Adjustment::Sidak => 1.0 - (1.0 - alpha).powf(0.5),
            Adjustment::Dap => 1.0 - (1.0 - alpha).powf(1.0 / 2_f64.powf(1.0 - rho2)),
        }
    }
}

fn endpoints(params: &DesignParams) -> [Endpoint; 2] {
    [
        Endpoint {
            beta: params.beta1,
            var: params.var_y1,
            icc: params.rho01,
        },
        Endpoint {
            beta: params.beta2,
            var: params.var_y2,
            icc: params.rho02,
        },
    ]
}

/// Power to reject both endpoint-specific tests, taken as the smaller of the
/// two marginal powers
pub fn adjusted_power(
    adjustment: Adjustment,
    k: u64,
    m: u64,
    params: &DesignParams,
) -> Result<f64, CrtcomputeErr> {
    let level = adjustment.level(params.alpha, params.rho2);
    let c = params.allocation_factor();
    let mut power = f64::INFINITY;
    for endpoint in endpoints(params) {
        let ncp = endpoint.ncp(k as f64, m as f64, c);
        power = power.min(chi_squared_power(level, 1.0, ncp)?);
    }
    let power = round_to(power, 4);
    debug!(?adjustment, level, k, m, power, "adjusted power");
    Ok(power)
}

pub fn adjusted_clusters(
    adjustment: Adjustment,
    power: f64,
    m: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let level = adjustment.level(params.alpha, params.rho2);
    let target_ncp = solve_ncp(level, power, 1.0)?;
    let c = params.allocation_factor();
    let [first, second] = endpoints(params);
    let k = first
        .clusters_for(target_ncp, m as f64, c)
        .max(second.clusters_for(target_ncp, m as f64, c));
    debug!(?adjustment, level, power, m, %k, "adjusted clusters");
    Ok(k)
}

pub fn adjusted_cluster_size(
    adjustment: Adjustment,
    power: f64,
    k: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let level = adjustment.level(params.alpha, params.rho2);
    let target_ncp = solve_ncp(level, power, 1.0)?;
    let c = params.allocation_factor();
    let [first, second] = endpoints(params);
    let m = first
        .cluster_size_for(target_ncp, k as f64, c)
        .max(second.cluster_size_for(target_ncp, k as f64, c));
    debug!(?adjustment, level, power, k, %m, "adjusted cluster size");
    Ok(m)
}

pub struct PValueAdjustment;

impl DesignMethod for PValueAdjustment {
    fn label(&self) -> &'static str {
        "1. P-Value Adjustments"
    }

    fn power(
        &self,
        k: u64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<f64>, CrtcomputeErr> {
        let mut rows = Vec::with_capacity(ADJUSTMENTS.len());
        for adjustment in ADJUSTMENTS {
            rows.push((adjustment.label(), adjusted_power(adjustment, k, m, params)?));
        }
        Ok(MethodOutcome::Variants(rows))
    }

    fn clusters(
        &self,
        power: f64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<ArmClusters>, CrtcomputeErr> {
        let mut rows = Vec::with_capacity(ADJUSTMENTS.len());
        for adjustment in ADJUSTMENTS {
            let k = adjusted_clusters(adjustment, power, m, params)?;
            rows.push((adjustment.label(), ArmClusters::allocated(k, params.r)));
        }
        Ok(MethodOutcome::Variants(rows))
    }

    fn cluster_size(
        &self,
        power: f64,
        k: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<SampleSize>, CrtcomputeErr> {
        let mut rows = Vec::with_capacity(ADJUSTMENTS.len());
        for adjustment in ADJUSTMENTS {
            rows.push((
                adjustment.label(),
                adjusted_cluster_size(adjustment, power, k, params)?,
            ));
        }
        Ok(MethodOutcome::Variants(rows))
    }
}

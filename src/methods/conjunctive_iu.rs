use tracing::debug;

use crate::error::CrtcomputeErr;
use crate::iu_test::{power::iu_power, sample_size::iu_sample_size, types::IuDesign};
use crate::methods::types::{ArmClusters, DesignParams, MethodOutcome, SampleSize};
use crate::methods::DesignMethod;
use crate::util::round::round_to;
use crate::util::search::first_integer_reaching;

/// Clusters are split evenly between the arms
const PROP_TREATED: f64 = 0.5;

fn iu_design(m: u64, params: &DesignParams) -> IuDesign {
    IuDesign {
        betas: [params.beta1, params.beta2],
        deltas: [0.0, 0.0],
        vars: [params.var_y1, params.var_y2],
        icc: [[params.rho01, params.rho1], [params.rho1, params.rho02]],
        cross: [[1.0, params.rho2], [params.rho2, 1.0]],
        prop_treated: PROP_TREATED,
        m: m as f64,
    }
}

fn unrounded_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    iu_power(&iu_design(m, params), 2 * k, params.alpha)
}

pub fn conjunctive_power(k: u64, m: u64, params: &DesignParams) -> Result<f64, CrtcomputeErr> {
    let power = round_to(unrounded_power(k, m, params)?, 4);
    debug!(k, m, power, "conjunctive IU power");
    Ok(power)
}

/// Clusters per arm; the IU routine sizes the trial in total clusters
pub fn conjunctive_clusters(
    power: f64,
    m: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let total = iu_sample_size(&iu_design(m, params), params.alpha, power, &params.search)?;
    let k = match total {
        SampleSize::Required(n) => SampleSize::Required(n.div_ceil(2)),
        SampleSize::Infeasible => SampleSize::Infeasible,
    };
    debug!(power, m, %total, %k, "conjunctive IU clusters");
    Ok(k)
}

pub fn conjunctive_cluster_size(
    power: f64,
    k: u64,
    params: &DesignParams,
) -> Result<SampleSize, CrtcomputeErr> {
    let found = first_integer_reaching(|m| unrounded_power(k, m, params), power, 1, &params.search)?;
    let m = SampleSize::from_search(found);
    debug!(power, k, %m, "conjunctive IU cluster size");
    Ok(m)
}

pub struct ConjunctiveIu;

impl DesignMethod for ConjunctiveIu {
    fn label(&self) -> &'static str {
        "5. Conjunctive IU Test"
    }

    fn power(
        &self,
        k: u64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<f64>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(conjunctive_power(k, m, params)?))
    }

    fn clusters(
        &self,
        power: f64,
        m: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<ArmClusters>, CrtcomputeErr> {
        let k = conjunctive_clusters(power, m, params)?;
        Ok(MethodOutcome::Single(ArmClusters::balanced(k)))
    }

    fn cluster_size(
        &self,
        power: f64,
        k: u64,
        params: &DesignParams,
    ) -> Result<MethodOutcome<SampleSize>, CrtcomputeErr> {
        Ok(MethodOutcome::Single(conjunctive_cluster_size(power, k, params)?))
    }
}

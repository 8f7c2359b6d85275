#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::info;

use crate::design::report::{DesignReport, ReportRow, ReportValue};
use crate::design::types::{DesignInput, Output};
use crate::design::validate::{validate, Target, ValidatedDesign};
use crate::error::CrtcomputeErr;
use crate::methods::types::MethodOutcome;
use crate::methods::{DesignMethod, METHOD_REGISTRY};

fn evaluate_method(
    method: &dyn DesignMethod,
    design: &ValidatedDesign,
) -> Result<MethodOutcome<ReportValue>, CrtcomputeErr> {
    let params = &design.params;
    let outcome = match design.target {
        Target::Power { k, m } => method.power(k, m, params)?.map(ReportValue::Power),
        Target::Clusters { power, m } => method.clusters(power, m, params)?.map(ReportValue::Clusters),
        Target::ClusterSize { power, k } => method
            .cluster_size(power, k, params)?
            .map(ReportValue::ClusterSize),
    };
    Ok(outcome)
}

/// Solves for `output` under every registered method. Fails as a whole if
/// validation or any single method fails.
pub fn compute_design(output: Output, input: &DesignInput) -> Result<DesignReport, CrtcomputeErr> {
    let design = validate(output, input)?;
    info!(%output, target = ?design.target, methods = METHOD_REGISTRY.len(), "computing design");

    #[cfg(feature = "parallel")]
    let outcomes: Result<Vec<_>, CrtcomputeErr> = METHOD_REGISTRY
        .par_iter()
        .map(|method| evaluate_method(*method, &design))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let outcomes: Result<Vec<_>, CrtcomputeErr> = METHOD_REGISTRY
        .iter()
        .map(|method| evaluate_method(*method, &design))
        .collect();
    let outcomes = outcomes?;

    let mut rows = Vec::new();
    for (method, outcome) in METHOD_REGISTRY.iter().zip(outcomes) {
        match outcome {
            MethodOutcome::Single(value) => rows.push(ReportRow {
                label: method.label(),
                value,
            }),
            MethodOutcome::Variants(variants) => {
                rows.push(ReportRow {
                    label: method.label(),
                    value: ReportValue::NotApplicable,
                });
                for (label, value) in variants {
                    rows.push(ReportRow { label, value });
                }
            }
        }
    }

    info!(%output, rows = rows.len(), "design computed");
    Ok(DesignReport { output, rows })
}

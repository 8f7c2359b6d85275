use crate::methods::types::{DesignParams, Dist};
use crate::util::search::SearchConfig;

/// Two continuous endpoints with small effects and modest clustering
pub(crate) fn reference_params() -> DesignParams {
    DesignParams {
        alpha: 0.05,
        beta1: 0.1,
        beta2: 0.1,
        var_y1: 0.23,
        var_y2: 0.25,
        rho01: 0.025,
        rho02: 0.025,
        rho1: 0.01,
        rho2: 0.05,
        r: 1.0,
        dist: Dist::Chi2,
        search: SearchConfig::default(),
    }
}

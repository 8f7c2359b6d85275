//----------------------------------------
// computation mod
//----------------------------------------
pub use crate::design::compute_design::compute_design;
pub use crate::design::report::{DesignReport, ReportRow, ReportValue};
pub use crate::design::types::{DesignInput, Output};
pub use crate::methods::types::{ArmClusters, Dist, SampleSize};
pub use crate::ncp::solve_ncp::solve_ncp;
pub use crate::util::search::{SearchConfig, SearchStrategy};

/// Per-method entry points, for callers who need a single strategy rather
/// than the full comparison
pub mod methods {
    pub use crate::methods::combined_outcome::{
        combined_cluster_size, combined_clusters, combined_params, combined_power, CombinedParams,
    };
    pub use crate::methods::conjunctive_iu::{
        conjunctive_cluster_size, conjunctive_clusters, conjunctive_power,
    };
    pub use crate::methods::disjunctive_2df::{
        disjunctive_cluster_size, disjunctive_clusters, disjunctive_power,
    };
    pub use crate::methods::pval_adj::{
        adjusted_cluster_size, adjusted_clusters, adjusted_power, Adjustment, ADJUSTMENTS,
    };
    pub use crate::methods::single_1df::{
        single_1df_cluster_size, single_1df_clusters, single_1df_power,
    };
    pub use crate::methods::types::{DesignParams, MethodOutcome};
    pub use crate::methods::{DesignMethod, METHOD_REGISTRY};
}

/// The intersection-union routine behind the conjunctive method
pub mod iu {
    pub use crate::iu_test::power::iu_power;
    pub use crate::iu_test::sample_size::iu_sample_size;
    pub use crate::iu_test::types::{IuDesign, N_ENDPOINTS};
}

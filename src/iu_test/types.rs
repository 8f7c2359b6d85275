/// Number of co-primary endpoints handled by the IU routine
pub const N_ENDPOINTS: usize = 2;

/// Design of an intersection-union test in a cluster-randomized trial
#[derive(Debug, Clone, PartialEq)]
pub struct IuDesign {
    /// Effect sizes under the alternative
    pub betas: [f64; N_ENDPOINTS],
    /// Effect sizes under the null
    pub deltas: [f64; N_ENDPOINTS],
    /// Outcome variances
    pub vars: [f64; N_ENDPOINTS],
    /// Intra-cluster correlations; off-diagonal entries correlate different
    /// endpoints of different subjects in the same cluster
    pub icc: [[f64; N_ENDPOINTS]; N_ENDPOINTS],
    /// Correlations between endpoints measured on the same subject
    pub cross: [[f64; N_ENDPOINTS]; N_ENDPOINTS],
    /// Proportion of clusters randomized to treatment
    pub prop_treated: f64,
    /// Subjects per cluster
    pub m: f64,
}

impl IuDesign {
    /// Covariance of the effect estimators, per randomized cluster:
    ///   sqrt(v_k v_l) (cross_kl + (m - 1) icc_kl) / (m p (1 - p))
    pub fn unit_covariance(&self) -> [[f64; N_ENDPOINTS]; N_ENDPOINTS] {
        let allocation = self.m * self.prop_treated * (1.0 - self.prop_treated);
        let mut omega = [[0.0; N_ENDPOINTS]; N_ENDPOINTS];
        for k in 0..N_ENDPOINTS {
            for l in 0..N_ENDPOINTS {
                let sd_product = (self.vars[k] * self.vars[l]).sqrt();
                omega[k][l] =
                    sd_product * (self.cross[k][l] + (self.m - 1.0) * self.icc[k][l]) / allocation;
            }
        }
        omega
    }
}

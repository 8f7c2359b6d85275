use crate::methods::types::SampleSize;

/// A single continuous outcome analysed on its own with a chi^2_1 test,
/// described by its effect, outcome variance and ICC
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Endpoint {
    pub beta: f64,
    pub var: f64,
    pub icc: f64,
}

impl Endpoint {
    /// A nonzero effect measured without noise is detected with certainty
    fn noiseless(&self) -> bool {
        self.var == 0.0 && self.beta != 0.0
    }

    /// Noncentrality with k clusters of size m in the treatment arm and
    /// allocation factor c = 1 + 1/r. Infinite for a noiseless endpoint.
    pub fn ncp(&self, k: f64, m: f64, c: f64) -> f64 {
        if self.beta == 0.0 {
            return 0.0;
        }
        if self.noiseless() {
            return f64::INFINITY;
        }
        let design_effect = 1.0 + (m - 1.0) * self.icc;
        self.beta * self.beta / (c * (self.var / (k * m)) * design_effect)
    }

    /// Clusters needed for the noncentrality to reach target_ncp
    pub fn clusters_for(&self, target_ncp: f64, m: f64, c: f64) -> SampleSize {
        if target_ncp == 0.0 || self.noiseless() {
            return SampleSize::Required(1);
        }
        let design_effect = 1.0 + (m - 1.0) * self.icc;
        SampleSize::from_ceiling(
            c * target_ncp * self.var * design_effect / (m * self.beta * self.beta),
        )
    }

    /// Cluster size needed for the noncentrality to reach target_ncp. The
    /// noncentrality levels off as m grows, so a target above the plateau
    /// is infeasible.
    pub fn cluster_size_for(&self, target_ncp: f64, k: f64, c: f64) -> SampleSize {
        if target_ncp == 0.0 || self.noiseless() {
            return SampleSize::Required(1);
        }
        let denominator = self.beta * self.beta * k - c * target_ncp * self.var * self.icc;
        if !(denominator > 0.0) {
            return SampleSize::Infeasible;
        }
        SampleSize::from_ceiling(c * target_ncp * self.var * (1.0 - self.icc) / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: Endpoint = Endpoint {
        beta: 0.1,
        var: 0.23,
        icc: 0.025,
    };

    #[test]
    fn clusters_reach_target() {
        let target = 7.848879;
        match ENDPOINT.clusters_for(target, 50.0, 2.0) {
            SampleSize::Required(k) => {
                assert!(ENDPOINT.ncp(k as f64, 50.0, 2.0) >= target);
                assert!(ENDPOINT.ncp((k - 1) as f64, 50.0, 2.0) < target);
            }
            SampleSize::Infeasible => panic!("design should be feasible"),
        }
    }

    #[test]
    fn cluster_size_reaches_target() {
        let target = 7.848879;
        match ENDPOINT.cluster_size_for(target, 40.0, 2.0) {
            SampleSize::Required(m) => {
                assert!(ENDPOINT.ncp(40.0, m as f64, 2.0) >= target);
                assert!(ENDPOINT.ncp(40.0, (m - 1) as f64, 2.0) < target);
            }
            SampleSize::Infeasible => panic!("design should be feasible"),
        }
    }

    #[test]
    fn plateau_makes_cluster_size_infeasible() {
        // k beta^2 / (c var icc) = 2 * 0.01 / (2 * 0.23 * 0.025) < 7.85
        assert!(ENDPOINT.cluster_size_for(7.848879, 2.0, 2.0).is_infeasible());
    }

    #[test]
    fn zero_effect_cannot_be_powered() {
        let null = Endpoint {
            beta: 0.0,
            ..ENDPOINT
        };
        assert!(null.clusters_for(7.8, 10.0, 2.0).is_infeasible());
        assert!(null.cluster_size_for(7.8, 10.0, 2.0).is_infeasible());
    }

    #[test]
    fn zero_target_needs_one() {
        assert_eq!(ENDPOINT.clusters_for(0.0, 10.0, 2.0), SampleSize::Required(1));
        assert_eq!(ENDPOINT.cluster_size_for(0.0, 10.0, 2.0), SampleSize::Required(1));
    }

    #[test]
    fn zero_variance() {
        let exact = Endpoint {
            var: 0.0,
            ..ENDPOINT
        };
        assert_eq!(exact.ncp(1.0, 1.0, 2.0), f64::INFINITY);
        assert_eq!(exact.clusters_for(7.8, 10.0, 2.0), SampleSize::Required(1));
        assert_eq!(exact.cluster_size_for(7.8, 10.0, 2.0), SampleSize::Required(1));

        let null = Endpoint { beta: 0.0, ..exact };
        assert_eq!(null.ncp(10.0, 10.0, 2.0), 0.0);
        assert!(null.clusters_for(7.8, 10.0, 2.0).is_infeasible());
    }
}

use crate::error::CrtcomputeErr;
use crate::methods::error::MethodError;
use crate::methods::types::DesignParams;

// Determinants this small relative to v11 v22 count as singular
const SINGULAR_TOL: f64 = 1e-12;

/// Covariance of the two cluster-mean outcomes, scaled up by the cluster
/// size m:
///   V_kl = sqrt(v_k v_l) (rho2_kl + (m - 1) rho01_kl)
/// with rho2_kk = 1 and rho01_kk the endpoint's ICC.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EndpointCovariance {
    pub v11: f64,
    pub v12: f64,
    pub v22: f64,
}

impl EndpointCovariance {
    pub fn new(params: &DesignParams, m: f64) -> EndpointCovariance {
        let sd_product = (params.var_y1 * params.var_y2).sqrt();
        EndpointCovariance {
            v11: params.var_y1 * (1.0 + (m - 1.0) * params.rho01),
            v12: sd_product * (params.rho2 + (m - 1.0) * params.rho1),
            v22: params.var_y2 * (1.0 + (m - 1.0) * params.rho02),
        }
    }

    /// Inverse as (a, b, d) for the symmetric matrix [[a, b], [b, d]]
    fn inverse(&self) -> Result<(f64, f64, f64), CrtcomputeErr> {
        let determinant = self.v11 * self.v22 - self.v12 * self.v12;
        if self.v11 <= 0.0 || !(determinant > SINGULAR_TOL * self.v11 * self.v22) {
            return Err(MethodError::SingularCovariance { determinant }.into());
        }
        Ok((
            self.v22 / determinant,
            -self.v12 / determinant,
            self.v11 / determinant,
        ))
    }

    /// beta' V^-1 beta
    pub fn wald_quadratic(&self, beta: [f64; 2]) -> Result<f64, CrtcomputeErr> {
        let (a, b, d) = self.inverse()?;
        Ok(a * beta[0] * beta[0] + 2.0 * b * beta[0] * beta[1] + d * beta[1] * beta[1])
    }

    /// (1' V^-1 beta)^2 / (1' V^-1 1), the GLS-weighted sum of effects
    pub fn combined_quadratic(&self, beta: [f64; 2]) -> Result<f64, CrtcomputeErr> {
        let (a, b, d) = self.inverse()?;
        let weighted_effect = (a + b) * beta[0] + (b + d) * beta[1];
        let weight_total = a + 2.0 * b + d;
        Ok(weighted_effect * weighted_effect / weight_total)
    }
}

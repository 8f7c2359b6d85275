use tracing::debug;

use crate::error::CrtcomputeErr;
use crate::iu_test::power::iu_power;
use crate::iu_test::types::{IuDesign, N_ENDPOINTS};
use crate::methods::types::SampleSize;
use crate::util::search::{first_integer_reaching, SearchConfig};

/// Smallest total number of clusters whose IU power reaches the target
pub fn iu_sample_size(
    design: &IuDesign,
    alpha: f64,
    power: f64,
    config: &SearchConfig,
) -> Result<SampleSize, CrtcomputeErr> {
    // First total leaving one degree of freedom
    let start = 2 * N_ENDPOINTS as u64 + 1;
    let found = first_integer_reaching(|n| iu_power(design, n, alpha), power, start, config)?;
    let n = SampleSize::from_search(found);
    debug!(alpha, power, %n, "IU sample size");
    Ok(n)
}

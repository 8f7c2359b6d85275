use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::CrtcomputeErr;

/// Upper limit for integer searches over cluster counts and cluster sizes
pub const DEFAULT_SEARCH_CEILING: u64 = 1_000_000;

/// How integer searches walk towards the target
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStrategy {
    /// Step by one from the starting value
    Linear,
    /// Double until the target is bracketed, then bisect
    #[default]
    Bisection,
}

/// Settings for the searches that have no closed form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Largest value tried before giving up and reporting an infeasible design
    pub ceiling: u64,
    pub strategy: SearchStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            ceiling: DEFAULT_SEARCH_CEILING,
            strategy: SearchStrategy::default(),
        }
    }
}

/// Given a non-decreasing function f(n) over the integers, finds the smallest
/// n in [start, ceiling] with f(n) >= target. Returns None if even f(ceiling)
/// falls short. Both strategies return the same n.
pub fn first_integer_reaching<F>(
    f: F,
    target: f64,
    start: u64,
    config: &SearchConfig,
) -> Result<Option<u64>, CrtcomputeErr>
where
    F: Fn(u64) -> Result<f64, CrtcomputeErr>,
{
    let start = start.max(1);
    let ceiling = config.ceiling;
    if start > ceiling {
        return Ok(None);
    }

    match config.strategy {
        SearchStrategy::Linear => {
            for n in start..=ceiling {
                let y = f(n)?;
                trace!(n, y, "linear search step");
                if y >= target {
                    return Ok(Some(n));
                }
            }
            warn!(ceiling, target, "search reached its ceiling without reaching target");
            Ok(None)
        }
        SearchStrategy::Bisection => {
            if f(start)? >= target {
                return Ok(Some(start));
            }

            // Set window for search; f(lower) < target <= f(upper)
            let mut lower = start;
            let mut upper = start;
            loop {
                upper = upper.saturating_mul(2).min(ceiling);
                let y = f(upper)?;
                trace!(upper, y, "widening search window");
                if y >= target {
                    break;
                }
                if upper == ceiling {
                    warn!(ceiling, target, "search reached its ceiling without reaching target");
                    return Ok(None);
                }
                lower = upper;
            }

            // Perform search
            while upper - lower > 1 {
                let mid = lower + (upper - lower) / 2;
                if f(mid)? >= target {
                    upper = mid;
                } else {
                    lower = mid;
                }
            }
            Ok(Some(upper))
        }
    }
}

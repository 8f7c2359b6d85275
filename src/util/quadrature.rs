/// Integrates f over [a, b] by splitting into equal panels and running
/// adaptive Simpson on each. `tol` is the absolute tolerance for the whole
/// interval.
pub fn integrate<F>(f: &F, a: f64, b: f64, panels: usize, tol: f64) -> f64
where
    F: Fn(f64) -> f64,
{
    let panels = panels.max(1);
    let width = (b - a) / panels as f64;
    let panel_tol = tol / panels as f64;
    (0..panels)
        .map(|i| {
            let lo = a + width * i as f64;
            let hi = if i + 1 == panels { b } else { lo + width };
            adaptive_simpson(f, lo, hi, panel_tol, MAX_DEPTH)
        })
        .sum()
}

const MAX_DEPTH: u32 = 30;

fn adaptive_simpson<F>(f: &F, a: f64, b: f64, tol: f64, max_depth: u32) -> f64
where
    F: Fn(f64) -> f64,
{
    let fa = f(a);
    let fb = f(b);
    let fm = f((a + b) / 2.0);
    let whole = (b - a) / 6.0 * (fa + 4.0 * fm + fb);
    simpson_step(f, (a, fa), (b, fb), fm, whole, tol, max_depth)
}

fn simpson_step<F>(
    f: &F,
    (a, fa): (f64, f64),
    (b, fb): (f64, f64),
    fm: f64,
    whole: f64,
    tol: f64,
    depth: u32,
) -> f64
where
    F: Fn(f64) -> f64,
{
    let m = (a + b) / 2.0;
    let flm = f((a + m) / 2.0);
    let frm = f((m + b) / 2.0);
    let left = (m - a) / 6.0 * (fa + 4.0 * flm + fm);
    let right = (b - m) / 6.0 * (fm + 4.0 * frm + fb);
    let delta = left + right - whole;

    // Richardson correction once the halves agree
    if depth == 0 || delta.abs() <= 15.0 * tol {
        return left + right + delta / 15.0;
    }
    simpson_step(f, (a, fa), (m, fm), flm, left, tol / 2.0, depth - 1)
        + simpson_step(f, (m, fm), (b, fb), frm, right, tol / 2.0, depth - 1)
}

use std::f64::consts::PI;

use crate::distributions::std_normal::std_normal_cdf;

const TWO_PI: f64 = 2.0 * PI;

// Gauss-Legendre nodes on [-1, 0] and weights for 6, 12 and 20 point rules;
// each node is used together with its mirror image
const GL6_X: [f64; 3] = [-0.932_469_514_203_152_2, -0.661_209_386_466_264_7, -0.238_619_186_083_197];
const GL6_W: [f64; 3] = [0.171_324_492_379_170_5, 0.360_761_573_048_138_4, 0.467_913_934_572_690_4];

const GL12_X: [f64; 6] = [
    -0.981_560_634_246_719_1,
    -0.904_117_256_370_475,
    -0.769_902_674_194_305,
    -0.587_317_954_286_617_1,
    -0.367_831_498_998_180_2,
    -0.125_233_408_511_469_2,
];
const GL12_W: [f64; 6] = [
    0.047_175_336_386_511_77,
    0.106_939_325_995_318_3,
    0.160_078_328_543_346_4,
    0.203_167_426_723_065_9,
    0.233_492_536_538_354_7,
    0.249_147_045_813_402_9,
];

const GL20_X: [f64; 10] = [
    -0.993_128_599_185_094_9,
    -0.963_971_927_277_913_8,
    -0.912_234_428_251_325_9,
    -0.839_116_971_822_218_8,
    -0.746_331_906_460_150_8,
    -0.636_053_680_726_515,
    -0.510_867_001_950_827_1,
    -0.373_706_088_715_419_6,
    -0.227_785_851_141_645_1,
    -0.076_526_521_133_497_33,
];
const GL20_W: [f64; 10] = [
    0.017_614_007_139_152_12,
    0.040_601_429_800_386_94,
    0.062_672_048_334_109_06,
    0.083_276_741_576_704_75,
    0.101_930_119_817_240_4,
    0.118_194_531_961_518_4,
    0.131_688_638_449_176_6,
    0.142_096_109_318_382_1,
    0.149_172_986_472_603_7,
    0.152_753_387_130_725_9,
];

/// P(X > h, Y > k) for a standard bivariate normal with correlation rho.
///
/// Genz (2004), "Numerical computation of rectangular bivariate and
/// trivariate normal and t probabilities": Drezner-Wesolowsky for moderate
/// correlations, an asymptotic expansion near |rho| = 1.
pub fn bivariate_normal_upper(h: f64, k: f64, rho: f64) -> f64 {
    if h == f64::INFINITY || k == f64::INFINITY {
        return 0.0;
    }
    if h == f64::NEG_INFINITY {
        return if k == f64::NEG_INFINITY {
            1.0
        } else {
            std_normal_cdf(-k)
        };
    }
    if k == f64::NEG_INFINITY {
        return std_normal_cdf(-h);
    }
    if rho == 0.0 {
        return std_normal_cdf(-h) * std_normal_cdf(-k);
    }

    let (x, w): (&[f64], &[f64]) = if rho.abs() < 0.3 {
        (&GL6_X, &GL6_W)
    } else if rho.abs() < 0.75 {
        (&GL12_X, &GL12_W)
    } else {
        (&GL20_X, &GL20_W)
    };

    let mut hk = h * k;
    let mut bvn = 0.0;

    if rho.abs() < 0.925 {
        let hs = (h * h + k * k) / 2.0;
        let asr = rho.asin();
        for (xi, wi) in x.iter().zip(w) {
            for sign in [-1.0, 1.0] {
                let sn = (asr * (sign * xi + 1.0) / 2.0).sin();
                bvn += wi * ((sn * hk - hs) / (1.0 - sn * sn)).exp();
            }
        }
        return bvn * asr / (2.0 * TWO_PI) + std_normal_cdf(-h) * std_normal_cdf(-k);
    }

    let mut k = k;
    if rho < 0.0 {
        k = -k;
        hk = -hk;
    }

    if rho.abs() < 1.0 {
        let a_s = (1.0 - rho) * (1.0 + rho);
        let mut a = a_s.sqrt();
        let bs = (h - k).powi(2);
        let c = (4.0 - hk) / 8.0;
        let d = (12.0 - hk) / 16.0;
        bvn = a
            * (-(bs / a_s + hk) / 2.0).exp()
            * (1.0 - c * (bs - a_s) * (1.0 - d * bs / 5.0) / 3.0 + c * d * a_s * a_s / 5.0);
        if hk > -160.0 {
            let b = bs.sqrt();
            bvn -= (-hk / 2.0).exp()
                * TWO_PI.sqrt()
                * std_normal_cdf(-b / a)
                * b
                * (1.0 - c * bs * (1.0 - d * bs / 5.0) / 3.0);
        }
        a /= 2.0;
        for (xi, wi) in x.iter().zip(w) {
            for sign in [-1.0, 1.0] {
                let xs = (a * (sign * xi + 1.0)).powi(2);
                let rs = (1.0 - xs).sqrt();
                bvn += a
                    * wi
                    * ((-bs / (2.0 * xs) - hk / (1.0 + rs)).exp() / rs
                        - (-(bs / xs + hk) / 2.0).exp() * (1.0 + c * xs * (1.0 + d * xs)));
            }
        }
        bvn = -bvn / TWO_PI;
    }

    if rho > 0.0 {
        bvn += std_normal_cdf(-h.max(k));
    } else {
        bvn = -bvn;
        if k > h {
            if h < 0.0 {
                bvn += std_normal_cdf(k) - std_normal_cdf(h);
            } else {
                bvn += std_normal_cdf(-h) - std_normal_cdf(-k);
            }
        }
    }
    bvn.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Sheppard: P(X > 0, Y > 0) = 1/4 + asin(rho) / (2 pi)
    fn orthant(rho: f64) -> f64 {
        0.25 + rho.asin() / TWO_PI
    }

    #[test]
    fn orthant_probabilities() {
        for rho in [-0.99, -0.95, -0.5, -0.1, 0.2, 0.5, 0.8, 0.95, 0.99] {
            let p = bivariate_normal_upper(0.0, 0.0, rho);
            assert!(
                (p - orthant(rho)).abs() < 1e-10,
                "rho {rho}: got {p}, expected {}",
                orthant(rho)
            );
        }
    }

    #[test]
    fn independent_is_product() {
        let p = bivariate_normal_upper(0.5, -1.2, 0.0);
        let expected = std_normal_cdf(-0.5) * std_normal_cdf(1.2);
        assert!((p - expected).abs() < 1e-15);
    }

    #[test]
    fn perfect_correlation() {
        let p = bivariate_normal_upper(0.3, 1.1, 1.0);
        assert!((p - std_normal_cdf(-1.1)).abs() < 1e-15);

        // X > h and -X > k, i.e. h < X < -k
        let p = bivariate_normal_upper(-1.0, -0.5, -1.0);
        assert!((p - (std_normal_cdf(0.5) - std_normal_cdf(-1.0))).abs() < 1e-15);
    }

    #[test]
    fn symmetric_in_arguments() {
        for rho in [-0.6, 0.4, 0.93] {
            let p1 = bivariate_normal_upper(0.7, -0.2, rho);
            let p2 = bivariate_normal_upper(-0.2, 0.7, rho);
            assert!((p1 - p2).abs() < 1e-12);
        }
    }

    #[test]
    fn continuous_across_algorithm_switch() {
        // Methods change at |rho| = 0.925
        let below = bivariate_normal_upper(0.4, 0.9, 0.924_999);
        let above = bivariate_normal_upper(0.4, 0.9, 0.925_001);
        assert!((below - above).abs() < 1e-6);
    }

    #[test]
    fn infinite_bounds() {
        assert_eq!(bivariate_normal_upper(f64::INFINITY, 0.0, 0.5), 0.0);
        assert_eq!(bivariate_normal_upper(f64::NEG_INFINITY, f64::NEG_INFINITY, 0.5), 1.0);
        let p = bivariate_normal_upper(f64::NEG_INFINITY, 1.0, 0.5);
        assert!((p - std_normal_cdf(-1.0)).abs() < 1e-15);
    }
}

//! Scalar signal kernel: gradient, median filter, zero crossings.
//!
//! Index conventions match the rest of the crate: a crossing index is
//! the first sample on the new side of zero.

/// Indices of rising zero crossings: `n` where `x[n] >= 0 && x[n-1] < 0`.
pub fn rising_zerocross(x: &[f64]) -> Vec<usize> {
    x.windows(2)
        .enumerate()
        .filter(|(_, w)| w[1] >= 0.0 && w[0] < 0.0)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Indices of falling zero crossings, defined as rising crossings of `-x`.
pub fn falling_zerocross(x: &[f64]) -> Vec<usize> {
    x.windows(2)
        .enumerate()
        .filter(|(_, w)| -w[1] >= 0.0 && -w[0] < 0.0)
        .map(|(i, _)| i + 1)
        .collect()
}

/// Central-difference gradient with one-sided differences at the ends.
///
/// For fewer than two samples the gradient is all zeros.
pub fn gradient(x: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n < 2 {
        return vec![0.0; n];
    }
    let mut g = Vec::with_capacity(n);
    g.push(x[1] - x[0]);
    for i in 1..n - 1 {
        g.push((x[i + 1] - x[i - 1]) / 2.0);
    }
    g.push(x[n - 1] - x[n - 2]);
    g
}

/// Median filter with an odd kernel length and zero padding at the
/// edges. A single-sample outlier is replaced by the local median;
/// `kernel = 1` is the identity.
pub fn median_filter(x: &[f64], kernel: usize) -> Vec<f64> {
    assert!(kernel % 2 == 1, "median kernel must be odd, got {kernel}");
    if kernel == 1 || x.is_empty() {
        return x.to_vec();
    }

    let half = kernel / 2;
    let mut window = Vec::with_capacity(kernel);
    let mut out = Vec::with_capacity(x.len());

    for i in 0..x.len() {
        window.clear();
        for offset in 0..kernel {
            let j = i as isize + offset as isize - half as isize;
            if j >= 0 && (j as usize) < x.len() {
                window.push(x[j as usize]);
            } else {
                window.push(0.0);
            }
        }
        window.sort_by(|a, b| a.total_cmp(b));
        out.push(window[half]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Smooth hump dipping below zero once and recovering once.
    fn hump() -> Vec<f64> {
        vec![3.0, 2.0, 1.0, -1.0, -2.0, -1.5, 0.5, 2.0, 3.0]
    }

    #[test]
    fn test_single_hump_crossings() {
        let x = hump();
        assert_eq!(falling_zerocross(&x), vec![3]);
        assert_eq!(rising_zerocross(&x), vec![6]);
    }

    #[test]
    fn test_falling_is_rising_of_negation() {
        let x = hump();
        let negated: Vec<f64> = x.iter().map(|v| -v).collect();
        assert_eq!(falling_zerocross(&x), rising_zerocross(&negated));
    }

    #[test]
    fn test_constant_zero_has_no_crossings() {
        let x = vec![0.0; 20];
        assert!(rising_zerocross(&x).is_empty());
        assert!(falling_zerocross(&x).is_empty());
    }

    #[test]
    fn test_rising_boundary_is_inclusive() {
        // x[n] == 0 counts as already crossed
        let x = vec![-1.0, 0.0, 1.0];
        assert_eq!(rising_zerocross(&x), vec![1]);
    }

    #[test]
    fn test_gradient_linear_ramp() {
        let x: Vec<f64> = (0..10).map(|i| 2.0 * i as f64).collect();
        let g = gradient(&x);
        assert_eq!(g.len(), 10);
        for v in g {
            assert!((v - 2.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_gradient_endpoints_one_sided() {
        let x = vec![0.0, 1.0, 4.0, 9.0];
        let g = gradient(&x);
        assert_eq!(g[0], 1.0);
        assert_eq!(g[1], 2.0);
        assert_eq!(g[2], 4.0);
        assert_eq!(g[3], 5.0);
    }

    #[test]
    fn test_gradient_degenerate() {
        assert_eq!(gradient(&[]), Vec::<f64>::new());
        assert_eq!(gradient(&[7.0]), vec![0.0]);
    }

    #[test]
    fn test_median_filter_removes_spike() {
        let x = vec![1.0, 1.0, 50.0, 1.0, 1.0];
        let filtered = median_filter(&x, 3);
        assert_eq!(filtered[2], 1.0);
    }

    #[test]
    fn test_median_filter_zero_pads_edges() {
        // window at index 0 is {0, 4, 4} -> median 4; positive plateaus
        // keep their interior but edges see the implicit zero
        let x = vec![4.0, 4.0, 4.0];
        let filtered = median_filter(&x, 3);
        assert_eq!(filtered, vec![4.0, 4.0, 4.0]);

        let filtered5 = median_filter(&x, 5);
        // window at index 0 is {0, 0, 4, 4, 4} -> median 4
        assert_eq!(filtered5[0], 4.0);
        // window at index 1 is {0, 4, 4, 4, 0} -> median 4
        assert_eq!(filtered5[1], 4.0);
    }

    #[test]
    fn test_median_filter_identity_kernel() {
        let x = vec![3.0, 1.0, 2.0];
        assert_eq!(median_filter(&x, 1), x);
    }

    #[test]
    #[should_panic(expected = "median kernel must be odd")]
    fn test_median_filter_even_kernel_panics() {
        median_filter(&[1.0, 2.0], 2);
    }
}

/// The normalized sinc function, sin(pi * x) / (pi * x), with sinc(0) = 1.
/// This is the ideal low-pass impulse response that the window method truncates; a low-pass with Nyquist-normalized cutoff `c` has taps `c * sinc(c * m)` for tap offset `m` from the filter center.
use std::f64::consts::PI;

pub fn sinc(x: f64) -> f64 {
    if x.abs() < 1e-15 {
        1.0
    } else {
        (PI * x).sin() / (PI * x)
    }
}

/// Evaluates `cut_off * sinc(cut_off * m)` at the `n` tap offsets `m = i - (n - 1) / 2`, i.e. the unwindowed low-pass prototype centered on the filter midpoint.
/// `cut_off` is Nyquist-normalized, so 1.0 is the full band.
pub fn generate_centered_sinc(n: usize, cut_off: f64) -> Vec<f64> {
    let alpha = 0.5 * (n as f64 - 1.0);
    (0..n)
        .map(|i| {
            let m = i as f64 - alpha;
            cut_off * sinc(cut_off * m)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sinc_at_zero_and_integers() {
        assert_eq!(sinc(0.0), 1.0);
        for k in 1..6 {
            assert!(sinc(k as f64).abs() < 1e-15);
            assert!(sinc(-(k as f64)).abs() < 1e-15);
        }
    }

    #[test]
    fn test_sinc_half() {
        assert!((sinc(0.5) - 2.0 / PI).abs() < 1e-15);
    }

    #[test]
    fn test_centered_sinc_is_symmetric() {
        let h = generate_centered_sinc(8, 0.5);
        assert_eq!(h.len(), 8);
        for i in 0..4 {
            assert_eq!(h[i], h[7 - i]);
        }
        // Odd length has its peak exactly at the center.
        let h = generate_centered_sinc(5, 0.25);
        assert_eq!(h[2], 0.25);
    }
}

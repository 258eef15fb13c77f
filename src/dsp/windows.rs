/// Window functions used by the window method of FIR design.
/// A window tapers the truncated ideal impulse response towards its ends, trading transition width against stopband attenuation. Filter design uses the symmetric (`sym = true`) form; the periodic form is kept for spectral analysis of test signals.
use std::f64::consts::PI;

fn len_guard(m: usize) -> Option<Vec<f64>> {
    if m <= 1 {
        Some(vec![1.0; m])
    } else {
        None
    }
}

fn extend(m: usize, sym: bool) -> (usize, bool) {
    if sym {
        (m, false)
    } else {
        (m + 1, true)
    }
}

fn truncate(mut w: Vec<f64>, needed: bool) -> Vec<f64> {
    if needed {
        w.pop();
    }
    w
}

fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    if n == 0 {
        return vec![];
    }
    if n == 1 {
        return vec![start];
    }
    let step = (stop - start) / (n - 1) as f64;
    (0..n).map(|i| start + i as f64 * step).collect()
}

/// Modified Bessel function of the first kind, order 0.
/// Summed from its power series `sum (x^2/4)^k / (k!)^2`. Every term is positive, so the partial sums are accurate to a few ulp for the beta values used in filter design.
pub fn i0(x: f64) -> f64 {
    let q = 0.25 * x * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    let mut k = 1.0;
    while k < 1000.0 {
        term *= q / (k * k);
        sum += term;
        if term <= sum * f64::EPSILON * 0.5 {
            break;
        }
        k += 1.0;
    }
    sum
}

/// Window selection for `generate_window` and the FIR design primitive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WindowType {
    Boxcar,
    Hamming,
    Hann,
    Kaiser { beta: f64 },
}

pub fn generate_window(window_type: WindowType, m: usize, sym: bool) -> Vec<f64> {
    match window_type {
        WindowType::Boxcar => boxcar(m, sym),
        WindowType::Hamming => hamming(m, sym),
        WindowType::Hann => hann(m, sym),
        WindowType::Kaiser { beta } => kaiser(m, beta, sym),
    }
}

/// Sum of cosines `sum a[k] cos(k * x)` over `x` in `[-pi, pi]`. Hamming and Hann are the two-term special cases.
pub fn general_cosine(m: usize, a: &[f64], sym: bool) -> Vec<f64> {
    if let Some(w) = len_guard(m) {
        return w;
    }
    let (m2, needs_trunc) = extend(m, sym);
    let fac = linspace(-PI, PI, m2);
    let mut w = vec![0.0; m2];
    for (k, ak) in a.iter().enumerate() {
        for (wn, x) in w.iter_mut().zip(fac.iter()) {
            *wn += ak * ((k as f64) * x).cos();
        }
    }
    truncate(w, needs_trunc)
}

/// Rectangular window: plain truncation of the ideal response.
pub fn boxcar(m: usize, _sym: bool) -> Vec<f64> {
    vec![1.0; m]
}

pub fn general_hamming(m: usize, alpha: f64, sym: bool) -> Vec<f64> {
    general_cosine(m, &[alpha, 1.0 - alpha], sym)
}

pub fn hamming(m: usize, sym: bool) -> Vec<f64> {
    general_hamming(m, 0.54, sym)
}

pub fn hann(m: usize, sym: bool) -> Vec<f64> {
    general_hamming(m, 0.5, sym)
}

/// The Kaiser window, `i0(beta * sqrt(1 - ((n - alpha) / alpha)^2)) / i0(beta)` with `alpha = (m - 1) / 2`.
/// `beta` sets the shape: larger values lower the sidelobes and widen the main lobe. The endpoints equal `1 / i0(beta)` and the center (odd `m`) equals 1.
pub fn kaiser(m: usize, beta: f64, sym: bool) -> Vec<f64> {
    if let Some(w) = len_guard(m) {
        return w;
    }
    let (m2, needs_trunc) = extend(m, sym);
    let alpha = (m2 as f64 - 1.0) / 2.0;
    let i0b = i0(beta);
    let mut w = vec![0.0; m2];
    for (i, wn) in w.iter_mut().enumerate() {
        let t = 1.0 - ((i as f64 - alpha) / alpha).powi(2);
        *wn = i0(beta * t.max(0.0).sqrt()) / i0b;
    }
    truncate(w, needs_trunc)
}

/// Kaiser's empirical beta for a stopband attenuation of `a` dB.
pub fn kaiser_beta(a: f64) -> f64 {
    if a > 50.0 {
        0.1102 * (a - 8.7)
    } else if a > 21.0 {
        0.5842 * (a - 21.0).powf(0.4) + 0.07886 * (a - 21.0)
    } else {
        0.0
    }
}

/// Inverse of `kaiser_beta` on its linear (> 50 dB) branch; returns the stopband attenuation in dB that a given beta targets.
/// Below that branch the relation is not linear and this returns 50 dB as a floor.
pub fn kaiser_attenuation(beta: f64) -> f64 {
    let a = beta / 0.1102 + 8.7;
    a.max(50.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close_vec(actual: &[f64], expected: &[f64], tol: f64) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected.iter()) {
            assert!((a - e).abs() < tol, "actual={a}, expected={e}, tol={tol}");
        }
    }

    #[test]
    fn test_i0_known_values() {
        assert_eq!(i0(0.0), 1.0);
        assert!((i0(1.0) - 1.266_065_877_752_008_4).abs() < 1e-14);
        assert!((i0(2.0) - 2.279_585_302_336_067_3).abs() < 1e-14);
        assert_eq!(i0(-3.0), i0(3.0));
    }

    #[test]
    fn test_short_windows() {
        assert!(kaiser(0, 14.0, true).is_empty());
        assert_eq!(kaiser(1, 14.0, true), vec![1.0]);
        assert_eq!(hamming(1, true), vec![1.0]);
    }

    #[test]
    fn test_kaiser_shape() {
        let beta = 14.0;
        let w = kaiser(7, beta, true);
        assert_eq!(w.len(), 7);
        assert!((w[3] - 1.0).abs() < 1e-15);
        assert!((w[0] - 1.0 / i0(beta)).abs() < 1e-18);
        for i in 0..3 {
            assert_eq!(w[i], w[6 - i]);
            assert!(w[i] < w[i + 1]);
        }
    }

    #[test]
    fn test_kaiser_zero_beta_is_boxcar() {
        assert_close_vec(&kaiser(9, 0.0, true), &boxcar(9, true), 1e-15);
    }

    #[test]
    fn test_periodic_kaiser_drops_last_point() {
        let sym = kaiser(9, 8.0, true);
        let per = kaiser(8, 8.0, false);
        assert_close_vec(&per, &sym[..8], 1e-15);
    }

    #[test]
    fn test_hamming_and_hann() {
        let w = hamming(5, true);
        assert_close_vec(&w, &[0.08, 0.54, 1.0, 0.54, 0.08], 1e-12);
        let w = hann(5, true);
        assert_close_vec(&w, &[0.0, 0.5, 1.0, 0.5, 0.0], 1e-12);
    }

    #[test]
    fn test_generate_window_dispatch() {
        assert_eq!(
            generate_window(WindowType::Kaiser { beta: 14.0 }, 16, true),
            kaiser(16, 14.0, true)
        );
        assert_eq!(generate_window(WindowType::Boxcar, 4, true), vec![1.0; 4]);
    }

    #[test]
    fn test_kaiser_beta_round_trip() {
        let a = kaiser_attenuation(14.0);
        assert!((a - 135.74).abs() < 0.01);
        assert!((kaiser_beta(a) - 14.0).abs() < 1e-12);
        assert_eq!(kaiser_beta(10.0), 0.0);
    }
}

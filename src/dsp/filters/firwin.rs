use tracing::trace;

use crate::{
    dsp::{
        sinc::generate_centered_sinc,
        windows::{self, WindowType},
    },
    prelude::ErrorsFirgen,
};

/// Low-pass FIR design using the window method, following the defaults of scipy.signal.firwin
/// (pass-zero, `scale=True`, `fs=2` so that `cutoff` is Nyquist-normalized).
///
/// The ideal response `cutoff * sinc(cutoff * m)` is truncated to `numtaps` points, multiplied by the
/// symmetric window, and rescaled so the response at DC (the sum of the taps) is exactly 1.
///
/// `cutoff` must lie in `(0, 1]`. A cutoff of 1 passes the whole band; scipy rejects it, but here it
/// designs the degenerate full-band filter so that a conversion factor of 1 still produces taps.
pub fn firwin_lowpass(numtaps: usize, cutoff: f64, window: WindowType) -> Result<Vec<f64>, ErrorsFirgen> {
    if numtaps == 0 {
        return Err(ErrorsFirgen::InvalidInputRange("numtaps must be greater than 0"));
    }
    if !cutoff.is_finite() || cutoff <= 0.0 || cutoff > 1.0 {
        return Err(ErrorsFirgen::InvalidInputRange(
            "cutoff must be in (0, 1] relative to Nyquist",
        ));
    }

    let mut h = generate_centered_sinc(numtaps, cutoff);
    let win = windows::generate_window(window, numtaps, true);
    for (hn, wn) in h.iter_mut().zip(win.iter()) {
        *hn *= *wn;
    }

    let s: f64 = h.iter().sum();
    trace!(numtaps, cutoff, dc_gain = s, "unscaled windowed sinc");
    if s != 0.0 {
        for hn in &mut h {
            *hn /= s;
        }
    }

    Ok(h)
}

/// The windowed-design seam used by the rate-conversion designer.
///
/// Implementations return exactly `tap_count` coefficients of a low-pass with Nyquist-normalized
/// `cutoff`, shaped by `window`, and must be deterministic.
pub trait FilterDesignPrimitive {
    fn design(&self, tap_count: usize, cutoff: f64, window: WindowType) -> Result<Vec<f64>, ErrorsFirgen>;
}

/// Reference primitive backed by [`firwin_lowpass`].
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowedSincDesign;

impl FilterDesignPrimitive for WindowedSincDesign {
    fn design(&self, tap_count: usize, cutoff: f64, window: WindowType) -> Result<Vec<f64>, ErrorsFirgen> {
        firwin_lowpass(tap_count, cutoff, window)
    }
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
    fn test_firwin_lowpass_hamming_3_taps() {
        // scipy.signal.firwin(3, 0.1): sinc samples at m = -1, 0, 1 weighted by hamming(3) = [0.08, 1, 0.08].
        let side = 0.1 * crate::dsp::sinc::sinc(0.1) * 0.08;
        let center = 0.1;
        let s = 2.0 * side + center;
        let h = firwin_lowpass(3, 0.1, WindowType::Hamming).unwrap();
        assert_close_vec(&h, &[side / s, center / s, side / s], 1e-15);
    }

    #[test]
    fn test_firwin_unit_dc_gain() {
        for (n, c) in [(4, 0.5), (31, 0.25), (128, 0.5), (256, 0.25), (7, 0.9)] {
            let h = firwin_lowpass(n, c, WindowType::Kaiser { beta: 14.0 }).unwrap();
            assert_eq!(h.len(), n);
            let s: f64 = h.iter().sum();
            assert!((s - 1.0).abs() < 1e-12, "n={n}, c={c}, sum={s}");
        }
    }

    #[test]
    fn test_firwin_linear_phase() {
        let h = firwin_lowpass(33, 0.3, WindowType::Kaiser { beta: 14.0 }).unwrap();
        for i in 0..16 {
            assert_eq!(h[i], h[32 - i]);
        }
        assert!(h.iter().cloned().fold(f64::MIN, f64::max) == h[16]);
    }

    #[test]
    fn test_firwin_full_band_cutoff() {
        // Odd length with cutoff 1 collapses onto a unit impulse.
        let h = firwin_lowpass(5, 1.0, WindowType::Kaiser { beta: 14.0 }).unwrap();
        assert_close_vec(&h, &[0.0, 0.0, 1.0, 0.0, 0.0], 1e-15);
        let h = firwin_lowpass(6, 1.0, WindowType::Kaiser { beta: 14.0 }).unwrap();
        assert!((h.iter().sum::<f64>() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_firwin_rejects_bad_arguments() {
        let kaiser = WindowType::Kaiser { beta: 14.0 };
        assert!(matches!(
            firwin_lowpass(0, 0.5, kaiser),
            Err(ErrorsFirgen::InvalidInputRange(_))
        ));
        for c in [0.0, -0.5, 1.5, f64::INFINITY, f64::NAN] {
            assert!(firwin_lowpass(16, c, kaiser).is_err(), "cutoff={c}");
        }
    }

    #[test]
    fn test_primitive_matches_free_function() {
        let kaiser = WindowType::Kaiser { beta: 14.0 };
        assert_eq!(
            WindowedSincDesign.design(64, 0.25, kaiser).unwrap(),
            firwin_lowpass(64, 0.25, kaiser).unwrap()
        );
    }
}

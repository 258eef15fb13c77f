use tracing::debug;

use crate::{
    dsp::{
        filters::firwin::{FilterDesignPrimitive, WindowedSincDesign},
        windows::{kaiser_attenuation, WindowType},
    },
    prelude::ErrorsFirgen,
};

/// Kaiser shape parameter shared by every conversion filter.
pub const KAISER_BETA: f64 = 14.0;

/// Which side of a rate change the filter serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FilterRole {
    /// Image rejection after zero-stuffing. Taps carry a gain of `factor`.
    Upsampler,
    /// Anti-alias filtering before decimation. Taps have unity DC gain.
    Downsampler,
}

/// Designs polyphase up/downsampling filters through an injected windowed-design primitive.
///
/// Both roles use the Nyquist-normalized cutoff `1 / factor`, which puts the passband edge at the
/// lower of the two sample rates, and a Kaiser window with `KAISER_BETA`.
/// The upsampler is multiplied by `factor` to make up for the `factor - 1` zeros stuffed between
/// input samples; the downsampler is left at unity gain.
#[derive(Clone, Debug)]
pub struct RateConversionDesigner<P: FilterDesignPrimitive = WindowedSincDesign> {
    primitive: P,
}

impl<P: FilterDesignPrimitive> RateConversionDesigner<P> {
    pub fn new(primitive: P) -> Self {
        Self { primitive }
    }

    pub fn window() -> WindowType {
        WindowType::Kaiser { beta: KAISER_BETA }
    }

    /// Nyquist-normalized cutoff for a conversion `factor`. A factor of 0 yields an infinite cutoff, which the primitive rejects.
    pub fn cutoff(factor: usize) -> f64 {
        1.0 / factor as f64
    }

    pub fn design_downsampler(&self, tap_count: usize, factor: usize) -> Result<Vec<f64>, ErrorsFirgen> {
        let cutoff = Self::cutoff(factor);
        let taps = self.primitive.design(tap_count, cutoff, Self::window())?;
        debug!(
            tap_count,
            factor,
            cutoff,
            stopband_db = kaiser_attenuation(KAISER_BETA),
            dc_gain = taps.iter().sum::<f64>(),
            "designed downsampler"
        );
        Ok(taps)
    }

    pub fn design_upsampler(&self, tap_count: usize, factor: usize) -> Result<Vec<f64>, ErrorsFirgen> {
        let cutoff = Self::cutoff(factor);
        let gain = factor as f64;
        let mut taps = self.primitive.design(tap_count, cutoff, Self::window())?;
        for h in &mut taps {
            *h *= gain;
        }
        debug!(
            tap_count,
            factor,
            cutoff,
            stopband_db = kaiser_attenuation(KAISER_BETA),
            dc_gain = taps.iter().sum::<f64>(),
            "designed upsampler"
        );
        Ok(taps)
    }

    pub fn design(&self, role: FilterRole, tap_count: usize, factor: usize) -> Result<Vec<f64>, ErrorsFirgen> {
        match role {
            FilterRole::Upsampler => self.design_upsampler(tap_count, factor),
            FilterRole::Downsampler => self.design_downsampler(tap_count, factor),
        }
    }
}

/// Upsampler taps from the reference windowed-sinc primitive.
pub fn design_upsampler(tap_count: usize, factor: usize) -> Result<Vec<f64>, ErrorsFirgen> {
    RateConversionDesigner::new(WindowedSincDesign).design_upsampler(tap_count, factor)
}

/// Downsampler taps from the reference windowed-sinc primitive.
pub fn design_downsampler(tap_count: usize, factor: usize) -> Result<Vec<f64>, ErrorsFirgen> {
    RateConversionDesigner::new(WindowedSincDesign).design_downsampler(tap_count, factor)
}

/// Offline checks of a designed table: drive a synthetic block through the resampler built from the
/// taps, measure how much energy ends up in the band the filter should reject, and hand the
/// before/after pair to a plotting sink.
use std::{f64::consts::PI, io::Write};

use num::Complex;
use rustfft::FftPlanner;
use tracing::debug;

use crate::{
    dsp::{
        resampling::{
            polyphase_integer_resampling::PolyphaseIntegerResampler,
            rate_conversion_filters::FilterRole,
        },
        stream_operator::StreamOperator,
        windows::hann,
    },
    prelude::{ErrorsFirgen, C1D, R1D},
};

/// Synthetic test waveforms, each periodic within one block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TestSignal {
    /// One period per block.
    Sine,
    /// Four periods per block, +-1.
    Square,
    /// One period per block, peaks at +-1.
    Triangle,
}

impl TestSignal {
    pub fn generate(&self, block_size: usize) -> R1D {
        let n = block_size as f64;
        (0..block_size)
            .map(|i| {
                let t = i as f64 / n;
                match self {
                    TestSignal::Sine => (2.0 * PI * t).sin(),
                    TestSignal::Square => {
                        let quarter = (block_size / 4).max(1);
                        if i % quarter < block_size / 8 {
                            1.0
                        } else {
                            -1.0
                        }
                    }
                    TestSignal::Triangle => 1.0 - 4.0 * ((t - 0.25).round() - (t - 0.25)).abs(),
                }
            })
            .collect()
    }
}

fn run_resampler(
    input: &[f64],
    taps: &[f64],
    up_rate: usize,
    down_rate: usize,
) -> Result<R1D, ErrorsFirgen> {
    let mut resampler = PolyphaseIntegerResampler::new(up_rate, down_rate, taps)?;
    Ok(resampler.process(input)?.unwrap_or_default())
}

/// Zero-stuffs `input` by `factor` and filters it with `taps`. Returns `input.len() * factor` samples.
pub fn upsample(input: &[f64], taps: &[f64], factor: usize) -> Result<R1D, ErrorsFirgen> {
    run_resampler(input, taps, factor, 1)
}

/// Filters `input` with `taps` and keeps samples `0, factor, 2 * factor, ...`.
pub fn downsample(input: &[f64], taps: &[f64], factor: usize) -> Result<R1D, ErrorsFirgen> {
    run_resampler(input, taps, 1, factor)
}

/// One-sided magnitude spectrum (bins `0..=n/2`) of a Hann-weighted copy of `signal`.
pub fn magnitude_spectrum(signal: &[f64]) -> Result<R1D, ErrorsFirgen> {
    if signal.len() < 2 {
        return Err(ErrorsFirgen::InvalidInputRange(
            "spectrum needs at least two samples",
        ));
    }
    let n = signal.len();
    let win = hann(n, false);
    let mut buffer: C1D = signal
        .iter()
        .zip(win.iter())
        .map(|(x, w)| Complex::new(x * w, 0.0))
        .collect();
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);
    Ok(buffer.iter().take(n / 2 + 1).map(|c| c.norm()).collect())
}

/// Energy above the Nyquist-normalized frequency `edge` relative to the total, in dB.
pub fn band_energy_ratio_db(signal: &[f64], edge: f64) -> Result<f64, ErrorsFirgen> {
    if !(0.0..=1.0).contains(&edge) {
        return Err(ErrorsFirgen::InvalidInputRange("edge must be in [0, 1]"));
    }
    let spectrum = magnitude_spectrum(signal)?;
    let last = (spectrum.len() - 1) as f64;
    let mut total = 0.0;
    let mut above = 0.0;
    for (k, m) in spectrum.iter().enumerate() {
        let e = m * m;
        total += e;
        if k as f64 / last > edge {
            above += e;
        }
    }
    if total == 0.0 {
        return Err(ErrorsFirgen::InvalidInputRange("signal has no energy"));
    }
    Ok(10.0 * (above / total).max(f64::MIN_POSITIVE).log10())
}

/// An original block and its resampled version on the processed time base, so both columns line
/// up sample for sample. For an upsampler the original column is the zero-stuffed input; for a
/// downsampler it is the input at the kept sample positions.
#[derive(Clone, Debug, PartialEq)]
pub struct VerificationTrace {
    pub original: R1D,
    pub processed: R1D,
    pub labels: (String, String),
}

impl VerificationTrace {
    pub fn new(
        role: FilterRole,
        factor: usize,
        original: &[f64],
        processed: R1D,
        labels: (String, String),
    ) -> Self {
        let aligned = (0..processed.len())
            .map(|i| {
                let factor = factor.max(1);
                let j = match role {
                    FilterRole::Upsampler if i % factor == 0 => i / factor,
                    FilterRole::Upsampler => return 0.0,
                    FilterRole::Downsampler => i * factor,
                };
                original.get(j).copied().unwrap_or(0.0)
            })
            .collect();
        Self {
            original: aligned,
            processed,
            labels,
        }
    }
}

/// Runs `signal` through the table `taps` in the given role and collects the trace.
pub fn verify(
    role: FilterRole,
    taps: &[f64],
    factor: usize,
    signal: TestSignal,
    block_size: usize,
    name: &str,
) -> Result<VerificationTrace, ErrorsFirgen> {
    let input = signal.generate(block_size);
    let processed = match role {
        FilterRole::Upsampler => upsample(&input, taps, factor)?,
        FilterRole::Downsampler => downsample(&input, taps, factor)?,
    };
    debug!(table = name, ?role, ?signal, block_size, out_len = processed.len(), "verification trace");
    Ok(VerificationTrace::new(
        role,
        factor,
        &input,
        processed,
        (format!("{signal:?}").to_lowercase(), name.to_string()),
    ))
}

/// Diagnostic sink for a verification trace. Never affects the generated tables.
pub trait SignalPlot {
    fn plot(&mut self, trace: &VerificationTrace) -> Result<(), ErrorsFirgen>;
}

/// Writes a trace as a two-column CSV (header from the trace labels) for an external plotting tool.
pub struct CsvPlot<W: Write> {
    out: W,
}

impl<W: Write> CsvPlot<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> SignalPlot for CsvPlot<W> {
    fn plot(&mut self, trace: &VerificationTrace) -> Result<(), ErrorsFirgen> {
        writeln!(self.out, "{},{}", trace.labels.0, trace.labels.1)?;
        for (a, b) in trace.original.iter().zip(trace.processed.iter()) {
            writeln!(self.out, "{a},{b}")?;
        }
        self.out.flush()?;
        Ok(())
    }
}

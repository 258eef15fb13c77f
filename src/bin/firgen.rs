use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::PathBuf,
};

use clap::{Parser, ValueEnum};
use polyphase_taps::{
    codegen::table_generator::{default_specs, find_spec, generate_all},
    dsp::{
        filters::firwin::WindowedSincDesign,
        resampling::rate_conversion_filters::RateConversionDesigner,
        verification::{verify, CsvPlot, SignalPlot, TestSignal},
    },
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SignalArg {
    Sine,
    Square,
    Triangle,
}

impl From<SignalArg> for TestSignal {
    fn from(value: SignalArg) -> Self {
        match value {
            SignalArg::Sine => TestSignal::Sine,
            SignalArg::Square => TestSignal::Square,
            SignalArg::Triangle => TestSignal::Triangle,
        }
    }
}

/// Prints the polyphase resampler coefficient tables as C float arrays.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Also write a CSV of a test signal before/after one table, for plotting.
    #[arg(long, value_name = "PATH")]
    verify: Option<PathBuf>,
    /// Table driven by --verify.
    #[arg(long, default_value = "upsampler_2x")]
    table: String,
    /// Test signal driven by --verify.
    #[arg(long, value_enum, default_value_t = SignalArg::Square)]
    signal: SignalArg,
    /// Input block length for --verify.
    #[arg(long, default_value_t = 1024)]
    block_size: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let specs = default_specs();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (_, text) in generate_all(&specs)? {
        writeln!(out, "{text}")?;
    }
    out.flush()?;

    if let Some(path) = args.verify {
        let spec = find_spec(&specs, &args.table)?;
        let taps = RateConversionDesigner::new(WindowedSincDesign).design(spec.role, spec.tap_count, spec.factor)?;
        let trace = verify(
            spec.role,
            &taps,
            spec.factor,
            args.signal.into(),
            args.block_size,
            &spec.name,
        )?;
        let mut plot = CsvPlot::new(BufWriter::new(File::create(&path)?));
        plot.plot(&trace)?;
        info!(path = %path.display(), table = %spec.name, rows = trace.processed.len(), "wrote verification csv");
    }

    Ok(())
}

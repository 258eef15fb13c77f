use tracing::debug;

use crate::{
    codegen::c_float_literal::format_array,
    dsp::{
        filters::firwin::{FilterDesignPrimitive, WindowedSincDesign},
        resampling::rate_conversion_filters::{FilterRole, RateConversionDesigner},
    },
    prelude::ErrorsFirgen,
};

/// One coefficient table to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSpec {
    pub role: FilterRole,
    pub tap_count: usize,
    pub factor: usize,
    pub name: String,
}

impl FilterSpec {
    pub fn new(role: FilterRole, tap_count: usize, factor: usize, name: impl Into<String>) -> Self {
        Self {
            role,
            tap_count,
            factor,
            name: name.into(),
        }
    }

    pub fn upsampler(tap_count: usize, factor: usize) -> Self {
        Self::new(FilterRole::Upsampler, tap_count, factor, format!("upsampler_{factor}x"))
    }

    pub fn downsampler(tap_count: usize, factor: usize) -> Self {
        Self::new(FilterRole::Downsampler, tap_count, factor, format!("downsampler_{factor}x"))
    }
}

/// The tables compiled into the audio engine: 2x with 128 taps and 4x with 256 taps, each as an
/// upsampler/downsampler pair.
pub fn default_specs() -> Vec<FilterSpec> {
    vec![
        FilterSpec::upsampler(128, 2),
        FilterSpec::downsampler(128, 2),
        FilterSpec::upsampler(256, 4),
        FilterSpec::downsampler(256, 4),
    ]
}

/// Designs and serializes every spec in order with the given designer. Stops at the first failure.
pub fn generate_all_with<P: FilterDesignPrimitive>(
    designer: &RateConversionDesigner<P>,
    specs: &[FilterSpec],
) -> Result<Vec<(String, String)>, ErrorsFirgen> {
    specs
        .iter()
        .map(|spec| {
            let taps = designer.design(spec.role, spec.tap_count, spec.factor)?;
            let text = format_array(&taps, &spec.name)?;
            debug!(table = %spec.name, taps = taps.len(), bytes = text.len(), "serialized table");
            Ok((spec.name.clone(), text))
        })
        .collect()
}

/// [`generate_all_with`] using the reference windowed-sinc design.
pub fn generate_all(specs: &[FilterSpec]) -> Result<Vec<(String, String)>, ErrorsFirgen> {
    generate_all_with(&RateConversionDesigner::new(WindowedSincDesign), specs)
}

/// Looks a spec up by its table name.
pub fn find_spec<'a>(specs: &'a [FilterSpec], name: &str) -> Result<&'a FilterSpec, ErrorsFirgen> {
    specs
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| ErrorsFirgen::UnknownTable(name.to_string()))
}

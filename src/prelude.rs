use num::Complex;

pub type R1D = Vec<f64>;
pub type C1D = Vec<Complex<f64>>;

/// Crate-wide error type. Every fallible operation in the crate returns `Result<_, ErrorsFirgen>`.
#[derive(Debug, thiserror::Error)]
pub enum ErrorsFirgen {
    #[error("invalid input range: {0}")]
    InvalidInputRange(&'static str),
    #[error("{0} has no finite decimal literal")]
    NonFiniteValue(f64),
    #[error("coefficient {index} is not finite ({value})")]
    NonFiniteCoefficient { index: usize, value: f64 },
    #[error("no table named `{0}`")]
    UnknownTable(String),
    #[error("formatting failed")]
    Formatting(#[from] std::fmt::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

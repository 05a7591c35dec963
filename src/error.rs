use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid ppm tolerance: {0} (must be finite and non-negative)")]
    InvalidPpmTolerance(f64),
    #[error("Adduct {0} is already part of the table")]
    DuplicateAdduct(String),
    #[error("Cannot normalize score, no scores were applied")]
    NoScoresApplied,
}

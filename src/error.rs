//! Error type shared by the data-plate builder and the evaluators.

use thiserror::Error;

/// Errors surfaced while building a data plate or evaluating performance.
///
/// Dimensional mismatches cannot occur at runtime: every quantity crossing
/// the API carries its dimension in the type. A V-speed with no real
/// solution is not an error either; the solver reports it in-band as an
/// absent value.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BootstrapError {
    /// A required input was absent and could not be derived.
    #[error("missing input: {0}")]
    MissingInput(&'static str),

    /// An input lay outside its physical domain.
    #[error("domain error: {0}")]
    Domain(String),

    /// A derived value left the domain of a numeric operation.
    #[error("numerical error: {0}")]
    Numerical(String),
}

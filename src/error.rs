use thiserror::Error;

/// Errors surfaced by the pipeline. Either the input as a whole is unusable
/// (`Validation`) or an out-of-domain value reached a pure function
/// (`Domain`). Structurally invalid rows are dropped and counted instead of
/// erroring.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("value outside domain: {0}")]
    Domain(String),
}

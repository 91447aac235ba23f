use thiserror::Error;

/// Errors produced by the analysis pipeline.
///
/// Every variant is terminal: the pipeline is a linear flow with no retry
/// logic, so the first error aborts the whole run and surfaces to the caller.
#[derive(Debug, Error)]
pub enum MipError {
    #[error("expected a {expected}D array but got {got} dimensions")]
    InputShape { expected: usize, got: usize },

    #[error("spacing components must be positive and finite, got {spacing:?}")]
    InvalidSpacing { spacing: [f64; 3] },

    #[error("raster encoding failed: {0}")]
    Encoding(String),

    #[error("nifti error: {0}")]
    Nifti(#[from] nifti::error::NiftiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("png error: {0}")]
    Png(#[from] png::EncodingError),
}

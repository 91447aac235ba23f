//! Maximum intensity projections and volume measurement for nifti CT scans.
//!
//! This crate analyzes a 3D CT volume together with an aligned segmentation
//! mask. The CT volume is resampled onto an isotropic grid derived from its
//! affine, reduced to coronal and sagittal maximum intensity projections, and
//! quantized to 8-bit grayscale images. The segmentation mask is summed into
//! a physical volume measurement in milliliters. It leverages several
//! libraries, including `ndarray`, `nalgebra`, `nifti` and `image`, to
//! facilitate the handling of multi-dimensional arrays, affine transforms and
//! raster output, respectively.

pub mod error;
pub mod grid;
pub mod measure;
pub mod pipeline;
pub mod projection;
pub mod raster;
pub mod resample;

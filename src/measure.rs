//! Physical volume measurement of a segmentation mask.

use ndarray::ArrayD;

/// Total physical volume of a segmentation in milliliters.
///
/// The mask values are treated as additive weights, so a fractional or
/// multi-valued mask produces a weighted sum rather than a pure voxel count.
/// `voxel_volume_mm3` is the physical volume of one voxel in mm^3; dividing
/// by 1000 converts the total to ml.
pub fn segmented_volume_ml(mask: &ArrayD<f64>, voxel_volume_mm3: f64) -> f64 {
    mask.sum() * voxel_volume_mm3 / 1000.0
}

//! Maximum intensity projections of a 3D volume.

use ndarray::{Array2, Array3, Axis};

// set up enums and structs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MipAxis {
    X,
    Y,
    Z,
}

impl MipAxis {
    pub fn to_usize(&self) -> usize {
        match self {
            MipAxis::X => 0,
            MipAxis::Y => 1,
            MipAxis::Z => 2,
        }
    }
}

/// The two fixed projections derived from a resampled CT volume.
#[derive(Debug)]
pub struct Projections {
    /// max along the axial axis (index axis 2); shape X x Y
    pub coronal: Array2<f64>,
    /// max along the sagittal direction (index axis 0); shape Y x Z
    pub sagittal: Array2<f64>,
}

/// Collapse a volume along one axis, keeping the maximum value found at each
/// transverse position.
pub fn mip(volume: &Array3<f64>, axis: MipAxis) -> Array2<f64> {
    volume.fold_axis(Axis(axis.to_usize()), f64::NEG_INFINITY, |acc, v| {
        acc.max(*v)
    })
}

/// Compute the coronal (collapse Z) and sagittal (collapse X) projections.
/// The axis choice is fixed, matching the views the tool reports.
pub fn project(volume: &Array3<f64>) -> Projections {
    Projections {
        coronal: mip(volume, MipAxis::Z),
        sagittal: mip(volume, MipAxis::X),
    }
}

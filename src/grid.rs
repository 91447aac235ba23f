//! Physical-space grid geometry extracted from a nifti affine.

use nalgebra::{Matrix3, Matrix4, Vector3};

use crate::error::MipError;

/// Maps voxel indices of a regular grid to physical-space coordinates.
///
/// A grid is described by the origin (physical position of voxel (0, 0, 0)),
/// a 3x3 direction matrix (one physical-space column vector per voxel-index
/// axis) and a spacing vector (physical distance per voxel step). Together
/// they form the usual imaging affine:
///
/// `physical = origin + direction * (spacing .* index)`
#[derive(Debug, Clone, PartialEq)]
pub struct GridDescriptor {
    pub origin: Vector3<f64>,
    pub direction: Matrix3<f64>,
    pub spacing: Vector3<f64>,
}

impl GridDescriptor {
    /// Build a grid descriptor from a 4x4 voxel-to-world affine and a target
    /// spacing chosen by the caller.
    ///
    /// The origin is the translation column (first three rows of column 3).
    /// The direction is the linear 3x3 submatrix taken row-major, i.e.
    /// `direction[(i, j)] = affine[(i, j)]` - the same convention the
    /// resampler consumes. The spacing is NOT derived from the affine; it is
    /// the new grid's spacing, supplied explicitly.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSpacing` if any spacing component is non-positive or
    /// non-finite.
    pub fn from_affine(affine: &Matrix4<f64>, spacing: Vector3<f64>) -> Result<Self, MipError> {
        validate_spacing(&spacing)?;
        Ok(Self {
            origin: Vector3::new(affine[(0, 3)], affine[(1, 3)], affine[(2, 3)]),
            direction: linear_part(affine),
            spacing,
        })
    }

    /// Map a (continuous) voxel index to its physical-space position.
    pub fn index_to_physical(&self, index: Vector3<f64>) -> Vector3<f64> {
        self.origin + self.direction * self.spacing.component_mul(&index)
    }

    /// Physical volume of a single voxel in mm^3 (product of the spacing).
    pub fn voxel_volume_mm3(&self) -> f64 {
        self.spacing.x * self.spacing.y * self.spacing.z
    }
}

/// Extract the linear 3x3 submatrix of a 4x4 affine (rotation + scale part,
/// row-major, translation column dropped).
pub fn linear_part(affine: &Matrix4<f64>) -> Matrix3<f64> {
    affine.fixed_slice::<3, 3>(0, 0).into_owned()
}

pub(crate) fn validate_spacing(spacing: &Vector3<f64>) -> Result<(), MipError> {
    if spacing.iter().all(|s| s.is_finite() && *s > 0.0) {
        Ok(())
    } else {
        Err(MipError::InvalidSpacing {
            spacing: [spacing.x, spacing.y, spacing.z],
        })
    }
}

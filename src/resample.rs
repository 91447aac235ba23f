//! Resampling of a CT volume onto a new isotropic grid.

use nalgebra::Vector3;
use ndarray::parallel::prelude::*;
use ndarray::{Array3, Axis, Zip};

use crate::error::MipError;
use crate::grid::{validate_spacing, GridDescriptor};

/// Resample a volume onto the grid described by `grid`.
///
/// The output keeps the input's voxel-count shape exactly; only the spacing
/// changes. This means the physical field of view grows or shrinks with the
/// new spacing - intentional, the output covers `shape .* spacing` in each
/// direction rather than the source extent.
///
/// Each output index is mapped to physical space through the grid's
/// origin/direction/spacing and the source array is sampled there by
/// trilinear interpolation. The source array itself carries no metadata, so
/// its voxel indices are taken as physical coordinates directly (unit
/// spacing, zero origin). Samples falling outside the source extent are
/// filled with the background value 0.
///
/// # Errors
///
/// Returns `InvalidSpacing` if the grid's spacing has a non-positive or
/// non-finite component.
pub fn resample(volume: &Array3<f64>, grid: &GridDescriptor) -> Result<Array3<f64>, MipError> {
    validate_spacing(&grid.spacing)?;

    let mut output = Array3::zeros(volume.dim());
    // each output voxel is independent, so the outer axis parallelizes freely
    output
        .axis_iter_mut(Axis(0))
        .into_par_iter()
        .enumerate()
        .for_each(|(x, mut plane)| {
            Zip::indexed(&mut plane).for_each(|(y, z), out| {
                let p = grid.index_to_physical(Vector3::new(x as f64, y as f64, z as f64));
                *out = trilinear_interpolate(volume, p.x, p.y, p.z);
            });
        });
    Ok(output)
}

/// Sample `volume` at a continuous voxel index, linearly weighting the eight
/// surrounding voxels. Coordinates outside the array extent return 0.
#[inline]
pub(crate) fn trilinear_interpolate(volume: &Array3<f64>, x: f64, y: f64, z: f64) -> f64 {
    let (nx, ny, nz) = volume.dim();
    if x < 0.0
        || y < 0.0
        || z < 0.0
        || x > (nx - 1) as f64
        || y > (ny - 1) as f64
        || z > (nz - 1) as f64
    {
        return 0.0;
    }

    let x0 = x.floor() as usize;
    let y0 = y.floor() as usize;
    let z0 = z.floor() as usize;
    let x1 = (x0 + 1).min(nx - 1);
    let y1 = (y0 + 1).min(ny - 1);
    let z1 = (z0 + 1).min(nz - 1);

    let dx = x - x0 as f64;
    let dy = y - y0 as f64;
    let dz = z - z0 as f64;

    // interpolate along z, then y, then x
    let c00 = volume[[x0, y0, z0]] * (1.0 - dz) + volume[[x0, y0, z1]] * dz;
    let c01 = volume[[x0, y1, z0]] * (1.0 - dz) + volume[[x0, y1, z1]] * dz;
    let c10 = volume[[x1, y0, z0]] * (1.0 - dz) + volume[[x1, y0, z1]] * dz;
    let c11 = volume[[x1, y1, z0]] * (1.0 - dz) + volume[[x1, y1, z1]] * dz;

    let c0 = c00 * (1.0 - dy) + c01 * dy;
    let c1 = c10 * (1.0 - dy) + c11 * dy;

    c0 * (1.0 - dx) + c1 * dx
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Matrix3;

    fn identity_grid(spacing: f64) -> GridDescriptor {
        GridDescriptor {
            origin: Vector3::zeros(),
            direction: Matrix3::identity(),
            spacing: Vector3::new(spacing, spacing, spacing),
        }
    }

    #[test]
    fn output_shape_matches_input_shape() {
        let volume = Array3::<f64>::zeros((7, 5, 9));
        let resampled = resample(&volume, &identity_grid(3.0)).unwrap();
        assert_eq!(resampled.dim(), (7, 5, 9));
    }

    #[test]
    fn unit_grid_reproduces_source_values() {
        let volume = Array3::from_shape_fn((4, 4, 4), |(x, y, z)| (x + 10 * y + 100 * z) as f64);
        let resampled = resample(&volume, &identity_grid(1.0)).unwrap();
        for (idx, v) in volume.indexed_iter() {
            assert_relative_eq!(resampled[idx], *v);
        }
    }

    #[test]
    fn constant_volume_stays_constant_inside_fov() {
        // spacing 0.5 keeps every sample within the source extent
        let volume = Array3::from_elem((10, 10, 10), 0.5);
        let resampled = resample(&volume, &identity_grid(0.5)).unwrap();
        for v in resampled.iter() {
            assert_relative_eq!(*v, 0.5);
        }
    }

    #[test]
    fn samples_outside_source_extent_are_background() {
        let volume = Array3::from_elem((4, 4, 4), 1.0);
        // spacing 2.0: output indices >= 2 map past the source extent
        let resampled = resample(&volume, &identity_grid(2.0)).unwrap();
        assert_relative_eq!(resampled[[0, 0, 0]], 1.0);
        assert_relative_eq!(resampled[[1, 1, 1]], 1.0);
        assert_relative_eq!(resampled[[2, 0, 0]], 0.0);
        assert_relative_eq!(resampled[[3, 3, 3]], 0.0);
    }

    #[test]
    fn interpolates_between_voxels() {
        let mut volume = Array3::<f64>::zeros((2, 2, 2));
        volume[[1, 0, 0]] = 1.0;
        // halfway along x between a 0 and a 1 voxel
        assert_relative_eq!(trilinear_interpolate(&volume, 0.5, 0.0, 0.0), 0.5);
        assert_relative_eq!(trilinear_interpolate(&volume, 0.25, 0.0, 0.0), 0.25);
    }

    #[test]
    fn rejects_invalid_spacing() {
        let volume = Array3::<f64>::zeros((2, 2, 2));
        let mut grid = identity_grid(1.0);
        grid.spacing = Vector3::new(1.0, 0.0, 1.0);
        assert!(resample(&volume, &grid).is_err());
    }
}

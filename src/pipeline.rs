//! End-to-end analysis flow: resample, project, rasterize and measure.

use nalgebra::{Matrix4, Vector3};
use ndarray::{Array3, ArrayD, Ix3};
use nifti::{IntoNdArray, NiftiHeader, NiftiObject, ReaderOptions};
use std::path::Path;

use crate::error::MipError;
use crate::grid::GridDescriptor;
use crate::measure::segmented_volume_ml;
use crate::projection::project;
use crate::raster::{rasterize, RasterImage};
use crate::resample::resample;

/// Tunable parameters of a run. The defaults match the reference protocol:
/// 3 mm isotropic resampling and 400 dpi output images.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub spacing: Vector3<f64>,
    pub dpi: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            spacing: Vector3::new(3.0, 3.0, 3.0),
            dpi: 400,
        }
    }
}

/// Everything a run produces; the caller decides where it goes.
#[derive(Debug)]
pub struct AnalysisOutput {
    pub coronal: RasterImage,
    pub sagittal: RasterImage,
    pub segmented_ml: f64,
}

/// Read a nifti file, returning its volume as a dynamic-dimensional array
/// together with the header carrying the affine.
pub fn load_nifti(path: &Path) -> Result<(ArrayD<f64>, NiftiHeader), MipError> {
    let obj = ReaderOptions::new().read_file(path)?;
    let header = obj.header().clone();
    let img = obj.volume().into_ndarray::<f64>()?;
    Ok((img, header))
}

/// Convert a dynamic-dimensional nifti volume into the 3D array the pipeline
/// works on.
///
/// # Errors
///
/// Returns `InputShape` for anything that is not exactly 3-dimensional.
pub fn into_volume3(img: ArrayD<f64>) -> Result<Array3<f64>, MipError> {
    let ndim = img.ndim();
    img.into_dimensionality::<Ix3>()
        .map_err(|_| MipError::InputShape { expected: 3, got: ndim })
}

/// Run the full analysis on a CT volume and its segmentation mask.
///
/// The CT volume is resampled onto an isotropic grid built from its affine
/// and `config.spacing`, reduced to coronal and sagittal maximum intensity
/// projections, and quantized to 8-bit rasters. The mask volume is summed
/// into a milliliter measurement using the target grid's per-voxel volume.
///
/// Stage messages go to the optional `progress` sink; the library itself
/// never writes to the console.
pub fn run(
    ct: ArrayD<f64>,
    affine: &Matrix4<f64>,
    mask: &ArrayD<f64>,
    config: &PipelineConfig,
    progress: Option<&dyn Fn(&str)>,
) -> Result<AnalysisOutput, MipError> {
    let say = |msg: String| {
        if let Some(sink) = progress {
            sink(&msg);
        }
    };

    let ct = into_volume3(ct)?;
    let grid = GridDescriptor::from_affine(affine, config.spacing)?;

    say(format!(
        "Resampling to {} x {} x {} mm",
        grid.spacing.x, grid.spacing.y, grid.spacing.z
    ));
    let resampled = resample(&ct, &grid)?;
    say(format!("Resampled CT shape: {:?}", resampled.dim()));

    say("Computing MIP projections".to_string());
    let projections = project(&resampled);
    let coronal = rasterize(&projections.coronal)?;
    let sagittal = rasterize(&projections.sagittal)?;

    let segmented_ml = segmented_volume_ml(mask, grid.voxel_volume_mm3());

    Ok(AnalysisOutput {
        coronal,
        sagittal,
        segmented_ml,
    })
}

//! Quick commandline utility to derive MIP images and a segmented volume
//! measurement from a CT scan.
//!
//! Takes a CT nifti file plus an aligned segmentation nifti file, resamples
//! the CT onto an isotropic grid, writes coronal and sagittal maximum
//! intensity projections as grayscale PNGs, and prints the physical volume of
//! the segmented structure in milliliters.

use clap::Parser;
use nalgebra::Vector3;
use std::path::Path;

use mipnii::pipeline::{self, PipelineConfig};
use mipnii::raster::save_png;

// TODO: add support for 4D (time series) CT images

// use clap to create commandline interface
#[derive(Parser, Debug)]
#[command(author, about, version, long_about)]
struct Args {
    /// the input CT nifti file
    #[arg(short, long)]
    ct: String,

    /// the segmentation nifti file, on the same grid as the CT
    #[arg(short, long)]
    seg: String,

    /// output path for the coronal MIP image
    #[arg(long, default_value = "mip_coronal.png")]
    coronal: String,

    /// output path for the sagittal MIP image
    #[arg(long, default_value = "mip_sagittal.png")]
    sagittal: String,

    /// target isotropic spacing in mm
    #[arg(long, default_value_t = 3.0)]
    spacing: f64,

    /// pixel density written into the output images
    #[arg(short, long, default_value_t = 400)]
    dpi: u32,
}

/// Main function that parses commandline arguments and runs the program.
///
/// Loads the CT and segmentation files, runs the analysis pipeline, saves
/// both projection images and reports the segmented volume on stdout.
fn main() {
    let cli = Args::parse();

    println!("analysing the image");
    let (ct, ct_header) = pipeline::load_nifti(Path::new(&cli.ct)).unwrap_or_else(|e| {
        eprintln!("Error! {}", e);
        std::process::exit(-2);
    });
    let (seg, _seg_header) = pipeline::load_nifti(Path::new(&cli.seg)).unwrap_or_else(|e| {
        eprintln!("Error! {}", e);
        std::process::exit(-2);
    });
    let affine = ct_header.affine::<f64>();

    let config = PipelineConfig {
        spacing: Vector3::new(cli.spacing, cli.spacing, cli.spacing),
        dpi: cli.dpi,
    };

    let progress = |msg: &str| println!("{}", msg);
    let output = pipeline::run(ct, &affine, &seg, &config, Some(&progress)).unwrap_or_else(|e| {
        eprintln!("Error! {}", e);
        std::process::exit(-2);
    });

    for (image, path) in [
        (&output.coronal, &cli.coronal),
        (&output.sagittal, &cli.sagittal),
    ] {
        save_png(image, Path::new(path), config.dpi).unwrap_or_else(|e| {
            eprintln!("Error! {}", e);
            std::process::exit(-2);
        });
        println!("Saved: {}", path);
    }

    println!(
        "Volume of segmented aorta: {:.2} milliliters",
        output.segmented_ml
    );
}

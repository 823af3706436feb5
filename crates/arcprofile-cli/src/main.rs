//! arcprofile CLI — sector-masked radial intensity profiles of images.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use arcprofile::{
    measure_radius, radial_profile, stack_radial_profile, Calibration, OverflowPolicy,
    ProfileSink, SampleSource, SectorGeometry, SliceStack, TextFileSink,
};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "arcprofile")]
#[command(about = "Compute sector-masked radial intensity profiles of grayscale images")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a radial profile over an image or an image stack.
    Profile(CliProfileArgs),

    /// Report the scan-circle radius in pixels and calibrated units.
    Measure(CliMeasureArgs),
}

#[derive(Debug, Clone, Args)]
struct CliGeometryArgs {
    /// Circle center x in pixels (default: image width / 2).
    #[arg(long)]
    center_x: Option<f64>,

    /// Circle center y in pixels (default: image height / 2).
    #[arg(long)]
    center_y: Option<f64>,

    /// Circle radius in pixels (default: mean of half-width and half-height).
    #[arg(long)]
    radius: Option<f64>,

    /// Starting angle in degrees, counter-clockwise from the +x axis.
    #[arg(long, default_value = "0")]
    start_angle: i32,

    /// Angular half-width in degrees; the sector spans start ± this value.
    #[arg(long, default_value = "180")]
    integration_angle: i32,
}

impl CliGeometryArgs {
    fn to_geometry(&self, width: u32, height: u32) -> SectorGeometry {
        let cx = self.center_x.unwrap_or(f64::from(width) / 2.0);
        let cy = self.center_y.unwrap_or(f64::from(height) / 2.0);
        let radius = self.radius.unwrap_or((cx + cy) / 2.0);
        SectorGeometry::new(cx, cy, radius, self.start_angle, self.integration_angle)
    }
}

#[derive(Debug, Clone, Args)]
struct CliCalibrationArgs {
    /// Physical size of one pixel, enabling calibrated radius axes.
    #[arg(long)]
    pixel_size: Option<f64>,

    /// Unit label for the pixel size ("pixel" disables calibration).
    #[arg(long, default_value = "pixel")]
    unit: String,
}

impl CliCalibrationArgs {
    fn to_calibration(&self) -> Option<Calibration> {
        self.pixel_size
            .map(|size| Calibration::isotropic(size, self.unit.clone()))
    }
}

#[derive(Debug, Clone, Args)]
struct CliProfileArgs {
    /// Input image; pass once per slice for stack analysis.
    #[arg(long, required = true)]
    image: Vec<PathBuf>,

    #[command(flatten)]
    geometry: CliGeometryArgs,

    #[command(flatten)]
    calibration: CliCalibrationArgs,

    /// Analyse the images as a stack (requires more than one --image).
    #[arg(long)]
    stack: bool,

    /// Clamp overflowing bin indices into the last bin instead of dropping
    /// them (the disputed historical correction).
    #[arg(long)]
    clamp_overflow: bool,

    /// Path to write the profile as JSON (stdout if omitted).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Directory for the legacy two-column text dump (single-image mode).
    #[arg(long)]
    txt_dir: Option<PathBuf>,

    /// Title prefix for the legacy text dump (default: image file stem).
    #[arg(long)]
    title: Option<String>,
}

#[derive(Debug, Clone, Args)]
struct CliMeasureArgs {
    /// Circle radius in pixels.
    #[arg(long)]
    radius: f64,

    #[command(flatten)]
    calibration: CliCalibrationArgs,
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Profile(args) => run_profile(&args),
        Commands::Measure(args) => run_measure(&args),
    }
}

fn load_stack(paths: &[PathBuf]) -> CliResult<SliceStack> {
    let mut slices = Vec::with_capacity(paths.len());
    for path in paths {
        let img = image::open(path)
            .map_err(|e| -> CliError { format!("failed to open {}: {}", path.display(), e).into() })?
            .to_luma8();
        tracing::info!(
            "loaded {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        slices.push(img);
    }
    Ok(SliceStack::from_gray(&slices)?)
}

fn run_profile(args: &CliProfileArgs) -> CliResult<()> {
    let stack = load_stack(&args.image)?;
    let geometry = args.geometry.to_geometry(stack.width(), stack.height());
    let calibration = args.calibration.to_calibration();
    let overflow = if args.clamp_overflow {
        OverflowPolicy::ClampToLast
    } else {
        OverflowPolicy::Discard
    };

    tracing::info!(
        "geometry: center ({:.2}, {:.2}), radius {:.2}, start {}°, integration ±{}°",
        geometry.center_x,
        geometry.center_y,
        geometry.radius,
        geometry.start_angle_deg,
        geometry.integration_angle_deg,
    );

    let json = if args.stack {
        let result = stack_radial_profile(&geometry, &stack, calibration.as_ref(), overflow)?;
        tracing::info!(
            "stack profile: {} slices, {} bins, range [{}, {}]",
            result.n_slices(),
            result.n_bins(),
            result.min_value,
            result.max_value,
        );
        serde_json::to_string_pretty(&result)?
    } else {
        if args.image.len() > 1 {
            tracing::warn!("multiple images without --stack; profiling the first slice only");
        }
        let result = radial_profile(&geometry, &stack, 0, calibration.as_ref(), overflow);
        tracing::info!("profile: {} bins [{}]", result.n_bins(), result.unit);

        if let Some(dir) = &args.txt_dir {
            let title = match &args.title {
                Some(t) => t.clone(),
                None => args.image[0]
                    .file_stem()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            };
            let mut sink = TextFileSink::new(dir, title);
            sink.write_profile(&result)?;
            tracing::info!("text dump written under {}", dir.display());
        }
        serde_json::to_string_pretty(&result)?
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, &json)?;
            tracing::info!("results written to {}", path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

fn run_measure(args: &CliMeasureArgs) -> CliResult<()> {
    let geometry = SectorGeometry::new(0.0, 0.0, args.radius, 0, 180);
    let calibration = args.calibration.to_calibration();
    let m = measure_radius(&geometry, calibration.as_ref());
    println!("{}", serde_json::to_string_pretty(&m)?);
    Ok(())
}

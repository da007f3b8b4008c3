use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use facecheck_core::acquisition::infrastructure::image_file_source::ImageFileSource;
use facecheck_core::detection::domain::detector_options::{
    DetectorOptions, FeatureMode, PerformanceMode,
};
use facecheck_core::detection::domain::face_detection_service::FaceDetectionService;
use facecheck_core::detection::infrastructure::model_resolver;
use facecheck_core::detection::infrastructure::onnx_blazeface_detector::{
    OnnxBlazefaceDetector, DEFAULT_CONFIDENCE,
};
use facecheck_core::detection::infrastructure::recorded_face_detector::RecordedFaceDetector;
use facecheck_core::notification::infrastructure::console_notifier::{
    ConsoleFormat, ConsoleNotifier,
};
use facecheck_core::pipeline::check_face_use_case::CheckFaceUseCase;
use facecheck_core::shared::constants::{BLAZEFACE_MODEL_NAME, IMAGE_EXTENSIONS};

const EXIT_INCOMPLETE: i32 = 2;
const EXIT_ERROR: i32 = 1;

enum Outcome {
    Complete,
    Incomplete,
    /// Already reported to the user by the notifier.
    Failed,
}

/// Check whether the first face in an image is fully detected.
#[derive(Parser)]
#[command(name = "facecheck")]
struct Cli {
    /// Input image file.
    input: PathBuf,

    /// BlazeFace ONNX model file (default: resolved from the model cache).
    #[arg(long)]
    model: Option<PathBuf>,

    /// Download URL used when the model is not cached yet.
    #[arg(long)]
    model_url: Option<String>,

    /// Replay face records from a JSON file instead of running a model.
    #[arg(long)]
    detections: Option<PathBuf>,

    /// Face detection confidence threshold (0.0-1.0).
    #[arg(long, default_value_t = DEFAULT_CONFIDENCE)]
    confidence: f64,

    /// Detector performance mode: fast or accurate.
    #[arg(long)]
    performance_mode: Option<PerformanceMode>,

    /// Landmark mode: none or all.
    #[arg(long)]
    landmark_mode: Option<FeatureMode>,

    /// Classification mode: none or all.
    #[arg(long)]
    classification_mode: Option<FeatureMode>,

    /// Contour mode: none or all.
    #[arg(long)]
    contour_mode: Option<FeatureMode>,

    /// Minimum face width as a fraction of image width (0.0-1.0].
    #[arg(long)]
    min_face_size: Option<f32>,

    /// Load detector options from a JSON file.
    #[arg(long)]
    options: Option<PathBuf>,

    /// Print the verdict as JSON.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    let code = match run(&cli) {
        Ok(outcome) => exit_code(&outcome),
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_ERROR
        }
    };
    if code != 0 {
        process::exit(code);
    }
}

fn exit_code(outcome: &Outcome) -> i32 {
    match outcome {
        Outcome::Complete => 0,
        Outcome::Incomplete => EXIT_INCOMPLETE,
        Outcome::Failed => EXIT_ERROR,
    }
}

fn run(cli: &Cli) -> Result<Outcome, Box<dyn std::error::Error>> {
    validate(cli)?;

    let options = build_options(cli)?;
    log::debug!("Detector options: {options:?}");
    let detector = build_detector(cli, options)?;

    let format = if cli.json {
        ConsoleFormat::Json
    } else {
        ConsoleFormat::Message
    };
    let notifier = ConsoleNotifier::new(io::stdout(), io::stderr(), format);

    let mut use_case = CheckFaceUseCase::new(
        Box::new(ImageFileSource::new()),
        detector,
        Box::new(notifier),
    );
    let outcome = match use_case.execute(&cli.input) {
        Ok(verdict) if verdict.is_complete => Outcome::Complete,
        Ok(_) => Outcome::Incomplete,
        Err(_) => Outcome::Failed,
    };
    Ok(outcome)
}

fn build_options(cli: &Cli) -> Result<DetectorOptions, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.options {
        return Ok(DetectorOptions::load(path)?);
    }

    let mut options = DetectorOptions::default();
    if let Some(mode) = cli.performance_mode {
        options = options.performance_mode(mode);
    }
    if let Some(mode) = cli.landmark_mode {
        options = options.landmark_mode(mode);
    }
    if let Some(mode) = cli.classification_mode {
        options = options.classification_mode(mode);
    }
    if let Some(mode) = cli.contour_mode {
        options = options.contour_mode(mode);
    }
    if let Some(size) = cli.min_face_size {
        options = options.min_face_size(size);
    }
    options.validate()?;
    Ok(options)
}

fn build_detector(
    cli: &Cli,
    options: DetectorOptions,
) -> Result<Box<dyn FaceDetectionService>, Box<dyn std::error::Error>> {
    if let Some(path) = &cli.detections {
        log::info!("Replaying detections from {}", path.display());
        return Ok(Box::new(RecordedFaceDetector::from_file(path, options)?));
    }

    let model_path = match &cli.model {
        Some(path) => path.clone(),
        None => {
            log::info!("Resolving model: {BLAZEFACE_MODEL_NAME}");
            let path = model_resolver::resolve(
                BLAZEFACE_MODEL_NAME,
                cli.model_url.as_deref(),
                None,
                Some(Box::new(download_progress)),
            )?;
            eprintln!();
            path
        }
    };

    Ok(Box::new(OnnxBlazefaceDetector::new(
        &model_path,
        cli.confidence,
        options,
    )?))
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if !is_image(&cli.input) {
        return Err(format!(
            "Input must be an image ({}), got {}",
            IMAGE_EXTENSIONS.join(", "),
            cli.input.display()
        )
        .into());
    }
    if cli.detections.is_some() && (cli.model.is_some() || cli.model_url.is_some()) {
        return Err("--detections cannot be combined with --model or --model-url".into());
    }
    if cli.model.is_some() && cli.model_url.is_some() {
        return Err("--model and --model-url are mutually exclusive".into());
    }
    if cli.options.is_some() && has_option_flags(cli) {
        return Err("--options cannot be combined with individual detector option flags".into());
    }
    if !(0.0..=1.0).contains(&cli.confidence) {
        return Err(format!(
            "Confidence must be between 0.0 and 1.0, got {}",
            cli.confidence
        )
        .into());
    }
    Ok(())
}

fn has_option_flags(cli: &Cli) -> bool {
    cli.performance_mode.is_some()
        || cli.landmark_mode.is_some()
        || cli.classification_mode.is_some()
        || cli.contour_mode.is_some()
        || cli.min_face_size.is_some()
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn download_progress(downloaded: u64, total: u64) {
    if total > 0 {
        let pct = (downloaded as f64 / total as f64 * 100.0) as u32;
        eprint!("\rDownloading face detection model... {pct}%");
    } else {
        eprint!("\rDownloading face detection model... {downloaded} bytes");
    }
}

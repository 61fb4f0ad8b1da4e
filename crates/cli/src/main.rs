use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use drone_detect_core::detection::domain::detection::Detection;
use drone_detect_core::detection::domain::detection_client::DetectionClient;
use drone_detect_core::detection::infrastructure::http_detection_client::HttpDetectionClient;
use drone_detect_core::intake::domain::image_upload::ImageUpload;
use drone_detect_core::overlay::image_annotator::{
    annotate, DEFAULT_BOX_COLOR, DEFAULT_THICKNESS,
};
use drone_detect_core::overlay::overlay_layout::compose;
use drone_detect_core::shared::constants::{DEFAULT_ENDPOINT, MODEL_INPUT_SIZE};

/// Submit an image to the drone detection service and report what it found.
#[derive(Parser)]
#[command(name = "drone-detect")]
struct Cli {
    /// Image file to analyse.
    input: PathBuf,

    /// Detection endpoint URL.
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds.
    #[arg(long, default_value = "60")]
    timeout: u64,

    /// Write a copy of the image with detections outlined.
    #[arg(long)]
    annotate: Option<PathBuf>,

    /// Print detections as JSON instead of one line per detection.
    #[arg(long)]
    json: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let upload = ImageUpload::accept(&cli.input)?;
    let timeout = Duration::from_secs(cli.timeout);
    let client = HttpDetectionClient::new(cli.endpoint.as_str(), timeout)?;
    let detections = client.detect(&upload)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&detections)?);
    } else {
        print_detections(&detections);
    }

    if let Some(output) = cli.annotate.as_deref() {
        write_annotated(&cli.input, output, &detections)?;
        log::info!("Annotated image written to {}", output.display());
    }

    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if cli.timeout == 0 {
        return Err("Timeout must be at least 1 second".into());
    }
    if !cli.endpoint.starts_with("http://") && !cli.endpoint.starts_with("https://") {
        return Err(format!("Endpoint must be an http(s) URL, got '{}'", cli.endpoint).into());
    }
    Ok(())
}

fn print_detections(detections: &[Detection]) {
    if detections.is_empty() {
        println!("No detections.");
        return;
    }
    for d in detections {
        let b = &d.bbox;
        println!(
            "{}  [{:.1}, {:.1}, {:.1}, {:.1}]",
            d.caption(),
            b.x1,
            b.y1,
            b.x2,
            b.y2
        );
    }
}

fn write_annotated(
    input: &Path,
    output: &Path,
    detections: &[Detection],
) -> Result<(), Box<dyn std::error::Error>> {
    let source = image::open(input)?.to_rgba8();
    let boxes = compose(detections, MODEL_INPUT_SIZE);
    let annotated = annotate(&source, &boxes, DEFAULT_BOX_COLOR, DEFAULT_THICKNESS);
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    annotated.save(output)?;
    Ok(())
}

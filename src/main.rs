use std::path::PathBuf;
use std::process::ExitCode;

use cropscan::logger;
use cropscan::{ImageSource, PipelineConfig, Predictor};

use tracing::error;

const USAGE: &str = "usage: cropscan <image> [--model-dir <dir>]";

struct Args {
    image: PathBuf,
    model_dir: Option<PathBuf>,
}

fn parse_args() -> Result<Args, String> {
    let mut image = None;
    let mut model_dir = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--model-dir" => {
                let dir = args.next().ok_or("--model-dir needs a value")?;
                model_dir = Some(PathBuf::from(dir));
            }
            "-h" | "--help" => return Err(USAGE.to_owned()),
            _ if image.is_none() => image = Some(PathBuf::from(arg)),
            _ => return Err(format!("unexpected argument '{}'\n{}", arg, USAGE)),
        }
    }
    let image = image.ok_or_else(|| USAGE.to_owned())?;
    Ok(Args { image, model_dir })
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &args.model_dir {
        Some(dir) => PipelineConfig::from_model_dir(dir)?,
        None      => PipelineConfig::from_env()?,
    };
    let predictor = Predictor::load(&config)?;
    let diagnosis = predictor.diagnose(ImageSource::Path(&args.image))?;

    println!("Prediction: {}", diagnosis.label);
    match diagnosis.advice {
        Some(advice) => {
            println!("Cause:      {}", advice.cause);
            println!("Remedy:     {}", advice.remedy);
        }
        None => println!("No details available for this disease."),
    }
    Ok(())
}

fn main() -> ExitCode {
    logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

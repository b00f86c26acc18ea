extern crate bait_demand;

use anyhow::Context;
use bait_demand::input::DemandParameters;
use bait_demand::output::FileOutput;
use bait_demand::run_project;
use clap::Parser;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct DemandArgs {
    /// Hourly weather CSV with a time column plus the four weather variables
    weather_file: String,
    /// JSON file overriding any subset of the model parameters
    #[arg(long, short)]
    parameters_file: Option<String>,
    /// Include the weather inputs and intermediate series in the results
    #[arg(long, default_value_t = false)]
    raw: bool,
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(tracing::Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .expect("setting default subscriber failed");

    let args = DemandArgs::parse();

    let mut parameters = match &args.parameters_file {
        Some(path) => serde_json::from_reader(BufReader::new(
            File::open(path).with_context(|| format!("could not open parameters file {path}"))?,
        ))
        .with_context(|| format!("could not parse parameters file {path}"))?,
        None => DemandParameters::default(),
    };
    if args.raw {
        parameters.raw_output = true;
    }

    let weather_path = Path::new(&args.weather_file);
    let directory = weather_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_default();
    let file_stem = weather_path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("weather")
        .to_string();

    info!("estimating demand for {}", args.weather_file);
    run_project(
        BufReader::new(File::open(weather_path).with_context(|| {
            format!("could not open weather file {}", args.weather_file)
        })?),
        FileOutput::new(directory, file_stem),
        &parameters,
    )
}

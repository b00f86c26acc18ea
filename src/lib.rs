mod compare_floats;
pub mod core;
pub mod errors;
pub mod input;
pub mod output;
pub mod pipeline;
pub mod read_weather_file;
mod statistics;
mod time_series;

pub use crate::pipeline::{demand, DemandOutput, RawOutput};

use crate::input::DemandParameters;
use crate::output::Output;
use crate::read_weather_file::weather_table_from_csv;
use csv::WriterBuilder;
use indexmap::IndexMap;
use std::io::Read;
use tracing::info;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Run the whole model: read an hourly weather CSV, estimate demand, and
/// write the results through `output`.
pub fn run_project(
    input: impl Read,
    output: impl Output,
    parameters: &DemandParameters,
) -> Result<(), anyhow::Error> {
    let table = weather_table_from_csv(input)?;
    info!(timesteps = table.timestamps.len(), "loaded weather table");

    let result = pipeline::demand(&table, parameters)?;

    if output.is_noop() {
        return Ok(());
    }
    write_results_file(output, &result)
}

fn write_results_file(output: impl Output, result: &DemandOutput) -> Result<(), anyhow::Error> {
    let writer = output.writer_for_location_key("results")?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    let mut columns: IndexMap<&str, &[f64]> = IndexMap::from([
        ("total_demand", result.total_demand.as_slice()),
        ("heating_demand", result.heating_demand.as_slice()),
        ("cooling_demand", result.cooling_demand.as_slice()),
    ]);
    if let Some(raw) = &result.raw {
        columns.insert("temperature", raw.weather.temperature.as_slice());
        columns.insert(
            "radiation_global_horizontal",
            raw.weather.radiation_global_horizontal.as_slice(),
        );
        columns.insert("wind_speed_2m", raw.weather.wind_speed_2m.as_slice());
        columns.insert("humidity", raw.weather.humidity.as_slice());
        columns.insert("bait", raw.bait.as_slice());
        columns.insert("hdd", raw.hdd.as_slice());
        columns.insert("cdd", raw.cdd.as_slice());
    }

    let mut headings = vec!["time"];
    headings.extend(columns.keys());
    writer.write_record(&headings)?;

    for (t_idx, timestamp) in result.timestamps.iter().enumerate() {
        let mut row = vec![timestamp.format(TIMESTAMP_FORMAT).to_string()];
        row.extend(columns.values().map(|column| column[t_idx].to_string()));
        writer.write_record(&row)?;
    }

    writer.flush()?;

    Ok(())
}

use crate::input::WeatherTable;
use anyhow::{anyhow, bail, Context};
use chrono::NaiveDateTime;
use csv::ReaderBuilder as CsvReaderBuilder;
use indexmap::IndexMap;
use std::io::Read;

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Read a weather CSV into a raw table: a leading `time` column of naive
/// timestamps followed by one numeric column per remaining header entry.
/// Empty cells become NaN and flow through the model unchanged; column
/// names are not checked here, validation is the pipeline's job.
pub fn weather_table_from_csv(file: impl Read) -> anyhow::Result<WeatherTable> {
    let mut reader = CsvReaderBuilder::new().from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.len() < 2 {
        bail!("weather file needs a time column and at least one data column");
    }
    let mut columns: IndexMap<String, Vec<f64>> = headers
        .iter()
        .skip(1)
        .map(|name| (name.to_string(), vec![]))
        .collect();

    let mut timestamps = vec![];
    for (i, result) in reader.records().enumerate() {
        let row = i + 2; // header occupies the first line
        let record = result?;
        let raw_timestamp = record
            .get(0)
            .ok_or_else(|| anyhow!("row {row} is empty"))?;
        timestamps.push(
            parse_timestamp(raw_timestamp)
                .with_context(|| format!("unparseable timestamp on row {row}"))?,
        );
        for ((name, values), field) in columns.iter_mut().zip(1..) {
            let raw = record
                .get(field)
                .ok_or_else(|| anyhow!("row {row} has no value for {name}"))?
                .trim();
            values.push(if raw.is_empty() {
                f64::NAN
            } else {
                raw.parse()
                    .with_context(|| format!("unparseable {name} value on row {row}"))?
            });
        }
    }

    Ok(WeatherTable {
        timestamps,
        columns,
    })
}

fn parse_timestamp(raw: &str) -> anyhow::Result<NaiveDateTime> {
    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(raw.trim(), format) {
            return Ok(timestamp);
        }
    }
    Err(anyhow!("'{raw}' is not a recognized timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    const WEATHER_CSV: &str = "\
time,temperature,radiation_global_horizontal,wind_speed_2m,humidity
2020-01-01T00:00:00,4.2,0,3.1,0.004
2020-01-01T01:00:00,3.9,,3.4,0.004
2020-01-01 02:00:00,3.7,0,3.0,0.005
";

    #[rstest]
    fn should_read_headers_and_rows() {
        let table = weather_table_from_csv(WEATHER_CSV.as_bytes()).unwrap();
        assert_eq!(table.timestamps.len(), 3);
        assert_eq!(
            table.columns.keys().collect::<Vec<_>>(),
            vec![
                "temperature",
                "radiation_global_horizontal",
                "wind_speed_2m",
                "humidity"
            ]
        );
        assert_eq!(table.columns["temperature"], vec![4.2, 3.9, 3.7]);
        assert_eq!(table.timestamps[2].format("%H").to_string(), "02");
    }

    #[rstest]
    fn empty_cells_become_nan() {
        let table = weather_table_from_csv(WEATHER_CSV.as_bytes()).unwrap();
        assert!(table.columns["radiation_global_horizontal"][1].is_nan());
    }

    #[rstest]
    fn unparseable_timestamp_is_an_error() {
        let malformed = "time,temperature\nyesterday,4.2\n";
        assert!(weather_table_from_csv(malformed.as_bytes()).is_err());
    }

    #[rstest]
    fn unparseable_value_is_an_error() {
        let malformed = "time,temperature\n2020-01-01T00:00:00,warm\n";
        assert!(weather_table_from_csv(malformed.as_bytes()).is_err());
    }

    #[rstest]
    fn missing_data_columns_are_an_error() {
        assert!(weather_table_from_csv("time\n2020-01-01T00:00:00\n".as_bytes()).is_err());
    }
}

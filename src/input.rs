use crate::errors::ValidationError;
use crate::statistics::mean;
use crate::time_series::{day_ranges, validate_hourly_index};
use chrono::{NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Deserialize;
use serde_valid::Validate;

/// Column names a weather table must carry, in sorted order.
pub const REQUIRED_COLUMNS: [&str; 4] = [
    "humidity",
    "radiation_global_horizontal",
    "temperature",
    "wind_speed_2m",
];

/// A time-indexed table of named numeric columns, as ingested from file or
/// assembled in memory by a caller. Carries no validity guarantees.
#[derive(Clone, Debug, Default)]
pub struct WeatherTable {
    pub timestamps: Vec<NaiveDateTime>,
    pub columns: IndexMap<String, Vec<f64>>,
}

/// An hourly weather series carrying exactly the four supported variables.
#[derive(Clone, Debug)]
pub struct WeatherSeries {
    pub timestamps: Vec<NaiveDateTime>,
    /// air temperature, in deg C
    pub temperature: Vec<f64>,
    /// global horizontal irradiance, in W/m2
    pub radiation_global_horizontal: Vec<f64>,
    /// wind speed at 2m, in m/s
    pub wind_speed_2m: Vec<f64>,
    /// specific humidity, in kg water per kg air
    pub humidity: Vec<f64>,
}

impl WeatherSeries {
    /// Validate a raw table into a weather series: exactly the four required
    /// columns (by sorted-name match), every column as long as the time
    /// index, and a strictly hourly index.
    pub fn from_table(table: &WeatherTable) -> Result<Self, ValidationError> {
        let mut actual: Vec<String> = table.columns.keys().cloned().collect();
        actual.sort();
        if actual != REQUIRED_COLUMNS {
            return Err(ValidationError::ColumnMismatch {
                expected: REQUIRED_COLUMNS.iter().map(ToString::to_string).collect(),
                actual,
            });
        }

        for (name, values) in &table.columns {
            if values.len() != table.timestamps.len() {
                return Err(ValidationError::ColumnLengthMismatch {
                    name: name.clone(),
                    expected: table.timestamps.len(),
                    actual: values.len(),
                });
            }
        }

        validate_hourly_index(&table.timestamps)?;

        Ok(Self {
            timestamps: table.timestamps.clone(),
            temperature: table.columns["temperature"].clone(),
            radiation_global_horizontal: table.columns["radiation_global_horizontal"].clone(),
            wind_speed_2m: table.columns["wind_speed_2m"].clone(),
            humidity: table.columns["humidity"].clone(),
        })
    }

    /// Downsample to means over calendar dates. Partial leading/trailing
    /// days average whatever hours they contain.
    pub fn daily_means(&self) -> DailyWeather {
        let ranges = day_ranges(&self.timestamps);
        let mut daily = DailyWeather::with_capacity(ranges.len());
        for (date, range) in ranges {
            daily.dates.push(date);
            daily.temperature.push(mean(&self.temperature[range.clone()]));
            daily
                .radiation_global_horizontal
                .push(mean(&self.radiation_global_horizontal[range.clone()]));
            daily
                .wind_speed_2m
                .push(mean(&self.wind_speed_2m[range.clone()]));
            daily.humidity.push(mean(&self.humidity[range]));
        }
        daily
    }
}

/// The four weather variables at daily resolution.
#[derive(Clone, Debug, Default)]
pub struct DailyWeather {
    pub dates: Vec<NaiveDate>,
    pub temperature: Vec<f64>,
    pub radiation_global_horizontal: Vec<f64>,
    pub wind_speed_2m: Vec<f64>,
    pub humidity: Vec<f64>,
}

impl DailyWeather {
    fn with_capacity(days: usize) -> Self {
        Self {
            dates: Vec::with_capacity(days),
            temperature: Vec::with_capacity(days),
            radiation_global_horizontal: Vec::with_capacity(days),
            wind_speed_2m: Vec::with_capacity(days),
            humidity: Vec::with_capacity(days),
        }
    }
}

/// Tunable parameters of the demand model, all with defaults.
#[derive(Clone, Debug, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct DemandParameters {
    /// BAIT below this accrues heating degree-days, in deg C
    pub heating_threshold: f64,
    /// BAIT above this accrues cooling degree-days, in deg C
    pub cooling_threshold: f64,
    /// weather-independent demand floor
    pub base_power: f64,
    /// demand per heating degree; exactly zero disables heating
    pub heating_power: f64,
    /// demand per cooling degree; exactly zero disables cooling
    pub cooling_power: f64,
    /// weight of the previous day in BAIT smoothing
    #[validate(minimum = 0.0)]
    #[validate(exclusive_maximum = 1.0)]
    pub smoothing: f64,
    /// index gain per W/m2 of above-average irradiance
    pub solar_gains: f64,
    /// index gain per m/s of above-average wind, conventionally negative
    pub wind_chill: f64,
    /// amplification of discomfort per g/kg of above-average humidity
    pub humidity_discomfort: f64,
    /// reshape demand through the bundled hour-of-day profiles
    pub use_diurnal_profile: bool,
    /// include the weather inputs and intermediate series in the output
    pub raw_output: bool,
}

impl Default for DemandParameters {
    fn default() -> Self {
        Self {
            heating_threshold: 14.,
            cooling_threshold: 20.,
            base_power: 0.,
            heating_power: 0.3,
            cooling_power: 0.15,
            smoothing: 0.5,
            solar_gains: 0.012,
            wind_chill: -0.20,
            humidity_discomfort: 0.05,
            use_diurnal_profile: true,
            raw_output: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn hourly(count: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2018, 3, 5)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..count)
            .map(|hour| start + TimeDelta::hours(hour as i64))
            .collect()
    }

    #[fixture]
    fn table() -> WeatherTable {
        let timestamps = hourly(48);
        let columns = IndexMap::from([
            (
                "temperature".to_string(),
                (0..48).map(|hour| hour as f64).collect::<Vec<_>>(),
            ),
            ("radiation_global_horizontal".to_string(), vec![150.; 48]),
            ("wind_speed_2m".to_string(), vec![4.; 48]),
            ("humidity".to_string(), vec![0.006; 48]),
        ]);
        WeatherTable {
            timestamps,
            columns,
        }
    }

    #[rstest]
    fn should_accept_exact_column_set(table: WeatherTable) {
        let series = WeatherSeries::from_table(&table).unwrap();
        assert_eq!(series.timestamps.len(), 48);
        assert_eq!(series.temperature[47], 47.);
    }

    #[rstest]
    fn should_reject_extra_column(mut table: WeatherTable) {
        table.columns.insert("pressure".to_string(), vec![1013.; 48]);
        assert!(matches!(
            WeatherSeries::from_table(&table),
            Err(ValidationError::ColumnMismatch { .. })
        ));
    }

    #[rstest]
    fn should_reject_missing_column(mut table: WeatherTable) {
        table.columns.shift_remove("humidity");
        assert!(matches!(
            WeatherSeries::from_table(&table),
            Err(ValidationError::ColumnMismatch { .. })
        ));
    }

    #[rstest]
    fn should_reject_renamed_column(mut table: WeatherTable) {
        let values = table.columns.shift_remove("wind_speed_2m").unwrap();
        table.columns.insert("wind_speed_10m".to_string(), values);
        assert!(WeatherSeries::from_table(&table).is_err());
    }

    #[rstest]
    fn should_reject_short_column(mut table: WeatherTable) {
        table.columns["temperature"].pop();
        assert!(matches!(
            WeatherSeries::from_table(&table),
            Err(ValidationError::ColumnLengthMismatch { .. })
        ));
    }

    #[rstest]
    fn should_reject_non_hourly_index(mut table: WeatherTable) {
        table.timestamps[30] += TimeDelta::minutes(30);
        assert!(matches!(
            WeatherSeries::from_table(&table),
            Err(ValidationError::IrregularTimeIndex { .. })
        ));
    }

    #[rstest]
    fn should_average_each_calendar_day(table: WeatherTable) {
        let daily = WeatherSeries::from_table(&table).unwrap().daily_means();
        assert_eq!(daily.dates.len(), 2);
        assert_eq!(daily.temperature, vec![11.5, 35.5]);
        assert_eq!(daily.wind_speed_2m, vec![4., 4.]);
    }

    #[rstest]
    fn defaults_match_documented_values() {
        let parameters = DemandParameters::default();
        assert_eq!(parameters.heating_threshold, 14.);
        assert_eq!(parameters.cooling_threshold, 20.);
        assert_eq!(parameters.heating_power, 0.3);
        assert_eq!(parameters.cooling_power, 0.15);
        assert_eq!(parameters.smoothing, 0.5);
        assert!(parameters.use_diurnal_profile);
        assert!(!parameters.raw_output);
    }

    #[rstest]
    fn partial_json_overrides_only_named_fields() {
        let parameters: DemandParameters =
            serde_json::from_str(r#"{"smoothing": 0.9, "base_power": 2.5}"#).unwrap();
        assert_eq!(parameters.smoothing, 0.9);
        assert_eq!(parameters.base_power, 2.5);
        assert_eq!(parameters.heating_power, 0.3);
    }

    #[rstest]
    fn smoothing_outside_unit_interval_fails_validation() {
        let parameters = DemandParameters {
            smoothing: 1.,
            ..Default::default()
        };
        assert!(parameters.validate().is_err());
        let parameters = DemandParameters {
            smoothing: -0.1,
            ..Default::default()
        };
        assert!(parameters.validate().is_err());
    }
}

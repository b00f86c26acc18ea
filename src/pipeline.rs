use crate::core::bait::bait;
use crate::core::demand::energy_demand_from_bait;
use crate::input::{DemandParameters, WeatherSeries, WeatherTable};
use crate::statistics::cubic_spline_interp;
use crate::time_series::{hours_since, noon_of};
use anyhow::anyhow;
use chrono::NaiveDateTime;
use serde_valid::Validate;
use tracing::debug;

/// Hourly demand estimates, indexed like the input weather series.
#[derive(Clone, Debug)]
pub struct DemandOutput {
    pub timestamps: Vec<NaiveDateTime>,
    pub total_demand: Vec<f64>,
    pub heating_demand: Vec<f64>,
    pub cooling_demand: Vec<f64>,
    /// input weather and intermediate series, present when raw output was
    /// requested
    pub raw: Option<RawOutput>,
}

#[derive(Clone, Debug)]
pub struct RawOutput {
    pub weather: WeatherSeries,
    pub bait: Vec<f64>,
    pub hdd: Vec<f64>,
    pub cdd: Vec<f64>,
}

/// Estimate heating and cooling demand for an hourly weather table.
///
/// The table is validated up front (exact column set, strictly hourly
/// index), downsampled to daily means, converted to the BAIT index at daily
/// resolution, upsampled back to hourly by a cubic spline through each day's
/// midday anchor, and finally converted to demand.
pub fn demand(table: &WeatherTable, parameters: &DemandParameters) -> anyhow::Result<DemandOutput> {
    parameters
        .validate()
        .map_err(|errors| anyhow!("invalid parameters: {errors}"))?;
    let weather = WeatherSeries::from_table(table)?;

    let daily = weather.daily_means();
    debug!(
        timesteps = weather.timestamps.len(),
        days = daily.dates.len(),
        "running demand pipeline"
    );

    let daily_bait = bait(
        &daily,
        parameters.smoothing,
        parameters.solar_gains,
        parameters.wind_chill,
        parameters.humidity_discomfort,
    );

    // each daily value is anchored at that day's midpoint before
    // interpolating, so the spline treats it as the day's characteristic
    // value centred at midday; hours outside the first and last anchor are
    // extrapolated
    let reference = weather.timestamps[0];
    let anchors: Vec<f64> = daily
        .dates
        .iter()
        .map(|date| hours_since(noon_of(*date), reference))
        .collect();
    let sample_points: Vec<f64> = weather
        .timestamps
        .iter()
        .map(|timestamp| hours_since(*timestamp, reference))
        .collect();
    let hourly_bait = cubic_spline_interp(&sample_points, &anchors, &daily_bait);

    let energy = energy_demand_from_bait(&hourly_bait, &weather.timestamps, parameters);

    let raw = parameters.raw_output.then(|| RawOutput {
        weather: weather.clone(),
        bait: hourly_bait,
        hdd: energy.hdd,
        cdd: energy.cdd,
    });

    Ok(DemandOutput {
        timestamps: weather.timestamps,
        total_demand: energy.total_demand,
        heating_demand: energy.heating_demand,
        cooling_demand: energy.cooling_demand,
        raw,
    })
}

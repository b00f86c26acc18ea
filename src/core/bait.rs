use crate::core::smoothing::smooth_series;
use crate::core::units::GRAMS_PER_KILOGRAM;
use crate::input::DailyWeather;

// Comfort reference around which humidity discomfort is measured, in deg C
const COMFORT_TEMPERATURE: f64 = 16.;

// Raw-temperature blending window: blending starts at the lower bound, is
// fully ramped at the upper bound, and never exceeds the maximum share
const LOWER_BLEND: f64 = 15.; // deg C
const UPPER_BLEND: f64 = 23.; // deg C
const MAX_RAW_VARIATION: f64 = 0.5;

/// Calculate the building-adjusted internal temperature (BAIT) for a daily
/// weather series: a "feels like" index for buildings, correlating roughly
/// 1:1 with air temperature.
///
/// Arguments:
/// * `weather` - daily-resolution weather series
/// * `smoothing` - weight of the previous day, in [0, 1); two days back
///   decays to its square
/// * `solar_gains` - index gain per W/m2 of above-average irradiance
/// * `wind_chill` - index gain per m/s of above-average wind (conventionally
///   negative)
/// * `humidity_discomfort` - amplification of the deviation from comfort per
///   g/kg of above-average humidity
pub fn bait(
    weather: &DailyWeather,
    smoothing: f64,
    solar_gains: f64,
    wind_chill: f64,
    humidity_discomfort: f64,
) -> Vec<f64> {
    let temperature = &weather.temperature;

    let mut index = Vec::with_capacity(temperature.len());
    for (day, &t) in temperature.iter().enumerate() {
        // "average" solar, wind and humidity conditions for this temperature;
        // deviations from these drive the feels-like corrections
        let setpoint_solar = 100. + 7. * t; // W/m2
        let setpoint_wind = 4.5 - 0.025 * t; // m/s
        let setpoint_humidity = (1.1 + 0.06 * t).exp(); // g water per kg air

        let mut n = t;
        // sunnier than average feels warmer
        n += (weather.radiation_global_horizontal[day] - setpoint_solar) * solar_gains;
        // windier than average feels colder
        n += (weather.wind_speed_2m[day] - setpoint_wind) * wind_chill;

        // humidity amplifies the deviation from comfort in either direction
        let discomfort = n - COMFORT_TEMPERATURE;
        let humidity_g_per_kg = weather.humidity[day] * GRAMS_PER_KILOGRAM as f64;
        n = COMFORT_TEMPERATURE
            + discomfort
            + discomfort * (humidity_g_per_kg - setpoint_humidity) * humidity_discomfort;

        index.push(n);
    }

    // smooth over the previous two days, the second decaying geometrically
    // from the first
    let smoothed = smooth_series(&index, &[smoothing, smoothing.powi(2)]);

    // blend raw temperature back in as the weather warms through the blend
    // window (occupants opening windows), following a sigmoid ramp
    let midpoint = (LOWER_BLEND + UPPER_BLEND) / 2.;
    let width = UPPER_BLEND - LOWER_BLEND;
    smoothed
        .iter()
        .zip(temperature)
        .map(|(n, t)| {
            let blend = MAX_RAW_VARIATION / (1. + (-(t - midpoint) * 10. / width).exp());
            t * blend + n * (1. - blend)
        })
        .collect()
}

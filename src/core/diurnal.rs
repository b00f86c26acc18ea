use crate::core::units::HOURS_PER_DAY;
use csv::ReaderBuilder as CsvReaderBuilder;
use lazy_static::lazy_static;
use serde::Deserialize;

/// Multiplicative weights reshaping a flat daily demand into an intraday
/// curve. Each column averages 1.0 across the day.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DiurnalProfile {
    pub heating: f64,
    pub cooling: f64,
}

#[derive(Debug, Deserialize)]
struct DiurnalProfileRow {
    hour: u32,
    heating: f64,
    cooling: f64,
}

lazy_static! {
    /// Hour-of-day profile weights, read once from the bundled table and
    /// immutable afterwards.
    pub static ref DIURNAL_PROFILES: [DiurnalProfile; HOURS_PER_DAY as usize] =
        parse_profile_table(include_str!("diurnal_profiles.csv"));
}

/// Profile weights for an hour of the day (0 to 23).
pub fn profile_for_hour(hour_of_day: u32) -> DiurnalProfile {
    DIURNAL_PROFILES[hour_of_day as usize]
}

fn parse_profile_table(raw: &str) -> [DiurnalProfile; HOURS_PER_DAY as usize] {
    let mut profiles = [DiurnalProfile::default(); HOURS_PER_DAY as usize];
    let mut reader = CsvReaderBuilder::new().from_reader(raw.as_bytes());
    for result in reader.deserialize::<DiurnalProfileRow>() {
        let row = result.expect("bundled diurnal profile table is well-formed");
        profiles[row.hour as usize] = DiurnalProfile {
            heating: row.heating,
            cooling: row.cooling,
        };
    }
    profiles
}

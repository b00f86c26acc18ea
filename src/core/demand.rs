use crate::core::degree_days::{cdd, hdd};
use crate::core::diurnal::profile_for_hour;
use crate::input::DemandParameters;
use crate::time_series::hour_of_day;
use chrono::NaiveDateTime;

/// Per-timestep demand series derived from a BAIT series.
#[derive(Clone, Debug, Default)]
pub struct EnergyDemand {
    pub hdd: Vec<f64>,
    pub cdd: Vec<f64>,
    pub heating_demand: Vec<f64>,
    pub cooling_demand: Vec<f64>,
    pub total_demand: Vec<f64>,
}

/// Convert a BAIT series into energy demand.
///
/// Heating demand is the heating degree values times the heating power, and
/// symmetrically for cooling; a power of exactly zero leaves the matching
/// degree-day and demand columns as literal zeroes rather than computing
/// them. With the diurnal profile enabled, each timestep's heating and
/// cooling demand is scaled by the bundled weight for its hour of day.
pub fn energy_demand_from_bait(
    bait: &[f64],
    timestamps: &[NaiveDateTime],
    parameters: &DemandParameters,
) -> EnergyDemand {
    let mut output = EnergyDemand {
        hdd: vec![0.; bait.len()],
        cdd: vec![0.; bait.len()],
        heating_demand: vec![0.; bait.len()],
        cooling_demand: vec![0.; bait.len()],
        total_demand: vec![0.; bait.len()],
    };

    if parameters.heating_power > 0. {
        output.hdd = hdd(bait, parameters.heating_threshold);
        output.heating_demand = output
            .hdd
            .iter()
            .map(|degrees| degrees * parameters.heating_power)
            .collect();
    }

    if parameters.cooling_power > 0. {
        output.cdd = cdd(bait, parameters.cooling_threshold);
        output.cooling_demand = output
            .cdd
            .iter()
            .map(|degrees| degrees * parameters.cooling_power)
            .collect();
    }

    if parameters.use_diurnal_profile {
        for (i, timestamp) in timestamps.iter().enumerate() {
            let profile = profile_for_hour(hour_of_day(timestamp));
            output.heating_demand[i] *= profile.heating;
            output.cooling_demand[i] *= profile.cooling;
        }
    }

    output.total_demand = output
        .heating_demand
        .iter()
        .zip(&output.cooling_demand)
        .map(|(heating, cooling)| parameters.base_power + heating + cooling)
        .collect();

    output
}

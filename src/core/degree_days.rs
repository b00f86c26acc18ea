use crate::compare_floats::max_of_2;

/// Heating degree values: the deficit of each entry below `threshold`,
/// clipped at zero.
pub fn hdd(series: &[f64], threshold: f64) -> Vec<f64> {
    series
        .iter()
        .map(|value| clip_negative(threshold - value))
        .collect()
}

/// Cooling degree values: the excess of each entry above `threshold`,
/// clipped at zero.
pub fn cdd(series: &[f64], threshold: f64) -> Vec<f64> {
    series
        .iter()
        .map(|value| clip_negative(value - threshold))
        .collect()
}

// NaN must stay visible rather than being clipped to zero
fn clip_negative(value: f64) -> f64 {
    if value.is_nan() {
        value
    } else {
        max_of_2(value, 0.)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn temperatures() -> Vec<f64> {
        vec![-10., 0., 10., 20., 30.]
    }

    #[rstest]
    fn should_calculate_heating_degree_values(temperatures: Vec<f64>) {
        assert_eq!(hdd(&temperatures, 14.), vec![24., 14., 4., 0., 0.]);
    }

    #[rstest]
    fn should_calculate_cooling_degree_values(temperatures: Vec<f64>) {
        assert_eq!(cdd(&temperatures, 14.), vec![0., 0., 0., 6., 16.]);
    }

    #[rstest]
    fn heating_and_cooling_sides_are_symmetric(temperatures: Vec<f64>) {
        // hdd - cdd recovers the signed difference, and at most one side is
        // non-zero at any entry
        let threshold = 14.;
        let heating = hdd(&temperatures, threshold);
        let cooling = cdd(&temperatures, threshold);
        for (i, temperature) in temperatures.iter().enumerate() {
            assert_eq!(heating[i] - cooling[i], threshold - temperature);
            assert_eq!(heating[i].min(cooling[i]), 0.);
        }
    }

    #[rstest]
    fn should_propagate_nan() {
        assert!(hdd(&[f64::NAN], 14.)[0].is_nan());
        assert!(cdd(&[f64::NAN], 14.)[0].is_nan());
    }
}

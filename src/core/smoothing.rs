/// Smooth a series over time with the given weighting for previous steps.
///
/// Arguments:
/// * `series` - ordered values, oldest first
/// * `weights` - one weight per lag; the first element weights the previous
///   timestep, the second the timestep before that, and so on
///
/// The lag buffer is edge-padded by repeating the first observed value, so
/// the early entries are defined rather than dropped. A weight of zero adds
/// no contribution but still counts in the renormalization, which divides by
/// one plus the sum of all weights. Only past values feed each output entry.
pub fn smooth_series(series: &[f64], weights: &[f64]) -> Vec<f64> {
    let mut lag = series.to_vec();
    let mut smooth = series.to_vec();

    for &weight in weights {
        // shift the lag buffer back one step; the front keeps the first value
        for i in (1..lag.len()).rev() {
            lag[i] = lag[i - 1];
        }

        if weight != 0. {
            for (smoothed, lagged) in smooth.iter_mut().zip(&lag) {
                *smoothed += lagged * weight;
            }
        }
    }

    let denominator = 1. + weights.iter().sum::<f64>();
    smooth.iter_mut().for_each(|value| *value /= denominator);

    smooth
}

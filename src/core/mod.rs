pub mod bait;
pub mod degree_days;
pub mod demand;
pub mod diurnal;
pub mod smoothing;
pub mod units;

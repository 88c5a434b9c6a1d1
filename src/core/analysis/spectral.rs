// src/core/analysis/spectral.rs
//
// Spectral summary: plain means of the four per-frame series.

use crate::core::dsp::stats::mean;
use crate::core::provider::SpectralSeries;
use crate::descriptor::SpectralFeatures;

pub fn summarize_spectral(series: &SpectralSeries) -> SpectralFeatures {
    SpectralFeatures {
        spectral_centroid_mean: mean(&series.centroid),
        spectral_rolloff_mean: mean(&series.rolloff),
        spectral_bandwidth_mean: mean(&series.bandwidth),
        zero_crossing_rate_mean: mean(&series.zero_crossing_rate),
    }
}

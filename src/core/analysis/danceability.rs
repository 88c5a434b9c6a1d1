// src/core/analysis/danceability.rs
//
// Danceability: one minus the coefficient of variation of the spectral
// centroid, clamped to [0, 1].

use crate::core::dsp::stats::{mean, std_dev};

/// Returned when the centroid series is empty, zero-mean or non-finite
pub const DANCEABILITY_FALLBACK: f64 = 0.0;

pub fn estimate_danceability(centroid: &[f32]) -> f64 {
    let m = mean(centroid);
    if m == 0.0 || !m.is_finite() {
        log::debug!("Zero-mean centroid series; danceability falls back to {}", DANCEABILITY_FALLBACK);
        return DANCEABILITY_FALLBACK;
    }
    let score = 1.0 - std_dev(centroid) / m;
    if !score.is_finite() {
        return DANCEABILITY_FALLBACK;
    }
    score.clamp(0.0, 1.0)
}

// src/core/analysis/energy.rs

use crate::core::dsp::stats::mean;

/// Mean of the per-frame RMS series
pub fn estimate_energy(rms: &[f32]) -> f64 {
    mean(rms)
}

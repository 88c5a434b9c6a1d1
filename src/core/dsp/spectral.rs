//! Per-frame spectral shape statistics
//!
//! Each function takes one magnitude spectrum (bins `0..=N/2`) and the bin
//! spacing in Hz. Silent frames yield 0.0.

/// Fraction of spectral magnitude below the rolloff frequency
pub const ROLLOFF_PERCENT: f32 = 0.85;

/// Magnitude-weighted mean frequency
pub fn centroid(magnitudes: &[f32], bin_hz: f32) -> f32 {
    let total: f32 = magnitudes.iter().sum();
    if total <= f32::EPSILON {
        return 0.0;
    }
    let weighted: f32 = magnitudes
        .iter()
        .enumerate()
        .map(|(k, &m)| k as f32 * bin_hz * m)
        .sum();
    weighted / total
}

/// Magnitude-weighted standard deviation around the centroid
pub fn bandwidth(magnitudes: &[f32], bin_hz: f32) -> f32 {
    let total: f32 = magnitudes.iter().sum();
    if total <= f32::EPSILON {
        return 0.0;
    }
    let c = centroid(magnitudes, bin_hz);
    let variance: f32 = magnitudes
        .iter()
        .enumerate()
        .map(|(k, &m)| {
            let d = k as f32 * bin_hz - c;
            d * d * m
        })
        .sum::<f32>()
        / total;
    variance.sqrt()
}

/// Lowest bin frequency below which `percent` of the total magnitude lies
pub fn rolloff(magnitudes: &[f32], bin_hz: f32, percent: f32) -> f32 {
    let total: f32 = magnitudes.iter().sum();
    if total <= f32::EPSILON {
        return 0.0;
    }
    let threshold = total * percent;
    let mut cumulative = 0.0f32;
    for (k, &m) in magnitudes.iter().enumerate() {
        cumulative += m;
        if cumulative >= threshold {
            return k as f32 * bin_hz;
        }
    }
    (magnitudes.len().saturating_sub(1)) as f32 * bin_hz
}

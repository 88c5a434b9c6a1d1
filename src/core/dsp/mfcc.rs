// src/core/dsp/mfcc.rs
//
// Mel-frequency cepstral coefficients from a magnitude spectrogram.

use std::f32::consts::PI;

use super::fft::Spectrogram;

/// Number of triangular mel bands
pub const MEL_BANDS: usize = 40;

fn hz_to_mel(hz: f32) -> f32 {
    2595.0 * (1.0 + hz / 700.0).log10()
}

fn mel_to_hz(mel: f32) -> f32 {
    700.0 * (10f32.powf(mel / 2595.0) - 1.0)
}

/// Triangular filters spanning 0 Hz to Nyquist, `bands x num_bins`
pub fn mel_filterbank(bands: usize, num_bins: usize, bin_hz: f32) -> Vec<Vec<f32>> {
    let nyquist = bin_hz * (num_bins.saturating_sub(1)) as f32;
    let mel_max = hz_to_mel(nyquist);
    let edges: Vec<f32> = (0..bands + 2)
        .map(|i| mel_to_hz(mel_max * i as f32 / (bands + 1) as f32))
        .collect();

    (0..bands)
        .map(|b| {
            let (lo, centre, hi) = (edges[b], edges[b + 1], edges[b + 2]);
            (0..num_bins)
                .map(|k| {
                    let f = k as f32 * bin_hz;
                    if f <= lo || f >= hi {
                        0.0
                    } else if f <= centre {
                        (f - lo) / (centre - lo).max(f32::EPSILON)
                    } else {
                        (hi - f) / (hi - centre).max(f32::EPSILON)
                    }
                })
                .collect()
        })
        .collect()
}

/// Orthonormal DCT-II, keeping the first `n` coefficients
fn dct_ii(input: &[f32], n: usize) -> Vec<f32> {
    let len = input.len() as f32;
    (0..n)
        .map(|k| {
            let sum: f32 = input
                .iter()
                .enumerate()
                .map(|(i, &x)| x * (PI * k as f32 * (2.0 * i as f32 + 1.0) / (2.0 * len)).cos())
                .sum();
            let scale = if k == 0 { (1.0 / len).sqrt() } else { (2.0 / len).sqrt() };
            sum * scale
        })
        .collect()
}

/// MFCC matrix, one row of `coefficients` values per frame
pub fn mfcc(spec: &Spectrogram, coefficients: usize) -> Vec<Vec<f32>> {
    let num_bins = spec.frames.first().map_or(0, Vec::len);
    if num_bins == 0 {
        return Vec::new();
    }
    let bank = mel_filterbank(MEL_BANDS, num_bins, spec.bin_hz);
    let keep = coefficients.min(MEL_BANDS);

    spec.frames
        .iter()
        .map(|mags| {
            let log_mel: Vec<f32> = bank
                .iter()
                .map(|filter| {
                    let energy: f32 = filter.iter().zip(mags).map(|(&w, &m)| w * m * m).sum();
                    10.0 * energy.max(1e-10).log10()
                })
                .collect();
            dct_ii(&log_mel, keep)
        })
        .collect()
}

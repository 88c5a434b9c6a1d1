// src/core/dsp/rhythm.rs
//
// Onset envelope, onset picking, tempo estimation and beat placement.
// The onset envelope is the half-wave rectified spectral flux of the
// log-compressed magnitude spectrogram.

use super::fft::Spectrogram;
use super::stats::{find_peaks, mean, moving_average, std_dev};

/// Minimum spacing between two reported onsets (seconds)
const MIN_ONSET_GAP_SECS: f64 = 0.05;
/// Beats may move this fraction of a period towards a local envelope peak
const BEAT_SNAP_FRACTION: f64 = 0.1;
/// Centre of the log-normal tempo prior (BPM)
const PRIOR_BPM: f64 = 120.0;
/// Width of the tempo prior in octaves
const PRIOR_OCTAVES: f64 = 1.0;

/// Onset strength per frame
pub fn onset_envelope(spec: &Spectrogram) -> Vec<f32> {
    if spec.frames.is_empty() {
        return Vec::new();
    }
    let mut envelope = Vec::with_capacity(spec.frames.len());
    let mut prev: Vec<f32> = spec.frames[0].iter().map(|&m| (1.0 + m).ln()).collect();
    envelope.push(0.0);

    for mags in &spec.frames[1..] {
        let current: Vec<f32> = mags.iter().map(|&m| (1.0 + m).ln()).collect();
        let flux: f32 = current
            .iter()
            .zip(&prev)
            .map(|(&c, &p)| (c - p).max(0.0))
            .sum();
        envelope.push(flux);
        prev = current;
    }

    moving_average(&envelope, 3)
}

/// Onset times in seconds picked from the envelope
pub fn pick_onsets(envelope: &[f32], frame_rate: f64) -> Vec<f64> {
    if envelope.is_empty() || frame_rate <= 0.0 {
        return Vec::new();
    }
    let threshold = (mean(envelope) + 0.5 * std_dev(envelope)) as f32;
    let min_distance = ((MIN_ONSET_GAP_SECS * frame_rate).ceil() as usize).max(1);
    find_peaks(envelope, threshold, min_distance)
        .into_iter()
        .map(|frame| frame as f64 / frame_rate)
        .collect()
}

/// Normalized autocorrelation for lags `0..=max_lag`
fn autocorrelation(signal: &[f32], max_lag: usize) -> Option<Vec<f64>> {
    let n = signal.len();
    if n == 0 {
        return None;
    }
    let m = mean(signal);
    let centred: Vec<f64> = signal.iter().map(|&x| x as f64 - m).collect();
    let energy: f64 = centred.iter().map(|x| x * x).sum();
    if energy <= 1e-12 {
        return None;
    }
    let max_lag = max_lag.min(n - 1);
    Some(
        (0..=max_lag)
            .map(|lag| {
                centred[..n - lag]
                    .iter()
                    .zip(&centred[lag..])
                    .map(|(a, b)| a * b)
                    .sum::<f64>()
                    / energy
            })
            .collect(),
    )
}

/// Dominant beat period in frames (fractional), searched within the BPM range.
/// `None` when the envelope carries no periodic energy.
pub fn estimate_period(envelope: &[f32], frame_rate: f64, min_bpm: f64, max_bpm: f64) -> Option<f64> {
    if !(frame_rate.is_finite() && frame_rate > 0.0 && min_bpm > 0.0 && min_bpm < max_bpm) {
        return None;
    }
    let min_lag = ((60.0 / max_bpm * frame_rate).floor() as usize).max(1);
    let max_lag = ((60.0 / min_bpm * frame_rate).ceil() as usize).min(envelope.len());
    let acf = autocorrelation(envelope, max_lag.saturating_add(1))?;
    let upper = max_lag.min(acf.len().saturating_sub(1));
    if min_lag > upper {
        return None;
    }

    // Weight each lag by a log-normal prior over tempo to suppress octave errors
    let weighted: Vec<f64> = acf
        .iter()
        .enumerate()
        .map(|(lag, &r)| {
            if lag == 0 {
                return r;
            }
            let octaves = (60.0 * frame_rate / lag as f64 / PRIOR_BPM).log2() / PRIOR_OCTAVES;
            r * (-0.5 * octaves * octaves).exp()
        })
        .collect();

    let mut best_lag = min_lag;
    for lag in min_lag..=upper {
        if weighted[lag] > weighted[best_lag] {
            best_lag = lag;
        }
    }
    if acf[best_lag] <= 0.0 {
        return None;
    }

    // Parabolic interpolation around the peak
    let mut period = best_lag as f64;
    if best_lag > 0 && best_lag + 1 < weighted.len() {
        let (a, b, c) = (weighted[best_lag - 1], weighted[best_lag], weighted[best_lag + 1]);
        let denom = a - 2.0 * b + c;
        if denom.abs() > 1e-12 {
            let shift = 0.5 * (a - c) / denom;
            if shift.abs() < 1.0 {
                period += shift;
            }
        }
    }
    Some(period)
}

/// Beat frames on a grid of `period`, phase chosen to maximize envelope
/// energy, each beat snapped to the nearest local envelope peak
pub fn place_beats(envelope: &[f32], period: f64) -> Vec<usize> {
    let n = envelope.len();
    if n == 0 || period < 1.0 {
        return Vec::new();
    }

    let grid_score = |offset: f64| -> f64 {
        let mut score = 0.0;
        let mut pos = offset;
        while (pos.round() as usize) < n {
            score += envelope[pos.round() as usize] as f64;
            pos += period;
        }
        score
    };

    let mut best_offset = 0.0;
    let mut best_score = f64::MIN;
    for step in 0..period.ceil() as usize {
        let offset = step as f64;
        let score = grid_score(offset);
        if score > best_score {
            best_score = score;
            best_offset = offset;
        }
    }

    let radius = (period * BEAT_SNAP_FRACTION).round() as usize;
    let mut beats: Vec<usize> = Vec::new();
    let mut pos = best_offset;
    while (pos.round() as usize) < n {
        let centre = pos.round() as usize;
        let lo = centre.saturating_sub(radius);
        let hi = (centre + radius).min(n - 1);
        let mut frame = centre;
        for i in lo..=hi {
            if envelope[i] > envelope[frame] {
                frame = i;
            }
        }
        if beats.last().map_or(true, |&last| frame > last) {
            beats.push(frame);
        }
        pos += period;
    }
    beats
}

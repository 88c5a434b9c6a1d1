// src/core/analysis/rhythm.rs
//
// Tempo and beat summary.

use crate::core::dsp::stats::{diff, std_dev_f64};
use crate::core::types::BeatTimeline;
use crate::descriptor::RhythmFeatures;

/// Standard deviation of inter-beat intervals; 0.0 with fewer than two beats
pub fn rhythm_regularity(beat_times: &[f64]) -> f64 {
    if beat_times.len() < 2 {
        log::debug!("Fewer than two beats; rhythm regularity falls back to 0");
        return 0.0;
    }
    std_dev_f64(&diff(beat_times))
}

/// Summarize the beat timeline and onset list
pub fn summarize_rhythm(beats: &BeatTimeline, onset_times: &[f64]) -> RhythmFeatures {
    RhythmFeatures {
        tempo: beats.tempo,
        beat_count: beats.beat_times.len(),
        onset_count: onset_times.len(),
        rhythm_regularity: rhythm_regularity(&beats.beat_times),
    }
}

//! Chromagram from a magnitude spectrogram

use super::fft::Spectrogram;
use crate::core::types::{ChromaMatrix, PITCH_CLASSES};

/// Lowest frequency folded into the chromagram (C1)
const MIN_FREQ_HZ: f32 = 32.7;
/// Highest frequency folded into the chromagram
const MAX_FREQ_HZ: f32 = 5000.0;
const A4_HZ: f32 = 440.0;

/// Pitch class (0 = C) of the equal-tempered note nearest to `freq`
pub fn pitch_class(freq: f32) -> usize {
    let midi = 69.0 + 12.0 * (freq / A4_HZ).log2();
    (midi.round() as i32).rem_euclid(PITCH_CLASSES as i32) as usize
}

/// Fold spectral power onto pitch classes; each frame is scaled so its
/// strongest class is 1.0 (silent frames stay zero)
pub fn chromagram(spec: &Spectrogram) -> ChromaMatrix {
    let num_bins = spec.frames.first().map_or(0, Vec::len);
    let bin_classes: Vec<Option<usize>> = (0..num_bins)
        .map(|k| {
            let f = spec.bin_frequency(k);
            (f >= MIN_FREQ_HZ && f <= MAX_FREQ_HZ).then(|| pitch_class(f))
        })
        .collect();

    let frames = spec
        .frames
        .iter()
        .map(|mags| {
            let mut chroma = [0.0f32; PITCH_CLASSES];
            for (&m, class) in mags.iter().zip(&bin_classes) {
                if let Some(p) = class {
                    chroma[*p] += m * m;
                }
            }
            let peak = chroma.iter().cloned().fold(0.0f32, f32::max);
            if peak > f32::EPSILON {
                for v in &mut chroma {
                    *v /= peak;
                }
            }
            chroma
        })
        .collect();

    ChromaMatrix::from_frames(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dsp::fft::Stft;
    use std::f32::consts::PI;

    #[test]
    fn test_pitch_class() {
        assert_eq!(pitch_class(440.0), 9);
        assert_eq!(pitch_class(261.63), 0);
        assert_eq!(pitch_class(392.0), 7);
        assert_eq!(pitch_class(65.41), 0);
    }

    #[test]
    fn test_sine_dominates_its_pitch_class() {
        let sr = 22050u32;
        let samples: Vec<f32> = (0..sr)
            .map(|i| (2.0 * PI * 392.0 * i as f32 / sr as f32).sin())
            .collect();
        let spec = Stft::new(4096, 1024).magnitude(&samples, sr);
        let chroma = chromagram(&spec);
        let means = chroma.pitch_class_means();
        let best = means
            .iter()
            .enumerate()
            .fold((0, f64::MIN), |acc, (i, &v)| if v > acc.1 { (i, v) } else { acc })
            .0;
        assert_eq!(best, 7);
    }
}

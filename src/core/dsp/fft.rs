//! Short-time Fourier transform with centred Hann-windowed frames

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::f32::consts::PI;
use std::sync::Arc;

/// Periodic Hann window
pub fn hann_window(size: usize) -> Vec<f32> {
    let n = size as f32;
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / n).cos()))
        .collect()
}

/// Number of centred frames for a signal of `len` samples
pub fn frame_count(len: usize, hop_size: usize) -> usize {
    if len == 0 || hop_size == 0 {
        0
    } else {
        1 + len / hop_size
    }
}

/// Copy frame `index` into `out`, treating samples outside the signal as zero.
/// Frame `i` is centred on sample `i * hop_size`.
pub fn centred_frame(samples: &[f32], index: usize, frame_size: usize, hop_size: usize, out: &mut [f32]) {
    let centre = (index * hop_size) as isize;
    let start = centre - (frame_size / 2) as isize;
    for (k, slot) in out.iter_mut().enumerate().take(frame_size) {
        let pos = start + k as isize;
        *slot = if pos >= 0 && (pos as usize) < samples.len() {
            samples[pos as usize]
        } else {
            0.0
        };
    }
}

/// Magnitude spectrogram, one row per frame
#[derive(Debug, Clone)]
pub struct Spectrogram {
    /// `frames[t][k]` = |X_t(k)| for bins `0..=frame_size/2`
    pub frames: Vec<Vec<f32>>,
    /// Frequency spacing between bins in Hz
    pub bin_hz: f32,
}

impl Spectrogram {
    pub fn num_frames(&self) -> usize {
        self.frames.len()
    }

    /// Centre frequency of bin `k`
    pub fn bin_frequency(&self, k: usize) -> f32 {
        k as f32 * self.bin_hz
    }
}

/// STFT processor; plans the FFT once
pub struct Stft {
    frame_size: usize,
    hop_size: usize,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
}

impl Stft {
    pub fn new(frame_size: usize, hop_size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(frame_size);
        Self {
            frame_size,
            hop_size,
            window: hann_window(frame_size),
            fft,
        }
    }

    /// Compute the magnitude spectrogram of `samples`
    pub fn magnitude(&self, samples: &[f32], sample_rate: u32) -> Spectrogram {
        let num_frames = frame_count(samples.len(), self.hop_size);
        let num_bins = self.frame_size / 2 + 1;
        let mut frame = vec![0.0f32; self.frame_size];
        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.frame_size];
        let mut frames = Vec::with_capacity(num_frames);

        for t in 0..num_frames {
            centred_frame(samples, t, self.frame_size, self.hop_size, &mut frame);
            for ((slot, &s), &w) in buffer.iter_mut().zip(&frame).zip(&self.window) {
                *slot = Complex::new(s * w, 0.0);
            }
            self.fft.process(&mut buffer);
            frames.push(buffer[..num_bins].iter().map(|c| c.norm()).collect());
        }

        Spectrogram {
            frames,
            bin_hz: sample_rate as f32 / self.frame_size as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let window = hann_window(4);
        assert!(window[0].abs() < 0.01);
        assert!((window[2] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_count() {
        assert_eq!(frame_count(0, 512), 0);
        assert_eq!(frame_count(1, 512), 1);
        assert_eq!(frame_count(22050, 512), 44);
    }

    #[test]
    fn test_centred_frame_pads_with_zeros() {
        let samples = [1.0f32, 2.0, 3.0, 4.0];
        let mut out = [9.0f32; 4];
        centred_frame(&samples, 0, 4, 2, &mut out);
        assert_eq!(out, [0.0, 0.0, 1.0, 2.0]);
        centred_frame(&samples, 2, 4, 2, &mut out);
        assert_eq!(out, [3.0, 4.0, 0.0, 0.0]);
    }

    #[test]
    fn test_sine_peaks_at_expected_bin() {
        let sr = 22050;
        let freq = 1000.0f32;
        let samples: Vec<f32> = (0..sr)
            .map(|i| (2.0 * PI * freq * i as f32 / sr as f32).sin())
            .collect();
        let stft = Stft::new(2048, 512);
        let spec = stft.magnitude(&samples, sr as u32);
        assert_eq!(spec.num_frames(), frame_count(samples.len(), 512));

        let mid = &spec.frames[spec.num_frames() / 2];
        assert_eq!(mid.len(), 1025);
        let peak_bin = mid
            .iter()
            .enumerate()
            .fold((0, 0.0f32), |acc, (i, &m)| if m > acc.1 { (i, m) } else { acc })
            .0;
        let peak_hz = spec.bin_frequency(peak_bin);
        assert!((peak_hz - freq).abs() < spec.bin_hz * 1.5);
    }
}

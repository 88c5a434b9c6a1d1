// src/core/provider.rs
//
// Signal-analysis capability set consumed by the descriptor pipeline, and
// the default STFT-based implementation.

use super::decoder::decode_bytes;
use super::dsp::{chroma, mfcc, rhythm, spectral, stats};
use super::dsp::fft::{centred_frame, frame_count, Spectrogram, Stft};
use super::types::{BeatTimeline, ChromaMatrix, Waveform};
use crate::config::AnalysisConfig;
use crate::error::Result;

/// The four frame-aligned spectral series
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpectralSeries {
    pub centroid: Vec<f32>,
    pub rolloff: Vec<f32>,
    pub bandwidth: Vec<f32>,
    pub zero_crossing_rate: Vec<f32>,
}

/// Low-level analysis primitives. Implementations must be stateless with
/// respect to individual calls so one instance can serve concurrent analyses.
pub trait SignalAnalysisProvider: Send + Sync {
    /// Decode a payload into a mono waveform
    fn decode_waveform(&self, bytes: &[u8], extension_hint: Option<&str>) -> Result<Waveform>;

    fn compute_chroma(&self, samples: &[f32], sample_rate: u32) -> Result<ChromaMatrix>;

    /// One row of `coefficients` values per frame
    fn compute_mfcc(&self, samples: &[f32], sample_rate: u32, coefficients: usize) -> Result<Vec<Vec<f32>>>;

    fn compute_spectral_centroid(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>>;

    fn compute_spectral_rolloff(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>>;

    fn compute_spectral_bandwidth(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>>;

    fn compute_zero_crossing_rate(&self, samples: &[f32]) -> Result<Vec<f32>>;

    fn compute_rms(&self, samples: &[f32]) -> Result<Vec<f32>>;

    /// Onset times in seconds, ascending
    fn detect_onsets(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f64>>;

    fn track_beats(&self, samples: &[f32], sample_rate: u32) -> Result<BeatTimeline>;

    /// All four spectral series. Backends that share work between them
    /// should override this.
    fn compute_spectral_series(&self, samples: &[f32], sample_rate: u32) -> Result<SpectralSeries> {
        Ok(SpectralSeries {
            centroid: self.compute_spectral_centroid(samples, sample_rate)?,
            rolloff: self.compute_spectral_rolloff(samples, sample_rate)?,
            bandwidth: self.compute_spectral_bandwidth(samples, sample_rate)?,
            zero_crossing_rate: self.compute_zero_crossing_rate(samples)?,
        })
    }
}

/// Default provider: Symphonia decoding plus rustfft-based features
#[derive(Debug, Clone)]
pub struct DspProvider {
    frame_size: usize,
    hop_size: usize,
    min_bpm: f64,
    max_bpm: f64,
}

impl Default for DspProvider {
    fn default() -> Self {
        let defaults = AnalysisConfig::default();
        Self {
            frame_size: defaults.frame_size,
            hop_size: defaults.hop_size,
            min_bpm: defaults.min_bpm,
            max_bpm: defaults.max_bpm,
        }
    }
}

impl DspProvider {
    /// Provider with the frame geometry and tempo range of `config`.
    /// The configuration is validated first.
    pub fn from_config(config: &AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            frame_size: config.frame_size,
            hop_size: config.hop_size,
            min_bpm: config.min_bpm,
            max_bpm: config.max_bpm,
        })
    }

    fn spectrogram(&self, samples: &[f32], sample_rate: u32) -> Spectrogram {
        Stft::new(self.frame_size, self.hop_size).magnitude(samples, sample_rate)
    }

    fn frame_rate(&self, sample_rate: u32) -> f64 {
        sample_rate as f64 / self.hop_size as f64
    }

    /// Apply `f` to every centred time-domain frame
    fn per_frame<F>(&self, samples: &[f32], f: F) -> Vec<f32>
    where
        F: Fn(&[f32]) -> f32,
    {
        let mut frame = vec![0.0f32; self.frame_size];
        (0..frame_count(samples.len(), self.hop_size))
            .map(|t| {
                centred_frame(samples, t, self.frame_size, self.hop_size, &mut frame);
                f(&frame)
            })
            .collect()
    }

    fn map_spectrum<F>(&self, samples: &[f32], sample_rate: u32, f: F) -> Vec<f32>
    where
        F: Fn(&[f32], f32) -> f32,
    {
        let spec = self.spectrogram(samples, sample_rate);
        spec.frames.iter().map(|m| f(m, spec.bin_hz)).collect()
    }
}

impl SignalAnalysisProvider for DspProvider {
    fn decode_waveform(&self, bytes: &[u8], extension_hint: Option<&str>) -> Result<Waveform> {
        Ok(decode_bytes(bytes, extension_hint)?.to_waveform())
    }

    fn compute_chroma(&self, samples: &[f32], sample_rate: u32) -> Result<ChromaMatrix> {
        Ok(chroma::chromagram(&self.spectrogram(samples, sample_rate)))
    }

    fn compute_mfcc(&self, samples: &[f32], sample_rate: u32, coefficients: usize) -> Result<Vec<Vec<f32>>> {
        Ok(mfcc::mfcc(&self.spectrogram(samples, sample_rate), coefficients))
    }

    fn compute_spectral_centroid(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>> {
        Ok(self.map_spectrum(samples, sample_rate, spectral::centroid))
    }

    fn compute_spectral_rolloff(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>> {
        Ok(self.map_spectrum(samples, sample_rate, |m, hz| {
            spectral::rolloff(m, hz, spectral::ROLLOFF_PERCENT)
        }))
    }

    fn compute_spectral_bandwidth(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f32>> {
        Ok(self.map_spectrum(samples, sample_rate, spectral::bandwidth))
    }

    fn compute_zero_crossing_rate(&self, samples: &[f32]) -> Result<Vec<f32>> {
        Ok(self.per_frame(samples, stats::zero_crossing_rate))
    }

    fn compute_rms(&self, samples: &[f32]) -> Result<Vec<f32>> {
        Ok(self.per_frame(samples, stats::rms))
    }

    fn detect_onsets(&self, samples: &[f32], sample_rate: u32) -> Result<Vec<f64>> {
        let envelope = rhythm::onset_envelope(&self.spectrogram(samples, sample_rate));
        Ok(rhythm::pick_onsets(&envelope, self.frame_rate(sample_rate)))
    }

    fn track_beats(&self, samples: &[f32], sample_rate: u32) -> Result<BeatTimeline> {
        let envelope = rhythm::onset_envelope(&self.spectrogram(samples, sample_rate));
        let frame_rate = self.frame_rate(sample_rate);

        let Some(period) = rhythm::estimate_period(&envelope, frame_rate, self.min_bpm, self.max_bpm) else {
            log::debug!("No periodic onset energy; reporting tempo 0");
            return Ok(BeatTimeline::default());
        };

        let tempo = 60.0 * frame_rate / period;
        let beat_times = rhythm::place_beats(&envelope, period)
            .into_iter()
            .map(|frame| frame as f64 / frame_rate)
            .collect();
        Ok(BeatTimeline::new(tempo, beat_times))
    }

    fn compute_spectral_series(&self, samples: &[f32], sample_rate: u32) -> Result<SpectralSeries> {
        let spec = self.spectrogram(samples, sample_rate);
        let mut series = SpectralSeries::default();
        for mags in &spec.frames {
            series.centroid.push(spectral::centroid(mags, spec.bin_hz));
            series
                .rolloff
                .push(spectral::rolloff(mags, spec.bin_hz, spectral::ROLLOFF_PERCENT));
            series.bandwidth.push(spectral::bandwidth(mags, spec.bin_hz));
        }
        series.zero_crossing_rate = self.compute_zero_crossing_rate(samples)?;
        Ok(series)
    }
}

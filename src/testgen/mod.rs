// src/testgen/mod.rs
//
// Synthetic test signals for trackscope. Renders click tracks, tones and
// silence and writes them as 16-bit PCM WAV, either in memory or to disk,
// so the decode path can be exercised without fixture files.

use std::io::Cursor;
use std::path::Path;

use anyhow::{bail, Context, Result};
use hound::{SampleFormat, WavSpec, WavWriter};

/// Decay time constant of a single click
const CLICK_DECAY_SECS: f32 = 0.005;
/// Audible length of a single click
const CLICK_LENGTH_SECS: f32 = 0.03;

/// Signal shapes available for rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TestSignal {
    /// All-zero samples
    Silence,
    /// Steady sine tone
    Sine { freq_hz: f32, amplitude: f32 },
    /// Decaying tone bursts on a fixed tempo grid, first click at t = 0
    ClickTrack { bpm: f32, click_hz: f32, amplitude: f32 },
}

impl TestSignal {
    pub fn click_track(bpm: f32) -> Self {
        TestSignal::ClickTrack {
            bpm,
            click_hz: 1000.0,
            amplitude: 0.8,
        }
    }

    pub fn sine(freq_hz: f32) -> Self {
        TestSignal::Sine {
            freq_hz,
            amplitude: 0.5,
        }
    }

    /// Short name used in generated file names
    pub fn short_name(&self) -> String {
        match self {
            TestSignal::Silence => "silence".to_string(),
            TestSignal::Sine { freq_hz, .. } => format!("sine_{:.0}hz", freq_hz),
            TestSignal::ClickTrack { bpm, .. } => format!("click_{:.0}bpm", bpm),
        }
    }

    /// Render `duration_secs` of mono audio
    pub fn render(&self, sample_rate: u32, duration_secs: f32) -> Vec<f32> {
        let sr = sample_rate as f32;
        let n = (duration_secs * sr).round().max(0.0) as usize;
        let two_pi = 2.0 * std::f32::consts::PI;

        match *self {
            TestSignal::Silence => vec![0.0; n],
            TestSignal::Sine { freq_hz, amplitude } => (0..n)
                .map(|i| amplitude * (two_pi * freq_hz * i as f32 / sr).sin())
                .collect(),
            TestSignal::ClickTrack {
                bpm,
                click_hz,
                amplitude,
            } => {
                let mut samples = vec![0.0; n];
                if bpm <= 0.0 {
                    return samples;
                }
                let period = (60.0 / bpm * sr).round() as usize;
                let click_len = (CLICK_LENGTH_SECS * sr) as usize;
                let mut start = 0;
                while start < n {
                    for (j, s) in samples[start..n.min(start + click_len)].iter_mut().enumerate() {
                        let t = j as f32 / sr;
                        *s = amplitude * (-t / CLICK_DECAY_SECS).exp() * (two_pi * click_hz * t).sin();
                    }
                    start += period.max(1);
                }
                samples
            }
        }
    }
}

fn wav_spec(sample_rate: u32) -> WavSpec {
    WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    }
}

fn to_i16(sample: f32) -> i16 {
    (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16
}

/// Encode mono samples as an in-memory 16-bit WAV file
pub fn wav_bytes(samples: &[f32], sample_rate: u32) -> Result<Vec<u8>> {
    if sample_rate == 0 {
        bail!("sample rate must be positive");
    }
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = WavWriter::new(&mut cursor, wav_spec(sample_rate))
            .context("Failed to create WAV writer")?;
        for &s in samples {
            writer.write_sample(to_i16(s))?;
        }
        writer.finalize().context("Failed to finalize WAV data")?;
    }
    Ok(cursor.into_inner())
}

/// Write mono samples to `path` as a 16-bit WAV file
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate: u32) -> Result<()> {
    let path = path.as_ref();
    let bytes = wav_bytes(samples, sample_rate)?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Render `signal` and return it as WAV bytes
pub fn signal_wav(signal: TestSignal, sample_rate: u32, duration_secs: f32) -> Result<Vec<u8>> {
    wav_bytes(&signal.render(sample_rate, duration_secs), sample_rate)
}

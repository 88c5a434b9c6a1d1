// src/core/decoder.rs
//
// Audio decoding via Symphonia. Works on an in-memory payload so the same
// path serves files read from disk and bytes received from a caller.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use super::types::Waveform;
use crate::error::{AnalysisError, Result};

/// Decoded interleaved audio and stream metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Interleaved samples normalized to [-1.0, 1.0]
    pub samples: Vec<f32>,
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Number of audio channels
    pub channels: usize,
    /// Duration in seconds
    pub duration_secs: f64,
    /// Codec name as reported by Symphonia
    pub codec_name: String,
}

impl AudioData {
    /// Down-mix to a mono waveform
    pub fn to_waveform(&self) -> Waveform {
        Waveform::new(extract_mono(self), self.sample_rate)
    }
}

fn decode_err(context: &str, err: impl std::fmt::Display) -> AnalysisError {
    AnalysisError::DecodeFailure(format!("{}: {}", context, err))
}

/// Decode a complete audio payload to floating-point samples.
///
/// `extension_hint` (without the dot) helps the prober pick a demuxer.
pub fn decode_bytes(bytes: &[u8], extension_hint: Option<&str>) -> Result<AudioData> {
    if bytes.is_empty() {
        return Err(AnalysisError::DecodeFailure("empty payload".to_string()));
    }

    let cursor = Cursor::new(bytes.to_vec());
    let mss = MediaSourceStream::new(Box::new(cursor), Default::default());

    let mut hint = Hint::new();
    if let Some(ext) = extension_hint {
        hint.with_extension(ext);
    }

    let mut probed = symphonia::default::get_probe()
        .format(&hint, mss, &FormatOptions::default(), &MetadataOptions::default())
        .map_err(|e| decode_err("failed to probe format", e))?;

    let track = probed
        .format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| AnalysisError::DecodeFailure("no supported audio track".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| AnalysisError::DecodeFailure("stream does not specify sample rate".to_string()))?;
    let codec_name = format!("{:?}", track.codec_params.codec);

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| decode_err("failed to create decoder", e))?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<SampleBuffer<f32>> = None;
    // Interleaving follows the decoded buffers, not the container header
    let mut channels = 0usize;

    loop {
        let packet = match probed.format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(SymphoniaError::ResetRequired) => {
                decoder.reset();
                continue;
            }
            Err(e) => return Err(decode_err("failed to read packet", e)),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(buf) => buf,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::debug!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(decode_err("failed to decode packet", e)),
        };

        if sample_buf.is_none() {
            let spec = *decoded.spec();
            channels = spec.channels.count();
            if channels == 0 {
                return Err(AnalysisError::DecodeFailure("stream reports 0 channels".to_string()));
            }
            sample_buf = Some(SampleBuffer::new(decoded.capacity() as u64, spec));
        }

        if let Some(ref mut buf) = sample_buf {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    if samples.is_empty() {
        return Err(AnalysisError::DecodeFailure("no audio samples decoded".to_string()));
    }

    let duration_secs = samples.len() as f64 / (sample_rate as f64 * channels as f64);
    log::debug!(
        "Decoded {} ({} Hz, {} ch, {:.2}s)",
        codec_name,
        sample_rate,
        channels,
        duration_secs
    );

    Ok(AudioData {
        samples,
        sample_rate,
        channels,
        duration_secs,
        codec_name,
    })
}

/// Average all channels into one
pub fn extract_mono(audio: &AudioData) -> Vec<f32> {
    if audio.channels <= 1 {
        return audio.samples.clone();
    }

    audio
        .samples
        .chunks_exact(audio.channels)
        .map(|frame| frame.iter().sum::<f32>() / audio.channels as f32)
        .collect()
}

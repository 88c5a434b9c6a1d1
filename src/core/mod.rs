//! Core pipeline: decoding, signal analysis and descriptor estimation

pub mod analysis;
pub mod analyzer;
pub mod decoder;
pub mod dsp;
pub mod provider;
pub mod types;

pub use analyzer::{AnalyzerBuilder, AudioAnalyzer};
pub use decoder::{decode_bytes, AudioData};
pub use provider::{DspProvider, SignalAnalysisProvider, SpectralSeries};
pub use types::{BeatTimeline, ChromaMatrix, Waveform, PITCH_CLASSES, PITCH_CLASS_NAMES};

//! Trackscope - Musical descriptors for audio files
//!
//! Decodes an audio payload and derives a compact descriptor record:
//! tempo, beats and onsets, musical key, energy, danceability, a coarse
//! section structure and summary spectral statistics.
//!
//! ## Module Structure
//!
//! - `core` - Decoding, signal analysis provider, estimators and the analyzer
//! - `cli` - Command-line interface
//! - `config` - Analysis and segmentation settings
//! - `descriptor` - The result record
//! - `error` - Error type shared by the library
//! - `testgen` - Synthetic WAV generation for tests
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use trackscope::AudioAnalyzer;
//!
//! let analyzer = AudioAnalyzer::new();
//! let result = analyzer.analyze_file(Path::new("track.flac"))?;
//!
//! println!("{:.1} BPM in {}", result.tempo, result.key);
//! ```
//!
//! ## Custom Providers
//!
//! All signal-level work goes through [`SignalAnalysisProvider`]. The
//! bundled [`DspProvider`] decodes with Symphonia and computes features with
//! rustfft; any other implementation can be injected with
//! [`AnalyzerBuilder::build_with_provider`].

// Core analysis functionality
pub mod core;

// Command-line interface
pub mod cli;

// Configuration
pub mod config;

// Result types
pub mod descriptor;

pub mod error;

// Synthetic test signals
pub mod testgen;

pub use config::{AnalysisConfig, SectionConfidence, SegmentationConfig};
pub use core::{
    AnalyzerBuilder, AudioAnalyzer, BeatTimeline, ChromaMatrix, DspProvider, SignalAnalysisProvider,
    SpectralSeries, Waveform,
};
pub use descriptor::{AnalysisResult, RhythmFeatures, Section, SectionType, SpectralFeatures};
pub use error::{AnalysisError, Result};

// src/core/analyzer.rs
//
// High-level analysis API with builder pattern. One `AudioAnalyzer` can be
// shared across threads; every call owns its own buffers.

use std::path::Path;

use super::analysis::{
    estimate_danceability, estimate_energy, estimate_key, segment_sections, summarize_rhythm,
    summarize_spectral,
};
use super::provider::{DspProvider, SignalAnalysisProvider};
use super::types::Waveform;
use crate::config::{AnalysisConfig, SegmentationConfig};
use crate::descriptor::AnalysisResult;
use crate::error::{AnalysisError, Result};

/// Builder for AudioAnalyzer configuration
pub struct AnalyzerBuilder {
    config: AnalysisConfig,
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self {
            config: AnalysisConfig::default(),
        }
    }

    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = config;
        self
    }

    pub fn compute_mfcc(mut self, compute: bool) -> Self {
        self.config.compute_mfcc = compute;
        self
    }

    pub fn max_file_size(mut self, bytes: u64) -> Self {
        self.config.max_file_size_bytes = bytes;
        self
    }

    pub fn frame_geometry(mut self, frame_size: usize, hop_size: usize) -> Self {
        self.config.frame_size = frame_size;
        self.config.hop_size = hop_size;
        self
    }

    pub fn segmentation(mut self, segmentation: SegmentationConfig) -> Self {
        self.config.segmentation = segmentation;
        self
    }

    /// Build with the default provider configured from the same settings
    pub fn build(self) -> Result<AudioAnalyzer<DspProvider>> {
        let provider = DspProvider::from_config(&self.config)?;
        self.build_with_provider(provider)
    }

    pub fn build_with_provider<P: SignalAnalysisProvider>(self, provider: P) -> Result<AudioAnalyzer<P>> {
        AudioAnalyzer::with_provider(provider, self.config)
    }
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Runs the descriptor pipeline over one input at a time
pub struct AudioAnalyzer<P = DspProvider> {
    provider: P,
    config: AnalysisConfig,
}

impl AudioAnalyzer<DspProvider> {
    /// Analyzer with default configuration and the default provider
    pub fn new() -> Self {
        Self {
            provider: DspProvider::default(),
            config: AnalysisConfig::default(),
        }
    }

    /// Create a builder for custom configuration
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }
}

impl Default for AudioAnalyzer<DspProvider> {
    fn default() -> Self {
        Self::new()
    }
}

/// Tag provider errors with the stage that raised them
fn stage<T>(name: &'static str, result: Result<T>) -> Result<T> {
    result.map_err(|err| match err {
        err @ AnalysisError::AnalysisFailure { .. } => err,
        other => AnalysisError::failure(name, other),
    })
}

impl<P: SignalAnalysisProvider> AudioAnalyzer<P> {
    /// Create analyzer with an injected provider; the configuration is validated
    pub fn with_provider(provider: P, config: AnalysisConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { provider, config })
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Format gate: returns the lower-cased extension of `file_name`
    pub fn check_format(&self, file_name: &str) -> Result<String> {
        let extension = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .unwrap_or_default();
        if extension.is_empty() || !self.config.accepts_extension(&extension) {
            return Err(AnalysisError::UnsupportedFormat { extension });
        }
        Ok(extension)
    }

    /// Size gate
    pub fn check_size(&self, size: u64) -> Result<()> {
        let limit = self.config.max_file_size_bytes;
        if size > limit {
            return Err(AnalysisError::FileTooLarge { size, limit });
        }
        Ok(())
    }

    /// Run the full pipeline on a decoded waveform
    pub fn analyze_waveform(&self, waveform: &Waveform) -> Result<AnalysisResult> {
        let samples = waveform.samples.as_slice();
        let sr = waveform.sample_rate;
        if sr == 0 {
            return Err(AnalysisError::failure("input", "sample rate is zero"));
        }
        let duration = waveform.duration();

        let beats = stage("beat tracking", self.provider.track_beats(samples, sr))?;
        if !beats.tempo.is_finite() {
            return Err(AnalysisError::failure("beat tracking", "non-finite tempo estimate"));
        }
        log::debug!("Tempo {:.1} BPM, {} beats", beats.tempo, beats.beat_times.len());

        let chroma = stage("chroma", self.provider.compute_chroma(samples, sr))?;
        let key = estimate_key(&chroma);
        log::debug!("Key {} from {} chroma frames", key, chroma.num_frames());

        let rms = stage("rms", self.provider.compute_rms(samples))?;
        let energy = estimate_energy(&rms);

        let series = stage("spectral features", self.provider.compute_spectral_series(samples, sr))?;
        let danceability = estimate_danceability(&series.centroid);
        let spectral_features = summarize_spectral(&series);

        let onsets = stage("onset detection", self.provider.detect_onsets(samples, sr))?;
        let rhythm_features = summarize_rhythm(&beats, &onsets);

        if self.config.compute_mfcc {
            let mfcc = stage(
                "mfcc",
                self.provider.compute_mfcc(samples, sr, self.config.mfcc_coefficients),
            )?;
            log::debug!(
                "Computed {} MFCC frames x {} coefficients (not used by descriptors)",
                mfcc.len(),
                self.config.mfcc_coefficients
            );
        }

        let sections = segment_sections(duration, &self.config.segmentation);
        log::debug!("{} sections over {:.2}s", sections.len(), duration);

        Ok(AnalysisResult::assemble(
            duration,
            key,
            energy,
            danceability,
            sections,
            spectral_features,
            rhythm_features,
        ))
    }

    /// Gate, decode and analyze an in-memory payload
    pub fn analyze_bytes(&self, file_name: &str, bytes: &[u8]) -> Result<AnalysisResult> {
        let extension = self.check_format(file_name)?;
        self.check_size(bytes.len() as u64)?;

        log::info!("Analyzing audio file: {}", file_name);
        let waveform = self
            .provider
            .decode_waveform(bytes, Some(&extension))
            .map_err(|err| match err {
                err @ (AnalysisError::DecodeFailure(_) | AnalysisError::AnalysisFailure { .. }) => err,
                other => AnalysisError::failure("decode", other),
            })?;

        let result = self.analyze_waveform(&waveform)?;
        log::info!("Analysis completed for {}", file_name);
        Ok(result)
    }

    /// Gate on the file's extension and size before reading it
    pub fn analyze_file(&self, path: &Path) -> Result<AnalysisResult> {
        let name = path.to_string_lossy();
        self.check_format(&name)?;
        let size = std::fs::metadata(path)?.len();
        self.check_size(size)?;

        let bytes = std::fs::read(path)?;
        self.analyze_bytes(&name, &bytes)
    }
}

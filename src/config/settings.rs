// src/config/settings.rs
//
// Analysis settings: frame geometry, tempo search range, upload gates.
// Loaded from JSON; every field falls back to its default when absent.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::segmentation::SegmentationConfig;
use crate::error::{AnalysisError, Result};

/// Default ceiling for accepted payloads (50 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 50 * 1024 * 1024;

/// Extensions accepted by the format gate
pub const DEFAULT_EXTENSIONS: [&str; 4] = ["mp3", "wav", "flac", "m4a"];

/// Complete analysis configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// STFT frame length in samples
    pub frame_size: usize,
    /// Hop between successive frames in samples
    pub hop_size: usize,
    /// Number of cepstral coefficients to keep
    pub mfcc_coefficients: usize,
    /// Compute MFCC even though no descriptor consumes it
    pub compute_mfcc: bool,
    /// Lower bound of the tempo search range (BPM)
    pub min_bpm: f64,
    /// Upper bound of the tempo search range (BPM)
    pub max_bpm: f64,
    /// Largest payload accepted, in bytes
    pub max_file_size_bytes: u64,
    /// Lower-case file extensions accepted, without the dot
    pub accepted_extensions: Vec<String>,
    pub segmentation: SegmentationConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            frame_size: 2048,
            hop_size: 512,
            mfcc_coefficients: 13,
            compute_mfcc: false,
            min_bpm: 60.0,
            max_bpm: 200.0,
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE,
            accepted_extensions: DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            segmentation: SegmentationConfig::default(),
        }
    }
}

impl AnalysisConfig {
    /// Load and validate a JSON configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: AnalysisConfig = serde_json::from_str(&text).map_err(|e| {
            AnalysisError::Config(format!("{}: {}", path.display(), e))
        })?;
        config.validate()?;
        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the per-user file if it exists,
    /// otherwise the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(default) if default.is_file() => Self::load(&default),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/trackscope/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("trackscope").join("config.json"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.frame_size < 2 {
            return Err(AnalysisError::Config(format!(
                "frame_size must be at least 2, got {}",
                self.frame_size
            )));
        }
        if self.hop_size == 0 || self.hop_size > self.frame_size {
            return Err(AnalysisError::Config(format!(
                "hop_size must be in 1..={}, got {}",
                self.frame_size, self.hop_size
            )));
        }
        if self.mfcc_coefficients == 0 {
            return Err(AnalysisError::Config(
                "mfcc_coefficients must be positive".to_string(),
            ));
        }
        if !(self.min_bpm > 0.0 && self.min_bpm < self.max_bpm) {
            return Err(AnalysisError::Config(format!(
                "tempo range must satisfy 0 < min_bpm < max_bpm, got {}..{}",
                self.min_bpm, self.max_bpm
            )));
        }
        if self.accepted_extensions.is_empty() {
            return Err(AnalysisError::Config(
                "accepted_extensions must not be empty".to_string(),
            ));
        }
        self.segmentation.validate()
    }

    /// Case-insensitive extension check
    pub fn accepts_extension(&self, extension: &str) -> bool {
        let ext = extension.trim_start_matches('.').to_lowercase();
        self.accepted_extensions
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(&ext))
    }
}

// src/config/segmentation.rs
//
// Constants for the duration-proportional section heuristic.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Boundaries and confidences used by the section segmenter.
///
/// The defaults are part of the observable output: changing any of them
/// changes every section list the crate produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Tracks shorter than this (seconds) become a single `full_song` section
    pub short_track_secs: f64,
    /// Fraction of the duration where the intro ends
    pub intro_fraction: f64,
    /// Upper bound for the intro end (seconds)
    pub intro_max_secs: f64,
    /// Fraction of the duration where the verse ends
    pub verse_fraction: f64,
    /// Maximum verse length after the intro (seconds)
    pub verse_max_secs: f64,
    /// Fraction of the duration where the chorus ends
    pub chorus_fraction: f64,
    /// Maximum chorus length after the verse (seconds)
    pub chorus_max_secs: f64,
    /// Tracks longer than this (seconds) get a bridge
    pub bridge_min_track_secs: f64,
    /// Fraction of the duration where the bridge ends
    pub bridge_fraction: f64,
    /// Maximum bridge length after the chorus (seconds)
    pub bridge_max_secs: f64,
    pub confidence: SectionConfidence,
}

/// Fixed confidence per section label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfidence {
    pub full_song: f64,
    pub intro: f64,
    pub verse: f64,
    pub chorus: f64,
    pub bridge: f64,
    pub outro: f64,
}

impl Default for SectionConfidence {
    fn default() -> Self {
        Self {
            full_song: 0.9,
            intro: 0.8,
            verse: 0.7,
            chorus: 0.8,
            bridge: 0.6,
            outro: 0.7,
        }
    }
}

impl SectionConfidence {
    fn all(&self) -> [(&'static str, f64); 6] {
        [
            ("full_song", self.full_song),
            ("intro", self.intro),
            ("verse", self.verse),
            ("chorus", self.chorus),
            ("bridge", self.bridge),
            ("outro", self.outro),
        ]
    }
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            short_track_secs: 30.0,
            intro_fraction: 0.1,
            intro_max_secs: 15.0,
            verse_fraction: 0.4,
            verse_max_secs: 30.0,
            chorus_fraction: 0.7,
            chorus_max_secs: 25.0,
            bridge_min_track_secs: 120.0,
            bridge_fraction: 0.85,
            bridge_max_secs: 20.0,
            confidence: SectionConfidence::default(),
        }
    }
}

impl SegmentationConfig {
    /// Reject values that could produce overlapping or reversed sections
    pub fn validate(&self) -> Result<()> {
        let fractions = [
            ("intro_fraction", self.intro_fraction),
            ("verse_fraction", self.verse_fraction),
            ("chorus_fraction", self.chorus_fraction),
            ("bridge_fraction", self.bridge_fraction),
        ];
        for (name, value) in fractions {
            if !(value > 0.0 && value <= 1.0) {
                return Err(AnalysisError::Config(format!(
                    "segmentation.{} must be in (0, 1], got {}",
                    name, value
                )));
            }
        }
        if !(self.intro_fraction < self.verse_fraction
            && self.verse_fraction < self.chorus_fraction
            && self.chorus_fraction < self.bridge_fraction)
        {
            return Err(AnalysisError::Config(
                "segmentation fractions must increase intro < verse < chorus < bridge".to_string(),
            ));
        }
        if self.bridge_fraction >= 1.0 {
            return Err(AnalysisError::Config(format!(
                "segmentation.bridge_fraction must leave room for an outro (< 1), got {}",
                self.bridge_fraction
            )));
        }

        let lengths = [
            ("short_track_secs", self.short_track_secs),
            ("intro_max_secs", self.intro_max_secs),
            ("verse_max_secs", self.verse_max_secs),
            ("chorus_max_secs", self.chorus_max_secs),
            ("bridge_min_track_secs", self.bridge_min_track_secs),
            ("bridge_max_secs", self.bridge_max_secs),
        ];
        for (name, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(AnalysisError::Config(format!(
                    "segmentation.{} must be positive, got {}",
                    name, value
                )));
            }
        }

        for (name, value) in self.confidence.all() {
            if !(0.0..=1.0).contains(&value) {
                return Err(AnalysisError::Config(format!(
                    "segmentation.confidence.{} must be in [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(SegmentationConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_constants() {
        let cfg = SegmentationConfig::default();
        assert_eq!(cfg.short_track_secs, 30.0);
        assert_eq!(cfg.intro_fraction, 0.1);
        assert_eq!(cfg.intro_max_secs, 15.0);
        assert_eq!(cfg.verse_fraction, 0.4);
        assert_eq!(cfg.verse_max_secs, 30.0);
        assert_eq!(cfg.chorus_fraction, 0.7);
        assert_eq!(cfg.chorus_max_secs, 25.0);
        assert_eq!(cfg.bridge_min_track_secs, 120.0);
        assert_eq!(cfg.bridge_fraction, 0.85);
        assert_eq!(cfg.bridge_max_secs, 20.0);
        assert_eq!(cfg.confidence.full_song, 0.9);
        assert_eq!(cfg.confidence.bridge, 0.6);
    }

    #[test]
    fn test_rejects_unordered_fractions() {
        let cfg = SegmentationConfig {
            verse_fraction: 0.75,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_rejects_bridge_reaching_track_end() {
        let cfg = SegmentationConfig {
            bridge_fraction: 1.0,
            bridge_max_secs: 1000.0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(AnalysisError::Config(_))));

        let cfg = SegmentationConfig {
            bridge_fraction: 0.99,
            bridge_max_secs: 1000.0,
            ..Default::default()
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_rejects_out_of_range_confidence() {
        let mut cfg = SegmentationConfig::default();
        cfg.confidence.outro = 1.5;
        assert!(cfg.validate().is_err());
    }
}

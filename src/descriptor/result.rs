//! Descriptor result types and final assembly

use serde::{Deserialize, Serialize};
use std::fmt;

/// Time signature reported for every track; never estimated
pub const TIME_SIGNATURE: &str = "4/4";

/// Label attached to a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionType {
    FullSong,
    Intro,
    Verse,
    Chorus,
    Bridge,
    Outro,
}

impl SectionType {
    pub fn name(&self) -> &'static str {
        match self {
            SectionType::FullSong => "full_song",
            SectionType::Intro => "intro",
            SectionType::Verse => "verse",
            SectionType::Chorus => "chorus",
            SectionType::Bridge => "bridge",
            SectionType::Outro => "outro",
        }
    }
}

impl fmt::Display for SectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A labelled time interval, `start_time < end_time` for non-empty tracks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub start_time: f64,
    pub end_time: f64,
    pub section_type: SectionType,
    pub confidence: f64,
}

impl Section {
    pub fn new(start_time: f64, end_time: f64, section_type: SectionType, confidence: f64) -> Self {
        Self {
            start_time,
            end_time,
            section_type,
            confidence,
        }
    }

    pub fn length(&self) -> f64 {
        self.end_time - self.start_time
    }
}

/// Means of the four per-frame spectral series
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectralFeatures {
    pub spectral_centroid_mean: f64,
    pub spectral_rolloff_mean: f64,
    pub spectral_bandwidth_mean: f64,
    pub zero_crossing_rate_mean: f64,
}

/// Beat and onset summary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RhythmFeatures {
    pub tempo: f64,
    pub beat_count: usize,
    pub onset_count: usize,
    pub rhythm_regularity: f64,
}

/// Complete descriptor record for one track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub duration: f64,
    pub tempo: f64,
    pub key: String,
    pub time_signature: String,
    pub energy: f64,
    pub danceability: f64,
    pub sections: Vec<Section>,
    pub spectral_features: SpectralFeatures,
    pub rhythm_features: RhythmFeatures,
}

impl AnalysisResult {
    /// Combine the estimator outputs into the final record.
    ///
    /// `tempo` is taken from the rhythm summary so both fields always agree.
    pub fn assemble(
        duration: f64,
        key: &str,
        energy: f64,
        danceability: f64,
        sections: Vec<Section>,
        spectral_features: SpectralFeatures,
        rhythm_features: RhythmFeatures,
    ) -> Self {
        Self {
            duration,
            tempo: rhythm_features.tempo,
            key: key.to_string(),
            time_signature: TIME_SIGNATURE.to_string(),
            energy,
            danceability,
            sections,
            spectral_features,
            rhythm_features,
        }
    }

    /// Section covering time `t`, if any
    pub fn section_at(&self, t: f64) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| t >= s.start_time && t < s.end_time)
            .or_else(|| self.sections.last().filter(|s| t == s.end_time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> AnalysisResult {
        AnalysisResult::assemble(
            40.0,
            "A",
            0.12,
            0.8,
            vec![
                Section::new(0.0, 4.0, SectionType::Intro, 0.8),
                Section::new(4.0, 40.0, SectionType::Outro, 0.7),
            ],
            SpectralFeatures {
                spectral_centroid_mean: 1800.0,
                spectral_rolloff_mean: 4000.0,
                spectral_bandwidth_mean: 1500.0,
                zero_crossing_rate_mean: 0.05,
            },
            RhythmFeatures {
                tempo: 128.0,
                beat_count: 80,
                onset_count: 95,
                rhythm_regularity: 0.01,
            },
        )
    }

    #[test]
    fn test_assemble_sets_constants() {
        let result = sample_result();
        assert_eq!(result.time_signature, "4/4");
        assert_eq!(result.tempo, result.rhythm_features.tempo);
        assert_eq!(result.key, "A");
    }

    #[test]
    fn test_json_field_names() {
        let value = serde_json::to_value(sample_result()).unwrap();
        for field in [
            "duration",
            "tempo",
            "key",
            "time_signature",
            "energy",
            "danceability",
            "sections",
            "spectral_features",
            "rhythm_features",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["sections"][0]["section_type"], "intro");
        assert_eq!(value["rhythm_features"]["beat_count"], 80);
        assert!(value["spectral_features"]["zero_crossing_rate_mean"].is_f64());
    }

    #[test]
    fn test_section_at() {
        let result = sample_result();
        assert_eq!(result.section_at(2.0).unwrap().section_type, SectionType::Intro);
        assert_eq!(result.section_at(4.0).unwrap().section_type, SectionType::Outro);
        assert_eq!(result.section_at(40.0).unwrap().section_type, SectionType::Outro);
        assert!(result.section_at(41.0).is_none());
    }
}

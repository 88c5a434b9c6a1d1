//! Output formatting for CLI results

use chrono::{DateTime, Utc};
use colorful::Colorful;
use serde::Serialize;

use crate::descriptor::AnalysisResult;
use crate::error::AnalysisError;

/// Outcome for one input file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub file: String,
    pub analyzed_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileReport {
    pub fn from_outcome(file: impl Into<String>, outcome: Result<AnalysisResult, AnalysisError>) -> Self {
        let (result, error) = match outcome {
            Ok(result) => (Some(result), None),
            Err(e) => (None, Some(e.to_string())),
        };
        Self {
            file: file.into(),
            analyzed_at: Utc::now(),
            result,
            error,
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Format one report for terminal output
pub fn format_report(report: &FileReport, verbose: bool) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", report.file.clone().bold()));

    let result = match (&report.result, &report.error) {
        (Some(result), _) => result,
        (None, Some(error)) => {
            output.push_str(&format!("  {}\n", format!("✗ {}", error).red()));
            return output;
        }
        (None, None) => return output,
    };

    output.push_str(&format!("  Duration: {:.2}s\n", result.duration));
    output.push_str(&format!(
        "  Tempo: {} ({})\n",
        format!("{:.1} BPM", result.tempo).cyan(),
        result.time_signature
    ));
    output.push_str(&format!("  Key: {}\n", result.key.clone().cyan()));
    output.push_str(&format!("  Energy: {:.4}\n", result.energy));
    output.push_str(&format!("  Danceability: {:.2}\n", result.danceability));

    output.push_str("  Sections:\n");
    for section in &result.sections {
        output.push_str(&format!(
            "    {:>7.2}s - {:>7.2}s  {:<9} ({:.0}%)\n",
            section.start_time,
            section.end_time,
            section.section_type.name(),
            section.confidence * 100.0
        ));
    }

    if verbose {
        let s = &result.spectral_features;
        let r = &result.rhythm_features;
        output.push_str("\n  Technical Details:\n");
        output.push_str(&format!("    Spectral Centroid: {:.0} Hz\n", s.spectral_centroid_mean));
        output.push_str(&format!("    Spectral Rolloff: {:.0} Hz\n", s.spectral_rolloff_mean));
        output.push_str(&format!("    Spectral Bandwidth: {:.0} Hz\n", s.spectral_bandwidth_mean));
        output.push_str(&format!("    Zero Crossing Rate: {:.4}\n", s.zero_crossing_rate_mean));
        output.push_str(&format!("    Beats: {}  Onsets: {}\n", r.beat_count, r.onset_count));
        output.push_str(&format!("    Rhythm Regularity: {:.2}\n", r.rhythm_regularity));
    }

    output
}

/// Format a summary for multiple files
pub fn format_summary(reports: &[FileReport]) -> String {
    let ok = reports.iter().filter(|r| r.is_success()).count();
    let failed = reports.len() - ok;

    let mut output = format!("\n{}\n", "Summary:".bold());
    output.push_str(&format!("  {} files analyzed\n", reports.len()));
    if ok > 0 {
        output.push_str(&format!("  {}\n", format!("✓ {} succeeded", ok).green()));
    }
    if failed > 0 {
        output.push_str(&format!("  {}\n", format!("✗ {} failed", failed).red()));
    }
    output
}

/// Serialize all reports as a pretty JSON array
pub fn format_json(reports: &[FileReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(reports)
}

pub fn print_report(report: &FileReport, verbose: bool) {
    println!("{}", format_report(report, verbose));
}

pub fn print_json(reports: &[FileReport]) -> serde_json::Result<()> {
    println!("{}", format_json(reports)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{RhythmFeatures, Section, SectionType, SpectralFeatures};

    fn sample_result() -> AnalysisResult {
        AnalysisResult::assemble(
            12.0,
            "A",
            0.25,
            0.6,
            vec![Section::new(0.0, 12.0, SectionType::FullSong, 0.9)],
            SpectralFeatures::default(),
            RhythmFeatures {
                tempo: 120.0,
                beat_count: 24,
                onset_count: 30,
                rhythm_regularity: 0.9,
            },
        )
    }

    #[test]
    fn test_format_report() {
        let report = FileReport::from_outcome("track.wav", Ok(sample_result()));
        let output = format_report(&report, true);
        assert!(output.contains("track.wav"));
        assert!(output.contains("120.0 BPM"));
        assert!(output.contains("full_song"));
        assert!(output.contains("Rhythm Regularity"));
    }

    #[test]
    fn test_format_error_report() {
        let err = AnalysisError::UnsupportedFormat {
            extension: "txt".into(),
        };
        let report = FileReport::from_outcome("notes.txt", Err(err));
        assert!(!report.is_success());
        assert!(format_report(&report, false).contains("unsupported file format"));
    }

    #[test]
    fn test_format_json() {
        let reports = vec![
            FileReport::from_outcome("track.wav", Ok(sample_result())),
            FileReport::from_outcome("big.mp3", Err(AnalysisError::FileTooLarge { size: 10, limit: 5 })),
        ];
        let json = format_json(&reports).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["result"]["key"], "A");
        assert_eq!(items[0]["result"]["time_signature"], "4/4");
        assert!(items[0].get("error").is_none());
        assert!(items[1].get("result").is_none());
        assert!(items[1]["error"].as_str().unwrap().contains("too large"));
        assert!(items[1]["analyzed_at"].is_string());
    }

    #[test]
    fn test_summary_counts() {
        let reports = vec![
            FileReport::from_outcome("a.wav", Ok(sample_result())),
            FileReport::from_outcome("b.wav", Err(AnalysisError::DecodeFailure("bad".into()))),
        ];
        let summary = format_summary(&reports);
        assert!(summary.contains("2 files analyzed"));
        assert!(summary.contains("1 succeeded"));
        assert!(summary.contains("1 failed"));
    }
}

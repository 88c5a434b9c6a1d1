//! CLI argument parsing

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Report format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored human-readable summary per file
    Text,
    /// One JSON array holding every file's report
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "trackscope", version)]
#[command(about = "Derive tempo, key, energy, sections and spectral descriptors from audio files")]
pub struct Args {
    /// Audio files or directories to analyze
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// JSON configuration file (defaults to the per-user config if present)
    #[arg(short, long, env = "TRACKSCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of worker threads (defaults to one per core)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Also compute MFCCs (logged at debug level, not part of the report)
    #[arg(long)]
    pub mfcc: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["trackscope", "song.mp3"]).unwrap();
        assert_eq!(args.inputs, vec![PathBuf::from("song.mp3")]);
        assert_eq!(args.format, OutputFormat::Text);
        assert!(args.jobs.is_none());
        assert!(!args.mfcc);
        assert!(!args.verbose);
    }

    #[test]
    fn test_flags() {
        let args = Args::try_parse_from([
            "trackscope", "-f", "json", "-j", "4", "--mfcc", "-v", "a.wav", "music/",
        ])
        .unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.jobs, Some(4));
        assert!(args.mfcc);
        assert!(args.verbose);
        assert_eq!(args.inputs.len(), 2);
    }

    #[test]
    fn test_inputs_required() {
        assert!(Args::try_parse_from(["trackscope"]).is_err());
    }

    #[test]
    fn test_unknown_format_rejected() {
        assert!(Args::try_parse_from(["trackscope", "-f", "xml", "a.wav"]).is_err());
    }
}

// src/cli/mod.rs
//
// Command-line interface module

mod args;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colorful::Colorful;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::config::AnalysisConfig;
use crate::core::{AudioAnalyzer, SignalAnalysisProvider};

pub use args::{Args, OutputFormat};
pub use output::{format_json, format_report, format_summary, print_json, print_report, FileReport};

/// Expand inputs into a file list.
///
/// Files named directly are always kept so that unsupported ones are
/// reported; directories contribute only files with accepted extensions.
pub fn collect_audio_files(inputs: &[PathBuf], config: &AnalysisConfig) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .filter(|e| {
                    e.path()
                        .extension()
                        .and_then(|ext| ext.to_str())
                        .map(|ext| config.accepts_extension(ext))
                        .unwrap_or(false)
                })
                .map(|e| e.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    files
}

/// Analyze every file in parallel; reports keep the input order
pub fn analyze_batch<P: SignalAnalysisProvider>(
    analyzer: &AudioAnalyzer<P>,
    files: &[PathBuf],
    progress: ProgressBar,
) -> Vec<FileReport> {
    let reports = files
        .par_iter()
        .progress_with(progress.clone())
        .map(|path| {
            let outcome = analyzer.analyze_file(path);
            if let Err(e) = &outcome {
                log::warn!("{}: {}", path.display(), e);
            }
            FileReport::from_outcome(path.display().to_string(), outcome)
        })
        .collect();
    progress.finish_and_clear();
    reports
}

fn progress_bar(len: usize, hidden: bool) -> Result<ProgressBar> {
    if hidden {
        return Ok(ProgressBar::hidden());
    }
    let pb = ProgressBar::new(len as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("#>-"),
    );
    Ok(pb)
}

fn load_config(path: Option<&Path>, mfcc: bool) -> Result<AnalysisConfig> {
    let mut config = AnalysisConfig::load_or_default(path).context("Failed to load configuration")?;
    if mfcc {
        config.compute_mfcc = true;
    }
    Ok(config)
}

/// Run the CLI; returns `true` when every file was analyzed
pub fn run(args: &Args) -> Result<bool> {
    let config = load_config(args.config.as_deref(), args.mfcc)?;
    let files = collect_audio_files(&args.inputs, &config);

    if files.is_empty() {
        eprintln!("{}", "No audio files found!".red());
        return Ok(true);
    }
    if args.format == OutputFormat::Text {
        println!("Found {} audio file(s)\n", files.len());
    }

    let analyzer = AudioAnalyzer::builder().config(config).build()?;
    let progress = progress_bar(files.len(), args.no_progress)?;

    let reports = match args.jobs {
        Some(jobs) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build()
                .context("Failed to build thread pool")?;
            pool.install(|| analyze_batch(&analyzer, &files, progress))
        }
        None => analyze_batch(&analyzer, &files, progress),
    };

    match args.format {
        OutputFormat::Json => print_json(&reports)?,
        OutputFormat::Text => {
            for report in &reports {
                print_report(report, args.verbose);
            }
            if reports.len() > 1 {
                println!("{}", format_summary(&reports));
            }
        }
    }

    Ok(reports.iter().all(FileReport::is_success))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "trackscope_cli_{}_{}",
            tag,
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_collect_filters_directory_entries() {
        let dir = temp_dir("collect");
        for name in ["b.wav", "a.MP3", "notes.txt", "c.ogg"] {
            std::fs::write(dir.join(name), b"x").unwrap();
        }
        let files = collect_audio_files(&[dir.clone()], &AnalysisConfig::default());
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.MP3", "b.wav"]);
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_collect_keeps_explicit_files() {
        let inputs = vec![PathBuf::from("does-not-exist.txt")];
        let files = collect_audio_files(&inputs, &AnalysisConfig::default());
        assert_eq!(files, inputs);
    }

    #[test]
    fn test_batch_reports_in_input_order() {
        let analyzer = AudioAnalyzer::new();
        let files = vec![PathBuf::from("missing.wav"), PathBuf::from("readme.txt")];
        let reports = analyze_batch(&analyzer, &files, ProgressBar::hidden());
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].file, "missing.wav");
        assert_eq!(reports[1].file, "readme.txt");
        assert!(reports.iter().all(|r| !r.is_success()));
        assert!(reports[1].error.as_ref().unwrap().contains("unsupported"));
    }
}

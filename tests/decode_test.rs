// tests/decode_test.rs
//
// End-to-end tests through the default provider using synthesized WAV
// payloads, in memory and on disk.

use std::path::PathBuf;

use trackscope::core::decode_bytes;
use trackscope::testgen::{signal_wav, write_wav, TestSignal};
use trackscope::{AnalysisError, AudioAnalyzer};

const SR: u32 = 22050;

fn temp_wav_path() -> PathBuf {
    std::env::temp_dir().join(format!("trackscope_{}.wav", uuid::Uuid::new_v4()))
}

#[test]
fn test_decoded_duration_matches() {
    let bytes = signal_wav(TestSignal::sine(440.0), SR, 2.0).unwrap();
    let audio = decode_bytes(&bytes, Some("wav")).unwrap();
    assert_eq!(audio.sample_rate, SR);
    assert_eq!(audio.channels, 1);
    assert_eq!(audio.samples.len(), 2 * SR as usize);
    assert!((audio.to_waveform().duration() - 2.0).abs() < 1e-9);
}

#[test]
fn test_garbage_payload_is_decode_failure() {
    let analyzer = AudioAnalyzer::new();
    let err = analyzer
        .analyze_bytes("noise.mp3", &[0x13u8; 4096])
        .unwrap_err();
    assert!(matches!(err, AnalysisError::DecodeFailure(_)), "{:?}", err);
}

#[test]
fn test_click_track_tempo() {
    let analyzer = AudioAnalyzer::new();
    let bytes = signal_wav(TestSignal::click_track(120.0), SR, 12.0).unwrap();
    let result = analyzer.analyze_bytes("clicks.wav", &bytes).unwrap();

    assert!((result.duration - 12.0).abs() < 1e-6);
    assert!(
        (result.tempo - 120.0).abs() < 10.0,
        "tempo {:.2} far from 120",
        result.tempo
    );
    assert!(result.rhythm_features.beat_count >= 16);
    assert!(result.rhythm_features.onset_count >= 16);
    assert!(result.rhythm_features.rhythm_regularity < 0.1);
    assert!(result.energy > 0.0);
    assert!((0.0..=1.0).contains(&result.danceability));
    assert_eq!(result.sections.len(), 1);
}

#[test]
fn test_sine_key_and_centroid() {
    let analyzer = AudioAnalyzer::new();
    let bytes = signal_wav(TestSignal::sine(440.0), SR, 3.0).unwrap();
    let result = analyzer.analyze_bytes("a440.wav", &bytes).unwrap();

    assert_eq!(result.key, "A");
    let centroid = result.spectral_features.spectral_centroid_mean;
    assert!((centroid - 440.0).abs() < 150.0, "centroid {}", centroid);
    assert!(result.danceability > 0.5);
}

#[test]
fn test_silence_has_fallbacks() {
    let analyzer = AudioAnalyzer::new();
    let bytes = signal_wav(TestSignal::Silence, SR, 1.0).unwrap();
    let result = analyzer.analyze_bytes("quiet.wav", &bytes).unwrap();

    assert_eq!(result.energy, 0.0);
    assert_eq!(result.danceability, 0.0);
    assert_eq!(result.tempo, 0.0);
    assert_eq!(result.rhythm_features.beat_count, 0);
    assert_eq!(result.rhythm_features.rhythm_regularity, 0.0);
    assert!(result.spectral_features.spectral_centroid_mean.is_finite());
}

#[test]
fn test_analyze_file_round_trip() {
    let path = temp_wav_path();
    let samples = TestSignal::sine(220.0).render(SR, 1.5);
    write_wav(&path, &samples, SR).unwrap();

    let analyzer = AudioAnalyzer::new();
    let result = analyzer.analyze_file(&path);
    std::fs::remove_file(&path).ok();

    let result = result.unwrap();
    assert!((result.duration - 1.5).abs() < 1e-6);
    assert_eq!(result.key, "A");
}

#[test]
fn test_analyze_file_checks_size_before_reading() {
    let path = temp_wav_path();
    write_wav(&path, &TestSignal::Silence.render(SR, 1.0), SR).unwrap();

    let analyzer = AudioAnalyzer::builder().max_file_size(64).build().unwrap();
    let err = analyzer.analyze_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(matches!(err, AnalysisError::FileTooLarge { limit: 64, .. }));
}

#[test]
fn test_analyze_missing_file_is_io_error() {
    let analyzer = AudioAnalyzer::new();
    let err = analyzer.analyze_file(&temp_wav_path()).unwrap_err();
    assert!(matches!(err, AnalysisError::Io(_)));
}

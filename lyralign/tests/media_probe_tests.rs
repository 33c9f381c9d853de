//! Media Probe Tests
//!
//! Generates small WAV fixtures and checks duration measurement against
//! their known length.
//!
//! **Test Coverage:**
//! - Duration of a generated mono WAV file
//! - Missing files and non-audio content surface as errors

use std::path::PathBuf;

use tempfile::TempDir;

use lyralign::services::MediaProbe;

/// Write a mono 16-bit WAV of `seconds` length at 44.1 kHz.
fn sine_wav(dir: &TempDir, name: &str, seconds: f64) -> PathBuf {
    let path = dir.path().join(name);
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: 44_100,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(&path, spec).unwrap();
    let total = (44_100.0 * seconds) as usize;
    for k in 0..total {
        let sample = ((k as f32 * 0.05).sin() * 8000.0) as i16;
        writer.write_sample(sample).unwrap();
    }
    writer.finalize().unwrap();
    path
}

#[test]
fn test_wav_duration_is_measured() {
    let dir = TempDir::new().unwrap();
    let path = sine_wav(&dir, "one_second.wav", 1.0);

    let duration = MediaProbe::new().duration_seconds(&path).unwrap();
    assert!(
        (duration - 1.0).abs() < 0.05,
        "expected about 1.0s, got {}",
        duration
    );
}

#[test]
fn test_longer_wav_duration() {
    let dir = TempDir::new().unwrap();
    let path = sine_wav(&dir, "three_seconds.wav", 3.0);

    let duration = MediaProbe::new().duration_seconds(&path).unwrap();
    assert!(
        (duration - 3.0).abs() < 0.05,
        "expected about 3.0s, got {}",
        duration
    );
}

#[test]
fn test_missing_file_is_error() {
    let result = MediaProbe::new().duration_seconds(std::path::Path::new("/nonexistent/file.mp3"));
    assert!(result.is_err());
}

#[test]
fn test_unreadable_content_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fake.mp3");
    std::fs::write(&path, b"this is not audio data at all").unwrap();

    let result = MediaProbe::new().duration_seconds(&path);
    assert!(result.is_err());
}

//! Audio feed for the recognition engine
//!
//! Decodes any container symphonia understands to mono f32 PCM and resamples
//! to the 16 kHz feed the whisper engine expects.
//!
//! Decode algorithm:
//! 1. Open file and probe format
//! 2. Find default audio track
//! 3. Create decoder for track codec
//! 4. Decode all packets to PCM samples
//! 5. Mix multi-channel audio to mono (average channels)
//! 6. Resample when the source rate differs from the target

use std::path::Path;

use rubato::{
    Resampler, SincFixedIn, SincInterpolationParameters, SincInterpolationType, WindowFunction,
};
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::conv::FromSample;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use tracing::debug;

use super::TranscribeError;

/// Sample rate the recognition engine expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Decode an audio file to mono f32 samples at [`TARGET_SAMPLE_RATE`].
pub fn decode_for_recognition(path: &Path) -> Result<Vec<f32>, TranscribeError> {
    let (samples, sample_rate) = decode_mono(path)?;
    if sample_rate == TARGET_SAMPLE_RATE {
        return Ok(samples);
    }
    resample(samples, sample_rate)
}

/// Decode the whole file to mono f32 at its native sample rate.
fn decode_mono(path: &Path) -> Result<(Vec<f32>, u32), TranscribeError> {
    let file = std::fs::File::open(path)
        .map_err(|e| TranscribeError::Audio(format!("failed to open {}: {}", path.display(), e)))?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| {
            TranscribeError::Audio(format!("failed to probe {}: {}", path.display(), e))
        })?;

    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| TranscribeError::Audio("no audio track found".to_string()))?;

    let track_id = track.id;
    let sample_rate = track
        .codec_params
        .sample_rate
        .ok_or_else(|| TranscribeError::Audio("sample rate unknown".to_string()))?;

    let mut decoder = symphonia::default::get_codecs()
        .make(&track.codec_params, &DecoderOptions::default())
        .map_err(|e| TranscribeError::Audio(format!("failed to create decoder: {}", e)))?;

    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(symphonia::core::errors::Error::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                // End of stream
                break;
            }
            Err(e) => {
                return Err(TranscribeError::Audio(format!("error reading packet: {}", e)));
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder
            .decode(&packet)
            .map_err(|e| TranscribeError::Audio(format!("failed to decode packet: {}", e)))?;
        append_mono(&decoded, &mut samples);
    }

    debug!(
        file = %path.display(),
        samples = samples.len(),
        sample_rate = sample_rate,
        "decoded audio"
    );
    Ok((samples, sample_rate))
}

/// Mix one decoded buffer down to mono and append it to `out`.
fn append_mono(decoded: &AudioBufferRef, out: &mut Vec<f32>) {
    match decoded {
        AudioBufferRef::U8(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::U16(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::U24(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::U32(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S8(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S16(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S24(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::S32(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::F32(buf) => mix_channels(buf.as_ref(), out),
        AudioBufferRef::F64(buf) => mix_channels(buf.as_ref(), out),
    }
}

fn mix_channels<S>(buf: &AudioBuffer<S>, out: &mut Vec<f32>)
where
    S: Sample,
    f32: FromSample<S>,
{
    let channels = buf.spec().channels.count();
    let frames = buf.frames();
    out.reserve(frames);
    for frame in 0..frames {
        let mut sum = 0.0f32;
        for ch in 0..channels {
            sum += f32::from_sample(buf.chan(ch)[frame]);
        }
        out.push(sum / channels as f32);
    }
}

/// Resample mono samples to [`TARGET_SAMPLE_RATE`] using sinc interpolation.
fn resample(samples: Vec<f32>, source_rate: u32) -> Result<Vec<f32>, TranscribeError> {
    if samples.is_empty() {
        return Ok(samples);
    }

    let params = SincInterpolationParameters {
        sinc_len: 256,
        f_cutoff: 0.95,
        interpolation: SincInterpolationType::Linear,
        oversampling_factor: 256,
        window: WindowFunction::BlackmanHarris2,
    };

    let ratio = TARGET_SAMPLE_RATE as f64 / source_rate as f64;
    let num_frames = samples.len();

    // Chunk size = input length for single-pass processing.
    let mut resampler = SincFixedIn::<f32>::new(ratio, 2.0, params, num_frames, 1)
        .map_err(|e| TranscribeError::Audio(format!("failed to create resampler: {}", e)))?;

    let output = resampler
        .process(&[samples], None)
        .map_err(|e| TranscribeError::Audio(format!("resampling failed: {}", e)))?;

    let resampled = output.into_iter().next().unwrap_or_default();
    debug!(
        source_rate = source_rate,
        frames_in = num_frames,
        frames_out = resampled.len(),
        "resampled audio"
    );
    Ok(resampled)
}

// ============================================================================
// Tests
// ============================================================================

//! WAV fast path.
//!
//! A WAV file that is already mono 16 kHz i16 PCM needs no probe/decode/resample
//! pipeline; we read and normalize it directly with `hound`. Anything else
//! (stereo, other rates, float PCM) returns `None` and falls through to the
//! Symphonia path.

use std::path::Path;

use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader};

use super::AudioBuffer;
use super::pcm::TARGET_SAMPLE_RATE;

/// Read a WAV file if (and only if) it is already in the target format.
///
/// Returns:
/// - `Ok(Some(_))` for conforming mono 16 kHz i16 WAV
/// - `Ok(None)` for WAV in any other layout, or non-WAV extensions
/// - `Err(_)` when the file looks like WAV but cannot be read
pub fn read_native_wav(path: &Path) -> Result<Option<AudioBuffer>> {
    let is_wav = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("wav"));
    if !is_wav {
        return Ok(None);
    }

    let mut reader = WavReader::open(path)
        .with_context(|| format!("failed to read WAV file '{}'", path.display()))?;
    let spec = reader.spec();

    let conforming = spec.channels == 1
        && spec.sample_rate == TARGET_SAMPLE_RATE
        && spec.bits_per_sample == 16
        && spec.sample_format == SampleFormat::Int;
    if !conforming {
        return Ok(None);
    }

    // Normalize i16 PCM to f32 in [-1.0, 1.0].
    let mut samples = Vec::with_capacity(reader.len() as usize);
    for sample in reader.samples::<i16>() {
        let pcm = sample.context("failed to read WAV sample")?;
        samples.push(pcm as f32 / i16::MAX as f32);
    }

    Ok(Some(AudioBuffer {
        samples,
        sample_rate: TARGET_SAMPLE_RATE,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::{WavSpec, WavWriter};

    fn write_wav(path: &Path, spec: WavSpec, samples: &[i16]) -> anyhow::Result<()> {
        let mut writer = WavWriter::create(path, spec)?;
        for &s in samples {
            writer.write_sample(s)?;
        }
        writer.finalize()?;
        Ok(())
    }

    fn mono_16k_spec() -> WavSpec {
        WavSpec {
            channels: 1,
            sample_rate: TARGET_SAMPLE_RATE,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        }
    }

    #[test]
    fn reads_conforming_wav_and_normalizes() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("tone.wav");
        write_wav(&path, mono_16k_spec(), &[0, i16::MAX, i16::MIN + 1])?;

        let buffer = read_native_wav(&path)?.expect("conforming WAV should load");
        assert_eq!(buffer.sample_rate, TARGET_SAMPLE_RATE);
        assert_eq!(buffer.samples.len(), 3);
        assert_eq!(buffer.samples[0], 0.0);
        assert!((buffer.samples[1] - 1.0).abs() < 1e-6);
        assert!((buffer.samples[2] + 1.0).abs() < 1e-6);
        Ok(())
    }

    #[test]
    fn non_wav_extension_is_skipped() -> anyhow::Result<()> {
        assert!(read_native_wav(Path::new("audio.mp3"))?.is_none());
        Ok(())
    }

    #[test]
    fn stereo_wav_falls_through() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("stereo.wav");
        let spec = WavSpec {
            channels: 2,
            ..mono_16k_spec()
        };
        write_wav(&path, spec, &[0, 0, 100, 100])?;

        assert!(read_native_wav(&path)?.is_none());
        Ok(())
    }

    #[test]
    fn wrong_rate_wav_falls_through() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("cd.wav");
        let spec = WavSpec {
            sample_rate: 44_100,
            ..mono_16k_spec()
        };
        write_wav(&path, spec, &[1, 2, 3])?;

        assert!(read_native_wav(&path)?.is_none());
        Ok(())
    }

    #[test]
    fn truncated_wav_errors() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("broken.wav");
        std::fs::write(&path, b"RIFF")?;

        assert!(read_native_wav(&path).is_err());
        Ok(())
    }
}

//! PCM normalization: interleave, downmix, resample.
//!
//! The loader collects decoded PCM at the source rate and hands it to
//! `resample_to_target` once the whole file has been read. This is a
//! whole-file loader, so we resample in one pass instead of maintaining a
//! streaming resampler.

use anyhow::{Context, Result, anyhow, bail};
use rubato::{Resampler, SincFixedIn, WindowFunction};
use symphonia::core::audio::{AudioBufferRef, SampleBuffer};

/// Quill's target mono sample rate (Hz), the rate whisper.cpp expects.
pub const TARGET_SAMPLE_RATE: u32 = 16_000;

/// Source frames fed to rubato per `process()` call.
const RESAMPLE_BLOCK_FRAMES: usize = 2048;

/// Copy a decoded Symphonia buffer into interleaved `f32` samples.
///
/// Returns the samples together with the source sample rate and channel count.
/// The scratch `SampleBuffer` is created on first use and reused afterwards.
pub fn decoded_to_interleaved_f32(
    decoded: &AudioBufferRef<'_>,
    sample_buf: &mut Option<SampleBuffer<f32>>,
) -> Result<(Vec<f32>, u32, usize)> {
    if sample_buf.is_none() {
        let spec = *decoded.spec();
        let duration = decoded.capacity() as u64;
        *sample_buf = Some(SampleBuffer::<f32>::new(duration, spec));
    }

    let buf = sample_buf
        .as_mut()
        .ok_or_else(|| anyhow!("sample buffer not initialized"))?;

    buf.copy_interleaved_ref(decoded.clone());

    let src_rate = decoded.spec().rate;
    let channels = decoded.spec().channels.count();
    if channels == 0 {
        bail!("decoded audio had zero channels");
    }

    Ok((buf.samples().to_vec(), src_rate, channels))
}

/// Downmix interleaved samples into mono by averaging channels.
///
/// Policy: equal-weight average across channels (simple, predictable).
pub fn downmix_to_mono(interleaved: &[f32], channels: usize) -> Vec<f32> {
    if channels == 1 {
        return interleaved.to_vec();
    }

    let frames = interleaved.len() / channels;
    let mut mono = Vec::with_capacity(frames);

    for f in 0..frames {
        let base = f * channels;
        let mut acc = 0.0;
        for c in 0..channels {
            acc += interleaved[base + c];
        }
        mono.push(acc / channels as f32);
    }

    mono
}

/// Resample a mono buffer from `src_rate` to [`TARGET_SAMPLE_RATE`].
///
/// Already-conforming input is returned unchanged. rubato expects exact block
/// sizes, so the final partial block is zero-padded before processing.
pub fn resample_to_target(mut mono_src: Vec<f32>, src_rate: u32) -> Result<Vec<f32>> {
    if src_rate == TARGET_SAMPLE_RATE {
        return Ok(mono_src);
    }
    if mono_src.is_empty() {
        return Ok(mono_src);
    }

    let ratio = TARGET_SAMPLE_RATE as f64 / src_rate as f64;

    let mut resampler = SincFixedIn::<f32>::new(
        ratio,
        2.0,
        rubato::SincInterpolationParameters {
            sinc_len: 256,
            f_cutoff: 0.95,
            interpolation: rubato::SincInterpolationType::Linear,
            oversampling_factor: 256,
            window: WindowFunction::BlackmanHarris2,
        },
        RESAMPLE_BLOCK_FRAMES,
        1, // mono
    )
    .map_err(|e| anyhow!(e))
    .context("failed to init resampler")?;

    let in_max = resampler.input_frames_max();

    // Pad to a whole number of input blocks.
    let rem = mono_src.len() % in_max;
    if rem != 0 {
        mono_src.resize(mono_src.len() + (in_max - rem), 0.0);
    }

    let mut out = Vec::with_capacity((mono_src.len() as f64 * ratio) as usize + in_max);

    for block in mono_src.chunks(in_max) {
        let input = vec![block.to_vec()];
        let mut resampled = resampler
            .process(&input, None)
            .map_err(|e| anyhow!(e))
            .context("resampler process failed")?;

        if resampled.len() != 1 {
            bail!("expected mono output from resampler");
        }

        out.append(&mut resampled[0]);
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downmix_to_mono_single_channel_is_identity() {
        let input = vec![0.0, 1.0, -1.0];
        let mono = downmix_to_mono(&input, 1);
        assert_eq!(mono, input);
    }

    #[test]
    fn downmix_to_mono_averages_channels() {
        // Two frames of stereo: (L=1, R=3), (L=-1, R=1) => mono: 2, 0
        let interleaved = vec![1.0, 3.0, -1.0, 1.0];
        let mono = downmix_to_mono(&interleaved, 2);
        assert_eq!(mono, vec![2.0, 0.0]);
    }

    #[test]
    fn resample_is_identity_at_target_rate() -> anyhow::Result<()> {
        let input = vec![0.25; 1000];
        let out = resample_to_target(input.clone(), TARGET_SAMPLE_RATE)?;
        assert_eq!(out, input);
        Ok(())
    }

    #[test]
    fn resample_empty_input_stays_empty() -> anyhow::Result<()> {
        let out = resample_to_target(Vec::new(), 48_000)?;
        assert!(out.is_empty());
        Ok(())
    }

    #[test]
    fn resample_halves_sample_count_for_double_rate() -> anyhow::Result<()> {
        // 32 kHz -> 16 kHz should produce roughly half as many samples.
        // The final block is zero-padded, so allow up to one block of slack.
        let input = vec![0.1; 32_000];
        let out = resample_to_target(input, 32_000)?;

        let expected = 16_000usize;
        let slack = RESAMPLE_BLOCK_FRAMES;
        assert!(
            out.len() >= expected && out.len() <= expected + slack,
            "unexpected output length: {}",
            out.len()
        );
        Ok(())
    }
}

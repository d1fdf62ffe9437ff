//! Audio loading for Quill.
//!
//! `load_audio` turns a file on disk into the one format the transcriber
//! accepts: mono `f32` samples at [`TARGET_SAMPLE_RATE`].
//!
//! Two paths:
//! - WAV files already in mono 16 kHz i16 PCM are read directly with `hound`
//! - everything else is probed and decoded with Symphonia, downmixed to mono,
//!   and resampled with rubato when the source rate differs
//!
//! The loader validates the path up front so a missing or unreadable input
//! fails here, before any model work happens.

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result, bail};

mod decode;
mod demux;
mod pcm;
mod wav;

pub use pcm::TARGET_SAMPLE_RATE;

/// Decoded audio ready for transcription: always mono at [`TARGET_SAMPLE_RATE`].
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Duration of the buffer in seconds.
    pub fn duration_seconds(&self) -> f32 {
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Load an audio file from disk into a mono 16 kHz sample buffer.
///
/// Fails if the file is missing, unreadable, contains no decodable audio
/// track, or decodes to zero channels.
pub fn load_audio(path: impl AsRef<Path>) -> Result<AudioBuffer> {
    let path = path.as_ref();

    if !path.exists() {
        bail!("audio file not found: '{}'", path.display());
    }
    if !path.is_file() {
        bail!("audio path is not a file: '{}'", path.display());
    }

    // Fast path: a WAV already in the target format needs no decode pipeline.
    if let Some(buffer) = wav::read_native_wav(path)? {
        return Ok(buffer);
    }

    decode_file(path)
}

/// Decode any Symphonia-supported container into a mono buffer at the source
/// rate, then resample to the target rate if needed.
fn decode_file(path: &Path) -> Result<AudioBuffer> {
    let file = File::open(path)
        .with_context(|| format!("failed to open audio file '{}'", path.display()))?;

    // The file extension improves probe accuracy for ambiguous containers.
    let hint_extension = path.extension().and_then(|e| e.to_str());

    let (mut format, track) = demux::probe_file_and_pick_track(file, hint_extension)?;
    let mut decoder = decode::make_decoder_for_track(&track)?;

    let mut mono_src = Vec::<f32>::new();
    let mut src_rate: Option<u32> = None;
    let mut sample_buf = None;

    loop {
        let Some(packet) = demux::next_packet(format.as_mut())? else {
            break;
        };

        // Ignore packets from non-audio tracks.
        if packet.track_id() != track.id {
            continue;
        }

        // Skipped frames and mid-packet EOF come back as `None`; keep going.
        let Some(decoded) = decode::decode_packet(decoder.as_mut(), &packet)? else {
            continue;
        };

        let (interleaved, rate, channels) =
            pcm::decoded_to_interleaved_f32(&decoded, &mut sample_buf)?;

        match src_rate {
            None => src_rate = Some(rate),
            Some(r) if r != rate => {
                bail!("sample rate changed mid-stream ({r} Hz -> {rate} Hz)")
            }
            Some(_) => {}
        }

        mono_src.extend(pcm::downmix_to_mono(&interleaved, channels));
    }

    let Some(src_rate) = src_rate else {
        bail!(
            "no audio could be decoded from '{}' (empty or unsupported stream)",
            path.display()
        );
    };

    let samples = pcm::resample_to_target(mono_src, src_rate)?;

    Ok(AudioBuffer {
        samples,
        sample_rate: TARGET_SAMPLE_RATE,
    })
}

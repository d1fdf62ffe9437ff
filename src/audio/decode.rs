//! Codec-level helpers built on top of Symphonia.
//!
//! The loader walks every packet of one file exactly once, so the decode
//! surface here is a plain "give me the PCM for this packet, or tell me to
//! move on" call rather than a streaming callback.

use anyhow::{Context, Result, anyhow};
use symphonia::core::audio::AudioBufferRef;
use symphonia::core::codecs::{Decoder, DecoderOptions};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::{Packet, Track};

/// Create a decoder for the given audio track.
///
/// Fails if the codec is unsupported or its parameters are invalid.
pub fn make_decoder_for_track(track: &Track) -> Result<Box<dyn Decoder>> {
    let decoder_opts: DecoderOptions = Default::default();

    symphonia::default::get_codecs()
        .make(&track.codec_params, &decoder_opts)
        .map_err(|e| anyhow!(e))
        .context("failed to create decoder for audio track")
}

/// Decode one packet into a PCM buffer.
///
/// `Ok(None)` means the packet produced no audio and the caller should
/// continue with the next one:
/// - `DecodeError` → corrupted frame, skip it (common with some codecs)
/// - `IoError`     → the stream ended mid-packet
///
/// Anything else is a fatal decoder error. The returned buffer borrows from
/// the decoder and must be consumed before the next call.
pub fn decode_packet<'a>(
    decoder: &'a mut dyn Decoder,
    packet: &Packet,
) -> Result<Option<AudioBufferRef<'a>>> {
    match decoder.decode(packet) {
        Ok(buf) => Ok(Some(buf)),
        Err(SymphoniaError::DecodeError(_)) => Ok(None),
        Err(SymphoniaError::IoError(_)) => Ok(None),
        Err(e) => Err(anyhow!(e)).context("decoder failure"),
    }
}

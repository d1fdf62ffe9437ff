//! High-level API for running the transcription pipeline.
//!
//! We expose a single, ergonomic entry point (`Quill`) that wraps the
//! audio-loading, transcription, and writing stages.
//!
//! The intent is:
//! - We load the Whisper model once (expensive).
//! - We reuse the context to transcribe multiple files.
//! - Callers choose language/translation behavior via `Opts` and the output
//!   destination via `Output`.
//!
//! Each run is strictly sequential: load → transcribe → write. The stages own
//! their data exclusively; nothing is shared or reused between runs.

use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;
use whisper_rs::WhisperContext;

use crate::audio::load_audio;
use crate::model::load_model;
use crate::opts::Opts;
use crate::transcribe::transcribe;
use crate::transcript::Transcript;
use crate::writer::{write_json, write_json_to_path};

/// Where the serialized transcript goes.
#[derive(Debug, Clone)]
pub enum Output {
    /// Print the JSON to standard output.
    Stdout,
    /// Write the JSON to a file (created or overwritten).
    File(PathBuf),
}

/// The main high-level transcription entry point.
///
/// `Quill` owns the loaded Whisper model. Typical usage:
/// - Construct once (model loading happens here).
/// - Call `transcribe_file` or `run` for each input.
pub struct Quill {
    ctx: WhisperContext,
}

impl Quill {
    /// Load a Whisper model from disk.
    ///
    /// We fail fast on a missing or invalid model path so that once `new`
    /// succeeds, every later failure is about the input audio.
    pub fn new(model_path: impl AsRef<str>, use_gpu: bool) -> Result<Self> {
        let ctx = load_model(model_path.as_ref(), use_gpu)?;
        Ok(Self { ctx })
    }

    /// Access the underlying Whisper context.
    ///
    /// This is primarily intended for advanced or experimental use-cases.
    pub fn context(&self) -> &WhisperContext {
        &self.ctx
    }

    /// Run the load → transcribe stages for one audio file.
    pub fn transcribe_file(&self, audio_path: impl AsRef<Path>, opts: &Opts) -> Result<Transcript> {
        let audio_path = audio_path.as_ref();

        let audio = load_audio(audio_path)
            .with_context(|| format!("failed to load audio from '{}'", audio_path.display()))?;
        debug!(
            path = %audio_path.display(),
            seconds = audio.duration_seconds(),
            "audio loaded"
        );

        let transcript = transcribe(&self.ctx, &audio, opts)?;
        debug!(segments = transcript.segments.len(), "transcription done");

        Ok(transcript)
    }

    /// Run the full pipeline for one audio file and write the JSON result.
    pub fn run(&self, audio_path: impl AsRef<Path>, opts: &Opts, output: &Output) -> Result<()> {
        let transcript = self.transcribe_file(audio_path, opts)?;

        match output {
            Output::Stdout => {
                let stdout = io::stdout();
                let writer = BufWriter::new(stdout.lock());
                write_json(writer, &transcript)?;
            }
            Output::File(path) => {
                write_json_to_path(path, &transcript)
                    .map_err(anyhow::Error::from)
                    .with_context(|| {
                        format!("failed to write transcript to '{}'", path.display())
                    })?;
            }
        }

        Ok(())
    }
}

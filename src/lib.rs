//! `quill` — a small transcription pipeline built on top of Whisper.
//!
//! One invocation runs one linear pipeline:
//! - Load an audio file into a mono 16 kHz sample buffer
//! - Run a pretrained Whisper model over it (with an optional language hint)
//! - Serialize the resulting transcript as indented JSON, to stdout or a file
//!
//! The crate is designed so the pipeline stages stay independently testable:
//! the audio loader knows nothing about Whisper, the transcriber knows
//! nothing about files, and the writer only sees the finished transcript.

// High-level API (most consumers should start here).
pub mod opts;
pub mod pipeline;

// Audio loading and normalization.
pub mod audio;

// Model loading and transcription.
pub mod model;
pub mod transcribe;

// Transcript data model and JSON output.
pub mod transcript;
pub mod writer;

// Logging configuration and control.
pub mod logging;

mod error;

pub use error::{Error, Result};
pub use pipeline::{Output, Quill};
pub use transcript::{Segment, Transcript, Word};

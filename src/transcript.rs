use serde::{Deserialize, Serialize};

/// The placeholder language code used when no hint was given.
///
/// Prefers `"und"` (“undetermined”) over an empty string because it’s a common
/// convention in language tagging systems and makes the meaning obvious.
pub const UNDETERMINED_LANGUAGE: &str = "und";

/// The structured result of one transcription run.
///
/// A `Transcript` is produced once by the transcriber and never mutated
/// afterwards; the writer serializes it as-is.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Transcript {
    /// Concatenation of all segment texts, in order.
    pub text: String,

    /// The language hint the transcription ran with, or
    /// [`UNDETERMINED_LANGUAGE`] when auto-detection was requested.
    pub language: String,

    /// Timed segments in playback order.
    pub segments: Vec<Segment>,
}

/// A contiguous span of recognized speech.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Segment {
    /// Zero-based ordinal of this segment within the transcript.
    pub id: usize,
    /// Start time in seconds.
    pub start: f32,
    /// End time in seconds.
    pub end: f32,
    /// Recognized text for this span.
    pub text: String,
    /// Word-level timing within this segment.
    pub words: Vec<Word>,
}

/// A single recognized word with its own timing.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Word {
    /// Word text, including any leading whitespace whisper attaches.
    pub text: String,
    /// Start time in seconds.
    pub start: f32,
    /// End time in seconds.
    pub end: f32,
    /// Probability assigned by the model.
    pub confidence: f32,
}

impl Transcript {
    /// Assemble a transcript from finished segments.
    ///
    /// The full `text` field is derived here so the two can never disagree.
    pub fn from_segments(language: String, segments: Vec<Segment>) -> Self {
        let text = segments.iter().map(|s| s.text.as_str()).collect();
        Self {
            text,
            language,
            segments,
        }
    }
}

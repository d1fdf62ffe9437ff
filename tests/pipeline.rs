//! End-to-end pipeline tests.
//!
//! These require model weights and an audio fixture on disk, so they are
//! ignored by default. Run with:
//!
//! ```sh
//! cargo test --test pipeline -- --ignored
//! ```

use quill::opts::Opts;
use quill::{Quill, Transcript, writer};

const MODEL_PATH: &str = "./models/ggml-large-v3-turbo.bin";
const FIXTURE_PATH: &str = "tests/fixtures/treat_yo_self.wav";

#[test]
#[ignore = "requires model weights on disk"]
fn transcribes_fixture_to_json() -> anyhow::Result<()> {
    let quill = Quill::new(MODEL_PATH, false)?;

    let opts = Opts {
        language: Some("en".to_string()),
        translate: false,
        threads: None,
    };

    let transcript = quill.transcribe_file(FIXTURE_PATH, &opts)?;
    assert!(transcript.text.contains("Treat. Yo. Self."));
    assert_eq!(transcript.language, "en");
    assert!(!transcript.segments.is_empty());

    let mut out = Vec::new();
    writer::write_json(&mut out, &transcript)?;
    let parsed: Transcript = serde_json::from_slice(&out)?;
    assert_eq!(parsed, transcript);
    Ok(())
}

#[test]
#[ignore = "requires model weights on disk"]
fn repeated_runs_yield_identical_text() -> anyhow::Result<()> {
    let quill = Quill::new(MODEL_PATH, false)?;
    let opts = Opts::default();

    let first = quill.transcribe_file(FIXTURE_PATH, &opts)?;
    let second = quill.transcribe_file(FIXTURE_PATH, &opts)?;
    assert_eq!(first.text, second.text);
    Ok(())
}

#[test]
fn missing_audio_fails_without_touching_the_model() {
    // `transcribe_file` loads audio before any model work; a bad path must
    // fail regardless of whether model weights are present.
    // Model construction itself is what requires the weights, so this test
    // checks the loader ordering through the audio module directly.
    let err = quill::audio::load_audio("tests/fixtures/nope.mp3").unwrap_err();
    assert!(err.to_string().contains("not found"));
}

//! Transcription: one full Whisper pass over a loaded audio buffer.
//!
//! The transcriber converts whisper.cpp's segment/token output into the crate
//! data model. Word-level timing comes from token timestamps; segment bounds
//! prefer token-derived timing to avoid long segments that include
//! leading/trailing silence, falling back to whisper's segment-level
//! timestamps when token timing is unavailable.

use anyhow::{Context, Result, bail};
use whisper_rs::{FullParams, SamplingStrategy, WhisperContext, WhisperSegment, WhisperState};

use crate::audio::{AudioBuffer, TARGET_SAMPLE_RATE};
use crate::opts::Opts;
use crate::transcript::{Segment, Transcript, UNDETERMINED_LANGUAGE, Word};

/// Run a single transcription pass and assemble the transcript.
///
/// The buffer must be mono at [`TARGET_SAMPLE_RATE`] and non-empty; the audio
/// loader guarantees the former, and we reject violations here rather than
/// hand whisper.cpp garbage.
pub fn transcribe(ctx: &WhisperContext, audio: &AudioBuffer, opts: &Opts) -> Result<Transcript> {
    if audio.is_empty() {
        bail!("audio buffer is empty; nothing to transcribe");
    }
    if audio.sample_rate != TARGET_SAMPLE_RATE {
        bail!(
            "audio buffer must be {} Hz, got {} Hz",
            TARGET_SAMPLE_RATE,
            audio.sample_rate
        );
    }

    let state = run_whisper_full(ctx, opts, &audio.samples)?;

    let mut segments: Vec<Segment> = Vec::new();
    for whisper_segment in state.as_iter() {
        let segment = to_segment(segments.len(), whisper_segment)?;
        segments.push(segment);
    }

    let language = opts
        .language
        .clone()
        .unwrap_or_else(|| UNDETERMINED_LANGUAGE.to_owned());

    Ok(Transcript::from_segments(language, segments))
}

fn to_segment(id: usize, segment: WhisperSegment) -> Result<Segment> {
    let text = segment
        .to_str()
        .context("failed to get segment text")?
        .to_owned();

    let words = words_from_segment(&segment)?;
    let (start, end) = segment_seconds_from_words_or_fallback(&segment, &words);

    Ok(Segment {
        id,
        start,
        end,
        text,
        words,
    })
}

fn words_from_segment(segment: &WhisperSegment) -> Result<Vec<Word>> {
    let token_count = segment.n_tokens();
    let token_count_usize = usize::try_from(token_count)
        .with_context(|| format!("segment reported negative token count: {token_count}"))?;
    let mut words = Vec::with_capacity(token_count_usize);

    for token_idx in 0..token_count_usize {
        let token = segment
            .get_token(token_idx as i32)
            .context("failed to get token from segment")?;

        let data = token.token_data();
        let text = token
            .to_str()
            .with_context(|| format!("failed to get token text at index {token_idx}"))?
            .to_owned();

        // Whisper special/control tokens (formatted like `[_BEG_]`, `[_TT_50]`)
        // are timing markers, not speech.
        if is_special_token(&text) {
            continue;
        }

        words.push(Word {
            text,
            // whisper uses -1 for unknown; clamp to 0 so consumers don't see -0.01s
            start: centiseconds_to_seconds(data.t0),
            end: centiseconds_to_seconds(data.t1),
            confidence: data.p,
        });
    }

    Ok(words)
}

fn is_special_token(text: &str) -> bool {
    text.starts_with("[_") && text.ends_with("_]")
}

fn segment_seconds_from_words_or_fallback(
    segment: &WhisperSegment,
    words: &[Word],
) -> (f32, f32) {
    match word_timing_bounds(words) {
        Some(bounds) => bounds,
        None => (
            centiseconds_to_seconds(segment.start_timestamp()),
            centiseconds_to_seconds(segment.end_timestamp()),
        ),
    }
}

/// Span covered by the words with known timing, or `None` when no word carries
/// a usable timestamp (or the span is inverted).
fn word_timing_bounds(words: &[Word]) -> Option<(f32, f32)> {
    let mut min_start: Option<f32> = None;
    let mut max_end: Option<f32> = None;

    for word in words {
        // Skip words with unknown timestamps (whisper uses -1, clamped to 0.0).
        if word.start <= 0.0 && word.end <= 0.0 {
            continue;
        }

        min_start = Some(min_start.map_or(word.start, |v| v.min(word.start)));
        max_end = Some(max_end.map_or(word.end, |v| v.max(word.end)));
    }

    match (min_start, max_end) {
        (Some(s), Some(e)) if e >= s => Some((s, e)),
        _ => None,
    }
}

fn centiseconds_to_seconds(value: i64) -> f32 {
    if value < 0 { 0.0 } else { value as f32 / 100.0 }
}

fn build_full_params(opts: &Opts) -> FullParams<'_, '_> {
    let mut params = FullParams::new(SamplingStrategy::BeamSearch {
        beam_size: 5,
        patience: 1.0,
    });

    params.set_n_threads(effective_threads(opts));
    params.set_translate(opts.translate);
    params.set_language(opts.language.as_deref());
    params.set_no_context(true);
    params.set_single_segment(false);

    params.set_print_progress(false);
    params.set_print_special(false);
    params.set_print_realtime(false);
    params.set_print_timestamps(false);

    params.set_token_timestamps(true);

    params
}

/// Inference thread count handed to whisper.cpp.
///
/// Defaults to the logical CPU count; a configured value of 0 is clamped to 1
/// since whisper.cpp cannot run with zero threads.
fn effective_threads(opts: &Opts) -> i32 {
    opts.threads.unwrap_or_else(num_cpus::get).max(1) as i32
}

fn run_whisper_full(ctx: &WhisperContext, opts: &Opts, samples: &[f32]) -> Result<WhisperState> {
    let params = build_full_params(opts);

    let mut state = ctx
        .create_state()
        .context("failed to create whisper state")?;

    state
        .full(params, samples)
        .context("failed to run whisper full()")?;

    Ok(state)
}

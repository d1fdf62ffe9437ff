use quill::{Segment, Transcript, Word, writer};

fn arabic_transcript() -> Transcript {
    Transcript::from_segments(
        "ar".to_string(),
        vec![
            Segment {
                id: 0,
                start: 0.0,
                end: 3.2,
                text: " بسم الله الرحمن الرحيم".to_string(),
                words: vec![
                    Word {
                        text: " بسم".to_string(),
                        start: 0.0,
                        end: 0.7,
                        confidence: 0.98,
                    },
                    Word {
                        text: " الله".to_string(),
                        start: 0.7,
                        end: 1.3,
                        confidence: 0.99,
                    },
                ],
            },
            Segment {
                id: 1,
                start: 3.2,
                end: 5.0,
                text: " الحمد لله رب العالمين".to_string(),
                words: Vec::new(),
            },
        ],
    )
}

#[test]
fn file_output_round_trips_through_json() -> anyhow::Result<()> {
    let transcript = arabic_transcript();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("transcript.json");
    writer::write_json_to_path(&path, &transcript)?;

    let contents = std::fs::read_to_string(&path)?;
    let parsed: Transcript = serde_json::from_str(&contents)?;
    assert_eq!(parsed, transcript);
    Ok(())
}

#[test]
fn file_output_preserves_arabic_text_literally() -> anyhow::Result<()> {
    let transcript = arabic_transcript();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("transcript.json");
    writer::write_json_to_path(&path, &transcript)?;

    let contents = std::fs::read_to_string(&path)?;
    assert!(contents.contains("بسم الله الرحمن الرحيم"));
    assert!(contents.contains("الحمد لله رب العالمين"));
    assert!(!contents.contains("\\u"));
    Ok(())
}

#[test]
fn output_is_indented_with_two_spaces() -> anyhow::Result<()> {
    let mut out = Vec::new();
    writer::write_json(&mut out, &arabic_transcript())?;

    let s = String::from_utf8(out)?;
    assert!(s.contains("\n  \"language\": \"ar\""));
    assert!(s.contains("\n  \"segments\": ["));
    assert!(s.contains("\n      \"id\": 0"));
    assert!(s.ends_with("\n"));
    Ok(())
}

#[test]
fn full_text_matches_segment_concatenation() {
    let transcript = arabic_transcript();
    let joined: String = transcript
        .segments
        .iter()
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(transcript.text, joined);
}

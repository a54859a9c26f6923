//! In-memory corpora shared by unit tests.

use std::path::{Path, PathBuf};

use crate::core::types::{Classification, Segment, SessionMetadata, TranscriptIndex};

pub(crate) fn segment(session: &str, position: usize, speaker: &str, text: &str) -> Segment {
    Segment {
        session_id: session.to_string(),
        timestamp: position as f64 * 5.0,
        timestamp_str: format!("00:00:{:02}", position * 5),
        speaker: speaker.to_string(),
        text: text.to_string(),
        classification: Classification::InCharacter,
        position,
        session_date: "2024-10-15".to_string(),
        source_ref: format!("{session}/{session}_data.json"),
    }
}

pub(crate) fn metadata(session: &str, segment_count: usize) -> SessionMetadata {
    SessionMetadata {
        session_id: session.to_string(),
        session_date: "2024-10-15".to_string(),
        speaker_count: 2,
        total_duration: 60.0,
        ic_percentage: 80.0,
        ooc_percentage: 20.0,
        directory: format!("20241015_193000_{session}"),
        artifact_path: PathBuf::from(format!("{session}_data.json")),
        segment_count,
    }
}

/// Two sessions: the dragon fight and a later shopping trip
pub(crate) fn campaign_index() -> TranscriptIndex {
    let mut break_line = segment("session1", 2, "DM", "Let's take a break");
    break_line.classification = Classification::OutOfCharacter;

    let session1 = vec![
        segment("session1", 0, "Alice", "The dragon attacks"),
        segment("session1", 1, "Bob", "I cast fireball at the dragon"),
        break_line,
    ];

    let mut session2 = vec![
        segment("session2", 0, "Carol", "We should visit the market"),
        segment("session2", 1, "Alice", "I want to buy a new sword"),
        segment("session2", 2, "DM", "The merchant eyes you suspiciously"),
    ];
    for segment in &mut session2 {
        segment.session_date = "2024-10-22".to_string();
    }

    let mut meta2 = metadata("session2", 3);
    meta2.session_date = "2024-10-22".to_string();
    meta2.directory = "20241022_190000_session2".to_string();

    TranscriptIndex::assemble(
        Path::new("/campaign"),
        vec![(metadata("session1", 3), session1), (meta2, session2)],
    )
}

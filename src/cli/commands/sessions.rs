//! Session commands - list sessions and speakers
//!
//! - `list-sessions`: one line per indexed session
//! - `list-speakers`: every speaker with line counts

use crate::cli::output::{colors, format_offset, print_json, print_warning};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::types::{Classification, TranscriptIndex};
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Arguments for list-sessions
#[derive(Args, Debug)]
pub struct ListSessionsArgs {}

/// Arguments for list-speakers
#[derive(Args, Debug)]
pub struct ListSpeakersArgs {}

/// Session list item
#[derive(Debug, Serialize)]
pub struct SessionListItem {
    pub id: String,
    pub date: String,
    pub directory: String,
    pub segments: usize,
    pub speakers: usize,
    pub duration_secs: f64,
    pub ic_percentage: f64,
    pub ooc_percentage: f64,
}

/// Session list response
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub count: usize,
    pub stale: bool,
    pub sessions: Vec<SessionListItem>,
}

/// Speaker list item
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SpeakerListItem {
    pub name: String,
    pub sessions: usize,
    pub segments: usize,
    pub in_character: usize,
    pub out_of_character: usize,
}

/// Speaker list response
#[derive(Debug, Serialize)]
pub struct SpeakerListResponse {
    pub count: usize,
    pub speakers: Vec<SpeakerListItem>,
}

/// Sessions of `index`, oldest first
pub fn list_sessions(index: &TranscriptIndex) -> Vec<SessionListItem> {
    let mut items: Vec<SessionListItem> = index
        .sessions()
        .values()
        .map(|meta| SessionListItem {
            id: meta.session_id.clone(),
            date: meta.session_date.clone(),
            directory: meta.directory.clone(),
            segments: meta.segment_count,
            speakers: meta.speaker_count,
            duration_secs: meta.total_duration,
            ic_percentage: meta.ic_percentage,
            ooc_percentage: meta.ooc_percentage,
        })
        .collect();
    items.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
    items
}

/// Per-speaker line counts of `index`, by name
pub fn list_speakers(index: &TranscriptIndex) -> Vec<SpeakerListItem> {
    let mut by_name: BTreeMap<&str, (SpeakerListItem, Option<&str>)> = BTreeMap::new();

    for segment in index.segments() {
        let (item, last_session) = by_name
            .entry(segment.speaker.as_str())
            .or_insert_with(|| {
                (
                    SpeakerListItem {
                        name: segment.speaker.clone(),
                        ..Default::default()
                    },
                    None,
                )
            });
        item.segments += 1;
        match segment.classification {
            Classification::InCharacter => item.in_character += 1,
            Classification::OutOfCharacter => item.out_of_character += 1,
            Classification::Unknown => {}
        }
        // Segments of a session are contiguous
        if *last_session != Some(segment.session_id.as_str()) {
            item.sessions += 1;
            *last_session = Some(segment.session_id.as_str());
        }
    }

    by_name.into_values().map(|(item, _)| item).collect()
}

/// Execute list-sessions command
pub fn execute_list(
    _args: ListSessionsArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = services.indexes.get();
    let sessions = list_sessions(&index);

    let response = SessionListResponse {
        count: sessions.len(),
        stale: services.indexes.indexer().is_stale(&index),
        sessions,
    };

    match format {
        OutputFormat::Human => {
            if response.stale {
                print_warning("New sessions found on disk; run 'lorekeeper index --force'");
            }
            if response.sessions.is_empty() {
                println!(
                    "No sessions found under {}.",
                    colors::file_path(&index.source_root().display().to_string())
                );
            } else {
                println!(
                    "{} ({}):",
                    colors::label("Sessions"),
                    colors::number(&response.count.to_string())
                );
                for session in &response.sessions {
                    println!(
                        "  {:<24} {}  {:>6} lines  {:>3} speakers  {:>9}  {}",
                        colors::session_id(&session.id),
                        colors::dim(&session.date),
                        colors::number(&session.segments.to_string()),
                        colors::number(&session.speakers.to_string()),
                        colors::number(&format_offset(session.duration_secs)),
                        colors::dim(&format!(
                            "IC {:.0}% / OOC {:.0}%",
                            session.ic_percentage, session.ooc_percentage
                        ))
                    );
                }
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}

/// Execute list-speakers command
pub fn execute_speakers(
    _args: ListSpeakersArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let index = services.indexes.get();
    let speakers = list_speakers(&index);

    let response = SpeakerListResponse {
        count: speakers.len(),
        speakers,
    };

    match format {
        OutputFormat::Human => {
            if response.speakers.is_empty() {
                println!("No speakers found.");
            } else {
                println!(
                    "{} ({}):",
                    colors::label("Speakers"),
                    colors::number(&response.count.to_string())
                );
                for speaker in &response.speakers {
                    println!(
                        "  {:<20} {:>6} lines in {:>3} sessions  {}",
                        colors::speaker(&speaker.name),
                        colors::number(&speaker.segments.to_string()),
                        colors::number(&speaker.sessions.to_string()),
                        colors::dim(&format!(
                            "IC {} / OOC {}",
                            speaker.in_character, speaker.out_of_character
                        ))
                    );
                }
            }
        }
        OutputFormat::Json => {
            print_json(&response)?;
        }
    }

    Ok(())
}

use anyhow::Context;
use std::path::Path;
use tavernlog_core::{attach_chat_metadata, build_entries, RecordLabels};
use tavernlog_transcript::{parse_actions, KoboldStory};

pub struct ConvertParams<'a> {
    pub reference: &'a Path,
    pub story: &'a Path,
    pub player: &'a str,
    pub primary_speaker: &'a str,
    pub output: &'a Path,
    pub labels: RecordLabels,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertReport {
    pub entries: usize,
    pub user_entries: usize,
    pub metadata_copied: bool,
}

/// `tavernlog <reference> <story> <player> <primary_speaker> <output>`
pub fn execute(params: &ConvertParams<'_>) -> anyhow::Result<()> {
    let report = convert(params)?;
    println!(
        "Wrote {} entries to {}",
        report.entries,
        params.output.display()
    );
    Ok(())
}

pub fn convert(params: &ConvertParams<'_>) -> anyhow::Result<ConvertReport> {
    let reference = tavernlog_store::read_jsonl(params.reference)
        .with_context(|| format!("loading reference log {}", params.reference.display()))?;
    let story = KoboldStory::load(params.story)?;

    let turns = parse_actions(&story.actions, params.primary_speaker);
    let mut entries = build_entries(&turns, params.player, &params.labels);

    let metadata = tavernlog_store::first_chat_metadata(&reference);
    attach_chat_metadata(&mut entries, metadata.as_ref());

    tavernlog_store::write_jsonl(params.output, &entries)?;

    let report = ConvertReport {
        entries: entries.len(),
        user_entries: entries.iter().filter(|e| e.is_user).count(),
        metadata_copied: metadata.is_some(),
    };
    tracing::info!(
        actions = story.actions.len(),
        entries = report.entries,
        user_entries = report.user_entries,
        metadata_copied = report.metadata_copied,
        "converted story"
    );
    Ok(report)
}

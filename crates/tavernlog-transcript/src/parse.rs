use std::sync::LazyLock;

use regex::Regex;
use tavernlog_core::Turn;

/// `Name: text` at the start of a trimmed line. Names are letters, digits
/// and `_` only; combining marks and joiners do not count as name characters.
static SPEAKER_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\p{L}\p{N}_]+):\s*(.*)").unwrap());

/// Splits KoboldAI actions into speaker turns.
///
/// Lines beginning with `Name:` open a new turn; every other line continues
/// the turn that is currently open. The primary speaker is matched on its
/// literal `"<label>:"` prefix before the generic `Name:` pattern is tried,
/// so labels containing spaces or punctuation still work.
///
/// Parsing never fails. Lines seen before the first marker have no speaker
/// to belong to and are dropped.
#[derive(Debug)]
pub struct TurnParser {
    primary: String,
    primary_marker: String,
    primary_prefix: String,
    speaker: Option<String>,
    fragments: Vec<String>,
    turns: Vec<Turn>,
    dropped: usize,
}

impl TurnParser {
    pub fn new(primary_speaker: &str) -> Self {
        Self {
            primary: primary_speaker.to_string(),
            primary_marker: format!("{primary_speaker}:"),
            primary_prefix: format!("{primary_speaker}: "),
            speaker: None,
            fragments: Vec::new(),
            turns: Vec::new(),
            dropped: 0,
        }
    }

    /// Feed one raw action block. Turns may span several actions.
    pub fn push_action(&mut self, action: &str) {
        for line in action.split('\n') {
            self.push_line(line);
        }
    }

    /// Close the open turn and return every turn in order.
    pub fn finish(mut self) -> Vec<Turn> {
        self.emit();
        tracing::debug!(
            turns = self.turns.len(),
            dropped_lines = self.dropped,
            primary = %self.primary,
            "parsed transcript"
        );
        self.turns
    }

    fn push_line(&mut self, raw: &str) {
        let line = raw.trim();

        if let Some(rest) = self.primary_remainder(line) {
            let speaker = self.primary.clone();
            self.start_turn(speaker, rest.trim());
            return;
        }

        if let Some(caps) = SPEAKER_LINE.captures(line) {
            let speaker = caps[1].to_string();
            let rest = caps.get(2).map_or("", |m| m.as_str().trim());
            self.start_turn(speaker, rest);
            return;
        }

        if !line.is_empty() {
            self.fragments.push(line.to_string());
        }
    }

    /// Text after the first `"<label>: "` on a line that starts with
    /// `"<label>:"`. Falls back to the text right after the colon when the
    /// spaced form never occurs.
    fn primary_remainder<'a>(&self, line: &'a str) -> Option<&'a str> {
        if !line.starts_with(&self.primary_marker) {
            return None;
        }
        let rest = match line.find(&self.primary_prefix) {
            Some(pos) => &line[pos + self.primary_prefix.len()..],
            None => &line[self.primary_marker.len()..],
        };
        Some(rest)
    }

    fn start_turn(&mut self, speaker: String, first: &str) {
        self.emit();
        self.speaker = Some(speaker);
        if !first.is_empty() {
            self.fragments.push(first.to_string());
        }
    }

    fn emit(&mut self) {
        match self.speaker.take() {
            Some(speaker) => {
                let message = self.fragments.join(" ");
                self.turns.push(Turn::new(speaker, message));
            }
            None => self.dropped += self.fragments.len(),
        }
        self.fragments.clear();
    }
}

/// Parse a whole action list in one go.
pub fn parse_actions<I, S>(actions: I, primary_speaker: &str) -> Vec<Turn>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut parser = TurnParser::new(primary_speaker);
    for action in actions {
        parser.push_action(action.as_ref());
    }
    parser.finish()
}

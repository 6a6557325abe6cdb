use serde::{Deserialize, Serialize};

/// One attributed span of dialogue: a speaker and everything they said
/// until the next speaker marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: String,
    pub message: String,
}

impl Turn {
    pub fn new(speaker: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            speaker: speaker.into(),
            message: message.into(),
        }
    }
}

/// The `extra` object of a chat entry. Its shape depends on who is speaking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum Extra {
    /// `{"isSmallSys": false}` on user entries.
    User {
        #[serde(rename = "isSmallSys")]
        is_small_sys: bool,
    },
    /// `{"api": ..., "model": ...}` on generated entries.
    Generated { api: String, model: String },
}

/// Provenance of a generated entry. Flattened into the entry, so the keys
/// only exist on non-user lines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Generation {
    pub gen_started: String,
    pub gen_finished: String,
    pub swipe_id: u32,
    pub swipes: Vec<String>,
    pub swipe_info: Vec<SwipeInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SwipeInfo {
    pub send_date: String,
    pub gen_started: String,
    pub gen_finished: String,
    pub extra: Extra,
}

/// A single SillyTavern chat entry (one JSONL line in the output log).
///
/// Field order is the serialized key order and matches what SillyTavern
/// itself writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatEntry {
    pub name: String,
    pub is_user: bool,
    pub is_system: bool,
    pub send_date: String,
    pub mes: String,
    pub extra: Extra,
    /// `Some("")` for the user, `None` (serialized as `null`) otherwise.
    pub force_avatar: Option<String>,
    #[serde(flatten)]
    pub generation: Option<Generation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat_metadata: Option<serde_json::Value>,
}

use crate::labels::RecordLabels;
use crate::types::{ChatEntry, Extra, Generation, SwipeInfo, Turn};

/// Build the chat entry for a single turn.
///
/// `player_name` decides the role: a turn whose speaker equals it exactly
/// (case-sensitive) is the user's and carries no generation fields. Every
/// other turn is treated as generated by `labels.api` / `labels.model`.
pub fn build_entry(turn: &Turn, player_name: &str, labels: &RecordLabels) -> ChatEntry {
    let is_user = turn.speaker == player_name;

    if is_user {
        return ChatEntry {
            name: turn.speaker.clone(),
            is_user: true,
            is_system: false,
            send_date: labels.send_date.clone(),
            mes: turn.message.clone(),
            extra: Extra::User {
                is_small_sys: false,
            },
            force_avatar: Some(String::new()),
            generation: None,
            chat_metadata: None,
        };
    }

    let extra = Extra::Generated {
        api: labels.api.clone(),
        model: labels.model.clone(),
    };
    let stamp = labels.gen_timestamp();

    ChatEntry {
        name: turn.speaker.clone(),
        is_user: false,
        is_system: false,
        send_date: labels.send_date.clone(),
        mes: turn.message.clone(),
        extra: extra.clone(),
        force_avatar: None,
        generation: Some(Generation {
            gen_started: stamp.clone(),
            gen_finished: stamp.clone(),
            swipe_id: 0,
            swipes: vec![turn.message.clone()],
            swipe_info: vec![SwipeInfo {
                send_date: labels.send_date.clone(),
                gen_started: stamp.clone(),
                gen_finished: stamp,
                extra,
            }],
        }),
        chat_metadata: None,
    }
}

/// Build one entry per turn, preserving order.
pub fn build_entries(turns: &[Turn], player_name: &str, labels: &RecordLabels) -> Vec<ChatEntry> {
    turns
        .iter()
        .map(|t| build_entry(t, player_name, labels))
        .collect()
}

/// Stamp the same `chat_metadata` onto every entry.
///
/// `None` means the reference log had no records; entries are left without
/// the key. `Some` overwrites whatever the entries carried.
pub fn attach_chat_metadata(entries: &mut [ChatEntry], metadata: Option<&serde_json::Value>) {
    let Some(metadata) = metadata else {
        return;
    };
    for entry in entries.iter_mut() {
        entry.chat_metadata = Some(metadata.clone());
    }
}

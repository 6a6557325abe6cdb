use std::path::Path;

use anyhow::Context;
use serde_json::Value;

/// Shape problems in a KoboldAI story save.
#[derive(Debug, thiserror::Error)]
pub enum StoryError {
    #[error("story root is not a JSON object")]
    NotAnObject,
    #[error("`actions` is not an array (found {0})")]
    ActionsNotArray(&'static str),
    #[error("action #{index} is not a string (found {found})")]
    ActionNotString { index: usize, found: &'static str },
}

/// The parts of a KoboldAI story save that tavernlog reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KoboldStory {
    pub actions: Vec<String>,
}

impl KoboldStory {
    /// Read and decode a story save from disk.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading story {}", path.display()))?;
        let value: Value = serde_json::from_str(&content)
            .with_context(|| format!("parsing story {}", path.display()))?;
        let story = Self::from_value(&value)
            .with_context(|| format!("reading actions from {}", path.display()))?;
        Ok(story)
    }

    /// Decode a story save from its JSON text.
    pub fn from_json(text: &str) -> anyhow::Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value(&value)?)
    }

    /// Extract `actions` from an already-parsed story. A missing field means
    /// an empty story.
    pub fn from_value(value: &Value) -> Result<Self, StoryError> {
        let obj = value.as_object().ok_or(StoryError::NotAnObject)?;

        let Some(actions) = obj.get("actions") else {
            tracing::warn!("story has no `actions` field; nothing to convert");
            return Ok(Self::default());
        };

        let arr = actions
            .as_array()
            .ok_or_else(|| StoryError::ActionsNotArray(json_kind(actions)))?;

        let actions = arr
            .iter()
            .enumerate()
            .map(|(index, v)| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| StoryError::ActionNotString {
                        index,
                        found: json_kind(v),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { actions })
    }
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

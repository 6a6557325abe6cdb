/// Fixed display date stamped on every converted entry.
pub const DEFAULT_SEND_DATE: &str = "January 1, 2020 12:01am";

/// Backend name recorded on generated entries.
pub const DEFAULT_API: &str = "koboldcpp";

/// Model name recorded on generated entries.
pub const DEFAULT_MODEL: &str = "koboldcpp/unknown";

/// Session-wide constants stamped onto every entry of a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLabels {
    pub send_date: String,
    pub api: String,
    pub model: String,
}

impl Default for RecordLabels {
    fn default() -> Self {
        Self {
            send_date: DEFAULT_SEND_DATE.to_string(),
            api: DEFAULT_API.to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl RecordLabels {
    /// Defaults, overridden by `TAVERNLOG_SEND_DATE`, `TAVERNLOG_API` and
    /// `TAVERNLOG_MODEL` when set to a non-empty value.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            send_date: get("TAVERNLOG_SEND_DATE", DEFAULT_SEND_DATE),
            api: get("TAVERNLOG_API", DEFAULT_API),
            model: get("TAVERNLOG_MODEL", DEFAULT_MODEL),
        }
    }

    /// Generation start/finish stamp: the display date with a fixed time suffix.
    pub fn gen_timestamp(&self) -> String {
        format!("{}T00:01:00.000Z", self.send_date)
    }
}

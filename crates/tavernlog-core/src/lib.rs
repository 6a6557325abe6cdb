pub mod labels;
pub mod record;
pub mod types;

pub use labels::RecordLabels;
pub use record::{attach_chat_metadata, build_entries, build_entry};
pub use types::*;

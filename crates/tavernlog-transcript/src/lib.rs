mod parse;
mod story;

pub use parse::{parse_actions, TurnParser};
pub use story::{KoboldStory, StoryError};

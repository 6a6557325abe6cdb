mod cmd_convert;

use clap::Parser;
use std::path::PathBuf;
use tavernlog_core::RecordLabels;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "tavernlog",
    version,
    about = "Convert a KoboldAI story save into a SillyTavern chat log"
)]
struct Cli {
    /// Existing SillyTavern chat log (.jsonl); chat_metadata is copied from its first line
    reference: PathBuf,
    /// KoboldAI story save (.json) holding the `actions` list
    story: PathBuf,
    /// SillyTavern user name; turns by this speaker become user messages
    #[arg(allow_hyphen_values = true)]
    player: String,
    /// KoboldAI speaker label, matched literally as "<label>:"
    #[arg(allow_hyphen_values = true)]
    primary_speaker: String,
    /// Path of the chat log to write (.jsonl)
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    cmd_convert::execute(&cmd_convert::ConvertParams {
        reference: &cli.reference,
        story: &cli.story,
        player: &cli.player,
        primary_speaker: &cli.primary_speaker,
        output: &cli.output,
        labels: RecordLabels::from_env(),
    })
}

/// Log to stderr, filtered by `RUST_LOG` (default: warnings only).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

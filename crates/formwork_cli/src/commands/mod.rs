//! CLI command definitions.
//!
//! Each subcommand exercises one part of the formwork libraries against
//! real input: error payloads, suggestion endpoints, editor options.

use clap::{Parser, Subcommand, ValueEnum};

pub mod classify;
pub mod editor_config;
pub mod suggest;

/// formwork - form-field logic toolkit
#[derive(Parser)]
#[command(name = "formwork")]
#[command(version, about = "formwork - form-field logic toolkit")]
#[command(long_about = r#"
Developer tools for formwork form components.

COMMANDS:
  classify       → Flatten a validation error payload into field paths
  suggest        → Run one query against a remote suggestion endpoint
  editor-config  → Print rich text editor init options

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure (classify --fail-on-errors)
  4 - Suggestion API error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Classify a validation error payload (JSON or YAML)
    Classify(classify::ClassifyArgs),

    /// Query a suggestion endpoint
    Suggest(suggest::SuggestArgs),

    /// Print editor init options
    #[command(name = "editor-config")]
    EditorConfig(editor_config::EditorConfigArgs),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

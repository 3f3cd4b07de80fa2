//! Editor config command - Print rich text editor init options.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use formwork_editor::EditorConfig;

use crate::input::{load_document, parse_pair};

#[derive(Args)]
pub struct EditorConfigArgs {
    /// Base config file (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Render options for a disabled editor
    #[arg(long)]
    disabled: bool,

    /// Override an init option as key=value (repeatable)
    #[arg(long = "set")]
    overrides: Vec<String>,
}

pub fn build(args: &EditorConfigArgs) -> Result<EditorConfig> {
    let mut config = match &args.config {
        Some(path) => load_document::<EditorConfig>(path)?,
        None => EditorConfig::default(),
    };
    for raw in &args.overrides {
        let (key, value) = parse_pair(raw)?;
        config = config.set(key, value);
    }
    Ok(config)
}

pub async fn execute(args: EditorConfigArgs) -> Result<()> {
    let config = build(&args)?;
    let init = config.to_init_json(args.disabled);
    println!("{}", serde_json::to_string_pretty(&init)?);
    Ok(())
}

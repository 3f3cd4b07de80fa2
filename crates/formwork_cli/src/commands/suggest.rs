//! Suggest command - Run one query against a suggestion endpoint.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use tracing::{debug, info};

use formwork_remote::{
    AffiliationsSuggestions, HttpSuggestionSource, RemoteSelectConfig, RemoteSelectField, SearchHooks,
    SuggestionSource, TitleIdSerializer,
};

use super::OutputFormat;
use crate::input::{load_document, parse_pair};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SerializerKind {
    /// `title` as text, `id` as value
    #[default]
    TitleId,
    People,
    Organizations,
}

#[derive(Args)]
pub struct SuggestArgs {
    /// Search text
    query: String,

    /// Remote select config file (.json, .yaml or .yml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Suggestion endpoint, overrides the config
    #[arg(long, env = "FORMWORK_SUGGESTION_URL")]
    url: Option<String>,

    /// Base URL for relative endpoints
    #[arg(long)]
    base_url: Option<String>,

    /// Extra query parameter as key=value (repeatable)
    #[arg(long = "param")]
    params: Vec<String>,

    /// Request header as name=value (repeatable)
    #[arg(long = "header")]
    headers: Vec<String>,

    /// Name of the search text parameter
    #[arg(long)]
    query_param: Option<String>,

    #[arg(long, value_enum, default_value_t = SerializerKind::TitleId)]
    serializer: SerializerKind,

    /// Append the "Manual entry" suggestion (people/organizations)
    #[arg(long)]
    manual_entry: bool,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

/// Config file (if any) with command-line overrides applied.
pub fn build_config(args: &SuggestArgs) -> Result<RemoteSelectConfig> {
    let mut config = match &args.config {
        Some(path) => load_document::<RemoteSelectConfig>(path)?,
        None => RemoteSelectConfig::default(),
    };

    if let Some(url) = &args.url {
        config.suggestion_api_url = url.clone();
    }
    if let Some(base_url) = &args.base_url {
        config.base_url = Some(base_url.clone());
    }
    if let Some(name) = &args.query_param {
        config.search_query_param_name = name.clone();
    }
    for raw in &args.params {
        let (key, value) = parse_pair(raw)?;
        config.query_params.insert(key, value);
    }
    for raw in &args.headers {
        let (name, value) = parse_pair(raw)?;
        let value = match value {
            serde_json::Value::String(s) => s,
            other => other.to_string(),
        };
        config.headers.insert(name, value);
    }

    if config.suggestion_api_url.is_empty() {
        anyhow::bail!("Missing argument: no suggestion URL in --url or the config file");
    }
    Ok(config)
}

fn hooks(args: &SuggestArgs) -> SearchHooks {
    let affiliations = match args.serializer {
        SerializerKind::TitleId => return SearchHooks::new().serializer(TitleIdSerializer),
        SerializerKind::People => AffiliationsSuggestions::people(),
        SerializerKind::Organizations => AffiliationsSuggestions::organizations(),
    };
    let affiliations = if args.manual_entry {
        affiliations.with_manual_entry()
    } else {
        affiliations
    };
    SearchHooks::new().serializer(affiliations)
}

pub async fn execute(args: SuggestArgs) -> Result<()> {
    let config = build_config(&args)?;
    let source = HttpSuggestionSource::with_timeout(Duration::from_secs(args.timeout))
        .context("Failed to build suggestion HTTP client")?;
    run(config, source, &args).await
}

/// Run the query through a remote select field and print the outcome.
pub async fn run<S: SuggestionSource + 'static>(
    config: RemoteSelectConfig,
    source: S,
    args: &SuggestArgs,
) -> Result<()> {
    info!("Querying {} for {:?}", config.suggestion_api_url, args.query);

    let field = RemoteSelectField::with_hooks(config, source, hooks(args))
        .context("Invalid suggestion URL")?;
    field.execute_search(&args.query).await;

    let state = field.state();
    debug!(applied = state.applied_results, "search finished");
    if state.error {
        anyhow::bail!("Suggestion request failed (see log for details)");
    }

    match args.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&state.suggestions)?);
        }
        OutputFormat::Text => {
            if state.suggestions.is_empty() {
                println!("{}", field.no_results_message().text());
            }
            for suggestion in state.suggestions.iter() {
                if suggestion.text == suggestion.value {
                    println!("{}", suggestion.text);
                } else {
                    println!("{}  [{}]", suggestion.text, suggestion.value);
                }
            }
        }
    }
    Ok(())
}

//! Classify command - Flatten a validation error payload.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use serde_json::json;
use tracing::info;

use formwork_core::{classify_at, Classified, ErrorNode};

use super::OutputFormat;
use crate::input::load_document;

#[derive(Args)]
pub struct ClassifyArgs {
    /// Error payload file (.json, .yaml or .yml)
    file: PathBuf,

    /// Path prefix for every entry
    #[arg(long, default_value = "")]
    prefix: String,

    /// Only report errors under these paths
    #[arg(long = "under")]
    under: Vec<String>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Exit with a validation failure when blocking errors are present
    #[arg(long)]
    fail_on_errors: bool,
}

pub async fn execute(args: ClassifyArgs) -> Result<()> {
    info!("Classifying errors from {}", args.file.display());

    let node: ErrorNode = load_document(&args.file)?;
    let classified = filter_under(classify_at(&node, &args.prefix), &args.under);

    match args.format {
        OutputFormat::Json => {
            let output = json!({
                "flattened": classified.flattened,
                "severity_checks": classified.severity_checks,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print_text(&classified),
    }

    if args.fail_on_errors && classified.blocking_count() > 0 {
        anyhow::bail!(
            "Validation failed: {} blocking error(s)",
            classified.blocking_count()
        );
    }
    Ok(())
}

fn filter_under(classified: Classified, prefixes: &[String]) -> Classified {
    if prefixes.is_empty() {
        classified
    } else {
        classified.retain_under(prefixes)
    }
}

fn print_text(classified: &Classified) {
    if classified.is_empty() {
        println!("No errors.");
        return;
    }
    if !classified.flattened.is_empty() {
        println!("Errors ({}):", classified.flattened.len());
        for (path, message) in &classified.flattened {
            println!("  {path}: {message}");
        }
    }
    if !classified.severity_checks.is_empty() {
        println!("Advisories ({}):", classified.severity_checks.len());
        for (path, check) in &classified.severity_checks {
            println!("  [{}] {path}: {}", check.severity, check.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_errors(dir: &std::path::Path) -> PathBuf {
        let path = dir.join("errors.json");
        std::fs::write(
            &path,
            r#"{"metadata": {"title": "Required", "rights": {"message": "No license", "severity": "warning"}}, "files": "Missing"}"#,
        )
        .unwrap();
        path
    }

    fn args(file: PathBuf, under: Vec<String>, fail_on_errors: bool) -> ClassifyArgs {
        ClassifyArgs {
            file,
            prefix: String::new(),
            under,
            format: OutputFormat::Json,
            fail_on_errors,
        }
    }

    #[tokio::test]
    async fn test_fail_on_errors_is_validation_failure() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_errors(dir.path());

        let err = execute(args(file.clone(), Vec::new(), true)).await.unwrap_err();
        assert!(err.to_string().contains("Validation failed: 2"));

        execute(args(file, Vec::new(), false)).await.unwrap();
    }

    #[tokio::test]
    async fn test_under_filters_entries() {
        let dir = tempfile::tempdir().unwrap();
        let file = write_errors(dir.path());

        let err = execute(args(file, vec!["files".to_string()], true))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("1 blocking"));
    }

    #[test]
    fn test_filter_under_without_prefixes_keeps_all() {
        let node = ErrorNode::from(serde_json::json!({"a": "x", "b": "y"}));
        assert_eq!(filter_under(classify_at(&node, ""), &[]).blocking_count(), 2);
    }
}

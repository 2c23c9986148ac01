//! Non-interactive subcommands: info, evaluate, config.

use anyhow::{Context, Result};
use mira_common::report::SeverityAdvice;
use mira_common::{TriageConfig, TriageContext};
use owo_colors::OwoColorize;
use std::path::Path;

/// Build the startup context. Collaborator failure here is fatal: the caller
/// reports it once and no session begins.
pub fn load_context(config_path: Option<&Path>) -> Result<TriageContext> {
    let config = TriageConfig::load_or_default(config_path)
        .context("failed to load configuration")?;
    TriageContext::load(config).context("failed to initialize triage collaborators")
}

/// Direct knowledge-base lookup for a disease name
pub fn info(config_path: Option<&Path>, disease: &str) -> Result<()> {
    let ctx = load_context(config_path)?;

    let precautions = ctx.knowledge.precautions(disease);
    let severity = ctx.knowledge.severity(disease);
    let description = ctx.knowledge.description(disease);

    if precautions.is_empty() && severity.is_none() && description.is_empty() {
        println!(
            "{}  No reference entries for {}",
            "~".yellow(),
            disease.bright_white()
        );
        return Ok(());
    }

    println!("{}", disease.bright_white().bold());
    println!();

    println!("{}", "Precautions:".cyan());
    if precautions.is_empty() {
        println!("  (none on record)");
    } else {
        for p in &precautions {
            println!("  - {}", p);
        }
    }

    let advice = SeverityAdvice::from_score(
        severity,
        ctx.config.elicitation.severity_alert_threshold,
    );
    println!("{}", "Severity:".cyan());
    println!("  - {}", advice.message());

    println!("{}", "Description:".cyan());
    if description.is_empty() {
        println!("  (none on record)");
    } else {
        println!("  - {}", description);
    }

    Ok(())
}

/// Score the trained classifier against the held-out test rows
pub fn evaluate(config_path: Option<&Path>, json: bool) -> Result<()> {
    let ctx = load_context(config_path)?;
    let rows = &ctx.test_rows;

    let mut correct = 0usize;
    for (features, &label) in rows.features.iter().zip(rows.labels.iter()) {
        if ctx.forest.classify(features)? == label {
            correct += 1;
        }
    }

    let total = rows.len();
    let accuracy = if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    };

    if json {
        let out = serde_json::json!({
            "test_rows": total,
            "correct": correct,
            "accuracy": accuracy,
            "trees": ctx.forest.num_trees(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!(
            "{}  {}/{} test rows correct ({:.1}%)",
            "+".bright_green(),
            correct,
            total,
            accuracy * 100.0
        );
    }

    Ok(())
}

/// Print the effective configuration as TOML
pub fn show_config(config_path: Option<&Path>) -> Result<()> {
    let config = TriageConfig::load_or_default(config_path)
        .context("failed to load configuration")?;
    print!("{}", config.to_toml()?);
    Ok(())
}

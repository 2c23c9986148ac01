//! Interactive triage chat.
//!
//! Reads one line per engine event and renders the engine's replies; all
//! session logic lives in `mira_common::engine`.

use anyhow::Result;
use mira_common::engine::{ElicitationEngine, EngineReply, SessionOutcome};
use mira_common::TriageContext;
use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};
use std::path::Path;

use crate::commands::load_context;

pub fn run(config_path: Option<&Path>) -> Result<()> {
    let ctx = load_context(config_path)?;

    println!();
    println!(
        "{}  {}",
        "*".bright_cyan().bold(),
        "Welcome to Mira, your symptom triage assistant".bright_white().bold()
    );
    let name = ask("May I know your name?")?;
    let name = if name.is_empty() { "there".to_string() } else { name };
    println!("   Hello, {}!", name.bright_white());
    println!();

    loop {
        if !run_session(&ctx)? {
            break;
        }

        let again = ask("Do you want to run another check? (yes or no)")?;
        if !mira_common::engine::parse_yes_no(&again) {
            break;
        }
        println!();
    }

    println!();
    println!("Thank you, {}! Have a great day.", name.bright_white());
    Ok(())
}

/// One elicitation session. Returns false when the user abandoned the chat.
fn run_session(ctx: &TriageContext) -> Result<bool> {
    let mut engine = ElicitationEngine::new(ctx);
    let mut prompt = engine.opening_prompt();

    loop {
        let input = ask(&prompt)?;

        match engine.handle_line(&input) {
            EngineReply::AskYesNo { symptom } => {
                prompt = format!("Do you have {}? (yes or no)", symptom);
            }
            EngineReply::UnknownSymptom { input } => {
                println!(
                    "   {}  I don't recognize {:?}. Please name a known symptom.",
                    "!".yellow(),
                    input
                );
                prompt = engine.opening_prompt();
            }
            EngineReply::Finished { outcome } => {
                return Ok(render_outcome(&outcome));
            }
        }
    }
}

/// Render a terminal outcome; returns false when the chat should end
fn render_outcome(outcome: &SessionOutcome) -> bool {
    println!();
    match outcome {
        SessionOutcome::Diagnosed { report } => {
            for line in report.render_summary().lines() {
                println!("   {}", line);
            }
            println!();
            true
        }
        SessionOutcome::InsufficientEvidence { .. } => {
            println!(
                "   {}  Sorry, the symptoms provided are not sufficient to predict a disease.",
                "~".yellow()
            );
            println!();
            true
        }
        SessionOutcome::PredictionFailed { reason } => {
            println!(
                "   {}  Prediction failed: {}. Please try again.",
                "!".bright_red(),
                reason
            );
            println!();
            true
        }
        SessionOutcome::Abandoned => false,
    }
}

/// Prompt and read one trimmed line from stdin
fn ask(prompt: &str) -> Result<String> {
    print!("   {}  ", prompt.bright_magenta());
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

//! The `emtprep run` command: drive one branching scenario to its end.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;

use emtprep_core::model::ScoreRecord;
use emtprep_core::parser;
use emtprep_core::profile::UserProfile;
use emtprep_core::scenario::{EngineState, ScenarioEngine};
use emtprep_core::traits::{ScenarioStore, ScoreStore};

pub async fn execute(
    scenario_id: String,
    file: Option<PathBuf>,
    choices: Option<String>,
    submit: bool,
    config_path: Option<PathBuf>,
    profile_path: Option<PathBuf>,
) -> Result<()> {
    let (_, store) = super::open_store(config_path.as_deref())?;

    let scenarios = match &file {
        Some(path) => parser::load_scenario_file(path)?,
        None => match store.list_scenarios().await {
            Ok(records) => parser::load_scenarios(&records),
            Err(e) => {
                // A failed load is an empty list, not a crash.
                tracing::error!("failed to fetch scenarios: {e:#}");
                Vec::new()
            }
        },
    };

    let scenario = scenarios
        .into_iter()
        .find(|s| s.id == scenario_id)
        .with_context(|| format!("scenario '{scenario_id}' not found"))?;
    let title = scenario.title.clone();
    let scenario = Arc::new(scenario);

    let mut engine = ScenarioEngine::new();
    engine
        .start(Arc::clone(&scenario))
        .with_context(|| format!("cannot start scenario '{scenario_id}'"))?;

    println!("=== {title} ===\n");

    match choices {
        Some(list) => run_scripted(&mut engine, &list)?,
        None => run_interactive(&mut engine)?,
    }

    let outcome = engine
        .outcome()
        .context("session did not reach a terminal state")?;

    if outcome.failed {
        println!("\nScenario failed — you selected an option that resulted in a critical failure.");
    } else {
        println!(
            "\nScenario complete! Final score: {} points.",
            outcome.score
        );
    }

    if submit {
        let profile = UserProfile::load(&super::profile_path(profile_path)?);
        let record = ScoreRecord {
            test_id: scenario_id,
            score: outcome.score as f64,
            timestamp: Utc::now(),
            username: profile.username().map(str::to_string),
        };
        store
            .submit_score(&record)
            .await
            .context("failed to submit score")?;
        println!("Score submitted to the leaderboard.");
    }

    Ok(())
}

fn print_step(engine: &ScenarioEngine) {
    let Some(step) = engine.current_step() else {
        return;
    };
    println!("{}\n", step.text);
    for option in &step.options {
        println!("  [{}] {}", option.option_id, option.text);
    }
    println!("\nScore so far: {} points", engine.score().unwrap_or(0));
}

/// Walk the scenario with a pre-supplied choice list.
fn run_scripted(engine: &mut ScenarioEngine, choices: &str) -> Result<()> {
    for choice in choices.split(',').map(str::trim) {
        print_step(engine);
        if !engine.select(choice) {
            anyhow::bail!("'{choice}' is not an option on the current step");
        }
        println!("> {choice}\n");
        if engine.confirm()? != EngineState::InProgress {
            return Ok(());
        }
    }
    anyhow::bail!("ran out of choices before the scenario ended");
}

/// Prompt on stdin until the scenario terminates.
fn run_interactive(engine: &mut ScenarioEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_step(engine);
        print!("\nChoose an option: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("input ended before the scenario did");
        };
        let choice = line?;
        let choice = choice.trim();
        if choice.is_empty() {
            continue;
        }
        if !engine.select(choice) {
            println!("Unknown option '{choice}', try again.\n");
            continue;
        }
        if engine.confirm()? != EngineState::InProgress {
            return Ok(());
        }
        println!();
    }
}

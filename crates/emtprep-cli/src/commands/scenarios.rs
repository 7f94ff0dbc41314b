//! The `emtprep scenarios` command: list what's available.

use std::path::PathBuf;

use anyhow::Result;

use emtprep_core::parser;
use emtprep_core::traits::ScenarioStore;

pub async fn execute(file: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let scenarios = match &file {
        Some(path) => parser::load_scenario_file(path)?,
        None => {
            let (_, store) = super::open_store(config_path.as_deref())?;
            match store.list_scenarios().await {
                Ok(records) => parser::load_scenarios(&records),
                Err(e) => {
                    tracing::error!("failed to fetch scenarios: {e:#}");
                    Vec::new()
                }
            }
        }
    };

    if scenarios.is_empty() {
        println!("No scenarios available.");
        return Ok(());
    }

    println!("Available scenarios:");
    for scenario in &scenarios {
        let startable = if scenario.entry_step().is_some() {
            ""
        } else {
            "  (missing entry step — cannot start)"
        };
        println!(
            "  {} — {} ({} steps){startable}",
            scenario.id,
            scenario.title,
            scenario.steps().len()
        );
    }

    Ok(())
}

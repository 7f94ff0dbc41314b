//! The `emtprep seed` command: upload local seed files to the store.
//!
//! Keeps going past individual failures so one bad or already-present
//! document doesn't block the rest of the batch.

use std::path::PathBuf;

use anyhow::Result;

use emtprep_core::model::ScenarioRecord;
use emtprep_core::parser;
use emtprep_core::traits::{QuestionStore, ScenarioStore};

pub async fn execute(
    scenarios: Option<PathBuf>,
    questions: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        scenarios.is_some() || questions.is_some(),
        "nothing to seed; pass --scenarios and/or --questions"
    );

    let (_, store) = super::open_store(config_path.as_deref())?;

    if let Some(path) = scenarios {
        let loaded = parser::load_scenario_file(&path)?;
        println!("Found {} scenarios to insert", loaded.len());

        let mut inserted = 0;
        for scenario in &loaded {
            let record = ScenarioRecord {
                id: scenario.id.clone(),
                title: scenario.title.clone(),
                steps: serde_json::to_string(scenario.steps())?,
            };
            match store.put_scenario(&record).await {
                Ok(()) => {
                    inserted += 1;
                    println!("  inserted scenario {}", record.id);
                }
                Err(e) => {
                    tracing::error!("failed to insert scenario {}: {e:#}", record.id);
                }
            }
        }
        println!("Scenarios: {inserted}/{} inserted.", loaded.len());
    }

    if let Some(path) = questions {
        let records = parser::load_question_file(&path)?;
        println!("Found {} questions to insert", records.len());

        let mut inserted = 0;
        for record in &records {
            match store.put_question(record).await {
                Ok(()) => {
                    inserted += 1;
                    println!("  inserted question {}", record.id);
                }
                Err(e) => {
                    tracing::error!("failed to insert question {}: {e:#}", record.id);
                }
            }
        }
        println!("Questions: {inserted}/{} inserted.", records.len());
    }

    Ok(())
}

//! The `emtprep validate` command.

use std::path::PathBuf;

use anyhow::Result;

use emtprep_core::parser;

pub fn execute(path: PathBuf) -> Result<()> {
    let scenarios = if path.is_dir() {
        parser::load_scenario_directory(&path)?
    } else {
        parser::load_scenario_file(&path)?
    };

    let mut total_warnings = 0;

    for scenario in &scenarios {
        println!(
            "Scenario: {} ({} steps)",
            scenario.title,
            scenario.steps().len()
        );

        let warnings = parser::validate_scenario(scenario);
        for w in &warnings {
            let prefix = w
                .step_id
                .as_ref()
                .map(|id| format!("  [{id}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All scenarios valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}

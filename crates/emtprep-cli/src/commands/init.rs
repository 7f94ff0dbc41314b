//! The `emtprep init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create emtprep.toml
    if std::path::Path::new("emtprep.toml").exists() {
        println!("emtprep.toml already exists, skipping.");
    } else {
        std::fs::write("emtprep.toml", SAMPLE_CONFIG)?;
        println!("Created emtprep.toml");
    }

    // Create example seed data
    std::fs::create_dir_all("data")?;
    let scenario_path = std::path::Path::new("data/scenarios.json");
    if scenario_path.exists() {
        println!("data/scenarios.json already exists, skipping.");
    } else {
        std::fs::write(scenario_path, EXAMPLE_SCENARIOS)?;
        println!("Created data/scenarios.json");
    }
    let question_path = std::path::Path::new("data/questions.json");
    if question_path.exists() {
        println!("data/questions.json already exists, skipping.");
    } else {
        std::fs::write(question_path, EXAMPLE_QUESTIONS)?;
        println!("Created data/questions.json");
    }

    println!("\nNext steps:");
    println!("  1. Edit emtprep.toml with your project and API key");
    println!("  2. Run: emtprep validate --path data/scenarios.json");
    println!("  3. Run: emtprep run --scenario chest-pain --file data/scenarios.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# emtprep configuration

endpoint = "https://cloud.appwrite.io/v1"
project_id = "${EMTPREP_PROJECT_ID}"
api_key = "${EMTPREP_API_KEY}"

# Collection layout; the defaults match the hosted deployment.
# database_id = "..."
# scenarios_collection = "..."
# questions_collection = "..."
# scores_collection = "..."
# bucket_id = "..."
"#;

const EXAMPLE_SCENARIOS: &str = r#"[
  {
    "scenarioId": "chest-pain",
    "title": "Chest Pain Call",
    "steps": [
      {
        "stepId": "step1",
        "text": "You respond to a 54-year-old male complaining of crushing chest pain.",
        "options": [
          {"optionId": "assess", "text": "Perform a primary survey", "points": 10, "nextStepId": "step2"},
          {"optionId": "load", "text": "Load and go without assessment", "points": -5, "nextStepId": "step2"},
          {"optionId": "ignore", "text": "Advise him to see his GP tomorrow", "points": 0, "isAutoFail": true}
        ]
      },
      {
        "stepId": "step2",
        "text": "Airway clear, breathing rapid, skin pale and diaphoretic.",
        "options": [
          {"optionId": "oxygen", "text": "Administer oxygen and aspirin", "points": 10},
          {"optionId": "wait", "text": "Wait for symptoms to resolve", "points": -10}
        ]
      }
    ]
  }
]
"#;

const EXAMPLE_QUESTIONS: &str = r#"[
  {
    "documentId": "q1",
    "data": {
      "question": "What is the normal respiratory rate for a healthy adult at rest?",
      "optionA": "4-8 breaths per minute",
      "optionB": "12-20 breaths per minute",
      "optionC": "24-32 breaths per minute",
      "optionD": "40+ breaths per minute",
      "correctAnswer": "B"
    }
  }
]
"#;

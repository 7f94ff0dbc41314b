//! Scenario and question record parsing.
//!
//! Store documents carry the step graph as a serialized JSON string;
//! seed files carry it inline. Both land in the same [`Scenario`] type.
//! Bulk loading follows a partial-failure policy: a record that fails to
//! parse is skipped with a warning and loading continues.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::EngineError;
use crate::model::{
    AnswerKey, Question, QuestionRecord, Scenario, ScenarioRecord, Step, ENTRY_STEP_ID,
};

/// Parse one store record into a `Scenario`.
///
/// Fails with [`EngineError::MalformedScenario`] if the serialized step
/// graph is not parseable.
pub fn parse_scenario(record: &ScenarioRecord) -> Result<Scenario, EngineError> {
    let steps: Vec<Step> =
        serde_json::from_str(&record.steps).map_err(|e| EngineError::MalformedScenario {
            id: record.id.clone(),
            reason: e.to_string(),
        })?;
    Ok(Scenario::new(record.id.clone(), record.title.clone(), steps))
}

/// Bulk-load scenarios, skipping malformed records.
pub fn load_scenarios(records: &[ScenarioRecord]) -> Vec<Scenario> {
    let mut scenarios = Vec::with_capacity(records.len());
    for record in records {
        match parse_scenario(record) {
            Ok(s) => scenarios.push(s),
            Err(e) => {
                tracing::warn!("skipping scenario record '{}': {e}", record.id);
            }
        }
    }
    scenarios
}

fn convert_question(record: &QuestionRecord) -> Result<Question, String> {
    let correct: AnswerKey = record.correct_answer.parse()?;
    Ok(Question {
        id: record.id.clone(),
        prompt: record.question.clone(),
        choices: [
            record.option_a.clone(),
            record.option_b.clone(),
            record.option_c.clone(),
            record.option_d.clone(),
        ],
        correct,
    })
}

/// Bulk-convert question records, skipping ones with an unusable answer key.
pub fn parse_questions(records: &[QuestionRecord]) -> Vec<Question> {
    let mut questions = Vec::with_capacity(records.len());
    for record in records {
        match convert_question(record) {
            Ok(q) => questions.push(q),
            Err(reason) => {
                tracing::warn!("skipping question record '{}': {reason}", record.id);
            }
        }
    }
    questions
}

/// Seed-file shape: steps inline rather than serialized.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileScenario {
    scenario_id: String,
    #[serde(default)]
    title: Option<String>,
    steps: Vec<Step>,
}

/// Seed-file shape for questions: document ID plus attribute payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileQuestion {
    document_id: String,
    data: FileQuestionData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileQuestionData {
    question: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
}

/// Load scenarios from a local JSON seed file (an array of scenario
/// objects with inline steps).
pub fn load_scenario_file(path: &Path) -> Result<Vec<Scenario>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read scenario file: {}", path.display()))?;
    load_scenario_str(&content, path)
}

/// Parse a scenario seed file from a string (useful for testing).
pub fn load_scenario_str(content: &str, source_path: &Path) -> Result<Vec<Scenario>> {
    let parsed: Vec<FileScenario> = serde_json::from_str(content)
        .with_context(|| format!("failed to parse scenario JSON: {}", source_path.display()))?;

    Ok(parsed
        .into_iter()
        .map(|s| {
            let title = s
                .title
                .unwrap_or_else(|| format!("Scenario {}", s.scenario_id));
            Scenario::new(s.scenario_id, title, s.steps)
        })
        .collect())
}

/// Load question records from a local JSON seed file.
pub fn load_question_file(path: &Path) -> Result<Vec<QuestionRecord>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question file: {}", path.display()))?;
    let parsed: Vec<FileQuestion> = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse question JSON: {}", path.display()))?;

    Ok(parsed
        .into_iter()
        .map(|q| QuestionRecord {
            id: q.document_id,
            question: q.data.question,
            option_a: q.data.option_a,
            option_b: q.data.option_b,
            option_c: q.data.option_c,
            option_d: q.data.option_d,
            correct_answer: q.data.correct_answer,
        })
        .collect())
}

/// Load all `.json` scenario seed files from a directory.
pub fn load_scenario_directory(dir: &Path) -> Result<Vec<Scenario>> {
    let mut scenarios = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    for entry in
        std::fs::read_dir(dir).with_context(|| format!("failed to read directory: {}", dir.display()))?
    {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            scenarios.extend(load_scenario_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "json") {
            match load_scenario_file(&path) {
                Ok(s) => scenarios.extend(s),
                Err(e) => {
                    tracing::warn!("skipping {}: {e}", path.display());
                }
            }
        }
    }

    Ok(scenarios)
}

/// A warning from scenario validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The scenario the warning belongs to.
    pub scenario_id: String,
    /// The step it concerns, if any.
    pub step_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Validate a scenario's step graph for common authoring mistakes.
///
/// Dead ends and unresolved references are legal at runtime (they end the
/// session), so everything here is a warning rather than an error. A
/// missing entry step still gets flagged: that scenario cannot be started.
pub fn validate_scenario(scenario: &Scenario) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();
    let warn = |step_id: Option<&str>, message: String| ValidationWarning {
        scenario_id: scenario.id.clone(),
        step_id: step_id.map(str::to_string),
        message,
    };

    if scenario.entry_step().is_none() {
        warnings.push(warn(
            None,
            format!("no entry step '{ENTRY_STEP_ID}'; scenario cannot be started"),
        ));
    }

    let mut seen_steps = std::collections::HashSet::new();
    for step in scenario.steps() {
        if !seen_steps.insert(&step.step_id) {
            warnings.push(warn(
                Some(step.step_id.as_str()),
                format!("duplicate step ID: {}", step.step_id),
            ));
        }

        if step.options.is_empty() {
            warnings.push(warn(
                Some(step.step_id.as_str()),
                "step has no options; a session reaching it cannot proceed".into(),
            ));
        }

        let mut seen_options = std::collections::HashSet::new();
        for option in &step.options {
            if !seen_options.insert(&option.option_id) {
                warnings.push(warn(
                    Some(step.step_id.as_str()),
                    format!("duplicate option ID: {}", option.option_id),
                ));
            }
            if let Some(next) = &option.next_step_id {
                if scenario.step(next).is_none() {
                    warnings.push(warn(
                        Some(step.step_id.as_str()),
                        format!(
                            "option '{}' references unknown step '{next}' (session will end there)",
                            option.option_id
                        ),
                    ));
                }
            }
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const VALID_SEED: &str = r#"[
      {
        "scenarioId": "cardiac-arrest",
        "title": "Cardiac Arrest",
        "steps": [
          {
            "stepId": "step1",
            "text": "You arrive on scene. The patient is unresponsive.",
            "options": [
              {"optionId": "a", "text": "Check for a pulse", "points": 10, "nextStepId": "step2"},
              {"optionId": "b", "text": "Leave the scene", "points": 0, "isAutoFail": true}
            ]
          },
          {
            "stepId": "step2",
            "text": "No pulse detected.",
            "options": [
              {"optionId": "a", "text": "Begin compressions", "points": 10}
            ]
          }
        ]
      }
    ]"#;

    fn record(id: &str, steps: &str) -> ScenarioRecord {
        ScenarioRecord {
            id: id.into(),
            title: format!("Scenario {id}"),
            steps: steps.into(),
        }
    }

    #[test]
    fn parse_scenario_from_serialized_steps() {
        let steps = r#"[{"stepId":"step1","text":"Scene","options":[{"optionId":"a","text":"Act","points":5,"nextStepId":null,"isAutoFail":false}]}]"#;
        let scenario = parse_scenario(&record("s1", steps)).unwrap();
        assert_eq!(scenario.id, "s1");
        assert!(scenario.entry_step().is_some());
        assert_eq!(scenario.steps()[0].options[0].points, 5);
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let err = parse_scenario(&record("bad", "not json at all")).unwrap_err();
        assert!(matches!(err, EngineError::MalformedScenario { .. }));
        assert!(err.is_skippable());
    }

    #[test]
    fn bulk_load_skips_malformed_records() {
        let records = vec![
            record("ok", r#"[{"stepId":"step1","text":"t","options":[]}]"#),
            record("bad", "{{{{"),
            record("also-ok", "[]"),
        ];
        let scenarios = load_scenarios(&records);
        assert_eq!(scenarios.len(), 2);
        assert_eq!(scenarios[0].id, "ok");
        assert_eq!(scenarios[1].id, "also-ok");
    }

    #[test]
    fn seed_file_parses_with_default_title() {
        let json = r#"[{"scenarioId": "s9", "steps": []}]"#;
        let scenarios = load_scenario_str(json, &PathBuf::from("seed.json")).unwrap();
        assert_eq!(scenarios[0].title, "Scenario s9");
    }

    #[test]
    fn seed_file_roundtrip_through_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scenarios.json");
        std::fs::write(&path, VALID_SEED).unwrap();

        let scenarios = load_scenario_directory(dir.path()).unwrap();
        assert_eq!(scenarios.len(), 1);
        assert_eq!(scenarios[0].id, "cardiac-arrest");
        assert_eq!(scenarios[0].steps().len(), 2);
    }

    #[test]
    fn questions_with_bad_answer_keys_are_skipped() {
        let ok = QuestionRecord {
            id: "q1".into(),
            question: "Normal adult respiratory rate?".into(),
            option_a: "4-8".into(),
            option_b: "12-20".into(),
            option_c: "30-40".into(),
            option_d: "60+".into(),
            correct_answer: "B".into(),
        };
        let mut bad = ok.clone();
        bad.id = "q2".into();
        bad.correct_answer = "E".into();

        let questions = parse_questions(&[ok, bad]);
        assert_eq!(questions.len(), 1);
        assert_eq!(questions[0].correct, AnswerKey::B);
    }

    #[test]
    fn validate_flags_missing_entry_and_dangling_refs() {
        let steps = r#"[
          {"stepId":"intro","text":"t","options":[
            {"optionId":"a","text":"go","points":0,"nextStepId":"ghost"},
            {"optionId":"a","text":"dup","points":0}
          ]},
          {"stepId":"empty","text":"t","options":[]}
        ]"#;
        let scenario = parse_scenario(&record("s1", steps)).unwrap();
        let warnings = validate_scenario(&scenario);

        assert!(warnings.iter().any(|w| w.message.contains("no entry step")));
        assert!(warnings.iter().any(|w| w.message.contains("ghost")));
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("duplicate option ID")));
        assert!(warnings.iter().any(|w| w.message.contains("no options")));
    }

    #[test]
    fn validate_clean_scenario_has_no_warnings() {
        let scenarios = load_scenario_str(VALID_SEED, &PathBuf::from("seed.json")).unwrap();
        assert!(validate_scenario(&scenarios[0]).is_empty());
    }
}

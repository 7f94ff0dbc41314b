//! Core data model types for emtprep.
//!
//! These are the fundamental types the entire system uses to represent
//! branching scenarios, multiple-choice questions, and score records.
//! Field names follow the hosted store's document attributes (camelCase)
//! so the wire shapes deserialize directly.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The step every scenario traversal begins at.
pub const ENTRY_STEP_ID: &str = "step1";

/// A choice within a step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepOption {
    /// Identifier unique within the step (first match wins on duplicates).
    pub option_id: String,
    /// Text shown to the user.
    pub text: String,
    /// Points awarded (or deducted) when this option is confirmed.
    pub points: i32,
    /// Step to move to next; `None` ends the scenario.
    #[serde(default)]
    pub next_step_id: Option<String>,
    /// Whether confirming this option immediately fails the scenario.
    #[serde(default)]
    pub is_auto_fail: bool,
}

/// A node in the scenario graph: situation text plus the available choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// Identifier unique within the scenario.
    pub step_id: String,
    /// Situation text shown to the user.
    pub text: String,
    /// The choices offered at this step.
    #[serde(default)]
    pub options: Vec<StepOption>,
}

/// A named branching exercise composed of steps.
///
/// The step index is built once at construction; lookups return an
/// explicit `None` for unknown IDs rather than panicking. Scenarios are
/// immutable after load.
#[derive(Debug, Clone)]
pub struct Scenario {
    /// Identifier from the store document.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    steps: Vec<Step>,
    index: HashMap<String, usize>,
}

impl Scenario {
    /// Build a scenario from parsed steps. Duplicate `stepId`s keep the
    /// first occurrence.
    pub fn new(id: impl Into<String>, title: impl Into<String>, steps: Vec<Step>) -> Self {
        let mut index = HashMap::with_capacity(steps.len());
        for (i, step) in steps.iter().enumerate() {
            index.entry(step.step_id.clone()).or_insert(i);
        }
        Self {
            id: id.into(),
            title: title.into(),
            steps,
            index,
        }
    }

    /// Look up a step by ID.
    pub fn step(&self, step_id: &str) -> Option<&Step> {
        self.index.get(step_id).map(|&i| &self.steps[i])
    }

    /// The designated entry step, if the scenario has one.
    pub fn entry_step(&self) -> Option<&Step> {
        self.step(ENTRY_STEP_ID)
    }

    /// All steps, in load order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

/// Raw scenario document as listed by the store; `steps` holds the
/// serialized step graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub steps: String,
}

/// Answer label for a multiple-choice question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnswerKey {
    A,
    B,
    C,
    D,
}

impl AnswerKey {
    /// All keys in display order.
    pub const ALL: [AnswerKey; 4] = [AnswerKey::A, AnswerKey::B, AnswerKey::C, AnswerKey::D];
}

impl fmt::Display for AnswerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerKey::A => write!(f, "A"),
            AnswerKey::B => write!(f, "B"),
            AnswerKey::C => write!(f, "C"),
            AnswerKey::D => write!(f, "D"),
        }
    }
}

impl FromStr for AnswerKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(AnswerKey::A),
            "B" => Ok(AnswerKey::B),
            "C" => Ok(AnswerKey::C),
            "D" => Ok(AnswerKey::D),
            other => Err(format!("unknown answer key: {other}")),
        }
    }
}

/// Raw question document as stored (one attribute per choice).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    pub question: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_answer: String,
}

/// A multiple-choice question ready for a quiz session.
#[derive(Debug, Clone)]
pub struct Question {
    /// Store document ID.
    pub id: String,
    /// The question text.
    pub prompt: String,
    /// Choice text in A, B, C, D order.
    pub choices: [String; 4],
    /// The correct answer.
    pub correct: AnswerKey,
}

impl Question {
    /// Text of the choice behind a key.
    pub fn choice(&self, key: AnswerKey) -> &str {
        match key {
            AnswerKey::A => &self.choices[0],
            AnswerKey::B => &self.choices[1],
            AnswerKey::C => &self.choices[2],
            AnswerKey::D => &self.choices[3],
        }
    }
}

/// An append-only score record written to the store after a completed
/// test or scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    /// The test or scenario this score belongs to.
    pub test_id: String,
    /// Percentage for quizzes, accumulated points for scenarios.
    pub score: f64,
    /// When the score was achieved.
    pub timestamp: DateTime<Utc>,
    /// Who achieved it, if a username was set.
    #[serde(default)]
    pub username: Option<String>,
}

//! In-memory store for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use emtprep_core::model::{QuestionRecord, ScenarioRecord, ScoreRecord};
use emtprep_core::traits::{QuestionStore, ScenarioStore, ScoreQuery, ScoreStore};

/// An in-memory implementation of all store traits, for exercising the
/// engines and CLI without a network.
#[derive(Default)]
pub struct MemoryStore {
    scenarios: Mutex<Vec<ScenarioRecord>>,
    questions: Mutex<Vec<QuestionRecord>>,
    scores: Mutex<Vec<ScoreRecord>>,
    call_count: AtomicU32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the scenario collection.
    pub fn with_scenarios(scenarios: Vec<ScenarioRecord>) -> Self {
        Self {
            scenarios: Mutex::new(scenarios),
            ..Self::default()
        }
    }

    /// Pre-populate the question collection.
    pub fn with_questions(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions: Mutex::new(questions),
            ..Self::default()
        }
    }

    /// Number of store calls made so far.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Snapshot of the submitted scores.
    pub fn scores(&self) -> Vec<ScoreRecord> {
        self.scores.lock().unwrap().clone()
    }

    fn record_call(&self) {
        self.call_count.fetch_add(1, Ordering::Relaxed);
    }
}

#[async_trait]
impl ScenarioStore for MemoryStore {
    async fn list_scenarios(&self) -> anyhow::Result<Vec<ScenarioRecord>> {
        self.record_call();
        Ok(self.scenarios.lock().unwrap().clone())
    }

    async fn put_scenario(&self, record: &ScenarioRecord) -> anyhow::Result<()> {
        self.record_call();
        self.scenarios.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl QuestionStore for MemoryStore {
    async fn list_questions(&self) -> anyhow::Result<Vec<QuestionRecord>> {
        self.record_call();
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn put_question(&self, record: &QuestionRecord) -> anyhow::Result<()> {
        self.record_call();
        self.questions.lock().unwrap().push(record.clone());
        Ok(())
    }
}

#[async_trait]
impl ScoreStore for MemoryStore {
    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<()> {
        self.record_call();
        self.scores.lock().unwrap().push(record.clone());
        Ok(())
    }

    async fn list_scores(&self, query: &ScoreQuery) -> anyhow::Result<Vec<ScoreRecord>> {
        self.record_call();
        let mut scores: Vec<ScoreRecord> = self
            .scores
            .lock()
            .unwrap()
            .iter()
            .filter(|s| {
                query
                    .test_id
                    .as_ref()
                    .is_none_or(|test_id| &s.test_id == test_id)
            })
            .cloned()
            .collect();
        scores.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        Ok(scores)
    }
}

//! Store trait definitions.
//!
//! These async traits are implemented by the `emtprep-store` crate against
//! the hosted document store, and by its in-memory mock for tests. Each
//! call is a single request/response: no streaming, no retries. A failed
//! load surfaces to the caller, who logs it and proceeds with an empty
//! list.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{QuestionRecord, ScenarioRecord, ScoreRecord};

/// Read access to the scenario collection.
#[async_trait]
pub trait ScenarioStore: Send + Sync {
    /// List all scenario documents. The `steps` field of each record is
    /// still serialized; feed the result to `parser::load_scenarios`.
    async fn list_scenarios(&self) -> anyhow::Result<Vec<ScenarioRecord>>;

    /// Insert one scenario document (seeding).
    async fn put_scenario(&self, record: &ScenarioRecord) -> anyhow::Result<()>;
}

/// Read access to the question collection.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    async fn list_questions(&self) -> anyhow::Result<Vec<QuestionRecord>>;

    /// Insert one question document (seeding).
    async fn put_question(&self, record: &QuestionRecord) -> anyhow::Result<()>;
}

/// Filter for listing scores.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreQuery {
    /// Restrict to one test or scenario.
    pub test_id: Option<String>,
}

impl ScoreQuery {
    pub fn for_test(test_id: impl Into<String>) -> Self {
        Self {
            test_id: Some(test_id.into()),
        }
    }
}

/// Append-only score collection.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    /// Append one score record.
    async fn submit_score(&self, record: &ScoreRecord) -> anyhow::Result<()>;

    /// List scores matching `query`, highest score first.
    async fn list_scores(&self, query: &ScoreQuery) -> anyhow::Result<Vec<ScoreRecord>>;
}

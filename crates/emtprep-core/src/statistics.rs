//! Leaderboard aggregation over score records.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ScoreRecord;

/// Bucket for records submitted without a username.
pub const ANONYMOUS: &str = "anonymous";

/// One leaderboard row: a user's best result on a test.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub username: String,
    /// Best score across all attempts.
    pub best: f64,
    /// Total attempts.
    pub attempts: usize,
    /// Timestamp of the most recent attempt.
    pub latest: DateTime<Utc>,
    /// Timestamp of the attempt that set `best`.
    pub best_at: DateTime<Utc>,
}

/// Aggregate score records (already filtered to one test) into a
/// best-first leaderboard. Ties go to whoever achieved the score first.
pub fn leaderboard(records: &[ScoreRecord]) -> Vec<LeaderboardEntry> {
    let mut by_user: HashMap<&str, LeaderboardEntry> = HashMap::new();

    for record in records {
        let username = record.username.as_deref().unwrap_or(ANONYMOUS);
        let entry = by_user
            .entry(username)
            .or_insert_with(|| LeaderboardEntry {
                username: username.to_string(),
                best: record.score,
                attempts: 0,
                latest: record.timestamp,
                best_at: record.timestamp,
            });
        entry.attempts += 1;
        if record.timestamp > entry.latest {
            entry.latest = record.timestamp;
        }
        if record.score > entry.best
            || (record.score == entry.best && record.timestamp < entry.best_at)
        {
            entry.best = record.score;
            entry.best_at = record.timestamp;
        }
    }

    let mut entries: Vec<LeaderboardEntry> = by_user.into_values().collect();
    entries.sort_by(|a, b| {
        b.best
            .partial_cmp(&a.best)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.best_at.cmp(&b.best_at))
    });
    entries
}

/// Per-test rollup for the scores overview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub test_id: String,
    pub attempts: usize,
    pub mean: f64,
    pub best: f64,
}

/// Summarize records across all tests, sorted by test ID.
pub fn summarize(records: &[ScoreRecord]) -> Vec<TestSummary> {
    let mut by_test: HashMap<&str, Vec<f64>> = HashMap::new();
    for record in records {
        by_test
            .entry(record.test_id.as_str())
            .or_default()
            .push(record.score);
    }

    let mut summaries: Vec<TestSummary> = by_test
        .into_iter()
        .map(|(test_id, scores)| {
            let attempts = scores.len();
            let mean = scores.iter().sum::<f64>() / attempts as f64;
            let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            TestSummary {
                test_id: test_id.to_string(),
                attempts,
                mean,
                best,
            }
        })
        .collect();

    summaries.sort_by(|a, b| a.test_id.cmp(&b.test_id));
    summaries
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(test: &str, user: Option<&str>, score: f64, day: u32) -> ScoreRecord {
        ScoreRecord {
            test_id: test.into(),
            score,
            timestamp: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
            username: user.map(str::to_string),
        }
    }

    #[test]
    fn leaderboard_keeps_best_per_user() {
        let records = vec![
            record("test1", Some("dana"), 60.0, 1),
            record("test1", Some("dana"), 80.0, 2),
            record("test1", Some("kim"), 100.0, 3),
            record("test1", Some("dana"), 40.0, 4),
        ];
        let board = leaderboard(&records);
        assert_eq!(board.len(), 2);
        assert_eq!(board[0].username, "kim");
        assert_eq!(board[0].best, 100.0);
        assert_eq!(board[1].username, "dana");
        assert_eq!(board[1].best, 80.0);
        assert_eq!(board[1].attempts, 3);
    }

    #[test]
    fn ties_go_to_the_earlier_achiever() {
        let records = vec![
            record("test1", Some("late"), 90.0, 5),
            record("test1", Some("early"), 90.0, 2),
        ];
        let board = leaderboard(&records);
        assert_eq!(board[0].username, "early");
    }

    #[test]
    fn missing_usernames_aggregate_as_anonymous() {
        let records = vec![
            record("test1", None, 50.0, 1),
            record("test1", None, 70.0, 2),
        ];
        let board = leaderboard(&records);
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].username, ANONYMOUS);
        assert_eq!(board[0].best, 70.0);
        assert_eq!(board[0].attempts, 2);
    }

    #[test]
    fn summary_rolls_up_per_test() {
        let records = vec![
            record("test1", Some("a"), 100.0, 1),
            record("test1", Some("b"), 50.0, 2),
            record("test2", Some("a"), 20.0, 3),
        ];
        let summaries = summarize(&records);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].test_id, "test1");
        assert_eq!(summaries[0].attempts, 2);
        assert_eq!(summaries[0].mean, 75.0);
        assert_eq!(summaries[0].best, 100.0);
        assert_eq!(summaries[1].test_id, "test2");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(leaderboard(&[]).is_empty());
        assert!(summarize(&[]).is_empty());
    }
}

//! Multiple-choice quiz sessions.
//!
//! A quiz walks a fixed question list in order: select an answer, advance,
//! repeat. Grading happens on advance, and the terminal score is the
//! percentage of correct answers.

use crate::error::EngineError;
use crate::model::{AnswerKey, Question};

/// Where a quiz session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
    /// Questions remain.
    InProgress,
    /// All questions answered.
    Finished,
}

/// A defined test: a named window over the shared question list.
///
/// The question bank is stored as one flat collection; each test takes a
/// fixed slice of it.
#[derive(Debug, Clone)]
pub struct QuizDefinition {
    pub id: String,
    pub name: String,
    pub offset: usize,
    pub len: usize,
}

impl QuizDefinition {
    /// The built-in tests.
    pub fn builtin() -> Vec<QuizDefinition> {
        vec![
            QuizDefinition {
                id: "test1".into(),
                name: "Test 1".into(),
                offset: 0,
                len: 5,
            },
            QuizDefinition {
                id: "test2".into(),
                name: "Test 2".into(),
                offset: 5,
                len: 5,
            },
        ]
    }

    /// Look up a built-in test by ID.
    pub fn find(id: &str) -> Option<QuizDefinition> {
        Self::builtin().into_iter().find(|d| d.id == id)
    }

    /// Take this test's questions out of the full bank. Short banks yield
    /// a short (possibly empty) test.
    pub fn take(&self, bank: &[Question]) -> Vec<Question> {
        bank.iter()
            .skip(self.offset)
            .take(self.len)
            .cloned()
            .collect()
    }
}

/// One user working through one test.
#[derive(Debug)]
pub struct QuizSession {
    test_id: String,
    questions: Vec<Question>,
    current: usize,
    selected: Option<AnswerKey>,
    correct: usize,
}

impl QuizSession {
    /// Start a session over `questions`; errors on an empty list.
    pub fn start(test_id: impl Into<String>, questions: Vec<Question>) -> Result<Self, EngineError> {
        let test_id = test_id.into();
        if questions.is_empty() {
            return Err(EngineError::EmptyQuiz(test_id));
        }
        Ok(Self {
            test_id,
            questions,
            current: 0,
            selected: None,
            correct: 0,
        })
    }

    pub fn test_id(&self) -> &str {
        &self.test_id
    }

    pub fn state(&self) -> QuizState {
        if self.current >= self.questions.len() {
            QuizState::Finished
        } else {
            QuizState::InProgress
        }
    }

    /// The question awaiting an answer.
    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    /// Zero-based index of the current question, for progress display.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Record a tentative answer for the current question.
    pub fn select(&mut self, key: AnswerKey) {
        if self.state() == QuizState::InProgress {
            self.selected = Some(key);
        }
    }

    /// Grade the selected answer and advance.
    pub fn next(&mut self) -> Result<QuizState, EngineError> {
        if self.state() == QuizState::Finished {
            return Err(EngineError::SessionFinished);
        }
        let selected = self.selected.take().ok_or(EngineError::NoSelection)?;
        if selected == self.questions[self.current].correct {
            self.correct += 1;
        }
        self.current += 1;
        Ok(self.state())
    }

    pub fn correct_answers(&self) -> usize {
        self.correct
    }

    /// Percentage score, available once the quiz is finished.
    pub fn percentage(&self) -> Option<f64> {
        match self.state() {
            QuizState::Finished => {
                Some(self.correct as f64 / self.questions.len() as f64 * 100.0)
            }
            QuizState::InProgress => None,
        }
    }
}

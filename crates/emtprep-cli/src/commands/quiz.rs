//! The `emtprep quiz` command: take one multiple-choice test.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use emtprep_core::model::{AnswerKey, ScoreRecord};
use emtprep_core::parser;
use emtprep_core::profile::UserProfile;
use emtprep_core::quiz::{QuizDefinition, QuizSession, QuizState};
use emtprep_core::traits::{QuestionStore, ScoreStore};

pub async fn execute(
    test_id: String,
    file: Option<PathBuf>,
    answers: Option<String>,
    submit: bool,
    config_path: Option<PathBuf>,
    profile_path: Option<PathBuf>,
) -> Result<()> {
    let (_, store) = super::open_store(config_path.as_deref())?;

    let records = match &file {
        Some(path) => parser::load_question_file(path)?,
        None => match store.list_questions().await {
            Ok(records) => records,
            Err(e) => {
                tracing::error!("failed to fetch questions: {e:#}");
                Vec::new()
            }
        },
    };
    let bank = parser::parse_questions(&records);

    let definition = QuizDefinition::find(&test_id)
        .with_context(|| format!("unknown test '{test_id}'"))?;
    let questions = definition.take(&bank);

    let mut quiz = QuizSession::start(&test_id, questions)?;
    println!("=== {} ({} questions) ===\n", definition.name, quiz.total());

    match answers {
        Some(list) => run_scripted(&mut quiz, &list)?,
        None => run_interactive(&mut quiz)?,
    }

    let score = quiz
        .percentage()
        .context("test did not reach its last question")?;
    println!(
        "\nYou have completed the test! {}/{} correct — score: {score:.0}%",
        quiz.correct_answers(),
        quiz.total()
    );

    if submit {
        let profile = UserProfile::load(&super::profile_path(profile_path)?);
        let record = ScoreRecord {
            test_id,
            score,
            timestamp: Utc::now(),
            username: profile.username().map(str::to_string),
        };
        store
            .submit_score(&record)
            .await
            .context("failed to submit score")?;
        println!("Score submitted to the leaderboard.");
    }

    Ok(())
}

fn print_question(quiz: &QuizSession) {
    let Some(question) = quiz.current_question() else {
        return;
    };
    println!(
        "Question {}/{}: {}",
        quiz.position() + 1,
        quiz.total(),
        question.prompt
    );
    for key in AnswerKey::ALL {
        println!("  [{key}] {}", question.choice(key));
    }
}

fn run_scripted(quiz: &mut QuizSession, answers: &str) -> Result<()> {
    for answer in answers.split(',').map(str::trim) {
        print_question(quiz);
        let key: AnswerKey = answer
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{e}"))?;
        println!("> {key}\n");
        quiz.select(key);
        if quiz.next()? == QuizState::Finished {
            return Ok(());
        }
    }
    anyhow::bail!("ran out of answers before the test ended");
}

fn run_interactive(quiz: &mut QuizSession) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print_question(quiz);
        print!("\nYour answer: ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            anyhow::bail!("input ended before the test did");
        };
        let answer = line?;
        let Ok(key) = answer.parse::<AnswerKey>() else {
            println!("Answer with A, B, C, or D.\n");
            continue;
        };
        quiz.select(key);
        if quiz.next()? == QuizState::Finished {
            return Ok(());
        }
        println!();
    }
}

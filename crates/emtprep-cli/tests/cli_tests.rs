//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn emtprep() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("emtprep").unwrap()
}

#[test]
fn validate_seed_file() {
    emtprep()
        .arg("validate")
        .arg("--path")
        .arg("../../data/scenarios.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("Chest Pain Call"))
        .stdout(predicate::str::contains("Paediatric Seizure"))
        .stdout(predicate::str::contains("All scenarios valid"));
}

#[test]
fn validate_nonexistent_file() {
    emtprep()
        .arg("validate")
        .arg("--path")
        .arg("no_such_file.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_flags_missing_entry_step() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(
        &path,
        r#"[{"scenarioId": "broken", "title": "Broken", "steps": [
            {"stepId": "stepX", "text": "no entry", "options": [
                {"optionId": "a", "text": "A", "points": 0}
            ]}
        ]}]"#,
    )
    .unwrap();

    emtprep()
        .arg("validate")
        .arg("--path")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNING"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn scenarios_lists_from_file() {
    emtprep()
        .arg("scenarios")
        .arg("--file")
        .arg("../../data/scenarios.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("chest-pain"))
        .stdout(predicate::str::contains("paediatric-seizure"));
}

#[test]
fn run_scripted_to_completion() {
    emtprep()
        .arg("run")
        .arg("--scenario")
        .arg("chest-pain")
        .arg("--file")
        .arg("../../data/scenarios.json")
        .arg("--choices")
        .arg("assess,oxygen,cpr")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario complete!"))
        .stdout(predicate::str::contains("35 points"));
}

#[test]
fn run_scripted_auto_fail() {
    emtprep()
        .arg("run")
        .arg("--scenario")
        .arg("chest-pain")
        .arg("--file")
        .arg("../../data/scenarios.json")
        .arg("--choices")
        .arg("defer")
        .assert()
        .success()
        .stdout(predicate::str::contains("Scenario failed"));
}

#[test]
fn run_unknown_scenario() {
    emtprep()
        .arg("run")
        .arg("--scenario")
        .arg("does-not-exist")
        .arg("--file")
        .arg("../../data/scenarios.json")
        .arg("--choices")
        .arg("assess")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn run_rejects_unknown_choice() {
    emtprep()
        .arg("run")
        .arg("--scenario")
        .arg("chest-pain")
        .arg("--file")
        .arg("../../data/scenarios.json")
        .arg("--choices")
        .arg("bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an option"));
}

#[test]
fn quiz_scripted_perfect_score() {
    emtprep()
        .arg("quiz")
        .arg("--test")
        .arg("test1")
        .arg("--file")
        .arg("../../data/questions.json")
        .arg("--answers")
        .arg("B,C,C,B,C")
        .assert()
        .success()
        .stdout(predicate::str::contains("5/5 correct"))
        .stdout(predicate::str::contains("score: 100%"));
}

#[test]
fn quiz_scripted_partial_score() {
    emtprep()
        .arg("quiz")
        .arg("--test")
        .arg("test2")
        .arg("--file")
        .arg("../../data/questions.json")
        .arg("--answers")
        .arg("C,A,B,A,B")
        .assert()
        .success()
        .stdout(predicate::str::contains("4/5 correct"))
        .stdout(predicate::str::contains("score: 80%"));
}

#[test]
fn quiz_unknown_test() {
    emtprep()
        .arg("quiz")
        .arg("--test")
        .arg("test9")
        .arg("--file")
        .arg("../../data/questions.json")
        .arg("--answers")
        .arg("A")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown test"));
}

#[test]
fn guidelines_lists_sections() {
    emtprep()
        .arg("guidelines")
        .assert()
        .success()
        .stdout(predicate::str::contains("Paediatrics"))
        .stdout(predicate::str::contains("Trauma"));
}

#[test]
fn guidelines_lists_section_contents() {
    emtprep()
        .arg("guidelines")
        .arg("--section")
        .arg("14")
        .assert()
        .success()
        .stdout(predicate::str::contains("Trauma"))
        .stdout(predicate::str::contains("section14_cpg25"));
}

#[test]
fn guidelines_unknown_section() {
    emtprep()
        .arg("guidelines")
        .arg("--section")
        .arg("99")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown section"));
}

#[test]
fn login_and_logout() {
    let dir = TempDir::new().unwrap();
    let profile = dir.path().join("profile.toml");

    emtprep()
        .arg("login")
        .arg("--username")
        .arg("medic42")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as medic42"));

    emtprep()
        .arg("logout")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    // A second logout has nothing to clear.
    emtprep()
        .arg("logout")
        .arg("--profile")
        .arg(&profile)
        .assert()
        .success()
        .stdout(predicate::str::contains("No username set"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    emtprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created emtprep.toml"))
        .stdout(predicate::str::contains("Created data/scenarios.json"))
        .stdout(predicate::str::contains("Created data/questions.json"));

    assert!(dir.path().join("emtprep.toml").exists());
    assert!(dir.path().join("data/scenarios.json").exists());
    assert!(dir.path().join("data/questions.json").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    emtprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    emtprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_output_validates() {
    let dir = TempDir::new().unwrap();

    emtprep()
        .current_dir(dir.path())
        .arg("init")
        .assert()
        .success();

    emtprep()
        .current_dir(dir.path())
        .arg("validate")
        .arg("--path")
        .arg("data/scenarios.json")
        .assert()
        .success()
        .stdout(predicate::str::contains("All scenarios valid"));
}

#[test]
fn help_output() {
    emtprep()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("EMT study and scenario trainer"));
}

#[test]
fn version_output() {
    emtprep()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("emtprep"));
}

//! Integration tests for `reachy-lab lesson` driven through stdin.

use predicates::prelude::*;

use crate::helpers::Sandbox;

#[test]
fn test_lesson_exit_option_says_goodbye() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--fast"])
        .write_stdin("4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reachy: Hello! I'm Reachy."))
        .stdout(predicate::str::contains("Option 1"))
        .stdout(predicate::str::contains("See you next time!"));
}

#[test]
fn test_lesson_end_of_input_ends_politely() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--fast"])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("See you next time!"));
}

#[test]
fn test_lesson_single_level_plays_its_motion() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--fast"])
        .write_stdin("2\n1\nplasma\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1: The Foundation"))
        .stdout(predicate::str::contains("[Motion] gas_spin"));
}

#[test]
fn test_lesson_summary_counts_quiz_questions() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--fast"])
        .write_stdin("2\n1\nplasma\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Lesson finished: 1 level delivered, 1 of 1 answers correct",
        ))
        .stdout(predicate::str::contains("answered").not());
}

#[test]
fn test_lesson_summary_counts_revealed_answers() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--fast"])
        .write_stdin("2\n1\nrock\nmarble\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("The answer is: Glowing soup (plasma)."))
        .stdout(predicate::str::contains("0 of 1 answers correct"));
}

#[test]
fn test_lesson_question_mode_answers_from_faq() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--fast"])
        .write_stdin("3\ntopics\nback\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Reachy:"));
}

#[test]
fn test_lesson_knowledge_prints_digest_without_prompting() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--knowledge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Level 1: The Foundation"))
        .stdout(predicate::str::contains("Your choice").not());
}

#[test]
fn test_lesson_custom_course_replaces_builtin() {
    let sandbox = Sandbox::new();
    let course = sandbox.path().join("tiny.yaml");
    std::fs::write(
        &course,
        "title: Tiny\n\
         greeting: Welcome to the tiny course.\n\
         levels:\n\
         - title: Only level\n  \
           goal: Learn one thing.\n  \
           physics: Things fall.\n  \
           asks: What falls?\n  \
           correct_answer: things\n  \
           accepted_answers: [things]\n  \
           motion: gas_spin\n",
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["lesson", "--fast", "--course"])
        .arg(&course)
        .write_stdin("1\nthings\n4\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Welcome to the tiny course."))
        .stdout(predicate::str::contains("Only level"));
}

#[test]
fn test_lesson_missing_course_file_fails() {
    Sandbox::new()
        .cmd()
        .args(["lesson", "--course", "does-not-exist.yaml"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("cannot read"));
}

//! `reachy-lab lesson`: run the interactive lesson in the terminal.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;
use reachy_lesson::build_knowledge_base;

use crate::app::AppContext;
use crate::application::services::config_service;
use crate::application::services::lesson::{LessonSession, LessonSummary};
use crate::infra::assets::load_course;
use crate::infra::command_runner::TokioCommandRunner;
use crate::infra::input::{LineInput, interrupted};
use crate::infra::robot::ConsoleRobot;
use crate::infra::speech::{SpeechBackend, SystemSpeech};

/// Arguments for the lesson command.
#[derive(Args, Debug, Default)]
pub struct LessonArgs {
    /// Course file (YAML) to teach instead of the built-in solar-system course
    #[arg(long, value_name = "FILE")]
    pub course: Option<PathBuf>,

    /// Speak every line through the system synthesizer
    #[arg(long)]
    pub speak: bool,

    /// Skip pauses and motion durations
    #[arg(long)]
    pub fast: bool,

    /// Print the course's knowledge digest and exit
    #[arg(long)]
    pub knowledge: bool,
}

/// Run `reachy-lab lesson`.
///
/// # Errors
///
/// Returns an error if the course cannot be loaded or terminal I/O fails.
pub async fn run(app: &AppContext, args: LessonArgs) -> Result<ExitCode> {
    let course = load_course(args.course.as_deref())?;
    if args.knowledge {
        println!("{}", build_knowledge_base(&course));
        return Ok(ExitCode::SUCCESS);
    }

    let mut robot: ConsoleRobot<SystemSpeech<TokioCommandRunner>, _> =
        ConsoleRobot::new(std::io::stdout(), args.fast);
    if args.speak {
        let voice = config_service::load_config(&app.config_store)?.voice;
        let engine = SystemSpeech::new(TokioCommandRunner::default(), SpeechBackend::native());
        robot = robot.with_speech(engine, voice);
    }

    let mut input = LineInput::stdin();
    let summary = LessonSession::new(&course, &robot, &mut input)
        .run_until(interrupted())
        .await?;

    if !app.output.quiet {
        println!();
    }
    if summary.interrupted {
        app.output.warn("Interrupted by user.");
    }
    app.output.success(&summary_line(&summary));
    Ok(ExitCode::SUCCESS)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Closing line, e.g. "Lesson finished: 2 levels delivered, 1 of 2 answers correct".
fn summary_line(summary: &LessonSummary) -> String {
    let mut line = format!(
        "Lesson finished: {} delivered, {} of {} answers correct",
        plural(summary.levels_delivered, "level"),
        summary.correct_answers,
        summary.questions_asked
    );
    if summary.faq_answers > 0 {
        line.push_str(&format!(", {} answered", plural(summary.faq_answers, "question")));
    }
    line
}

//! Application service: interactive lesson session.
//!
//! Drives a `Course` through a `RobotAdapter` and reads replies from an
//! `InputSource`. End of input at any prompt, or an interrupt, ends the
//! session with the farewell line.

use std::time::Duration;

use anyhow::Result;
use reachy_lesson::{Course, LessonLevel, is_correct_answer, match_faq, normalize, parse_menu_choice};

use crate::application::ports::{InputSource, RobotAdapter};

const PAUSE_BETWEEN_LEVELS: Duration = Duration::from_millis(500);
const FAREWELL: &str = "Thanks for learning with me. See you next time!";
const FAQ_FALLBACK_TOPICS: usize = 5;

/// What happened during one session.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct LessonSummary {
    pub levels_delivered: usize,
    /// Quiz questions the user replied to.
    pub questions_asked: usize,
    pub correct_answers: usize,
    /// Free-form questions matched to an FAQ entry.
    pub faq_answers: usize,
    pub interrupted: bool,
}

enum Flow {
    Continue,
    End,
}

/// One lesson session over a course.
pub struct LessonSession<'a, R, I> {
    course: &'a Course,
    robot: &'a R,
    input: &'a mut I,
    summary: LessonSummary,
}

impl<'a, R: RobotAdapter, I: InputSource> LessonSession<'a, R, I> {
    pub fn new(course: &'a Course, robot: &'a R, input: &'a mut I) -> Self {
        Self {
            course,
            robot,
            input,
            summary: LessonSummary::default(),
        }
    }

    /// Greet, then serve the main menu until the user exits.
    ///
    /// # Errors
    ///
    /// Returns an error if the robot or the input source fails.
    pub async fn run(self) -> Result<LessonSummary> {
        self.run_until(std::future::pending::<()>()).await
    }

    /// Like [`run`](Self::run), but stops at the next await point once
    /// `interrupt` resolves. The farewell is still said.
    ///
    /// # Errors
    ///
    /// Returns an error if the robot or the input source fails.
    pub async fn run_until(mut self, interrupt: impl Future<Output = ()>) -> Result<LessonSummary> {
        let interrupted = tokio::select! {
            biased;
            () = interrupt => true,
            result = self.serve() => {
                result?;
                false
            }
        };
        self.summary.interrupted = interrupted;
        self.robot.say(FAREWELL).await?;
        Ok(self.summary)
    }

    async fn serve(&mut self) -> Result<()> {
        if !self.course.greeting.is_empty() {
            self.robot.say(&self.course.greeting).await?;
        }
        let menu = self.course.main_menu();
        let count = self.course.levels.len();

        loop {
            self.announce_menu().await?;
            let Some(raw) = self
                .prompt("Pick a number, or tell me what you'd like to do.", "Your choice > ")
                .await?
            else {
                break;
            };

            let flow = match parse_menu_choice(&raw, &menu) {
                Some(1) => {
                    self.robot
                        .say(&format!("Great! Let's run through all {count} levels."))
                        .await?;
                    self.run_all_levels().await?
                }
                Some(2) => self.run_single_level().await?,
                Some(3) => self.question_loop().await?,
                Some(4) => break,
                _ => {
                    self.robot
                        .say("I didn't catch that. Please say a number from 1 to 4, or describe what you'd like to do.")
                        .await?;
                    Flow::Continue
                }
            };
            if matches!(flow, Flow::End) {
                break;
            }
        }
        Ok(())
    }

    async fn announce_menu(&self) -> Result<()> {
        let count = self.course.levels.len();
        self.robot.say("What would you like to do?").await?;
        self.robot
            .say(&format!("Option 1: Run full lesson, levels 1 through {count}."))
            .await?;
        self.robot.say("Option 2: Run a single level.").await?;
        self.robot.say("Option 3: Ask a question.").await?;
        self.robot.say("Option 4: Exit.").await
    }

    /// Say `spoken`, then read a line shown with `prompt`.
    async fn prompt(&mut self, spoken: &str, prompt: &str) -> Result<Option<String>> {
        self.robot.say(spoken).await?;
        Ok(self.input.read_line(prompt).await?.map(|s| s.trim().to_string()))
    }

    async fn run_all_levels(&mut self) -> Result<Flow> {
        let course = self.course;
        for level in &course.levels {
            if let Flow::End = self.deliver_level(level).await? {
                return Ok(Flow::End);
            }
            self.robot.wait(PAUSE_BETWEEN_LEVELS).await;
        }
        self.robot
            .say(&format!(
                "Great job completing all {} levels!",
                course.levels.len()
            ))
            .await?;
        Ok(Flow::Continue)
    }

    async fn run_single_level(&mut self) -> Result<Flow> {
        let course = self.course;
        self.robot.say("Pick a level:").await?;
        for (i, level) in course.levels.iter().enumerate() {
            self.robot
                .say(&format!("Level {}: {}", i + 1, level.title))
                .await?;
        }
        let Some(raw) = self
            .prompt("Which level would you like?", "Level number > ")
            .await?
        else {
            return Ok(Flow::End);
        };

        match parse_menu_choice(&raw, &course.level_menu()).and_then(|n| course.level(n)) {
            Some(level) => self.deliver_level(level).await,
            None => {
                self.robot
                    .say("I didn't recognise that level. Let's go back to the menu.")
                    .await?;
                Ok(Flow::Continue)
            }
        }
    }

    async fn deliver_level(&mut self, level: &LessonLevel) -> Result<Flow> {
        self.robot.say(&level.title).await?;
        self.robot.say(&level.goal).await?;
        self.robot.say(&level.physics).await?;
        if let Flow::End = self.ask_and_answer(level).await? {
            return Ok(Flow::End);
        }

        let duration = Duration::try_from_secs_f64(level.motion_duration_s).unwrap_or_default();
        self.robot
            .motion(&level.motion, &level.motion_cue, duration)
            .await?;
        for fact in &level.extra_facts {
            self.robot.say(&format!("Bonus fact: {fact}")).await?;
        }
        self.summary.levels_delivered += 1;
        Ok(Flow::Continue)
    }

    async fn ask_and_answer(&mut self, level: &LessonLevel) -> Result<Flow> {
        let reveal = format!("The answer is: {}", level.correct_answer);
        self.robot.say(&level.asks).await?;

        let Some(answer) = self.prompt("What do you think?", "Your answer > ").await? else {
            return Ok(Flow::End);
        };
        self.summary.questions_asked += 1;
        if answer.is_empty() {
            self.robot.say(&reveal).await?;
            return Ok(Flow::Continue);
        }
        if is_correct_answer(&answer, &level.accepted_answers) {
            return self.praise().await;
        }

        self.robot.say("Not quite. Try one more time.").await?;
        let Some(retry) = self.prompt("Give it another try.", "Your answer > ").await? else {
            return Ok(Flow::End);
        };
        if !retry.is_empty() && is_correct_answer(&retry, &level.accepted_answers) {
            return self.praise().await;
        }
        self.robot.say(&reveal).await?;
        Ok(Flow::Continue)
    }

    async fn praise(&mut self) -> Result<Flow> {
        self.summary.correct_answers += 1;
        self.robot.say("Nice! You got it.").await?;
        Ok(Flow::Continue)
    }

    async fn question_loop(&mut self) -> Result<Flow> {
        let course = self.course;
        self.robot
            .say("Ask me anything about the Sun or the solar system!")
            .await?;
        self.robot
            .say("Say 'topics' for suggestions, or 'back' to return to the menu.")
            .await?;

        let mut spoken = "Go ahead, ask me something!";
        loop {
            let Some(question) = self.prompt(spoken, "Your question > ").await? else {
                return Ok(Flow::End);
            };
            spoken = "Any other questions?";

            // Punctuation-only input normalizes to nothing; it still goes to the FAQ.
            if question.is_empty() {
                self.robot
                    .say("I didn't hear anything. Try again, or say 'back' to return to the menu.")
                    .await?;
                continue;
            }

            match normalize(&question).as_str() {
                "back" | "exit" | "quit" | "menu" => {
                    self.robot.say("Okay, let's go back to the menu.").await?;
                    return Ok(Flow::Continue);
                }
                "topics" | "help" => {
                    self.robot
                        .say(&format!(
                            "Here are some topics you can ask about: {}",
                            course.suggested_topics.join(", ")
                        ))
                        .await?;
                }
                _ => match match_faq(&course.faq, &question) {
                    Some(entry) => {
                        self.summary.faq_answers += 1;
                        self.robot.say(&entry.response).await?;
                    }
                    None => {
                        let topics: Vec<&str> = course
                            .suggested_topics
                            .iter()
                            .take(FAQ_FALLBACK_TOPICS)
                            .map(String::as_str)
                            .collect();
                        self.robot
                            .say(&format!(
                                "I'm not sure about that one. Try asking about: {}",
                                topics.join(", ")
                            ))
                            .await?;
                    }
                },
            }
        }
    }
}

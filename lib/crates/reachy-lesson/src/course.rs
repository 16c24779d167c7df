use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::motion::MotionId;

/// One level of the lesson: explanation, a question, and a motion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonLevel {
    pub title: String,
    pub goal: String,
    pub physics: String,
    /// Question the robot asks the group.
    pub asks: String,
    /// Answer revealed when nobody gets it right.
    pub correct_answer: String,
    #[serde(default)]
    pub accepted_answers: Vec<String>,
    pub motion: MotionId,
    /// Human description of the motion, shown by adapters that cannot move.
    #[serde(default)]
    pub motion_cue: String,
    #[serde(default = "default_motion_duration")]
    pub motion_duration_s: f64,
    #[serde(default)]
    pub extra_facts: Vec<String>,
}

fn default_motion_duration() -> f64 {
    2.0
}

/// A canned answer selected by keyword overlap with a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaEntry {
    pub keywords: Vec<String>,
    pub response: String,
}

/// A phrase that selects a numbered menu choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuKeyword {
    pub phrase: String,
    pub choice: u32,
}

impl MenuKeyword {
    #[must_use]
    pub fn new(phrase: &str, choice: u32) -> Self {
        Self {
            phrase: phrase.to_string(),
            choice,
        }
    }
}

/// Complete lesson content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    #[serde(default)]
    pub greeting: String,
    pub levels: Vec<LessonLevel>,
    #[serde(default)]
    pub faq: Vec<QaEntry>,
    #[serde(default)]
    pub suggested_topics: Vec<String>,
    /// Phrases for the main menu; choices are 1 (all levels), 2 (one level),
    /// 3 (questions) and 4 (exit).
    #[serde(default)]
    pub menu_keywords: Vec<MenuKeyword>,
    /// Phrases selecting a level by its 1-based position.
    #[serde(default)]
    pub level_keywords: Vec<MenuKeyword>,
}

/// Number of entries in the main menu.
pub const MAIN_MENU_CHOICES: u32 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CourseError {
    #[error("course has no levels")]
    NoLevels,

    #[error("menu keyword '{phrase}' points at choice {choice}, expected 1-{max}")]
    MenuChoiceOutOfRange { phrase: String, choice: u32, max: u32 },

    #[error("level keyword '{phrase}' points at level {choice}, course has {max} levels")]
    LevelChoiceOutOfRange { phrase: String, choice: u32, max: u32 },

    #[error("level '{0}' has no accepted answers")]
    NoAcceptedAnswers(String),
}

impl Course {
    /// Check that the content is usable by a lesson session.
    pub fn validate(&self) -> Result<(), CourseError> {
        if self.levels.is_empty() {
            return Err(CourseError::NoLevels);
        }
        if let Some(level) = self.levels.iter().find(|l| l.accepted_answers.is_empty()) {
            return Err(CourseError::NoAcceptedAnswers(level.title.clone()));
        }
        for k in &self.menu_keywords {
            if !(1..=MAIN_MENU_CHOICES).contains(&k.choice) {
                return Err(CourseError::MenuChoiceOutOfRange {
                    phrase: k.phrase.clone(),
                    choice: k.choice,
                    max: MAIN_MENU_CHOICES,
                });
            }
        }
        let level_count = u32::try_from(self.levels.len()).unwrap_or(u32::MAX);
        for k in &self.level_keywords {
            if k.choice == 0 || k.choice > level_count {
                return Err(CourseError::LevelChoiceOutOfRange {
                    phrase: k.phrase.clone(),
                    choice: k.choice,
                    max: level_count,
                });
            }
        }
        Ok(())
    }

    /// Main-menu keywords, with the bare choice numbers always accepted.
    #[must_use]
    pub fn main_menu(&self) -> Vec<MenuKeyword> {
        with_numbered_choices(&self.menu_keywords, MAIN_MENU_CHOICES)
    }

    /// Level keywords, with every level number always accepted.
    #[must_use]
    pub fn level_menu(&self) -> Vec<MenuKeyword> {
        let count = u32::try_from(self.levels.len()).unwrap_or(u32::MAX);
        with_numbered_choices(&self.level_keywords, count)
    }

    /// Look up a level by its 1-based number.
    #[must_use]
    pub fn level(&self, number: u32) -> Option<&LessonLevel> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        self.levels.get(idx)
    }
}

fn with_numbered_choices(keywords: &[MenuKeyword], count: u32) -> Vec<MenuKeyword> {
    let mut all = keywords.to_vec();
    for choice in 1..=count {
        if !all.iter().any(|k| k.choice == choice) {
            all.push(MenuKeyword::new(&choice.to_string(), choice));
        }
    }
    all
}

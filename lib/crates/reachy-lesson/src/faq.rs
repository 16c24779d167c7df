use std::collections::HashSet;
use std::fmt::Write as _;

use crate::course::{Course, QaEntry};
use crate::text::{normalize, tokenize};

/// Minimum score an entry needs before it is used as an answer.
const MIN_SCORE: u32 = 2;

/// Pick the FAQ entry whose keywords best cover `question`.
///
/// Each keyword scores 2 when all its words occur in the question and 1 when
/// it only occurs as a substring (e.g. "spot" inside "sunspots"). The highest
/// score wins, earlier entries win ties, and anything below 2 is no match.
#[must_use]
pub fn match_faq<'a>(entries: &'a [QaEntry], question: &str) -> Option<&'a QaEntry> {
    let tokens: HashSet<String> = tokenize(question).into_iter().collect();
    let text = normalize(question);

    let mut best: Option<(&QaEntry, u32)> = None;
    for entry in entries {
        let score: u32 = entry
            .keywords
            .iter()
            .map(|kw| {
                let kw_tokens: HashSet<String> = tokenize(kw).into_iter().collect();
                if kw_tokens.is_subset(&tokens) {
                    2
                } else if text.contains(kw.as_str()) {
                    1
                } else {
                    0
                }
            })
            .sum();
        if score > best.map_or(0, |(_, s)| s) {
            best = Some((entry, score));
        }
    }
    best.filter(|(_, score)| *score >= MIN_SCORE)
        .map(|(entry, _)| entry)
}

/// Flatten the course into a plain-text fact sheet.
#[must_use]
pub fn build_knowledge_base(course: &Course) -> String {
    let mut out = String::new();
    for level in &course.levels {
        let _ = writeln!(out, "{}", level.title);
        let _ = writeln!(out, "Goal: {}", level.goal);
        let _ = writeln!(out, "Physics: {}", level.physics);
        for fact in &level.extra_facts {
            let _ = writeln!(out, "Fact: {fact}");
        }
        out.push('\n');
    }
    out.push_str("Q&A Facts:\n");
    for entry in &course.faq {
        let _ = writeln!(out, "- {}", entry.response);
    }
    out.trim().to_string()
}

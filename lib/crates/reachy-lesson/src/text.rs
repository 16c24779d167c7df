//! Text normalisation and fuzzy matching for typed or transcribed replies.
//!
//! Speech recognisers return lowercase words without punctuation while typed
//! input can be anything, so every comparison goes through [`normalize`].

use std::collections::HashSet;

use crate::course::MenuKeyword;

/// Words a speech recogniser commonly returns for the digits 1–6.
const SPOKEN_NUMBERS: &[(&str, u32)] = &[
    ("one", 1),
    ("won", 1),
    ("want", 1),
    ("two", 2),
    ("to", 2),
    ("too", 2),
    ("three", 3),
    ("tree", 3),
    ("free", 3),
    ("four", 4),
    ("for", 4),
    ("fore", 4),
    ("five", 5),
    ("six", 6),
    ("sex", 6),
    ("sits", 6),
];

/// Lowercase `text`, drop everything except alphanumerics and whitespace,
/// and trim the ends.
#[must_use]
pub fn normalize(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split the normalised text on whitespace.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

fn token_set(text: &str) -> HashSet<String> {
    tokenize(text).into_iter().collect()
}

/// Decide whether `user` gave one of the `accepted` answers.
///
/// An answer matches when its normalised text appears inside the user's
/// normalised text, or when every one of its words appears among the user's
/// words in any order.
#[must_use]
pub fn is_correct_answer<S: AsRef<str>>(user: &str, accepted: &[S]) -> bool {
    let user_text = normalize(user);
    let user_tokens = token_set(user);
    accepted.iter().any(|answer| {
        let answer_text = normalize(answer.as_ref());
        if !answer_text.is_empty() && user_text.contains(&answer_text) {
            return true;
        }
        let answer_tokens = token_set(answer.as_ref());
        !answer_tokens.is_empty() && answer_tokens.is_subset(&user_tokens)
    })
}

/// Map typed or spoken input onto one of the choices named in `keywords`.
///
/// Tried in order: the exact digit of a valid choice, any word that is a
/// spoken number or digit for a valid choice, then the first keyword phrase
/// contained in the input.
#[must_use]
pub fn parse_menu_choice(raw: &str, keywords: &[MenuKeyword]) -> Option<u32> {
    let text = normalize(raw);
    if text.is_empty() {
        return None;
    }
    let valid = |choice: u32| keywords.iter().any(|k| k.choice == choice);

    if let Ok(choice) = text.parse::<u32>()
        && valid(choice)
    {
        return Some(choice);
    }

    for word in text.split_whitespace() {
        let digit = SPOKEN_NUMBERS
            .iter()
            .find(|(spoken, _)| *spoken == word)
            .map(|(_, d)| *d)
            .or_else(|| word.parse::<u32>().ok());
        if let Some(choice) = digit
            && valid(choice)
        {
            return Some(choice);
        }
    }

    keywords
        .iter()
        .find(|k| {
            let phrase = normalize(&k.phrase);
            !phrase.is_empty()
                && !phrase.chars().all(|c| c.is_ascii_digit())
                && text.contains(&phrase)
        })
        .map(|k| k.choice)
}

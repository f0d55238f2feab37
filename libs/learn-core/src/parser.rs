//! Bulk-import parser for pasted flashcard text.
//!
//! # Formats
//! Tried in this order; the first one that yields a card wins:
//! ```text
//! Q: What is Rust?          (Q:/A: blocks)
//! A: A systems language.
//!
//! Question | Answer         (pipe)
//! Question - Answer         (dash)
//! Question: Answer          (colon)
//! 1. Question - Answer      (numbered list)
//! ```
//!
//! The order matters for ambiguous lines: `Term: definition with - a dash`
//! is taken as a dash pair even though it also looks like a colon pair.

use crate::error::ImportError;
use crate::types::{ImportFormat, ParsedFlashcard};
use regex::Regex;
use std::sync::OnceLock;

/// Cards found in the text and the format that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    pub flashcards: Vec<ParsedFlashcard>,
    pub format: ImportFormat,
}

struct Patterns {
    question: Regex,
    answer: Regex,
    dash: Regex,
    colon: Regex,
    reserved_label: Regex,
    numbered: Regex,
}

impl Patterns {
    fn new() -> Self {
        Self {
            question: Regex::new(r"(?i)^Q:?\s*(.+)$").expect("Invalid regex"),
            answer: Regex::new(r"(?i)^A:?\s*(.+)$").expect("Invalid regex"),
            dash: Regex::new(r"^(.+?)\s*-\s*(.+)$").expect("Invalid regex"),
            colon: Regex::new(r"^(.+?):\s*(.+)$").expect("Invalid regex"),
            reserved_label: Regex::new(r"(?i)^(Q|A|Question|Answer)$").expect("Invalid regex"),
            numbered: Regex::new(r"^[0-9]+[.)]\s*(.+?)\s*[-:]\s*(.+)$").expect("Invalid regex"),
        }
    }
}

fn patterns() -> &'static Patterns {
    static PATTERNS: OnceLock<Patterns> = OnceLock::new();
    PATTERNS.get_or_init(Patterns::new)
}

/// Parse pasted text into flashcards.
pub fn parse_flashcards(text: &str) -> Result<ParseOutcome, ImportError> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let lines: Vec<&str> = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ImportError::NoContent);
    }

    for format in ImportFormat::ALL {
        let flashcards = parse_as(format, &lines);
        if !flashcards.is_empty() {
            tracing::debug!(format = format.label(), count = flashcards.len(), "detected import format");
            return Ok(ParseOutcome { flashcards, format });
        }
    }

    Err(ImportError::NoPairsDetected)
}

/// Run a single format's classifier over pre-trimmed, non-empty lines.
pub fn parse_as(format: ImportFormat, lines: &[&str]) -> Vec<ParsedFlashcard> {
    match format {
        ImportFormat::QuestionAnswer => parse_question_answer(lines),
        ImportFormat::Pipe => lines.iter().filter_map(|l| parse_pipe(l)).collect(),
        ImportFormat::Dash => lines.iter().filter_map(|l| parse_dash(l)).collect(),
        ImportFormat::Colon => lines.iter().filter_map(|l| parse_colon(l)).collect(),
        ImportFormat::Numbered => lines.iter().filter_map(|l| parse_numbered(l)).collect(),
    }
}

fn card(question: &str, answer: &str) -> ParsedFlashcard {
    ParsedFlashcard {
        question: question.trim().to_string(),
        answer: answer.trim().to_string(),
    }
}

fn parse_question_answer(lines: &[&str]) -> Vec<ParsedFlashcard> {
    let p = patterns();
    let mut cards = Vec::new();
    let mut question: Option<&str> = None;

    for line in lines {
        if let Some(caps) = p.question.captures(line) {
            question = caps.get(1).map(|m| m.as_str().trim());
        } else if let Some(caps) = p.answer.captures(line) {
            if let (Some(q), Some(a)) = (question.filter(|q| !q.is_empty()), caps.get(1)) {
                cards.push(card(q, a.as_str()));
                question = None;
            }
        }
    }

    cards
}

fn parse_pipe(line: &str) -> Option<ParsedFlashcard> {
    let (question, answer) = line.split_once('|')?;
    let (question, answer) = (question.trim(), answer.trim());
    (!question.is_empty() && !answer.is_empty()).then(|| card(question, answer))
}

fn parse_dash(line: &str) -> Option<ParsedFlashcard> {
    let caps = patterns().dash.captures(line)?;
    let question = caps.get(1)?.as_str().trim();
    let answer = caps.get(2)?.as_str().trim();
    (question.chars().count() > 2 && !answer.is_empty()).then(|| card(question, answer))
}

fn parse_colon(line: &str) -> Option<ParsedFlashcard> {
    let p = patterns();
    let caps = p.colon.captures(line)?;
    let question = caps.get(1)?.as_str().trim();
    let answer = caps.get(2)?.as_str().trim();
    let accepted = question.chars().count() > 3
        && !answer.is_empty()
        && !p.reserved_label.is_match(question);
    accepted.then(|| card(question, answer))
}

fn parse_numbered(line: &str) -> Option<ParsedFlashcard> {
    let caps = patterns().numbered.captures(line)?;
    let question = caps.get(1)?.as_str().trim();
    let answer = caps.get(2)?.as_str().trim();
    (!question.is_empty() && !answer.is_empty()).then(|| card(question, answer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(outcome: &ParseOutcome) -> Vec<(&str, &str)> {
        outcome
            .flashcards
            .iter()
            .map(|c| (c.question.as_str(), c.answer.as_str()))
            .collect()
    }

    #[test]
    fn parse_question_answer_blocks() {
        let input = "Q: What is Rust?\nA: A systems language.\n\nQ: Who made it?\nA: Mozilla";
        let outcome = parse_flashcards(input).unwrap();
        assert_eq!(outcome.format, ImportFormat::QuestionAnswer);
        assert_eq!(
            pairs(&outcome),
            vec![("What is Rust?", "A systems language."), ("Who made it?", "Mozilla")]
        );
    }

    #[test]
    fn answer_without_question_is_skipped() {
        let input = "A: orphan\nQ: Real question\nA: Real answer";
        let outcome = parse_flashcards(input).unwrap();
        assert_eq!(pairs(&outcome), vec![("Real question", "Real answer")]);
    }

    #[test]
    fn parse_pipe_keeps_extra_pipes_in_answer() {
        let outcome = parse_flashcards("bool | true | false\nunit | ()").unwrap();
        assert_eq!(outcome.format, ImportFormat::Pipe);
        assert_eq!(pairs(&outcome), vec![("bool", "true | false"), ("unit", "()")]);
    }

    #[test]
    fn parse_dash_lines() {
        let outcome = parse_flashcards("Hund - dog\nKatze - cat").unwrap();
        assert_eq!(outcome.format, ImportFormat::Dash);
        assert_eq!(pairs(&outcome), vec![("Hund", "dog"), ("Katze", "cat")]);
    }

    #[test]
    fn dash_requires_question_longer_than_two() {
        let lines = ["ab - too short", "abc - fine"];
        let cards = parse_as(ImportFormat::Dash, &lines);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "abc");
    }

    #[test]
    fn parse_colon_lines() {
        let outcome = parse_flashcards("Capital of France: Paris\nLargest planet: Jupiter").unwrap();
        assert_eq!(outcome.format, ImportFormat::Colon);
        assert_eq!(
            pairs(&outcome),
            vec![("Capital of France", "Paris"), ("Largest planet", "Jupiter")]
        );
    }

    #[test]
    fn colon_rejects_reserved_labels_and_short_terms() {
        let lines = ["Answer: nope", "abc: too short", "Term: kept"];
        let cards = parse_as(ImportFormat::Colon, &lines);
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].question, "Term");
    }

    #[test]
    fn parse_numbered_list_when_nothing_earlier_matches() {
        let lines = ["1) Fe: iron", "2.Cu: copper"];
        let cards = parse_as(ImportFormat::Numbered, &lines);
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].question, "Fe");
        assert_eq!(cards[1].answer, "copper");
    }

    #[test]
    fn numbered_dash_list_is_claimed_by_dash_first() {
        let outcome = parse_flashcards("1. What is 2+2? - 4").unwrap();
        assert_eq!(outcome.format, ImportFormat::Dash);
        assert_eq!(pairs(&outcome), vec![("1. What is 2+2?", "4")]);
    }

    #[test]
    fn ambiguous_line_resolves_to_earlier_format() {
        let outcome = parse_flashcards("Term: definition with - a dash").unwrap();
        assert_eq!(outcome.format, ImportFormat::Dash);
        assert_eq!(pairs(&outcome), vec![("Term: definition with", "a dash")]);
    }

    #[test]
    fn reject_empty_input() {
        assert_eq!(parse_flashcards(""), Err(ImportError::EmptyInput));
        assert_eq!(parse_flashcards("   \n\t\n"), Err(ImportError::EmptyInput));
    }

    #[test]
    fn reject_text_without_pairs() {
        assert_eq!(
            parse_flashcards("just some words\nno delimiters here"),
            Err(ImportError::NoPairsDetected)
        );
    }
}

//! Interactive question flows
//!
//! Questions are plain descriptors; a [`Prompter`] asks them in order and
//! collects the answers. The cliclack-backed prompter is only available
//! with the `tui` feature.

#[cfg(feature = "tui")]
mod clack;

#[cfg(feature = "tui")]
pub use clack::ClackPrompter;

use anyhow::Result;
use std::collections::BTreeMap;

/// Kind of input a question expects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Confirm,
    Input,
}

/// An answer to a single question
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Bool(bool),
    Text(String),
}

/// Answers collected so far, keyed by question name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers(BTreeMap<String, Answer>);

impl Answers {
    pub fn insert(&mut self, name: &str, answer: Answer) {
        self.0.insert(name.to_string(), answer);
    }

    pub fn get(&self, name: &str) -> Option<&Answer> {
        self.0.get(name)
    }

    pub fn bool(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(Answer::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Answer::Text(value)) => Some(value),
            _ => None,
        }
    }
}

/// A single question descriptor
#[derive(Debug, Clone)]
pub struct Question {
    pub kind: QuestionKind,
    pub name: &'static str,
    pub message: &'static str,
    pub default: Answer,
    /// Only ask when this returns true for the answers given so far
    pub when: Option<fn(&Answers) -> bool>,
}

impl Question {
    pub fn confirm(name: &'static str, message: &'static str, default: bool) -> Self {
        Self {
            kind: QuestionKind::Confirm,
            name,
            message,
            default: Answer::Bool(default),
            when: None,
        }
    }

    pub fn input(name: &'static str, message: &'static str, default: impl Into<String>) -> Self {
        Self {
            kind: QuestionKind::Input,
            name,
            message,
            default: Answer::Text(default.into()),
            when: None,
        }
    }

    pub fn when(mut self, predicate: fn(&Answers) -> bool) -> Self {
        self.when = Some(predicate);
        self
    }

    /// Whether the question applies given earlier answers
    pub fn applies(&self, answers: &Answers) -> bool {
        self.when.map_or(true, |predicate| predicate(answers))
    }
}

/// Something that can ask questions
pub trait Prompter {
    /// Ask one question and return the answer
    fn ask(&mut self, question: &Question) -> Result<Answer>;

    /// Ask questions in order, skipping those whose `when` predicate is
    /// false for the answers collected so far
    fn prompt(&mut self, questions: &[Question]) -> Result<Answers> {
        let mut answers = Answers::default();
        for question in questions {
            if !question.applies(&answers) {
                continue;
            }
            let answer = self.ask(question)?;
            answers.insert(question.name, answer);
        }
        Ok(answers)
    }
}

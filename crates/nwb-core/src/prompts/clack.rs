//! Charm-style prompts using cliclack

use super::{Answer, Prompter, Question, QuestionKind};
use anyhow::Result;

/// Asks questions on the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ClackPrompter;

impl Prompter for ClackPrompter {
    fn ask(&mut self, question: &Question) -> Result<Answer> {
        match (question.kind, &question.default) {
            (QuestionKind::Confirm, Answer::Bool(default)) => {
                let value: bool = cliclack::confirm(question.message)
                    .initial_value(*default)
                    .interact()?;
                Ok(Answer::Bool(value))
            }
            (QuestionKind::Confirm, Answer::Text(_)) => {
                let value: bool = cliclack::confirm(question.message).interact()?;
                Ok(Answer::Bool(value))
            }
            (QuestionKind::Input, default) => {
                let default = match default {
                    Answer::Text(text) => text.clone(),
                    Answer::Bool(value) => value.to_string(),
                };
                let mut input = cliclack::input(question.message).required(false);
                if !default.is_empty() {
                    input = input.placeholder(&default).default_input(&default);
                }
                let value: String = input.interact()?;
                Ok(Answer::Text(value))
            }
        }
    }
}

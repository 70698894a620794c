//! Template variables and `{{ placeholder }}` rendering

use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();

fn placeholder() -> &'static Regex {
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("valid placeholder regex")
    })
}

/// Values substituted into a template while it is copied
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    values: BTreeMap<String, String>,
}

impl TemplateVars {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Booleans render as `true` / `false`
    pub fn insert_bool(&mut self, name: &str, value: bool) {
        self.insert(name, value.to_string());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Replace every `{{ name }}` in `text`. Unknown names render empty.
    pub fn render(&self, text: &str) -> String {
        placeholder()
            .replace_all(text, |caps: &Captures| {
                self.get(&caps[1]).unwrap_or_default().to_string()
            })
            .into_owned()
    }
}

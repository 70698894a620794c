//! Build preferences for projects published to npm

use crate::prompts::{Answers, Prompter, Question};
use anyhow::Result;

/// Flags accepted by the project creation commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateArgs {
    /// `--umd` / `--umd=false`
    pub umd: Option<bool>,

    /// `--global` / `-g`: global variable exported by the UMD build
    pub global: Option<String>,

    /// `--force` / `-f`: take everything from flags, never prompt
    pub force: bool,

    /// `--jsnext` / `--jsnext=false`
    pub jsnext: Option<bool>,

    /// `--react`: React version to depend on
    pub react: Option<String>,
}

/// Which npm builds a web module or React component gets
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebModulePrefs {
    pub umd: bool,
    pub global_variable: String,
    pub js_next: bool,
}

impl WebModulePrefs {
    /// Preferences implied by the flags alone
    pub fn from_args(args: &CreateArgs) -> Self {
        let global_variable = args.global.clone().unwrap_or_default();

        let umd = match args.umd {
            Some(false) => false,
            _ if !global_variable.is_empty() => true,
            _ => !args.force,
        };

        Self {
            umd,
            global_variable,
            js_next: args.jsnext != Some(false),
        }
    }

    fn from_answers(answers: &Answers, defaults: &Self) -> Self {
        let umd = answers.bool("umd").unwrap_or(defaults.umd);
        Self {
            umd,
            // Skipped when no UMD build was wanted
            global_variable: answers.text("globalVariable").unwrap_or_default().to_string(),
            js_next: answers.bool("jsNext").unwrap_or(defaults.js_next),
        }
    }
}

/// Questions asked when flags don't settle the preferences
pub fn web_module_questions(defaults: &WebModulePrefs) -> Vec<Question> {
    vec![
        Question::confirm(
            "umd",
            "Do you want to create a UMD build for npm?",
            defaults.umd,
        ),
        Question::input(
            "globalVariable",
            "Which global variable should the UMD build export?",
            defaults.global_variable.clone(),
        )
        .when(|answers| answers.bool("umd") == Some(true)),
        Question::confirm(
            "jsNext",
            "Do you want to create an ES6 modules build for npm?",
            defaults.js_next,
        ),
    ]
}

/// Resolve preferences from flags with `--force`, otherwise by prompting
/// with the flag-derived values as defaults
pub fn get_web_module_prefs<P: Prompter>(
    args: &CreateArgs,
    prompter: &mut P,
) -> Result<WebModulePrefs> {
    let defaults = WebModulePrefs::from_args(args);
    if args.force {
        return Ok(defaults);
    }

    let answers = prompter.prompt(&web_module_questions(&defaults))?;
    Ok(WebModulePrefs::from_answers(&answers, &defaults))
}

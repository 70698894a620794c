//! Errors caused by invalid user input
//!
//! Anything else (filesystem, installer, bundler, prompt failures) is carried
//! as an `anyhow::Error` and passed through untouched.

use crate::create::ProjectType;
use thiserror::Error;

/// Input validation failures, meant to be shown to the operator without a
/// cause chain or backtrace.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("nwb: {command}: an entry module must be specified")]
    MissingEntry { command: &'static str },

    #[error("nwb: a project type must be provided, one of: {}", ProjectType::names())]
    MissingProjectType,

    #[error("nwb: project type must be one of: {}", ProjectType::names())]
    InvalidProjectType { given: String },

    #[error("nwb: a project name must be provided")]
    MissingProjectName,

    #[error("nwb: {name} directory already exists")]
    DirectoryExists { name: String },
}

/// Find a [`UserError`] anywhere in an error chain
pub fn as_user_error(err: &anyhow::Error) -> Option<&UserError> {
    err.chain().find_map(|cause| cause.downcast_ref::<UserError>())
}

//! The closed set of project types nwb can create

use crate::errors::UserError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    ReactApp,
    ReactComponent,
    WebApp,
    WebModule,
}

impl ProjectType {
    pub const ALL: [ProjectType; 4] = [
        ProjectType::ReactApp,
        ProjectType::ReactComponent,
        ProjectType::WebApp,
        ProjectType::WebModule,
    ];

    /// Name used on the command line and as the template directory name
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::ReactApp => "react-app",
            ProjectType::ReactComponent => "react-component",
            ProjectType::WebApp => "web-app",
            ProjectType::WebModule => "web-module",
        }
    }

    /// Comma-separated list of every type name
    pub fn names() -> String {
        Self::ALL
            .iter()
            .map(ProjectType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Validate a project type given on the command line
pub fn validate_project_type(project_type: Option<&str>) -> Result<ProjectType, UserError> {
    let given = match project_type {
        Some(given) if !given.is_empty() => given,
        _ => return Err(UserError::MissingProjectType),
    };

    ProjectType::ALL
        .into_iter()
        .find(|t| t.as_str() == given)
        .ok_or_else(|| UserError::InvalidProjectType {
            given: given.to_string(),
        })
}

//! Classification of repository publishing failures
//!
//! `gh` reports failures as free text, so the only way to give actionable
//! guidance is substring matching on its output. All of that coupling lives
//! here.

use crate::error::Error;

/// What went wrong while publishing a repository
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// `gh auth status` failed
    NotAuthenticated,
    /// Repository already exists on the hosting service
    RepositoryExists,
    /// `gh` is not installed
    CliNotInstalled,
    /// Organization missing or not visible (HTTP 404)
    OrganizationNotFound,
    /// Credentials rejected (HTTP 401)
    Unauthorized,
    /// Not allowed to create repositories in the organization (HTTP 403)
    Forbidden,
    /// Anything else
    Unknown,
}

/// User-facing explanation of a failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guidance {
    /// One-line description
    pub summary: String,
    /// Follow-up lines (output dumps, next steps)
    pub hints: Vec<String>,
}

/// Classify raw command output, first match wins
pub fn classify_message(message: &str) -> FailureKind {
    if message.contains("already exists") {
        FailureKind::RepositoryExists
    } else if message.contains("gh: command not found") {
        FailureKind::CliNotInstalled
    } else if message.contains("HTTP 404") || message.contains("Not Found") {
        FailureKind::OrganizationNotFound
    } else if message.contains("HTTP 401") || message.contains("Unauthorized") {
        FailureKind::Unauthorized
    } else if message.contains("HTTP 403") || message.contains("Forbidden") {
        FailureKind::Forbidden
    } else {
        FailureKind::Unknown
    }
}

/// Classify an error returned by repository publishing
pub fn classify_failure(error: &Error) -> FailureKind {
    match error {
        Error::GhNotAuthenticated { .. } => FailureKind::NotAuthenticated,
        other => classify_message(&other.to_string()),
    }
}

/// Text shown for an error: the captured `gh` output where there is one
pub fn failure_message(error: &Error) -> String {
    match error {
        Error::GhNotAuthenticated { output } => output.clone(),
        other => other.to_string(),
    }
}

impl FailureKind {
    /// Guidance for `organization/project_name`; `message` is the raw error text
    pub fn guidance(&self, organization: &str, project_name: &str, message: &str) -> Guidance {
        let (summary, hints) = match self {
            Self::NotAuthenticated => (
                "GitHub CLI is not authenticated.".to_string(),
                vec![
                    format!("Output: {}", message.trim()),
                    "Please run: gh auth login".to_string(),
                    "Or set the GH_TOKEN environment variable with a GitHub API token".to_string(),
                ],
            ),
            Self::RepositoryExists => (
                format!(
                    "Repository {}/{} already exists on GitHub",
                    organization, project_name
                ),
                vec![],
            ),
            Self::CliNotInstalled => (
                "GitHub CLI (gh) is not installed.".to_string(),
                vec!["Please install it first: https://cli.github.com/".to_string()],
            ),
            Self::OrganizationNotFound => (
                format!(
                    "Organization '{}' not found or you don't have access",
                    organization
                ),
                vec!["Please check the organization name and your permissions".to_string()],
            ),
            Self::Unauthorized => (
                "Authentication failed".to_string(),
                vec!["Please run: gh auth login".to_string()],
            ),
            Self::Forbidden => (
                format!(
                    "Permission denied to create repository in {}",
                    organization
                ),
                vec!["Please check your permissions for this organization".to_string()],
            ),
            Self::Unknown => {
                let mut hints = vec![message.to_string()];
                if !message.contains("gh auth") {
                    hints.push(
                        "Tip: Make sure you are authenticated with: gh auth status".to_string(),
                    );
                }
                ("Error creating repository:".to_string(), hints)
            }
        };

        Guidance { summary, hints }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_messages() {
        assert_eq!(
            classify_message("GraphQL: Name already exists on this account"),
            FailureKind::RepositoryExists
        );
        assert_eq!(
            classify_message("sh: gh: command not found"),
            FailureKind::CliNotInstalled
        );
        assert_eq!(
            classify_message("HTTP 404: Not Found (https://api.github.com/orgs/nope)"),
            FailureKind::OrganizationNotFound
        );
        assert_eq!(
            classify_message("HTTP 401: Bad credentials"),
            FailureKind::Unauthorized
        );
        assert_eq!(classify_message("Unauthorized"), FailureKind::Unauthorized);
        assert_eq!(
            classify_message("HTTP 403: Resource not accessible"),
            FailureKind::Forbidden
        );
        assert_eq!(classify_message("Forbidden"), FailureKind::Forbidden);
        assert_eq!(classify_message("something odd"), FailureKind::Unknown);
    }

    #[test]
    fn test_classify_priority() {
        // "already exists" wins over HTTP status text
        assert_eq!(
            classify_message("HTTP 403: repository already exists"),
            FailureKind::RepositoryExists
        );
        // 404 is checked before 401 and 403
        assert_eq!(
            classify_message("HTTP 404 Not Found; HTTP 401; HTTP 403"),
            FailureKind::OrganizationNotFound
        );
        assert_eq!(
            classify_message("HTTP 401 Unauthorized, Forbidden"),
            FailureKind::Unauthorized
        );
    }

    #[test]
    fn test_classify_errors() {
        assert_eq!(
            classify_failure(&Error::GhNotAuthenticated {
                output: "HTTP 401".to_string()
            }),
            FailureKind::NotAuthenticated
        );
        assert_eq!(
            classify_failure(&Error::command_not_found("gh")),
            FailureKind::CliNotInstalled
        );
        assert_eq!(
            classify_failure(&Error::repo_create_failed("HTTP 404: Not Found")),
            FailureKind::OrganizationNotFound
        );
        // Only the hosting CLI counts as "not installed"
        assert_eq!(
            classify_failure(&Error::command_not_found("git")),
            FailureKind::Unknown
        );
    }

    #[test]
    fn test_failure_message_uses_captured_output() {
        let error = Error::GhNotAuthenticated {
            output: "You are not logged into any GitHub hosts".to_string(),
        };
        assert_eq!(
            failure_message(&error),
            "You are not logged into any GitHub hosts"
        );
        assert_eq!(
            failure_message(&Error::repo_create_failed("boom")),
            "Failed to create repository: boom"
        );
    }

    #[test]
    fn test_unknown_guidance_adds_auth_tip() {
        let guidance = FailureKind::Unknown.guidance("acme", "my-lib", "boom");
        assert_eq!(guidance.summary, "Error creating repository:");
        assert_eq!(guidance.hints.len(), 2);
        assert!(guidance.hints[1].contains("gh auth status"));

        let guidance = FailureKind::Unknown.guidance("acme", "my-lib", "try gh auth login");
        assert_eq!(guidance.hints, vec!["try gh auth login".to_string()]);
    }

    #[test]
    fn test_guidance_mentions_target() {
        let guidance = FailureKind::RepositoryExists.guidance("acme", "my-lib", "");
        assert!(guidance.summary.contains("acme/my-lib"));

        let guidance = FailureKind::Forbidden.guidance("acme", "my-lib", "");
        assert!(guidance.summary.contains("acme"));

        let guidance = FailureKind::NotAuthenticated.guidance("acme", "my-lib", "not logged in\n");
        assert_eq!(guidance.hints[0], "Output: not logged in");
    }
}

// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (carried inside reports and plans)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (400-level equivalent)
    // ========================================================================
    #[error("Invalid structure: {issue_count} issue(s) found")]
    InvalidStructure {
        issue_count: usize,
        issues: Vec<String>,
    },

    // ========================================================================
    // Contract Violations (programming errors in a collaborator)
    // ========================================================================
    #[error("Duplicate {category} '{name}' at {directory} in {source_name}")]
    DuplicateEntity {
        category: &'static str,
        name: String,
        directory: String,
        source_name: &'static str,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidStructure { issues, .. } => {
                let mut out = vec!["Fix the following issues in your structure file:".into()];
                out.extend(issues.iter().map(|i| format!("  • {i}")));
                out.push("Run: skaf validate".into());
                out
            }
            Self::DuplicateEntity { source_name, .. } => vec![
                format!("The {source_name} contains the same entity twice"),
                "This is a bug in Skaf, please report it".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidStructure { .. } => ErrorCategory::Validation,
            Self::DuplicateEntity { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}

use crate::edit::{self, Edit, EditError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A batch of edits for one file, as written in a plan file.
#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct EditPlan {
    #[serde(default)]
    pub meta: Metadata,
    #[serde(default)]
    pub edits: Vec<Edit>,
}

impl EditPlan {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut issues = Vec::new();

        if self.edits.is_empty() {
            issues.push(ValidationIssue::EmptyEditList);
        }

        for (index, edit) in self.edits.iter().enumerate() {
            let span = edit.span();
            if span.start > span.end {
                issues.push(ValidationIssue::InvertedRange {
                    index,
                    start: span.start,
                    end: span.end,
                });
            }
        }

        if !self.meta.allow_overlap && issues.is_empty() {
            if let Err(EditError::Overlapping { first, second }) = edit::check_disjoint(&self.edits)
            {
                issues.push(ValidationIssue::Overlapping { first, second });
            }
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { issues })
        }
    }

    /// Apply the plan's edits to `text`.
    pub fn apply_to(&self, text: &str) -> Result<String, EditError> {
        if self.meta.allow_overlap {
            edit::applying(text, &self.edits)
        } else {
            edit::applying_disjoint(text, &self.edits)
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default, Clone, PartialEq, Eq)]
pub struct Metadata {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Skip the disjointness check; overlapping edits apply in sort order.
    #[serde(default)]
    pub allow_overlap: bool,
}

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.issues.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{issue}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationIssue {
    EmptyEditList,
    InvertedRange {
        index: usize,
        start: usize,
        end: usize,
    },
    Overlapping {
        first: usize,
        second: usize,
    },
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationIssue::EmptyEditList => write!(f, "edit plan contains no edits"),
            ValidationIssue::InvertedRange { index, start, end } => {
                write!(f, "edit {index} has an inverted range [{start}, {end})")
            }
            ValidationIssue::Overlapping { first, second } => write!(
                f,
                "edits {first} and {second} overlap (set meta.allow_overlap to permit)"
            ),
        }
    }
}

//! Anchored single-line text insertion.
//!
//! A [`PatchOperation`] inserts one line into a source file, positioned
//! relative to an [`Anchor`]. Applying a patch is idempotent: if the exact
//! line is already present the source is left untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::domain::error::DomainError;

/// Where a patch attaches in the target file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// A fixed 1-based line number.
    Line(usize),
    /// The first line whose trimmed content starts with the marker.
    LineContaining(String),
}

/// Insertion side relative to the anchor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsertPosition {
    Before,
    After,
}

/// Result of applying a patch to some source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The line was inserted; holds the new source.
    Applied(String),
    /// The line already exists, nothing to do.
    AlreadyPresent,
    /// The anchor could not be located.
    AnchorNotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchOperation {
    target: PathBuf,
    anchor: Anchor,
    text: String,
    position: InsertPosition,
}

impl PatchOperation {
    pub fn new(
        target: impl Into<PathBuf>,
        anchor: Anchor,
        text: impl Into<String>,
        position: InsertPosition,
    ) -> Result<Self, DomainError> {
        let target = target.into();
        let text = text.into();
        let invalid = |reason: &str| DomainError::InvalidPatch {
            target: target.display().to_string(),
            reason: reason.into(),
        };

        if text.trim().is_empty() || text.contains('\n') {
            return Err(invalid("inserted text must be a single non-empty line"));
        }
        match &anchor {
            Anchor::Line(0) => return Err(invalid("line anchors are 1-based")),
            Anchor::LineContaining(marker) if marker.trim().is_empty() => {
                return Err(invalid("marker must not be empty"));
            }
            _ => {}
        }

        Ok(Self {
            target,
            anchor,
            text,
            position,
        })
    }

    /// Target file, relative to the output root.
    pub fn target(&self) -> &Path {
        &self.target
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn position(&self) -> InsertPosition {
        self.position
    }

    /// Apply this patch to `source`.
    pub fn apply(&self, source: &str) -> PatchOutcome {
        let wanted = self.text.trim();
        if source.lines().any(|line| line.trim() == wanted) {
            return PatchOutcome::AlreadyPresent;
        }

        let eol = if source.contains("\r\n") { "\r\n" } else { "\n" };
        let mut lines: Vec<String> = source.split_inclusive('\n').map(str::to_owned).collect();

        let Some(index) = self.insertion_index(&lines) else {
            return PatchOutcome::AnchorNotFound;
        };

        // Inserting after an unterminated final line needs a line break first.
        if index > 0 && index == lines.len() && !lines[index - 1].ends_with('\n') {
            lines[index - 1].push_str(eol);
        }
        lines.insert(index, format!("{}{eol}", self.text));

        PatchOutcome::Applied(lines.concat())
    }

    /// Index in `lines` at which the new line goes, or `None` when the anchor
    /// is not present.
    fn insertion_index(&self, lines: &[String]) -> Option<usize> {
        let anchor_index = match &self.anchor {
            Anchor::Line(n) => {
                let index = n - 1;
                // A line anchor one past the end is still a valid "before" slot.
                let limit = match self.position {
                    InsertPosition::Before => lines.len(),
                    InsertPosition::After => lines.len().saturating_sub(1),
                };
                if index > limit || (self.position == InsertPosition::After && lines.is_empty()) {
                    return None;
                }
                index
            }
            Anchor::LineContaining(marker) => lines
                .iter()
                .position(|line| line.trim_start().starts_with(marker.as_str()))?,
        };

        Some(match self.position {
            InsertPosition::Before => anchor_index,
            InsertPosition::After => anchor_index + 1,
        })
    }
}

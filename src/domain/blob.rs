// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::Serialize;

/// How a path differs between two points in history.
///
/// `Other` covers renames, copies and type changes as reported by the diff;
/// policy treats them like modifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeStatus {
    Added,
    Modified,
    Deleted,
    Other,
}

impl ChangeStatus {
    /// Parse a `--name-status` letter (possibly with a similarity score
    /// suffix, e.g. `R100`).
    pub fn from_name_status(code: &str) -> Self {
        match code.chars().next() {
            Some('A') => Self::Added,
            Some('M') => Self::Modified,
            Some('D') => Self::Deleted,
            _ => Self::Other,
        }
    }
}

/// One changed path in one commit, as reported by the tree diff.
///
/// `blob_id` is the content-addressed identifier of the file's post-state
/// content. It is empty exactly when `status` is `Deleted`: deleted content
/// has no retrievable post-state blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChangeRecord {
    pub path: String,
    pub blob_id: String,
    pub commit_id: String,
    pub status: ChangeStatus,
}

impl ChangeRecord {
    pub fn is_deletion(&self) -> bool {
        self.blob_id.is_empty()
    }
}

/// Qualitative certainty of a text/binary classification, not a probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Outcome of type detection for one blob.
///
/// `mime` is only present when the external sniffing tier produced the
/// result; the content-heuristic fallback never guesses a MIME type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDetection {
    pub is_binary: bool,
    pub mime: Option<String>,
    pub confidence: Confidence,
}

/// A `ChangeRecord` augmented with size and type classification.
///
/// All augmented fields are `None` for deletion records, and independently
/// `None` when the corresponding lookup failed. Absence means "unknown",
/// never zero or text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassifiedBlob {
    pub path: String,
    pub blob_id: String,
    pub commit_id: String,
    pub status: ChangeStatus,
    pub size_bytes: Option<u64>,
    pub is_binary: Option<bool>,
    pub mime: Option<String>,
    pub confidence: Option<Confidence>,
}

impl ClassifiedBlob {
    pub fn new(
        record: ChangeRecord,
        size_bytes: Option<u64>,
        type_info: Option<TypeDetection>,
    ) -> Self {
        let (is_binary, mime, confidence) = match type_info {
            Some(t) => (Some(t.is_binary), t.mime, Some(t.confidence)),
            None => (None, None, None),
        };
        Self {
            path: record.path,
            blob_id: record.blob_id,
            commit_id: record.commit_id,
            status: record.status,
            size_bytes,
            is_binary,
            mime,
            confidence,
        }
    }

    pub fn is_deletion(&self) -> bool {
        self.blob_id.is_empty()
    }
}

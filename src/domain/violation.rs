// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use serde::Serialize;

use super::ClassifiedBlob;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// A policy rule broken by one classified blob.
#[derive(Debug, Clone, Serialize)]
pub struct Violation {
    pub blob: ClassifiedBlob,
    pub rule: String,
    pub message: String,
    pub severity: Severity,
}

impl Violation {
    pub fn path(&self) -> &str {
        &self.blob.path
    }
}

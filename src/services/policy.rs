// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use crate::config::{Config, FailOn};
use crate::domain::{ClassifiedBlob, Severity, Violation};

/// Apply size limits to classified blobs.
///
/// A record only violates a rule when both its size and its type are
/// known; unknowns are the reporting layer's business, never a pass or a
/// fail. Deletions carry no post-state content and are never checked.
pub fn evaluate(blobs: &[ClassifiedBlob], config: &Config) -> Vec<Violation> {
    let mut violations = Vec::new();

    for blob in blobs {
        if blob.is_deletion() {
            continue;
        }
        let (Some(size), Some(is_binary)) = (blob.size_bytes, blob.is_binary) else {
            continue;
        };

        let (limit_kb, rule) = if is_binary {
            (config.max_binary_size_kb, "max-binary-size")
        } else {
            (config.max_text_size_kb, "max-text-size")
        };
        let Some(limit_kb) = limit_kb else {
            continue;
        };

        if size > limit_kb * 1024 {
            violations.push(Violation {
                blob: blob.clone(),
                rule: rule.to_string(),
                message: format!(
                    "{} file is {} bytes, limit is {} KB",
                    if is_binary { "binary" } else { "text" },
                    size,
                    limit_kb
                ),
                severity: Severity::Error,
            });
        }
    }

    violations
}

/// Whether the run should fail given the violations and the configured
/// minimum severity.
pub fn should_fail(violations: &[Violation], fail_on: FailOn) -> bool {
    let min = match fail_on {
        FailOn::Warn => Severity::Warning,
        FailOn::Error => Severity::Error,
    };
    violations.iter().any(|v| v.severity >= min)
}

// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use repo_guardian::config::{Config, FailOn};
use repo_guardian::domain::{ChangeStatus, ClassifiedBlob, Confidence, Severity, Violation};
use repo_guardian::services::policy::{evaluate, should_fail};

fn blob(path: &str, size: Option<u64>, is_binary: Option<bool>) -> ClassifiedBlob {
    ClassifiedBlob {
        path: path.to_string(),
        blob_id: "blob-1".to_string(),
        commit_id: "c0ffee".to_string(),
        status: ChangeStatus::Added,
        size_bytes: size,
        is_binary,
        mime: None,
        confidence: is_binary.map(|_| Confidence::High),
    }
}

fn limits(text_kb: Option<u64>, binary_kb: Option<u64>) -> Config {
    Config {
        max_text_size_kb: text_kb,
        max_binary_size_kb: binary_kb,
        ..Config::default()
    }
}

#[test]
fn oversized_text_file_violates_text_rule() {
    let blobs = vec![blob("big.txt", Some(2048), Some(false))];
    let violations = evaluate(&blobs, &limits(Some(1), None));

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, "max-text-size");
    assert_eq!(violations[0].severity, Severity::Error);
    assert_eq!(violations[0].path(), "big.txt");
}

#[test]
fn oversized_binary_file_violates_binary_rule() {
    let blobs = vec![blob("big.bin", Some(10 * 1024), Some(true))];
    let violations = evaluate(&blobs, &limits(None, Some(4)));

    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].rule, "max-binary-size");
}

#[test]
fn limits_apply_per_type() {
    // A text file over the binary limit but under the text limit passes.
    let blobs = vec![blob("big.txt", Some(2048), Some(false))];
    let violations = evaluate(&blobs, &limits(Some(100), Some(1)));
    assert!(violations.is_empty());
}

#[test]
fn file_at_limit_passes() {
    let blobs = vec![blob("exact.txt", Some(1024), Some(false))];
    let violations = evaluate(&blobs, &limits(Some(1), None));
    assert!(violations.is_empty());
}

#[test]
fn unknown_size_is_never_a_violation() {
    let blobs = vec![blob("mystery.txt", None, Some(false))];
    let violations = evaluate(&blobs, &limits(Some(0), Some(0)));
    assert!(violations.is_empty());
}

#[test]
fn unknown_type_is_never_a_violation() {
    let blobs = vec![blob("mystery", Some(1 << 20), None)];
    let violations = evaluate(&blobs, &limits(Some(0), Some(0)));
    assert!(violations.is_empty());
}

#[test]
fn deletions_are_never_checked() {
    let mut deleted = blob("gone.txt", None, None);
    deleted.blob_id = String::new();
    deleted.status = ChangeStatus::Deleted;

    let violations = evaluate(&[deleted], &limits(Some(0), Some(0)));
    assert!(violations.is_empty());
}

#[test]
fn no_limits_means_no_violations() {
    let blobs = vec![blob("huge.bin", Some(u64::MAX / 2048), Some(true))];
    let violations = evaluate(&blobs, &limits(None, None));
    assert!(violations.is_empty());
}

#[test]
fn should_fail_respects_minimum_severity() {
    let warning = Violation {
        blob: blob("w.txt", Some(10), Some(false)),
        rule: "demo".into(),
        message: "warning-level".into(),
        severity: Severity::Warning,
    };
    let error = Violation {
        blob: blob("e.txt", Some(10), Some(false)),
        rule: "demo".into(),
        message: "error-level".into(),
        severity: Severity::Error,
    };

    assert!(!should_fail(&[], FailOn::Warn));
    assert!(should_fail(&[warning.clone()], FailOn::Warn));
    assert!(!should_fail(&[warning], FailOn::Error));
    assert!(should_fail(&[error], FailOn::Error));
}

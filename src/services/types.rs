// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

//! Text/binary classification for blobs.
//!
//! Two tiers, tried in order: an external MIME sniffer (`file --mime -b`
//! over materialized bytes), then content heuristics over the raw bytes.
//! Each tier either produces a definitive `TypeDetection` or signals
//! "could not determine" with `None`; the classifier takes the first hit.
//! Classification never fails: every failure path has a fallback result.

use std::collections::{HashMap, HashSet};
use std::io::Write;

use rayon::prelude::*;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{Confidence, TypeDetection};
use crate::services::git::GitRepo;

/// Non-`text/*` MIME types still treated as text: structured-text formats
/// plus the sentinels `file` reports for empty input.
const TEXT_MIME_ALLOWLIST: &[&str] = &[
    "application/json",
    "application/xml",
    "application/javascript",
    "application/x-empty",
    "inode/x-empty",
];

/// Tuning knobs for the content-heuristic tier.
///
/// The defaults are empirically chosen; nothing downstream may assume they
/// are optimal, only that they are applied consistently.
#[derive(Debug, Clone, Copy)]
pub struct HeuristicThresholds {
    /// Printable ratio below which content is binary when strict decoding
    /// succeeded.
    pub binary_ratio_strict: f64,
    /// Printable ratio below which content is binary when strict decoding
    /// failed (lossy fallback).
    pub binary_ratio_lossy: f64,
    /// Ratio above this is high-confidence.
    pub high_band_upper: f64,
    /// Ratio below this is high-confidence.
    pub high_band_lower: f64,
}

impl Default for HeuristicThresholds {
    fn default() -> Self {
        Self {
            binary_ratio_strict: 0.7,
            binary_ratio_lossy: 0.5,
            high_band_upper: 0.9,
            high_band_lower: 0.3,
        }
    }
}

pub struct TypeClassifier<'a> {
    repo: &'a GitRepo,
    thresholds: HeuristicThresholds,
}

impl<'a> TypeClassifier<'a> {
    pub fn new(repo: &'a GitRepo) -> Self {
        Self {
            repo,
            thresholds: HeuristicThresholds::default(),
        }
    }

    pub fn with_thresholds(repo: &'a GitRepo, thresholds: HeuristicThresholds) -> Self {
        Self { repo, thresholds }
    }

    /// Classify one blob. Never fails.
    ///
    /// An empty/whitespace id is a defined case: unknown content is
    /// conservatively binary at low confidence.
    pub fn classify(&self, blob_id: &str) -> TypeDetection {
        if blob_id.trim().is_empty() {
            return TypeDetection {
                is_binary: true,
                mime: None,
                confidence: Confidence::Low,
            };
        }

        if let Some(detection) = self.sniff_mime(blob_id) {
            return detection;
        }
        debug!(blob_id, "MIME sniffing unavailable, using content heuristics");
        self.content_heuristics(blob_id)
    }

    /// Classify a set of blobs, one classification per distinct id.
    ///
    /// Ids that do not resolve to existing content are skipped rather than
    /// failing the batch.
    pub fn classify_all(&self, blob_ids: &HashSet<String>) -> HashMap<String, TypeDetection> {
        blob_ids
            .par_iter()
            .filter(|id| !id.trim().is_empty())
            .filter(|id| {
                let exists = self.repo.blob_exists(id);
                if !exists {
                    debug!(blob_id = %id, "blob does not exist, skipping classification");
                }
                exists
            })
            .map(|id| (id.clone(), self.classify(id)))
            .collect()
    }

    /// Tier 1: materialize the blob and ask the external `file` tool.
    ///
    /// Returns `None` on any failure (tool missing, blob unreadable) so the
    /// caller falls through to the heuristic tier.
    fn sniff_mime(&self, blob_id: &str) -> Option<TypeDetection> {
        let bytes = self.repo.cat_file_bytes(blob_id).ok()?;

        let mut tmp = NamedTempFile::new().ok()?;
        tmp.write_all(&bytes).ok()?;
        tmp.flush().ok()?;

        let output = std::process::Command::new("file")
            .args(["--mime", "-b"])
            .arg(tmp.path())
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mime = stdout.trim().split(';').next()?.trim();
        if mime.is_empty() {
            return None;
        }

        let is_text = mime.starts_with("text/") || TEXT_MIME_ALLOWLIST.contains(&mime);
        Some(TypeDetection {
            is_binary: !is_text,
            mime: Some(mime.to_string()),
            confidence: Confidence::High,
        })
    }

    /// Tier 2: fetch raw bytes and classify by content. Always produces a
    /// result; an unreadable blob is binary at low confidence.
    fn content_heuristics(&self, blob_id: &str) -> TypeDetection {
        match self.repo.cat_file_bytes(blob_id) {
            Ok(bytes) => heuristic_detection(&bytes, &self.thresholds),
            Err(e) => {
                debug!(blob_id, error = %e, "blob unreadable, defaulting to binary");
                TypeDetection {
                    is_binary: true,
                    mime: None,
                    confidence: Confidence::Low,
                }
            }
        }
    }
}

/// Pure content-heuristic classification of raw bytes.
///
/// A null byte anywhere is a near-certain binary marker. Otherwise the
/// bytes are decoded as UTF-8 (strictly first, lossily on failure) and the
/// printable-character ratio is computed against the original byte length,
/// so bytes lost to the lossy decode count against the ratio. A failed
/// strict decode tightens the binary threshold and caps confidence below
/// high.
pub fn heuristic_detection(bytes: &[u8], thresholds: &HeuristicThresholds) -> TypeDetection {
    if bytes.contains(&0) {
        return TypeDetection {
            is_binary: true,
            mime: None,
            confidence: Confidence::High,
        };
    }

    // Empty is text by convention.
    if bytes.is_empty() {
        return TypeDetection {
            is_binary: false,
            mime: None,
            confidence: Confidence::Medium,
        };
    }

    let (text, decode_ok) = match std::str::from_utf8(bytes) {
        Ok(s) => (std::borrow::Cow::Borrowed(s), true),
        Err(_) => (String::from_utf8_lossy(bytes), false),
    };

    if text.is_empty() {
        // Non-empty input decoded to nothing: treat as binary.
        return TypeDetection {
            is_binary: true,
            mime: None,
            confidence: Confidence::Medium,
        };
    }

    let printable = text.chars().filter(|&c| is_printable(c)).count();
    let ratio = printable as f64 / bytes.len() as f64;

    let threshold = if decode_ok {
        thresholds.binary_ratio_strict
    } else {
        thresholds.binary_ratio_lossy
    };
    let is_binary = ratio < threshold;

    let mut confidence = if ratio > thresholds.high_band_upper || ratio < thresholds.high_band_lower
    {
        Confidence::High
    } else {
        Confidence::Medium
    };
    if !decode_ok {
        confidence = match confidence {
            Confidence::High => Confidence::Medium,
            _ => Confidence::Low,
        };
    }

    TypeDetection {
        is_binary,
        mime: None,
        confidence,
    }
}

/// ASCII-printable: graphic characters, space, and common whitespace
/// controls. Non-ASCII never counts as printable here.
fn is_printable(c: char) -> bool {
    c.is_ascii_graphic() || c == ' ' || matches!(c, '\t' | '\n' | '\r' | '\x0b' | '\x0c')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(bytes: &[u8]) -> TypeDetection {
        heuristic_detection(bytes, &HeuristicThresholds::default())
    }

    #[test]
    fn null_byte_is_binary_high() {
        let d = detect(b"text with a \x00 in it");
        assert!(d.is_binary);
        assert_eq!(d.confidence, Confidence::High);
        assert_eq!(d.mime, None);
    }

    #[test]
    fn empty_is_text_medium() {
        let d = detect(b"");
        assert!(!d.is_binary);
        assert_eq!(d.confidence, Confidence::Medium);
    }

    #[test]
    fn plain_ascii_is_text_high() {
        let d = detect(b"Hello, world!\nA perfectly ordinary file.\n");
        assert!(!d.is_binary);
        assert_eq!(d.confidence, Confidence::High);
    }

    #[test]
    fn control_characters_are_binary_high() {
        // Valid UTF-8, zero printable characters, no null bytes.
        let d = detect(&[0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
        assert!(d.is_binary);
        assert_eq!(d.confidence, Confidence::High);
    }

    #[test]
    fn decode_failure_caps_confidence() {
        // One invalid byte in otherwise clean ASCII: ratio 10/11 > 0.9
        // would be high, but the failed strict decode downgrades it.
        let d = detect(b"helloworld\xff");
        assert!(!d.is_binary, "ratio above lossy threshold stays text");
        assert_eq!(d.confidence, Confidence::Medium);
    }

    #[test]
    fn decode_failure_downgrades_medium_to_low() {
        // Half printable, half invalid bytes: medium band, failed decode.
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"abcdefgh");
        bytes.extend_from_slice(&[0xfe; 6]);
        let d = detect(&bytes);
        assert_eq!(d.confidence, Confidence::Low);
    }

    #[test]
    fn non_ascii_text_counts_against_ratio() {
        // Multi-byte UTF-8 decodes fine but is not ASCII-printable, so a
        // fully non-ASCII file lands in the binary band.
        let s = "ααααααααααααααααα";
        let d = detect(s.as_bytes());
        assert!(d.is_binary);
    }

    #[test]
    fn thresholds_are_tunable() {
        let lax = HeuristicThresholds {
            binary_ratio_strict: 0.1,
            ..Default::default()
        };
        let s = "ααααααααααααααααα";
        let d = heuristic_detection(s.as_bytes(), &lax);
        assert!(!d.is_binary);
    }
}

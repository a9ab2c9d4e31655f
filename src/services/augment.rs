// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

//! Merges enumeration output with size and type lookups.
//!
//! Deduplication lives here: the expensive lookups run once per distinct
//! blob id, and the result is broadcast to every record referencing that
//! id. Identical content therefore always carries identical classification.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::{ChangeRecord, ClassifiedBlob, TypeDetection};
use crate::error::Result;
use crate::services::enumerator;
use crate::services::git::GitRepo;
use crate::services::sizes;
use crate::services::types::TypeClassifier;

/// Merge records with lookup results, preserving order and count.
///
/// One output per input, deletions included. A record with an empty blob id
/// gets all augmented fields absent; otherwise each field is looked up
/// independently, so a missing size never suppresses an available type.
pub fn augment(
    records: impl IntoIterator<Item = ChangeRecord>,
    size_map: &HashMap<String, u64>,
    type_map: &HashMap<String, TypeDetection>,
) -> Vec<ClassifiedBlob> {
    records
        .into_iter()
        .map(|record| {
            if record.is_deletion() {
                return ClassifiedBlob::new(record, None, None);
            }
            let size = size_map.get(&record.blob_id).copied();
            let type_info = type_map.get(&record.blob_id).cloned();
            ClassifiedBlob::new(record, size, type_info)
        })
        .collect()
}

/// Classify a set of already-enumerated records: collect the distinct blob
/// ids, run both batch lookups in parallel, then merge.
pub fn classify_records(repo: &GitRepo, records: Vec<ChangeRecord>) -> Vec<ClassifiedBlob> {
    let unique_ids: HashSet<String> = records
        .iter()
        .filter(|r| !r.is_deletion())
        .map(|r| r.blob_id.clone())
        .collect();
    debug!(
        records = records.len(),
        distinct_blobs = unique_ids.len(),
        "resolving sizes and types"
    );

    let classifier = TypeClassifier::new(repo);
    let (size_map, type_map) = rayon::join(
        || sizes::sizes_of(repo, &unique_ids),
        || classifier.classify_all(&unique_ids),
    );

    augment(records, &size_map, &type_map)
}

/// Full pipeline for a commit range: enumerate, deduplicate, look up,
/// merge. Range resolution failures are fatal; everything past that is
/// best-effort.
pub fn classify_range(repo: &GitRepo, range: &str) -> Result<Vec<ClassifiedBlob>> {
    let records: Vec<ChangeRecord> = enumerator::enumerate(repo, range)?.collect();
    Ok(classify_records(repo, records))
}

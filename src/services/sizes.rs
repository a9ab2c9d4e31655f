// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::{HashMap, HashSet};

use rayon::prelude::*;
use tracing::debug;

use crate::error::{Error, Result};
use crate::services::git::GitRepo;

/// Byte size of a single blob.
///
/// Strict single-item contract: an empty or whitespace-only id is a
/// programmer error (callers must filter deleted-file placeholders first)
/// and always raises `InvalidBlob`; a failed underlying query raises
/// `BlobLookup`.
pub fn size_of(repo: &GitRepo, blob_id: &str) -> Result<u64> {
    if blob_id.trim().is_empty() {
        return Err(Error::InvalidBlob(blob_id.to_string()));
    }
    repo.cat_file_size(blob_id)
}

/// Byte sizes for a set of blobs, one query per distinct id.
///
/// Lenient batch contract: per-id failures (and empty ids) are omitted from
/// the result map. Absence means "size unknown", never zero.
pub fn sizes_of(repo: &GitRepo, blob_ids: &HashSet<String>) -> HashMap<String, u64> {
    collect_sizes(blob_ids, |id| size_of(repo, id))
}

fn collect_sizes<F>(blob_ids: &HashSet<String>, lookup: F) -> HashMap<String, u64>
where
    F: Fn(&str) -> Result<u64> + Sync,
{
    blob_ids
        .par_iter()
        .filter(|id| !id.trim().is_empty())
        .filter_map(|id| match lookup(id) {
            Ok(size) => Some((id.clone(), size)),
            Err(e) => {
                debug!(blob_id = %id, error = %e, "size lookup failed, omitting from batch");
                None
            }
        })
        .collect()
}

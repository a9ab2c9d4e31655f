// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::collections::VecDeque;

use tracing::{debug, warn};

use crate::domain::{ChangeRecord, ChangeStatus};
use crate::error::Result;
use crate::services::git::GitRepo;

/// Lazy stream of `ChangeRecord`s over a commit range.
///
/// The commit list is resolved up front (an unresolvable range is fatal);
/// each commit's tree diff is fetched and parsed only when the iterator
/// reaches it, so large ranges never materialize all records at once.
///
/// Discovery is best-effort past that point: a path whose post-state blob
/// cannot be resolved (certain history rewrites) is skipped, and a commit
/// whose diff cannot be read is skipped, rather than aborting the walk.
pub struct ChangeEnumerator<'a> {
    repo: &'a GitRepo,
    commits: std::vec::IntoIter<String>,
    pending: VecDeque<ChangeRecord>,
}

/// Enumerate changed blobs across `range`, most-recent commit first.
pub fn enumerate<'a>(repo: &'a GitRepo, range: &str) -> Result<ChangeEnumerator<'a>> {
    let commits = repo.list_commits(range)?;
    debug!(range, commits = commits.len(), "enumerating changed blobs");
    Ok(ChangeEnumerator {
        repo,
        commits: commits.into_iter(),
        pending: VecDeque::new(),
    })
}

impl Iterator for ChangeEnumerator<'_> {
    type Item = ChangeRecord;

    fn next(&mut self) -> Option<ChangeRecord> {
        loop {
            if let Some(record) = self.pending.pop_front() {
                return Some(record);
            }
            let commit = self.commits.next()?;
            self.pending = self.records_for_commit(&commit);
        }
    }
}

impl ChangeEnumerator<'_> {
    fn records_for_commit(&self, commit: &str) -> VecDeque<ChangeRecord> {
        let raw = match self.repo.diff_tree(commit) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(%commit, error = %e, "diff-tree failed, skipping commit");
                return VecDeque::new();
            }
        };
        parse_name_status(&raw)
            .filter_map(|(status, path)| self.resolve_record(commit, status, path))
            .collect()
    }

    fn resolve_record(
        &self,
        commit: &str,
        status: ChangeStatus,
        path: &str,
    ) -> Option<ChangeRecord> {
        // Deleted content has no post-state blob; don't try to resolve one.
        if status == ChangeStatus::Deleted {
            return Some(ChangeRecord {
                path: path.to_string(),
                blob_id: String::new(),
                commit_id: commit.to_string(),
                status,
            });
        }

        match self.repo.rev_parse_blob(commit, path) {
            Ok(blob_id) => Some(ChangeRecord {
                path: path.to_string(),
                blob_id,
                commit_id: commit.to_string(),
                status,
            }),
            Err(e) => {
                // Content missing at this commit; a partial result beats
                // aborting the whole enumeration.
                debug!(%commit, path, error = %e, "blob resolution failed, skipping record");
                None
            }
        }
    }
}

/// Single-diff scan: compare `base` and `head` trees directly, one record
/// per changed path, all attributed to the head commit.
pub fn enumerate_diff(repo: &GitRepo, base: &str, head: &str) -> Result<Vec<ChangeRecord>> {
    let raw = repo.diff_trees(base, head)?;
    let records = parse_name_status(&raw)
        .filter_map(|(status, path)| {
            if status == ChangeStatus::Deleted {
                return Some(ChangeRecord {
                    path: path.to_string(),
                    blob_id: String::new(),
                    commit_id: head.to_string(),
                    status,
                });
            }
            match repo.rev_parse_blob(head, path) {
                Ok(blob_id) => Some(ChangeRecord {
                    path: path.to_string(),
                    blob_id,
                    commit_id: head.to_string(),
                    status,
                }),
                Err(e) => {
                    debug!(path, error = %e, "blob resolution failed, skipping record");
                    None
                }
            }
        })
        .collect();
    Ok(records)
}

/// Parse `--name-status` output lines into (status, path) pairs.
///
/// Rename/copy lines carry two tab-separated paths; the last one is the
/// post-state path. Malformed lines are dropped.
fn parse_name_status(raw: &str) -> impl Iterator<Item = (ChangeStatus, &str)> {
    raw.lines().filter_map(|line| {
        let mut fields = line.split('\t');
        let code = fields.next()?;
        let path = fields.next_back()?;
        if code.is_empty() || path.is_empty() {
            return None;
        }
        Some((ChangeStatus::from_name_status(code), path))
    })
}

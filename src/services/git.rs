// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::{Path, PathBuf};
use std::process::Output;

use crate::error::{Error, Result};

/// Explicit handle to a git repository.
///
/// Every query runs `git` as a subprocess with the repository's work dir as
/// `current_dir`; nothing depends on the ambient process working directory.
pub struct GitRepo {
    work_dir: PathBuf,
}

impl GitRepo {
    /// Locate the repository containing `path` (walking up like git does).
    pub fn discover(path: impl AsRef<Path>) -> Result<Self> {
        let repo = gix::discover(path.as_ref()).map_err(|_| Error::NotAGitRepo)?;

        let work_dir = repo
            .work_dir()
            .ok_or_else(|| Error::Git("Bare repository not supported".into()))?
            .to_path_buf();

        Ok(Self { work_dir })
    }

    /// Wrap an already-known work dir without discovery.
    pub fn open(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
        }
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    fn run_git(&self, args: &[&str]) -> Result<Output> {
        let output = std::process::Command::new("git")
            .args(args)
            .current_dir(&self.work_dir)
            .output()?;
        Ok(output)
    }

    fn run_git_checked(&self, args: &[&str]) -> Result<String> {
        let output = self.run_git(args)?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::Git(stderr.trim().to_string()));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Resolve a revision to a full commit id.
    pub fn rev_parse(&self, rev: &str) -> Result<String> {
        self.run_git_checked(&["rev-parse", "--verify", rev])
            .map(|out| out.trim().to_string())
    }

    /// Merge base between two references.
    pub fn merge_base(&self, base_ref: &str, head_ref: &str) -> Result<String> {
        self.run_git_checked(&["merge-base", base_ref, head_ref])
            .map(|out| out.trim().to_string())
            .map_err(|e| Error::RangeResolution {
                range: format!("{base_ref}..{head_ref}"),
                message: e.to_string(),
            })
    }

    /// Commits in the range, most-recent-first (rev-list order).
    ///
    /// An empty range yields an empty vec, not an error.
    pub fn list_commits(&self, range: &str) -> Result<Vec<String>> {
        let out = self
            .run_git_checked(&["rev-list", range])
            .map_err(|e| Error::RangeResolution {
                range: range.to_string(),
                message: e.to_string(),
            })?;
        Ok(out.lines().map(str::to_string).collect())
    }

    /// Raw `--name-status` listing of the paths one commit changed.
    pub fn diff_tree(&self, commit: &str) -> Result<String> {
        self.run_git_checked(&[
            "diff-tree",
            "--no-commit-id",
            "--name-status",
            "-r",
            commit,
        ])
    }

    /// Raw `--name-status` diff between two trees (single-diff scan mode).
    pub fn diff_trees(&self, base: &str, head: &str) -> Result<String> {
        self.run_git_checked(&["diff", "--name-status", "--no-renames", base, head])
    }

    /// Post-state blob id of `path` at `commit`.
    pub fn rev_parse_blob(&self, commit: &str, path: &str) -> Result<String> {
        self.run_git_checked(&["rev-parse", &format!("{commit}:{path}")])
            .map(|out| out.trim().to_string())
    }

    /// Byte size of a blob, without checkout.
    pub fn cat_file_size(&self, blob_id: &str) -> Result<u64> {
        let out = self
            .run_git_checked(&["cat-file", "-s", blob_id])
            .map_err(|e| Error::BlobLookup {
                blob_id: blob_id.to_string(),
                message: e.to_string(),
            })?;
        out.trim().parse().map_err(|_| Error::BlobLookup {
            blob_id: blob_id.to_string(),
            message: format!("unexpected cat-file -s output: {out:?}"),
        })
    }

    /// Raw content of a blob.
    pub fn cat_file_bytes(&self, blob_id: &str) -> Result<Vec<u8>> {
        let output = self.run_git(&["cat-file", "-p", blob_id])?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::BlobLookup {
                blob_id: blob_id.to_string(),
                message: stderr.trim().to_string(),
            });
        }
        Ok(output.stdout)
    }

    /// Whether a blob exists in the object database.
    pub fn blob_exists(&self, blob_id: &str) -> bool {
        self.run_git(&["cat-file", "-e", blob_id])
            .map(|o| o.status.success())
            .unwrap_or(false)
    }
}

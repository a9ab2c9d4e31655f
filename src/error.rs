// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

// miette's Diagnostic derive generates code that triggers this false positive
#![allow(unused_assignments)]

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    #[error("Not a git repository")]
    #[diagnostic(
        code(repo_guardian::git::not_repo),
        help("Run this command inside a git repository, or pass --repo <path>")
    )]
    NotAGitRepo,

    #[error("Cannot resolve commit range '{range}': {message}")]
    #[diagnostic(
        code(repo_guardian::git::range),
        help("Check that both ends of the range exist and are fetched locally")
    )]
    RangeResolution { range: String, message: String },

    #[error("Invalid blob identifier: {0:?}")]
    #[diagnostic(
        code(repo_guardian::blob::invalid),
        help("Deleted-file records carry an empty blob id; filter them before lookup")
    )]
    InvalidBlob(String),

    #[error("Cannot look up blob {blob_id}: {message}")]
    #[diagnostic(code(repo_guardian::blob::lookup))]
    BlobLookup { blob_id: String, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(repo_guardian::config::error))]
    Config(String),

    #[error("Git error: {0}")]
    #[diagnostic(code(repo_guardian::git::error))]
    Git(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

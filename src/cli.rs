// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
// SPDX-License-Identifier: GPL-3.0-only

use std::path::PathBuf;

use clap::Parser;

use crate::config::{FailOn, ScanMode};

#[derive(Parser, Debug)]
#[command(name = "repo-guardian")]
#[command(version)]
#[command(about = "PR history file size & type policy scanner", long_about = None)]
pub struct Cli {
    /// Base reference of the PR (e.g. origin/main)
    #[arg(long, env = "REPO_GUARDIAN_BASE_REF")]
    pub base_ref: Option<String>,

    /// Head reference of the PR
    #[arg(long, env = "REPO_GUARDIAN_HEAD_REF")]
    pub head_ref: Option<String>,

    /// Repository to scan (discovered from the current directory if omitted)
    #[arg(long, value_name = "PATH")]
    pub repo: Option<PathBuf>,

    /// Maximum size for text files in KB (unlimited if not specified)
    #[arg(long)]
    pub max_text_size_kb: Option<u64>,

    /// Maximum size for binary files in KB (unlimited if not specified)
    #[arg(long)]
    pub max_binary_size_kb: Option<u64>,

    /// Path to the policy configuration file
    #[arg(long, value_name = "PATH")]
    pub policy_path: Option<PathBuf>,

    /// Minimum severity that causes a failing exit status
    #[arg(long, value_enum)]
    pub fail_on: Option<FailOn>,

    /// Walk every commit in the range, or diff the range endpoints once
    #[arg(long, value_enum)]
    pub scan_mode: Option<ScanMode>,

    /// Emit machine-readable JSON instead of the human report
    #[arg(long)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

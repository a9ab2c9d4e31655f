// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use std::path::PathBuf;

use console::style;
use serde::Serialize;
use tracing::debug;

use crate::cli::Cli;
use crate::config::{Config, ScanMode};
use crate::domain::{ChangeStatus, ClassifiedBlob, Violation};
use crate::error::Result;
use crate::services::{augment, enumerator, git::GitRepo, policy};

#[derive(Serialize)]
struct Report<'a> {
    range: &'a str,
    blobs: &'a [ClassifiedBlob],
    violations: &'a [Violation],
}

pub struct App {
    cli: Cli,
    config: Config,
}

impl App {
    pub fn new(cli: Cli) -> Result<Self> {
        let config = Config::load(&cli)?;
        debug!(
            base_ref = %config.base_ref,
            head_ref = %config.head_ref,
            scan_mode = %config.scan_mode,
            fail_on = %config.fail_on,
            "config loaded"
        );
        Ok(Self { cli, config })
    }

    /// Run the scan. Returns the process exit code.
    pub fn run(&self) -> Result<i32> {
        let repo_path = self
            .cli
            .repo
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        let repo = GitRepo::discover(&repo_path)?;
        debug!(work_dir = %repo.work_dir().display(), "repository discovered");

        let merge_base = repo.merge_base(&self.config.base_ref, &self.config.head_ref)?;
        let head = repo.rev_parse(&self.config.head_ref)?;
        let range = format!("{merge_base}..{head}");

        let blobs = match self.config.scan_mode {
            ScanMode::History => augment::classify_range(&repo, &range)?,
            ScanMode::Diff => {
                let records = enumerator::enumerate_diff(&repo, &merge_base, &head)?;
                augment::classify_records(&repo, records)
            }
        };

        let violations = policy::evaluate(&blobs, &self.config);

        if self.cli.json {
            let report = Report {
                range: &range,
                blobs: &blobs,
                violations: &violations,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            self.print_report(&range, &blobs, &violations);
        }

        if policy::should_fail(&violations, self.config.fail_on) {
            return Ok(1);
        }
        Ok(0)
    }

    fn print_report(&self, range: &str, blobs: &[ClassifiedBlob], violations: &[Violation]) {
        println!(
            "{} {} changed blob(s) in {}",
            style("»").cyan().bold(),
            blobs.len(),
            style(range).bold()
        );

        for blob in blobs {
            let status = match blob.status {
                ChangeStatus::Added => style("A").green(),
                ChangeStatus::Modified => style("M").yellow(),
                ChangeStatus::Deleted => style("D").red(),
                ChangeStatus::Other => style("?").dim(),
            };
            let size = match blob.size_bytes {
                Some(s) => format!("{s} B"),
                None => "size unknown".to_string(),
            };
            let kind = match (blob.is_binary, &blob.mime) {
                (Some(true), Some(mime)) => format!("binary ({mime})"),
                (Some(false), Some(mime)) => format!("text ({mime})"),
                (Some(true), None) => "binary".to_string(),
                (Some(false), None) => "text".to_string(),
                (None, _) => "type unknown".to_string(),
            };
            let confidence = blob
                .confidence
                .map(|c| format!(", {c} confidence"))
                .unwrap_or_default();
            println!("  {status} {}  {size}, {kind}{confidence}", blob.path);
        }

        if violations.is_empty() {
            println!("{} no policy violations", style("✓").green().bold());
        } else {
            println!(
                "{} {} violation(s):",
                style("✗").red().bold(),
                violations.len()
            );
            for v in violations {
                println!(
                    "  {} [{}] {}: {}",
                    style(&v.severity).red(),
                    v.rule,
                    v.path(),
                    v.message
                );
            }
        }
    }
}

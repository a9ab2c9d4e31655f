// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FailOn {
    Warn,
    #[default]
    Error,
}

impl std::fmt::Display for FailOn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    /// Walk every commit between merge-base and head.
    #[default]
    History,
    /// Single diff of merge-base against the head tip.
    Diff,
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::History => write!(f, "history"),
            Self::Diff => write!(f, "diff"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_ref")]
    pub base_ref: String,

    #[serde(default = "default_head_ref")]
    pub head_ref: String,

    /// Maximum text file size in KB; unlimited when absent.
    #[serde(default)]
    pub max_text_size_kb: Option<u64>,

    /// Maximum binary file size in KB; unlimited when absent.
    #[serde(default)]
    pub max_binary_size_kb: Option<u64>,

    #[serde(default)]
    pub fail_on: FailOn,

    #[serde(default)]
    pub scan_mode: ScanMode,
}

fn default_base_ref() -> String {
    "origin/main".into()
}
fn default_head_ref() -> String {
    "HEAD".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_ref: default_base_ref(),
            head_ref: default_head_ref(),
            max_text_size_kb: None,
            max_binary_size_kb: None,
            fail_on: FailOn::default(),
            scan_mode: ScanMode::default(),
        }
    }
}

impl Config {
    /// Load config: defaults, then the user-level config file, then the
    /// repo policy file, then environment, then CLI flags.
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));

        if let Some(path) = Self::user_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        let policy_path = cli
            .policy_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(".github/repo-guardian.toml"));
        figment = figment.merge(Toml::file(policy_path));

        let mut config: Config = figment
            .merge(Env::prefixed("REPO_GUARDIAN_").ignore(&["base_ref", "head_ref"]))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        // CLI flags win over everything.
        if let Some(ref base) = cli.base_ref {
            config.base_ref = base.clone();
        }
        if let Some(ref head) = cli.head_ref {
            config.head_ref = head.clone();
        }
        if let Some(kb) = cli.max_text_size_kb {
            config.max_text_size_kb = Some(kb);
        }
        if let Some(kb) = cli.max_binary_size_kb {
            config.max_binary_size_kb = Some(kb);
        }
        if let Some(fail_on) = cli.fail_on {
            config.fail_on = fail_on;
        }
        if let Some(mode) = cli.scan_mode {
            config.scan_mode = mode;
        }

        Ok(config)
    }

    fn user_config_path() -> Option<PathBuf> {
        let dirs = ProjectDirs::from("io", "sephy", "repo-guardian")?;
        Some(dirs.config_dir().join("config.toml"))
    }
}

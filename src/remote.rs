// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Jonathan D.A. Jewell
//! Origin remote URL resolution
//!
//! An ordered chain of lookup strategies, first hit wins. A miss at every
//! tier means the repository has no discoverable origin remote, which is a
//! normal state rather than an error.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// Bound on the external `git` fallback so one hung lookup cannot stall a
/// whole scan.
const GIT_FALLBACK_TIMEOUT: Duration = Duration::from_secs(5);

/// One way of looking up a repository's origin URL.
pub trait RemoteStrategy {
    /// Short name for logging
    fn name(&self) -> &'static str;
    /// Returns the URL, or `None` to fall through to the next strategy.
    fn lookup(&self, repo: &Path) -> Option<String>;
}

/// Reads the origin remote from the repository's own on-disk configuration.
pub struct LocalConfigLookup;

impl RemoteStrategy for LocalConfigLookup {
    fn name(&self) -> &'static str {
        "local-config"
    }

    fn lookup(&self, repo: &Path) -> Option<String> {
        let repository = gix::open(repo).ok()?;
        let remote = repository.find_remote("origin").ok()?;
        let url = remote.url(gix::remote::Direction::Fetch)?;
        Some(url.to_bstring().to_string())
    }
}

/// Asks the external `git` binary, bounded by a fixed timeout.
pub struct GitCliLookup {
    timeout: Duration,
}

impl Default for GitCliLookup {
    fn default() -> Self {
        Self {
            timeout: GIT_FALLBACK_TIMEOUT,
        }
    }
}

impl RemoteStrategy for GitCliLookup {
    fn name(&self) -> &'static str {
        "git-cli"
    }

    fn lookup(&self, repo: &Path) -> Option<String> {
        let mut child = Command::new("git")
            .arg("-C")
            .arg(repo)
            .args(["remote", "get-url", "origin"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .ok()?;

        let deadline = Instant::now() + self.timeout;
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if Instant::now() >= deadline {
                        debug!("git remote lookup timed out for {}", repo.display());
                        let _ = child.kill();
                        let _ = child.wait();
                        return None;
                    }
                    std::thread::sleep(Duration::from_millis(50));
                }
                Err(_) => return None,
            }
        };

        if !status.success() {
            return None;
        }

        let mut stdout = String::new();
        child.stdout.take()?.read_to_string(&mut stdout).ok()?;
        let url = stdout.trim();
        if url.is_empty() {
            None
        } else {
            Some(url.to_string())
        }
    }
}

/// The resolver: an ordered fallback chain over [`RemoteStrategy`] values.
pub struct RemoteUrlResolver {
    strategies: Vec<Box<dyn RemoteStrategy>>,
}

impl Default for RemoteUrlResolver {
    fn default() -> Self {
        Self {
            strategies: vec![
                Box::new(LocalConfigLookup),
                Box::new(GitCliLookup::default()),
            ],
        }
    }
}

impl RemoteUrlResolver {
    /// Build a resolver from an explicit strategy chain.
    #[must_use]
    pub fn new(strategies: Vec<Box<dyn RemoteStrategy>>) -> Self {
        Self { strategies }
    }

    /// Try each strategy in order; `None` when all miss.
    #[must_use]
    pub fn resolve(&self, repo: &Path) -> Option<String> {
        for strategy in &self.strategies {
            if let Some(url) = strategy.lookup(repo) {
                debug!("{} resolved origin for {}", strategy.name(), repo.display());
                return Some(url);
            }
        }
        debug!("no origin remote found for {}", repo.display());
        None
    }
}

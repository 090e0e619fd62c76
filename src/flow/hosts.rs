//! Hosts-file editing for focus mode.
//!
//! Blocked sites are appended as one marker-delimited block, so
//! deactivation can strip exactly what activation added and never touch
//! the rest of the file. Editing /etc/hosts needs root; the error type
//! says so instead of surfacing a bare EACCES.

use std::fs;
use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;
use tracing::debug;

const BLOCK_START: &str = "# flowstate focus mode start";
const BLOCK_END: &str = "# flowstate focus mode end";
const REDIRECT: &str = "127.0.0.1";

#[derive(Error, Diagnostic, Debug)]
pub enum FlowError {
    #[error("Permission denied editing {path}")]
    #[diagnostic(
        code(flowstate::flow::permission),
        help("Editing the hosts file requires root; rerun with sudo")
    )]
    Permission { path: String },

    #[error("No blocked sites configured")]
    #[diagnostic(
        code(flowstate::flow::no_sites),
        help("Add one with 'flowstate mode block <site>'")
    )]
    NoSites,

    #[error("Hosts file error: {0}")]
    #[diagnostic(code(flowstate::flow::io))]
    Io(#[from] std::io::Error),
}

pub type FlowResult<T> = Result<T, FlowError>;

/// Focus mode toggler bound to one hosts file.
pub struct FlowMode {
    hosts_path: PathBuf,
}

impl Default for FlowMode {
    fn default() -> Self {
        Self::new()
    }
}

impl FlowMode {
    pub fn new() -> Self {
        Self::with_hosts_path("/etc/hosts")
    }

    pub fn with_hosts_path(path: impl Into<PathBuf>) -> Self {
        Self {
            hosts_path: path.into(),
        }
    }

    pub fn is_active(&self) -> FlowResult<bool> {
        let contents = self.read_hosts()?;
        Ok(contents.contains(BLOCK_START))
    }

    /// Write the block list into the hosts file, replacing any block a
    /// previous activation left behind. Returns the number of sites
    /// blocked.
    pub fn activate(&self, sites: &[String]) -> FlowResult<usize> {
        if sites.is_empty() {
            return Err(FlowError::NoSites);
        }

        let contents = self.read_hosts()?;
        self.backup(&contents)?;

        let mut updated = strip_block(&contents);
        if !updated.ends_with('\n') && !updated.is_empty() {
            updated.push('\n');
        }
        updated.push_str(&render_block(sites));
        self.write_hosts(&updated)?;
        flush_dns();
        Ok(sites.len())
    }

    /// Remove the marker block, leaving the rest of the file untouched.
    pub fn deactivate(&self) -> FlowResult<()> {
        let contents = self.read_hosts()?;
        if !contents.contains(BLOCK_START) {
            return Ok(());
        }
        self.write_hosts(&strip_block(&contents))?;
        flush_dns();
        Ok(())
    }

    fn backup(&self, contents: &str) -> FlowResult<()> {
        let mut backup = self.hosts_path.clone().into_os_string();
        backup.push(".flowstate.bak");
        fs::write(&backup, contents).map_err(|e| self.map_io(e))?;
        Ok(())
    }

    fn read_hosts(&self) -> FlowResult<String> {
        fs::read_to_string(&self.hosts_path).map_err(|e| self.map_io(e))
    }

    fn write_hosts(&self, contents: &str) -> FlowResult<()> {
        fs::write(&self.hosts_path, contents).map_err(|e| self.map_io(e))
    }

    fn map_io(&self, e: std::io::Error) -> FlowError {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            FlowError::Permission {
                path: self.hosts_path.display().to_string(),
            }
        } else {
            FlowError::Io(e)
        }
    }
}

/// Marker-delimited hosts entries for the given sites. Each site is
/// redirected both bare and with a `www.` prefix.
pub(crate) fn render_block(sites: &[String]) -> String {
    let mut block = String::new();
    block.push_str(BLOCK_START);
    block.push('\n');
    for site in sites {
        let site = site.trim();
        if site.is_empty() {
            continue;
        }
        block.push_str(&format!("{} {}\n", REDIRECT, site));
        if !site.starts_with("www.") {
            block.push_str(&format!("{} www.{}\n", REDIRECT, site));
        }
    }
    block.push_str(BLOCK_END);
    block.push('\n');
    block
}

/// Contents with the flowstate block removed. Unbalanced markers drop
/// everything from the start marker onward rather than leaving stray
/// redirect lines behind.
pub(crate) fn strip_block(contents: &str) -> String {
    let mut out = String::with_capacity(contents.len());
    let mut in_block = false;
    for line in contents.lines() {
        if line.trim() == BLOCK_START {
            in_block = true;
            continue;
        }
        if line.trim() == BLOCK_END {
            in_block = false;
            continue;
        }
        if !in_block {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

#[cfg(target_os = "macos")]
fn flush_dns() {
    debug!("flushing dns cache");
    let _ = std::process::Command::new("dscacheutil")
        .arg("-flushcache")
        .status();
    let _ = std::process::Command::new("killall")
        .args(["-HUP", "mDNSResponder"])
        .status();
}

#[cfg(target_os = "linux")]
fn flush_dns() {
    debug!("flushing dns cache");
    let _ = std::process::Command::new("resolvectl")
        .arg("flush-caches")
        .status();
}

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
fn flush_dns() {}

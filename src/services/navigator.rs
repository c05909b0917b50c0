use crate::core::errors::{Error, Result};
use crate::models::file_entry::DirectoryEntry;
use crate::services::fs::listing::{snapshot_dir, Snapshot};
use crate::services::fs::resolve::{normalize, resolve_target};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Current directory plus the listing of every directory visited so far,
/// keyed by absolute path in lexicographic order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigatorState {
    current_dir: String,
    recent_dirs: BTreeMap<String, Vec<DirectoryEntry>>,
}

impl NavigatorState {
    /// A state sitting in `current_dir` with `entries` as its listing.
    pub fn new(current_dir: impl Into<String>, entries: Vec<DirectoryEntry>) -> Self {
        let current_dir = current_dir.into();
        let mut recent_dirs = BTreeMap::new();
        recent_dirs.insert(current_dir.clone(), entries);
        Self {
            current_dir,
            recent_dirs,
        }
    }

    pub fn current_dir(&self) -> &str {
        &self.current_dir
    }

    pub fn recent_dirs(&self) -> &BTreeMap<String, Vec<DirectoryEntry>> {
        &self.recent_dirs
    }

    fn adopt(&mut self, dir: String, entries: Vec<DirectoryEntry>) {
        self.recent_dirs.insert(dir.clone(), entries);
        self.current_dir = dir;
    }
}

/// Owns the navigation state. All mutation goes through `&mut self`.
pub struct Navigator {
    state: NavigatorState,
}

impl Navigator {
    /// Opens the process working directory.
    pub fn new() -> Result<(Self, Vec<Error>)> {
        let cwd = std::env::current_dir()?;
        Self::open(&cwd)
    }

    /// Opens `start` and captures its listing right away. Entries that could
    /// not be read are returned next to the navigator.
    pub fn open(start: &Path) -> Result<(Self, Vec<Error>)> {
        let start = normalize(&std::path::absolute(start)?);
        if !start.is_dir() {
            return Err(Error::NotADirectory(start.display().to_string()));
        }

        let (dir, Snapshot { entries, denied }) = capture(start)?;
        let navigator = Self::from(NavigatorState::new(dir, entries));
        tracing::info!(dir = navigator.current_dir(), "navigator opened");
        Ok((navigator, denied))
    }

    pub fn state(&self) -> &NavigatorState {
        &self.state
    }

    pub fn current_dir(&self) -> &str {
        self.state.current_dir()
    }

    /// Moves to `target` and re-snapshots it. On error nothing changes.
    pub fn change_directory(&mut self, target: &str) -> Result<Vec<Error>> {
        let resolved = resolve_target(Path::new(&self.state.current_dir), target)?;
        let denied = self.visit(resolved)?;
        tracing::info!(dir = self.current_dir(), "changed directory");
        Ok(denied)
    }

    /// The cached listing of the current directory. Never re-scans.
    pub fn list_current_directory(&self) -> &[DirectoryEntry] {
        self.state
            .recent_dirs
            .get(&self.state.current_dir)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Every visited directory, in lexicographic order.
    pub fn list_recent_directories(&self) -> Vec<&str> {
        self.state.recent_dirs.keys().map(String::as_str).collect()
    }

    /// Looks up a visited directory by its 1-based position in
    /// [`list_recent_directories`](Self::list_recent_directories).
    pub fn list_directory_by_recent_index(&self, index: i64) -> Result<(&str, &[DirectoryEntry])> {
        let count = self.state.recent_dirs.len();
        if index < 1 || index as u64 > count as u64 {
            return Err(Error::IndexOutOfRange { index, count });
        }
        self.state
            .recent_dirs
            .iter()
            .nth((index - 1) as usize)
            .map(|(path, entries)| (path.as_str(), entries.as_slice()))
            .ok_or(Error::IndexOutOfRange { index, count })
    }

    fn visit(&mut self, dir: PathBuf) -> Result<Vec<Error>> {
        let (dir, Snapshot { entries, denied }) = capture(dir)?;
        self.state.adopt(dir, entries);
        Ok(denied)
    }
}

/// Resumes navigation from a previously captured state. No re-scan.
impl From<NavigatorState> for Navigator {
    fn from(state: NavigatorState) -> Self {
        Self { state }
    }
}

/// Snapshots `dir` and returns it as a cache key. Paths that are not valid
/// UTF-8 are refused: a lossy key would not name the same directory.
fn capture(dir: PathBuf) -> Result<(String, Snapshot)> {
    let key = dir
        .into_os_string()
        .into_string()
        .map_err(|raw| Error::NonUtf8Path(PathBuf::from(raw)))?;
    let snapshot = snapshot_dir(Path::new(&key))?;
    Ok((key, snapshot))
}

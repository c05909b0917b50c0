use crate::core::errors::{Error, Result};
use crate::models::file_entry::DirectoryEntry;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::Path;
use walkdir::WalkDir;

/// A directory listing captured at one point in time, plus the children
/// (or grandchildren, while sizing) that could not be read.
#[derive(Debug, Default)]
pub struct Snapshot {
    pub entries: Vec<DirectoryEntry>,
    pub denied: Vec<Error>,
}

/// Partial recursive size of a directory and the errors hit on the way.
#[derive(Debug, Default)]
pub struct SizeReport {
    pub size: u64,
    pub errors: Vec<Error>,
}

/// Lists the immediate children of `dir`, sized and sorted.
///
/// Only failing to open `dir` itself is an error. A child that cannot be
/// stat'd is left out and reported in [`Snapshot::denied`]; unreadable
/// content below a child directory only shrinks that child's size.
pub fn snapshot_dir(dir: &Path) -> Result<Snapshot> {
    let mut snapshot = Snapshot::default();

    for entry in fs::read_dir(dir)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) => {
                snapshot.denied.push(denied(dir, source));
                continue;
            }
        };
        let path = entry.path();
        let name = os_str_to_string(entry.file_name());

        // Follows symlinks so a link to a directory lists as one.
        let md = match fs::metadata(&path) {
            Ok(md) => md,
            Err(source) => {
                snapshot.denied.push(denied(&path, source));
                continue;
            }
        };

        if md.is_dir() {
            let report = dir_size(&path);
            snapshot.denied.extend(report.errors);
            snapshot.entries.push(DirectoryEntry::directory(name, report.size));
        } else {
            snapshot.entries.push(DirectoryEntry::file(name, md.len()));
        }
    }

    sort_entries(&mut snapshot.entries);
    tracing::debug!(
        dir = %dir.display(),
        entries = snapshot.entries.len(),
        denied = snapshot.denied.len(),
        "snapshot taken"
    );
    Ok(snapshot)
}

/// Sums the lengths of all regular files below `root`, depth first.
/// Symlinks are not followed.
pub fn dir_size(root: &Path) -> SizeReport {
    let mut report = SizeReport::default();

    for item in WalkDir::new(root).min_depth(1).follow_links(false) {
        match item {
            Ok(entry) => {
                if !entry.file_type().is_file() {
                    continue;
                }
                match entry.metadata() {
                    Ok(md) => report.size += md.len(),
                    Err(err) => {
                        let path = entry.path().to_path_buf();
                        report.errors.push(denied(&path, io::Error::from(err)));
                    }
                }
            }
            Err(err) => {
                let path = err.path().unwrap_or(root).to_path_buf();
                report.errors.push(denied(&path, io::Error::from(err)));
            }
        }
    }

    report
}

/// Directories first, then case-insensitive name order.
pub fn compare_entries(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    b.is_dir()
        .cmp(&a.is_dir())
        .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
        .then_with(|| a.name.cmp(&b.name))
}

pub fn sort_entries(entries: &mut [DirectoryEntry]) {
    entries.sort_by(compare_entries);
}

fn denied(path: &Path, source: io::Error) -> Error {
    tracing::warn!(path = %path.display(), "skipping unreadable entry: {}", source);
    Error::EntryAccessDenied {
        path: path.to_path_buf(),
        source,
    }
}

fn os_str_to_string(s: impl AsRef<OsStr>) -> String {
    s.as_ref().to_string_lossy().into_owned()
}

// SPDX-FileCopyrightText: 2026 Componentry Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Descriptor discovery on disk.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// Recursively collects files ending in `.{extension}` under `root`.
///
/// Hidden entries (dot-prefixed) are skipped together with everything below
/// them. Results follow file-name order within each directory.
pub fn find_descriptors(root: &Path, extension: &str) -> Vec<PathBuf> {
    let descriptors: Vec<PathBuf> = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry))
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(err) => {
                warn!("skipping unreadable entry under {}: {err}", root.display());
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .filter(|entry| entry.path().extension() == Some(OsStr::new(extension)))
        .map(DirEntry::into_path)
        .collect();

    debug!(
        "found {} descriptor(s) under {}",
        descriptors.len(),
        root.display()
    );
    descriptors
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

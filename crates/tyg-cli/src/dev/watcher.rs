//! File system watcher with debouncing for development mode.
//!
//! Watches the project directory recursively and forwards relevant change
//! events into the async event loop, filtering out ignored directories,
//! hidden files and rapid duplicate notifications for the same path.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::error::{CliError, Result};

/// File change event type.
#[derive(Debug, Clone)]
pub enum FileChange {
    /// File was modified
    Modified(PathBuf),
    /// File was created
    Created(PathBuf),
    /// File was removed
    Removed(PathBuf),
}

impl FileChange {
    /// The path affected by this change.
    pub fn path(&self) -> &Path {
        match self {
            FileChange::Modified(p) | FileChange::Created(p) | FileChange::Removed(p) => p,
        }
    }

    /// Whether the file still exists after this change.
    pub fn is_write(&self) -> bool {
        matches!(self, FileChange::Modified(_) | FileChange::Created(_))
    }
}

/// File watcher with debouncing and filtering.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
    root: PathBuf,
}

impl FileWatcher {
    /// Watch `root` recursively, sending filtered changes through the
    /// returned channel. Events for the same path within the debounce
    /// window collapse into one.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory does not exist or the platform
    /// watcher cannot be created.
    pub fn new(
        root: PathBuf,
        ignore_patterns: Vec<String>,
        debounce_ms: u64,
    ) -> Result<(Self, mpsc::Receiver<FileChange>)> {
        if !root.exists() {
            return Err(CliError::Server(format!(
                "watch root does not exist: {}",
                root.display()
            )));
        }

        let (tx, rx) = mpsc::channel(100);

        let debounce = Duration::from_millis(debounce_ms);
        let mut last_seen: HashMap<PathBuf, Instant> = HashMap::new();
        let root_clone = root.clone();

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let Ok(event) = res else { return };
            for path in &event.paths {
                if Self::should_ignore(path, &root_clone, &ignore_patterns) {
                    continue;
                }

                let now = Instant::now();
                if let Some(last) = last_seen.get(path) {
                    if now.duration_since(*last) < debounce {
                        continue;
                    }
                }
                last_seen.insert(path.clone(), now);

                let change = match event.kind {
                    notify::EventKind::Create(_) => FileChange::Created(path.clone()),
                    notify::EventKind::Modify(_) => FileChange::Modified(path.clone()),
                    notify::EventKind::Remove(_) => FileChange::Removed(path.clone()),
                    _ => continue,
                };
                let _ = tx.blocking_send(change);
            }
        })
        .map_err(CliError::Watch)?;

        watcher
            .watch(&root, RecursiveMode::Recursive)
            .map_err(CliError::Watch)?;

        Ok((
            Self {
                _watcher: watcher,
                root,
            },
            rx,
        ))
    }

    /// The root directory being watched.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn should_ignore(path: &Path, root: &Path, ignore_patterns: &[String]) -> bool {
        // Only react to paths inside the watch root.
        if !path.starts_with(root) {
            return true;
        }
        let Ok(rel_path) = path.strip_prefix(root) else {
            return true;
        };

        for component in rel_path.components() {
            let Some(name) = component.as_os_str().to_str() else {
                return true;
            };
            // Hidden files, and our own temp siblings, never matter.
            if name.starts_with('.') {
                return true;
            }
            if ignore_patterns.iter().any(|p| p == name) {
                return true;
            }
        }
        false
    }
}

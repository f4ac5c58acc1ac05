use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use anyhow::{Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::storage::{PROJECTS_FILE, TASKS_FILE};

/// True when any path in the event names one of the two store files.
/// Writes go through a temp file renamed over the target, so the rename
/// destination is what identifies a store change; unrelated files in the
/// directory are ignored.
fn touches_store_files(event: &Event) -> bool {
    event.paths.iter().any(|p| {
        matches!(
            p.file_name().and_then(|n| n.to_str()),
            Some(name) if name == TASKS_FILE || name == PROJECTS_FILE
        )
    })
}

/// Creates a watcher for the store directory and returns a receiver that
/// fires when either store file changes. The watcher must be kept alive
/// for events to be received.
pub fn watch_store(store_dir: &Path) -> Result<(RecommendedWatcher, Receiver<()>)> {
    let (tx, rx) = mpsc::channel();

    let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
        if let Ok(event) = res {
            if touches_store_files(&event) {
                // Ignore send errors (receiver dropped)
                let _ = tx.send(());
            }
        }
    })
    .context("failed to create file watcher")?;

    watcher
        .watch(store_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", store_dir.display()))?;

    Ok((watcher, rx))
}

/// Waits for a store change event with timeout.
/// Returns true if an event was received, false on timeout.
pub fn wait_for_change(rx: &Receiver<()>, timeout: Duration) -> bool {
    rx.recv_timeout(timeout).is_ok()
}

/// Drains any pending events from the receiver.
pub fn drain_events(rx: &Receiver<()>) {
    while rx.try_recv().is_ok() {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn event_for(paths: &[&str]) -> Event {
        let mut event = Event::new(notify::EventKind::Any);
        event.paths = paths.iter().map(PathBuf::from).collect();
        event
    }

    #[test]
    fn store_files_match() {
        assert!(touches_store_files(&event_for(&["/store/tasks.json"])));
        assert!(touches_store_files(&event_for(&["/store/projects.json"])));
        // Rename events may carry the temp source alongside the target
        assert!(touches_store_files(&event_for(&[
            "/store/.tmpabc123",
            "/store/tasks.json"
        ])));
    }

    #[test]
    fn unrelated_files_are_ignored() {
        assert!(!touches_store_files(&event_for(&["/store/.tmpabc123"])));
        assert!(!touches_store_files(&event_for(&["/store/other.json"])));
        assert!(!touches_store_files(&event_for(&[])));
    }
}

use std::io::Write;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::Result;
use crate::model::Task;

/// Fixed file names inside the store directory, one per collection.
pub const TASKS_FILE: &str = "tasks.json";
pub const PROJECTS_FILE: &str = "projects.json";

/// On-disk layout: a directory holding one JSON array per collection.
/// Each mutation rewrites the affected file in full.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.exists() {
            std::fs::create_dir_all(&dir)?;
        }
        Ok(Self { dir })
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        self.load_collection(TASKS_FILE)
    }

    pub fn load_projects(&self) -> Vec<String> {
        self.load_collection(PROJECTS_FILE)
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.save_collection(TASKS_FILE, tasks)
    }

    pub fn save_projects(&self, projects: &[String]) -> Result<()> {
        self.save_collection(PROJECTS_FILE, projects)
    }

    /// Missing or corrupted JSON is treated as "no prior data": the caller
    /// gets an empty collection, never an error.
    fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Vec<T> {
        let path = self.dir.join(file);
        let contents = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read store file");
                return Vec::new();
            }
        };
        match serde_json::from_str(&contents) {
            Ok(items) => items,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "corrupted store file, starting empty");
                Vec::new()
            }
        }
    }

    /// Full rewrite, atomically: write a temp file in the store directory,
    /// then rename over the target.
    fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<()> {
        let path = self.dir.join(file);
        let json = serde_json::to_string_pretty(items)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        debug!(path = %path.display(), count = items.len(), "store file written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::model::Status;

    fn make_task(id: &str, title: &str) -> Task {
        let now = Utc::now();
        Task {
            id: id.to_string(),
            title: title.to_string(),
            project: "Personal".to_string(),
            description: String::new(),
            status: Status::Todo,
            due_date: None,
            tags: vec!["alta".to_string()],
            subtasks: vec!["step one".to_string()],
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn missing_files_load_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        assert!(storage.load_tasks().is_empty());
        assert!(storage.load_projects().is_empty());
    }

    #[test]
    fn tasks_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let tasks = vec![make_task("1", "one"), make_task("2", "two")];
        storage.save_tasks(&tasks).unwrap();
        let loaded = storage.load_tasks();
        assert_eq!(loaded, tasks);
    }

    #[test]
    fn projects_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        let projects = vec!["Personal".to_string(), "Trabajo".to_string()];
        storage.save_projects(&projects).unwrap();
        assert_eq!(storage.load_projects(), projects);
    }

    #[test]
    fn corrupted_json_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        std::fs::write(dir.path().join(TASKS_FILE), "not valid json {{{").unwrap();
        assert!(storage.load_tasks().is_empty());
    }

    #[test]
    fn rewrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let storage = Storage::open(dir.path()).unwrap();
        storage
            .save_tasks(&[make_task("1", "one"), make_task("2", "two")])
            .unwrap();
        storage.save_tasks(&[make_task("3", "three")]).unwrap();
        let loaded = storage.load_tasks();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "3");
    }

    #[test]
    fn creates_store_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("deep").join("store");
        let storage = Storage::open(&nested).unwrap();
        storage.save_projects(&["Personal".to_string()]).unwrap();
        assert!(nested.join(PROJECTS_FILE).exists());
    }
}

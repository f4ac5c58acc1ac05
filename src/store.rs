use std::path::Path;

use chrono::Utc;
use uuid::Uuid;

use crate::error::{Result, StoreError};
use crate::model::{NewTask, Status, Task, TaskPatch};
use crate::storage::Storage;
use crate::validate::{validate_project_name, validate_title};

/// The project every store starts with. It can never be removed; the check
/// is case-insensitive so "personal" names the same protected project.
pub const DEFAULT_PROJECT: &str = "Personal";

/// Owns the task array and the project registry. Views never copy this
/// state; they read it through `list`/`tasks` and recompute projections.
///
/// Every successful mutation rewrites the backing JSON files in full.
/// A write failure surfaces as `Persistence` after the in-memory change
/// has applied (last write wins; all access is single-threaded).
pub struct Store {
    tasks: Vec<Task>,
    projects: Vec<String>,
    storage: Option<Storage>,
}

impl Store {
    /// Open a store backed by `dir`, loading whatever is there. An empty
    /// registry is seeded with the default project.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let storage = Storage::open(dir.as_ref())?;
        let tasks = storage.load_tasks();
        let mut projects = storage.load_projects();
        if projects.is_empty() {
            projects.push(DEFAULT_PROJECT.to_string());
            storage.save_projects(&projects)?;
        }
        Ok(Self {
            tasks,
            projects,
            storage: Some(storage),
        })
    }

    /// Ephemeral store for tests and dry runs; nothing touches disk.
    pub fn in_memory() -> Self {
        Self {
            tasks: Vec::new(),
            projects: vec![DEFAULT_PROJECT.to_string()],
            storage: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn projects(&self) -> &[String] {
        &self.projects
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All tasks belonging to `project`, insertion order preserved.
    pub fn list(&self, project: &str) -> Vec<&Task> {
        self.tasks.iter().filter(|t| t.project == project).collect()
    }

    pub fn create(&mut self, input: NewTask) -> Result<Task> {
        validate_title(&input.title)?;
        let project = input
            .project
            .unwrap_or_else(|| DEFAULT_PROJECT.to_string());
        self.require_project(&project)?;

        let id = match input.id {
            Some(id) => {
                if self.get(&id).is_some() {
                    return Err(StoreError::Validation(format!(
                        "task id '{id}' already exists"
                    )));
                }
                id
            }
            None => generate_id(),
        };

        let now = Utc::now();
        let task = Task {
            id,
            title: input.title,
            project,
            description: input.description,
            status: input.status.unwrap_or(Status::Todo),
            due_date: input.due_date,
            tags: dedup(input.tags),
            subtasks: Vec::new(),
            comments: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        self.tasks.push(task.clone());
        self.persist_tasks()?;
        Ok(task)
    }

    /// Merge `patch` into the task. Id and `created_at` are preserved;
    /// `updated_at` is bumped.
    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Task> {
        if let Some(ref title) = patch.title {
            validate_title(title)?;
        }
        if let Some(ref project) = patch.project {
            self.require_project(project)?;
        }
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;

        if let Some(title) = patch.title {
            task.title = title;
        }
        if let Some(project) = patch.project {
            task.project = project;
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(due_date) = patch.due_date {
            task.due_date = due_date;
        }
        if let Some(tags) = patch.tags {
            task.tags = dedup(tags);
        }
        if let Some(subtasks) = patch.subtasks {
            task.subtasks = subtasks;
        }
        if let Some(comments) = patch.comments {
            task.comments = comments;
        }
        task.updated_at = Utc::now();
        let updated = task.clone();
        self.persist_tasks()?;
        Ok(updated)
    }

    pub fn remove(&mut self, id: &str) -> Result<()> {
        let len = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == len {
            return Err(StoreError::TaskNotFound(id.to_string()));
        }
        self.persist_tasks()
    }

    /// Convenience update used by drag-drop.
    pub fn set_status(&mut self, id: &str, status: Status) -> Result<Task> {
        self.update(
            id,
            TaskPatch {
                status: Some(status),
                ..TaskPatch::default()
            },
        )
    }

    pub fn add_comment(&mut self, id: &str, text: &str) -> Result<Task> {
        let mut comments = self
            .get(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?
            .comments
            .clone();
        comments.push(text.to_string());
        self.update(
            id,
            TaskPatch {
                comments: Some(comments),
                ..TaskPatch::default()
            },
        )
    }

    pub fn add_subtask(&mut self, id: &str, text: &str) -> Result<Task> {
        let mut subtasks = self
            .get(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?
            .subtasks
            .clone();
        subtasks.push(text.to_string());
        self.update(
            id,
            TaskPatch {
                subtasks: Some(subtasks),
                ..TaskPatch::default()
            },
        )
    }

    /// Add a tag with set semantics: adding an existing tag is a no-op.
    pub fn add_tag(&mut self, id: &str, tag: &str) -> Result<Task> {
        let task = self
            .get(id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        if task.tags.iter().any(|t| t == tag) {
            return Ok(task.clone());
        }
        let mut tags = task.tags.clone();
        tags.push(tag.to_string());
        self.update(
            id,
            TaskPatch {
                tags: Some(tags),
                ..TaskPatch::default()
            },
        )
    }

    pub fn add_project(&mut self, name: &str) -> Result<()> {
        validate_project_name(name)?;
        if self
            .projects
            .iter()
            .any(|p| p.eq_ignore_ascii_case(name))
        {
            return Err(StoreError::DuplicateProject(name.to_string()));
        }
        self.projects.push(name.to_string());
        self.persist_projects()
    }

    /// Remove a project and every task scoped to it. The default project
    /// is protected.
    pub fn remove_project(&mut self, name: &str) -> Result<()> {
        if name.eq_ignore_ascii_case(DEFAULT_PROJECT) {
            return Err(StoreError::ProtectedProject(name.to_string()));
        }
        let Some(pos) = self
            .projects
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))
        else {
            return Err(StoreError::ProjectNotFound(name.to_string()));
        };
        // Cascade with the registered spelling, matching how tasks are scoped
        let canonical = self.projects.remove(pos);
        self.tasks.retain(|t| t.project != canonical);
        self.persist_projects()?;
        self.persist_tasks()
    }

    fn require_project(&self, name: &str) -> Result<()> {
        if self.projects.iter().any(|p| p == name) {
            Ok(())
        } else {
            Err(StoreError::ProjectNotFound(name.to_string()))
        }
    }

    fn persist_tasks(&self) -> Result<()> {
        match &self.storage {
            Some(s) => s.save_tasks(&self.tasks),
            None => Ok(()),
        }
    }

    fn persist_projects(&self) -> Result<()> {
        match &self.storage {
            Some(s) => s.save_projects(&self.projects),
            None => Ok(()),
        }
    }
}

/// Ids mirror the original quick-add scheme: creation time in unix millis
/// plus a short random suffix to break same-millisecond collisions.
fn generate_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{millis}-{}", &suffix[..4])
}

fn dedup(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

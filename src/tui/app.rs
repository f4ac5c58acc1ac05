use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};

use crate::dragdrop;
use crate::model::{NewTask, SortKey, Status};
use crate::store::Store;
use crate::view;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Kanban,
    Calendar,
    List,
}

impl View {
    pub fn next(self) -> Self {
        match self {
            Self::Kanban => Self::Calendar,
            Self::Calendar => Self::List,
            Self::List => Self::Kanban,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Kanban => "Kanban",
            Self::Calendar => "Calendar",
            Self::List => "List",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    AddTask,
    ConfirmDelete,
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddField {
    Title,
    Description,
    Due,
}

pub struct AddForm {
    pub title: String,
    pub description: String,
    pub due: String,
    pub focused: AddField,
    pub error: Option<String>,
}

impl AddForm {
    pub fn new() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due: String::new(),
            focused: AddField::Title,
            error: None,
        }
    }

    pub fn focused_buf_mut(&mut self) -> &mut String {
        match self.focused {
            AddField::Title => &mut self.title,
            AddField::Description => &mut self.description,
            AddField::Due => &mut self.due,
        }
    }

    pub fn next_field(&mut self) {
        self.focused = match self.focused {
            AddField::Title => AddField::Description,
            AddField::Description => AddField::Due,
            AddField::Due => AddField::Title,
        };
    }

    pub fn prev_field(&mut self) {
        self.focused = match self.focused {
            AddField::Title => AddField::Due,
            AddField::Description => AddField::Title,
            AddField::Due => AddField::Description,
        };
    }
}

pub struct App {
    pub store: Store,
    store_dir: PathBuf,
    pub project: String,
    pub view: View,
    pub mode: Mode,
    pub column: Status,
    pub cursor: usize,
    pub month: (i32, u32),
    pub sort: Option<SortKey>,
    pub add_form: Option<AddForm>,
    pub pending_delete: Option<String>,
    pub error: Option<String>,
}

impl App {
    pub fn new(store: Store, store_dir: &Path, project: &str) -> Self {
        let today = chrono::Local::now().date_naive();
        Self {
            store,
            store_dir: store_dir.to_path_buf(),
            project: project.to_string(),
            view: View::Kanban,
            mode: Mode::Normal,
            column: Status::Todo,
            cursor: 0,
            month: (today.year(), today.month()),
            sort: None,
            add_form: None,
            pending_delete: None,
            error: None,
        }
    }

    /// Re-read the store from disk (another process may have written it).
    pub fn reload(&mut self) {
        match Store::open(&self.store_dir) {
            Ok(store) => {
                self.store = store;
                self.clamp_cursor();
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    pub fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }

    /// Ids of the rows the cursor walks over in the current view.
    pub fn visible_ids(&self) -> Vec<String> {
        let tasks = self.store.list(&self.project);
        match self.view {
            View::Kanban => view::kanban(&tasks)
                .column(self.column)
                .iter()
                .map(|t| t.id.clone())
                .collect(),
            View::List => view::sorted(&tasks, self.sort)
                .iter()
                .map(|t| t.id.clone())
                .collect(),
            View::Calendar => Vec::new(),
        }
    }

    pub fn selected_id(&self) -> Option<String> {
        self.visible_ids().get(self.cursor).cloned()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_ids().len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }

    pub fn move_up(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_down(&mut self) {
        let len = self.visible_ids().len();
        if len > 0 && self.cursor < len - 1 {
            self.cursor += 1;
        }
    }

    pub fn focus_left(&mut self) {
        self.column = match self.column {
            Status::Todo => Status::Done,
            Status::InProgress => Status::Todo,
            Status::Done => Status::InProgress,
        };
        self.clamp_cursor();
    }

    pub fn focus_right(&mut self) {
        self.column = match self.column {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Todo,
        };
        self.clamp_cursor();
    }

    /// Drop the selected task onto `target`. This is the interactive face
    /// of the drag-drop controller.
    pub fn drop_selected(&mut self, target: Status) {
        let Some(id) = self.selected_id() else {
            return;
        };
        self.error = None;
        if let Err(e) = dragdrop::handle_drop(&mut self.store, &id, target) {
            self.error = Some(e.to_string());
        }
        self.clamp_cursor();
    }

    pub fn drop_selected_left(&mut self) {
        let target = match self.column {
            Status::Todo => Status::Done,
            Status::InProgress => Status::Todo,
            Status::Done => Status::InProgress,
        };
        self.drop_selected(target);
    }

    pub fn drop_selected_right(&mut self) {
        let target = match self.column {
            Status::Todo => Status::InProgress,
            Status::InProgress => Status::Done,
            Status::Done => Status::Todo,
        };
        self.drop_selected(target);
    }

    pub fn cycle_view(&mut self) {
        self.view = self.view.next();
        self.cursor = 0;
    }

    pub fn cycle_project(&mut self) {
        let projects = self.store.projects();
        if projects.is_empty() {
            return;
        }
        let pos = projects.iter().position(|p| *p == self.project);
        let next = match pos {
            Some(i) => (i + 1) % projects.len(),
            None => 0,
        };
        self.project = projects[next].clone();
        self.cursor = 0;
    }

    pub fn cycle_sort(&mut self) {
        self.sort = match self.sort {
            None => Some(SortKey::DueDate),
            Some(SortKey::DueDate) => Some(SortKey::Name),
            Some(SortKey::Name) => Some(SortKey::Newest),
            Some(SortKey::Newest) => Some(SortKey::Priority),
            Some(SortKey::Priority) => None,
        };
        self.cursor = 0;
    }

    pub fn month_prev(&mut self) {
        let (y, m) = self.month;
        self.month = if m == 1 { (y - 1, 12) } else { (y, m - 1) };
    }

    pub fn month_next(&mut self) {
        let (y, m) = self.month;
        self.month = if m == 12 { (y + 1, 1) } else { (y, m + 1) };
    }

    pub fn enter_add_mode(&mut self) {
        self.add_form = Some(AddForm::new());
        self.mode = Mode::AddTask;
    }

    pub fn cancel_add_mode(&mut self) {
        self.add_form = None;
        self.mode = Mode::Normal;
    }

    pub fn submit_add(&mut self) {
        let Some(form) = self.add_form.as_mut() else {
            return;
        };
        let due_date = if form.due.trim().is_empty() {
            None
        } else {
            match form.due.trim().parse::<NaiveDate>() {
                Ok(d) => Some(d),
                Err(_) => {
                    form.error = Some(format!("invalid due date '{}'", form.due.trim()));
                    return;
                }
            }
        };
        let input = NewTask {
            title: form.title.clone(),
            project: Some(self.project.clone()),
            description: form.description.clone(),
            due_date,
            ..NewTask::default()
        };
        match self.store.create(input) {
            Ok(_) => {
                self.add_form = None;
                self.mode = Mode::Normal;
            }
            Err(e) => {
                self.add_form.as_mut().unwrap().error = Some(e.to_string());
            }
        }
    }

    /// Deleting always goes through a confirmation step.
    pub fn request_delete(&mut self) {
        if let Some(id) = self.selected_id() {
            self.pending_delete = Some(id);
            self.mode = Mode::ConfirmDelete;
        }
    }

    pub fn confirm_delete(&mut self) {
        if let Some(id) = self.pending_delete.take() {
            if let Err(e) = self.store.remove(&id) {
                self.error = Some(e.to_string());
            }
        }
        self.mode = Mode::Normal;
        self.clamp_cursor();
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
        self.mode = Mode::Normal;
    }

    pub fn toggle_help(&mut self) {
        self.mode = match self.mode {
            Mode::Help => Mode::Normal,
            _ => Mode::Help,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with_tasks(titles: &[&str]) -> App {
        let mut store = Store::in_memory();
        for title in titles {
            store
                .create(NewTask {
                    title: title.to_string(),
                    ..NewTask::default()
                })
                .unwrap();
        }
        App::new(store, Path::new("/tmp/unused"), "Personal")
    }

    #[test]
    fn drop_selected_moves_between_columns() {
        let mut app = app_with_tasks(&["a", "b"]);
        assert_eq!(app.visible_ids().len(), 2);
        app.drop_selected_right();
        // Moved out of Todo; cursor stays on the remaining task
        assert_eq!(app.visible_ids().len(), 1);
        app.column = Status::InProgress;
        assert_eq!(app.visible_ids().len(), 1);
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut app = app_with_tasks(&["a"]);
        app.request_delete();
        assert_eq!(app.mode, Mode::ConfirmDelete);
        app.cancel_delete();
        assert_eq!(app.store.tasks().len(), 1);

        app.request_delete();
        app.confirm_delete();
        assert!(app.store.tasks().is_empty());
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn add_form_rejects_empty_title() {
        let mut app = app_with_tasks(&[]);
        app.enter_add_mode();
        app.submit_add();
        assert_eq!(app.mode, Mode::AddTask);
        assert!(app.add_form.as_ref().unwrap().error.is_some());
    }

    #[test]
    fn add_form_rejects_bad_due_date() {
        let mut app = app_with_tasks(&[]);
        app.enter_add_mode();
        let form = app.add_form.as_mut().unwrap();
        form.title = "t".to_string();
        form.due = "05/03/2025".to_string();
        app.submit_add();
        assert!(app.add_form.as_ref().unwrap().error.is_some());
        assert!(app.store.tasks().is_empty());
    }

    #[test]
    fn cycle_project_wraps() {
        let mut app = app_with_tasks(&[]);
        app.store.add_project("Trabajo").unwrap();
        app.cycle_project();
        assert_eq!(app.project, "Trabajo");
        app.cycle_project();
        assert_eq!(app.project, "Personal");
    }

    #[test]
    fn month_navigation_wraps_year() {
        let mut app = app_with_tasks(&[]);
        app.month = (2025, 1);
        app.month_prev();
        assert_eq!(app.month, (2024, 12));
        app.month_next();
        assert_eq!(app.month, (2025, 1));
        app.month = (2025, 12);
        app.month_next();
        assert_eq!(app.month, (2026, 1));
    }

    #[test]
    fn list_cursor_follows_sort() {
        let mut app = app_with_tasks(&["b", "a"]);
        app.view = View::List;
        app.sort = Some(SortKey::Name);
        let ids = app.visible_ids();
        assert_eq!(app.store.get(&ids[0]).unwrap().title, "a");
    }
}

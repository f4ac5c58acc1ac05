use crate::model::Task;
use crate::view::{Board, CalendarGrid};

pub fn format_task_detail(task: &Task) -> String {
    let mut out = String::new();
    out.push_str(&format!("Id:          {}\n", task.id));
    out.push_str(&format!("Title:       {}\n", task.title));
    out.push_str(&format!("Project:     {}\n", task.project));
    out.push_str(&format!("Status:      {}\n", task.status));
    if !task.description.is_empty() {
        out.push_str(&format!("Description: {}\n", task.description));
    }
    if let Some(due) = task.due_date {
        out.push_str(&format!("Due:         {due}\n"));
    }
    if !task.tags.is_empty() {
        out.push_str(&format!("Tags:        {}\n", task.tags.join(", ")));
    }
    out.push_str(&format!("Created:     {}\n", task.created_at.to_rfc3339()));
    out.push_str(&format!("Updated:     {}\n", task.updated_at.to_rfc3339()));

    if !task.subtasks.is_empty() {
        out.push('\n');
        out.push_str("Subtasks:\n");
        for sub in &task.subtasks {
            out.push_str(&format!("  - {sub}\n"));
        }
    }
    if !task.comments.is_empty() {
        out.push('\n');
        out.push_str("Comments:\n");
        for comment in &task.comments {
            out.push_str(&format!("  > {comment}\n"));
        }
    }

    out
}

pub fn format_task_list(tasks: &[&Task]) -> String {
    let mut out = String::new();
    for task in tasks {
        let due = task
            .due_date
            .map(|d| format!(" (due {d})"))
            .unwrap_or_default();
        let tags = if task.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", task.tags.join(", "))
        };
        out.push_str(&format!(
            "{} {}  {}{}{}\n",
            task.status.icon(),
            task.id,
            task.title,
            due,
            tags
        ));
    }
    out
}

pub fn format_board(board: &Board) -> String {
    let mut out = String::new();
    let columns = [
        ("Todo", &board.todo),
        ("In Progress", &board.in_progress),
        ("Done", &board.done),
    ];
    for (title, tasks) in columns {
        out.push_str(&format!("{title} ({})\n", tasks.len()));
        for task in tasks.iter() {
            let due = task
                .due_date
                .map(|d| format!(" (due {d})"))
                .unwrap_or_default();
            out.push_str(&format!("  {} {}{}\n", task.status.icon(), task.title, due));
        }
        out.push('\n');
    }
    out
}

pub fn format_calendar(grid: &CalendarGrid) -> String {
    let mut out = String::new();
    out.push_str(&format!("{:>4}-{:02}\n", grid.year, grid.month));
    out.push_str(" Su  Mo  Tu  We  Th  Fr  Sa\n");

    let mut slot = 0usize;
    for _ in 0..grid.leading_blanks {
        out.push_str("  . ");
        slot += 1;
    }
    for cell in &grid.cells {
        let marker = if cell.is_today {
            '*'
        } else if !cell.tasks.is_empty() {
            '!'
        } else {
            ' '
        };
        out.push_str(&format!("{:>3}{marker}", cell.day));
        slot += 1;
        if slot % 7 == 0 {
            out.push('\n');
        }
    }
    for _ in 0..grid.trailing_blanks {
        out.push_str("  . ");
        slot += 1;
        if slot % 7 == 0 {
            out.push('\n');
        }
    }

    // Day agenda under the grid
    for cell in &grid.cells {
        for task in &cell.tasks {
            out.push_str(&format!(
                "{:>4}-{:02}-{:02}  {}\n",
                grid.year, grid.month, cell.day, task.title
            ));
        }
    }
    out
}

pub fn format_projects(projects: &[String]) -> String {
    let mut out = String::new();
    for project in projects {
        out.push_str(&format!("{project}\n"));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, Status};
    use crate::store::Store;
    use crate::view;
    use chrono::NaiveDate;

    fn store_with(titles: &[(&str, Status)]) -> Store {
        let mut store = Store::in_memory();
        for (title, status) in titles {
            let t = store
                .create(NewTask {
                    title: title.to_string(),
                    ..NewTask::default()
                })
                .unwrap();
            store.set_status(&t.id, *status).unwrap();
        }
        store
    }

    #[test]
    fn detail_includes_fields() {
        let mut store = Store::in_memory();
        let task = store
            .create(NewTask {
                title: "Buy milk".to_string(),
                due_date: NaiveDate::from_ymd_opt(2025, 3, 5),
                tags: vec!["alta".to_string()],
                ..NewTask::default()
            })
            .unwrap();
        store.add_comment(&task.id, "soon please").unwrap();
        let out = format_task_detail(store.get(&task.id).unwrap());
        assert!(out.contains("Buy milk"));
        assert!(out.contains("2025-03-05"));
        assert!(out.contains("alta"));
        assert!(out.contains("> soon please"));
    }

    #[test]
    fn board_groups_by_column() {
        let store = store_with(&[("a", Status::Todo), ("b", Status::Done)]);
        let tasks = store.list("Personal");
        let out = format_board(&view::kanban(&tasks));
        assert!(out.contains("Todo (1)"));
        assert!(out.contains("In Progress (0)"));
        assert!(out.contains("Done (1)"));
    }

    #[test]
    fn calendar_rows_are_seven_wide() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let grid = view::calendar(&[], 2025, 3, today).unwrap();
        let out = format_calendar(&grid);
        let day_rows: Vec<&str> = out
            .lines()
            .skip(2)
            .filter(|l| !l.is_empty())
            .collect();
        assert_eq!(day_rows.len(), 6); // 42 slots / 7
    }

    #[test]
    fn project_list_one_per_line() {
        let projects = vec!["Personal".to_string(), "Trabajo".to_string()];
        let out = format_projects(&projects);
        assert_eq!(out, "Personal\nTrabajo\n");
    }
}

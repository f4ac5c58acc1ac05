//! Pure projections of the task store for each UI surface. Nothing here is
//! cached; callers recompute after every mutation.

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, StoreError};
use crate::model::{SortKey, Status, Task};

/// Kanban board: every task lands in exactly one column, insertion order
/// preserved within each.
#[derive(Debug, Default)]
pub struct Board<'a> {
    pub todo: Vec<&'a Task>,
    pub in_progress: Vec<&'a Task>,
    pub done: Vec<&'a Task>,
}

impl<'a> Board<'a> {
    pub fn column(&self, status: Status) -> &[&'a Task] {
        match status {
            Status::Todo => &self.todo,
            Status::InProgress => &self.in_progress,
            Status::Done => &self.done,
        }
    }
}

pub fn kanban<'a>(tasks: &[&'a Task]) -> Board<'a> {
    let mut board = Board::default();
    for task in tasks {
        match task.status {
            Status::Todo => board.todo.push(task),
            Status::InProgress => board.in_progress.push(task),
            Status::Done => board.done.push(task),
        }
    }
    board
}

/// One day of the calendar grid with the tasks due that day.
#[derive(Debug)]
pub struct DayCell<'a> {
    pub day: u32,
    pub is_today: bool,
    pub tasks: Vec<&'a Task>,
}

/// Sunday-first month grid: `leading_blanks` empty slots before day 1,
/// one cell per day, then `trailing_blanks` to pad the total to a
/// multiple of 7.
#[derive(Debug)]
pub struct CalendarGrid<'a> {
    pub year: i32,
    pub month: u32,
    pub leading_blanks: usize,
    pub cells: Vec<DayCell<'a>>,
    pub trailing_blanks: usize,
}

impl CalendarGrid<'_> {
    pub fn total_slots(&self) -> usize {
        self.leading_blanks + self.cells.len() + self.trailing_blanks
    }
}

pub fn days_in_month(year: i32, month: u32) -> Result<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| StoreError::Validation(format!("invalid month {year}-{month:02}")))?;
    Ok(first
        .iter_days()
        .take_while(|d| d.month() == month)
        .count() as u32)
}

pub fn calendar<'a>(
    tasks: &[&'a Task],
    year: i32,
    month: u32,
    today: NaiveDate,
) -> Result<CalendarGrid<'a>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| StoreError::Validation(format!("invalid month {year}-{month:02}")))?;
    let leading_blanks = first.weekday().num_days_from_sunday() as usize;

    let mut cells = Vec::with_capacity(days_in_month(year, month)? as usize);
    for date in first.iter_days().take_while(|d| d.month() == month) {
        let due: Vec<&Task> = tasks
            .iter()
            .filter(|t| t.due_date == Some(date))
            .copied()
            .collect();
        cells.push(DayCell {
            day: date.day(),
            is_today: date == today,
            tasks: due,
        });
    }

    let used = leading_blanks + cells.len();
    let trailing_blanks = (7 - used % 7) % 7;
    Ok(CalendarGrid {
        year,
        month,
        leading_blanks,
        cells,
        trailing_blanks,
    })
}

/// Flat list ordered by `key`; `None` keeps insertion order. Sorts are
/// stable so equal keys stay in insertion order.
pub fn sorted<'a>(tasks: &[&'a Task], key: Option<SortKey>) -> Vec<&'a Task> {
    let mut out: Vec<&Task> = tasks.to_vec();
    match key {
        None => {}
        Some(SortKey::DueDate) => {
            // None due dates sort last
            out.sort_by_key(|t| (t.due_date.is_none(), t.due_date));
        }
        Some(SortKey::Name) => out.sort_by(|a, b| a.title.cmp(&b.title)),
        Some(SortKey::Newest) => out.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        Some(SortKey::Priority) => out.sort_by_key(|t| t.priority()),
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewTask;
    use crate::store::Store;

    fn due(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(y, m, d)
    }

    fn add(store: &mut Store, title: &str, due_date: Option<NaiveDate>, tags: &[&str]) -> String {
        store
            .create(NewTask {
                title: title.to_string(),
                due_date,
                tags: tags.iter().map(|s| s.to_string()).collect(),
                ..NewTask::default()
            })
            .unwrap()
            .id
    }

    #[test]
    fn kanban_places_each_task_in_one_column() {
        let mut store = Store::in_memory();
        let a = add(&mut store, "a", None, &[]);
        let b = add(&mut store, "b", None, &[]);
        store.set_status(&b, Status::InProgress).unwrap();

        let tasks = store.list("Personal");
        let board = kanban(&tasks);
        assert_eq!(board.todo.len(), 1);
        assert_eq!(board.todo[0].id, a);
        assert_eq!(board.in_progress.len(), 1);
        assert_eq!(board.in_progress[0].id, b);
        assert!(board.done.is_empty());
        assert_eq!(
            board.todo.len() + board.in_progress.len() + board.done.len(),
            tasks.len()
        );
    }

    #[test]
    fn march_2025_grid_shape() {
        // 2025-03-01 is a Saturday: 6 leading blanks, 31 days, 5 trailing.
        let grid = calendar(&[], 2025, 3, NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()).unwrap();
        assert_eq!(grid.leading_blanks, 6);
        assert_eq!(grid.cells.len(), 31);
        assert_eq!(grid.trailing_blanks, 5);
        assert_eq!(grid.total_slots() % 7, 0);
    }

    #[test]
    fn february_leap_year() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
        assert!(days_in_month(2025, 13).is_err());
    }

    #[test]
    fn calendar_cell_holds_tasks_due_that_exact_day() {
        let mut store = Store::in_memory();
        add(&mut store, "milk", due(2025, 3, 5), &[]);
        add(&mut store, "other month", due(2025, 4, 5), &[]);
        add(&mut store, "no date", None, &[]);

        let tasks = store.list("Personal");
        let grid = calendar(&tasks, 2025, 3, NaiveDate::from_ymd_opt(2025, 3, 5).unwrap()).unwrap();
        let cell = &grid.cells[4];
        assert_eq!(cell.day, 5);
        assert!(cell.is_today);
        assert_eq!(cell.tasks.len(), 1);
        assert_eq!(cell.tasks[0].title, "milk");
        let others: usize = grid
            .cells
            .iter()
            .filter(|c| c.day != 5)
            .map(|c| c.tasks.len())
            .sum();
        assert_eq!(others, 0);
    }

    #[test]
    fn today_flag_requires_matching_month() {
        let grid = calendar(&[], 2025, 3, NaiveDate::from_ymd_opt(2024, 3, 5).unwrap()).unwrap();
        assert!(grid.cells.iter().all(|c| !c.is_today));
    }

    #[test]
    fn sort_by_due_date_puts_undated_last() {
        let mut store = Store::in_memory();
        add(&mut store, "late", due(2025, 6, 1), &[]);
        add(&mut store, "none", None, &[]);
        add(&mut store, "early", due(2025, 1, 1), &[]);

        let tasks = store.list("Personal");
        let titles: Vec<&str> = sorted(&tasks, Some(SortKey::DueDate))
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["early", "late", "none"]);
    }

    #[test]
    fn sort_by_name_and_priority() {
        let mut store = Store::in_memory();
        add(&mut store, "b", None, &["baja"]);
        add(&mut store, "c", None, &["alta"]);
        add(&mut store, "a", None, &[]);

        let tasks = store.list("Personal");
        let by_name: Vec<&str> = sorted(&tasks, Some(SortKey::Name))
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(by_name, vec!["a", "b", "c"]);

        let by_prio: Vec<&str> = sorted(&tasks, Some(SortKey::Priority))
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(by_prio, vec!["c", "b", "a"]);
    }

    #[test]
    fn no_sort_key_keeps_insertion_order() {
        let mut store = Store::in_memory();
        add(&mut store, "first", None, &[]);
        add(&mut store, "second", None, &[]);
        let tasks = store.list("Personal");
        let titles: Vec<&str> = sorted(&tasks, None).iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second"]);
    }
}

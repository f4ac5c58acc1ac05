use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap};

use super::app::{AddField, App, Mode, View};
use crate::model::{Status, Task};
use crate::view;

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    match app.view {
        View::Kanban => render_kanban(frame, app, chunks[1]),
        View::Calendar => render_calendar(frame, app, chunks[1]),
        View::List => render_list(frame, app, chunks[1]),
    }
    render_status_line(frame, app, chunks[2]);

    match app.mode {
        Mode::AddTask => render_add_form(frame, app),
        Mode::ConfirmDelete => render_confirm(frame, app),
        Mode::Help => render_help(frame),
        Mode::Normal => {}
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let sort = app.sort.map(|s| s.as_str()).unwrap_or("insertion");
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.project),
            Style::default().bold().fg(Color::Cyan),
        ),
        Span::raw(format!("| {} view | sort: {sort} ", app.view.title())),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn task_line(task: &Task) -> String {
    let due = task
        .due_date
        .map(|d| format!(" (due {d})"))
        .unwrap_or_default();
    format!("{} {}{}", task.status.icon(), task.title, due)
}

fn column_style(status: Status) -> Style {
    match status {
        Status::Todo => Style::default().fg(Color::Yellow),
        Status::InProgress => Style::default().fg(Color::Green),
        Status::Done => Style::default().fg(Color::DarkGray),
    }
}

fn render_kanban(frame: &mut Frame, app: &App, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(33),
            Constraint::Percentage(34),
            Constraint::Percentage(33),
        ])
        .split(area);

    let tasks = app.store.list(&app.project);
    let board = view::kanban(&tasks);
    let labels = [
        (Status::Todo, "Todo"),
        (Status::InProgress, "In Progress"),
        (Status::Done, "Done"),
    ];

    for (i, (status, label)) in labels.iter().enumerate() {
        let column = board.column(*status);
        let focused = app.column == *status;
        let items: Vec<ListItem> = column
            .iter()
            .enumerate()
            .map(|(row, task)| {
                let item = ListItem::new(Line::styled(task_line(task), column_style(*status)));
                if focused && row == app.cursor {
                    item.style(Style::default().bg(Color::DarkGray))
                } else {
                    item
                }
            })
            .collect();

        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };
        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(format!(" {label} ({}) ", column.len())),
        );
        frame.render_widget(list, columns[i]);
    }
}

fn render_calendar(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.store.list(&app.project);
    let (year, month) = app.month;
    let text = match view::calendar(&tasks, year, month, app.today()) {
        Ok(grid) => crate::output::format_calendar(&grid),
        Err(e) => format!("error: {e}"),
    };
    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {year}-{month:02}  (n/p to change month) ")),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_list(frame: &mut Frame, app: &App, area: Rect) {
    let tasks = app.store.list(&app.project);
    let rows = view::sorted(&tasks, app.sort);
    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(row, task)| {
            let tags = if task.tags.is_empty() {
                String::new()
            } else {
                format!(" [{}]", task.tags.join(", "))
            };
            let line = format!("{}{}", task_line(task), tags);
            let item = ListItem::new(line);
            if row == app.cursor {
                item.style(Style::default().bg(Color::DarkGray))
            } else {
                item
            }
        })
        .collect();
    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Tasks ({}) ", rows.len())),
    );
    frame.render_widget(list, area);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let text = match &app.error {
        Some(e) => Line::styled(format!(" {e}"), Style::default().fg(Color::Red)),
        None => Line::raw(" a:add  x:delete  H/L:move task  v:view  Tab:project  ?:help  q:quit"),
    };
    frame.render_widget(Paragraph::new(text), area);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

fn render_add_form(frame: &mut Frame, app: &App) {
    let Some(form) = app.add_form.as_ref() else {
        return;
    };
    let area = centered_rect(50, 9, frame.area());
    frame.render_widget(Clear, area);

    let field = |label: &str, value: &str, focused: bool| {
        let marker = if focused { ">" } else { " " };
        let style = if focused {
            Style::default().bold()
        } else {
            Style::default()
        };
        Line::styled(format!("{marker} {label}: {value}"), style)
    };

    let mut lines = vec![
        field("Title      ", &form.title, form.focused == AddField::Title),
        field(
            "Description",
            &form.description,
            form.focused == AddField::Description,
        ),
        field("Due (Y-M-D)", &form.due, form.focused == AddField::Due),
        Line::raw(""),
        Line::raw("Enter: save   Tab: next field   Esc: cancel"),
    ];
    if let Some(ref e) = form.error {
        lines.push(Line::styled(
            e.clone(),
            Style::default().fg(Color::Red),
        ));
    }

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" New task in {} ", app.project)),
    );
    frame.render_widget(paragraph, area);
}

fn render_confirm(frame: &mut Frame, app: &App) {
    let title = app
        .pending_delete
        .as_deref()
        .and_then(|id| app.store.get(id))
        .map(|t| t.title.clone())
        .unwrap_or_default();
    let area = centered_rect(44, 4, frame.area());
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(vec![
        Line::raw(format!("Delete '{title}'?")),
        Line::raw("y: delete   any other key: cancel"),
    ])
    .block(Block::default().borders(Borders::ALL).title(" Confirm "));
    frame.render_widget(paragraph, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(52, 16, frame.area());
    frame.render_widget(Clear, area);
    let lines = [
        "j/k        move cursor",
        "h/l        focus column (kanban)",
        "H/L        move selected task left/right",
        "t/i/d      drop selected task on todo/in-progress/done",
        "v          switch view (kanban/calendar/list)",
        "Tab        next project",
        "s          cycle list sort",
        "n/p        next/previous month (calendar)",
        "a          add task",
        "x          delete task (asks to confirm)",
        "r          reload from disk",
        "q / Esc    quit",
    ];
    let paragraph = Paragraph::new(lines.iter().map(|l| Line::raw(*l)).collect::<Vec<_>>())
        .block(Block::default().borders(Borders::ALL).title(" Keys "));
    frame.render_widget(paragraph, area);
}

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::app::{App, Mode};
use crate::model::Status;

pub enum KeyAction {
    Quit,
    Continue,
}

pub fn handle_key(app: &mut App, key: KeyEvent) -> KeyAction {
    match app.mode {
        Mode::Normal => handle_normal(app, key),
        Mode::AddTask => handle_add_form(app, key),
        Mode::ConfirmDelete => {
            match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_delete(),
                _ => app.cancel_delete(),
            }
            KeyAction::Continue
        }
        Mode::Help => {
            app.toggle_help();
            KeyAction::Continue
        }
    }
}

fn handle_normal(app: &mut App, key: KeyEvent) -> KeyAction {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return KeyAction::Quit,
        KeyCode::Char('j') | KeyCode::Down => app.move_down(),
        KeyCode::Char('k') | KeyCode::Up => app.move_up(),
        KeyCode::Char('h') | KeyCode::Left => app.focus_left(),
        KeyCode::Char('l') | KeyCode::Right => app.focus_right(),
        KeyCode::Char('H') => app.drop_selected_left(),
        KeyCode::Char('L') => app.drop_selected_right(),
        KeyCode::Char('t') => app.drop_selected(Status::Todo),
        KeyCode::Char('i') => app.drop_selected(Status::InProgress),
        KeyCode::Char('d') => app.drop_selected(Status::Done),
        KeyCode::Char('v') => app.cycle_view(),
        KeyCode::Tab => app.cycle_project(),
        KeyCode::Char('s') => app.cycle_sort(),
        KeyCode::Char('p') => app.month_prev(),
        KeyCode::Char('n') => app.month_next(),
        KeyCode::Char('a') => app.enter_add_mode(),
        KeyCode::Char('x') => app.request_delete(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Char('?') => app.toggle_help(),
        _ => {}
    }
    KeyAction::Continue
}

fn handle_add_form(app: &mut App, key: KeyEvent) -> KeyAction {
    let Some(form) = app.add_form.as_mut() else {
        app.mode = Mode::Normal;
        return KeyAction::Continue;
    };
    match key.code {
        KeyCode::Esc => app.cancel_add_mode(),
        KeyCode::Enter => app.submit_add(),
        KeyCode::Tab => form.next_field(),
        KeyCode::BackTab => form.prev_field(),
        KeyCode::Backspace => {
            form.focused_buf_mut().pop();
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            form.focused_buf_mut().push(c);
            form.error = None;
        }
        _ => {}
    }
    KeyAction::Continue
}

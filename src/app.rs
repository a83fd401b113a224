use crossterm::event::{KeyCode, KeyEvent};

use crate::error::Result;
use crate::store::TaskStore;
use crate::task::{Status, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Navigating the table
    Normal,
    /// Filling the add-task form
    Insert,
    /// Editing the selected row through the same form
    Edit,
    /// Typing in the search box
    Search,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Title,
    Description,
    Status,
}

impl FormField {
    fn next(self) -> Self {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description => FormField::Status,
            FormField::Status => FormField::Title,
        }
    }

    fn prev(self) -> Self {
        match self {
            FormField::Title => FormField::Status,
            FormField::Description => FormField::Title,
            FormField::Status => FormField::Description,
        }
    }
}

/// Edit buffers for the add/edit form. This is the boundary between the
/// widget-side representation (loose text buffers) and the store-side
/// `Task` record: `to_task` produces the full record handed to the store.
#[derive(Debug, Default)]
pub struct TaskForm {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub field: FormField,
    /// `Some(id)` when the form edits an existing row instead of adding.
    pub editing_id: Option<u64>,
}

impl TaskForm {
    fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            field: FormField::Title,
            editing_id: Some(task.id),
        }
    }

    fn to_task(&self, id: u64) -> Task {
        Task {
            id,
            title: self.title.clone(),
            description: self.description.clone(),
            status: self.status,
        }
    }
}

/// Application state: the task store plus everything the terminal UI needs
/// on top of it (mode, form buffers, selection, transient notice).
pub struct App {
    pub store: TaskStore,
    pub mode: Mode,
    pub form: TaskForm,
    pub selected: usize,
    pub notice: Option<String>,
    pub loading: bool,
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            store: TaskStore::new(),
            mode: Mode::Normal,
            form: TaskForm::default(),
            selected: 0,
            notice: None,
            loading: false,
            should_quit: false,
        }
    }

    /// Feed the outcome of the startup fetch into the store. A failed load
    /// is logged and leaves the list empty; the app stays usable either way.
    pub fn apply_load(&mut self, outcome: Result<Vec<Task>>) {
        self.loading = false;
        match outcome {
            Ok(tasks) => {
                self.store.replace_all(tasks);
                self.clamp_selection();
            }
            Err(err) => eprintln!("Warning: failed to load tasks: {err}"),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        self.notice = None;
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::Insert | Mode::Edit => self.handle_form_key(key),
            Mode::Search => self.handle_search_key(key),
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => {
                self.form = TaskForm::default();
                self.mode = Mode::Insert;
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                if let Some(task) = self.store.filtered().get(self.selected) {
                    self.form = TaskForm::from_task(task);
                    self.mode = Mode::Edit;
                }
            }
            KeyCode::Char('d') => self.delete_selected(),
            KeyCode::Char('/') => self.mode = Mode::Search,
            KeyCode::Char('f') => self.cycle_status_filter(),
            KeyCode::Esc => {
                self.store.set_search_term("");
                self.store.set_status_filter(None);
                self.clamp_selection();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.store.filtered().len();
                if self.selected + 1 < len {
                    self.selected += 1;
                }
            }
            _ => {}
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.form.field = self.form.field.next(),
            KeyCode::BackTab | KeyCode::Up => self.form.field = self.form.field.prev(),
            KeyCode::Left if self.form.field == FormField::Status => {
                self.form.status = self.form.status.prev();
            }
            KeyCode::Right if self.form.field == FormField::Status => {
                self.form.status = self.form.status.next();
            }
            KeyCode::Char(' ') if self.form.field == FormField::Status => {
                self.form.status = self.form.status.next();
            }
            KeyCode::Char(c) => match self.form.field {
                FormField::Title => self.form.title.push(c),
                FormField::Description => self.form.description.push(c),
                FormField::Status => {}
            },
            KeyCode::Backspace => match self.form.field {
                FormField::Title => {
                    self.form.title.pop();
                }
                FormField::Description => {
                    self.form.description.pop();
                }
                FormField::Status => {}
            },
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.mode = Mode::Normal,
            KeyCode::Char(c) => {
                let mut term = self.store.search_term().to_string();
                term.push(c);
                self.store.set_search_term(&term);
                self.clamp_selection();
            }
            KeyCode::Backspace => {
                let mut term = self.store.search_term().to_string();
                term.pop();
                self.store.set_search_term(&term);
                self.clamp_selection();
            }
            _ => {}
        }
    }

    fn submit_form(&mut self) {
        if let Some(id) = self.form.editing_id {
            // Edits commit the full row unconditionally, like a grid cell
            // edit handing back the whole record.
            self.store.update(self.form.to_task(id));
            self.mode = Mode::Normal;
            self.notice = Some(format!("Task {id} updated"));
        } else {
            match self
                .store
                .add(&self.form.title, &self.form.description, self.form.status)
            {
                Ok(id) => {
                    self.mode = Mode::Normal;
                    self.notice = Some(format!("Task {id} added"));
                }
                // Stay in the form so the input can be corrected.
                Err(err) => self.notice = Some(err.to_string()),
            }
        }
        self.clamp_selection();
    }

    fn delete_selected(&mut self) {
        if let Some(task) = self.store.filtered().get(self.selected) {
            let id = task.id;
            self.store.remove(id);
            self.notice = Some(format!("Task {id} deleted"));
            self.clamp_selection();
        }
    }

    fn cycle_status_filter(&mut self) {
        let next = match self.store.status_filter() {
            None => Some(Status::ToDo),
            Some(Status::ToDo) => Some(Status::InProgress),
            Some(Status::InProgress) => Some(Status::Done),
            Some(Status::Done) => None,
        };
        self.store.set_status_filter(next);
        self.clamp_selection();
    }

    /// Keep the selection on a real row after the projection changed.
    fn clamp_selection(&mut self) {
        let len = self.store.filtered().len();
        if len == 0 {
            self.selected = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
    }
}

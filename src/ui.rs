use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::{App, FormField, Mode};

pub fn draw(f: &mut Frame, app: &App) {
    let form_height = match app.mode {
        Mode::Insert | Mode::Edit => 5,
        _ => 0,
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(form_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_controls(f, app, chunks[0]);
    draw_table(f, app, chunks[1]);
    if form_height > 0 {
        draw_form(f, app, chunks[2]);
    }
    draw_footer(f, app, chunks[3]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_controls(f: &mut Frame, app: &App, area: Rect) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let mut search = app.store.search_term().to_string();
    if app.mode == Mode::Search {
        search.push('_');
    }
    let search_box = Paragraph::new(search).block(
        Block::default()
            .title("Search")
            .borders(Borders::ALL)
            .border_style(focus_style(app.mode == Mode::Search)),
    );
    f.render_widget(search_box, halves[0]);

    let filter = app
        .store
        .status_filter()
        .map_or_else(|| "All".to_string(), |s| s.to_string());
    let filter_box = Paragraph::new(filter)
        .block(Block::default().title("Filter (f)").borders(Borders::ALL));
    f.render_widget(filter_box, halves[1]);
}

fn draw_table(f: &mut Frame, app: &App, area: Rect) {
    let title = if app.loading {
        "Tasks (loading...)".to_string()
    } else {
        format!(
            "Tasks ({}/{})",
            app.store.filtered().len(),
            app.store.tasks().len()
        )
    };

    let header = Row::new(["ID", "Title", "Description", "Status"])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = app.store.filtered().iter().map(|t| {
        Row::new(vec![
            t.id.to_string(),
            t.title.clone(),
            t.description.clone(),
            t.status.to_string(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Percentage(35),
            Constraint::Percentage(45),
            Constraint::Length(13),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(focus_style(app.mode == Mode::Normal)),
    )
    .row_highlight_style(
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
    .highlight_symbol("> ");

    let mut state = TableState::default();
    if !app.store.filtered().is_empty() {
        state.select(Some(app.selected));
    }
    f.render_stateful_widget(table, area, &mut state);
}

fn draw_form(f: &mut Frame, app: &App, area: Rect) {
    let title = match app.form.editing_id {
        Some(id) => format!("Edit Task #{id}"),
        None => "Add Task".to_string(),
    };

    let field_line = |label: &str, value: &str, field: FormField| {
        let marker = if app.form.field == field { "> " } else { "  " };
        Line::from(vec![
            Span::raw(marker.to_string()),
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(value.to_string(), focus_style(app.form.field == field)),
        ])
    };

    let lines = vec![
        field_line("Title", &app.form.title, FormField::Title),
        field_line("Description", &app.form.description, FormField::Description),
        field_line(
            "Status",
            &format!("< {} >", app.form.status),
            FormField::Status,
        ),
    ];

    let form = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(focus_style(true)),
    );
    f.render_widget(form, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(notice) = &app.notice {
        Line::from(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let hints = match app.mode {
            Mode::Normal => "a add | e edit | d delete | / search | f filter | Esc clear | q quit",
            Mode::Insert | Mode::Edit => "Tab next field | Left/Right status | Enter save | Esc cancel",
            Mode::Search => "type to search | Enter/Esc done",
        };
        Line::from(Span::raw(hints))
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

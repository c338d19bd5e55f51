use crate::{
    app::{App, InputMode},
    dialog::{Field, TaskDialog},
    filter::EMPTY_COLUMN_HINT,
    task::{Column, Task},
    theme::Palette,
};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let palette = app.theme.palette();
    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        f.area(),
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_toolbar(f, app, &palette, rows[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Percentage(25); Column::ALL.len()])
        .split(rows[1]);
    for col in Column::ALL {
        draw_column(f, app, &palette, col, chunks[col.index()]);
    }

    draw_footer(f, app, &palette, rows[2]);

    if let Some(dialog) = &app.dialog {
        draw_dialog(f, dialog, &palette);
    }
    if let Some(alert) = &app.alert {
        draw_alert(f, alert, &palette);
    }
}

fn draw_toolbar(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let searching = app.mode == InputMode::Search;
    let query = if app.filter.query.is_empty() && !searching {
        Span::styled("(press / to search)", Style::default().fg(palette.muted))
    } else {
        Span::raw(format!(
            "{}{}",
            app.filter.query,
            if searching { "_" } else { "" }
        ))
    };
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().add_modifier(Modifier::BOLD)),
        query,
        Span::raw("   "),
        Span::styled("Tag: ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(app.tag_options.label().to_string(), Style::default().fg(palette.tag)),
        Span::raw(format!("   {}", app.theme.icon())),
    ]);
    let block = Block::default()
        .title(" Kanban ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if searching {
            palette.focus
        } else {
            palette.border
        }));
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_column(f: &mut Frame, app: &App, palette: &Palette, col: Column, area: Rect) {
    let focused = app.selected_column == col;
    let ids = app.view.column(col);
    let block = Block::default()
        .title(format!(" {} ({}) ", col.title(), ids.len()))
        .borders(Borders::ALL)
        .border_style(if focused {
            Style::default().fg(palette.focus)
        } else {
            Style::default().fg(palette.border)
        });

    if app.view.is_empty(col) {
        let hint = Paragraph::new(EMPTY_COLUMN_HINT)
            .style(Style::default().fg(palette.muted))
            .wrap(Wrap { trim: true })
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let items: Vec<ListItem> = ids
        .iter()
        .filter_map(|id| app.board.task(id))
        .map(|t| card(t, palette, app.drag.is_dragging(&t.id)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_task));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn card<'a>(task: &'a Task, palette: &Palette, held: bool) -> ListItem<'a> {
    let mut title = vec![
        Span::styled("● ", Style::default().fg(palette.priority(task.priority))),
        Span::styled(
            task.title.as_str(),
            Style::default()
                .fg(palette.text)
                .add_modifier(Modifier::BOLD),
        ),
    ];
    if held {
        title.push(Span::styled(" [moving]", Style::default().fg(palette.accent)));
    }
    let mut lines = vec![Line::from(title)];

    if !task.desc.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("  {}", task.desc),
            Style::default().fg(palette.muted),
        )));
    }

    let mut meta = vec![Span::raw("  ")];
    if let Some(due) = task.due {
        meta.push(Span::styled(
            format!("Due {} ", due.format("%b %-d, %Y")),
            Style::default().fg(palette.muted),
        ));
    }
    for tag in &task.tags {
        meta.push(Span::styled(format!("#{tag} "), Style::default().fg(palette.tag)));
    }
    if meta.len() > 1 {
        lines.push(Line::from(meta));
    }
    lines.push(Line::default());
    ListItem::new(lines)
}

fn draw_footer(f: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let line = match &app.mode {
        InputMode::ImportPath(path) => Line::from(vec![
            Span::styled("Import file: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("{path}_")),
            Span::styled("  (Enter to load, Esc to cancel)", Style::default().fg(palette.muted)),
        ]),
        _ => match &app.status {
            Some(status) => Line::from(Span::styled(status.as_str(), Style::default().fg(palette.accent))),
            None => Line::from(Span::styled(
                "n new  Enter edit  x delete  Space move  / search  t tag  m theme  E export  I import  q quit",
                Style::default().fg(palette.muted),
            )),
        },
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_dialog(f: &mut Frame, dialog: &TaskDialog, palette: &Palette) {
    let area = centered_rect(60, 15, f.area());
    f.render_widget(Clear, area);

    let mut lines = Vec::new();
    for field in Field::ALL {
        let focused = dialog.focus == field;
        let label_style = if focused {
            Style::default().fg(palette.focus).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(palette.muted)
        };
        let mut value = dialog.value(field);
        if focused && field != Field::Priority {
            value.push('_');
        }
        let value_style = if field == Field::Priority {
            Style::default().fg(palette.priority(dialog.priority))
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(Span::styled(field.label(), label_style)));
        lines.push(Line::from(Span::styled(format!("  {value}"), value_style)));
    }
    lines.push(Line::from(Span::styled(
        format!("Column: {}", dialog.col.title()),
        Style::default().fg(palette.muted),
    )));
    if let Some(err) = &dialog.error {
        lines.push(Line::from(Span::styled(err.as_str(), Style::default().fg(palette.red))));
    }
    let help = if dialog.can_delete() {
        "Enter save  Esc cancel  Tab next  Ctrl+D delete"
    } else {
        "Enter save  Esc cancel  Tab next"
    };
    lines.push(Line::from(Span::styled(help, Style::default().fg(palette.muted))));

    let block = Block::default()
        .title(format!(" {} ", dialog.heading()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.focus))
        .style(Style::default().bg(palette.background));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_alert(f: &mut Frame, message: &str, palette: &Palette) {
    let area = centered_rect(50, 7, f.area());
    f.render_widget(Clear, area);
    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.red))
        .style(Style::default().bg(palette.background));
    let text = vec![
        Line::from(Span::styled(message, Style::default().fg(palette.text))),
        Line::default(),
        Line::from(Span::styled("Press any key", Style::default().fg(palette.muted))),
    ];
    f.render_widget(
        Paragraph::new(text).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

/// `width` is a percentage of `area`, `height` a line count.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - width) / 2),
            Constraint::Percentage(width),
            Constraint::Percentage((100 - width) / 2),
        ])
        .split(vertical[1])[1]
}

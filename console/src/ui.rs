use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{App, NoticeKind, Screen};
use crate::form::CONTROLS;

pub fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.size());

    let header =
        Paragraph::new(header_text(app)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.screen {
        Screen::Form => render_form(frame, chunks[1], app),
        Screen::List => render_list(frame, chunks[1], app),
    }

    render_footer(frame, chunks[2], app);

    if app.detail_open {
        render_detail_overlay(frame, app);
    }
}

fn header_text(app: &App) -> String {
    match app.screen {
        Screen::Form => {
            let status = if app.submitting { "INVIO" } else { "PRONTO" };
            format!("MTG Penalties | {} | Nuova penalità | {status}", app.event)
        }
        Screen::List => {
            let updated = app.updated_at.as_deref().unwrap_or("-");
            let status = if app.fetching { "AGGIORNO" } else { "PRONTO" };
            format!(
                "MTG Penalties | {} | {} penalità | Aggiornato {updated} | {status}",
                app.event,
                app.penalties.len()
            )
        }
    }
}

fn footer_text(app: &App) -> String {
    match app.screen {
        Screen::Form => {
            "Tab/↓ Campo successivo | ↑ Precedente | Invio Avanti | Ctrl+S Aggiungi | Esc Elenco | Ctrl+Q Esci"
                .to_string()
        }
        Screen::List => {
            if app.detail_open {
                "Esc Chiudi | j/k/↑/↓ Seleziona | q Esci".to_string()
            } else {
                "j/k/↑/↓ Seleziona | Invio Dettagli | r Aggiorna | n Nuova penalità | Esc Modulo | q Esci"
                    .to_string()
            }
        }
    }
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let footer = match &app.notice {
        Some(notice) => {
            let style = match notice.kind {
                NoticeKind::Success => Style::default().fg(Color::Green),
                NoticeKind::Failure => Style::default().fg(Color::Red),
            };
            let text = match &notice.detail {
                Some(detail) => format!("{} ({detail})", notice.text),
                None => notice.text.clone(),
            };
            Paragraph::new(text)
                .style(style)
                .block(Block::default().borders(Borders::TOP))
        }
        None => Paragraph::new(footer_text(app)).block(Block::default().borders(Borders::TOP)),
    };
    frame.render_widget(footer, area);
}

fn render_form(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines: Vec<Line> = vec![Line::default()];
    for (i, control) in CONTROLS.iter().enumerate() {
        let focused = i == app.form.focus;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default().add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let required = if control.required { " *" } else { "" };
        let label = format!("{}{required}", control.label);

        // One rendered row per line break; continuation rows indent to
        // the value column and the cursor sits on the last row.
        let value = app.form.draft.get(control.field);
        let segments: Vec<&str> = value.split('\n').collect();
        let last = segments.len() - 1;
        for (j, segment) in segments.iter().enumerate() {
            let mut spans = if j == 0 {
                vec![Span::styled(format!("{marker}{label:<22}"), label_style)]
            } else {
                vec![Span::raw(" ".repeat(24))]
            };
            spans.push(Span::raw(segment.to_string()));
            if focused && j == last {
                spans.push(Span::styled(
                    " ",
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
            }
            lines.push(Line::from(spans));
        }

        if let Some(error) = app.form.visible_error(control.field) {
            lines.push(Line::from(Span::styled(
                format!("    {error}"),
                Style::default().fg(Color::Red),
            )));
        }
    }

    lines.push(Line::default());
    let submit_style = if app.submitting {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let submit_label = if app.submitting {
        "  [ Aggiungi... ]"
    } else {
        "  [ Aggiungi ]"
    };
    lines.push(Line::from(Span::styled(submit_label, submit_style)));

    let form = Paragraph::new(lines).block(
        Block::default()
            .title("Nuova penalità")
            .borders(Borders::ALL),
    );
    frame.render_widget(form, area);
}

fn list_columns() -> [Constraint; 6] {
    [
        Constraint::Length(7),
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Length(24),
        Constraint::Length(16),
    ]
}

fn render_list_header(frame: &mut Frame, area: Rect, widths: &[Constraint]) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths)
        .split(area);
    let style = Style::default().add_modifier(Modifier::BOLD);

    render_cell_text(frame, cols[0], "Turno", style);
    render_cell_text(frame, cols[1], "Tavolo", style);
    render_cell_text(frame, cols[2], "Judge", style);
    render_cell_text(frame, cols[3], "Nome completo", style);
    render_cell_text(frame, cols[4], "Infrazione", style);
    render_cell_text(frame, cols[5], "Penalità", style);
}

fn render_list(frame: &mut Frame, area: Rect, app: &App) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    let widths = list_columns();
    render_list_header(frame, sections[0], &widths);

    let list_area = sections[1];
    if app.penalties.is_empty() {
        let empty = Paragraph::new("Nessuna penalità registrata")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, list_area);
        return;
    }

    let visible = list_area.height as usize;
    let anchor = app.selected.unwrap_or(0);
    let (start, end) = visible_range(anchor, app.penalties.len(), visible);

    for (i, idx) in (start..end).enumerate() {
        let row_area = Rect {
            x: list_area.x,
            y: list_area.y + i as u16,
            width: list_area.width,
            height: 1,
        };

        let selected = app.selected == Some(idx);
        let row_style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        if selected {
            frame.render_widget(Block::default().style(row_style), row_area);
        }

        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(widths)
            .split(row_area);

        let penalty = &app.penalties[idx];
        render_cell_text(frame, cols[0], &penalty.round, row_style);
        render_cell_text(frame, cols[1], &penalty.table, row_style);
        render_cell_text(frame, cols[2], &penalty.judge, row_style);
        render_cell_text(frame, cols[3], &penalty.player_name, row_style);
        render_cell_text(frame, cols[4], &penalty.infraction, row_style);
        render_cell_text(frame, cols[5], &penalty.penalty, row_style);
    }
}

fn render_detail_overlay(frame: &mut Frame, app: &App) {
    let Some(penalty) = app.selected_penalty() else {
        return;
    };

    let popup_area = centered_rect(60, 60, frame.size());
    frame.render_widget(Clear, popup_area);

    let text = [
        format!("Turno: {}", penalty.round),
        format!("Tavolo: {}", penalty.table),
        format!("Judge: {}", penalty.judge),
        format!("Nome completo: {}", penalty.player_name),
        format!("Infrazione: {}", penalty.infraction),
        format!("Penalità: {}", penalty.penalty),
        String::new(),
        format!("Descrizione: {}", penalty.description),
    ]
    .join("\n");

    let detail = Paragraph::new(text)
        .block(
            Block::default()
                .title("Dettaglio penalità")
                .borders(Borders::ALL),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(detail, popup_area);
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

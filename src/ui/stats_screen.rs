use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::app::App;
use crate::game::format_duration;
use crate::language::UiText;
use crate::render::{ResultLine, StatsView};
use crate::stats::LifetimeTotals;

/// Pure presenter for one finished round
pub fn present_result(index: usize, result: &ResultLine) -> Row<'static> {
    let color = if result.won { Color::Green } else { Color::Red };

    Row::new(vec![
        Cell::from(format!("{}", index + 1)).style(Style::default().add_modifier(Modifier::DIM)),
        Cell::from(result.summary.clone()).style(Style::default().fg(color)),
    ])
}

/// Summary lines above the results table
pub fn summary_lines(view: &StatsView, text: &UiText) -> Vec<Line<'static>> {
    let mut lines = vec![
        entry(&text.games_played, view.games_played.to_string()),
        entry(&text.wins, view.wins.to_string()),
        entry(&text.losses, view.losses.to_string()),
        entry(
            &text.fewest_guesses,
            view.fewest_guesses_win.clone().unwrap_or_else(|| text.none.clone()),
        ),
        entry(
            &text.fastest_win,
            view.fastest_win.clone().unwrap_or_else(|| text.none.clone()),
        ),
    ];

    if let Some(lifetime) = &view.lifetime {
        lines.push(entry(&text.lifetime, lifetime_summary(lifetime, text)));
    }
    if let Some(last) = &view.last_recorded {
        let color = if last.won { Color::Green } else { Color::Red };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{}: ", text.last_recorded),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(last.summary.clone(), Style::default().fg(color)),
        ]));
    }

    lines
}

fn entry(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{name}: "), Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(value),
    ])
}

fn lifetime_summary(totals: &LifetimeTotals, text: &UiText) -> String {
    let fewest = totals
        .fewest_guesses
        .map(|n| n.to_string())
        .unwrap_or_else(|| text.none.clone());
    let fastest = totals
        .fastest_ms
        .map(|ms| format_duration(Duration::from_millis(ms)))
        .unwrap_or_else(|| text.none.clone());

    format!(
        "{} {} / {} {} / {} {} / {} {}",
        totals.played,
        text.games_played.to_lowercase(),
        totals.wins,
        text.wins.to_lowercase(),
        fewest,
        text.fewest_guesses.to_lowercase(),
        fastest,
        text.fastest_win.to_lowercase(),
    )
}

/// Render the statistics screen, clamping the scroll offset to the rows available
pub fn render_stats(app: &mut App, area: Rect, buf: &mut Buffer) {
    let view = app.stats_view();
    let text = app.pack.text.clone();
    let summary = summary_lines(&view, &text);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(summary.len() as u16 + 2), // summary
            Constraint::Min(0), // results
            Constraint::Length(1), // instructions
        ])
        .split(area);

    Paragraph::new(text.stats_title.clone())
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    Paragraph::new(summary)
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[1], buf);

    if view.results.is_empty() {
        Paragraph::new(text.none.clone())
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray))
            .block(Block::default().borders(Borders::ALL).title(text.results.clone()))
            .render(chunks[2], buf);
    } else {
        let table_height = chunks[2].height.saturating_sub(2) as usize;
        let max_scroll = view.results.len().saturating_sub(table_height);
        if app.stats_scroll > max_scroll {
            app.stats_scroll = max_scroll;
        }

        let rows: Vec<Row> = view
            .results
            .iter()
            .enumerate()
            .skip(app.stats_scroll)
            .take(table_height)
            .map(|(i, result)| present_result(i, result))
            .collect();

        let table = Table::new(rows, [Constraint::Length(4), Constraint::Min(10)])
            .block(Block::default().borders(Borders::ALL).title(text.results.clone()))
            .column_spacing(1);

        Widget::render(table, chunks[2], buf);
    }

    Paragraph::new("(up/down) scroll  (tab) next screen  (enter) new game  (esc)ape")
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

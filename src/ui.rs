pub mod gallows;
pub mod screen;
pub mod stats_screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::app::App;
use crate::render::{Banner, GameView, KeyState};
use crate::ui::gallows::{gallows_lines, gallows_size};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

const LEGEND: &str = "(enter) new / (ctrl+g) give up / (ctrl+s) reveal / (tab) screens / (esc)ape";

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn green_bold() -> Style {
    bold().fg(Color::Green)
}

fn red_bold() -> Style {
    bold().fg(Color::Red)
}

fn dim_bold() -> Style {
    bold().add_modifier(Modifier::DIM)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// The game screen
impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = &self.pack.text;
        let (gallows_width, gallows_height) = gallows_size();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title + timer
                Constraint::Length(1), // padding
                Constraint::Min(gallows_height + 2), // board
                Constraint::Length(1), // banner
                Constraint::Length(1), // message
                Constraint::Length(1), // legend
            ])
            .split(area);

        let view = self.game_view();
        let timer_width = view.as_ref().map_or(0, |v| v.elapsed.width() as u16);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(1), Constraint::Length(timer_width)])
            .split(chunks[0]);
        Paragraph::new(Span::styled(
            format!("{} ({})", text.title, self.pack.name),
            bold().fg(Color::Cyan),
        ))
        .render(header[0], buf);

        if let Some(view) = &view {
            Paragraph::new(Span::styled(view.elapsed.clone(), dim_bold()))
                .alignment(Alignment::Right)
                .render(header[1], buf);

            let board = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Length(gallows_width + 6), Constraint::Min(1)])
                .split(chunks[2]);

            render_gallows(self, view, board[0], buf);
            render_word(self, view, board[1], buf);

            let (content, style) = match view.banner {
                None => (text.guess_label.clone(), italic()),
                Some(Banner::Won) => (text.win.clone(), green_bold()),
                Some(Banner::Lost) => (
                    format!("{} {}", text.lose, view.secret.clone().unwrap_or_default()),
                    red_bold(),
                ),
            };
            Paragraph::new(Span::styled(content, style))
                .alignment(Alignment::Center)
                .render(chunks[3], buf);
        }

        if let Some(message) = &self.message {
            Paragraph::new(Span::styled(
                message.clone(),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center)
            .render(chunks[4], buf);
        }

        Paragraph::new(Span::styled(LEGEND, italic()))
            .wrap(Wrap { trim: true })
            .render(chunks[5], buf);
    }
}

fn render_gallows(app: &App, view: &GameView, area: Rect, buf: &mut Buffer) {
    let style = if view.banner == Some(Banner::Lost) {
        red_bold()
    } else {
        bold()
    };

    let mut lines: Vec<Line> = gallows_lines(view.stage)
        .into_iter()
        .map(|l| Line::from(Span::styled(l, style)))
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(Span::styled(
        format!("{}: {}/{}", app.pack.text.wrong, view.wrong, view.max_wrong),
        dim_bold(),
    )));

    Paragraph::new(lines).render(area, buf);
}

fn render_word(app: &App, view: &GameView, area: Rect, buf: &mut Buffer) {
    let text = &app.pack.text;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // pattern
            Constraint::Length(1), // secret, when shown
            Constraint::Length(2), // keys
            Constraint::Length(1), // guesses header
            Constraint::Min(0), // guesses
        ])
        .split(area);

    Paragraph::new(Span::styled(view.pattern.clone(), bold()))
        .render(chunks[0], buf);

    if view.banner.is_none() {
        if let Some(secret) = &view.secret {
            Paragraph::new(Span::styled(format!("({secret})"), dim_bold()))
                .render(chunks[1], buf);
        }
    }

    let keys: Vec<Span> = view
        .keys
        .iter()
        .flat_map(|key| {
            let style = match key.state {
                KeyState::Unused => bold(),
                KeyState::Hit => green_bold(),
                KeyState::Miss => red_bold().add_modifier(Modifier::CROSSED_OUT),
            };
            [Span::styled(key.letter.to_string(), style), Span::raw(" ")]
        })
        .collect();
    Paragraph::new(Line::from(keys))
        .wrap(Wrap { trim: true })
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        format!("{} ({})", text.guesses_header, view.guesses.len()),
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
    ))
    .render(chunks[3], buf);

    // newest guesses stay visible when the list outgrows the area
    let visible = chunks[4].height as usize;
    let skip = view.guesses.len().saturating_sub(visible);
    let lines: Vec<Line> = view
        .guesses
        .iter()
        .skip(skip)
        .map(|g| {
            let style = if g.correct { green_bold() } else { red_bold() };
            Line::from(vec![
                Span::styled(format!("{}  ", g.letter), style),
                Span::styled(g.pattern.clone(), dim_bold()),
            ])
        })
        .collect();
    Paragraph::new(lines).render(chunks[4], buf);
}

/// The help screen
pub fn render_help(app: &App, area: Rect, buf: &mut Buffer) {
    let text = &app.pack.text;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(2), // title
            Constraint::Min(1), // rules
            Constraint::Length(1), // language
            Constraint::Length(1), // legend
        ])
        .split(area);

    Paragraph::new(Span::styled(text.help_title.clone(), bold().fg(Color::Cyan)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    let rules: Vec<Line> = text
        .help
        .iter()
        .map(|rule| Line::from(format!("- {rule}")))
        .collect();
    Paragraph::new(rules)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        format!("{}  (l) {}", app.pack.name, app.language.next()),
        dim_bold(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    Paragraph::new(Span::styled(LEGEND, italic()))
        .wrap(Wrap { trim: true })
        .render(chunks[3], buf);
}

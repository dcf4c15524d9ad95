use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::{
    app::{App, MENU_COLUMNS},
    game::Player,
    presets::PRESETS,
};

const CELL_WIDTH: usize = 11;

/// Preset grid as lines of cells, cursor reversed and current preset bold.
fn preset_grid(app: &App) -> Vec<Line<'static>> {
    let selected = app.game.preset();
    PRESETS
        .iter()
        .enumerate()
        .chunks(MENU_COLUMNS)
        .into_iter()
        .map(|row| {
            let cells = row
                .map(|(idx, preset)| {
                    let mut style = Style::default().fg(Color::Blue);
                    if *preset == selected {
                        style = style.fg(Color::Green).add_modifier(Modifier::BOLD);
                    }
                    if idx == app.menu_cursor {
                        style = style.add_modifier(Modifier::REVERSED);
                    }
                    Span::styled(format!("{:^width$}", preset.label, width = CELL_WIDTH), style)
                })
                .collect::<Vec<_>>();
            Line::from(Itertools::intersperse(cells.into_iter(), Span::raw("  ")).collect::<Vec<_>>())
        })
        .collect()
}

pub fn render_menu(app: &App, area: Rect, buf: &mut Buffer) {
    let rows = PRESETS.len().div_ceil(MENU_COLUMNS) as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),        // title
            Constraint::Length(2),        // selected mode
            Constraint::Length(2),        // start
            Constraint::Length(2),        // seats
            Constraint::Length(rows + 2), // options
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(area);

    let bold = Style::default().add_modifier(Modifier::BOLD);

    Paragraph::new(Span::styled(
        "CHESS CLOCK",
        bold.fg(Color::Cyan),
    ))
    .block(Block::default().borders(Borders::BOTTOM))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    Paragraph::new(Line::from(vec![
        Span::raw("Selected game mode: "),
        Span::styled(app.game.preset().label, bold),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Span::styled(
        "(s) START GAME",
        bold.fg(Color::Red),
    ))
    .alignment(Alignment::Center)
    .render(chunks[2], buf);

    let seats = format!(
        "P1 - {}    (tab) switch sides    P2 - {}",
        app.game.side_of(Player::P1),
        app.game.side_of(Player::P2)
    );
    Paragraph::new(seats)
        .alignment(Alignment::Center)
        .render(chunks[3], buf);

    Paragraph::new(preset_grid(app))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .title("Game Options"),
        )
        .alignment(Alignment::Center)
        .render(chunks[4], buf);

    Paragraph::new(Span::styled(
        "arrows move / (enter) select / (s)tart / (tab) sides / (?) help / (esc)ape",
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[6], buf);
}

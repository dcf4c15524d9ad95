pub mod help;
pub mod menu;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Widget},
    Frame,
};

use crate::{
    app::App,
    display::{self, ProgressLevel},
    game::{GamePhase, Player},
    input::Seat,
};

const HORIZONTAL_MARGIN: u16 = 2;
const VERTICAL_MARGIN: u16 = 1;

/// Draws the current screen, and the help overlay on top when open.
pub fn draw(app: &App, f: &mut Frame) {
    screen::current_screen(app.screen()).render(app, f);
    if app.help_open {
        help::render_help(f);
    }
}

fn seat_key_hint(seat: Seat) -> &'static str {
    match seat {
        Seat::Left => "(z) / left shift",
        Seat::Right => "(m) / right shift",
    }
}

fn player_title(app: &App, player: Player) -> String {
    let side = app.game.side_of(player);
    match app.game.winner() {
        Some(winner) if winner == player => format!(" {player} - {side} wins! "),
        _ => format!(" {player} - {side} "),
    }
}

fn status_line(app: &App) -> String {
    let game = &app.game;
    match game.phase() {
        GamePhase::Menu => String::new(),
        GamePhase::Playing => format!("{} to move", game.turn()),
        GamePhase::Paused => format!("Paused, {} to move", game.turn()),
        GamePhase::Ended => match game.winner() {
            Some(winner) => format!("{} flagged. {winner} wins!", winner.other()),
            None => "Game over".to_string(),
        },
    }
}

fn legend(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Ended => "(r)eset / (n)ew game / (?) help / (esc)ape",
        _ => "(space) pause/play / (n)ew game / (?) help / (esc)ape",
    }
}

/// One player's clock face: name, remaining time, progress bar, key hint.
fn render_clock_panel(app: &App, player: Player, area: Rect, buf: &mut Buffer) {
    let game = &app.game;
    let timer = game.timer(player);
    let on_move = game.turn() == player && game.phase() != GamePhase::Ended;

    let border_style = if game.winner() == Some(player) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else if on_move {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(player_title(app, player));
    let inner = block.inner(area);
    block.render(area, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1), // clock
            Constraint::Min(0),
            Constraint::Length(3), // progress
            Constraint::Length(1), // key hint
        ])
        .split(inner);

    let percent = timer.progress_percent();
    let bar_color = match display::progress_level(percent) {
        ProgressLevel::Low => Color::Red,
        ProgressLevel::Normal => Color::Cyan,
    };

    let clock_style = if on_move {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };
    Paragraph::new(Span::styled(
        display::format_clock(&timer.remaining()),
        clock_style,
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(bar_color))
        .percent(percent.round() as u16)
        .render(chunks[3], buf);

    let seat = Seat::of(player, game.sides_switched());
    Paragraph::new(Span::styled(
        seat_key_hint(seat),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(chunks[4], buf);
}

/// Game screen: both clocks side by side in seat order.
pub fn render_game(app: &App, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([
            Constraint::Length(1), // time control
            Constraint::Min(5),    // clocks
            Constraint::Length(1), // status
            Constraint::Length(1), // legend
        ])
        .split(area);

    let preset = app.game.preset();
    Paragraph::new(Line::from(vec![
        Span::raw("Time control: "),
        Span::styled(preset.label, Style::default().add_modifier(Modifier::BOLD)),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    let switched = app.game.sides_switched();
    render_clock_panel(app, Seat::Left.player(switched), panels[0], buf);
    render_clock_panel(app, Seat::Right.player(switched), panels[1], buf);

    let status_style = match app.game.phase() {
        GamePhase::Ended => Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        GamePhase::Paused => Style::default().fg(Color::Yellow),
        _ => Style::default(),
    };
    Paragraph::new(Span::styled(status_line(app), status_style))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);

    Paragraph::new(Span::styled(
        legend(app.game.phase()),
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[3], buf);
}

/// Rectangle of `width` x `height` centred in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::ManualClock;
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;
    use std::time::Duration;

    fn rendered(app: &App, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(app, f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    fn app() -> (App, ManualClock) {
        let clock = ManualClock::new();
        (
            App::with_default_preset(Arc::new(clock.clone())).unwrap(),
            clock,
        )
    }

    #[test]
    fn test_game_screen_shows_both_clocks() {
        let (mut app, _) = app();
        app.game.toggle();
        let content = rendered(&app, 80, 24);
        assert!(content.contains("05:00"));
        assert!(content.contains("Player 1 - White"));
        assert!(content.contains("Player 2 - Black"));
        assert!(content.contains("Player 1 to move"));
    }

    #[test]
    fn test_game_screen_tenths_under_a_minute() {
        let clock = ManualClock::new();
        let mut app = App::new(
            crate::game::GameController::new(
                crate::presets::find("1 min").unwrap(),
                Arc::new(clock.clone()),
            )
            .unwrap(),
        );
        app.game.toggle();
        clock.advance(Duration::from_millis(17_700));
        app.on_tick();
        let content = rendered(&app, 80, 24);
        assert!(content.contains("00:42:3"));
    }

    #[test]
    fn test_game_screen_shows_winner() {
        let clock = ManualClock::new();
        let mut app = App::new(
            crate::game::GameController::new(
                crate::presets::find("30 sec").unwrap(),
                Arc::new(clock.clone()),
            )
            .unwrap(),
        );
        app.game.toggle();
        clock.advance(Duration::from_secs(31));
        app.on_tick();
        let content = rendered(&app, 100, 24);
        assert!(content.contains("Player 2 - Black wins!"));
        assert!(content.contains("(r)eset"));
    }

    #[test]
    fn test_switched_sides_swap_panels() {
        let (mut app, _) = app();
        app.game.switch_sides();
        app.game.toggle();
        let content = rendered(&app, 80, 24);
        let p1 = content.find("Player 1 - Black").unwrap();
        let p2 = content.find("Player 2 - White").unwrap();
        // Right seat panel starts further along the first border row
        assert!(p2 < p1);
    }

    #[test]
    fn test_small_terminal_does_not_panic() {
        let (mut app, _) = app();
        rendered(&app, 10, 4);
        app.game.toggle();
        rendered(&app, 10, 4);
        app.help_open = true;
        rendered(&app, 10, 4);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 80, 24);
        assert_eq!(centered_rect(40, 10, area), Rect::new(20, 7, 40, 10));
        assert_eq!(centered_rect(100, 30, area), area);
    }

    #[test]
    fn test_ui_constants() {
        assert_eq!(HORIZONTAL_MARGIN, 2);
        assert_eq!(VERTICAL_MARGIN, 1);
    }
}

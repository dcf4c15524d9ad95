use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;

const HELP_WIDTH: u16 = 60;

fn help_lines() -> Vec<Line<'static>> {
    let key = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let row = |keys: &'static str, what: &'static str| {
        Line::from(vec![Span::styled(format!("{keys:>18}  "), key), Span::raw(what)])
    };

    vec![
        Line::from("Pick a time control, start, and hit your key after each move."),
        Line::from(""),
        row("z / left shift", "end the left player's move"),
        row("m / right shift", "end the right player's move"),
        row("space", "pause or resume"),
        row("n", "new game (back to the menu)"),
        row("r", "reset after a game is over"),
        row("arrows, enter", "choose a time control"),
        row("s", "start the game"),
        row("tab", "switch sides (menu only)"),
        row("esc / q", "quit"),
        Line::from(""),
        Line::from("With an increment, time is added to your clock when you end your move."),
        Line::from("Whoever runs out of time loses."),
    ]
}

/// Instructions overlay. Drawn last so it sits above the current screen.
pub fn render_help(f: &mut Frame) {
    let lines = help_lines();
    let area = centered_rect(HELP_WIDTH, lines.len() as u16 + 6, f.area());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Instructions ")
        .title_bottom(Line::from(" (esc) close ").alignment(Alignment::Right));

    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}

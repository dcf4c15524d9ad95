use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers, ModifierKeyCode};

use crate::game::{GamePhase, Player};

/// Physical position at the board, independent of which player sits there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Seat {
    Left,
    Right,
}

impl Seat {
    pub fn player(self, sides_switched: bool) -> Player {
        match (self, sides_switched) {
            (Seat::Left, false) | (Seat::Right, true) => Player::P1,
            _ => Player::P2,
        }
    }

    pub fn of(player: Player, sides_switched: bool) -> Seat {
        if Seat::Left.player(sides_switched) == player {
            Seat::Left
        } else {
            Seat::Right
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMove {
    Up,
    Down,
    Left,
    Right,
}

/// What a key press asks the app to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    SwitchTurn(Player),
    TogglePause,
    StartGame,
    NewGame,
    Reset,
    SwitchSides,
    MoveCursor(CursorMove),
    SelectPreset,
    OpenHelp,
    CloseHelp,
    Quit,
}

/// The slice of app state key mapping depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputView {
    pub phase: GamePhase,
    pub sides_switched: bool,
    pub help_open: bool,
}

/// Which seat a key belongs to. Shift keys only arrive as separate codes
/// when the terminal reports modifier keys; `z` and `m` always work.
pub fn seat_for_key(code: KeyCode) -> Option<Seat> {
    match code {
        KeyCode::Modifier(ModifierKeyCode::LeftShift) => Some(Seat::Left),
        KeyCode::Modifier(ModifierKeyCode::RightShift) => Some(Seat::Right),
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(Seat::Left),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(Seat::Right),
        _ => None,
    }
}

fn is_pause_key(code: KeyCode) -> bool {
    code == KeyCode::Char(' ')
}

pub fn map_key(key: KeyEvent, view: InputView) -> Option<Command> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    // The help overlay keeps focus until it is closed
    if view.help_open {
        return match key.code {
            KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q') => Some(Command::CloseHelp),
            _ => None,
        };
    }

    let in_game = matches!(view.phase, GamePhase::Playing | GamePhase::Paused);

    if let Some(seat) = seat_for_key(key.code) {
        return in_game.then(|| Command::SwitchTurn(seat.player(view.sides_switched)));
    }

    // Space is always consumed, even when it does nothing
    if is_pause_key(key.code) {
        return in_game.then_some(Command::TogglePause);
    }

    match (view.phase, key.code) {
        (_, KeyCode::Char('?')) => Some(Command::OpenHelp),
        (_, KeyCode::Esc) | (_, KeyCode::Char('q')) => Some(Command::Quit),
        (GamePhase::Menu, KeyCode::Up) => Some(Command::MoveCursor(CursorMove::Up)),
        (GamePhase::Menu, KeyCode::Down) => Some(Command::MoveCursor(CursorMove::Down)),
        (GamePhase::Menu, KeyCode::Left) => Some(Command::MoveCursor(CursorMove::Left)),
        (GamePhase::Menu, KeyCode::Right) => Some(Command::MoveCursor(CursorMove::Right)),
        (GamePhase::Menu, KeyCode::Enter) => Some(Command::SelectPreset),
        (GamePhase::Menu, KeyCode::Char('s')) => Some(Command::StartGame),
        (GamePhase::Menu, KeyCode::Tab) => Some(Command::SwitchSides),
        (GamePhase::Ended, KeyCode::Char('r')) => Some(Command::Reset),
        (GamePhase::Playing | GamePhase::Paused | GamePhase::Ended, KeyCode::Char('n')) => {
            Some(Command::NewGame)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn view(phase: GamePhase, sides_switched: bool) -> InputView {
        InputView {
            phase,
            sides_switched,
            help_open: false,
        }
    }

    #[test]
    fn test_seat_keys_map_to_players() {
        let v = view(GamePhase::Playing, false);
        assert_eq!(
            map_key(press(KeyCode::Char('z')), v),
            Some(Command::SwitchTurn(Player::P1))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('m')), v),
            Some(Command::SwitchTurn(Player::P2))
        );
        assert_eq!(
            map_key(press(KeyCode::Modifier(ModifierKeyCode::LeftShift)), v),
            Some(Command::SwitchTurn(Player::P1))
        );
        assert_eq!(
            map_key(press(KeyCode::Modifier(ModifierKeyCode::RightShift)), v),
            Some(Command::SwitchTurn(Player::P2))
        );
    }

    #[test]
    fn test_seat_keys_invert_when_sides_switched() {
        let v = view(GamePhase::Playing, true);
        assert_eq!(
            map_key(press(KeyCode::Char('z')), v),
            Some(Command::SwitchTurn(Player::P2))
        );
        assert_eq!(
            map_key(press(KeyCode::Modifier(ModifierKeyCode::RightShift)), v),
            Some(Command::SwitchTurn(Player::P1))
        );
    }

    #[test]
    fn test_game_keys_suppressed_in_menu_and_ended() {
        for phase in [GamePhase::Menu, GamePhase::Ended] {
            let v = view(phase, false);
            assert_eq!(map_key(press(KeyCode::Char('z')), v), None);
            assert_eq!(map_key(press(KeyCode::Char('m')), v), None);
            assert_eq!(map_key(press(KeyCode::Char(' ')), v), None);
        }
    }

    #[test]
    fn test_space_toggles_in_game() {
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), view(GamePhase::Playing, false)),
            Some(Command::TogglePause)
        );
        assert_eq!(
            map_key(press(KeyCode::Char(' ')), view(GamePhase::Paused, false)),
            Some(Command::TogglePause)
        );
    }

    #[test]
    fn test_release_events_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('z'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(map_key(key, view(GamePhase::Playing, false)), None);
    }

    #[test]
    fn test_menu_keys() {
        let v = view(GamePhase::Menu, false);
        assert_eq!(map_key(press(KeyCode::Char('s')), v), Some(Command::StartGame));
        assert_eq!(map_key(press(KeyCode::Tab), v), Some(Command::SwitchSides));
        assert_eq!(map_key(press(KeyCode::Enter), v), Some(Command::SelectPreset));
        assert_eq!(
            map_key(press(KeyCode::Down), v),
            Some(Command::MoveCursor(CursorMove::Down))
        );
        assert_eq!(map_key(press(KeyCode::Char('n')), v), None);
    }

    #[test]
    fn test_ended_keys() {
        let v = view(GamePhase::Ended, false);
        assert_eq!(map_key(press(KeyCode::Char('r')), v), Some(Command::Reset));
        assert_eq!(map_key(press(KeyCode::Char('n')), v), Some(Command::NewGame));
        assert_eq!(map_key(press(KeyCode::Char('s')), v), None);
    }

    #[test]
    fn test_reset_key_only_after_game_over() {
        let v = view(GamePhase::Playing, false);
        assert_eq!(map_key(press(KeyCode::Char('r')), v), None);
        assert_eq!(map_key(press(KeyCode::Char('n')), v), Some(Command::NewGame));
    }

    #[test]
    fn test_help_traps_keys() {
        let v = InputView {
            phase: GamePhase::Playing,
            sides_switched: false,
            help_open: true,
        };
        assert_eq!(map_key(press(KeyCode::Char('z')), v), None);
        assert_eq!(map_key(press(KeyCode::Char(' ')), v), None);
        assert_eq!(map_key(press(KeyCode::Esc), v), Some(Command::CloseHelp));
        assert_eq!(map_key(press(KeyCode::Char('?')), v), Some(Command::CloseHelp));
    }

    #[test]
    fn test_quit_keys() {
        let v = view(GamePhase::Playing, false);
        assert_eq!(map_key(press(KeyCode::Esc), v), Some(Command::Quit));
        assert_eq!(map_key(press(KeyCode::Char('q')), v), Some(Command::Quit));
        assert_eq!(
            map_key(
                KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
                view(GamePhase::Menu, false)
            ),
            Some(Command::Quit)
        );
    }

    #[test]
    fn test_seat_of_player() {
        assert_eq!(Seat::of(Player::P1, false), Seat::Left);
        assert_eq!(Seat::of(Player::P1, true), Seat::Right);
        assert_eq!(Seat::of(Player::P2, true), Seat::Left);
    }
}

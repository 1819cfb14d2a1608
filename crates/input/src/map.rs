//! Key mapping from terminal events to game inputs and host commands.

use crate::types::{Direction, GameId, GameInput, SnakeAction, TetrisAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Commands handled by the host rather than the loaded game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    Quit,
    /// Load a game (`None` unloads)
    Select(Option<GameId>),
    Restart,
}

/// Map keyboard input to a host command.
pub fn host_command(key: KeyEvent) -> Option<HostCommand> {
    if should_quit(key) {
        return Some(HostCommand::Quit);
    }
    match key.code {
        KeyCode::Char('1') => Some(HostCommand::Select(Some(GameId::Snake))),
        KeyCode::Char('2') => Some(HostCommand::Select(Some(GameId::Tetris))),
        KeyCode::Char('0') => Some(HostCommand::Select(None)),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(HostCommand::Restart),
        _ => None,
    }
}

/// Map keyboard input to an input for the loaded game.
pub fn handle_key_event(game: GameId, key: KeyEvent) -> Option<GameInput> {
    match game {
        GameId::Snake => snake_action(key).map(GameInput::Snake),
        GameId::Tetris => tetris_action(key).map(GameInput::Tetris),
    }
}

fn snake_action(key: KeyEvent) -> Option<SnakeAction> {
    let direction = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Direction::UP,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Direction::DOWN,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Direction::LEFT,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Direction::RIGHT,
        _ => return None,
    };
    Some(SnakeAction::Turn(direction))
}

fn tetris_action(key: KeyEvent) -> Option<TetrisAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(TetrisAction::MoveLeft),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(TetrisAction::MoveRight),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(TetrisAction::Rotate),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(TetrisAction::SoftDrop),
        KeyCode::Char(' ') => Some(TetrisAction::HardDrop),
        _ => None,
    }
}

/// Check if key should quit the arcade.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn snake(code: KeyCode) -> Option<GameInput> {
        handle_key_event(GameId::Snake, KeyEvent::from(code))
    }

    fn tetris(code: KeyCode) -> Option<GameInput> {
        handle_key_event(GameId::Tetris, KeyEvent::from(code))
    }

    #[test]
    fn test_snake_arrows_and_wasd() {
        let turn = |d| Some(GameInput::Snake(SnakeAction::Turn(d)));
        assert_eq!(snake(KeyCode::Up), turn(Direction::UP));
        assert_eq!(snake(KeyCode::Down), turn(Direction::DOWN));
        assert_eq!(snake(KeyCode::Left), turn(Direction::LEFT));
        assert_eq!(snake(KeyCode::Right), turn(Direction::RIGHT));
        assert_eq!(snake(KeyCode::Char('W')), turn(Direction::UP));
        assert_eq!(snake(KeyCode::Char('a')), turn(Direction::LEFT));
        assert_eq!(snake(KeyCode::Char(' ')), None);
    }

    #[test]
    fn test_tetris_keys() {
        let act = |a| Some(GameInput::Tetris(a));
        assert_eq!(tetris(KeyCode::Left), act(TetrisAction::MoveLeft));
        assert_eq!(tetris(KeyCode::Char('d')), act(TetrisAction::MoveRight));
        assert_eq!(tetris(KeyCode::Up), act(TetrisAction::Rotate));
        assert_eq!(tetris(KeyCode::Down), act(TetrisAction::SoftDrop));
        assert_eq!(tetris(KeyCode::Char(' ')), act(TetrisAction::HardDrop));
        assert_eq!(tetris(KeyCode::Char('x')), None);
    }

    #[test]
    fn test_restart_is_a_host_command() {
        assert_eq!(
            host_command(KeyEvent::from(KeyCode::Char('R'))),
            Some(HostCommand::Restart)
        );
        assert_eq!(snake(KeyCode::Char('r')), None);
        assert_eq!(tetris(KeyCode::Char('r')), None);
    }

    #[test]
    fn test_game_selection() {
        assert_eq!(
            host_command(KeyEvent::from(KeyCode::Char('1'))),
            Some(HostCommand::Select(Some(GameId::Snake)))
        );
        assert_eq!(
            host_command(KeyEvent::from(KeyCode::Char('2'))),
            Some(HostCommand::Select(Some(GameId::Tetris)))
        );
        assert_eq!(
            host_command(KeyEvent::from(KeyCode::Char('0'))),
            Some(HostCommand::Select(None))
        );
        assert_eq!(host_command(KeyEvent::from(KeyCode::Left)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
        assert_eq!(
            host_command(KeyEvent::from(KeyCode::Char('Q'))),
            Some(HostCommand::Quit)
        );
    }
}

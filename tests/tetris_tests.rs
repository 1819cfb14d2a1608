//! Tetris integration tests through the facade crate

use tui_arcade::core::{RandomSource, SequenceRng, SimpleRng, TetrisGame};
use tui_arcade::types::{PieceKind, TetrisAction, BOARD_HEIGHT, DROP_INTERVAL_MS};

fn piece_rows(game: &TetrisGame<impl RandomSource>) -> Vec<i8> {
    let snap = game.snapshot();
    let mut rows: Vec<i8> = snap.piece.unwrap().cells.iter().map(|&(_, y)| y).collect();
    rows.sort();
    rows.dedup();
    rows
}

#[test]
fn test_hard_drops_until_top_out() {
    let mut game = TetrisGame::new(SimpleRng::new(42));

    // Every piece lands in the spawn columns, so no row ever completes.
    let mut drops = 0;
    while game.running() && drops < 200 {
        assert!(game.apply_action(TetrisAction::HardDrop));
        drops += 1;
    }

    assert!(game.game_over());
    assert!(drops <= 50, "board should fill within 50 pieces, took {}", drops);
    assert_eq!(game.lines_cleared(), 0);
    assert_eq!(game.high_score(), game.score());

    let high = game.high_score();
    game.restart();
    assert!(game.running());
    assert_eq!(game.score(), 0);
    assert_eq!(game.high_score(), high);
}

#[test]
fn test_board_never_keeps_a_full_row() {
    let mut game = TetrisGame::new(SimpleRng::new(7));
    let mut moves = SimpleRng::new(99);
    let actions = [
        TetrisAction::MoveLeft,
        TetrisAction::MoveRight,
        TetrisAction::Rotate,
        TetrisAction::SoftDrop,
        TetrisAction::HardDrop,
    ];

    for _ in 0..2_000 {
        if game.game_over() {
            break;
        }
        let action = actions[moves.next_range(actions.len() as u32) as usize];
        game.apply_action(action);
        game.advance(16);

        let snap = game.snapshot();
        assert_eq!(snap.board.len(), BOARD_HEIGHT as usize);
        for row in snap.board.iter() {
            assert!(row.iter().any(|&c| c == 0), "full row survived a sweep");
        }
    }
}

#[test]
fn test_gravity_moves_piece_after_interval() {
    let o = PieceKind::ALL.iter().position(|k| *k == PieceKind::O).unwrap() as u32;
    let mut game = TetrisGame::new(SequenceRng::new(vec![o]));
    assert_eq!(piece_rows(&game), vec![0, 1]);

    // Strictly greater than the interval is required.
    assert!(!game.advance(DROP_INTERVAL_MS));
    assert_eq!(piece_rows(&game), vec![0, 1]);

    assert!(game.advance(1));
    assert_eq!(piece_rows(&game), vec![1, 2]);
}

#[test]
fn test_soft_drop_awards_one_point_per_row() {
    let o = PieceKind::ALL.iter().position(|k| *k == PieceKind::O).unwrap() as u32;
    let mut game = TetrisGame::new(SequenceRng::new(vec![o]));
    for _ in 0..5 {
        assert!(game.soft_drop());
    }
    assert_eq!(game.score(), 5);
    assert_eq!(piece_rows(&game), vec![5, 6]);
}

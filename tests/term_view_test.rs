use tui_arcade::core::{Segment, SnakeSnapshot, TetrisSnapshot};
use tui_arcade::engine::{Frame, Status};
use tui_arcade::term::{AnchorY, GameView, Viewport};
use tui_arcade::types::PieceKind;

// Tetris field is 22 wide and the side panel takes 32 more.
const FIT: Viewport = Viewport {
    width: 54,
    height: 22,
};

fn tetris_status() -> Status {
    Status::tetris(0, 0, 0, false)
}

#[test]
fn term_view_renders_border_corners() {
    let frame = Frame::Tetris(TetrisSnapshot::default());
    let view = GameView::default();

    // With cell_w=2 and cell_h=1:
    // board = 10*2 by 20*1 => 20x20, plus border => 22x22
    let fb = view.render(Some(&frame), &tetris_status(), FIT);

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 21).unwrap().ch, '└');
    assert_eq!(fb.get(21, 21).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_locked_cell_as_two_chars_wide() {
    let mut snap = TetrisSnapshot::default();
    snap.board[19][0] = PieceKind::I.code();

    let view = GameView::default();
    let fb = view.render(Some(&Frame::Tetris(snap)), &tetris_status(), FIT);

    // Inside border: (1,1) origin. Each cell is 2 chars wide.
    let (x0, y0) = (1, 1 + 19);
    assert_eq!(fb.get(x0, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 1, y0).unwrap().ch, '█');
    assert_eq!(fb.get(x0 + 2, y0).unwrap().ch, '·');
}

#[test]
fn term_view_skips_piece_cells_above_board() {
    let mut game_snap = tui_arcade::core::TetrisGame::default().snapshot();
    let piece = game_snap.piece.as_mut().unwrap();
    for cell in piece.cells.iter_mut() {
        cell.1 -= 2;
    }
    let visible_rows: Vec<i8> = piece.cells.iter().map(|c| c.1).filter(|&y| y >= 0).collect();

    let view = GameView::default();
    let fb = view.render(Some(&Frame::Tetris(game_snap)), &tetris_status(), FIT);

    // Only rows inside the board are drawn; the top border stays intact.
    for x in 1..21 {
        assert_eq!(fb.get(x, 0).unwrap().ch, '─');
    }
    let drawn = (1..21).filter(|&x| fb.get(x, 1).unwrap().ch == '█').count();
    assert_eq!(drawn > 0, visible_rows.contains(&0));
}

#[test]
fn term_view_anchor_top() {
    let frame = Frame::Tetris(TetrisSnapshot::default());
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(Some(&frame), &tetris_status(), Viewport::new(54, 40));
    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}

#[test]
fn term_view_side_panel_shows_score() {
    let frame = Frame::Tetris(TetrisSnapshot::default());
    let view = GameView::default();
    let fb = view.render(Some(&frame), &Status::tetris(1234, 5, 9000, false), Viewport::new(80, 24));

    let text: String = (0..fb.height())
        .flat_map(|y| (0..fb.width()).map(move |x| (x, y)))
        .filter_map(|(x, y)| fb.get(x, y))
        .map(|c| c.ch)
        .collect();
    assert!(text.contains("TETRIS"));
    assert!(text.contains("SCORE"));
    assert!(text.contains("1234"));
    assert!(text.contains("9000"));
}

#[test]
fn term_view_snake_grid_scales_with_cells() {
    let snap = SnakeSnapshot {
        cols: 5,
        rows: 4,
        segments: vec![Segment::new(4, 3), Segment::new(3, 3)],
        food: Some(Segment::new(0, 0)),
        ..SnakeSnapshot::default()
    };
    let view = GameView::new(1, 1);
    let fb = view.render(
        Some(&Frame::Snake(snap)),
        &Status::snake(0, 0, false),
        Viewport::new(39, 6),
    );

    // 5x4 grid at 1x1 plus border = 7x6, panel pushes it to x=0.
    assert_eq!(fb.get(6, 5).unwrap().ch, '┘');
    assert_eq!(fb.get(5, 4).unwrap().ch, '█');
}

use crate::prelude::*;

fn sq(n: u8) -> Square {
    Square::from_number(n).unwrap()
}

#[test]
fn start_position_layout() {
    let board = Board::new();
    assert_eq!(board.side_count(Side::Red), 20);
    assert_eq!(board.side_count(Side::Black), 20);
    assert_eq!(board.stm, Side::Red);
    assert_eq!(board.plies, 0);
    // Squares 21-30 form the empty middle band.
    for n in 21..=30 {
        assert!(board.get(sq(n)).is_none());
    }
}

#[test]
fn apply_move_moves_the_piece_and_flips_the_turn() {
    let mut board = Board::new();
    let mv = move_gen::resolve_move(&board, sq(20), sq(25)).unwrap();
    board.apply_move(mv).unwrap();

    assert!(board.get(sq(20)).is_none());
    let piece = board.get(sq(25)).unwrap();
    assert_eq!(piece.side, Side::Red);
    assert!(!piece.king);
    assert_eq!(board.stm, Side::Black);
    assert_eq!(board.plies, 1);
}

#[test]
fn apply_capture_clears_every_victim() {
    let mut board = Board::from_position("R:R33:B29,19").unwrap();
    let mv = move_gen::resolve_move(&board, sq(33), sq(13)).unwrap();
    assert_eq!(mv.capture_count(), 2);

    board.apply_move(mv).unwrap();
    assert!(board.get(sq(29)).is_none());
    assert!(board.get(sq(19)).is_none());
    assert!(board.get(sq(33)).is_none());
    assert!(board.get(sq(13)).is_some());
    assert_eq!(board.side_count(Side::Black), 0);
}

#[test]
fn man_promotes_on_the_back_row() {
    let mut board = Board::from_position("R:R44:B1").unwrap();
    let mv = move_gen::resolve_move(&board, sq(44), sq(50)).unwrap();
    board.apply_move(mv).unwrap();

    let piece = board.get(sq(50)).unwrap();
    assert!(piece.king);
    assert_eq!(piece.side, Side::Red);
}

#[test]
fn black_promotes_on_row_zero() {
    let mut board = Board::from_position("B:R50:B6").unwrap();
    let mv = move_gen::resolve_move(&board, sq(6), sq(1)).unwrap();
    board.apply_move(mv).unwrap();
    assert!(board.get(sq(1)).unwrap().king);
}

#[test]
fn a_king_does_not_repromote() {
    let mut board = Board::from_position("R:RK44:B1").unwrap();
    let mv = move_gen::resolve_move(&board, sq(44), sq(50)).unwrap();
    board.apply_move(mv).unwrap();
    assert!(board.get(sq(50)).unwrap().king);
}

#[test]
fn apply_move_rejects_empty_origin() {
    let mut board = Board::new();
    let bogus = Move::quiet(sq(25), sq(30));
    assert!(board.apply_move(bogus).is_err());
}

#[test]
fn apply_move_rejects_the_wrong_side() {
    let mut board = Board::new();
    // Black piece while red is to move.
    let bogus = Move::quiet(sq(31), sq(26));
    assert!(board.apply_move(bogus).is_err());
}

#[test]
fn hash_updates_with_the_position() {
    let mut board = Board::new();
    let initial = board.hash;
    let mv = move_gen::resolve_move(&board, sq(20), sq(25)).unwrap();
    board.apply_move(mv).unwrap();
    assert_ne!(board.hash, initial);
}

#[test]
fn material_draw_requires_bare_kings() {
    assert!(Board::from_position("R:RK28:BK23").unwrap().is_material_draw());
    assert!(!Board::from_position("R:RK28:BK23,5").unwrap().is_material_draw());
    assert!(!Board::from_position("R:R28:BK23").unwrap().is_material_draw());
    assert!(!Board::from_position("R:RK28,K32:BK23").unwrap().is_material_draw());
}

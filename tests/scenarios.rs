mod common;

use common::{after, fen, mv, sq};
use knook::{Colour, PieceKind, Probe, Promotion, Special};
use pretty_assertions::assert_eq;

#[test]
fn pawn_double_step_from_start() {
    let mut board = knook::Board::new();
    let mut m = mv("e2e4");
    let verdict = board.is_move_legal(&mut m, Probe::PLAY);
    assert!(verdict.legal);
    assert!(!verdict.capture);
    assert_eq!(m.special, Special::None);

    board.move_piece(m);
    let pawn = board.at(sq("e4"));
    assert_eq!(pawn.kind(), PieceKind::Pawn);
    assert_eq!(pawn.colour(), Colour::White);
    assert!(!pawn.first_move);
    assert!(board.at(sq("e2")).is_empty());
    assert_eq!(board.get_current_turn(), Colour::Black);
}

#[test]
fn en_passant_right_after_double_step() {
    let mut board = after(&["e2e4", "a7a6", "e4e5", "d7d5"]);
    let mut m = mv("e5d6");
    let verdict = board.is_move_legal(&mut m, Probe::PLAY);
    assert!(verdict.legal);
    assert_eq!(m.special, Special::EnPassant);

    board.move_piece(m);
    assert!(board.at(sq("d5")).is_empty());
    assert!(board.at(sq("e5")).is_empty());
    assert_eq!(board.at(sq("d6")).kind(), PieceKind::Pawn);
    assert_eq!(board.player(Colour::White).score, 1);
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut board = after(&["e2e4", "a7a6", "e4e5", "d7d5", "g1f3", "a6a5"]);
    let mut m = mv("e5d6");
    assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal);
    assert!(board.play("e5d6").is_err());
}

#[test]
fn en_passant_needs_a_double_step() {
    let board = after(&["e2e4", "d7d6", "e4e5", "d6d5"]);
    let mut m = mv("e5d6");
    assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal);
}

#[test]
fn promotion_defaults_to_queen() {
    let mut board = fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let mut m = mv("a7a8");
    assert!(board.is_move_legal(&mut m, Probe::PLAY).legal);
    assert_eq!(m.special, Special::Promotion);

    board.move_piece(m);
    assert_eq!(board.at(sq("a8")).kind(), PieceKind::Queen);
    assert_eq!(board.at(sq("a8")).colour(), Colour::White);
}

#[test]
fn promotion_honours_the_selector() {
    let mut board = fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    let mut m = mv("a7a8");
    board.is_move_legal(&mut m, Probe::PLAY);
    board.move_piece_with(m, &mut Some(Promotion::Knight));
    assert_eq!(board.at(sq("a8")).kind(), PieceKind::Knight);

    let mut board = fen("8/P6k/8/8/8/8/8/K7 w - - 0 1");
    board.play("a7a8r").expect("legal promotion");
    assert_eq!(board.at(sq("a8")).kind(), PieceKind::Rook);
}

#[test]
fn capture_into_last_rank_promotes() {
    let mut board = fen("1r5k/P7/8/8/8/8/8/K7 w - - 0 1");
    let mut m = mv("a7b8");
    let verdict = board.is_move_legal(&mut m, Probe::PLAY);
    assert!(verdict.legal);
    assert!(verdict.capture);
    assert_eq!(m.special, Special::Promotion);
    board.move_piece(m);
    assert_eq!(board.at(sq("b8")).kind(), PieceKind::Queen);
    assert_eq!(board.player(Colour::White).score, 5);
}

#[test]
fn black_promotes_on_rank_one() {
    let mut board = fen("k7/8/8/8/8/8/p7/7K b - - 0 1");
    let played = board.play("a2a1").expect("legal");
    assert_eq!(played.special, Special::Promotion);
    assert_eq!(board.at(sq("a1")).kind(), PieceKind::Queen);
    assert_eq!(board.at(sq("a1")).colour(), Colour::Black);
}

#[test]
fn pawn_short_of_last_rank_is_not_stamped() {
    let board = fen("7k/8/P7/8/8/8/8/K7 w - - 0 1");
    let mut m = mv("a6a7");
    assert!(board.is_move_legal(&mut m, Probe::PLAY).legal);
    assert_eq!(m.special, Special::None);
}

#[test]
fn king_may_not_step_into_rook_file() {
    let board = fen("3r3k/8/8/8/8/8/8/4K3 w - - 0 1");
    for (text, legal) in [("e1d1", false), ("e1d2", false), ("e1f1", true), ("e1e2", true), ("e1f2", true)] {
        let mut m = mv(text);
        assert_eq!(board.is_move_legal(&mut m, Probe::PLAY).legal, legal, "{text}");
    }
    assert!(board.attacked_by(Colour::Black).contains(sq("d1")));
}

#[test]
fn king_may_not_retreat_along_a_checking_ray() {
    // e1 is shadowed by the king itself until the king moves.
    let board = fen("4r2k/8/8/8/8/8/4K3/8 w - - 0 1");
    assert!(!board.attacked_by(Colour::Black).contains(sq("e1")));
    let mut m = mv("e2e1");
    assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal);
    let mut m = mv("e2d1");
    assert!(board.is_move_legal(&mut m, Probe::PLAY).legal);
}

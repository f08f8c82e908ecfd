mod common;

use common::{after, fen, mv, sq, texts};
use knook::{Board, Colour, GameStatus, Piece, PieceKind, Position, Probe};
use pretty_assertions::assert_eq;

#[test]
fn pinned_knight_cannot_move() {
    let board = fen("4r2k/8/8/8/8/8/4N3/4K3 w - - 0 1");
    assert!(board.legal_moves_from(sq("e2")).is_empty());
    let mut m = mv("e2c3");
    assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal);
    // Movement rules alone allow it.
    let mut m = mv("e2c3");
    assert!(board.is_move_legal(&mut m, Probe::PSEUDO).legal);
}

#[test]
fn pinned_rook_slides_along_the_pin() {
    let board = fen("4r2k/8/8/8/8/8/4R3/4K3 w - - 0 1");
    assert_eq!(
        texts(&board.legal_moves_from(sq("e2"))),
        vec!["e2e3", "e2e4", "e2e5", "e2e6", "e2e7", "e2e8"]
    );
}

#[test]
fn pinned_bishop_may_capture_the_pinner() {
    let board = fen("7k/8/8/8/8/2b5/3B4/4K3 w - - 0 1");
    let mut capture = mv("d2c3");
    let verdict = board.is_move_legal(&mut capture, Probe::PLAY);
    assert!(verdict.legal);
    assert!(verdict.capture);
    let mut off_line = mv("d2e3");
    assert!(!board.is_move_legal(&mut off_line, Probe::PLAY).legal);
}

#[test]
fn check_can_be_blocked_further_along_a_ray() {
    let board = fen("4r2k/8/8/8/R7/8/8/4K3 w - - 0 1");
    assert_eq!(board.status(), GameStatus::Check);
    assert_eq!(texts(&board.legal_moves_from(sq("a4"))), vec!["a4e4"]);
    assert_eq!(
        texts(&board.legal_moves()),
        vec!["a4e4", "e1d1", "e1d2", "e1f1", "e1f2"]
    );
}

#[test]
fn king_cannot_capture_a_defended_piece() {
    let defended = fen("3r3k/8/8/8/8/8/3q4/4K3 w - - 0 1");
    let mut m = mv("e1d2");
    assert!(!defended.is_move_legal(&mut m, Probe::PLAY).legal);

    let loose = fen("7k/8/8/8/8/8/3q4/4K3 w - - 0 1");
    let mut m = mv("e1d2");
    let verdict = loose.is_move_legal(&mut m, Probe::PLAY);
    assert!(verdict.legal);
    assert!(verdict.capture);
}

#[test]
fn blocked_pawn_cannot_push() {
    let board = fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1");
    for text in ["e2e3", "e2e4"] {
        let mut m = mv(text);
        assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal, "{text}");
    }
    let mut far_blocked = mv("d2d4");
    let board = fen("4k3/8/8/8/3n4/8/3P4/4K3 w - - 0 1");
    assert!(!board.is_move_legal(&mut far_blocked, Probe::PLAY).legal);
    assert_eq!(texts(&board.legal_moves_from(sq("d2"))), vec!["d2d3"]);
}

#[test]
fn pawns_move_forward_only() {
    let board = after(&["e2e3", "a7a6"]);
    for (text, legal) in [("e3e4", true), ("e3e5", false), ("e3e2", false), ("e3d3", false), ("e3d4", false)] {
        let mut m = mv(text);
        assert_eq!(board.is_move_legal(&mut m, Probe::PLAY).legal, legal, "{text}");
    }
}

#[test]
fn pieces_follow_their_geometry() {
    let board = Board::new();
    for text in ["g1g3", "g1e3", "b1b3", "a1a3", "d1d3"] {
        let mut m = mv(text);
        assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal, "{text}");
    }
    let mut m = mv("g1f3");
    assert!(board.is_move_legal(&mut m, Probe::PLAY).legal);
}

#[test]
fn attack_probe_counts_defended_squares() {
    let board = Board::new();
    let mut m = mv("d1d2");
    assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal);
    let mut m = mv("d1d2");
    let verdict = board.is_move_legal(&mut m, Probe::ATTACKS);
    assert!(verdict.legal);
    assert!(verdict.capture);

    // A pawn's push is never an attack.
    let mut push = mv("e2e3");
    assert!(!board.is_move_legal(&mut push, Probe::ATTACKS).legal);
    let mut diagonal = mv("e2d3");
    assert!(board.is_move_legal(&mut diagonal, Probe::ATTACKS).legal);
}

#[test]
fn empty_origin_is_illegal() {
    let board = Board::new();
    let mut m = mv("e4e5");
    assert!(!board.is_move_legal(&mut m, Probe::PLAY).legal);
    assert!(!board.is_move_legal(&mut m, Probe::ATTACKS).legal);
}

#[test]
fn probing_is_idempotent_and_pure() {
    let board = after(&["e2e4", "d7d5"]);
    let snapshot = board.clone();
    for m in board.legal_moves() {
        let mut first = m;
        let mut second = m;
        assert_eq!(
            board.is_move_legal(&mut first, Probe::PLAY),
            board.is_move_legal(&mut second, Probe::PLAY)
        );
        assert_eq!(first, second);
    }
    assert_eq!(board, snapshot);
}

#[test]
fn copies_are_independent() {
    let original = Board::new();
    let mut copy = original.clone();
    copy.play("e2e4").expect("legal");
    assert_eq!(original.at(sq("e2")).kind(), PieceKind::Pawn);
    assert!(original.at(sq("e4")).is_empty());
    assert_eq!(original.get_current_turn(), Colour::White);
}

#[test]
fn knook_moves_like_rook_and_knight() {
    let mut board = Board::empty();
    board.place((4, 7), Piece::new(PieceKind::King, Colour::White));
    board.place((4, 0), Piece::new(PieceKind::King, Colour::Black));
    board.place(sq("d4"), Piece::new(PieceKind::Knook, Colour::White));
    let moves = board.legal_moves_from(sq("d4"));
    // 14 rook squares and 8 knight jumps.
    assert_eq!(moves.len(), 22);
    for text in ["d4d8", "d4a4", "d4h4", "d4d1", "d4e6", "d4c2"] {
        assert!(moves.contains(&mv(text)), "{text}");
    }
    assert!(!moves.contains(&mv("d4e5")));
    assert!(board.attacked_by(Colour::White).contains(Position::new(4, 2)));
}

#[test]
fn play_reports_why_a_move_fails() {
    use knook::MoveError;
    let mut board = Board::new();
    assert!(matches!(board.play("e3e4"), Err(MoveError::EmptySquare(_))));
    assert!(matches!(board.play("e7e5"), Err(MoveError::WrongTurn(Colour::White))));
    assert!(matches!(board.play("e2e5"), Err(MoveError::Illegal(_))));
    assert!(matches!(board.play("e2"), Err(MoveError::Notation(_))));
    assert!(matches!(board.play("e2e4q"), Err(MoveError::Illegal(_))));
    assert_eq!(board, Board::new());
}

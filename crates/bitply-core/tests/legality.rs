use bitply_core::{ErrorKind, Move, MoveError, MoveFlag, Position, STARTING_FEN, SetupError, Square, analyze, generate};

fn legal(fen: &str) -> Vec<Move> {
    let pos: Position = fen.parse().unwrap();
    generate(&pos, &analyze(&pos)).as_slice().to_vec()
}

fn destinations(moves: &[Move], from: Square) -> Vec<Square> {
    moves.iter().filter(|m| m.from() == from).map(|m| m.to()).collect()
}

#[test]
fn pinned_queen_stays_on_ray() {
    // Rook e8 pins the e4 queen to the e1 king.
    let moves = legal("4r1k1/8/8/8/4Q3/8/8/4K3 w - - 0 1");
    let targets = destinations(&moves, Square::E4);
    assert!(!targets.is_empty());
    assert!(targets.iter().all(|sq| sq.file() == 4), "{targets:?}");
    assert!(targets.contains(&Square::E8));
    assert!(targets.contains(&Square::E2));
}

#[test]
fn unpinned_queen_moves_freely() {
    let moves = legal("6k1/8/8/8/4Q3/8/8/4K3 w - - 0 1");
    assert!(destinations(&moves, Square::E4).iter().any(|sq| sq.file() != 4));
}

#[test]
fn pinned_knight_has_no_moves_on_or_off_ray() {
    let moves = legal("6k1/8/8/b7/8/8/3N4/4K3 w - - 0 1");
    assert!(destinations(&moves, Square::D2).is_empty());
}

#[test]
fn pawn_push_blocks_rank_check() {
    // Rook h6 checks the a6 king along the rank; c5c6 interposes.
    let moves = legal("3k4/3p4/K6r/2P5/8/8/8/8 w - - 3 3");
    assert!(moves.contains(&Move::new(Square::C5, Square::C6, MoveFlag::QUIET)));
    assert!(moves.iter().all(|m| m.from() == Square::A6 || m.to() == Square::C6), "{moves:?}");
}

#[test]
fn knight_blocks_check_from_lower_square() {
    // Rook a1 checks the e1 king along the first rank; only d2b1 interposes.
    let moves = legal("4k3/8/8/8/8/8/3N4/r3K3 w - - 0 1");
    assert_eq!(destinations(&moves, Square::D2), vec![Square::B1]);
    let mut king = destinations(&moves, Square::E1);
    king.sort_by_key(|sq| sq.index());
    assert_eq!(king, vec![Square::E2, Square::F2]);
}

#[test]
fn en_passant_discovered_check_on_rank() {
    let moves = legal("8/8/8/8/k2Pp2Q/8/8/3K4 b - d3 0 1");
    assert!(!moves.iter().any(|m| m.is_en_passant()));
    // Same geometry without the queen: the capture is fine.
    let moves = legal("8/8/8/8/k2Pp3/8/8/3K4 b - d3 0 1");
    assert!(moves.contains(&Move::new(Square::E4, Square::D3, MoveFlag::EN_PASSANT)));
}

#[test]
fn en_passant_when_in_check_from_the_pushed_pawn() {
    let moves = legal("8/8/8/2k5/3Pp3/8/8/3K4 b - d3 0 1");
    assert!(moves.contains(&Move::new(Square::E4, Square::D3, MoveFlag::EN_PASSANT)));
    // Every non-king move must deal with the check.
    for mv in &moves {
        if mv.from() != Square::C5 {
            assert!(mv.is_en_passant(), "{mv:?}");
        }
    }
}

mod castling {
    use super::*;

    const KS: Move = Move::new(Square::E1, Square::G1, MoveFlag::KING_CASTLE);
    const QS: Move = Move::new(Square::E1, Square::C1, MoveFlag::QUEEN_CASTLE);

    fn castles(fen: &str) -> Vec<Move> {
        legal(fen).into_iter().filter(|m| m.is_castle()).collect()
    }

    #[test]
    fn baseline_both_available() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"), vec![KS, QS]);
    }

    #[test]
    fn revoked_right_removes_only_that_side() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w Q - 0 1"), vec![QS]);
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K2R w K - 0 1"), vec![KS]);
    }

    #[test]
    fn occupied_square_removes_only_that_side() {
        assert_eq!(castles("4k3/8/8/8/8/8/8/R3K1NR w KQ - 0 1"), vec![QS]);
        assert_eq!(castles("4k3/8/8/8/8/8/8/R2BK2R w KQ - 0 1"), vec![KS]);
    }

    #[test]
    fn attacked_square_removes_only_that_side() {
        assert_eq!(castles("4k3/8/8/8/8/8/6r1/R3K2R w KQ - 0 1"), vec![QS]);
        assert_eq!(castles("4k3/8/8/8/8/8/2r5/R3K2R w KQ - 0 1"), vec![KS]);
    }
}

#[test]
fn setup_errors_are_classified() {
    let err = Position::from_fen_with_moves(STARTING_FEN, "e2e4 e7e5 g1g3").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Illegal);
    assert!(matches!(err, SetupError::Move { ply: 3, source: MoveError::Illegal { .. } }));

    let err = Position::from_fen_with_moves(STARTING_FEN, "e2e4 zz99").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(matches!(err, SetupError::Move { ply: 2, source: MoveError::Malformed { .. } }));

    let err = Position::from_fen_with_moves("not a fen", "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Malformed);
    assert!(matches!(err, SetupError::Fen(_)));
}

#[test]
fn legal_moves_round_trip_through_text() {
    let pos: Position = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1"
        .parse()
        .unwrap();
    for &mv in &pos.legal_moves() {
        assert_eq!(pos.parse_move(&mv.to_uci()), Ok(mv));
    }
}

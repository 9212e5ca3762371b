use bitply_core::{Position, perft};

fn nodes(fen: &str, depth: usize) -> u64 {
    let mut pos: Position = fen.parse().unwrap();
    perft(&mut pos, depth).unwrap()
}

// --- Position 1: Starting position ---

const STARTPOS: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn perft_startpos_depth_1() {
    assert_eq!(nodes(STARTPOS, 1), 20);
}

#[test]
fn perft_startpos_depth_2() {
    assert_eq!(nodes(STARTPOS, 2), 400);
}

#[test]
fn perft_startpos_depth_3() {
    assert_eq!(nodes(STARTPOS, 3), 8_902);
}

#[test]
fn perft_startpos_depth_4() {
    assert_eq!(nodes(STARTPOS, 4), 197_281);
}

#[test]
#[ignore] // slow
fn perft_startpos_depth_5() {
    assert_eq!(nodes(STARTPOS, 5), 4_865_609);
}

// --- Position 2: Kiwipete ---

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

#[test]
fn perft_kiwipete_depth_1() {
    assert_eq!(nodes(KIWIPETE, 1), 48);
}

#[test]
fn perft_kiwipete_depth_2() {
    assert_eq!(nodes(KIWIPETE, 2), 2_039);
}

#[test]
fn perft_kiwipete_depth_3() {
    assert_eq!(nodes(KIWIPETE, 3), 97_862);
}

#[test]
fn perft_kiwipete_depth_4() {
    assert_eq!(nodes(KIWIPETE, 4), 4_085_603);
}

// --- Position 3 ---

const POSITION3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";

#[test]
fn perft_pos3_depth_1() {
    assert_eq!(nodes(POSITION3, 1), 14);
}

#[test]
fn perft_pos3_depth_2() {
    assert_eq!(nodes(POSITION3, 2), 191);
}

#[test]
fn perft_pos3_depth_3() {
    assert_eq!(nodes(POSITION3, 3), 2_812);
}

#[test]
fn perft_pos3_depth_4() {
    assert_eq!(nodes(POSITION3, 4), 43_238);
}

#[test]
#[ignore] // slow
fn perft_pos3_depth_5() {
    assert_eq!(nodes(POSITION3, 5), 674_624);
}

// --- Position 4 ---

const POSITION4: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1";

#[test]
fn perft_pos4_depth_1() {
    assert_eq!(nodes(POSITION4, 1), 6);
}

#[test]
fn perft_pos4_depth_2() {
    assert_eq!(nodes(POSITION4, 2), 264);
}

#[test]
fn perft_pos4_depth_3() {
    assert_eq!(nodes(POSITION4, 3), 9_467);
}

#[test]
fn perft_pos4_depth_4() {
    assert_eq!(nodes(POSITION4, 4), 422_333);
}

// --- Position 5 ---

const POSITION5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

#[test]
fn perft_pos5_depth_1() {
    assert_eq!(nodes(POSITION5, 1), 44);
}

#[test]
fn perft_pos5_depth_2() {
    assert_eq!(nodes(POSITION5, 2), 1_486);
}

#[test]
fn perft_pos5_depth_3() {
    assert_eq!(nodes(POSITION5, 3), 62_379);
}

#[test]
fn perft_pos5_depth_4() {
    assert_eq!(nodes(POSITION5, 4), 2_103_487);
}

// --- Pins and en passant in sparse endings ---

#[test]
fn perft_rook_pins_pawn_to_king() {
    assert_eq!(nodes("3k4/3p4/8/K1P4r/8/8/8/8 b - - 0 1", 6), 1_134_888);
}

#[test]
fn perft_en_passant_against_bishop_check() {
    assert_eq!(nodes("8/8/1k6/2b5/2pP4/8/5K2/8 b - d3 0 1", 6), 1_440_467);
}

#[test]
fn perft_castling_under_bishops_and_queen() {
    assert_eq!(nodes("r3k2r/1b4bq/8/8/8/8/7B/R3K2R w KQkq - 0 1", 4), 1_274_206);
}

// --- Private tables ---

#[test]
fn perft_on_private_tables() {
    let tables = bitply_core::AttackTables::build().unwrap();
    let mut pos = Position::from_fen_with_tables(tables, KIWIPETE).unwrap();
    assert_eq!(perft(&mut pos, 3).unwrap(), 97_862);
}

use iai::black_box;
use polychess::{
    move_from_text, perft, zobrist::ZobristHasher, Move, Notation, Position, Role, Square, Variant,
};

fn bench_shallow_perft() {
    let pos = Position::new(Variant::Standard).expect("start position");
    assert_eq!(black_box(perft(black_box(&pos), 4)), 197_281);
}

fn bench_deep_perft() {
    let pos = Position::new(Variant::Standard).expect("start position");
    assert_eq!(perft(black_box(&pos), 5), 4_865_609);
}

fn bench_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - ";
    let pos = Position::from_fen(Variant::Standard, fen).expect("legal position");
    assert_eq!(perft(black_box(&pos), 4), 4_085_603);
}

fn bench_xiangqi_perft() {
    let pos = Position::new(Variant::Xiangqi).expect("start position");
    assert_eq!(perft(black_box(&pos), 3), 79_666);
}

fn bench_capablanca_perft() {
    let pos = Position::new(Variant::Capablanca).expect("start position");
    assert_eq!(perft(black_box(&pos), 3), 25_228);
}

fn bench_generate_moves() {
    let fen = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq -";
    let pos = Position::from_fen(Variant::Standard, fen).expect("legal position");

    assert_eq!(black_box(&pos).legal_moves().len(), 39);
}

fn bench_make_undo() -> Position {
    let fen = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq -";
    let pos = Position::from_fen(Variant::Standard, fen).expect("legal position");

    let m = Move::Normal {
        role: Role::Bishop,
        from: Square::new(5, 7),
        capture: None,
        to: Square::new(4, 6),
        promotion: None,
    };

    let mut pos = black_box(pos);
    pos.make_move(m);
    pos.undo_move().expect("undo");
    pos
}

fn bench_play_sans() -> Position {
    let pgn = [
        "e4", "e5", "Nf3", "Nc6", "Bc4", "Nf6", "Ng5", "d5", "exd5", "Na5", "Bb5+", "c6", "dxc6",
        "bxc6", "Ba4", "Ba6", "d3", "Bc5", "O-O", "O-O", "Nc3", "Qc7", "Nge4", "Be7", "Nxf6+",
        "Bxf6", "Ne4", "Be7", "Re1", "Rad8", "f3", "c5", "Be3", "c4", "Qc1", "cxd3", "cxd3", "Qb8",
        "Nf2", "Bxd3", "Nxd3", "Rxd3", "Qc2", "Rxe3", "Rxe3", "Qb6", "Re1", "Bc5", "Qe4", "f5",
        "Qxe5", "f4", "Qd5+", "Kh8", "Kh1", "Bxe3", "b3", "Qd8", "Rd1", "Qxd5", "Rxd5", "Nb7",
        "b4", "Rd8", "Rxd8+", "Nxd8", "Bd7", "Kg8", "a4", "Kf8", "g4", "Ke7", "Bf5", "h6", "h4",
        "Nf7", "h5", "Nd6", "Bd3", "Ke6", "Kg2", "Kd5", "Kh3", "Nf7", "b5", "Bb6", "Kg2", "Kc5",
        "Kf1", "Ne5", "Be2", "Kb4", "Bd1", "Nc4", "Ke2", "Ne3", "g5", "hxg5", "Kd2", "Nxd1",
        "Kxd1", "Kxa4", "Kd2", "Kxb5", "Kd3", "a5", "Ke4", "a4", "Kf5", "a3", "h6", "gxh6",
    ];

    let mut pos = black_box(Position::new(Variant::Standard).expect("start position"));
    for san in black_box(pgn).iter() {
        let m = move_from_text(&pos, san, Notation::San).expect("legal move");
        pos.make_move(m);
    }
    pos
}

fn bench_zobrist_hash() -> u64 {
    ZobristHasher::hash(&black_box(Position::new(Variant::Standard).expect("start position")))
}

iai::main!(
    bench_shallow_perft,
    bench_deep_perft,
    bench_kiwipete,
    bench_xiangqi_perft,
    bench_capablanca_perft,
    bench_generate_moves,
    bench_make_undo,
    bench_play_sans,
    bench_zobrist_hash,
);

use polychess::{Color, Position, Role, Square, Variant};
use rand::SeedableRng as _;
use rand_xoshiro::Xoshiro256PlusPlus;

#[test]
fn test_random_start_positions() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(2026);

    for _ in 0..200 {
        let fen = Variant::Chess960.random_start_fen(&mut rng);
        let mut pos = Position::from_fen(Variant::Chess960, &fen).expect("legal start");
        assert_eq!(pos.to_fen(), fen);

        let back_rank: Vec<Role> = (0..8)
            .map(|file| {
                pos.piece_at(Square::new(file, 0))
                    .map(|piece| piece.role)
                    .expect("full back rank")
            })
            .collect();

        let bishops: Vec<usize> = (0..8).filter(|&i| back_rank[i] == Role::Bishop).collect();
        assert_eq!(bishops.len(), 2, "{fen}");
        assert_ne!(bishops[0] % 2, bishops[1] % 2, "{fen}");

        let rooks: Vec<usize> = (0..8).filter(|&i| back_rank[i] == Role::Rook).collect();
        let king = pos.king_square(Color::White).expect("one king");
        assert!(rooks[0] < usize::from(king.file()) && usize::from(king.file()) < rooks[1]);

        let key = pos.key();
        let moves = pos.legal_moves();
        assert!(moves.len() >= 18, "{fen}");
        for m in moves {
            pos.make_move(m);
            pos.undo_move().expect("undo");
            assert_eq!(pos.key(), key);
        }
    }
}

#[test]
fn test_fixed_variants_ignore_rng() {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(1);
    for variant in [Variant::Standard, Variant::Xiangqi, Variant::Capablanca] {
        assert_eq!(variant.random_start_fen(&mut rng), variant.start_fen());
    }
}

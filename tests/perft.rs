use std::{
    fs::File,
    io::{prelude::*, BufReader},
};

use polychess::{perft, Position, Variant};

fn test_perft_file(path: &str, node_limit: u64) {
    let file = File::open(path).expect("failed to open test suite");
    let reader = BufReader::new(file);

    let mut variant = Variant::Standard;
    let mut pos = Position::new(variant).expect("start position");

    for line in reader.lines().map(|l| l.unwrap()) {
        println!("{}", line);

        let trimmed = line.trim();
        let mut slices = trimmed.splitn(2, ' ');

        match slices.next() {
            Some("variant") => {
                variant = slices
                    .next()
                    .expect("missing variant")
                    .parse()
                    .expect("known variant");
            }
            Some("epd") => {
                pos = Position::from_fen(variant, slices.next().expect("missing epd"))
                    .expect("legal fen");
            }
            Some("perft") => {
                let mut params = slices.next().expect("missing perft params").splitn(2, ' ');

                let depth = params
                    .next()
                    .expect("missing perft depth")
                    .parse()
                    .expect("depth not an integer");

                let nodes = params
                    .next()
                    .expect("missing perft nodes")
                    .parse()
                    .expect("nodes not an integer");

                if nodes <= node_limit {
                    assert_eq!(perft(&pos, depth), nodes);
                }
            }
            _ => {}
        }
    }
}

macro_rules! gen_tests {
    ($($fn_name:ident, $path:tt, $num:expr,)+) => {
        $(
            #[test]
            #[cfg_attr(miri, ignore)]
            fn $fn_name() {
                test_perft_file($path, $num);
            }
        )+
    }
}

gen_tests! {
    test_standard, "tests/standard.perft", 1_000_000,
    test_chess960, "tests/chess960.perft", 100_000,
    test_variants, "tests/variants.perft", 1_000_000,
}

#[test]
#[cfg_attr(debug_assertions, ignore)]
fn test_deep_start_position() {
    let pos = Position::new(Variant::Standard).expect("start position");
    assert_eq!(perft(&pos, 5), 4_865_609);
}

#[cfg(feature = "rayon")]
#[test]
#[cfg_attr(debug_assertions, ignore)]
fn test_parallel_xiangqi() {
    let pos = Position::new(Variant::Xiangqi).expect("start position");
    assert_eq!(polychess::perft_parallel(&pos, 4), 3_290_240);
}

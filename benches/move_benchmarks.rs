use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use life2048::console_interface::parse_board;
use life2048::core::{collapse_line, perform_move, Direction, Tile};

const BOARDS: &[(&str, &str)] = &[
    ("sparse_4", r#"
    . 2 . .
    . . . 4
    2 . . .
    . . 2 .
    "#),
    ("dense_4", r#"
    2 2 4 4
    8 8 16 16
    2 4 8 16
    4 4 4 4
    "#),
    ("dense_8", r#"
    2 2 4 4 8 8 16 16
    4 . 4 . 4 . 4 .
    2 4 8 16 32 64 128 256
    . . . . . . . 2
    2 2 2 2 2 2 2 2
    4 8 4 8 4 8 4 8
    . 2 . 2 . 2 . 2
    1024 1024 512 512 256 256 128 128
    "#),
];

pub fn bench_perform_move(c: &mut Criterion) {
    let mut group = c.benchmark_group("perform_move");

    for &(name, text) in BOARDS {
        let board = parse_board(text).expect("benchmark board should parse");
        for direction in [Direction::Up, Direction::Down, Direction::Left, Direction::Right] {
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", direction), name),
                &board,
                |b, board| {
                    b.iter_with_setup(
                        || board.clone(),
                        |mut board| black_box(perform_move(&mut board, direction)),
                    )
                },
            );
        }
    }
    group.finish();
}

pub fn bench_collapse_line(c: &mut Criterion) {
    let line = [Tile::Value(2), Tile::Empty, Tile::Value(2), Tile::Value(4), Tile::Empty, Tile::Value(4), Tile::Value(8), Tile::Empty];
    c.bench_function("collapse_line_8", |b| b.iter(|| black_box(collapse_line(black_box(&line)))));
}

criterion_group!(benches, bench_perform_move, bench_collapse_line);
criterion_main!(benches);

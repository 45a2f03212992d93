use crate::core::board::SquareGameboard;
use crate::core::models::{Direction, MoveOrder, Tile, Vec2};

/// Where a tile in a collapsed line came from, as indices into the input line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineOrder {
    Single { from: usize, to: usize, value: u32 },
    Double { from: (usize, usize), to: usize, value: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineOutcome {
    pub tiles: Vec<Tile>,
    pub orders: Vec<LineOrder>,
    pub score: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    pub score_gained: u32,
    pub orders: Vec<MoveOrder>,
}

/// Collapse one line toward index 0. Each tile merges at most once per move.
pub fn collapse_line(line: &[Tile]) -> LineOutcome {
    let occupied: Vec<(usize, u32)> = line
        .iter()
        .enumerate()
        .filter_map(|(idx, tile)| match tile {
            Tile::Value(v) => Some((idx, *v)),
            Tile::Empty => None,
        })
        .collect();

    let mut tiles = vec![Tile::Empty; line.len()];
    let mut orders = Vec::new();
    let mut score: u32 = 0;
    let mut to = 0;
    let mut k = 0;
    while k < occupied.len() {
        let (source, value) = occupied[k];
        match occupied.get(k + 1) {
            Some(&(second, next)) if next == value && value.checked_mul(2).is_some() => {
                let merged = value * 2;
                tiles[to] = Tile::Value(merged);
                orders.push(LineOrder::Double { from: (source, second), to, value: merged });
                score = score.saturating_add(merged);
                k += 2;
            }
            _ => {
                tiles[to] = Tile::Value(value);
                if source != to {
                    orders.push(LineOrder::Single { from: source, to, value });
                }
                k += 1;
            }
        }
        to += 1;
    }

    LineOutcome { tiles, orders, score }
}

/// Board coordinate of position `p` (0 = leading edge) on line `k` for a move in `direction`.
fn line_position(direction: Direction, dimension: usize, k: usize, p: usize) -> Vec2 {
    match direction {
        Direction::Left => Vec2 { i: k, j: p },
        Direction::Right => Vec2 { i: k, j: dimension - 1 - p },
        Direction::Up => Vec2 { i: p, j: k },
        Direction::Down => Vec2 { i: dimension - 1 - p, j: k },
    }
}

pub fn perform_move(board: &mut SquareGameboard<Tile>, direction: Direction) -> MoveOutcome {
    let n = board.dimension();
    let mut outcome = MoveOutcome::default();

    for k in 0..n {
        let coords: Vec<Vec2> = (0..n).map(|p| line_position(direction, n, k, p)).collect();
        let line: Vec<Tile> = coords.iter().map(|pos| board[pos]).collect();
        let collapsed = collapse_line(&line);
        if collapsed.orders.is_empty() {
            continue;
        }

        for (pos, tile) in coords.iter().zip(&collapsed.tiles) {
            board[pos] = *tile;
        }
        outcome.score_gained = outcome.score_gained.saturating_add(collapsed.score);
        outcome.orders.extend(collapsed.orders.iter().map(|order| match *order {
            LineOrder::Single { from, to, value } => MoveOrder::Single {
                from: coords[from],
                to: coords[to],
                value,
            },
            LineOrder::Double { from: (a, b), to, value } => MoveOrder::Double {
                from: (coords[a], coords[b]),
                to: coords[to],
                value,
            },
        }));
    }

    outcome.changed = !outcome.orders.is_empty();
    outcome
}

#[cfg(test)]
mod test {
    use super::*;
    use Tile::{Empty, Value};

    #[test]
    fn test_collapse_slides_over_gaps() {
        let out = collapse_line(&[Empty, Value(2), Empty, Value(4)]);

        assert_eq!(out.tiles, vec![Value(2), Value(4), Empty, Empty]);
        assert_eq!(
            out.orders,
            vec![
                LineOrder::Single { from: 1, to: 0, value: 2 },
                LineOrder::Single { from: 3, to: 1, value: 4 },
            ]
        );
        assert_eq!(out.score, 0);
    }

    #[test]
    fn test_collapse_merges_each_tile_once() {
        let out = collapse_line(&[Value(2), Value(2), Value(4), Empty]);

        assert_eq!(out.tiles, vec![Value(4), Value(4), Empty, Empty]);
        assert_eq!(out.score, 4);
    }

    #[test]
    fn test_collapse_four_equal_makes_two_pairs() {
        let out = collapse_line(&[Value(2), Value(2), Value(2), Value(2)]);

        assert_eq!(out.tiles, vec![Value(4), Value(4), Empty, Empty]);
        assert_eq!(
            out.orders,
            vec![
                LineOrder::Double { from: (0, 1), to: 0, value: 4 },
                LineOrder::Double { from: (2, 3), to: 1, value: 4 },
            ]
        );
        assert_eq!(out.score, 8);
    }

    #[test]
    fn test_collapse_three_equal_merges_leading_pair() {
        let out = collapse_line(&[Value(8), Value(8), Value(8), Empty]);

        assert_eq!(out.tiles, vec![Value(16), Value(8), Empty, Empty]);
        assert_eq!(out.score, 16);
    }

    #[test]
    fn test_collapse_merges_across_gap() {
        let out = collapse_line(&[Value(2), Empty, Empty, Value(2)]);

        assert_eq!(out.tiles, vec![Value(4), Empty, Empty, Empty]);
        assert_eq!(out.orders, vec![LineOrder::Double { from: (0, 3), to: 0, value: 4 }]);
    }

    #[test]
    fn test_collapse_packed_line_has_no_orders() {
        let out = collapse_line(&[Value(2), Value(4), Value(8), Empty]);

        assert!(out.orders.is_empty());
        assert_eq!(out.tiles, vec![Value(2), Value(4), Value(8), Empty]);
    }

    #[test]
    fn test_collapse_does_not_merge_past_u32() {
        let top = 1u32 << 31;
        let out = collapse_line(&[Value(top), Value(top), Empty]);

        assert_eq!(out.tiles, vec![Value(top), Value(top), Empty]);
        assert!(out.orders.is_empty());
        assert_eq!(out.score, 0);
    }

    #[test]
    fn test_move_down_maps_coordinates() {
        let mut board = SquareGameboard::new(3, Empty);
        board[&Vec2 { i: 0, j: 1 }] = Value(2);
        board[&Vec2 { i: 1, j: 1 }] = Value(2);

        let outcome = perform_move(&mut board, Direction::Down);

        assert!(outcome.changed);
        assert_eq!(outcome.score_gained, 4);
        assert_eq!(board[&Vec2 { i: 2, j: 1 }], Value(4));
        assert_eq!(
            outcome.orders,
            vec![MoveOrder::Double {
                from: (Vec2 { i: 1, j: 1 }, Vec2 { i: 0, j: 1 }),
                to: Vec2 { i: 2, j: 1 },
                value: 4,
            }]
        );
    }

    #[test]
    fn test_blocked_move_leaves_board_unchanged() {
        let mut board = SquareGameboard::new(2, Empty);
        board[&Vec2 { i: 0, j: 0 }] = Value(2);
        let before = board.clone();

        let outcome = perform_move(&mut board, Direction::Left);

        assert!(!outcome.changed);
        assert_eq!(board, before);
    }
}

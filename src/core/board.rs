use crate::core::models::Vec2;

/// A square grid with one corner fixed at 0,0, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SquareGameboard<T> {
    dimension: usize,
    cells: Vec<T>,
}

impl<T> SquareGameboard<T> {
    pub fn new(dimension: usize, initial: T) -> Self
    where
        T: Clone,
    {
        assert!(dimension > 0, "gameboard dimension must be positive");
        SquareGameboard {
            dimension,
            cells: vec![initial; dimension * dimension],
        }
    }

    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        let dimension = rows.len();
        if dimension == 0 || rows.iter().any(|row| row.len() != dimension) {
            return None;
        }
        Some(SquareGameboard {
            dimension,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn contains(&self, pos: &Vec2) -> bool {
        pos.i < self.dimension && pos.j < self.dimension
    }

    pub fn get(&self, pos: &Vec2) -> Option<&T> {
        if !self.contains(pos) {
            return None;
        }
        Some(&self[pos])
    }

    pub fn set_all(&mut self, value: T)
    where
        T: Clone,
    {
        self.cells.fill(value);
    }

    pub fn positions(&self) -> impl Iterator<Item = Vec2> + use<T> {
        let dimension = self.dimension;
        (0..dimension).flat_map(move |i| (0..dimension).map(move |j| Vec2 { i, j }))
    }

    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.cells.chunks(self.dimension)
    }
}

impl<T> std::ops::Index<&Vec2> for SquareGameboard<T> {
    type Output = T;

    fn index(&self, index: &Vec2) -> &Self::Output {
        &self.cells[index.i * self.dimension + index.j]
    }
}

impl<T> std::ops::IndexMut<&Vec2> for SquareGameboard<T> {
    fn index_mut(&mut self, index: &Vec2) -> &mut Self::Output {
        &mut self.cells[index.i * self.dimension + index.j]
    }
}

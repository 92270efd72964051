#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Cyan,
    Yellow,
    Purple,
    Blue,
    Orange,
    Green,
    Red,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tetromino {
    I,
    O,
    T,
    J,
    L,
    S,
    Z,
}

impl Tetromino {
    pub const ALL: [Tetromino; 7] = [
        Tetromino::I,
        Tetromino::O,
        Tetromino::T,
        Tetromino::J,
        Tetromino::L,
        Tetromino::S,
        Tetromino::Z,
    ];

    pub fn color(self) -> Color {
        match self {
            Tetromino::I => Color::Cyan,
            Tetromino::O => Color::Yellow,
            Tetromino::T => Color::Purple,
            Tetromino::J => Color::Blue,
            Tetromino::L => Color::Orange,
            Tetromino::S => Color::Green,
            Tetromino::Z => Color::Red,
        }
    }

    /// Spawn orientation. Every template sits in a square bounding matrix so
    /// that [`Shape::rotated`] stays inside it.
    pub fn shape(self) -> Shape {
        match self {
            Tetromino::I => Shape::square([[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
            Tetromino::O => Shape::square([[1, 1], [1, 1]]),
            Tetromino::T => Shape::square([[0, 1, 0], [1, 1, 1], [0, 0, 0]]),
            Tetromino::J => Shape::square([[1, 0, 0], [1, 1, 1], [0, 0, 0]]),
            Tetromino::L => Shape::square([[0, 0, 1], [1, 1, 1], [0, 0, 0]]),
            Tetromino::S => Shape::square([[0, 1, 1], [1, 1, 0], [0, 0, 0]]),
            Tetromino::Z => Shape::square([[1, 1, 0], [0, 1, 1], [0, 0, 0]]),
        }
    }
}

/// Square occupancy matrix, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Shape {
    size: usize,
    filled: Vec<bool>,
}

impl Shape {
    pub fn square<const N: usize>(rows: [[u8; N]; N]) -> Self {
        let filled = rows.iter().flatten().map(|&v| v != 0).collect();
        Self { size: N, filled }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.size && row < self.size && self.filled[row * self.size + col]
    }

    /// Filled cells as `(col, row)` offsets within the matrix.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.filled
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(|(i, _)| (i % self.size, i / self.size))
    }

    /// Quarter turn clockwise: `result[i][j] = source[n - j][i]`.
    pub fn rotated(&self) -> Self {
        let n = self.size - 1;
        let mut filled = vec![false; self.filled.len()];
        for i in 0..self.size {
            for j in 0..self.size {
                filled[i * self.size + j] = self.filled[(n - j) * self.size + i];
            }
        }
        Self {
            size: self.size,
            filled,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub kind: Tetromino,
    pub shape: Shape,
    pub color: Color,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Centered horizontally, entirely above the visible board.
    pub fn spawn(kind: Tetromino, board_width: usize) -> Self {
        let shape = kind.shape();
        let size = shape.size() as i32;
        Self {
            kind,
            color: kind.color(),
            x: (board_width / 2) as i32 - size / 2,
            y: -size,
            shape,
        }
    }

    /// Board coordinates of every filled cell.
    pub fn cells(&self) -> Vec<(i32, i32)> {
        self.shape
            .cells()
            .map(|(col, row)| (self.x + col as i32, self.y + row as i32))
            .collect()
    }

    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        let mut next = self.clone();
        next.x += dx;
        next.y += dy;
        next
    }

    pub fn rotated(&self) -> Self {
        let mut next = self.clone();
        next.shape = self.shape.rotated();
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BOARD_W;

    fn footprint(shape: &Shape) -> Vec<(usize, usize)> {
        let cells: Vec<_> = shape.cells().collect();
        let min_c = cells.iter().map(|c| c.0).min().unwrap();
        let min_r = cells.iter().map(|c| c.1).min().unwrap();
        let mut normalized: Vec<_> = cells.iter().map(|&(c, r)| (c - min_c, r - min_r)).collect();
        normalized.sort();
        normalized
    }

    #[test]
    fn every_template_has_four_cells() {
        for kind in Tetromino::ALL {
            assert_eq!(kind.shape().cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn four_rotations_reproduce_every_shape() {
        for kind in Tetromino::ALL {
            let shape = kind.shape();
            let back = shape.rotated().rotated().rotated().rotated();
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn i_piece_half_turn_keeps_its_footprint() {
        let shape = Tetromino::I.shape();
        let half = shape.rotated().rotated();
        assert_eq!(footprint(&half), footprint(&shape));
    }

    #[test]
    fn quarter_turn_stands_the_i_piece_up() {
        let upright = Tetromino::I.shape().rotated();
        let cols: Vec<_> = upright.cells().map(|(c, _)| c).collect();
        assert!(cols.iter().all(|&c| c == cols[0]));
        assert_eq!(upright.cells().count(), 4);
    }

    #[test]
    fn rotation_follows_the_matrix_formula() {
        let shape = Shape::square([[1, 0, 0], [1, 1, 1], [0, 0, 0]]);
        let expected = Shape::square([[0, 1, 1], [0, 1, 0], [0, 1, 0]]);
        assert_eq!(shape.rotated(), expected);
    }

    #[test]
    fn spawn_centers_above_the_board() {
        let o = Piece::spawn(Tetromino::O, BOARD_W);
        assert_eq!((o.x, o.y), (4, -2));
        let i = Piece::spawn(Tetromino::I, BOARD_W);
        assert_eq!((i.x, i.y), (3, -4));
        let t = Piece::spawn(Tetromino::T, BOARD_W);
        assert_eq!((t.x, t.y), (4, -3));
        assert!(t.cells().iter().all(|&(_, y)| y < 0));
    }
}

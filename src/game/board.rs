use crate::game::{Color, Piece, Shape};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Occupied(Color),
}

impl Cell {
    pub fn is_occupied(self) -> bool {
        matches!(self, Cell::Occupied(_))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        }
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: Cell) {
        let idx = self.idx(x, y);
        self.cells[idx] = value;
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Whether `shape` placed with its top-left corner at `(x, y)` is
    /// in bounds and clear of locked cells. Rows above the board are free.
    pub fn fits(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.cells().all(|(col, row)| {
            let bx = x + col as i32;
            let by = y + row as i32;
            if bx < 0 || bx >= self.width as i32 || by >= self.height as i32 {
                return false;
            }
            by < 0 || !self.get(bx as usize, by as usize).is_occupied()
        })
    }

    /// Writes the piece into the grid. Cells above the board are dropped;
    /// returns `false` if any were.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let mut on_board = true;
        for (x, y) in piece.cells() {
            if y < 0 {
                on_board = false;
                continue;
            }
            let (xu, yu) = (x as usize, y as usize);
            if x >= 0 && xu < self.width && yu < self.height {
                self.set(xu, yu, Cell::Occupied(piece.color));
            }
        }
        on_board
    }

    pub fn is_row_full(&self, y: usize) -> bool {
        let start = self.idx(0, y);
        self.cells[start..start + self.width]
            .iter()
            .all(|cell| cell.is_occupied())
    }

    /// Removes full rows bottom to top, shifting the rest down. The same
    /// row index is checked again after each removal.
    pub fn clear_full_lines(&mut self) -> u32 {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            let row = y - 1;
            if self.is_row_full(row) {
                self.remove_row(row);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    fn remove_row(&mut self, row: usize) {
        let width = self.width;
        for y in (1..=row).rev() {
            let src = (y - 1) * width;
            self.cells.copy_within(src..src + width, y * width);
        }
        self.cells[..width].fill(Cell::Empty);
    }
}

use std::fmt;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Column holding the centre bonus in the static evaluation.
pub const CENTER_COL: usize = COLS / 2;

/// Number of distinct four-cell lines on the board.
pub const WINDOW_COUNT: usize = 69;

/// Four board coordinates `(row, col)` in a straight line.
pub type Window = [(usize, usize); 4];

/// Right, down, down-right, up-right.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    Empty,
    PlayerOne,
    PlayerTwo,
}

impl Cell {
    /// Character used in text diagrams.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::PlayerOne => 'X',
            Cell::PlayerTwo => 'O',
        }
    }

    pub fn from_symbol(ch: char) -> Option<Cell> {
        match ch {
            '.' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::PlayerOne),
            'O' | 'o' => Some(Cell::PlayerTwo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Build a board from raw cells. No gravity check is made here;
    /// positions validate their boards on construction.
    pub fn from_cells(cells: [[Cell; COLS]; ROWS]) -> Self {
        Board { cells }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, cell: Cell) {
        self.cells[row][col] = cell;
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        self.cells[0][col] != Cell::Empty
    }

    /// Lowest empty row in `col`, or `None` if the column is full or out of range.
    pub fn open_row(&self, col: usize) -> Option<usize> {
        if col >= COLS {
            return None;
        }
        (0..ROWS).rev().find(|&row| self.cells[row][col] == Cell::Empty)
    }

    /// Number of non-empty cells.
    pub fn occupied(&self) -> usize {
        self.count(Cell::PlayerOne) + self.count(Cell::PlayerTwo)
    }

    /// Number of cells holding `cell`.
    pub fn count(&self, cell: Cell) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&c| c == cell)
            .count()
    }

    /// True if some piece sits above an empty cell in the same column.
    pub fn has_floating_piece(&self) -> bool {
        (0..COLS).any(|col| {
            (1..ROWS).any(|row| {
                self.cells[row - 1][col] != Cell::Empty && self.cells[row][col] == Cell::Empty
            })
        })
    }

    /// Contents of a window, in line order.
    pub fn window(&self, window: &Window) -> [Cell; 4] {
        (*window).map(|(row, col)| self.cells[row][col])
    }

    /// Check whether `cell` occupies all four cells of any horizontal,
    /// vertical or diagonal line.
    pub fn has_four(&self, cell: Cell) -> bool {
        if cell == Cell::Empty {
            return false;
        }
        windows().any(|w| self.window(&w).iter().all(|&c| c == cell))
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
        }
        Ok(())
    }
}

/// Every four-cell line on the board: horizontal, vertical, then both
/// diagonals.
pub fn windows() -> impl Iterator<Item = Window> {
    DIRECTIONS.into_iter().flat_map(|(dr, dc)| {
        (0..ROWS).flat_map(move |row| {
            (0..COLS).filter_map(move |col| window_from(row, col, dr, dc))
        })
    })
}

fn window_from(row: usize, col: usize, dr: isize, dc: isize) -> Option<Window> {
    let mut window = [(0, 0); 4];
    for (i, slot) in window.iter_mut().enumerate() {
        let r = row as isize + dr * i as isize;
        let c = col as isize + dc * i as isize;
        if r < 0 || r >= ROWS as isize || c < 0 || c >= COLS as isize {
            return None;
        }
        *slot = (r as usize, c as usize);
    }
    Some(window)
}

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

/// Cell value; 0 means empty, 1..=9 are digits.
pub type Value = u8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Pos {
    pub r: usize,
    pub c: usize,
}

impl Pos {
    pub fn idx(self) -> usize {
        self.r * 9 + self.c
    }
}

#[derive(Debug, Error)]
pub enum ShapeError {
    #[error("cells must be a 9x9 matrix, got {0} rows")]
    RowCount(usize),
    #[error("cells must be a 9x9 matrix, row {row} has {len} cells")]
    RowLength { row: usize, len: usize },
    #[error("cell ({row}, {column}) holds {value}, outside 0..=9")]
    Value { row: usize, column: usize, value: u8 },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// 0 for empty.
    pub value: Value,
    /// Given by the puzzle; not editable by the player.
    pub locked: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub cells: [[Cell; 9]; 9],
}

impl Board {
    pub fn empty() -> Self {
        Self { cells: [[Cell::default(); 9]; 9] }
    }

    /// Builds a board from a raw value matrix. The matrix must be exactly
    /// 9 rows of 9 values in 0..=9.
    pub fn from_values(values: &[Vec<Value>]) -> Result<Self, ShapeError> {
        if values.len() != 9 {
            return Err(ShapeError::RowCount(values.len()));
        }
        let mut b = Self::empty();
        for (r, row) in values.iter().enumerate() {
            if row.len() != 9 {
                return Err(ShapeError::RowLength { row: r, len: row.len() });
            }
            for (c, &v) in row.iter().enumerate() {
                if v > 9 {
                    return Err(ShapeError::Value { row: r, column: c, value: v });
                }
                b.cells[r][c].value = v;
            }
        }
        Ok(b)
    }

    /// The raw value matrix; round-trips through [`Board::from_values`].
    pub fn values(&self) -> Vec<Vec<Value>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|cell| cell.value).collect())
            .collect()
    }

    /// Parses 81 digits with 0, '.' or '_' for blanks; other characters are
    /// ignored. Nonzero cells become locked givens.
    pub fn parse(text: &str) -> anyhow::Result<Self> {
        let mut digits = Vec::with_capacity(81);
        for ch in text.chars() {
            match ch {
                '1'..='9' => digits.push(ch as u8 - b'0'),
                '0' | '.' | '_' => digits.push(0),
                _ => {}
            }
        }
        if digits.len() != 81 {
            anyhow::bail!("expected 81 digits/dots, got {}", digits.len());
        }
        let mut b = Self::empty();
        for (i, &v) in digits.iter().enumerate() {
            b.cells[i / 9][i % 9] = Cell { value: v, locked: v != 0 };
        }
        Ok(b)
    }

    pub fn to_compact(&self) -> String {
        Self::all_coords()
            .map(|p| {
                let v = self.cells[p.r][p.c].value;
                if v == 0 { '.' } else { (b'0' + v) as char }
            })
            .collect()
    }

    pub fn row_coords(row: usize) -> impl Iterator<Item = Pos> {
        (0..9).map(move |c| Pos { r: row, c })
    }

    pub fn column_coords(column: usize) -> impl Iterator<Item = Pos> {
        (0..9).map(move |r| Pos { r, c: column })
    }

    pub fn box_coords(box_r: usize, box_c: usize) -> impl Iterator<Item = Pos> {
        (0..3).flat_map(move |dr| (0..3).map(move |dc| Pos { r: box_r * 3 + dr, c: box_c * 3 + dc }))
    }

    /// Coordinates of the box containing the given cell.
    pub fn box_coords_of(row: usize, column: usize) -> impl Iterator<Item = Pos> {
        Self::box_coords(row / 3, column / 3)
    }

    pub fn all_coords() -> impl Iterator<Item = Pos> {
        (0..81).map(|i| Pos { r: i / 9, c: i % 9 })
    }

    /// Values 1..=9 not used by any peer of the cell (same row, column, or
    /// box). The cell's own value is ignored. Recomputed from scratch on
    /// every call; the board mutates during search, so nothing is cached.
    pub fn candidates(&self, row: usize, column: usize) -> Vec<Value> {
        let mut used = [false; 10];
        let peers = Self::row_coords(row)
            .chain(Self::column_coords(column))
            .chain(Self::box_coords_of(row, column));
        for p in peers {
            if p.r == row && p.c == column {
                continue;
            }
            used[self.cells[p.r][p.c].value as usize] = true;
        }
        (1..=9).filter(|&v| !used[v as usize]).collect()
    }

    /// Scans one line (a row, column, or box) for duplicates. Returns overall
    /// validity plus every coordinate participating in a duplicate, not just
    /// the first of each group; groups come out in first-seen value order.
    pub fn check_line(&self, line: impl IntoIterator<Item = Pos>) -> (bool, Vec<Pos>) {
        // filled cells of the line in scan order; stack-allocated because
        // this runs at every node of the search
        let mut filled = [(Pos { r: 0, c: 0 }, 0usize); 81];
        let mut len = 0;
        let mut counts = [0u8; 10];
        for p in line {
            let v = self.cells[p.r][p.c].value as usize;
            if v == 0 {
                continue;
            }
            filled[len] = (p, v);
            len += 1;
            counts[v] += 1;
        }

        if counts[1..].iter().all(|&n| n <= 1) {
            return (true, Vec::new());
        }

        let mut bad = Vec::new();
        let mut emitted = [false; 10];
        for &(_, v) in &filled[..len] {
            if emitted[v] || counts[v] <= 1 {
                continue;
            }
            emitted[v] = true;
            bad.extend(filled[..len].iter().filter(|&&(_, u)| u == v).map(|&(p, _)| p));
        }
        (false, bad)
    }

    pub fn check_row(&self, row: usize) -> (bool, Vec<Pos>) {
        self.check_line(Self::row_coords(row))
    }

    pub fn check_column(&self, column: usize) -> (bool, Vec<Pos>) {
        self.check_line(Self::column_coords(column))
    }

    pub fn check_box(&self, box_r: usize, box_c: usize) -> (bool, Vec<Pos>) {
        self.check_line(Self::box_coords(box_r, box_c))
    }

    pub fn check_box_of(&self, row: usize, column: usize) -> (bool, Vec<Pos>) {
        self.check_line(Self::box_coords_of(row, column))
    }

    /// True iff every row, column, and box is duplicate-free and no cell is
    /// empty. Box (i/3, i%3) rides along the row loop, so all nine boxes are
    /// covered by i in 0..9.
    pub fn is_solved(&self) -> bool {
        for i in 0..9 {
            if !self.check_row(i).0 || !self.check_column(i).0 {
                return false;
            }
            if !self.check_box(i / 3, i % 3).0 {
                return false;
            }
            for j in 0..9 {
                if self.cells[i][j].value == 0 {
                    return false;
                }
            }
        }
        true
    }

    /// Every coordinate participating in any duplicate across all rows,
    /// columns, and boxes.
    pub fn conflicts(&self) -> Vec<Pos> {
        let mut bad = Vec::new();
        for i in 0..9 {
            bad.extend(self.check_row(i).1);
            bad.extend(self.check_column(i).1);
            bad.extend(self.check_box(i / 3, i % 3).1);
        }
        bad.into_iter().unique().collect()
    }

    /// Marks every filled cell as a locked given; empty cells stay editable.
    pub fn lock_filled(&mut self) {
        for row in self.cells.iter_mut() {
            for cell in row.iter_mut() {
                cell.locked = cell.value != 0;
            }
        }
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for r in 0..9 {
            if r % 3 == 0 {
                writeln!(f, "+-------+-------+-------+")?;
            }
            for c in 0..9 {
                if c % 3 == 0 {
                    write!(f, "| ")?;
                }
                let v = self.cells[r][c].value;
                let ch = if v == 0 { '·' } else { (b'0' + v) as char };
                write!(f, "{} ", ch)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "+-------+-------+-------+")
    }
}
